//! Input state and event bindings
//!
//! Window events are translated by the host into engine-style event names
//! (`arrow_left`, `arrow_left-up`, `mouse1`, ...). Demos bind handlers to
//! those names and keep their pressed/released state in the trackers here.

mod key_map;
mod mouse;
mod bindings;

pub use key_map::{Key, KeyMap};
pub use mouse::{MouseButtons, PointerDelta, BUTTON_COUNT};
pub use bindings::{EventMap, up_event};
