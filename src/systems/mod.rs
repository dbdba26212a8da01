//! Application systems
//!
//! Per-frame scheduling, the Ralph movement step and its camera framing,
//! the demo host and the window.

mod task;
mod camera_framing;
mod movement;
mod host;
mod window;

pub use task::{DoneStatus, FrameClock, FrameTime, TaskManager};
pub use camera_framing::CameraFraming;
pub use movement::{MotionState, MovementController, MovementFrame, MovementSettings};
pub use host::{DemoRunner, Host};
pub use window::{WindowError, WindowSystem};
