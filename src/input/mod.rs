//! Input handling module
//!
//! Translates raw window events into named engine events.

mod input_mapper;

pub use input_mapper::InputMapper;
