//! Input mapping from raw events to event names
//!
//! Keys map to their lowercase engine names (`a`, `arrow_left`, `enter`),
//! mouse buttons to `mouse1`..`mouse3`. Releases append `-up`.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

use roam_input::up_event;

/// Maps raw window input to named events
pub struct InputMapper;

impl InputMapper {
    /// Event name for a keyboard event
    ///
    /// Returns `None` for unnamed keys and for auto-repeat presses.
    pub fn map_keyboard(key: KeyCode, state: ElementState, repeat: bool) -> Option<String> {
        if repeat {
            return None;
        }
        let name = Self::key_name(key)?;
        Some(Self::with_state(name, state))
    }

    /// Event name for a mouse button event
    pub fn map_mouse_button(button: MouseButton, state: ElementState) -> Option<String> {
        let name = match button {
            MouseButton::Left => "mouse1",
            MouseButton::Middle => "mouse2",
            MouseButton::Right => "mouse3",
            _ => return None,
        };
        Some(Self::with_state(name, state))
    }

    fn with_state(name: &str, state: ElementState) -> String {
        match state {
            ElementState::Pressed => name.to_string(),
            ElementState::Released => up_event(name),
        }
    }

    /// Engine name of a physical key
    pub fn key_name(key: KeyCode) -> Option<&'static str> {
        let name = match key {
            KeyCode::Escape => "escape",
            KeyCode::Enter | KeyCode::NumpadEnter => "enter",
            KeyCode::Space => "space",
            KeyCode::Tab => "tab",
            KeyCode::Backspace => "backspace",
            KeyCode::ArrowLeft => "arrow_left",
            KeyCode::ArrowRight => "arrow_right",
            KeyCode::ArrowUp => "arrow_up",
            KeyCode::ArrowDown => "arrow_down",
            KeyCode::ShiftLeft => "lshift",
            KeyCode::ShiftRight => "rshift",
            KeyCode::ControlLeft => "lcontrol",
            KeyCode::ControlRight => "rcontrol",
            KeyCode::KeyA => "a",
            KeyCode::KeyB => "b",
            KeyCode::KeyC => "c",
            KeyCode::KeyD => "d",
            KeyCode::KeyE => "e",
            KeyCode::KeyF => "f",
            KeyCode::KeyG => "g",
            KeyCode::KeyH => "h",
            KeyCode::KeyI => "i",
            KeyCode::KeyJ => "j",
            KeyCode::KeyK => "k",
            KeyCode::KeyL => "l",
            KeyCode::KeyM => "m",
            KeyCode::KeyN => "n",
            KeyCode::KeyO => "o",
            KeyCode::KeyP => "p",
            KeyCode::KeyQ => "q",
            KeyCode::KeyR => "r",
            KeyCode::KeyS => "s",
            KeyCode::KeyT => "t",
            KeyCode::KeyU => "u",
            KeyCode::KeyV => "v",
            KeyCode::KeyW => "w",
            KeyCode::KeyX => "x",
            KeyCode::KeyY => "y",
            KeyCode::KeyZ => "z",
            KeyCode::Digit0 => "0",
            KeyCode::Digit1 => "1",
            KeyCode::Digit2 => "2",
            KeyCode::Digit3 => "3",
            KeyCode::Digit4 => "4",
            KeyCode::Digit5 => "5",
            KeyCode::Digit6 => "6",
            KeyCode::Digit7 => "7",
            KeyCode::Digit8 => "8",
            KeyCode::Digit9 => "9",
            _ => return None,
        };
        Some(name)
    }
}
