//! Mouse button state and pointer motion

/// Number of tracked mouse buttons (left, middle, right)
pub const BUTTON_COUNT: usize = 3;

/// Pressed state of the three mouse buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MouseButtons {
    pressed: [bool; BUTTON_COUNT],
}

impl MouseButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the state of button `index`
    ///
    /// An index outside `0..3` is logged and ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        match self.pressed.get_mut(index) {
            Some(slot) => *slot = value,
            None => log::error!(
                "MouseButtons::set: button index {} out of range (0..{})",
                index,
                BUTTON_COUNT
            ),
        }
    }

    /// Whether button `index` is held (false when out of range)
    pub fn get(&self, index: usize) -> bool {
        self.pressed.get(index).copied().unwrap_or(false)
    }

    pub fn any(&self) -> bool {
        self.pressed.iter().any(|&p| p)
    }
}

/// Accumulated raw pointer motion since the last frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerDelta {
    dx: f32,
    dy: f32,
}

impl PointerDelta {
    pub fn accumulate(&mut self, dx: f32, dy: f32) {
        self.dx += dx;
        self.dy += dy;
    }

    /// Take the accumulated motion, resetting it to zero
    pub fn take(&mut self) -> (f32, f32) {
        let delta = (self.dx, self.dy);
        *self = Self::default();
        delta
    }

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }
}
