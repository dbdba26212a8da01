//! On-screen text descriptors
//!
//! The host decides how (or whether) to draw these. Positions are in the
//! aspect-corrected 2D space where x runs roughly -1.33..1.33 and y -1..1.

/// Horizontal alignment of a text line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Right,
}

/// One line of on-screen text
#[derive(Clone, Debug, PartialEq)]
pub struct OnscreenText {
    pub text: String,
    /// Foreground colour [r, g, b, a]
    pub fg: [f32; 4],
    pub pos: [f32; 2],
    pub align: TextAlign,
    pub scale: f32,
}

impl OnscreenText {
    const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

    /// Demo title, bottom right
    pub fn title(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: Self::WHITE,
            pos: [1.3, -0.95],
            align: TextAlign::Right,
            scale: 0.07,
        }
    }

    /// Instruction line at height `y`, top left
    pub fn instruction(y: f32, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fg: Self::WHITE,
            pos: [-1.3, y],
            align: TextAlign::Left,
            scale: 0.05,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}
