//! Logical key state
//!
//! Tracks whether each movement key is held. Event handlers write, the
//! per-frame movement step reads.

/// Logical keys driving the character and camera
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Forward,
    CamLeft,
    CamRight,
}

impl Key {
    /// Number of logical keys
    pub const COUNT: usize = 5;

    /// All keys in index order
    pub const ALL: [Key; Key::COUNT] = [
        Key::Left,
        Key::Right,
        Key::Forward,
        Key::CamLeft,
        Key::CamRight,
    ];

    /// Key for a raw index, if in range
    pub fn from_index(index: usize) -> Option<Key> {
        Self::ALL.get(index).copied()
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Keys that move the character (not the camera)
    pub fn is_movement(self) -> bool {
        matches!(self, Key::Left | Key::Right | Key::Forward)
    }
}

/// Pressed state of every logical key, all released initially
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyMap {
    pressed: [bool; Key::COUNT],
}

impl KeyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the state for a raw key index
    ///
    /// An index outside the key range is logged and ignored.
    pub fn set(&mut self, index: usize, value: bool) {
        match Key::from_index(index) {
            Some(key) => self.set_key(key, value),
            None => log::error!(
                "KeyMap::set: key index {} out of range (0..{})",
                index,
                Key::COUNT
            ),
        }
    }

    pub fn set_key(&mut self, key: Key, value: bool) {
        self.pressed[key.index()] = value;
    }

    pub fn get(&self, key: Key) -> bool {
        self.pressed[key.index()]
    }

    /// Whether any character movement key is held
    pub fn is_moving(&self) -> bool {
        Key::ALL
            .iter()
            .any(|&key| key.is_movement() && self.get(key))
    }

    /// Release every key
    pub fn clear(&mut self) {
        self.pressed = [false; Key::COUNT];
    }
}
