//! Animated actors
//!
//! Animation playback itself belongs to the engine; this module only tracks
//! which commands were issued and what the actor should currently be doing.

use std::collections::BTreeMap;

/// Animation commands an actor accepts
pub trait AnimControl {
    /// Play `name` on a loop. With `restart` the loop starts from frame 0.
    fn loop_anim(&mut self, name: &str, restart: bool);
    /// Stop `name` if it is playing
    fn stop(&mut self, name: &str);
    /// Hold a single frame of `name`
    fn pose(&mut self, name: &str, frame: u32);
}

/// What the actor is currently showing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Playback {
    Stopped,
    Looping(String),
    Posed { name: String, frame: u32 },
}

/// A model with a set of named animations
#[derive(Clone, Debug)]
pub struct Actor {
    model: String,
    /// Animation name -> animation asset path
    anims: BTreeMap<String, String>,
    playback: Playback,
}

impl Actor {
    /// Create an actor for a model with no animations yet
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            anims: BTreeMap::new(),
            playback: Playback::Stopped,
        }
    }

    /// Builder: register an animation
    pub fn with_anim(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.anims.insert(name.into(), path.into());
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_anim(&self, name: &str) -> bool {
        self.anims.contains_key(name)
    }

    pub fn anim_names(&self) -> impl Iterator<Item = &str> {
        self.anims.keys().map(String::as_str)
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    /// Whether `name` is the animation currently looping
    pub fn is_looping(&self, name: &str) -> bool {
        matches!(&self.playback, Playback::Looping(current) if current == name)
    }

    fn known(&self, name: &str, command: &str) -> bool {
        if self.has_anim(name) {
            true
        } else {
            log::warn!("{}: actor '{}' has no animation '{}'", command, self.model, name);
            false
        }
    }
}

impl AnimControl for Actor {
    fn loop_anim(&mut self, name: &str, restart: bool) {
        if !self.known(name, "loop") {
            return;
        }
        if !restart && self.is_looping(name) {
            return;
        }
        log::debug!("{}: loop '{}'", self.model, name);
        self.playback = Playback::Looping(name.to_string());
    }

    fn stop(&mut self, name: &str) {
        if !self.known(name, "stop") {
            return;
        }
        if self.is_looping(name) {
            log::debug!("{}: stop '{}'", self.model, name);
            self.playback = Playback::Stopped;
        }
    }

    fn pose(&mut self, name: &str, frame: u32) {
        if !self.known(name, "pose") {
            return;
        }
        log::debug!("{}: pose '{}' frame {}", self.model, name, frame);
        self.playback = Playback::Posed {
            name: name.to_string(),
            frame,
        };
    }
}
