//! Third-person camera framing
//!
//! Keeps the camera aimed at the character, inside a planar distance band,
//! and looking at a point hovering over the character's head.

use roam_core::Transform;
use roam_input::{Key, KeyMap};
use roam_math::Vec3;

/// Orbit, distance band and floater look-at for the follow camera
#[derive(Clone, Debug)]
pub struct CameraFraming {
    /// Sideways camera speed in units per second
    pub orbit_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    /// Height of the look-at point above the character
    pub floater_height: f32,
    floater: Vec3,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self::new(20.0, 5.0, 10.0, 2.0)
    }
}

impl CameraFraming {
    pub fn new(orbit_speed: f32, min_distance: f32, max_distance: f32, floater_height: f32) -> Self {
        Self {
            orbit_speed,
            min_distance,
            max_distance,
            floater_height,
            floater: Vec3::ZERO,
        }
    }

    /// Last look-at point
    pub fn floater(&self) -> Vec3 {
        self.floater
    }

    /// Aim the camera at `target`, then slide it along its own right axis
    /// while a camera key is held.
    pub fn aim_and_orbit(&self, camera: &mut Transform, target: Vec3, keys: &KeyMap, dt: f32) {
        camera.look_at(target);
        let step = self.orbit_speed * dt;
        if keys.get(Key::CamLeft) {
            camera.translate_local(Vec3::new(-step, 0.0, 0.0));
        }
        if keys.get(Key::CamRight) {
            camera.translate_local(Vec3::new(step, 0.0, 0.0));
        }
    }

    /// Pull the camera in or push it out so its planar distance to the
    /// character lies in `[min_distance, max_distance]`. Height is untouched.
    ///
    /// A camera standing exactly over the character is placed behind it,
    /// along the character's local +Y.
    pub fn keep_distance(&self, camera: &mut Transform, character: &Transform) {
        let to_character = (character.position - camera.position).planar();
        let distance = to_character.length();
        let direction = if distance > f32::EPSILON {
            to_character / distance
        } else {
            -character.forward().planar().normalized()
        };

        if distance > self.max_distance {
            camera.position += direction * (distance - self.max_distance);
        } else if distance < self.min_distance {
            camera.position -= direction * (self.min_distance - distance);
        }
    }

    /// Move the floater over the character and point the camera at it
    pub fn look_at_floater(&mut self, camera: &mut Transform, character_position: Vec3) -> Vec3 {
        self.floater = character_position + Vec3::new(0.0, 0.0, self.floater_height);
        camera.look_at(self.floater);
        self.floater
    }
}
