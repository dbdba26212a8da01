//! Heading/pitch/roll orientation
//!
//! Angles are in degrees. Heading rotates about the vertical (+Z) axis,
//! pitch about the local right (+X) axis and roll about the local forward
//! (+Y) axis.

use serde::{Serialize, Deserialize};

use crate::mat3::{self, Mat3};
use crate::Vec3;

/// Orientation as heading, pitch and roll in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hpr {
    /// Rotation about the vertical axis
    pub h: f32,
    /// Rotation about the local right axis
    pub p: f32,
    /// Rotation about the local forward axis
    pub r: f32,
}

impl Hpr {
    pub const ZERO: Self = Self { h: 0.0, p: 0.0, r: 0.0 };

    #[inline]
    pub const fn new(h: f32, p: f32, r: f32) -> Self {
        Self { h, p, r }
    }

    /// Orientation with only a heading
    #[inline]
    pub const fn from_heading(h: f32) -> Self {
        Self::new(h, 0.0, 0.0)
    }

    /// Orientation whose forward axis points along `direction`, roll zero.
    ///
    /// Returns `None` for a zero-length direction.
    pub fn looking_along(direction: Vec3) -> Option<Self> {
        if direction.length_squared() <= f32::EPSILON {
            return None;
        }
        let h = (-direction.x).atan2(direction.y).to_degrees();
        let p = direction.z.atan2(direction.planar().length()).to_degrees();
        Some(Self::new(h, p, 0.0))
    }

    /// Recover heading/pitch/roll from a rotation matrix
    ///
    /// When the forward axis points straight up or down, roll is folded
    /// into heading.
    pub fn from_matrix(m: &Mat3) -> Self {
        let forward = mat3::row(m, 1);
        let right = mat3::row(m, 0);
        let up = mat3::row(m, 2);
        let p = forward.z.clamp(-1.0, 1.0).asin().to_degrees();
        if forward.planar().length() > 1e-6 {
            let h = (-forward.x).atan2(forward.y).to_degrees();
            let r = (-right.z).atan2(up.z).to_degrees();
            Self::new(h, p, r)
        } else {
            Self::new(right.y.atan2(right.x).to_degrees(), p, 0.0)
        }
    }

    /// Rotation matrix for this orientation
    #[inline]
    pub fn to_matrix(self) -> Mat3 {
        mat3::from_hpr(self)
    }

    /// Local +Y axis in parent space
    pub fn forward(self) -> Vec3 {
        mat3::row(&self.to_matrix(), 1)
    }

    /// Local +X axis in parent space
    pub fn right(self) -> Vec3 {
        mat3::row(&self.to_matrix(), 0)
    }

    /// Local +Z axis in parent space
    pub fn up(self) -> Vec3 {
        mat3::row(&self.to_matrix(), 2)
    }

    /// Heading wrapped into `(-180, 180]`
    pub fn wrapped_heading(self) -> f32 {
        let h = self.h.rem_euclid(360.0);
        if h > 180.0 { h - 360.0 } else { h }
    }
}
