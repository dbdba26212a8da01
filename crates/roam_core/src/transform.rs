//! Node transform (position, orientation, scale)

use roam_math::{mat3, Hpr, Mat3, Vec3};
use serde::{Serialize, Deserialize};

/// A transform with position, heading/pitch/roll and uniform scale
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to the parent node
    pub position: Vec3,
    /// Orientation relative to the parent node
    pub hpr: Hpr,
    /// Uniform scale factor
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    /// Create an identity transform
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            hpr: Hpr::ZERO,
            scale: 1.0,
        }
    }

    /// Create a transform with just a position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::identity()
        }
    }

    /// Create a transform with position and orientation
    pub fn from_position_hpr(position: Vec3, hpr: Hpr) -> Self {
        Self {
            position,
            hpr,
            scale: 1.0,
        }
    }

    /// Rotation matrix (no position or scale)
    #[inline]
    pub fn rotation_matrix(&self) -> Mat3 {
        self.hpr.to_matrix()
    }

    /// Local +Y axis
    pub fn forward(&self) -> Vec3 {
        self.hpr.forward()
    }

    /// Local +X axis
    pub fn right(&self) -> Vec3 {
        self.hpr.right()
    }

    pub fn heading(&self) -> f32 {
        self.hpr.h
    }

    pub fn set_heading(&mut self, h: f32) {
        self.hpr.h = h;
    }

    /// Translate by an offset in the parent's space
    pub fn translate(&mut self, offset: Vec3) {
        self.position += offset;
    }

    /// Translate by an offset along the node's own axes
    ///
    /// The offset is rotated but not scaled, so a distance of one is one
    /// parent unit regardless of the node's scale.
    pub fn translate_local(&mut self, offset: Vec3) {
        self.position += mat3::transform(&self.rotation_matrix(), offset);
    }

    /// Turn the node so its forward axis points at `target`
    ///
    /// Roll is reset to zero. Returns false (and leaves the orientation
    /// alone) when the target coincides with the node position.
    pub fn look_at(&mut self, target: Vec3) -> bool {
        match Hpr::looking_along(target - self.position) {
            Some(hpr) => {
                self.hpr = hpr;
                true
            }
            None => false,
        }
    }

    /// Transform a point from local space to parent space
    ///
    /// Applies scale, then rotation, then translation.
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        mat3::transform(&self.rotation_matrix(), p * self.scale) + self.position
    }

    /// Transform a direction from local space to parent space (no translation)
    pub fn transform_direction(&self, d: Vec3) -> Vec3 {
        mat3::transform(&self.rotation_matrix(), d * self.scale)
    }

    /// Compose two transforms: result = self * child
    ///
    /// The composed transform applies `child` first, then `self`.
    pub fn compose(&self, child: &Self) -> Self {
        let rotation = mat3::compose(&self.rotation_matrix(), &child.rotation_matrix());
        Self {
            position: self.transform_point(child.position),
            hpr: Hpr::from_matrix(&rotation),
            scale: self.scale * child.scale,
        }
    }
}
