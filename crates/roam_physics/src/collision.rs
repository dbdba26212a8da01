//! Collision filtering and rays
//!
//! Probes carry a "from" mask, colliders an "into" mask. A probe only tests
//! colliders whose into mask shares at least one bit with its from mask.

use bitflags::bitflags;

use roam_math::Vec3;

bitflags! {
    /// Collision layers for filtering which surfaces a probe can see
    ///
    /// Each layer is a bit in a 32-bit mask.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CollisionLayer: u32 {
        /// Default layer: visible to ground probes
        const DEFAULT = 1 << 0;
        /// Surfaces only the camera probe should see
        const CAMERA = 1 << 1;
        /// Trigger volumes (never hit by ground probes)
        const TRIGGER = 1 << 2;
        /// All layers
        const ALL = 0xFFFFFFFF;
    }
}

/// Collision filter for one probe or collider
///
/// - `from`: which layers this object tests against when it is the probe
/// - `into`: which layers this object belongs to when it is being hit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollisionFilter {
    pub from: CollisionLayer,
    pub into: CollisionLayer,
}

impl Default for CollisionFilter {
    fn default() -> Self {
        Self::static_world()
    }
}

impl CollisionFilter {
    /// Create a new collision filter with the given masks
    pub fn new(from: CollisionLayer, into: CollisionLayer) -> Self {
        Self { from, into }
    }

    /// A downward ground probe: tests the default layer, is never hit itself
    pub fn ground_probe() -> Self {
        Self {
            from: CollisionLayer::DEFAULT,
            into: CollisionLayer::empty(),
        }
    }

    /// Static world geometry: hit by default probes, never probes anything
    pub fn static_world() -> Self {
        Self {
            from: CollisionLayer::empty(),
            into: CollisionLayer::DEFAULT,
        }
    }

    /// Check whether a probe with this filter can hit `other`
    pub fn detects(&self, other: &Self) -> bool {
        self.from.intersects(other.into)
    }
}

/// A ray with a unit-length direction
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalized(),
        }
    }

    /// A ray pointing straight down from `origin`
    pub fn downward(origin: Vec3) -> Self {
        Self {
            origin,
            direction: Vec3::DOWN,
        }
    }

    /// Point at parameter `t` along the ray
    #[inline]
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether the ray points straight down (within a small tolerance)
    pub fn is_vertical_down(&self) -> bool {
        self.direction.x.abs() < 1e-6 && self.direction.y.abs() < 1e-6 && self.direction.z < 0.0
    }
}

/// A ray together with the mask it probes with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProbeRay {
    pub ray: Ray,
    pub from: CollisionLayer,
}

impl ProbeRay {
    pub fn new(ray: Ray, from: CollisionLayer) -> Self {
        Self { ray, from }
    }

    /// Filter equivalent of this probe
    pub fn filter(&self) -> CollisionFilter {
        CollisionFilter::new(self.from, CollisionLayer::empty())
    }
}
