//! Ground probe rays and their results

use roam_math::Vec3;

use crate::collision::{CollisionLayer, ProbeRay, Ray};

/// Default height above its node that a ground ray starts from
pub const DEFAULT_PROBE_HEIGHT: f32 = 1000.0;

/// One intersection reported by a probe
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceHit {
    /// Name of the collider that was hit
    pub surface: String,
    /// Surface point in world space
    pub point: Vec3,
    /// Distance from the ray origin
    pub distance: f32,
}

impl SurfaceHit {
    pub fn new(surface: impl Into<String>, point: Vec3, distance: f32) -> Self {
        Self {
            surface: surface.into(),
            point,
            distance,
        }
    }
}

/// All hits of one probe, nearest first
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GroundProbeResult {
    hits: Vec<SurfaceHit>,
}

impl GroundProbeResult {
    /// An empty result (the probe hit nothing)
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a result from unsorted hits
    pub fn from_hits(hits: Vec<SurfaceHit>) -> Self {
        let mut result = Self { hits };
        result.sort_entries();
        result
    }

    /// Add a hit; call [`sort_entries`](Self::sort_entries) afterwards
    pub fn push(&mut self, hit: SurfaceHit) {
        self.hits.push(hit);
    }

    /// Sort by distance, nearest first. Equal distances keep insertion order.
    pub fn sort_entries(&mut self) {
        self.hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    }

    /// The closest hit, if any
    pub fn nearest(&self) -> Option<&SurfaceHit> {
        self.hits.first()
    }

    /// Height of the nearest hit if that hit is on the named surface
    pub fn nearest_height_on(&self, surface: &str) -> Option<f32> {
        self.nearest()
            .filter(|hit| hit.surface == surface)
            .map(|hit| hit.point.z)
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SurfaceHit> {
        self.hits.iter()
    }
}

/// A downward ray carried along by a node
///
/// The ray starts `origin_offset` above the node so it sees the ground even
/// when the node has sunk slightly below it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundRay {
    pub origin_offset: Vec3,
    pub direction: Vec3,
    pub from: CollisionLayer,
}

impl Default for GroundRay {
    fn default() -> Self {
        Self {
            origin_offset: Vec3::new(0.0, 0.0, DEFAULT_PROBE_HEIGHT),
            direction: Vec3::DOWN,
            from: CollisionLayer::DEFAULT,
        }
    }
}

impl GroundRay {
    /// A ground ray starting `height` above its node
    pub fn with_height(height: f32) -> Self {
        Self {
            origin_offset: Vec3::new(0.0, 0.0, height),
            ..Self::default()
        }
    }

    /// Builder: set the probe mask
    pub fn with_mask(mut self, from: CollisionLayer) -> Self {
        self.from = from;
        self
    }

    /// The world-space probe for a node at `position`
    pub fn at(&self, position: Vec3) -> ProbeRay {
        ProbeRay::new(Ray::new(position + self.origin_offset, self.direction), self.from)
    }
}
