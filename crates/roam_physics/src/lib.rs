//! Ground probing for roam
//!
//! This crate provides the collision side of the terrain walker:
//! - Collision layers and ray probes
//! - Static collision shapes (heightfield terrain, boxes, cylinders)
//! - A collision world that casts probes and returns sorted, named hits
//! - The ground clamper that commits or reverts a character move

pub mod collision;
pub mod ground;
pub mod probe;
pub mod shapes;
pub mod world;

// Re-export commonly used types
pub use collision::{CollisionFilter, CollisionLayer, ProbeRay, Ray};
pub use ground::{GroundClamper, GroundDecision, MoveCandidate, TERRAIN_SURFACE};
pub use probe::{GroundProbeResult, GroundRay, SurfaceHit, DEFAULT_PROBE_HEIGHT};
pub use shapes::{Box3, Collider, Cylinder, Heightfield, RayHit, ShapeError};
pub use world::{ColliderKey, CollisionTraverser, CollisionWorld, StaticCollider};
