//! 3D Mathematics Library
//!
//! Vector and orientation types shared by the roam crates.
//!
//! Coordinate convention: Z is up, local +Y is forward, local +X is right.
//!
//! ## Core Types
//!
//! - [`Vec3`] - 3D vector with x, y, z components
//! - [`Hpr`] - Heading/pitch/roll orientation in degrees
//! - [`Mat3`] - 3x3 rotation matrix whose rows are the local axes

mod vec3;
mod hpr;
pub mod mat3;

pub use vec3::Vec3;
pub use hpr::Hpr;
pub use mat3::Mat3;
