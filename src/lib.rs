//! Roam - terrain-walking character controller and bump-map viewer
//!
//! Two small interactive demos driven by named events and per-frame tasks:
//! Roaming Ralph walks a character over uneven terrain with a follow
//! camera, and the bump mapping viewer flies a camera around a lit room.

pub mod config;
pub mod demos;
pub mod input;
pub mod systems;
