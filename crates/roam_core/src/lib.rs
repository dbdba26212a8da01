//! Core types for roam
//!
//! This crate provides the scene-side types both demos are built from:
//!
//! - [`Transform`] - Position, orientation, and scale of a node
//! - [`SceneGraph`] - Named node hierarchy with generational keys
//! - [`NodeKey`] - Generational key to a node in the graph
//! - [`AnimControl`] - Animation commands an actor accepts
//! - [`Actor`] - A model with named animations and tracked playback
//! - [`SceneDescription`] - Loadable/saveable terrain and obstacle layout
//! - [`OnscreenText`] - Title and instruction text descriptors

mod transform;
mod scene_graph;
mod actor;
mod scene;
mod text;

pub use transform::Transform;
pub use scene_graph::{Node, NodeKey, SceneGraph, ROOT_NODE_NAME};
pub use actor::{Actor, AnimControl, Playback};
pub use scene::{
    ObstacleShape, ObstacleTemplate, SceneDescription, SceneLoadError, SceneSaveError,
    TerrainTemplate,
};
pub use text::{OnscreenText, TextAlign};

// Re-export commonly used types from roam_math for convenience
pub use roam_math::{Hpr, Vec3};
