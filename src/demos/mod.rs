//! Interactive demos
//!
//! A demo owns its scene state; the host owns its event table and tasks and
//! hands the demo to them by `&mut` each time an event or frame arrives.

mod roaming_ralph;
mod bump_mapping;

pub use roaming_ralph::RoamingRalph;
pub use bump_mapping::BumpMapDemo;

use roam_core::{NodeKey, OnscreenText, SceneGraph, SceneLoadError};
use roam_input::EventMap;
use roam_physics::ShapeError;

use crate::config::{AppConfig, DemoKind};
use crate::systems::{DemoRunner, Host, TaskManager};

/// A demo driven by named events and per-frame tasks
pub trait Demo: Sized + 'static {
    fn title(&self) -> &OnscreenText;

    fn instructions(&self) -> &[OnscreenText];

    /// Register every event this demo reacts to
    fn bind_events(events: &mut EventMap<Self>);

    /// Register the demo's per-frame tasks
    fn register_tasks(tasks: &mut TaskManager<Self>);

    /// One-line summary of the demo state for the window title
    fn status_line(&self) -> String;

    /// Raw pointer motion since the last call
    fn pointer_moved(&mut self, _dx: f32, _dy: f32) {}

    /// Whether the demo asked to quit
    fn exit_requested(&self) -> bool;
}

/// Build and host the configured demo
pub fn build(config: &AppConfig) -> Result<Box<dyn DemoRunner>, DemoError> {
    log::info!("Building {:?} demo", config.demo.kind);
    match config.demo.kind {
        DemoKind::Ralph => Ok(Box::new(Host::new(RoamingRalph::load(&config.ralph)?))),
        DemoKind::Bump => Ok(Box::new(Host::new(BumpMapDemo::new(&config.bump)?))),
    }
}

/// Attach a named node, failing if the parent is gone
fn attach(graph: &mut SceneGraph, name: &str, parent: NodeKey) -> Result<NodeKey, DemoError> {
    graph
        .attach_new_node(name, parent)
        .ok_or_else(|| DemoError::MissingNode(name.to_string()))
}

/// Error setting up a demo
#[derive(Debug)]
pub enum DemoError {
    /// The scene file could not be loaded
    Scene(SceneLoadError),
    /// The scene geometry is invalid
    Shape(ShapeError),
    /// A node the demo expects in its scene is missing
    MissingNode(String),
}

impl From<SceneLoadError> for DemoError {
    fn from(e: SceneLoadError) -> Self {
        DemoError::Scene(e)
    }
}

impl From<ShapeError> for DemoError {
    fn from(e: ShapeError) -> Self {
        DemoError::Shape(e)
    }
}

impl std::fmt::Display for DemoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DemoError::Scene(e) => write!(f, "Failed to load scene: {}", e),
            DemoError::Shape(e) => write!(f, "Invalid scene geometry: {}", e),
            DemoError::MissingNode(name) => write!(f, "Scene has no node named '{}'", name),
        }
    }
}

impl std::error::Error for DemoError {}
