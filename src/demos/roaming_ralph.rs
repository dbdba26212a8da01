//! Roaming Ralph: walking on uneven terrain
//!
//! Arrow keys turn and run Ralph, `a`/`s` swing the camera around him. Each
//! frame both Ralph and the camera are clamped to the terrain; a move that
//! lands on a rock, a tree or nothing at all is undone.

use roam_core::{
    Actor, NodeKey, OnscreenText, SceneDescription, SceneGraph, Transform,
};
use roam_input::{EventMap, Key, KeyMap};
use roam_math::Vec3;
use roam_physics::CollisionWorld;

use crate::config::RalphConfig;
use crate::systems::{DoneStatus, FrameTime, MotionState, MovementController, MovementFrame, TaskManager};
use super::{attach, Demo, DemoError};

/// Node in the environment marking where Ralph starts
pub const START_POINT_NODE: &str = "start_point";

/// Event name -> logical key
const KEY_EVENTS: [(&str, Key); Key::COUNT] = [
    ("arrow_left", Key::Left),
    ("arrow_right", Key::Right),
    ("arrow_up", Key::Forward),
    ("a", Key::CamLeft),
    ("s", Key::CamRight),
];

pub struct RoamingRalph {
    graph: SceneGraph,
    ralph: NodeKey,
    camera: NodeKey,
    floater: NodeKey,
    actor: Actor,
    keys: KeyMap,
    world: CollisionWorld,
    controller: MovementController,
    title: OnscreenText,
    instructions: Vec<OnscreenText>,
    exit_requested: bool,
}

impl RoamingRalph {
    /// Load the configured scene file and build the demo
    pub fn load(config: &RalphConfig) -> Result<Self, DemoError> {
        let scene = SceneDescription::load(&config.scene_path)?;
        Self::new(config, &scene)
    }

    /// Build the demo around an already loaded scene
    pub fn new(config: &RalphConfig, scene: &SceneDescription) -> Result<Self, DemoError> {
        let world = scene.build_collision_world()?;

        let mut graph = SceneGraph::new();
        let root = graph.root();
        let environ = attach(&mut graph, &scene.name, root)?;
        let start_marker = attach(&mut graph, START_POINT_NODE, environ)?;
        graph.set_pos(start_marker, scene.start_point());

        let start = graph
            .find(START_POINT_NODE)
            .and_then(|key| graph.world_position(key))
            .ok_or_else(|| DemoError::MissingNode(START_POINT_NODE.to_string()))?;

        let ralph = attach(&mut graph, "ralph", root)?;
        graph.set_transform(
            ralph,
            Transform {
                scale: config.scale,
                ..Transform::from_position(start)
            },
        );

        let camera = attach(&mut graph, "camera", root)?;
        graph.set_pos(
            camera,
            Vec3::new(start.x, start.y + config.camera_start_distance, config.camera_start_height),
        );

        let floater = attach(&mut graph, "floater", root)?;

        let actor = Actor::new(config.model.clone())
            .with_anim("run", config.run_anim.clone())
            .with_anim("walk", config.walk_anim.clone());

        log::info!(
            "Ralph starts at ({:.1}, {:.1}, {:.1}) in '{}'",
            start.x,
            start.y,
            start.z,
            scene.name
        );

        Ok(Self {
            graph,
            ralph,
            camera,
            floater,
            actor,
            keys: KeyMap::new(),
            world,
            controller: MovementController::from_config(config),
            title: OnscreenText::title("Panda3D Tutorial: Roaming Ralph (Walking on Uneven Terrain)"),
            instructions: vec![
                OnscreenText::instruction(0.95, "[ESC]: Quit"),
                OnscreenText::instruction(0.90, "[Left Arrow]: Rotate Ralph Left"),
                OnscreenText::instruction(0.85, "[Right Arrow]: Rotate Ralph Right"),
                OnscreenText::instruction(0.80, "[Up Arrow]: Run Ralph Forward"),
                OnscreenText::instruction(0.70, "[A]: Rotate Camera Left"),
                OnscreenText::instruction(0.65, "[S]: Rotate Camera Right"),
            ],
            exit_requested: false,
        })
    }

    /// Record the state of a logical key
    pub fn set_key(&mut self, key: Key, value: bool) {
        self.keys.set_key(key, value);
    }

    pub fn keys(&self) -> &KeyMap {
        &self.keys
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn motion_state(&self) -> MotionState {
        self.controller.state()
    }

    pub fn collision_world(&self) -> &CollisionWorld {
        &self.world
    }

    /// Ralph's transform
    pub fn character(&self) -> Transform {
        self.graph.transform(self.ralph).copied().unwrap_or_default()
    }

    /// The camera's transform
    pub fn camera(&self) -> Transform {
        self.graph.transform(self.camera).copied().unwrap_or_default()
    }

    /// The point the camera looks at
    pub fn floater(&self) -> Vec3 {
        self.graph.pos(self.floater).unwrap_or_default()
    }

    /// Per-frame movement task
    pub fn move_task(&mut self, time: FrameTime) -> DoneStatus {
        let (Some(mut character), Some(mut camera)) = (
            self.graph.transform(self.ralph).copied(),
            self.graph.transform(self.camera).copied(),
        ) else {
            log::error!("moveTask: ralph or camera node is gone, stopping");
            return DoneStatus::Done;
        };

        let status = self.controller.step(
            &self.keys,
            time.dt,
            MovementFrame {
                character: &mut character,
                camera: &mut camera,
                anim: &mut self.actor,
                traverser: &mut self.world,
            },
        );

        self.graph.set_transform(self.ralph, character);
        self.graph.set_transform(self.camera, camera);
        self.graph.set_pos(self.floater, self.controller.floater());
        status
    }
}

impl Demo for RoamingRalph {
    fn title(&self) -> &OnscreenText {
        &self.title
    }

    fn instructions(&self) -> &[OnscreenText] {
        &self.instructions
    }

    fn bind_events(events: &mut EventMap<Self>) {
        events.bind("escape", |demo: &mut Self| {
            log::info!("Escape pressed, exiting");
            demo.exit_requested = true;
        });
        for (name, key) in KEY_EVENTS {
            events.bind_toggle(name, move |demo: &mut Self, down| demo.set_key(key, down));
        }
    }

    fn register_tasks(tasks: &mut TaskManager<Self>) {
        tasks.add("moveTask", |demo: &mut Self, time| demo.move_task(time));
    }

    fn status_line(&self) -> String {
        let ralph = self.character();
        let state = match self.motion_state() {
            MotionState::Moving => "running",
            MotionState::Idle => "standing",
        };
        format!(
            "Ralph ({:.1}, {:.1}, {:.1}) H:{:.0} {}",
            ralph.position.x,
            ralph.position.y,
            ralph.position.z,
            ralph.hpr.wrapped_heading(),
            state
        )
    }

    fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_core::{Playback, TerrainTemplate};

    const EPSILON: f32 = 1e-3;

    fn demo() -> RoamingRalph {
        let scene = SceneDescription::new("world", TerrainTemplate::flat(200.0))
            .with_start_point(10.0, 20.0, 0.0);
        RoamingRalph::new(&RalphConfig::default(), &scene).unwrap()
    }

    #[test]
    fn test_setup_places_nodes() {
        let demo = demo();
        let ralph = demo.character();
        assert_eq!(ralph.position, Vec3::new(10.0, 20.0, 0.0));
        assert_eq!(ralph.scale, 0.2);
        assert_eq!(demo.camera().position, Vec3::new(10.0, 30.0, 2.0));
        assert!(demo.graph().find(START_POINT_NODE).is_some());
        assert_eq!(demo.instructions().len(), 6);
        assert_eq!(demo.actor().playback(), &Playback::Stopped);
    }

    #[test]
    fn test_bindings_cover_every_key() {
        let mut events = EventMap::new();
        RoamingRalph::bind_events(&mut events);
        assert_eq!(events.len(), 1 + 2 * Key::COUNT);

        let mut demo = demo();
        for (name, key) in KEY_EVENTS {
            events.dispatch(name, &mut demo);
            assert!(demo.keys().get(key), "{} should press {:?}", name, key);
            events.dispatch(&format!("{}-up", name), &mut demo);
            assert!(!demo.keys().get(key));
        }
        assert!(!demo.exit_requested());
        events.dispatch("escape", &mut demo);
        assert!(demo.exit_requested());
    }

    #[test]
    fn test_move_task_runs_forward() {
        let mut demo = demo();
        demo.set_key(Key::Forward, true);
        let status = demo.move_task(FrameTime::new(0.2, 0.2));
        assert_eq!(status, DoneStatus::Continue);

        let ralph = demo.character();
        assert!((ralph.position - Vec3::new(10.0, 15.0, 0.0)).length() < EPSILON);
        assert!(demo.actor().is_looping("run"));
        assert!(demo.status_line().contains("running"));
        assert_eq!(demo.floater(), ralph.position + Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_unknown_scene_file() {
        let config = RalphConfig {
            scene_path: "scenes/missing.ron".to_string(),
            ..RalphConfig::default()
        };
        assert!(matches!(RoamingRalph::load(&config), Err(DemoError::Scene(_))));
    }
}
