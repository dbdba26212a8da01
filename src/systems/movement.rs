//! Character movement
//!
//! One call to [`MovementController::step`] per frame turns and runs the
//! character from the key state, keeps the camera framed, probes the
//! ground under both and commits or rolls back the character's move.

use roam_core::{AnimControl, Transform};
use roam_input::{Key, KeyMap};
use roam_math::Vec3;
use roam_physics::{
    CollisionTraverser, GroundClamper, GroundProbeResult, GroundRay, MoveCandidate,
};

use crate::config::RalphConfig;
use super::camera_framing::CameraFraming;
use super::task::DoneStatus;

/// Whether the character is currently running
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MotionState {
    #[default]
    Idle,
    Moving,
}

/// Speeds and animation names used by the movement step
#[derive(Clone, Debug, PartialEq)]
pub struct MovementSettings {
    /// Degrees per second
    pub turn_rate: f32,
    /// Units per second along the character's local -Y
    pub run_speed: f32,
    pub run_anim: String,
    pub walk_anim: String,
    /// Walk frame held when standing still
    pub walk_pose_frame: u32,
}

impl Default for MovementSettings {
    fn default() -> Self {
        Self {
            turn_rate: 300.0,
            run_speed: 25.0,
            run_anim: "run".to_string(),
            walk_anim: "walk".to_string(),
            walk_pose_frame: 5,
        }
    }
}

/// Everything one movement step reads and writes
pub struct MovementFrame<'a> {
    pub character: &'a mut Transform,
    pub camera: &'a mut Transform,
    pub anim: &'a mut dyn AnimControl,
    pub traverser: &'a mut dyn CollisionTraverser,
}

/// Per-frame character controller
#[derive(Clone, Debug)]
pub struct MovementController {
    settings: MovementSettings,
    state: MotionState,
    framing: CameraFraming,
    clamper: GroundClamper,
    character_ray: GroundRay,
    camera_ray: GroundRay,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(MovementSettings::default(), CameraFraming::default(), GroundClamper::new())
    }
}

impl MovementController {
    pub fn new(settings: MovementSettings, framing: CameraFraming, clamper: GroundClamper) -> Self {
        Self {
            settings,
            state: MotionState::Idle,
            framing,
            clamper,
            character_ray: GroundRay::default(),
            camera_ray: GroundRay::default(),
        }
    }

    /// Build a controller from the Ralph section of the config
    pub fn from_config(config: &RalphConfig) -> Self {
        let settings = MovementSettings {
            turn_rate: config.turn_rate,
            run_speed: config.run_speed,
            walk_pose_frame: config.walk_pose_frame,
            ..MovementSettings::default()
        };
        let framing = CameraFraming::new(
            config.orbit_speed,
            config.min_distance,
            config.max_distance,
            config.floater_height,
        );
        let clamper = GroundClamper::new()
            .with_terrain_surface(config.terrain_name.clone())
            .with_camera_clearance(config.camera_clearance)
            .with_camera_min_height(config.camera_min_height);
        Self::new(settings, framing, clamper).with_probe_height(config.probe_height)
    }

    /// Builder: start both ground probes `height` above their nodes
    pub fn with_probe_height(mut self, height: f32) -> Self {
        self.character_ray = GroundRay::with_height(height);
        self.camera_ray = GroundRay::with_height(height);
        self
    }

    pub fn state(&self) -> MotionState {
        self.state
    }

    pub fn settings(&self) -> &MovementSettings {
        &self.settings
    }

    /// Point the camera was last aimed at
    pub fn floater(&self) -> Vec3 {
        self.framing.floater()
    }

    /// Run one frame of movement
    pub fn step(&mut self, keys: &KeyMap, dt: f32, frame: MovementFrame<'_>) -> DoneStatus {
        let MovementFrame { character, camera, anim, traverser } = frame;

        self.framing.aim_and_orbit(camera, character.position, keys, dt);

        let mut candidate = MoveCandidate::new(character.position);

        // Heading is not part of the rollback candidate
        if keys.get(Key::Left) {
            character.hpr.h += self.settings.turn_rate * dt;
        }
        if keys.get(Key::Right) {
            character.hpr.h -= self.settings.turn_rate * dt;
        }
        if keys.get(Key::Forward) {
            character.translate_local(Vec3::new(0.0, -self.settings.run_speed * dt, 0.0));
        }

        self.update_animation(keys, anim);

        self.framing.keep_distance(camera, character);

        candidate.propose(character.position);
        let probes = [
            self.character_ray.at(character.position),
            self.camera_ray.at(camera.position),
        ];
        let mut results = traverser.traverse(&probes).into_iter();
        let character_probe = results.next().unwrap_or_else(GroundProbeResult::new);
        let camera_probe = results.next().unwrap_or_else(GroundProbeResult::new);

        character.position = self.clamper.clamp_character(&character_probe, candidate);
        camera.position.z =
            self.clamper
                .camera_height(&camera_probe, camera.position.z, character.position.z);

        // A rolled-back character can leave the camera outside the band
        self.framing.keep_distance(camera, character);

        self.framing.look_at_floater(camera, character.position);
        DoneStatus::Continue
    }

    fn update_animation(&mut self, keys: &KeyMap, anim: &mut dyn AnimControl) {
        match (keys.is_moving(), self.state) {
            (true, MotionState::Idle) => {
                anim.loop_anim(&self.settings.run_anim, true);
                self.state = MotionState::Moving;
            }
            (false, MotionState::Moving) => {
                anim.stop(&self.settings.run_anim);
                anim.pose(&self.settings.walk_anim, self.settings.walk_pose_frame);
                self.state = MotionState::Idle;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roam_core::{Actor, Playback};
    use roam_math::Hpr;
    use roam_physics::{
        Box3, Collider, CollisionWorld, Heightfield, StaticCollider, TERRAIN_SURFACE,
    };

    const EPSILON: f32 = 1e-3;

    #[derive(Debug, Clone, PartialEq)]
    enum Command {
        Loop(String, bool),
        Stop(String),
        Pose(String, u32),
    }

    #[derive(Default)]
    struct RecordingAnim {
        commands: Vec<Command>,
    }

    impl AnimControl for RecordingAnim {
        fn loop_anim(&mut self, name: &str, restart: bool) {
            self.commands.push(Command::Loop(name.to_string(), restart));
        }
        fn stop(&mut self, name: &str) {
            self.commands.push(Command::Stop(name.to_string()));
        }
        fn pose(&mut self, name: &str, frame: u32) {
            self.commands.push(Command::Pose(name.to_string(), frame));
        }
    }

    fn flat_world(height: f32) -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add(StaticCollider::new(
            TERRAIN_SURFACE,
            Collider::Heightfield(Heightfield::flat(Vec3::new(0.0, 0.0, height), 500.0)),
        ));
        world
    }

    fn ralph() -> Actor {
        Actor::new("models/ralph")
            .with_anim("run", "models/ralph-run")
            .with_anim("walk", "models/ralph-walk")
    }

    struct Rig {
        controller: MovementController,
        character: Transform,
        camera: Transform,
        world: CollisionWorld,
    }

    impl Rig {
        fn new(world: CollisionWorld) -> Self {
            Self {
                controller: MovementController::default(),
                character: Transform::identity(),
                camera: Transform::from_position(Vec3::new(0.0, 10.0, 2.0)),
                world,
            }
        }

        fn step(&mut self, keys: &KeyMap, dt: f32, anim: &mut dyn AnimControl) -> DoneStatus {
            self.controller.step(
                keys,
                dt,
                MovementFrame {
                    character: &mut self.character,
                    camera: &mut self.camera,
                    anim,
                    traverser: &mut self.world,
                },
            )
        }
    }

    fn keys_with(pressed: &[Key]) -> KeyMap {
        let mut keys = KeyMap::new();
        for &key in pressed {
            keys.set_key(key, true);
        }
        keys
    }

    #[test]
    fn test_run_forward_one_second() {
        let mut rig = Rig::new(flat_world(0.0));
        let mut actor = ralph();
        let status = rig.step(&keys_with(&[Key::Forward]), 1.0, &mut actor);

        assert_eq!(status, DoneStatus::Continue);
        assert!((rig.character.position - Vec3::new(0.0, -25.0, 0.0)).length() < EPSILON);
        assert_eq!(rig.character.heading(), 0.0);
        assert_eq!(actor.playback(), &Playback::Looping("run".to_string()));
        assert_eq!(rig.controller.state(), MotionState::Moving);
    }

    #[test]
    fn test_run_ignores_character_scale() {
        let mut rig = Rig::new(flat_world(0.0));
        rig.character.scale = 0.2;
        rig.step(&keys_with(&[Key::Forward]), 1.0, &mut RecordingAnim::default());
        assert!((rig.character.position.y + 25.0).abs() < EPSILON);
    }

    #[test]
    fn test_start_and_stop_issue_one_command_each() {
        let mut rig = Rig::new(flat_world(0.0));
        let mut anim = RecordingAnim::default();

        let moving = keys_with(&[Key::Left]);
        rig.step(&moving, 0.1, &mut anim);
        rig.step(&moving, 0.1, &mut anim);
        assert_eq!(anim.commands, vec![Command::Loop("run".to_string(), true)]);

        anim.commands.clear();
        let idle = KeyMap::new();
        rig.step(&idle, 0.1, &mut anim);
        rig.step(&idle, 0.1, &mut anim);
        assert_eq!(
            anim.commands,
            vec![Command::Stop("run".to_string()), Command::Pose("walk".to_string(), 5)]
        );
        assert_eq!(rig.controller.state(), MotionState::Idle);
    }

    #[test]
    fn test_camera_keys_do_not_start_running() {
        let mut rig = Rig::new(flat_world(0.0));
        let mut anim = RecordingAnim::default();
        rig.step(&keys_with(&[Key::CamLeft]), 0.1, &mut anim);
        assert!(anim.commands.is_empty());
        assert_eq!(rig.controller.state(), MotionState::Idle);
    }

    #[test]
    fn test_turning() {
        let mut rig = Rig::new(flat_world(0.0));
        let mut anim = RecordingAnim::default();
        rig.step(&keys_with(&[Key::Left]), 0.5, &mut anim);
        assert!((rig.character.heading() - 150.0).abs() < EPSILON);
        rig.step(&keys_with(&[Key::Right]), 0.25, &mut anim);
        assert!((rig.character.heading() - 75.0).abs() < EPSILON);
    }

    #[test]
    fn test_character_follows_terrain_height() {
        let mut rig = Rig::new(flat_world(3.5));
        rig.step(&keys_with(&[Key::Forward]), 0.1, &mut RecordingAnim::default());
        assert!((rig.character.position.z - 3.5).abs() < EPSILON);
    }

    #[test]
    fn test_blocked_move_reverts_position_not_heading() {
        let mut world = flat_world(0.0);
        world.add(StaticCollider::new(
            "rock",
            Collider::Box(Box3::new(Vec3::new(-5.0, -30.0, 0.0), Vec3::new(5.0, -1.0, 2.0))),
        ));
        let mut rig = Rig::new(world);
        rig.character = Transform::from_position_hpr(Vec3::new(0.0, 0.0, 0.0), Hpr::ZERO);

        rig.step(&keys_with(&[Key::Forward, Key::Left]), 0.1, &mut RecordingAnim::default());
        assert_eq!(rig.character.position, Vec3::ZERO);
        assert!((rig.character.heading() - 30.0).abs() < EPSILON);
    }

    #[test]
    fn test_no_ground_reverts() {
        let mut rig = Rig::new(CollisionWorld::new());
        rig.character.position = Vec3::new(1.0, 2.0, 3.0);
        rig.step(&keys_with(&[Key::Forward]), 0.5, &mut RecordingAnim::default());
        assert_eq!(rig.character.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_one_traversal_per_frame() {
        let mut rig = Rig::new(flat_world(0.0));
        let mut anim = RecordingAnim::default();
        for _ in 0..4 {
            rig.step(&keys_with(&[Key::Forward]), 0.05, &mut anim);
        }
        assert_eq!(rig.world.traversal_count(), 4);
    }

    #[test]
    fn test_camera_stays_framed() {
        let mut world = flat_world(0.0);
        world.add(StaticCollider::new(
            "rock",
            Collider::Box(Box3::new(Vec3::new(-40.0, 10.0, 0.0), Vec3::new(40.0, 12.0, 3.0))),
        ));
        let mut rig = Rig::new(world);
        let mut anim = RecordingAnim::default();
        let patterns: [&[Key]; 6] = [
            &[Key::Forward],
            &[Key::Forward, Key::Left],
            &[Key::CamLeft],
            &[Key::Forward, Key::Right, Key::CamRight],
            &[],
            &[Key::Left, Key::CamLeft],
        ];

        for frame in 0..120 {
            let keys = keys_with(patterns[(frame / 7) % patterns.len()]);
            rig.step(&keys, 1.0 / 30.0, &mut anim);

            let distance = rig.camera.position.planar_distance(rig.character.position);
            assert!(
                (5.0 - EPSILON..=10.0 + EPSILON).contains(&distance),
                "frame {}: camera distance {}",
                frame,
                distance
            );
            assert!(
                rig.camera.position.z >= rig.character.position.z + 2.0 - EPSILON,
                "frame {}: camera too low",
                frame
            );
        }
    }

    #[test]
    fn test_camera_clears_terrain_and_looks_at_floater() {
        let mut rig = Rig::new(flat_world(4.0));
        rig.character.position = Vec3::new(0.0, 0.0, 4.0);
        rig.camera.position = Vec3::new(0.0, 8.0, 0.0);
        rig.step(&KeyMap::new(), 0.1, &mut RecordingAnim::default());

        // Terrain + 1 = 5 is below character + 2 = 6
        assert!((rig.camera.position.z - 6.0).abs() < EPSILON);
        assert_eq!(rig.controller.floater(), Vec3::new(0.0, 0.0, 6.0));
        let to_floater = (rig.controller.floater() - rig.camera.position).normalized();
        assert!((rig.camera.forward() - to_floater).length() < EPSILON);
    }

    #[test]
    fn test_from_config() {
        let mut config = RalphConfig::default();
        config.run_speed = 10.0;
        let controller = MovementController::from_config(&config);
        assert_eq!(controller.settings().run_speed, 10.0);
        assert_eq!(controller.settings().turn_rate, 300.0);
        assert_eq!(controller.state(), MotionState::Idle);
    }
}
