//! Bump mapping viewer
//!
//! A fly camera inspects a room lit by a light circling its center. Mouse
//! motion turns the camera, the left button flies forward and the other
//! buttons fly backward. Enter toggles normal mapping.

use roam_core::{NodeKey, OnscreenText, SceneGraph};
use roam_input::{EventMap, MouseButtons, PointerDelta};
use roam_math::{Hpr, Vec3};

use crate::config::BumpConfig;
use crate::systems::{DoneStatus, FrameTime, TaskManager};
use super::{attach, Demo, DemoError};

const SHADER_ON_TEXT: &str = "Enter: Turn bump maps Off";
const SHADER_OFF_TEXT: &str = "Enter: Turn bump maps On";
/// Index of the shader toggle line in the instructions
const SHADER_LINE: usize = 4;

pub struct BumpMapDemo {
    settings: BumpConfig,
    graph: SceneGraph,
    camera: NodeKey,
    light_pivot: NodeKey,
    focus: Vec3,
    heading: f32,
    pitch: f32,
    /// Task time of the previous camera update
    last: Option<f64>,
    buttons: MouseButtons,
    pointer: PointerDelta,
    shader_enabled: bool,
    /// Heading added to the light's spin by the rotate keys
    light_offset: f32,
    light_spin: f32,
    title: OnscreenText,
    instructions: Vec<OnscreenText>,
    exit_requested: bool,
}

impl BumpMapDemo {
    pub fn new(config: &BumpConfig) -> Result<Self, DemoError> {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        attach(&mut graph, "room", root)?;
        let camera = attach(&mut graph, "camera", root)?;

        let light_pivot = attach(&mut graph, "lightpivot", root)?;
        graph.set_pos(light_pivot, Vec3::from_array(config.light_pivot));
        let light = attach(&mut graph, "plight", light_pivot)?;
        graph.set_pos(light, Vec3::new(config.light_radius, 0.0, 0.0));

        let mut demo = Self {
            settings: config.clone(),
            graph,
            camera,
            light_pivot,
            focus: config.focus(),
            heading: config.heading,
            pitch: config.pitch,
            last: None,
            buttons: MouseButtons::new(),
            pointer: PointerDelta::default(),
            shader_enabled: true,
            light_offset: 0.0,
            light_spin: 0.0,
            title: OnscreenText::title("Panda3D: Tutorial - Bump Mapping"),
            instructions: vec![
                OnscreenText::instruction(0.95, "Press ESC to exit"),
                OnscreenText::instruction(0.90, "Move mouse to rotate camera"),
                OnscreenText::instruction(0.85, "Left mouse button: Move forwards"),
                OnscreenText::instruction(0.80, "Right mouse button: Move backwards"),
                OnscreenText::instruction(0.75, SHADER_ON_TEXT),
            ],
            exit_requested: false,
        };
        let camera_start = demo.focus - demo.orientation().forward() * config.focus_distance;
        demo.place_camera(camera_start);
        Ok(demo)
    }

    pub fn set_mouse_btn(&mut self, index: usize, value: bool) {
        self.buttons.set(index, value);
    }

    /// Turn the light pivot by `offset` steps
    pub fn rotate_light(&mut self, offset: f32) {
        self.light_offset += offset * self.settings.light_step;
        self.apply_light_heading();
    }

    /// Turn the camera by `offset` steps (positive turns right)
    pub fn rotate_cam(&mut self, offset: f32) {
        self.heading -= offset * self.settings.camera_heading_step;
    }

    pub fn toggle_shader(&mut self) {
        self.shader_enabled = !self.shader_enabled;
        let text = if self.shader_enabled { SHADER_ON_TEXT } else { SHADER_OFF_TEXT };
        if let Some(line) = self.instructions.get_mut(SHADER_LINE) {
            line.set_text(text);
        }
        log::info!("Bump maps {}", if self.shader_enabled { "on" } else { "off" });
    }

    pub fn shader_enabled(&self) -> bool {
        self.shader_enabled
    }

    pub fn focus(&self) -> Vec3 {
        self.focus
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn buttons(&self) -> &MouseButtons {
        &self.buttons
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn camera_position(&self) -> Vec3 {
        self.graph.pos(self.camera).unwrap_or_default()
    }

    /// Heading of the light pivot
    pub fn light_heading(&self) -> f32 {
        self.graph
            .transform(self.light_pivot)
            .map(|t| t.heading())
            .unwrap_or_default()
    }

    /// World position of the orbiting light
    pub fn light_position(&self) -> Option<Vec3> {
        self.graph.find("plight").and_then(|key| self.graph.world_position(key))
    }

    fn orientation(&self) -> Hpr {
        Hpr::new(self.heading, self.pitch, 0.0)
    }

    fn place_camera(&mut self, position: Vec3) {
        let hpr = self.orientation();
        self.graph.set_pos(self.camera, position);
        self.graph.set_hpr(self.camera, hpr);
    }

    fn apply_light_heading(&mut self) {
        self.graph.set_h(self.light_pivot, self.light_offset + self.light_spin);
    }

    /// Per-frame camera task: mouse look, fly, keep inside the room
    pub fn control_camera(&mut self, time: f64) -> DoneStatus {
        let (dx, dy) = self.pointer.take();
        let sensitivity = self.settings.mouse_sensitivity;
        let limit = self.settings.pitch_limit;
        self.heading -= dx * sensitivity;
        self.pitch = (self.pitch - dy * sensitivity).clamp(-limit, limit);

        let dir = self.orientation().forward();
        let elapsed = self.last.map_or(0.0, |last| (time - last) as f32);
        let travel = dir * (elapsed * self.settings.fly_speed);
        if self.buttons.get(0) {
            self.focus += travel;
        }
        if self.buttons.get(1) || self.buttons.get(2) {
            self.focus -= travel;
        }

        let distance = self.settings.focus_distance;
        let (lo, hi) = self.settings.bounds();
        let camera = (self.focus - dir * distance).clamp_components(lo, hi);
        self.focus = camera + dir * distance;
        self.place_camera(camera);

        self.last = Some(time);
        DoneStatus::Continue
    }

    /// Per-frame light task: one full turn every `light_period` seconds
    pub fn spin_light(&mut self, time: f64) -> DoneStatus {
        let period = f64::from(self.settings.light_period);
        if period > 0.0 {
            self.light_spin = (360.0 * time.rem_euclid(period) / period) as f32;
        }
        self.apply_light_heading();
        DoneStatus::Continue
    }
}

impl Demo for BumpMapDemo {
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
        for (index, name) in ["mouse1", "mouse2", "mouse3"].into_iter().enumerate() {
            events.bind_toggle(name, move |demo: &mut Self, down| demo.set_mouse_btn(index, down));
        }
        events.bind("enter", |demo: &mut Self| demo.toggle_shader());
        events.bind("j", |demo: &mut Self| demo.rotate_light(-1.0));
        events.bind("k", |demo: &mut Self| demo.rotate_light(1.0));
        events.bind("arrow_left", |demo: &mut Self| demo.rotate_cam(-1.0));
        events.bind("arrow_right", |demo: &mut Self| demo.rotate_cam(1.0));
    }

    fn register_tasks(tasks: &mut TaskManager<Self>) {
        tasks.add("camera-task", |demo: &mut Self, time: FrameTime| {
            demo.control_camera(time.elapsed)
        });
        tasks.add("light-spin", |demo: &mut Self, time: FrameTime| demo.spin_light(time.elapsed));
    }

    fn status_line(&self) -> String {
        let camera = self.camera_position();
        format!(
            "Camera ({:.1}, {:.1}, {:.1}) H:{:.0} P:{:.0} bump maps {}",
            camera.x,
            camera.y,
            camera.z,
            self.heading,
            self.pitch,
            if self.shader_enabled { "on" } else { "off" }
        )
    }

    fn pointer_moved(&mut self, dx: f32, dy: f32) {
        self.pointer.accumulate(dx, dy);
    }

    fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-3;

    fn demo() -> BumpMapDemo {
        BumpMapDemo::new(&BumpConfig::default()).unwrap()
    }

    fn bound_events() -> EventMap<BumpMapDemo> {
        let mut events = EventMap::new();
        BumpMapDemo::bind_events(&mut events);
        events
    }

    #[test]
    fn test_initial_camera_behind_focus() {
        let demo = demo();
        // Heading 180 looks down -Y
        let expected = Vec3::new(55.0, -50.0, 20.0);
        assert!((demo.camera_position() - expected).length() < EPSILON);
        assert!(demo.shader_enabled());
    }

    #[test]
    fn test_mouse_buttons_bound() {
        let mut events = bound_events();
        let mut demo = demo();
        for (index, name) in ["mouse1", "mouse2", "mouse3"].iter().enumerate() {
            events.dispatch(name, &mut demo);
            assert!(demo.buttons().get(index));
            events.dispatch(&format!("{}-up", name), &mut demo);
            assert!(!demo.buttons().get(index));
        }
    }

    #[test]
    fn test_toggle_shader_updates_instruction() {
        let mut events = bound_events();
        let mut demo = demo();
        events.dispatch("enter", &mut demo);
        assert!(!demo.shader_enabled());
        assert_eq!(demo.instructions()[SHADER_LINE].text, SHADER_OFF_TEXT);
        events.dispatch("enter", &mut demo);
        assert!(demo.shader_enabled());
        assert_eq!(demo.instructions()[SHADER_LINE].text, SHADER_ON_TEXT);
    }

    #[test]
    fn test_rotate_keys() {
        let mut events = bound_events();
        let mut demo = demo();
        events.dispatch("arrow_left", &mut demo);
        assert_eq!(demo.heading(), 190.0);
        events.dispatch("arrow_right", &mut demo);
        events.dispatch("arrow_right", &mut demo);
        assert_eq!(demo.heading(), 170.0);

        events.dispatch("j", &mut demo);
        assert_eq!(demo.light_heading(), -20.0);
        events.dispatch("k", &mut demo);
        events.dispatch("k", &mut demo);
        assert_eq!(demo.light_heading(), 20.0);
    }

    #[test]
    fn test_mouse_look_clamps_pitch() {
        let mut demo = demo();
        demo.pointer_moved(10.0, -1000.0);
        demo.control_camera(0.0);
        assert!((demo.heading() - 178.0).abs() < EPSILON);
        assert_eq!(demo.pitch(), 45.0);
    }

    #[test]
    fn test_first_frame_does_not_fly() {
        let mut demo = demo();
        let focus = demo.focus();
        demo.set_mouse_btn(0, true);
        demo.control_camera(100.0);
        assert!((demo.focus() - focus).length() < EPSILON);
    }

    #[test]
    fn test_fly_forward_and_back() {
        let mut demo = demo();
        demo.control_camera(0.0);
        let start = demo.focus();

        demo.set_mouse_btn(0, true);
        demo.control_camera(0.1);
        // Heading 180: forward is -Y
        assert!((demo.focus() - (start + Vec3::new(0.0, -3.0, 0.0))).length() < EPSILON);

        demo.set_mouse_btn(0, false);
        demo.set_mouse_btn(2, true);
        demo.control_camera(0.2);
        assert!((demo.focus() - start).length() < EPSILON);
    }

    #[test]
    fn test_camera_kept_inside_room() {
        let mut demo = demo();
        demo.control_camera(0.0);
        demo.set_mouse_btn(1, true);
        // Flying backward along +Y for a long time
        demo.control_camera(60.0);
        let camera = demo.camera_position();
        assert!((camera.y - 59.0).abs() < EPSILON);
        assert!((demo.focus() - (camera + Vec3::new(0.0, -5.0, 0.0))).length() < EPSILON);
    }

    #[test]
    fn test_light_orbits() {
        let mut demo = demo();
        demo.spin_light(2.5);
        assert!((demo.light_heading() - 90.0).abs() < EPSILON);
        let light = demo.light_position().unwrap();
        assert!((light - Vec3::new(0.0, 45.0, 25.0)).length() < EPSILON);

        // A full period later the light is back where it was
        demo.spin_light(12.5);
        assert!((demo.light_heading() - 90.0).abs() < EPSILON);

        demo.rotate_light(1.0);
        assert!((demo.light_heading() - 110.0).abs() < EPSILON);
    }

    #[test]
    fn test_tasks_registered() {
        let mut tasks = TaskManager::new();
        BumpMapDemo::register_tasks(&mut tasks);
        assert_eq!(tasks.len(), 2);

        let mut demo = demo();
        tasks.run_frame(&mut demo, FrameTime::new(0.0, 5.0));
        assert!((demo.light_heading() - 180.0).abs() < EPSILON);
    }
}
