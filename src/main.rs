//! Roam - terrain-walking character controller and bump-map viewer
//!
//! Opens a window, translates keyboard and mouse input into named events
//! for the configured demo and runs its tasks once per redraw.

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::WindowId,
};

use roam::config::AppConfig;
use roam::demos;
use roam::input::InputMapper;
use roam::systems::{DemoRunner, FrameClock, WindowSystem};

/// Main application state
struct App {
    config: AppConfig,
    demo: Box<dyn DemoRunner>,
    window: Option<WindowSystem>,
    clock: FrameClock,
}

impl App {
    fn new(config: AppConfig, demo: Box<dyn DemoRunner>) -> Self {
        let clock = FrameClock::new(config.demo.max_frame_dt);
        Self {
            config,
            demo,
            window: None,
            clock,
        }
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: &str) {
        if self.demo.handle_event(event) {
            log::debug!("Event '{}'", event);
        }
        if self.demo.exit_requested() {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match WindowSystem::create(event_loop, &self.config.window, &self.demo.title().text) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                log::error!("{}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if let Some(name) = InputMapper::map_keyboard(key, event.state, event.repeat) {
                        self.dispatch(event_loop, &name);
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(name) = InputMapper::map_mouse_button(button, state) {
                    self.dispatch(event_loop, &name);
                }
            }

            WindowEvent::RedrawRequested => {
                let time = self.clock.tick();
                self.demo.frame(time);

                if let Some(window) = &mut self.window {
                    if self.config.debug.show_status {
                        window.update_title(&self.demo.status_line());
                    }
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.demo.pointer_moved(delta.0 as f32, delta.1 as f32);
        }
    }
}

fn main() {
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()),
    )
    .init();
    log::info!("Starting Roam");

    let demo = match demos::build(&config) {
        Ok(demo) => demo,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    log::info!("{}", demo.title().text);
    for line in demo.instructions() {
        log::info!("  {}", line.text);
    }

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config, demo);
    event_loop.run_app(&mut app).expect("Event loop error");
}
