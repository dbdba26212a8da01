//! Demo host
//!
//! Pairs a demo with its event table and task list. The window loop talks
//! to it through [`DemoRunner`] so it doesn't care which demo is running.

use roam_core::OnscreenText;
use roam_input::EventMap;

use crate::demos::Demo;
use super::task::{FrameTime, TaskManager};

/// Window-facing interface of a hosted demo
pub trait DemoRunner {
    /// Dispatch a named event; false if nothing is bound to it
    fn handle_event(&mut self, event: &str) -> bool;
    fn pointer_moved(&mut self, dx: f32, dy: f32);
    /// Run one frame of tasks
    fn frame(&mut self, time: FrameTime);
    fn title(&self) -> &OnscreenText;
    fn instructions(&self) -> &[OnscreenText];
    fn status_line(&self) -> String;
    fn exit_requested(&self) -> bool;
}

/// A demo with its bound events and tasks
pub struct Host<D: Demo> {
    demo: D,
    events: EventMap<D>,
    tasks: TaskManager<D>,
}

impl<D: Demo> Host<D> {
    pub fn new(demo: D) -> Self {
        let mut events = EventMap::new();
        D::bind_events(&mut events);
        let mut tasks = TaskManager::new();
        D::register_tasks(&mut tasks);
        log::info!(
            "Hosting '{}': {} events, {} tasks",
            demo.title().text,
            events.len(),
            tasks.len()
        );
        Self { demo, events, tasks }
    }

    pub fn demo(&self) -> &D {
        &self.demo
    }

    pub fn demo_mut(&mut self) -> &mut D {
        &mut self.demo
    }

    pub fn events(&self) -> &EventMap<D> {
        &self.events
    }

    pub fn tasks(&self) -> &TaskManager<D> {
        &self.tasks
    }
}

impl<D: Demo> DemoRunner for Host<D> {
    fn handle_event(&mut self, event: &str) -> bool {
        self.events.dispatch(event, &mut self.demo)
    }

    fn pointer_moved(&mut self, dx: f32, dy: f32) {
        self.demo.pointer_moved(dx, dy);
    }

    fn frame(&mut self, time: FrameTime) {
        self.tasks.run_frame(&mut self.demo, time);
    }

    fn title(&self) -> &OnscreenText {
        self.demo.title()
    }

    fn instructions(&self) -> &[OnscreenText] {
        self.demo.instructions()
    }

    fn status_line(&self) -> String {
        self.demo.status_line()
    }

    fn exit_requested(&self) -> bool {
        self.demo.exit_requested()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::DoneStatus;

    struct Counter {
        title: OnscreenText,
        presses: u32,
        frames: u32,
        quit: bool,
    }

    impl Demo for Counter {
        fn title(&self) -> &OnscreenText {
            &self.title
        }

        fn instructions(&self) -> &[OnscreenText] {
            &[]
        }

        fn bind_events(events: &mut EventMap<Self>) {
            events.bind("space", |c: &mut Counter| c.presses += 1);
            events.bind("escape", |c: &mut Counter| c.quit = true);
        }

        fn register_tasks(tasks: &mut TaskManager<Self>) {
            tasks.add("count", |c: &mut Counter, _| {
                c.frames += 1;
                DoneStatus::Continue
            });
        }

        fn status_line(&self) -> String {
            format!("{} presses", self.presses)
        }

        fn exit_requested(&self) -> bool {
            self.quit
        }
    }

    fn host() -> Host<Counter> {
        Host::new(Counter {
            title: OnscreenText::title("Counter"),
            presses: 0,
            frames: 0,
            quit: false,
        })
    }

    #[test]
    fn test_events_and_frames_reach_demo() {
        let mut host = host();
        assert!(host.handle_event("space"));
        assert!(!host.handle_event("space-up"));
        host.frame(FrameTime::new(0.1, 0.1));
        host.frame(FrameTime::new(0.1, 0.2));

        assert_eq!(host.demo().presses, 1);
        assert_eq!(host.demo().frames, 2);
        assert_eq!(host.status_line(), "1 presses");
    }

    #[test]
    fn test_runner_object() {
        let mut runner: Box<dyn DemoRunner> = Box::new(host());
        assert_eq!(runner.title().text, "Counter");
        assert!(!runner.exit_requested());
        runner.handle_event("escape");
        assert!(runner.exit_requested());
    }
}
