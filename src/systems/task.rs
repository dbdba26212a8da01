//! Per-frame task scheduling
//!
//! Tasks are named closures run once per frame against a shared context.
//! A task keeps running until it returns [`DoneStatus::Done`].

use std::time::Instant;

/// What a task wants after this frame
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoneStatus {
    /// Run again next frame
    Continue,
    /// Remove the task
    Done,
}

/// Timing handed to tasks each frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Seconds since the previous frame (capped)
    pub dt: f32,
    /// Seconds since the clock started
    pub elapsed: f64,
}

impl FrameTime {
    pub fn new(dt: f32, elapsed: f64) -> Self {
        Self { dt, elapsed }
    }
}

/// Wall clock producing [`FrameTime`]s
pub struct FrameClock {
    start: Instant,
    last_frame: Option<Instant>,
    max_dt: f32,
}

impl FrameClock {
    /// Create a clock; frame steps longer than `max_dt` seconds are clamped
    pub fn new(max_dt: f32) -> Self {
        Self {
            start: Instant::now(),
            last_frame: None,
            max_dt,
        }
    }

    /// Advance to now. The first tick reports `dt == 0`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let raw_dt = self
            .last_frame
            .map(|last| (now - last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_frame = Some(now);
        // Cap dt so a stall (window drag, breakpoint) doesn't teleport anything
        FrameTime {
            dt: raw_dt.min(self.max_dt),
            elapsed: (now - self.start).as_secs_f64(),
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(0.25)
    }
}

type TaskFn<C> = Box<dyn FnMut(&mut C, FrameTime) -> DoneStatus>;

struct Task<C> {
    name: String,
    func: TaskFn<C>,
}

/// Ordered list of per-frame tasks over a context `C`
pub struct TaskManager<C> {
    tasks: Vec<Task<C>>,
}

impl<C> Default for TaskManager<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> TaskManager<C> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Add a task; tasks run in insertion order
    pub fn add<F>(&mut self, name: impl Into<String>, func: F)
    where
        F: FnMut(&mut C, FrameTime) -> DoneStatus + 'static,
    {
        let name = name.into();
        log::debug!("Adding task '{}'", name);
        self.tasks.push(Task {
            name,
            func: Box::new(func),
        });
    }

    /// Remove every task with this name
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.name != name);
        self.tasks.len() != before
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tasks.iter().any(|task| task.name == name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|task| task.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Run every task once, dropping the ones that report `Done`
    pub fn run_frame(&mut self, context: &mut C, time: FrameTime) {
        self.tasks.retain_mut(|task| match (task.func)(context, time) {
            DoneStatus::Continue => true,
            DoneStatus::Done => {
                log::debug!("Task '{}' done", task.name);
                false
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tasks_run_in_order() {
        let mut tasks: TaskManager<Vec<&'static str>> = TaskManager::new();
        tasks.add("first", |log, _| {
            log.push("first");
            DoneStatus::Continue
        });
        tasks.add("second", |log, _| {
            log.push("second");
            DoneStatus::Continue
        });

        let mut log = Vec::new();
        tasks.run_frame(&mut log, FrameTime::new(0.016, 0.016));
        assert_eq!(log, ["first", "second"]);
        assert_eq!(tasks.task_names().collect::<Vec<_>>(), ["first", "second"]);
    }

    #[test]
    fn test_done_task_removed() {
        let mut tasks: TaskManager<u32> = TaskManager::new();
        tasks.add("count_to_three", |n, _| {
            *n += 1;
            if *n >= 3 { DoneStatus::Done } else { DoneStatus::Continue }
        });

        let mut n = 0;
        for _ in 0..5 {
            tasks.run_frame(&mut n, FrameTime::new(0.1, 0.0));
        }
        assert_eq!(n, 3);
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_tasks_see_frame_time() {
        let mut tasks: TaskManager<f32> = TaskManager::new();
        tasks.add("sum_dt", |total, time| {
            *total += time.dt;
            DoneStatus::Continue
        });
        let mut total = 0.0;
        tasks.run_frame(&mut total, FrameTime::new(0.5, 0.5));
        tasks.run_frame(&mut total, FrameTime::new(0.25, 0.75));
        assert_eq!(total, 0.75);
    }

    #[test]
    fn test_remove_by_name() {
        let mut tasks: TaskManager<()> = TaskManager::new();
        tasks.add("moveTask", |_, _| DoneStatus::Continue);
        assert!(tasks.contains("moveTask"));
        assert!(tasks.remove("moveTask"));
        assert!(!tasks.remove("moveTask"));
        assert_eq!(tasks.len(), 0);
    }

    #[test]
    fn test_clock_first_tick_zero_and_capped() {
        let mut clock = FrameClock::new(0.01);
        let first = clock.tick();
        assert_eq!(first.dt, 0.0);

        std::thread::sleep(std::time::Duration::from_millis(30));
        let second = clock.tick();
        assert!(second.dt <= 0.01);
        assert!(second.elapsed >= 0.03);
    }
}
