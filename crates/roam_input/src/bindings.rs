//! Named event bindings
//!
//! A runtime table from event name to handler. Handlers receive the state
//! they act on as `&mut T`, so the table never borrows the demo it drives.

use std::collections::HashMap;
use std::fmt;

type Handler<T> = Box<dyn FnMut(&mut T)>;

/// Release event name for a key or button (`"a"` -> `"a-up"`)
pub fn up_event(name: &str) -> String {
    format!("{}-up", name)
}

/// Event name -> handler table
pub struct EventMap<T> {
    handlers: HashMap<String, Handler<T>>,
}

impl<T> Default for EventMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for EventMap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("EventMap").field("events", &names).finish()
    }
}

impl<T> EventMap<T> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind a handler to an event name, replacing any previous binding
    pub fn bind<F>(&mut self, event: impl Into<String>, handler: F)
    where
        F: FnMut(&mut T) + 'static,
    {
        let event = event.into();
        if self.handlers.insert(event.clone(), Box::new(handler)).is_some() {
            log::warn!("Rebinding event '{}'", event);
        }
    }

    /// Bind a press/release pair
    ///
    /// `name` calls `handler(state, true)` and `name-up` calls
    /// `handler(state, false)`.
    pub fn bind_toggle<F>(&mut self, name: &str, handler: F)
    where
        F: Fn(&mut T, bool) + Clone + 'static,
    {
        let on_release = handler.clone();
        self.bind(name, move |state| handler(state, true));
        self.bind(up_event(name), move |state| on_release(state, false));
    }

    /// Run the handler bound to `event`
    ///
    /// Returns false when nothing is bound to it.
    pub fn dispatch(&mut self, event: &str, state: &mut T) -> bool {
        match self.handlers.get_mut(event) {
            Some(handler) => {
                handler(state);
                true
            }
            None => {
                log::trace!("Unbound event '{}'", event);
                false
            }
        }
    }

    pub fn contains(&self, event: &str) -> bool {
        self.handlers.contains_key(event)
    }

    pub fn unbind(&mut self, event: &str) -> bool {
        self.handlers.remove(event).is_some()
    }

    /// Number of bound event names
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
