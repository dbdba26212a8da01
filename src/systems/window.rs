//! Window management system
//!
//! Handles window creation and the status line in the title.

use winit::{
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};
use crate::config::WindowConfig;

/// Manages the application window
pub struct WindowSystem {
    window: Window,
    base_title: String,
    last_title: String,
}

impl WindowSystem {
    /// Create window from config; the demo title follows the configured prefix
    pub fn create(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
        demo_title: &str,
    ) -> Result<Self, WindowError> {
        let base_title = format!("{}: {}", config.title, demo_title);
        let mut attrs = Window::default_attributes()
            .with_title(&base_title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                config.width,
                config.height,
            ));

        if config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| WindowError::CreationFailed(e.to_string()))?;

        Ok(Self {
            window,
            last_title: base_title.clone(),
            base_title,
        })
    }

    /// Show the demo status after the title (only touches the window on change)
    pub fn update_title(&mut self, status: &str) {
        let title = format_title(&self.base_title, status);
        if title != self.last_title {
            self.window.set_title(&title);
            self.last_title = title;
        }
    }

    /// Request a redraw
    pub fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

/// Window title with an optional status suffix
pub fn format_title(base: &str, status: &str) -> String {
    if status.is_empty() {
        base.to_string()
    } else {
        format!("{} - {}", base, status)
    }
}

#[derive(Debug)]
pub enum WindowError {
    CreationFailed(String),
}

impl std::fmt::Display for WindowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WindowError::CreationFailed(msg) => write!(f, "Window creation failed: {}", msg),
        }
    }
}

impl std::error::Error for WindowError {}
