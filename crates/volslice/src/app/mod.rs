//! Application window and event loop management.

mod input;
mod render;
mod render_init;

use std::sync::Arc;

use winit::{event_loop::EventLoop, window::Window};

use volslice_core::{Options, ViewState};
use volslice_render::RenderEngine;

use crate::scene::Scene;
use crate::{Result, ViewerError};

/// The viewer application state.
///
/// GPU resources are released by dropping fields in declaration order:
/// the scene (slices, texture, pipeline) before the engine, the engine before
/// the window.
pub struct App {
    scene: Option<Scene>,
    engine: Option<RenderEngine>,
    window: Option<Arc<Window>>,
    options: Options,
    view: ViewState,
    // Physical Esc state, checked once per frame
    escape_held: bool,
    startup_error: Option<ViewerError>,
    cleaned_up: bool,
}

impl App {
    /// Creates a new application. Nothing is created until the event loop resumes.
    pub fn new(options: Options) -> Self {
        Self {
            scene: None,
            engine: None,
            window: None,
            options,
            view: ViewState::default(),
            escape_held: false,
            startup_error: None,
            cleaned_up: false,
        }
    }

    /// Releases the scene, engine and window in that order. Runs at most once.
    fn shutdown(&mut self) {
        if self.cleaned_up {
            return;
        }
        log::info!("Cleaning up...");
        self.scene.take();
        self.engine.take();
        self.window.take();
        self.cleaned_up = true;
        log::info!("Cleanup complete.");
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Runs the viewer until the window closes or Esc is pressed.
///
/// Returns the first startup failure, after everything created before it has
/// been released. Failures are logged before the cleanup lines.
pub fn run_app(options: Options) -> Result<()> {
    let event_loop = EventLoop::new().inspect_err(|e| log::error!("Startup failed: {e}"))?;
    let mut app = App::new(options);

    event_loop
        .run_app(&mut app)
        .inspect_err(|e| log::error!("Event loop failed: {e}"))?;

    match app.startup_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shutdown_runs_once() {
        let mut app = App::new(Options::default());
        assert!(!app.cleaned_up);
        app.shutdown();
        assert!(app.cleaned_up);
        assert!(app.scene.is_none() && app.engine.is_none() && app.window.is_none());
        // Drop after an explicit shutdown does not release again.
        app.shutdown();
        assert!(app.cleaned_up);
    }
}
