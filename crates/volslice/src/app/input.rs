use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use volslice_core::ViewCommand;

use super::App;

/// Maps a physical key to the view change it requests.
///
/// Esc is not a view change; it is tracked separately and polled per frame.
pub(crate) fn command_for_key(code: KeyCode) -> Option<ViewCommand> {
    match code {
        KeyCode::KeyA => Some(ViewCommand::PullNearPlane),
        KeyCode::KeyS => Some(ViewCommand::PushNearPlane),
        KeyCode::ArrowLeft => Some(ViewCommand::RotateLeft),
        KeyCode::ArrowRight => Some(ViewCommand::RotateRight),
        KeyCode::ArrowUp => Some(ViewCommand::RotateUp),
        KeyCode::ArrowDown => Some(ViewCommand::RotateDown),
        KeyCode::KeyR => Some(ViewCommand::Reset),
        _ => None,
    }
}

/// What a key event asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyAction {
    /// Change the view.
    View(ViewCommand),
    /// Set whether Esc is held; a held Esc exits at the next frame.
    HoldExit(bool),
}

/// Decides the action for a physical key in a given state.
///
/// View commands fire on press and auto-repeat, never on release. Esc reports
/// both edges so its held state can be tracked.
pub(crate) fn action_for_key(code: KeyCode, state: ElementState) -> Option<KeyAction> {
    if code == KeyCode::Escape {
        return Some(KeyAction::HoldExit(state == ElementState::Pressed));
    }
    // Pressed covers both the initial press and auto-repeat.
    if state != ElementState::Pressed {
        return None;
    }
    command_for_key(code).map(KeyAction::View)
}

impl App {
    fn handle_key(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        if event.repeat {
            log::debug!("{code:?} repeat");
        }
        self.handle_key_input(code, event.state);
    }

    pub(super) fn handle_key_input(&mut self, code: KeyCode, state: ElementState) {
        match action_for_key(code, state) {
            Some(KeyAction::View(command)) => {
                log::debug!("{code:?} -> {command:?}");
                self.view.apply(command);
            }
            Some(KeyAction::HoldExit(held)) => self.escape_held = held,
            None => {}
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.startup_error.is_some() {
            return;
        }

        if let Err(err) = self.init(event_loop) {
            log::error!("Startup failed: {err}");
            self.shutdown();
            self.startup_error = Some(err);
            event_loop.exit();
            return;
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                self.handle_key(&event);
            }
            WindowEvent::RedrawRequested => {
                if self.escape_held {
                    event_loop.exit();
                    return;
                }

                if !self.render() {
                    event_loop.exit();
                    return;
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use volslice_core::{Options, ViewState};

    const MAPPED_KEYS: [KeyCode; 7] = [
        KeyCode::KeyA,
        KeyCode::KeyS,
        KeyCode::ArrowLeft,
        KeyCode::ArrowRight,
        KeyCode::ArrowUp,
        KeyCode::ArrowDown,
        KeyCode::KeyR,
    ];

    #[test]
    fn test_key_table() {
        assert_eq!(command_for_key(KeyCode::KeyA), Some(ViewCommand::PullNearPlane));
        assert_eq!(command_for_key(KeyCode::KeyS), Some(ViewCommand::PushNearPlane));
        assert_eq!(command_for_key(KeyCode::ArrowLeft), Some(ViewCommand::RotateLeft));
        assert_eq!(command_for_key(KeyCode::ArrowRight), Some(ViewCommand::RotateRight));
        assert_eq!(command_for_key(KeyCode::ArrowUp), Some(ViewCommand::RotateUp));
        assert_eq!(command_for_key(KeyCode::ArrowDown), Some(ViewCommand::RotateDown));
        assert_eq!(command_for_key(KeyCode::KeyR), Some(ViewCommand::Reset));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(command_for_key(KeyCode::Escape), None);
        assert_eq!(command_for_key(KeyCode::KeyW), None);
        assert_eq!(command_for_key(KeyCode::Space), None);
    }

    #[test]
    fn test_arrow_keys_drive_angles() {
        let mut view = ViewState::default();
        for code in [KeyCode::ArrowRight, KeyCode::ArrowRight, KeyCode::ArrowDown] {
            if let Some(command) = command_for_key(code) {
                view.apply(command);
            }
        }
        assert!((view.angle_y - 4.0).abs() < 1e-6);
        assert!((view.angle_x - 2.0).abs() < 1e-6);
        assert!((view.near_plane - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_near_plane_keys() {
        let mut view = ViewState::default();
        if let Some(command) = command_for_key(KeyCode::KeyS) {
            view.apply(command);
        }
        assert!((view.near_plane - 1.01).abs() < 1e-6);
        if let Some(command) = command_for_key(KeyCode::KeyA) {
            view.apply(command);
            view.apply(command);
        }
        assert!((view.near_plane - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_release_never_changes_view() {
        for code in MAPPED_KEYS {
            assert_eq!(action_for_key(code, ElementState::Released), None);

            let mut app = App::new(Options::default());
            app.handle_key_input(KeyCode::ArrowRight, ElementState::Pressed);
            let before = app.view;
            app.handle_key_input(code, ElementState::Released);
            assert_eq!(app.view, before, "releasing {code:?} changed the view");
        }
    }

    #[test]
    fn test_press_applies_view_command() {
        assert_eq!(
            action_for_key(KeyCode::KeyS, ElementState::Pressed),
            Some(KeyAction::View(ViewCommand::PushNearPlane))
        );
        let mut app = App::new(Options::default());
        app.handle_key_input(KeyCode::ArrowLeft, ElementState::Pressed);
        assert!((app.view.angle_y + 2.0).abs() < 1e-6);
        assert!(!app.escape_held);
    }

    #[test]
    fn test_escape_tracks_held_state() {
        assert_eq!(
            action_for_key(KeyCode::Escape, ElementState::Pressed),
            Some(KeyAction::HoldExit(true))
        );
        assert_eq!(
            action_for_key(KeyCode::Escape, ElementState::Released),
            Some(KeyAction::HoldExit(false))
        );

        let mut app = App::new(Options::default());
        app.handle_key_input(KeyCode::Escape, ElementState::Pressed);
        assert!(app.escape_held);
        assert_eq!(app.view, ViewState::default());
        app.handle_key_input(KeyCode::Escape, ElementState::Released);
        assert!(!app.escape_held);
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        assert_eq!(action_for_key(KeyCode::KeyW, ElementState::Pressed), None);
        let mut app = App::new(Options::default());
        app.handle_key_input(KeyCode::KeyW, ElementState::Pressed);
        assert_eq!(app.view, ViewState::default());
        assert!(!app.escape_held);
    }

    proptest! {
        #[test]
        fn prop_r_always_restores_startup_view(
            presses in prop::collection::vec(prop::sample::select(MAPPED_KEYS.to_vec()), 0..64)
        ) {
            let mut view = ViewState::default();
            for code in presses {
                if let Some(command) = command_for_key(code) {
                    view.apply(command);
                }
            }
            if let Some(command) = command_for_key(KeyCode::KeyR) {
                view.apply(command);
            }
            prop_assert_eq!(view, ViewState::default());
        }
    }
}
