//! Interactive view state and the fixed camera.
//!
//! The camera never moves. Rotation is applied to texture sampling instead: the
//! `Ttex` matrix turns the sampling coordinates around the volume center, so the
//! static slice stack shows the volume from a different direction.

use glam::{Mat4, Vec3};

/// Degrees added or removed per rotation key press.
pub const ROTATION_STEP_DEG: f32 = 2.0;
/// Near-plane change per key press.
pub const NEAR_PLANE_STEP: f32 = 0.01;
/// Near plane after startup and after a reset.
pub const DEFAULT_NEAR_PLANE: f32 = 1.0;
/// Far plane of the orthographic projection.
pub const FAR_PLANE: f32 = 4.0;
/// Half width and half height of the orthographic view volume.
pub const ORTHO_HALF_EXTENT: f32 = 1.0;
/// Camera eye position. The camera looks at the origin with +Y up.
pub const EYE: Vec3 = Vec3::new(0.0, 0.0, 1.5);

/// Center of the unit texture cube, the pivot of `Ttex`.
const TEXTURE_CENTER: Vec3 = Vec3::splat(0.5);

/// A change to the view requested from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewCommand {
    /// Decrease the near plane (move outside the head).
    PullNearPlane,
    /// Increase the near plane (move inside the head).
    PushNearPlane,
    /// Decrease the Y rotation.
    RotateLeft,
    /// Increase the Y rotation.
    RotateRight,
    /// Decrease the X rotation.
    RotateUp,
    /// Increase the X rotation.
    RotateDown,
    /// Restore angles and near plane to their startup values.
    Reset,
}

impl ViewCommand {
    /// The command that undoes this one, if any.
    #[must_use]
    pub fn inverse(self) -> Option<Self> {
        match self {
            Self::PullNearPlane => Some(Self::PushNearPlane),
            Self::PushNearPlane => Some(Self::PullNearPlane),
            Self::RotateLeft => Some(Self::RotateRight),
            Self::RotateRight => Some(Self::RotateLeft),
            Self::RotateUp => Some(Self::RotateDown),
            Self::RotateDown => Some(Self::RotateUp),
            Self::Reset => None,
        }
    }
}

/// Mutable view parameters driven by the keyboard.
///
/// Angles are in degrees and free-running. The near plane is not clamped either;
/// it can go negative or past [`FAR_PLANE`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    /// Rotation about the X axis, in degrees.
    pub angle_x: f32,
    /// Rotation about the Y axis, in degrees.
    pub angle_y: f32,
    /// Near clipping plane of the orthographic projection.
    pub near_plane: f32,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            angle_x: 0.0,
            angle_y: 0.0,
            near_plane: DEFAULT_NEAR_PLANE,
        }
    }
}

impl ViewState {
    /// Applies one key command.
    pub fn apply(&mut self, command: ViewCommand) {
        match command {
            ViewCommand::PullNearPlane => {
                self.near_plane -= NEAR_PLANE_STEP;
                log::info!("Near plane: {}", self.near_plane);
            }
            ViewCommand::PushNearPlane => {
                self.near_plane += NEAR_PLANE_STEP;
                log::info!("Near plane: {}", self.near_plane);
            }
            ViewCommand::RotateLeft => self.angle_y -= ROTATION_STEP_DEG,
            ViewCommand::RotateRight => self.angle_y += ROTATION_STEP_DEG,
            ViewCommand::RotateUp => self.angle_x -= ROTATION_STEP_DEG,
            ViewCommand::RotateDown => self.angle_x += ROTATION_STEP_DEG,
            ViewCommand::Reset => {
                self.reset();
                log::info!("View reset");
            }
        }
    }

    /// Restores the startup view.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The fixed look-at matrix.
    #[must_use]
    pub fn view_matrix() -> Mat4 {
        Mat4::look_at_rh(EYE, Vec3::ZERO, Vec3::Y)
    }

    /// Orthographic projection with the current near plane.
    ///
    /// Depth maps to `[0, 1]` as wgpu expects.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            -ORTHO_HALF_EXTENT,
            ORTHO_HALF_EXTENT,
            -ORTHO_HALF_EXTENT,
            ORTHO_HALF_EXTENT,
            self.near_plane,
            FAR_PLANE,
        )
    }

    /// Texture-space rotation `Ttex`: Y rotation then X rotation about the cube center.
    #[must_use]
    pub fn texture_transform(&self) -> Mat4 {
        Mat4::from_translation(TEXTURE_CENTER)
            * Mat4::from_rotation_y(self.angle_y.to_radians())
            * Mat4::from_rotation_x(self.angle_x.to_radians())
            * Mat4::from_translation(-TEXTURE_CENTER)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ROTATIONS: [ViewCommand; 4] = [
        ViewCommand::RotateLeft,
        ViewCommand::RotateRight,
        ViewCommand::RotateUp,
        ViewCommand::RotateDown,
    ];

    #[test]
    fn test_default_view() {
        let view = ViewState::default();
        assert_eq!(view.angle_x, 0.0);
        assert_eq!(view.angle_y, 0.0);
        assert_eq!(view.near_plane, 1.0);
    }

    #[test]
    fn test_default_texture_transform_is_identity() {
        let ttex = ViewState::default().texture_transform();
        assert!(ttex.abs_diff_eq(Mat4::IDENTITY, 1e-6), "got {ttex:?}");
    }

    #[test]
    fn test_key_steps() {
        let mut view = ViewState::default();
        view.apply(ViewCommand::RotateRight);
        view.apply(ViewCommand::RotateDown);
        view.apply(ViewCommand::RotateDown);
        assert_eq!(view.angle_y, 2.0);
        assert_eq!(view.angle_x, 4.0);

        view.apply(ViewCommand::PushNearPlane);
        assert!((view.near_plane - 1.01).abs() < 1e-6);
        view.apply(ViewCommand::PullNearPlane);
        view.apply(ViewCommand::PullNearPlane);
        assert!((view.near_plane - 0.99).abs() < 1e-6);
    }

    #[test]
    fn test_near_plane_is_not_clamped() {
        let mut view = ViewState::default();
        for _ in 0..150 {
            view.apply(ViewCommand::PullNearPlane);
        }
        assert!(view.near_plane < 0.0);

        view.near_plane = FAR_PLANE + 1.0;
        view.apply(ViewCommand::PushNearPlane);
        assert!(view.near_plane > FAR_PLANE);
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let view = ViewState {
            angle_y: 90.0,
            ..ViewState::default()
        };
        let p = view.texture_transform().transform_point3(Vec3::new(1.0, 0.5, 0.5));
        assert!(p.abs_diff_eq(Vec3::new(0.5, 0.5, 0.0), 1e-5), "got {p:?}");
    }

    #[test]
    fn test_view_matrix_looks_down_negative_z() {
        let origin = ViewState::view_matrix().transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(0.0, 0.0, -1.5), 1e-6));
    }

    #[test]
    fn test_projection_depth_range() {
        let view = ViewState::default();
        let proj = view.projection_matrix() * ViewState::view_matrix();
        // Front slice sits on the near plane, back slice at distance 2.
        let near = proj.project_point3(Vec3::new(0.0, 0.0, 0.5));
        let back = proj.project_point3(Vec3::new(0.0, 0.0, -0.5));
        assert!(near.z.abs() < 1e-6);
        assert!(back.z > 0.0 && back.z < 1.0);
    }

    #[test]
    fn test_reset_has_no_inverse() {
        assert_eq!(ViewCommand::Reset.inverse(), None);
        assert_eq!(
            ViewCommand::RotateLeft.inverse(),
            Some(ViewCommand::RotateRight)
        );
    }

    proptest! {
        #[test]
        fn reset_restores_defaults(
            angle_x in -1.0e4f32..1.0e4,
            angle_y in -1.0e4f32..1.0e4,
            near_plane in -10.0f32..10.0,
        ) {
            let mut view = ViewState { angle_x, angle_y, near_plane };
            view.apply(ViewCommand::Reset);
            prop_assert_eq!(view, ViewState::default());
        }

        #[test]
        fn rotation_followed_by_inverse_is_exact(
            history in proptest::collection::vec(0usize..4, 0..64),
            command in 0usize..4,
        ) {
            let mut view = ViewState::default();
            for i in history {
                view.apply(ROTATIONS[i]);
            }
            let before = view;
            let command = ROTATIONS[command];
            view.apply(command);
            view.apply(command.inverse().unwrap());
            prop_assert_eq!(view, before);
        }

        #[test]
        fn texture_center_is_fixed(angle_x in -720.0f32..720.0, angle_y in -720.0f32..720.0) {
            let view = ViewState { angle_x, angle_y, ..ViewState::default() };
            let center = view.texture_transform().transform_point3(Vec3::splat(0.5));
            prop_assert!(center.abs_diff_eq(Vec3::splat(0.5), 1e-5));
        }
    }
}
