//! Camera model
//!
//! Pure mapping from camera parameters and player position to a view
//! transform. Nothing here feeds back into gameplay.

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use super::state::Player;

/// Camera presets, cycled in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraMode {
    #[default]
    ThirdPerson,
    FirstPerson,
    SideView,
}

impl CameraMode {
    pub fn next(self) -> Self {
        match self {
            CameraMode::ThirdPerson => CameraMode::FirstPerson,
            CameraMode::FirstPerson => CameraMode::SideView,
            CameraMode::SideView => CameraMode::ThirdPerson,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CameraMode::ThirdPerson => "Third Person",
            CameraMode::FirstPerson => "First Person",
            CameraMode::SideView => "Side View",
        }
    }
}

/// Third-person rig position before rotation/height adjustment
const THIRD_PERSON_EYE: Vec3 = Vec3::new(0.0, 120.0, 200.0);
/// Side view rig position (z follows the player)
const SIDE_VIEW_EYE: Vec3 = Vec3::new(200.0, 50.0, 0.0);
/// First-person eye offset from the player
const FIRST_PERSON_OFFSET: Vec3 = Vec3::new(0.0, 30.0, 30.0);
/// How far ahead the first-person camera looks
const FIRST_PERSON_LOOK_AHEAD: f32 = 100.0;

/// View parameters (no gameplay effect)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CameraState {
    pub mode: CameraMode,
    /// Manual height offset (third-person and side view)
    pub height_offset: f32,
    /// Manual yaw around the track origin in degrees (third-person)
    pub rotation_deg: f32,
}

impl CameraState {
    pub fn with_mode(mode: CameraMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn cycle(&mut self) {
        self.mode = self.mode.next();
    }

    pub fn adjust(&mut self, height_delta: f32, rotation_delta: f32) {
        self.height_offset += height_delta;
        self.rotation_deg += rotation_delta;
    }
}

/// Eye/target/up triple consumed by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewTransform {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl ViewTransform {
    /// Right-handed look-at matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }
}

/// Compute the view transform for the current camera and player
pub fn view_transform(camera: &CameraState, player: &Player) -> ViewTransform {
    match camera.mode {
        CameraMode::FirstPerson => ViewTransform {
            eye: player.pos + FIRST_PERSON_OFFSET,
            target: player.pos - Vec3::Z * FIRST_PERSON_LOOK_AHEAD,
            up: Vec3::Y,
        },
        CameraMode::SideView => ViewTransform {
            eye: Vec3::new(
                SIDE_VIEW_EYE.x,
                SIDE_VIEW_EYE.y + camera.height_offset,
                player.pos.z,
            ),
            target: player.pos,
            up: Vec3::Y,
        },
        CameraMode::ThirdPerson => {
            let (sin, cos) = camera.rotation_deg.to_radians().sin_cos();
            let x = THIRD_PERSON_EYE.x * cos - THIRD_PERSON_EYE.z * sin;
            let z = THIRD_PERSON_EYE.x * sin + THIRD_PERSON_EYE.z * cos;
            ViewTransform {
                eye: Vec3::new(x, THIRD_PERSON_EYE.y + camera.height_offset, z),
                target: Vec3::ZERO,
                up: Vec3::Y,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_cycle_wraps() {
        let mut camera = CameraState::default();
        camera.cycle();
        assert_eq!(camera.mode, CameraMode::FirstPerson);
        camera.cycle();
        assert_eq!(camera.mode, CameraMode::SideView);
        camera.cycle();
        assert_eq!(camera.mode, CameraMode::ThirdPerson);
    }

    #[test]
    fn test_third_person_default() {
        let view = view_transform(&CameraState::default(), &Player::default());
        assert_eq!(view.eye, Vec3::new(0.0, 120.0, 200.0));
        assert_eq!(view.target, Vec3::ZERO);
    }

    #[test]
    fn test_third_person_rotation_keeps_distance() {
        let mut camera = CameraState::default();
        camera.adjust(10.0, 90.0);
        let view = view_transform(&camera, &Player::default());
        assert!((view.eye.x + 200.0).abs() < 1e-3);
        assert!(view.eye.z.abs() < 1e-3);
        assert_eq!(view.eye.y, 130.0);
    }

    #[test]
    fn test_first_person_follows_player() {
        let mut player = Player::default();
        player.pos = Vec3::new(80.0, 25.0, 4.0);
        let view = view_transform(&CameraState::with_mode(CameraMode::FirstPerson), &player);
        assert_eq!(view.eye, Vec3::new(80.0, 55.0, 34.0));
        assert_eq!(view.target, Vec3::new(80.0, 25.0, -96.0));
    }

    #[test]
    fn test_side_view_tracks_z() {
        let mut player = Player::default();
        player.pos.z = 12.0;
        let mut camera = CameraState::with_mode(CameraMode::SideView);
        camera.height_offset = -20.0;
        let view = view_transform(&camera, &player);
        assert_eq!(view.eye, Vec3::new(200.0, 30.0, 12.0));
        assert_eq!(view.target, player.pos);
        assert!(view.view_matrix().is_finite());
    }
}
