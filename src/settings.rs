//! Game settings and preferences
//!
//! Read from the JSON file named by `ROCKET_ROAD_SETTINGS`. Missing fields
//! take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::sim::{CameraMode, CameraState};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Run seed; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Camera ===
    /// Camera preset at startup
    pub camera: CameraMode,
    /// Height change per camera adjust input
    pub camera_height_step: f32,
    /// Yaw change (degrees) per camera adjust input
    pub camera_rotation_step: f32,

    // === Driver ===
    /// Let the autopilot play
    pub idle_mode: bool,
    /// Press continue automatically on level-complete/game-over screens
    pub auto_continue: bool,
    /// Simulated session length in seconds
    pub demo_seconds: f32,
    /// Simulated display rate
    pub frame_rate: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            camera: CameraMode::ThirdPerson,
            camera_height_step: 10.0,
            camera_rotation_step: 5.0,

            idle_mode: true,
            auto_continue: true,
            demo_seconds: 60.0,
            frame_rate: 60,
        }
    }
}

impl Settings {
    /// Environment variable naming the settings file
    pub const ENV_VAR: &'static str = "ROCKET_ROAD_SETTINGS";

    /// Parse settings from a JSON string and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn from_path(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Load from `ROCKET_ROAD_SETTINGS`, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = std::env::var_os(Self::ENV_VAR) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match Self::from_path(Path::new(&path)) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", Path::new(&path).display());
                settings
            }
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Reject values the driver can't run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.frame_rate == 0 {
            return Err(SettingsError::Invalid {
                field: "frame_rate",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.demo_seconds.is_finite() && self.demo_seconds > 0.0) {
            return Err(SettingsError::Invalid {
                field: "demo_seconds",
                reason: format!("must be positive, got {}", self.demo_seconds),
            });
        }
        if !self.camera_height_step.is_finite() || !self.camera_rotation_step.is_finite() {
            return Err(SettingsError::Invalid {
                field: "camera_height_step",
                reason: "camera steps must be finite".to_string(),
            });
        }
        Ok(())
    }

    /// Seconds per simulated display frame
    pub fn frame_dt(&self) -> f32 {
        1.0 / self.frame_rate.max(1) as f32
    }

    /// Initial camera parameters
    pub fn camera_state(&self) -> CameraState {
        CameraState::with_mode(self.camera)
    }
}
