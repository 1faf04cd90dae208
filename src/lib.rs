//! Rocket Road - A three-lane color-matching runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, spawning, game phases)
//! - `settings`: Data-driven configuration for the native driver
//! - `error`: Configuration error types

pub mod error;
pub mod settings;
pub mod sim;

pub use error::SettingsError;
pub use settings::Settings;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Game configuration constants
pub mod consts {
    /// Base fixed tick interval in seconds (40 ms at 1.0x speed)
    pub const BASE_TICK_INTERVAL: f32 = 0.040;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Speed multiplier bounds
    pub const MIN_SPEED_MULTIPLIER: f32 = 0.5;
    pub const MAX_SPEED_MULTIPLIER: f32 = 2.0;
    /// Score interval for the automatic speed-up
    pub const SPEED_INCREASE_THRESHOLD: u64 = 10;
    pub const SPEED_INCREASE_STEP: f32 = 0.1;
    /// Speed cube adjustment (±)
    pub const SPEED_CUBE_STEP: f32 = 0.2;

    /// Player defaults
    pub const PLAYER_SPAWN_Z: f32 = 4.0;
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_LIVES: u8 = 3;
    /// Lateral movement per tick toward the target lane
    pub const LANE_STEP: f32 = 5.0;
    pub const MAX_JUMP_HEIGHT: f32 = 75.0;
    pub const JUMP_STEP: f32 = 5.0;
    /// Cosmetic roll per tick (degrees)
    pub const ROLL_STEP: f32 = 5.0;
    /// Post-respawn grace period (simulation seconds)
    pub const INVINCIBILITY_SECS: f32 = 2.0;

    /// Size platform limits
    pub const MIN_BALL_RADIUS: f32 = 10.0;
    pub const MAX_BALL_RADIUS: f32 = 40.0;
    pub const SIZE_CHANGE_AMOUNT: f32 = 5.0;
    pub const MIN_PLATFORM_RADIUS: f32 = 20.0;
    pub const MAX_PLATFORM_RADIUS: f32 = 50.0;

    /// World scroll per tick
    pub const WORLD_SPEED: f32 = 10.0;
    pub const ROAD_SCROLL: f32 = 5.0;
    pub const FINISH_LINE_SCROLL: f32 = 5.0;

    /// Entities past this z are behind the camera
    pub const DESPAWN_Z: f32 = 50.0;

    /// Collectible balls
    pub const COLLECTIBLE_RADIUS: f32 = 20.0;
    pub const COLLECTIBLE_SPAWN_Z: f32 = -600.0;
    pub const MAX_COLLECTIBLES: usize = 8;

    /// Transient hazards/pickups
    pub const HAZARD_SPAWN_Z: f32 = -800.0;
    pub const FLOOR_Y: f32 = -30.0;
    pub const BARRIER_WIDTH: f32 = 240.0;

    /// Wall
    pub const WALL_REST_Z: f32 = -400.0;
    /// Wall must be within this distance of its rest z to re-arm
    pub const WALL_REARM_SLACK: f32 = 10.0;
    pub const WALL_SCORE_INTERVAL: u64 = 15;

    /// Finish line
    pub const FINISH_LINE_START_Z: f32 = -2500.0;
    pub const FINISH_LINE_PER_LEVEL: f32 = 300.0;
    /// Forward progress between checkpoints
    pub const CHECKPOINT_SPACING: f32 = 200.0;
}

/// One of the three fixed track lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    /// World x-offset of the lane
    pub fn x(self) -> f32 {
        match self {
            Lane::Left => -80.0,
            Lane::Center => 0.0,
            Lane::Right => 80.0,
        }
    }

    /// Lane one step to the left (saturates at the edge)
    pub fn left(self) -> Self {
        match self {
            Lane::Right => Lane::Center,
            _ => Lane::Left,
        }
    }

    /// Lane one step to the right (saturates at the edge)
    pub fn right(self) -> Self {
        match self {
            Lane::Left => Lane::Center,
            _ => Lane::Right,
        }
    }

    /// Lane whose x-offset is closest to `x`
    pub fn nearest(x: f32) -> Self {
        Self::ALL
            .into_iter()
            .min_by(|a, b| (a.x() - x).abs().total_cmp(&(b.x() - x).abs()))
            .unwrap_or_default()
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// Palette entry. Equality is by value, so two entries with the same RGB
/// always compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Orange,
    Pink,
    Blue,
}

impl Color {
    pub const PALETTE: [Color; 3] = [Color::Orange, Color::Pink, Color::Blue];

    /// RGB triple for rendering
    pub fn rgb(self) -> [f32; 3] {
        match self {
            Color::Orange => [1.0, 0.4, 0.0],
            Color::Pink => [1.0, 0.0, 0.8],
            Color::Blue => [0.3, 0.4, 1.0],
        }
    }

    /// Palette lookup; `None` for out-of-range indices
    pub fn from_index(index: usize) -> Option<Self> {
        Self::PALETTE.get(index).copied()
    }

    /// Uniformly random palette color
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::PALETTE[rng.random_range(0..Self::PALETTE.len())]
    }

    /// Random palette color guaranteed to differ from `excluded`
    pub fn random_except<R: Rng + ?Sized>(rng: &mut R, excluded: Color) -> Self {
        let mut available = [excluded; 2];
        let mut count = 0;
        for color in Self::PALETTE {
            if color != excluded && count < available.len() {
                available[count] = color;
                count += 1;
            }
        }
        available[rng.random_range(0..count.max(1))]
    }
}
