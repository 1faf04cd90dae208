//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, driven by caller-supplied frame time
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod camera;
pub mod collision;
pub mod input;
pub mod spawn;
pub mod state;
pub mod tick;

pub use camera::{CameraMode, CameraState, ViewTransform, view_transform};
pub use collision::{Contact, overlaps};
pub use input::{Intent, handle_intent};
pub use spawn::spawn_hazards;
pub use state::{
    Collectible, GameEvent, GamePhase, GameState, Hazard, HazardClass, HazardKind, JumpPhase,
    Player, SizeShift, SpeedShift, Wall,
};
pub use tick::{TickInput, step, tick};
