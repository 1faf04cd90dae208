//! Player intents and the game-phase state machine
//!
//! Transitions that aren't defined for the current phase are silently
//! ignored.

use serde::{Deserialize, Serialize};

use super::state::{GamePhase, GameState};

/// Discrete input event from the input source
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    Jump,
    Pause,
    /// Start / resume / next level / restart, depending on phase
    Continue,
    CycleCamera,
    AdjustCamera { height_delta: f32, rotation_delta: f32 },
}

/// Apply one intent. Returns true if it changed anything.
pub fn handle_intent(state: &mut GameState, intent: Intent) -> bool {
    match intent {
        Intent::Continue => continue_game(state),
        Intent::Pause => pause(state),
        Intent::MoveLeft | Intent::MoveRight | Intent::Jump
            if state.phase != GamePhase::Running =>
        {
            false
        }
        Intent::MoveLeft => {
            let lane = state.player.target_lane.left();
            let changed = lane != state.player.target_lane;
            state.player.target_lane = lane;
            changed
        }
        Intent::MoveRight => {
            let lane = state.player.target_lane.right();
            let changed = lane != state.player.target_lane;
            state.player.target_lane = lane;
            changed
        }
        Intent::Jump => state.player.start_jump(),
        Intent::CycleCamera => {
            if state.phase != GamePhase::Running {
                return false;
            }
            state.camera.cycle();
            log::info!("Camera: {}", state.camera.mode.as_str());
            true
        }
        Intent::AdjustCamera {
            height_delta,
            rotation_delta,
        } => {
            state.camera.adjust(height_delta, rotation_delta);
            true
        }
    }
}

/// Continue: Start/Paused → Running, LevelComplete → next level,
/// GameOver → full reset
fn continue_game(state: &mut GameState) -> bool {
    match state.phase {
        GamePhase::Start | GamePhase::Paused => {
            state.phase = GamePhase::Running;
            state.accumulator = 0.0;
            log::info!("Running (level {})", state.level);
        }
        GamePhase::LevelComplete => state.setup_next_level(),
        GamePhase::GameOver => state.reset(),
        GamePhase::Running => return false,
    }
    true
}

/// Pause is only valid while running
fn pause(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Running {
        return false;
    }
    state.phase = GamePhase::Paused;
    log::info!("Paused");
    true
}
