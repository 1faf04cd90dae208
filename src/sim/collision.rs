//! Collision detection and response
//!
//! Every test is an axis-aligned proximity check between the player centre
//! and the entity centre. Each entity class then applies its own effect.

use glam::Vec3;

use super::state::{GameEvent, GameState, HazardKind, SizeShift, SpeedShift};
use crate::consts::*;

/// Proximity thresholds for collectible balls
pub const COLLECTIBLE_EXTENTS: Vec3 = Vec3::splat(40.0);

/// Result of the player touching a collectible
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Colors matched, ball recycled
    Collected,
    /// Colors differed, a life was taken and the ball recycled
    Penalized,
    /// Colors differed while invincible (or already out of lives); ball untouched
    Ignored,
}

/// `|Δx| < e.x && |Δy| < e.y && |Δz| < e.z`
#[inline]
pub fn overlaps(a: Vec3, b: Vec3, extents: Vec3) -> bool {
    let d = (a - b).abs();
    d.x < extents.x && d.y < extents.y && d.z < extents.z
}

/// Apply a hazard/pickup effect to the player or the run
pub fn apply_hazard(state: &mut GameState, kind: HazardKind) {
    match kind {
        HazardKind::ColorBarrier(color) => {
            state.player.color = color;
            state.events.push(GameEvent::ColorChanged { color });
        }
        HazardKind::SpeedCube(shift) => {
            let delta = match shift {
                SpeedShift::Up => SPEED_CUBE_STEP,
                SpeedShift::Down => -SPEED_CUBE_STEP,
            };
            let multiplier = state.adjust_speed(delta);
            log::debug!("Speed cube {:?}: multiplier now {:.1}", shift, multiplier);
            state.events.push(GameEvent::SpeedChanged { multiplier });
        }
        HazardKind::SizePlatform(shift) => {
            let delta = match shift {
                SizeShift::Grow => SIZE_CHANGE_AMOUNT,
                SizeShift::Shrink => -SIZE_CHANGE_AMOUNT,
            };
            let radius = state.player.resize(delta);
            log::debug!("Size platform {:?}: radius now {}", shift, radius);
            state.events.push(GameEvent::SizeChanged { radius });
        }
    }
}

/// Test every live hazard against the player, consuming the ones hit.
/// Consumed hazards stay in the list (inactive) until compaction.
pub fn resolve_hazards(state: &mut GameState) {
    for i in 0..state.hazards.len() {
        let hazard = &mut state.hazards[i];
        if !hazard.active || !overlaps(state.player.pos, hazard.pos, hazard.class().extents()) {
            continue;
        }
        hazard.active = false;
        let kind = hazard.kind;
        apply_hazard(state, kind);
    }
}

/// Resolve contact between the player and the collectible at `index`
pub fn collectible_contact(state: &mut GameState, index: usize) -> Contact {
    let Some(ball) = state.collectibles.get(index) else {
        return Contact::Ignored;
    };

    if ball.color == state.player.color {
        state.score += 1;
        state.events.push(GameEvent::Collected { score: state.score });
        if state.score.is_multiple_of(SPEED_INCREASE_THRESHOLD) {
            let multiplier = state.adjust_speed(SPEED_INCREASE_STEP);
            log::debug!("Score {}: speed up to {:.1}x", state.score, multiplier);
            state.events.push(GameEvent::SpeedChanged { multiplier });
        }
        state.collectibles[index].recycle(&mut state.rng);
        return Contact::Collected;
    }

    if state.player.invincible || state.player.lives == 0 {
        return Contact::Ignored;
    }

    state.player.lives -= 1;
    state.events.push(GameEvent::LifeLost {
        lives: state.player.lives,
    });
    if state.player.lives > 0 {
        state.player.respawn(state.time_secs);
        log::info!("Life lost, {} remaining", state.player.lives);
    }
    state.collectibles[index].recycle(&mut state.rng);
    Contact::Penalized
}

/// Test every collectible against the player. Returns true if the player
/// ran out of lives during this pass.
pub fn resolve_collectibles(state: &mut GameState) -> bool {
    let lives_before = state.player.lives;
    for i in 0..state.collectibles.len() {
        if overlaps(state.player.pos, state.collectibles[i].pos, COLLECTIBLE_EXTENTS) {
            collectible_contact(state, i);
        }
        // Off-screen balls come back around
        if state.collectibles[i].pos.z > DESPAWN_Z {
            state.collectibles[i].recycle(&mut state.rng);
        }
    }
    lives_before > 0 && state.player.lives == 0
}
