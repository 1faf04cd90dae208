//! Probabilistic hazard/pickup spawning
//!
//! One Bernoulli trial per class per fixed tick. Frame time never enters into
//! it, so a seeded run always spawns the same things at the same ticks.

use glam::Vec3;
use rand::Rng;

use super::state::{GameEvent, GameState, Hazard, HazardClass, HazardKind, SizeShift, SpeedShift};
use crate::consts::*;
use crate::{Color, Lane};

/// Build a hazard of `class` at spawn depth with a random lane and variant
pub fn make_hazard<R: Rng + ?Sized>(
    class: HazardClass,
    id: u32,
    player_color: Color,
    rng: &mut R,
) -> Hazard {
    let (kind, pos) = match class {
        HazardClass::ColorBarrier => (
            HazardKind::ColorBarrier(Color::random_except(rng, player_color)),
            Vec3::new(0.0, 0.0, HAZARD_SPAWN_Z),
        ),
        HazardClass::SpeedCube => {
            let shift = if rng.random_bool(0.5) {
                SpeedShift::Up
            } else {
                SpeedShift::Down
            };
            let lane = Lane::random(rng);
            (
                HazardKind::SpeedCube(shift),
                Vec3::new(lane.x(), FLOOR_Y, HAZARD_SPAWN_Z),
            )
        }
        HazardClass::SizePlatform => {
            let shift = if rng.random_bool(0.5) {
                SizeShift::Grow
            } else {
                SizeShift::Shrink
            };
            let lane = Lane::random(rng);
            (
                HazardKind::SizePlatform(shift),
                Vec3::new(lane.x(), FLOOR_Y, HAZARD_SPAWN_Z),
            )
        }
    };

    Hazard {
        id,
        kind,
        pos,
        active: true,
    }
}

/// Run this tick's spawn trials. Returns how many hazards were created.
pub fn spawn_hazards(state: &mut GameState) -> usize {
    let mut spawned = 0;
    for class in HazardClass::ALL {
        // Always draw so the RNG stream doesn't depend on population
        let roll: f64 = state.rng.random();
        if roll >= class.spawn_chance() || state.hazard_count(class) >= class.cap() {
            continue;
        }

        let id = state.next_entity_id();
        let hazard = make_hazard(class, id, state.player.color, &mut state.rng);
        log::debug!("Spawned {:?} in lane x={}", hazard.kind, hazard.pos.x);
        state.events.push(GameEvent::HazardSpawned {
            id,
            kind: hazard.kind,
        });
        state.hazards.push(hazard);
        spawned += 1;
    }
    spawned
}
