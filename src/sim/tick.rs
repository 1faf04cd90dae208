//! Fixed timestep simulation tick
//!
//! `tick` feeds caller-supplied frame time into an accumulator and runs
//! `step` once per elapsed interval. The interval shrinks as the speed
//! multiplier grows.

use super::collision::{resolve_collectibles, resolve_hazards};
use super::input::{Intent, handle_intent};
use super::spawn::spawn_hazards;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::{Color, Lane};

/// How far ahead the idle autopilot looks for balls
const AUTOPILOT_LOOKAHEAD: f32 = 300.0;

/// Input for a single `tick` call (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Intents queued since the last call, applied in order before stepping
    pub intents: Vec<Intent>,
    /// Idle/demo mode - autopilot picks lanes
    pub idle_mode: bool,
}

impl TickInput {
    pub fn with_intent(intent: Intent) -> Self {
        Self {
            intents: vec![intent],
            ..Default::default()
        }
    }
}

/// Apply queued intents, then advance by however many fixed steps `dt`
/// covers. Returns the number of steps applied.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> u32 {
    state.events.clear();

    for &intent in &input.intents {
        handle_intent(state, intent);
    }

    // Don't accumulate while paused or on an overlay screen
    if state.phase != GamePhase::Running {
        state.accumulator = 0.0;
        return 0;
    }

    state.accumulator += dt.max(0.0);

    let mut substeps = 0;
    while state.phase == GamePhase::Running && substeps < MAX_SUBSTEPS {
        let interval = state.tick_interval();
        if state.accumulator < interval {
            break;
        }

        if input.idle_mode {
            if let Some(intent) = idle_intent(state) {
                handle_intent(state, intent);
            }
        }

        step(state);
        state.accumulator -= interval;
        substeps += 1;
    }

    // Drop whatever backlog the substep cap couldn't consume
    if state.phase != GamePhase::Running || substeps == MAX_SUBSTEPS {
        state.accumulator = 0.0;
    }
    substeps
}

/// One fixed simulation step. No-op unless running.
pub fn step(state: &mut GameState) {
    if state.phase != GamePhase::Running {
        return;
    }

    state.time_ticks += 1;
    state.time_secs += state.tick_interval();
    let now = state.time_secs;

    // Invincibility window
    let player = &mut state.player;
    if player.invincible && now - player.invincible_since >= INVINCIBILITY_SECS {
        player.invincible = false;
        log::debug!("Invincibility expired");
    }

    player.advance_lateral();
    player.advance_jump();

    // World scroll
    state.road_offset += ROAD_SCROLL;
    if state.wall.active {
        state.wall.z += WORLD_SPEED;
    }
    state.finish_line_z += FINISH_LINE_SCROLL;
    state.player.roll = (state.player.roll + ROLL_STEP) % 360.0;

    // Checkpoint every CHECKPOINT_SPACING of forward progress
    let before = (state.level_progress / CHECKPOINT_SPACING).floor();
    state.level_progress += FINISH_LINE_SCROLL;
    if (state.level_progress / CHECKPOINT_SPACING).floor() > before {
        let mut checkpoint = state.player.pos;
        checkpoint.y = 0.0;
        state.player.checkpoint = checkpoint;
        log::debug!("Checkpoint at x={}", checkpoint.x);
    }

    spawn_hazards(state);

    // Hazards: move, collide, compact
    for hazard in &mut state.hazards {
        hazard.pos.z += WORLD_SPEED;
    }
    resolve_hazards(state);
    state
        .hazards
        .retain(|h| h.active && h.pos.z <= DESPAWN_Z);

    // Balls: move, collide, recycle
    for ball in &mut state.collectibles {
        ball.pos.z += WORLD_SPEED;
    }
    let lives_exhausted = resolve_collectibles(state);

    // Wall reached the player: repaint and send it back
    if state.wall.active && state.wall.z >= 0.0 {
        let color = state.wall.color;
        state.player.color = color;
        state.events.push(GameEvent::ColorChanged { color });
        state.wall.z = WALL_REST_Z;
        state.wall.active = false;
        state.wall.color = Color::random_except(&mut state.rng, color);
    }

    // Re-arm the wall on score milestones
    if state.score > 0 && state.score.is_multiple_of(WALL_SCORE_INTERVAL) && state.wall.at_rest() {
        state.wall.active = true;
        state.events.push(GameEvent::WallArmed);
        log::debug!("Wall armed at score {}", state.score);
    }

    // Game over takes priority over the finish line
    if lives_exhausted {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver { score: state.score });
        log::info!("Game over: score {}, level {}", state.score, state.level);
    } else if state.finish_line_z >= 0.0 {
        state.phase = GamePhase::LevelComplete;
        state.level += 1;
        state.events.push(GameEvent::LevelComplete { level: state.level });
        log::info!("Level {} complete (score {})", state.level - 1, state.score);
    }
}

/// Autopilot: chase the nearest matching ball, sidestep the nearest
/// mismatching one. Waits until the current lane change finishes.
fn idle_intent(state: &GameState) -> Option<Intent> {
    let player = &state.player;
    let current = player.target_lane;
    if player.pos.x != current.x() {
        return None;
    }

    let ball = state
        .collectibles
        .iter()
        .filter(|b| b.pos.z < player.pos.z && player.pos.z - b.pos.z < AUTOPILOT_LOOKAHEAD)
        .filter(|b| b.color == player.color || !player.invincible)
        .max_by(|a, b| a.pos.z.total_cmp(&b.pos.z))?;

    let ball_lane = Lane::nearest(ball.pos.x);
    let desired = if ball.color == player.color {
        ball_lane
    } else if ball_lane == current {
        match current {
            Lane::Center if state.time_ticks.is_multiple_of(2) => Lane::Left,
            Lane::Center => Lane::Right,
            _ => Lane::Center,
        }
    } else {
        current
    };

    if desired.x() < current.x() {
        Some(Intent::MoveLeft)
    } else if desired.x() > current.x() {
        Some(Intent::MoveRight)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Collectible, HazardClass};
    use glam::Vec3;
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(seed);
        tick(&mut state, &TickInput::with_intent(Intent::Continue), 0.0);
        assert_eq!(state.phase, GamePhase::Running);
        state
    }

    /// Observable gameplay values (excludes RNG/accumulator internals)
    fn snapshot(state: &GameState) -> String {
        serde_json::to_string(&(
            state.phase,
            state.score,
            state.level,
            state.speed_multiplier,
            &state.player,
            &state.collectibles,
            &state.hazards,
            &state.wall,
            state.finish_line_z,
        ))
        .unwrap()
    }

    #[test]
    fn test_tick_start_to_running() {
        let mut state = GameState::new(12345);
        assert_eq!(tick(&mut state, &TickInput::default(), 1.0), 0);
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.time_ticks, 0);

        tick(&mut state, &TickInput::with_intent(Intent::Continue), 0.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(tick(&mut state, &TickInput::default(), BASE_TICK_INTERVAL), 1);
    }

    #[test]
    fn test_tick_within_interval_is_noop() {
        let mut state = running(7);
        assert_eq!(tick(&mut state, &TickInput::default(), BASE_TICK_INTERVAL), 1);
        let before = snapshot(&state);
        assert_eq!(tick(&mut state, &TickInput::default(), BASE_TICK_INTERVAL * 0.5), 0);
        assert_eq!(snapshot(&state), before);
    }

    #[test]
    fn test_substeps_are_capped() {
        let mut state = running(7);
        let steps = tick(&mut state, &TickInput::default(), 10.0);
        assert_eq!(steps, MAX_SUBSTEPS);
        // Backlog was dropped
        assert_eq!(tick(&mut state, &TickInput::default(), 0.0), 0);
    }

    #[test]
    fn test_faster_speed_shortens_interval() {
        let mut state = running(7);
        state.speed_multiplier = 2.0;
        assert_eq!(tick(&mut state, &TickInput::default(), BASE_TICK_INTERVAL), 2);
    }

    #[test]
    fn test_tick_pause() {
        let mut state = running(12345);
        tick(&mut state, &TickInput::with_intent(Intent::Pause), BASE_TICK_INTERVAL);
        assert_eq!(state.phase, GamePhase::Paused);
        let before = snapshot(&state);
        for _ in 0..10 {
            assert_eq!(tick(&mut state, &TickInput::default(), 1.0), 0);
        }
        assert_eq!(snapshot(&state), before);

        tick(&mut state, &TickInput::with_intent(Intent::Continue), 0.0);
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_matching_ball_scenario() {
        let mut state = running(31);
        assert_eq!(state.player.color, Color::Orange);
        state.collectibles[0].color = Color::Orange;
        state.collectibles[0].pos = state.player.pos - Vec3::Z * WORLD_SPEED;

        step(&mut state);
        assert_eq!(state.score, 1);
        let ball = &state.collectibles[0];
        assert_eq!(ball.pos.z, COLLECTIBLE_SPAWN_Z);
        assert!(Lane::ALL.iter().any(|l| l.x() == ball.pos.x));
        assert!(state.events.contains(&GameEvent::Collected { score: 1 }));
    }

    #[test]
    fn test_game_over_beats_finish_line() {
        let mut state = running(99);
        state.player.lives = 1;
        state.finish_line_z = -FINISH_LINE_SCROLL;
        state.collectibles[0].color = Color::Blue;
        state.collectibles[0].pos = state.player.pos - Vec3::Z * WORLD_SPEED;

        step(&mut state);
        assert_eq!(state.player.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.level, 1);
        let game_overs = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_finish_line_completes_level() {
        let mut state = running(5);
        state.score = 12;
        state.finish_line_z = -FINISH_LINE_SCROLL;

        step(&mut state);
        assert_eq!(state.phase, GamePhase::LevelComplete);
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 12);

        // Frozen until continue
        let before = snapshot(&state);
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(snapshot(&state), before);
    }

    #[test]
    fn test_wall_arms_on_fifteen() {
        let mut state = running(3);
        state.score = 15;
        assert!(!state.wall.active);

        step(&mut state);
        assert!(state.wall.active);
        assert_eq!(state.wall.z, WALL_REST_Z);
        assert!(state.events.contains(&GameEvent::WallArmed));
    }

    #[test]
    fn test_wall_repaints_player() {
        let mut state = running(3);
        state.wall.active = true;
        state.wall.color = Color::Pink;
        state.wall.z = -WORLD_SPEED;

        step(&mut state);
        assert_eq!(state.player.color, Color::Pink);
        assert!(!state.wall.active);
        assert_eq!(state.wall.z, WALL_REST_Z);
        assert_ne!(state.wall.color, Color::Pink);
    }

    #[test]
    fn test_invincibility_expires() {
        let mut state = running(8);
        state.player.invincible = true;
        state.player.invincible_since = state.time_secs;

        for _ in 0..45 {
            step(&mut state);
        }
        assert!(state.player.invincible);
        for _ in 0..8 {
            step(&mut state);
        }
        assert!(!state.player.invincible);
    }

    #[test]
    fn test_checkpoint_follows_player() {
        let mut state = running(8);
        handle_intent(&mut state, Intent::MoveRight);
        let ticks = (CHECKPOINT_SPACING / FINISH_LINE_SCROLL) as usize;
        for _ in 0..ticks {
            step(&mut state);
        }
        assert_eq!(state.player.checkpoint.x, Lane::Right.x());
    }

    #[test]
    fn test_hazards_despawn_behind_camera() {
        let mut state = running(8);
        let id = state.next_entity_id();
        let mut cube = crate::sim::spawn::make_hazard(
            HazardClass::SpeedCube,
            id,
            Color::Orange,
            &mut state.rng,
        );
        // Off to the side so the player never touches it
        cube.pos = Vec3::new(Lane::Left.x(), FLOOR_Y, DESPAWN_Z - 5.0);
        state.hazards.push(cube);

        step(&mut state);
        assert!(state.hazards.iter().all(|h| h.id != id));
    }

    #[test]
    fn test_reset_round_trip() {
        let fresh = running(77);
        let mut state = running(77);
        state.phase = GamePhase::GameOver;
        state.score = 33;
        state.level = 3;
        state.player.lives = 0;
        state.speed_multiplier = 1.6;
        let id = state.next_entity_id();
        state.collectibles.push(Collectible::new(id, Lane::Left, Color::Blue));

        for _ in 0..20 {
            tick(&mut state, &TickInput::default(), 0.1);
        }
        assert_eq!(state.score, 33);

        tick(&mut state, &TickInput::with_intent(Intent::Continue), 0.0);
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.score, fresh.score);
        assert_eq!(state.level, fresh.level);
        assert_eq!(state.player.lives, fresh.player.lives);
        assert_eq!(state.speed_multiplier, fresh.speed_multiplier);
        assert_eq!(state.collectibles.len(), 1);
        assert_eq!(state.collectibles[0].pos, fresh.collectibles[0].pos);
        assert_eq!(state.collectibles[0].color, fresh.collectibles[0].color);
        assert!(state.hazards.is_empty());
    }

    #[test]
    fn test_determinism() {
        let mut state1 = running(99999);
        let mut state2 = running(99999);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        for i in 0..2000 {
            let dt = 0.016 + (i % 3) as f32 * 0.004;
            tick(&mut state1, &input, dt);
            tick(&mut state2, &input, dt);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(snapshot(&state1), snapshot(&state2));
    }

    #[test]
    fn test_idle_mode_dodges_mismatch() {
        let mut state = running(4);
        state.collectibles[0].color = Color::Blue;
        state.collectibles[0].pos = Vec3::new(0.0, 0.0, -100.0);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        tick(&mut state, &input, BASE_TICK_INTERVAL);
        assert_ne!(state.player.target_lane, Lane::Center);
    }

    fn intent_from(code: u8) -> Intent {
        match code {
            0 => Intent::MoveLeft,
            1 => Intent::MoveRight,
            2 => Intent::Jump,
            3 => Intent::Pause,
            4 => Intent::Continue,
            5 => Intent::CycleCamera,
            _ => Intent::AdjustCamera {
                height_delta: 10.0,
                rotation_delta: 5.0,
            },
        }
    }

    proptest! {
        #[test]
        fn prop_bounds_hold(
            seed in any::<u64>(),
            frames in prop::collection::vec((proptest::option::of(0u8..7), 0.0f32..0.2), 1..300),
        ) {
            let mut state = running(seed);
            for (code, dt) in frames {
                let input = TickInput {
                    intents: code.map(intent_from).into_iter().collect(),
                    idle_mode: true,
                };
                tick(&mut state, &input, dt);

                prop_assert!(state.player.radius >= MIN_BALL_RADIUS);
                prop_assert!(state.player.radius <= MAX_BALL_RADIUS);
                prop_assert!(state.speed_multiplier >= MIN_SPEED_MULTIPLIER);
                prop_assert!(state.speed_multiplier <= MAX_SPEED_MULTIPLIER);
                prop_assert!(state.player.lives <= PLAYER_LIVES);
                prop_assert!(state.level >= 1);
                for class in HazardClass::ALL {
                    prop_assert!(state.hazard_count(class) <= class.cap());
                }
                if state.player.lives == 0 {
                    prop_assert_eq!(state.phase, GamePhase::GameOver);
                }
            }
        }

        #[test]
        fn prop_non_running_is_frozen(
            seed in any::<u64>(),
            phase in prop::sample::select(vec![
                GamePhase::Start,
                GamePhase::Paused,
                GamePhase::LevelComplete,
                GamePhase::GameOver,
            ]),
            dts in prop::collection::vec(0.0f32..1.0, 1..50),
        ) {
            let mut state = running(seed);
            for _ in 0..30 {
                step(&mut state);
            }
            state.phase = phase;
            let before = snapshot(&state);
            for dt in dts {
                prop_assert_eq!(tick(&mut state, &TickInput::default(), dt), 0);
            }
            prop_assert_eq!(snapshot(&state), before);
        }
    }
}
