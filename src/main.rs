//! Rocket Road entry point
//!
//! Headless native driver: feeds simulated frame time into the fixed-step
//! core, logs gameplay events and dumps the final state as JSON. Drawing is
//! left to an external front end.

use rocket_road::Settings;
use rocket_road::sim::{GameEvent, GamePhase, GameState, Intent, TickInput, tick, view_transform};

/// How often (simulated seconds) the demo switches camera
const CAMERA_CYCLE_SECS: f32 = 10.0;

/// Game instance holding all state
struct Game {
    state: GameState,
    input: TickInput,
    settings: Settings,
    last_phase: GamePhase,
    elapsed: f32,
    next_camera_switch: f32,
}

impl Game {
    fn new(settings: Settings, seed: u64) -> Self {
        let mut state = GameState::new(seed);
        state.camera = settings.camera_state();
        Self {
            last_phase: state.phase,
            state,
            input: TickInput {
                idle_mode: settings.idle_mode,
                ..Default::default()
            },
            settings,
            elapsed: 0.0,
            next_camera_switch: CAMERA_CYCLE_SECS,
        }
    }

    fn queue(&mut self, intent: Intent) {
        self.input.intents.push(intent);
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        self.elapsed += dt;
        if self.elapsed >= self.next_camera_switch {
            self.next_camera_switch += CAMERA_CYCLE_SECS;
            self.queue(Intent::CycleCamera);
            self.queue(Intent::AdjustCamera {
                height_delta: self.settings.camera_height_step,
                rotation_delta: self.settings.camera_rotation_step,
            });
        }

        tick(&mut self.state, &self.input, dt);
        // One-shot intents are consumed by the tick
        self.input.intents.clear();

        for event in &self.state.events {
            match event {
                GameEvent::LifeLost { lives } => log::info!("Ouch! {} lives left", lives),
                GameEvent::WallArmed => log::info!("Color wall incoming"),
                GameEvent::Collected { score } if score % 5 == 0 => {
                    log::info!("Score {}", score)
                }
                other => log::trace!("{:?}", other),
            }
        }

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, phase);
            self.last_phase = phase;
            if self.settings.auto_continue
                && matches!(phase, GamePhase::LevelComplete | GamePhase::GameOver)
            {
                self.queue(Intent::Continue);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Rocket Road (headless) starting...");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or_else(|| {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });
    log::info!("Seed: {}", seed);

    let dt = settings.frame_dt();
    let frames = (settings.demo_seconds / dt).ceil() as u64;
    let mut game = Game::new(settings, seed);
    game.queue(Intent::Continue);

    for _ in 0..frames {
        game.update(dt);
    }

    let view = view_transform(&game.state.camera, &game.state.player);
    log::info!(
        "Finished: score {}, level {}, lives {}, {} ticks, camera {} at {:?}",
        game.state.score,
        game.state.level,
        game.state.player.lives,
        game.state.time_ticks,
        game.state.camera.mode.as_str(),
        view.eye
    );

    match serde_json::to_string_pretty(&game.state) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final state: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No native driver on the web; a front end drives `sim::tick` directly
}
