//! Game state and core simulation types
//!
//! Everything the update engine mutates lives on [`GameState`]. Renderers and
//! input sources only ever see it by shared reference.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::camera::CameraState;
use crate::consts::*;
use crate::{Color, Lane};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first continue
    Start,
    /// Active gameplay
    Running,
    /// Game is paused
    Paused,
    /// Finish line crossed, waiting for continue
    LevelComplete,
    /// Lives exhausted
    GameOver,
}

/// Jump sub-machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Rising,
    Falling,
}

/// The player-controlled sphere
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// x = lane offset, y = jump height, z = track position
    pub pos: Vec3,
    pub target_lane: Lane,
    pub color: Color,
    pub radius: f32,
    /// Cosmetic roll angle (degrees)
    pub roll: f32,
    pub jump: JumpPhase,
    pub jump_height: f32,
    pub lives: u8,
    pub invincible: bool,
    /// Simulation time the invincibility window started
    pub invincible_since: f32,
    /// Last safe position, used for respawn
    pub checkpoint: Vec3,
}

impl Default for Player {
    fn default() -> Self {
        let spawn = Vec3::new(Lane::Center.x(), 0.0, PLAYER_SPAWN_Z);
        Self {
            pos: spawn,
            target_lane: Lane::Center,
            color: Color::Orange,
            radius: PLAYER_RADIUS,
            roll: 0.0,
            jump: JumpPhase::Grounded,
            jump_height: 0.0,
            lives: PLAYER_LIVES,
            invincible: false,
            invincible_since: 0.0,
            checkpoint: spawn,
        }
    }
}

impl Player {
    pub fn is_grounded(&self) -> bool {
        self.jump == JumpPhase::Grounded
    }

    /// Begin a jump. Ignored unless grounded.
    pub fn start_jump(&mut self) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.jump = JumpPhase::Rising;
        true
    }

    /// Step x toward the target lane without overshooting
    pub fn advance_lateral(&mut self) {
        let target = self.target_lane.x();
        let delta = (target - self.pos.x).clamp(-LANE_STEP, LANE_STEP);
        self.pos.x += delta;
    }

    /// Advance the jump sub-machine by one tick
    pub fn advance_jump(&mut self) {
        match self.jump {
            JumpPhase::Grounded => {}
            JumpPhase::Rising => {
                self.jump_height += JUMP_STEP;
                if self.jump_height >= MAX_JUMP_HEIGHT {
                    self.jump = JumpPhase::Falling;
                }
            }
            JumpPhase::Falling => {
                self.jump_height -= JUMP_STEP;
                if self.jump_height <= 0.0 {
                    self.jump_height = 0.0;
                    self.jump = JumpPhase::Grounded;
                }
            }
        }
        self.pos.y = self.jump_height;
    }

    /// Return to the checkpoint with a fresh invincibility window
    pub fn respawn(&mut self, now: f32) {
        self.pos = self.checkpoint;
        self.pos.y = 0.0;
        self.target_lane = Lane::nearest(self.checkpoint.x);
        self.jump = JumpPhase::Grounded;
        self.jump_height = 0.0;
        self.invincible = true;
        self.invincible_since = now;
    }

    /// Adjust radius, clamped to the allowed range. Returns the new radius.
    pub fn resize(&mut self, delta: f32) -> f32 {
        self.radius = (self.radius + delta).clamp(MIN_BALL_RADIUS, MAX_BALL_RADIUS);
        self.radius
    }
}

/// A colored ball the player scores by matching
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    pub pos: Vec3,
    pub radius: f32,
    pub color: Color,
}

impl Collectible {
    pub fn new(id: u32, lane: Lane, color: Color) -> Self {
        Self {
            id,
            pos: Vec3::new(lane.x(), 0.0, COLLECTIBLE_SPAWN_Z),
            radius: COLLECTIBLE_RADIUS,
            color,
        }
    }

    /// Send the ball back to spawn depth in a random lane with a random color
    pub fn recycle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pos = Vec3::new(Lane::random(rng).x(), 0.0, COLLECTIBLE_SPAWN_Z);
        self.color = Color::random(rng);
    }
}

/// Speed cube variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpeedShift {
    Up,
    Down,
}

/// Size platform variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeShift {
    Grow,
    Shrink,
}

/// Effect carried by a transient hazard/pickup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HazardKind {
    /// Full-width barrier that repaints the player
    ColorBarrier(Color),
    SpeedCube(SpeedShift),
    SizePlatform(SizeShift),
}

/// Population class used for spawn caps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardClass {
    ColorBarrier,
    SpeedCube,
    SizePlatform,
}

impl HazardClass {
    pub const ALL: [HazardClass; 3] = [
        HazardClass::SizePlatform,
        HazardClass::SpeedCube,
        HazardClass::ColorBarrier,
    ];

    /// Per-tick spawn probability
    pub fn spawn_chance(self) -> f64 {
        match self {
            HazardClass::ColorBarrier => 0.01,
            HazardClass::SpeedCube => 0.02,
            HazardClass::SizePlatform => 0.02,
        }
    }

    /// Maximum live instances
    pub fn cap(self) -> usize {
        match self {
            HazardClass::ColorBarrier => 3,
            HazardClass::SpeedCube => 2,
            HazardClass::SizePlatform => 2,
        }
    }

    /// Proximity thresholds (x, y, z). Floor items and the barrier are hit
    /// regardless of jump height.
    pub fn extents(self) -> Vec3 {
        match self {
            HazardClass::ColorBarrier => Vec3::new(BARRIER_WIDTH / 2.0, f32::INFINITY, 30.0),
            HazardClass::SpeedCube | HazardClass::SizePlatform => {
                Vec3::new(30.0, f32::INFINITY, 30.0)
            }
        }
    }
}

/// A transient hazard or pickup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hazard {
    pub id: u32,
    pub kind: HazardKind,
    pub pos: Vec3,
    /// Cleared on collision; inactive hazards are compacted away
    pub active: bool,
}

impl Hazard {
    pub fn class(&self) -> HazardClass {
        match self.kind {
            HazardKind::ColorBarrier(_) => HazardClass::ColorBarrier,
            HazardKind::SpeedCube(_) => HazardClass::SpeedCube,
            HazardKind::SizePlatform(_) => HazardClass::SizePlatform,
        }
    }

    /// Render radius for size platforms (0 for other kinds)
    pub fn display_radius(&self) -> f32 {
        match self.kind {
            HazardKind::SizePlatform(SizeShift::Grow) => MAX_PLATFORM_RADIUS,
            HazardKind::SizePlatform(SizeShift::Shrink) => MIN_PLATFORM_RADIUS,
            _ => 0.0,
        }
    }

    /// RGB for rendering
    pub fn rgb(&self) -> [f32; 3] {
        match self.kind {
            HazardKind::ColorBarrier(color) => color.rgb(),
            HazardKind::SpeedCube(SpeedShift::Up) => [1.0, 0.0, 0.0],
            HazardKind::SpeedCube(SpeedShift::Down) => [0.0, 0.0, 1.0],
            HazardKind::SizePlatform(SizeShift::Grow) => [0.0, 1.0, 0.0],
            HazardKind::SizePlatform(SizeShift::Shrink) => [1.0, 0.0, 0.0],
        }
    }
}

/// The singleton color wall
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wall {
    pub z: f32,
    pub active: bool,
    pub color: Color,
}

impl Default for Wall {
    fn default() -> Self {
        Self {
            z: WALL_REST_Z,
            active: false,
            color: Color::Blue,
        }
    }
}

impl Wall {
    /// Back at rest depth and ready to be armed
    pub fn at_rest(&self) -> bool {
        !self.active && self.z <= WALL_REST_Z + WALL_REARM_SLACK
    }
}

/// Things that happened during a tick, for audio/visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Collected { score: u64 },
    LifeLost { lives: u8 },
    ColorChanged { color: Color },
    SpeedChanged { multiplier: f32 },
    SizeChanged { radius: f32 },
    HazardSpawned { id: u32, kind: HazardKind },
    WallArmed,
    LevelComplete { level: u32 },
    GameOver { score: u64 },
}

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    #[serde(skip)]
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub score: u64,
    /// Current level (1-based)
    pub level: u32,
    pub speed_multiplier: f32,
    /// Applied fixed ticks
    pub time_ticks: u64,
    /// Simulation clock in seconds (sum of applied intervals)
    pub time_secs: f32,
    /// Unconsumed frame time
    pub accumulator: f32,
    /// Road marking scroll
    pub road_offset: f32,
    pub finish_line_z: f32,
    /// Finish-line distance covered this level (drives checkpoints)
    pub level_progress: f32,
    pub player: Player,
    /// Ball pool (sorted by id)
    pub collectibles: Vec<Collectible>,
    /// Live hazards/pickups (sorted by id)
    pub hazards: Vec<Hazard>,
    pub wall: Wall,
    pub camera: CameraState,
    /// Events from the most recent `tick` call
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the start screen
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            level: 1,
            speed_multiplier: 1.0,
            time_ticks: 0,
            time_secs: 0.0,
            accumulator: 0.0,
            road_offset: 0.0,
            finish_line_z: FINISH_LINE_START_Z,
            level_progress: 0.0,
            player: Player::default(),
            collectibles: Vec::new(),
            hazards: Vec::new(),
            wall: Wall::default(),
            camera: CameraState::default(),
            events: Vec::new(),
            next_id: 1,
        };
        state.reset_world();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Seconds per fixed tick at the current speed
    pub fn tick_interval(&self) -> f32 {
        BASE_TICK_INTERVAL / self.speed_multiplier.max(MIN_SPEED_MULTIPLIER)
    }

    /// Adjust the speed multiplier, clamped to its bounds. Returns the new value.
    pub fn adjust_speed(&mut self, delta: f32) -> f32 {
        self.speed_multiplier =
            (self.speed_multiplier + delta).clamp(MIN_SPEED_MULTIPLIER, MAX_SPEED_MULTIPLIER);
        self.speed_multiplier
    }

    /// Live hazards of one class
    pub fn hazard_count(&self, class: HazardClass) -> usize {
        self.hazards.iter().filter(|h| h.class() == class).count()
    }

    /// Full restart: score, level, lives, speed and entity pools
    pub fn reset(&mut self) {
        self.reset_world();
        self.phase = GamePhase::Running;
        log::info!("New run started (seed {})", self.seed);
    }

    /// Re-arm the track for the next level, keeping score and level
    pub fn setup_next_level(&mut self) {
        self.wall.z = WALL_REST_Z;
        self.wall.active = false;
        self.finish_line_z = FINISH_LINE_START_Z - self.level as f32 * FINISH_LINE_PER_LEVEL;
        self.level_progress = 0.0;
        self.road_offset = 0.0;
        self.player.roll = 0.0;
        let spawn = Vec3::new(Lane::Center.x(), 0.0, PLAYER_SPAWN_Z);
        self.player.checkpoint = spawn;
        self.hazards.clear();

        // One more ball per level for difficulty
        if self.collectibles.len() < MAX_COLLECTIBLES {
            let id = self.next_entity_id();
            let lane = Lane::random(&mut self.rng);
            let color = Color::random(&mut self.rng);
            self.collectibles.push(Collectible::new(id, lane, color));
        }

        self.accumulator = 0.0;
        self.phase = GamePhase::Running;
        log::info!(
            "Level {} started: finish line at {}, {} balls",
            self.level,
            self.finish_line_z,
            self.collectibles.len()
        );
    }

    fn reset_world(&mut self) {
        self.score = 0;
        self.level = 1;
        self.speed_multiplier = 1.0;
        self.accumulator = 0.0;
        self.road_offset = 0.0;
        self.finish_line_z = FINISH_LINE_START_Z;
        self.level_progress = 0.0;
        self.player = Player::default();
        self.wall = Wall::default();
        self.hazards.clear();
        self.collectibles.clear();
        let id = self.next_entity_id();
        self.collectibles
            .push(Collectible::new(id, Lane::Center, Color::Orange));
    }
}
