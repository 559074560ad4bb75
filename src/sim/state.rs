//! Game state and core simulation types
//!
//! One [`World`] holds every entity of a run. Collections are filled once by
//! the stage generator and never grow or shrink; entities only flip state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::stage::{build_stage, generate_stage};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::StageConfig;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Stage generated, waiting for the first tap
    Ready,
    /// Active gameplay
    Playing,
    /// Run ended (goal reached or failed)
    GameOver,
}

/// Why a run ended. Carried as data only; every cause lands in `GameOver`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Player touched the UFO
    GoalReached,
    /// Player dropped below the scroll line
    FellBehind,
    /// Player touched a live enemy
    EnemyHit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Static,
    Moving,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    Normal,
    /// Permanently gone; never collides again
    Vanished,
}

/// A platform the player bounces off
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub pos: Vec2,
    pub kind: StepKind,
    pub state: StepState,
    /// Signed horizontal speed for moving steps (sign = current direction)
    pub vel_x: f32,
}

impl Step {
    pub fn new(kind: StepKind, pos: Vec2, speed: f32) -> Self {
        let vel_x = match kind {
            StepKind::Moving => speed,
            StepKind::Static => 0.0,
        };
        Self {
            pos,
            kind,
            state: StepState::Normal,
            vel_x,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, STEP_WIDTH, STEP_HEIGHT)
    }

    pub fn is_vanished(&self) -> bool {
        self.state == StepState::Vanished
    }

    pub fn vanish(&mut self) {
        self.state = StepState::Vanished;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StarState {
    Present,
    Collected,
}

/// A one-time collectible worth one point
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Star {
    pub pos: Vec2,
    pub state: StarState,
}

impl Star {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            state: StarState::Present,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, STAR_WIDTH, STAR_HEIGHT)
    }

    pub fn is_present(&self) -> bool {
        self.state == StarState::Present
    }

    pub fn collect(&mut self) {
        self.state = StarState::Collected;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Alive,
    /// Transparent and collision-inert, kept in place for stable indices
    Neutralized,
}

/// A hazard orbiting a fixed pivot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub center: Vec2,
    pub radius: f32,
    /// Orbit angle in degrees, grows without bound
    pub angle: f32,
    /// Derived from center, radius and angle
    pub pos: Vec2,
    pub state: EnemyState,
}

impl Enemy {
    pub fn new(center: Vec2, radius: f32, angle: f32) -> Self {
        let mut enemy = Self {
            center,
            radius,
            angle,
            pos: center,
            state: EnemyState::Alive,
        };
        enemy.place();
        enemy
    }

    /// Recompute position from the pivot
    pub fn place(&mut self) {
        let theta = self.angle.to_radians();
        self.pos = self.center + Vec2::new(theta.cos(), theta.sin()) * self.radius;
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    pub fn is_alive(&self) -> bool {
        self.state == EnemyState::Alive
    }

    pub fn neutralize(&mut self) {
        self.state = EnemyState::Neutralized;
    }
}

/// The player's sprite
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Land on something: bounce straight back up
    pub fn hit_step(&mut self, jump_velocity: f32) {
        self.vel.y = jump_velocity;
    }

    pub fn is_rising(&self) -> bool {
        self.vel.y > 0.0
    }
}

/// Goal marker at the top of the stage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ufo {
    pub pos: Vec2,
}

impl Ufo {
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, UFO_WIDTH, UFO_HEIGHT)
    }
}

/// Every entity of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub steps: Vec<Step>,
    pub stars: Vec<Star>,
    pub enemies: Vec<Enemy>,
    pub ufo: Ufo,
    pub player: Player,
}

impl World {
    /// A world with only a player and a goal; entities are pushed by the caller
    pub fn new(player: Player, ufo: Ufo) -> Self {
        Self {
            steps: Vec::new(),
            stars: Vec::new(),
            enemies: Vec::new(),
            ufo,
            player,
        }
    }
}

/// Current and best-ever score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub best: u32,
}

impl Scoreboard {
    pub fn new(best: u32) -> Self {
        Self { score: 0, best }
    }

    /// Add one point; returns true when this sets a new best
    pub fn add_point(&mut self) -> bool {
        self.score += 1;
        if self.score > self.best {
            self.best = self.score;
            true
        } else {
            false
        }
    }
}

/// Final numbers of a run, handed to the result reporter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub score: u32,
    pub best_score: u32,
    pub cause: GameOverCause,
}

/// Side effects produced by one tick, drained by the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ready -> Playing
    Started,
    StarCollected { score: u32 },
    /// Score passed the best-ever score and must be persisted
    NewBest { score: u32 },
    Landed { step: usize },
    StepVanished { step: usize },
    /// Failure collision with an enemy
    EnemyHit { enemy: usize },
    /// Playing -> GameOver
    GameOver { cause: GameOverCause },
    /// GameOver acknowledged by the player
    RunFinished(RunResult),
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: StageConfig,
    /// Random source shared by generation and collision
    pub rng: Pcg32,
    pub world: World,
    pub phase: GamePhase,
    pub scoreboard: Scoreboard,
    /// Highest player y reached this run
    pub height_so_far: f32,
    /// Vertical centre of the camera; only ever moves up
    pub camera_y: f32,
    pub cause: Option<GameOverCause>,
    /// Set once the GameOver screen has been acknowledged
    pub acknowledged: bool,
    /// Events emitted by the last tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Generate a fresh run. Fails if the config is invalid or `rng` is absent.
    pub fn new(
        config: StageConfig,
        rng: Option<Pcg32>,
        best_score: u32,
    ) -> Result<Self, ConfigError> {
        let mut rng = rng;
        let world = generate_stage(&config, rng.as_mut())?;
        let rng = rng.ok_or(ConfigError::MissingRandomSource)?;
        Ok(Self::with_world(config, world, rng, best_score))
    }

    /// Deterministic run for tests and replays
    pub fn with_seed(config: StageConfig, seed: u64, best_score: u32) -> Result<Self, ConfigError> {
        log::info!("Seeding stage with {}", seed);
        Self::new(config, Some(Pcg32::seed_from_u64(seed)), best_score)
    }

    /// Run seeded from OS entropy
    pub fn from_entropy(config: StageConfig, best_score: u32) -> Result<Self, ConfigError> {
        Self::new(config, Some(Pcg32::from_os_rng()), best_score)
    }

    /// Wrap an already built world (no generation)
    pub fn with_world(config: StageConfig, world: World, rng: Pcg32, best_score: u32) -> Self {
        let camera_y = config.camera_height / 2.0;
        let height_so_far = world.player.pos.y;
        Self {
            config,
            rng,
            world,
            phase: GamePhase::Ready,
            scoreboard: Scoreboard::new(best_score),
            height_so_far,
            camera_y,
            cause: None,
            acknowledged: false,
            events: Vec::new(),
        }
    }

    /// Throw the current world away and generate the next run
    pub fn restart(&mut self, best_score: u32) {
        let world = build_stage(&self.config, &mut self.rng);
        let config = self.config.clone();
        let rng = self.rng.clone();
        *self = Self::with_world(config, world, rng, best_score);
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn best_score(&self) -> u32 {
        self.scoreboard.best
    }

    /// Result of the finished run (None while still running)
    pub fn result(&self) -> Option<RunResult> {
        self.cause.map(|cause| RunResult {
            score: self.scoreboard.score,
            best_score: self.scoreboard.best,
            cause,
        })
    }

    /// End the run. Later causes in the same frame are ignored.
    pub fn game_over(&mut self, cause: GameOverCause) {
        if self.phase != GamePhase::Playing {
            return;
        }
        log::info!(
            "Game over ({:?}) at height {:.1}, score {}",
            cause,
            self.world.player.pos.y,
            self.scoreboard.score
        );
        self.phase = GamePhase::GameOver;
        self.cause = Some(cause);
        self.events.push(GameEvent::GameOver { cause });
    }
}
