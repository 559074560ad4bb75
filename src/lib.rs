//! Jump Action - a vertical jump game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (stage generation, physics, collisions, game state)
//! - `session`: Glue between the simulation and its collaborators
//! - `highscores`: Best-score persistence
//! - `audio`: Sound effect sink
//! - `renderer`: Sprite draw list handed to the host renderer
//! - `platform`: Input translation (screen -> logical zones)
//! - `settings`: Data-driven stage configuration
//! - `logging`: Logger setup (env_logger natively, browser console on wasm)

pub mod audio;
pub mod error;
pub mod highscores;
pub mod logging;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, StoreError};
pub use session::{AfterRun, ResultReporter, Session};
pub use settings::StageConfig;

/// Game configuration constants
pub mod consts {
    /// Visible camera area (world units, 10:15 portrait)
    pub const CAMERA_WIDTH: f32 = 10.0;
    pub const CAMERA_HEIGHT: f32 = 15.0;

    /// World dimensions: one camera wide, twenty cameras tall
    pub const WORLD_WIDTH: f32 = 10.0;
    pub const WORLD_HEIGHT: f32 = 15.0 * 20.0;

    /// Logical GUI space used for touch zones
    pub const GUI_WIDTH: f32 = 320.0;
    pub const GUI_HEIGHT: f32 = 480.0;

    /// Gravity (units/s², negative = down)
    pub const GRAVITY: f32 = -12.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 1.0;
    pub const PLAYER_HEIGHT: f32 = 1.0;
    pub const PLAYER_JUMP_VELOCITY: f32 = 12.0;
    /// Horizontal speed while a touch zone is held
    pub const PLAYER_MOVE_ACCEL: f32 = 5.0;
    /// Below this height the player bounces off the ground
    pub const GROUND_BOUNCE_HEIGHT: f32 = 0.5;

    /// Step defaults
    pub const STEP_WIDTH: f32 = 2.0;
    pub const STEP_HEIGHT: f32 = 0.5;
    pub const STEP_VELOCITY: f32 = 2.0;

    /// Star defaults
    pub const STAR_WIDTH: f32 = 0.8;
    pub const STAR_HEIGHT: f32 = 0.8;

    /// Enemy defaults
    pub const ENEMY_WIDTH: f32 = 1.0;
    pub const ENEMY_HEIGHT: f32 = 1.0;
    pub const ENEMY_ORBIT_RADIUS: f32 = 3.0;
    /// Degrees per second
    pub const ENEMY_ANGULAR_SPEED: f32 = 30.0;

    /// Goal marker (UFO)
    pub const UFO_WIDTH: f32 = 2.0;
    pub const UFO_HEIGHT: f32 = 1.3;

    /// Steps stop this far below the world height; the UFO sits on top
    pub const GOAL_MARGIN: f32 = 5.0;

    /// Spawn chances
    pub const MOVING_STEP_CHANCE: f32 = 0.2;
    pub const ENEMY_CHANCE: f32 = 0.3;
    pub const STAR_CHANCE: f32 = 0.4;
    pub const VANISH_CHANCE: f32 = 0.5;

    /// Upper bound on a single frame delta (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;

    /// Preferences key for the best-ever score
    pub const HIGHSCORE_KEY: &str = "HIGHSCORE";
}

/// Peak height reachable from a single jump impulse: v² / 2g
#[inline]
pub fn max_jump_height(jump_velocity: f32, gravity: f32) -> f32 {
    jump_velocity * jump_velocity / (2.0 * gravity.abs())
}
