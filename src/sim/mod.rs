//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - Explicit random source only (seeded in tests)
//! - Stable iteration order (creation order)
//! - No rendering, audio, storage or platform dependencies

pub mod collision;
pub mod physics;
pub mod rect;
pub mod stage;
pub mod state;
pub mod tick;

#[cfg(test)]
pub(crate) mod test_support;

pub use collision::{check_collisions, check_enemies, check_goal, check_stars, check_steps};
pub use physics::{integrate, sanitize_delta, update_enemy, update_player, update_step};
pub use rect::Rect;
pub use stage::{build_stage, generate_stage};
pub use state::{
    Enemy, EnemyState, GameEvent, GameOverCause, GamePhase, GameState, Player, RunResult,
    Scoreboard, Star, StarState, Step, StepKind, StepState, Ufo, World,
};
pub use tick::{TickInput, horizontal_accel, tick};
