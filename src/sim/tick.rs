//! Per-frame game loop
//!
//! Dispatches on the phase, runs physics and collisions while Playing and
//! applies the resulting transitions.

use glam::Vec2;

use super::collision::{check_collisions, check_enemies};
use super::physics::{integrate, sanitize_delta};
use super::state::{GameEvent, GameOverCause, GamePhase, GameState};
use crate::consts::{GUI_HEIGHT, GUI_WIDTH};

/// Input snapshot for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Primary action pressed this frame (edge-triggered)
    pub action: bool,
    /// Pointer held down, in logical GUI coordinates (y up)
    pub pointer: Option<Vec2>,
}

impl TickInput {
    pub fn action() -> Self {
        Self {
            action: true,
            pointer: None,
        }
    }

    pub fn touch(x: f32, y: f32) -> Self {
        Self {
            action: false,
            pointer: Some(Vec2::new(x, y)),
        }
    }
}

/// Horizontal drive from the touch zones: left half pushes positive,
/// right half negative, anywhere else nothing.
pub fn horizontal_accel(pointer: Option<Vec2>, accel: f32) -> f32 {
    let Some(p) = pointer else {
        return 0.0;
    };
    if !(0.0..=GUI_HEIGHT).contains(&p.y) {
        return 0.0;
    }
    let half = GUI_WIDTH / 2.0;
    if (0.0..half).contains(&p.x) {
        accel
    } else if (half..=GUI_WIDTH).contains(&p.x) {
        -accel
    } else {
        0.0
    }
}

/// Advance the game by one frame.
///
/// A zero, negative or non-finite `dt` leaves the state untouched.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    let Some(dt) = sanitize_delta(dt, state.config.max_frame_delta) else {
        return;
    };

    match state.phase {
        GamePhase::Ready => {
            if input.action {
                log::info!("Run started");
                state.phase = GamePhase::Playing;
                state.events.push(GameEvent::Started);
            }
        }
        GamePhase::Playing => update_playing(state, input, dt),
        GamePhase::GameOver => {
            if input.action && !state.acknowledged {
                if let Some(result) = state.result() {
                    state.acknowledged = true;
                    state.events.push(GameEvent::RunFinished(result));
                }
            }
        }
    }
}

fn update_playing(state: &mut GameState, input: &TickInput, dt: f32) {
    let accel = horizontal_accel(input.pointer, state.config.move_accel);
    integrate(&mut state.world, dt, accel, &state.config);
    state.height_so_far = state.height_so_far.max(state.world.player.pos.y);

    let goal = check_collisions(
        &mut state.world,
        &mut state.scoreboard,
        &state.config,
        &mut state.rng,
        &mut state.events,
    );
    if let Some(cause) = goal {
        state.game_over(cause);
    }

    check_game_over(state);

    // Camera only ever scrolls up
    if state.world.player.pos.y > state.camera_y {
        state.camera_y = state.world.player.pos.y;
    }
}

/// Fall-behind and enemy checks.
///
/// Runs every Playing frame, even after the goal or a fall already ended the
/// run: an enemy contact still emits `EnemyHit`, but the first cause stands.
fn check_game_over(state: &mut GameState) {
    let scroll_line = state.height_so_far - state.config.camera_height / 2.0;
    if scroll_line > state.world.player.pos.y {
        state.game_over(GameOverCause::FellBehind);
    }

    if let Some(enemy) = check_enemies(&state.world) {
        log::debug!("Hit enemy {}", enemy);
        state.events.push(GameEvent::EnemyHit { enemy });
        state.game_over(GameOverCause::EnemyHit);
    }
}
