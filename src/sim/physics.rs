//! Per-frame integration
//!
//! Pure state mutation: no I/O and nothing fallible. Callers hand in a delta
//! already cleaned by [`sanitize_delta`].

use super::state::{Enemy, Player, Step, StepKind, World};
use crate::consts::*;
use crate::settings::StageConfig;

/// Clamp a raw frame delta. Returns None for deltas that must not advance
/// the simulation (zero, negative, NaN, infinite).
pub fn sanitize_delta(dt: f32, max_dt: f32) -> Option<f32> {
    if dt.is_finite() && dt > 0.0 {
        Some(dt.min(max_dt))
    } else {
        None
    }
}

/// Gravity, horizontal drive and screen wrap for the player
pub fn update_player(player: &mut Player, dt: f32, accel: f32, config: &StageConfig) {
    player.vel.y += config.gravity * dt;
    player.vel.x = accel;
    player.pos += player.vel * dt;

    // Leaving one side re-enters from the other
    let half = PLAYER_WIDTH / 2.0;
    if player.pos.x + half < 0.0 {
        player.pos.x = config.world_width - half;
    } else if player.pos.x + half > config.world_width {
        player.pos.x = -half;
    }
}

/// Moving steps drift sideways and bounce between the world edges
pub fn update_step(step: &mut Step, dt: f32, config: &StageConfig) {
    if step.kind != StepKind::Moving {
        return;
    }
    let max_x = config.world_width - STEP_WIDTH;
    step.pos.x += step.vel_x * dt;
    if step.pos.x < 0.0 {
        step.pos.x = 0.0;
        step.vel_x = step.vel_x.abs();
    } else if step.pos.x > max_x {
        step.pos.x = max_x;
        step.vel_x = -step.vel_x.abs();
    }
}

/// Enemies spin around a fixed pivot
pub fn update_enemy(enemy: &mut Enemy, dt: f32, config: &StageConfig) {
    enemy.angle += config.enemy_angular_speed * dt;
    enemy.place();
}

/// Advance every moving entity by `dt`
pub fn integrate(world: &mut World, dt: f32, accel: f32, config: &StageConfig) {
    for step in &mut world.steps {
        update_step(step, dt, config);
    }
    for enemy in &mut world.enemies {
        update_enemy(enemy, dt, config);
    }

    // The ground catches the player before any step does
    if world.player.pos.y <= GROUND_BOUNCE_HEIGHT {
        world.player.hit_step(config.jump_velocity);
    }
    update_player(&mut world.player, dt, accel, config);
}
