//! Procedural stage generation
//!
//! Steps are stacked from the ground up. Each gap is at most one jump minus
//! a safety margin, so every step is reachable from the one below it.

use glam::Vec2;
use rand::Rng;

use super::state::{Enemy, Player, Star, Step, StepKind, Ufo, World};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::StageConfig;

/// Validate `config` and lay out a new stage.
///
/// A random source is required; callers wanting determinism pass a seeded one.
pub fn generate_stage<R: Rng + ?Sized>(
    config: &StageConfig,
    rng: Option<&mut R>,
) -> Result<World, ConfigError> {
    config.validate()?;
    let rng = rng.ok_or(ConfigError::MissingRandomSource)?;
    Ok(build_stage(config, rng))
}

/// Lay out a stage from an already validated config
pub fn build_stage<R: Rng + ?Sized>(config: &StageConfig, rng: &mut R) -> World {
    let max_jump = config.max_jump_height();
    let top = config.world_height - config.goal_margin;

    let mut steps = Vec::new();
    let mut stars = Vec::new();
    let mut enemies = Vec::new();

    let mut y = 0.0;
    while y < top {
        let kind = if rng.random::<f32>() < config.moving_step_chance {
            StepKind::Moving
        } else {
            StepKind::Static
        };
        let x = rng.random::<f32>() * (config.world_width - STEP_WIDTH);
        let step = Step::new(kind, Vec2::new(x, y), config.step_velocity);

        // Never on the first step: the player starts there
        if !steps.is_empty() && rng.random::<f32>() < config.enemy_chance {
            let center = Vec2::new(step.pos.x + STEP_WIDTH / 2.0, step.pos.y);
            let angle = rng.random_range(0..360u32) as f32;
            enemies.push(Enemy::new(center, config.enemy_radius, angle));
        }

        if rng.random::<f32>() < config.star_chance {
            let sx = step.pos.x + rng.random::<f32>();
            let sy = step.pos.y + STAR_HEIGHT + rng.random::<f32>() * 3.0;
            stars.push(Star::new(Vec2::new(sx, sy)));
        }

        steps.push(step);

        y += max_jump - 0.5;
        y -= rng.random::<f32>() * (max_jump / 3.0);
    }

    let ground = steps.first().map(|s| s.pos.y).unwrap_or(0.0);
    let player = Player::new(Vec2::new(
        config.world_width / 2.0 - PLAYER_WIDTH / 2.0,
        ground + STEP_HEIGHT,
    ));
    let ufo = Ufo {
        pos: Vec2::new(config.world_width / 2.0 - UFO_WIDTH / 2.0, y),
    };

    log::info!(
        "Stage generated: {} steps, {} stars, {} enemies, goal at {:.1}",
        steps.len(),
        stars.len(),
        enemies.len(),
        y
    );

    World {
        steps,
        stars,
        enemies,
        ufo,
        player,
    }
}
