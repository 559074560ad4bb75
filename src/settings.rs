//! Stage configuration
//!
//! Every tunable used by stage generation and the per-frame simulation.
//! Defaults come from [`crate::consts`]; a JSON file may override any subset.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::max_jump_height;

/// Stage generation and physics parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    pub camera_width: f32,
    pub camera_height: f32,
    /// Steps stop this far below `world_height`
    pub goal_margin: f32,

    // === Physics ===
    /// Vertical acceleration (must be negative)
    pub gravity: f32,
    pub jump_velocity: f32,
    /// Horizontal speed while a touch zone is held
    pub move_accel: f32,
    pub step_velocity: f32,
    pub enemy_radius: f32,
    /// Degrees per second
    pub enemy_angular_speed: f32,
    /// Frames longer than this are clamped
    pub max_frame_delta: f32,

    // === Spawn chances (0.0 - 1.0) ===
    pub moving_step_chance: f32,
    pub enemy_chance: f32,
    pub star_chance: f32,
    pub vanish_chance: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            camera_width: CAMERA_WIDTH,
            camera_height: CAMERA_HEIGHT,
            goal_margin: GOAL_MARGIN,

            gravity: GRAVITY,
            jump_velocity: PLAYER_JUMP_VELOCITY,
            move_accel: PLAYER_MOVE_ACCEL,
            step_velocity: STEP_VELOCITY,
            enemy_radius: ENEMY_ORBIT_RADIUS,
            enemy_angular_speed: ENEMY_ANGULAR_SPEED,
            max_frame_delta: MAX_FRAME_DELTA,

            moving_step_chance: MOVING_STEP_CHANCE,
            enemy_chance: ENEMY_CHANCE,
            star_chance: STAR_CHANCE,
            vanish_chance: VANISH_CHANCE,
        }
    }
}

impl StageConfig {
    /// Highest point a single jump impulse reaches
    pub fn max_jump_height(&self) -> f32 {
        max_jump_height(self.jump_velocity, self.gravity)
    }

    /// Smallest possible vertical gap between consecutive steps
    pub fn min_step_gap(&self) -> f32 {
        let max = self.max_jump_height();
        max - 0.5 - max / 3.0
    }

    /// Reject parameters that would make generation or physics meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("world_width", self.world_width)?;
        positive("world_height", self.world_height)?;
        positive("camera_width", self.camera_width)?;
        positive("camera_height", self.camera_height)?;
        positive("jump_velocity", self.jump_velocity)?;
        positive("max_frame_delta", self.max_frame_delta)?;
        finite("goal_margin", self.goal_margin)?;
        finite("move_accel", self.move_accel)?;
        finite("step_velocity", self.step_velocity)?;
        finite("enemy_radius", self.enemy_radius)?;
        finite("enemy_angular_speed", self.enemy_angular_speed)?;

        if !(self.gravity.is_finite() && self.gravity < 0.0) {
            return Err(ConfigError::invalid(
                "gravity",
                format!("must be negative, got {}", self.gravity),
            ));
        }
        if self.world_width <= STEP_WIDTH {
            return Err(ConfigError::invalid(
                "world_width",
                format!("must be wider than a step ({STEP_WIDTH}), got {}", self.world_width),
            ));
        }
        if self.world_height <= self.goal_margin {
            return Err(ConfigError::invalid(
                "world_height",
                format!(
                    "must exceed goal_margin ({}), got {}",
                    self.goal_margin, self.world_height
                ),
            ));
        }
        if self.min_step_gap() <= 0.0 {
            return Err(ConfigError::invalid(
                "jump_velocity",
                format!(
                    "jump height {:.3} is too low to separate steps",
                    self.max_jump_height()
                ),
            ));
        }

        // Past this the f32 step cursor stops advancing
        let gap = self.min_step_gap();
        if (self.world_height + gap) - self.world_height < gap / 2.0 {
            return Err(ConfigError::invalid(
                "world_height",
                format!(
                    "{} is too large to place steps {:.3} apart",
                    self.world_height, gap
                ),
            ));
        }

        for (name, chance) in [
            ("moving_step_chance", self.moving_step_chance),
            ("enemy_chance", self.enemy_chance),
            ("star_chance", self.star_chance),
            ("vanish_chance", self.vanish_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(ConfigError::invalid(
                    name,
                    format!("must be within 0.0..=1.0, got {chance}"),
                ));
            }
        }

        Ok(())
    }

    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded stage config from {}", path.display());
        Ok(config)
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("must be positive, got {value}")))
    }
}

fn finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(name, format!("must be finite, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_default_config_is_valid() {
        assert!(StageConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_width() {
        let config = StageConfig {
            world_width: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "world_width", .. })
        ));
    }

    #[test]
    fn test_rejects_tiny_jump() {
        let config = StageConfig {
            jump_velocity: 1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "jump_velocity", .. })
        ));
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let config = StageConfig {
            gravity: 9.8,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_world_too_tall_for_float_steps() {
        let config = StageConfig {
            world_height: 1.0e10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "world_height", .. })
        ));

        let mut rng = rand_pcg::Pcg32::seed_from_u64(1);
        assert!(crate::sim::generate_stage(&config, Some(&mut rng)).is_err());
    }

    #[test]
    fn test_accepts_tall_but_representable_world() {
        let config = StageConfig {
            world_height: 10_000.0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_chance() {
        let config = StageConfig {
            star_chance: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter { name: "star_chance", .. })
        ));
    }

    #[test]
    fn test_partial_json_override() {
        let config = StageConfig::from_json(r#"{ "world_height": 60.0 }"#).unwrap();
        assert_eq!(config.world_height, 60.0);
        assert_eq!(config.world_width, WORLD_WIDTH);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            StageConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }
}
