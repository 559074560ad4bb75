//! Shared fixtures for simulation tests

use glam::Vec2;
use rand::RngCore;

use super::state::{Player, Ufo, World};

/// Random source that returns the same roll forever
pub struct FixedRoll(u32);

impl FixedRoll {
    /// Rolls 0.0: every chance-based branch fires
    pub fn always() -> Self {
        Self(0)
    }

    /// Rolls just under 1.0: no chance-based branch fires
    pub fn never() -> Self {
        Self(u32::MAX)
    }
}

impl RngCore for FixedRoll {
    fn next_u32(&mut self) -> u32 {
        self.0
    }

    fn next_u64(&mut self) -> u64 {
        (u64::from(self.0) << 32) | u64::from(self.0)
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        dst.fill(self.0 as u8);
    }
}

/// Empty world with the player at (x, y) and the goal far above
pub fn world_with_player(x: f32, y: f32) -> World {
    World::new(
        Player::new(Vec2::new(x, y)),
        Ufo {
            pos: Vec2::new(4.0, 200.0),
        },
    )
}
