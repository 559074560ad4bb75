//! Scripted input for headless runs

use glam::Vec2;

use crate::consts::{GUI_HEIGHT, GUI_WIDTH, STEP_WIDTH};
use crate::sim::{GamePhase, GameState, TickInput};

/// Horizontal slack before the bot starts steering
const DEADZONE: f32 = 0.2;

/// Pick this frame's input: tap through Ready and GameOver, otherwise hold
/// the touch zone that moves the player under the next step up.
pub fn steer(state: &GameState) -> TickInput {
    if state.phase != GamePhase::Playing {
        return TickInput::action();
    }

    let player = &state.world.player;
    let player_mid = player.bounds().center().x;
    let target = state
        .world
        .steps
        .iter()
        .filter(|s| !s.is_vanished() && s.pos.y > player.pos.y - 0.5)
        .min_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
        .map(|s| s.pos.x + STEP_WIDTH / 2.0)
        .unwrap_or_else(|| state.world.ufo.bounds().center().x);

    let dx = target - player_mid;
    let y = GUI_HEIGHT / 2.0;
    let pointer = if dx > DEADZONE {
        // Left half pushes towards +x
        Some(Vec2::new(GUI_WIDTH * 0.25, y))
    } else if dx < -DEADZONE {
        Some(Vec2::new(GUI_WIDTH * 0.75, y))
    } else {
        None
    };
    TickInput {
        action: false,
        pointer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{PLAYER_MOVE_ACCEL, STEP_VELOCITY};
    use crate::settings::StageConfig;
    use crate::sim::state::{Step, StepKind};
    use crate::sim::test_support::world_with_player;
    use crate::sim::{horizontal_accel, tick};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn playing_with_step(step_x: f32) -> GameState {
        let mut world = world_with_player(4.5, 3.0);
        world
            .steps
            .push(Step::new(StepKind::Static, Vec2::new(step_x, 6.0), STEP_VELOCITY));
        let mut state =
            GameState::with_world(StageConfig::default(), world, Pcg32::seed_from_u64(1), 0);
        state.phase = GamePhase::Playing;
        state
    }

    #[test]
    fn test_taps_outside_play() {
        let state = GameState::with_seed(StageConfig::default(), 1, 0).unwrap();
        assert!(steer(&state).action);
    }

    #[test]
    fn test_steers_towards_next_step() {
        let right = steer(&playing_with_step(7.0));
        assert_eq!(horizontal_accel(right.pointer, PLAYER_MOVE_ACCEL), 5.0);

        let left = steer(&playing_with_step(0.0));
        assert_eq!(horizontal_accel(left.pointer, PLAYER_MOVE_ACCEL), -5.0);

        let centred = steer(&playing_with_step(4.0));
        assert_eq!(centred.pointer, None);
    }

    #[test]
    fn test_bot_scores_on_some_seed() {
        let best = (0..10u64)
            .map(|seed| {
                let mut state = GameState::with_seed(StageConfig::default(), seed, 0).unwrap();
                for _ in 0..60 * 120 {
                    let input = steer(&state);
                    tick(&mut state, &input, 1.0 / 60.0);
                    if state.phase == GamePhase::GameOver {
                        break;
                    }
                }
                state.height_so_far
            })
            .fold(0.0f32, f32::max);
        assert!(best > 10.0, "bot never climbed: {}", best);
    }
}
