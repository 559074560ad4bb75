//! Collision detection and scoring
//!
//! Runs after integration each Playing frame. Within a category only the
//! first overlapping entity (creation order) is resolved.

use rand::Rng;

use super::state::{GameEvent, GameOverCause, Scoreboard, World};
use crate::settings::StageConfig;

/// Goal, star and step checks in that order.
///
/// Returns `Some(GoalReached)` when the player touched the UFO; the star and
/// step checks are skipped in that case.
pub fn check_collisions<R: Rng + ?Sized>(
    world: &mut World,
    scoreboard: &mut Scoreboard,
    config: &StageConfig,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<GameOverCause> {
    if check_goal(world) {
        return Some(GameOverCause::GoalReached);
    }
    check_stars(world, scoreboard, events);
    check_steps(world, config, rng, events);
    None
}

pub fn check_goal(world: &World) -> bool {
    world.player.bounds().overlaps(&world.ufo.bounds())
}

/// Collect at most one star. Returns its index.
pub fn check_stars(
    world: &mut World,
    scoreboard: &mut Scoreboard,
    events: &mut Vec<GameEvent>,
) -> Option<usize> {
    let player = world.player.bounds();
    let (index, star) = world
        .stars
        .iter_mut()
        .enumerate()
        .find(|(_, star)| star.is_present() && player.overlaps(&star.bounds()))?;

    star.collect();
    let new_best = scoreboard.add_point();
    log::debug!("Star {} collected, score {}", index, scoreboard.score);
    events.push(GameEvent::StarCollected {
        score: scoreboard.score,
    });
    if new_best {
        events.push(GameEvent::NewBest {
            score: scoreboard.best,
        });
    }
    Some(index)
}

/// Land on at most one step. Skipped while rising so the player passes
/// through steps from below. Returns the index of the step landed on.
pub fn check_steps<R: Rng + ?Sized>(
    world: &mut World,
    config: &StageConfig,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<usize> {
    if world.player.is_rising() {
        return None;
    }

    let player = &mut world.player;
    let bounds = player.bounds();
    let (index, step) = world.steps.iter_mut().enumerate().find(|(_, step)| {
        !step.is_vanished() && bounds.pos.y > step.pos.y && bounds.overlaps(&step.bounds())
    })?;

    player.hit_step(config.jump_velocity);
    events.push(GameEvent::Landed { step: index });

    if rng.random::<f32>() < config.vanish_chance {
        step.vanish();
        log::debug!("Step {} vanished", index);
        events.push(GameEvent::StepVanished { step: index });
    }
    Some(index)
}

/// First live enemy touching the player, if any
pub fn check_enemies(world: &World) -> Option<usize> {
    let player = world.player.bounds();
    world
        .enemies
        .iter()
        .position(|enemy| enemy.is_alive() && player.overlaps(&enemy.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::state::{Enemy, Star, Step, StepKind};
    use crate::sim::test_support::{FixedRoll, world_with_player};
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_landing_from_above_resets_velocity() {
        let config = StageConfig::default();
        let mut world = world_with_player(4.5, 0.4);
        world.player.vel.y = -2.0;
        world
            .steps
            .push(Step::new(StepKind::Static, Vec2::new(4.0, 0.0), STEP_VELOCITY));

        let mut events = Vec::new();
        let hit = check_steps(&mut world, &config, &mut FixedRoll::never(), &mut events);
        assert_eq!(hit, Some(0));
        assert_eq!(world.player.vel.y, PLAYER_JUMP_VELOCITY);
        assert_eq!(world.player.vel.y, 12.0);
        assert!(!world.steps[0].is_vanished());
        assert_eq!(events, vec![GameEvent::Landed { step: 0 }]);
    }

    #[test]
    fn test_no_landing_while_rising() {
        let config = StageConfig::default();
        let mut world = world_with_player(4.5, 0.4);
        world.player.vel.y = 3.0;
        world
            .steps
            .push(Step::new(StepKind::Static, Vec2::new(4.0, 0.0), STEP_VELOCITY));

        let mut events = Vec::new();
        assert!(check_steps(&mut world, &config, &mut FixedRoll::always(), &mut events).is_none());
        assert_eq!(world.player.vel.y, 3.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_no_landing_from_below() {
        let config = StageConfig::default();
        let mut world = world_with_player(4.5, 9.7);
        world.player.vel.y = -1.0;
        world
            .steps
            .push(Step::new(StepKind::Static, Vec2::new(4.0, 10.0), STEP_VELOCITY));

        let mut events = Vec::new();
        assert!(check_steps(&mut world, &config, &mut FixedRoll::always(), &mut events).is_none());
    }

    #[test]
    fn test_vanished_step_never_collides_again() {
        let config = StageConfig::default();
        let mut world = world_with_player(4.5, 0.4);
        world.player.vel.y = -1.0;
        world
            .steps
            .push(Step::new(StepKind::Static, Vec2::new(4.0, 0.0), STEP_VELOCITY));

        let mut events = Vec::new();
        let hit = check_steps(&mut world, &config, &mut FixedRoll::always(), &mut events);
        assert_eq!(hit, Some(0));
        assert!(world.steps[0].is_vanished());
        assert!(events.contains(&GameEvent::StepVanished { step: 0 }));

        // Put the player right back on top of it
        let mut rng = Pcg32::seed_from_u64(5);
        for _ in 0..20 {
            world.player.pos = Vec2::new(4.5, 0.4);
            world.player.vel.y = -1.0;
            assert!(check_steps(&mut world, &config, &mut rng, &mut events).is_none());
            assert!(world.steps[0].is_vanished());
        }
    }

    #[test]
    fn test_first_overlapping_step_wins() {
        let config = StageConfig::default();
        let mut world = world_with_player(4.5, 0.4);
        world.player.vel.y = -1.0;
        world
            .steps
            .push(Step::new(StepKind::Static, Vec2::new(3.8, 0.0), STEP_VELOCITY));
        world
            .steps
            .push(Step::new(StepKind::Static, Vec2::new(4.2, 0.1), STEP_VELOCITY));

        let mut events = Vec::new();
        let hit = check_steps(&mut world, &config, &mut FixedRoll::always(), &mut events);
        assert_eq!(hit, Some(0));
        assert!(world.steps[0].is_vanished());
        assert!(!world.steps[1].is_vanished());
    }

    #[test]
    fn test_one_star_per_frame() {
        let mut world = world_with_player(4.5, 5.0);
        world.stars.push(Star::new(Vec2::new(4.6, 5.2)));
        world.stars.push(Star::new(Vec2::new(4.7, 5.3)));
        let mut board = Scoreboard::new(10);
        let mut events = Vec::new();

        assert_eq!(check_stars(&mut world, &mut board, &mut events), Some(0));
        assert_eq!(board.score, 1);
        assert!(!world.stars[0].is_present());
        assert!(world.stars[1].is_present());
        assert_eq!(events, vec![GameEvent::StarCollected { score: 1 }]);

        assert_eq!(check_stars(&mut world, &mut board, &mut events), Some(1));
        assert_eq!(board.score, 2);
        assert!(check_stars(&mut world, &mut board, &mut events).is_none());
        assert_eq!(board.score, 2);
    }

    #[test]
    fn test_star_sets_new_best() {
        let mut world = world_with_player(4.5, 5.0);
        world.stars.push(Star::new(Vec2::new(4.6, 5.2)));
        let mut board = Scoreboard { score: 4, best: 3 };
        let mut events = Vec::new();

        check_stars(&mut world, &mut board, &mut events);
        assert_eq!(board, Scoreboard { score: 5, best: 5 });
        assert_eq!(
            events,
            vec![
                GameEvent::StarCollected { score: 5 },
                GameEvent::NewBest { score: 5 }
            ]
        );
    }

    #[test]
    fn test_goal_short_circuits_other_checks() {
        let config = StageConfig::default();
        let mut world = world_with_player(4.5, 200.2);
        world.stars.push(Star::new(Vec2::new(4.6, 200.3)));
        let mut board = Scoreboard::default();
        let mut events = Vec::new();

        let cause = check_collisions(
            &mut world,
            &mut board,
            &config,
            &mut FixedRoll::never(),
            &mut events,
        );
        assert_eq!(cause, Some(GameOverCause::GoalReached));
        assert_eq!(board.score, 0);
        assert!(world.stars[0].is_present());
    }

    #[test]
    fn test_neutralized_enemy_is_inert() {
        let mut world = world_with_player(4.5, 20.0);
        let mut enemy = Enemy::new(Vec2::new(1.5, 20.0), ENEMY_ORBIT_RADIUS, 0.0);
        assert!(enemy.bounds().overlaps(&world.player.bounds()));
        enemy.neutralize();
        world.enemies.push(enemy);
        assert!(check_enemies(&world).is_none());

        world
            .enemies
            .push(Enemy::new(Vec2::new(1.6, 20.0), ENEMY_ORBIT_RADIUS, 0.0));
        assert_eq!(check_enemies(&world), Some(1));
        assert_eq!(world.enemies.len(), 2);
    }
}
