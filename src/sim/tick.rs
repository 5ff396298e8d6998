//! Fixed timestep simulation tick
//!
//! Core game loop that advances the session deterministically. All kinematic
//! constants are per tick; callers with a variable frame rate feed whole ticks
//! through `platform::FixedStepper` instead of scaling by elapsed time.

use rand::Rng;

use super::collision::first_collision;
use super::snapshot::Snapshot;
use super::state::{EndReason, GamePhase, GameState};

/// Input for one call to [`tick`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickInput {
    /// Trigger pressed since the last call (edge, coalesced to one impulse)
    pub trigger: bool,
    /// Whole ticks to simulate, normally 1
    pub elapsed_ticks: u32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            trigger: false,
            elapsed_ticks: 1,
        }
    }
}

impl TickInput {
    /// One tick with the trigger pressed
    pub fn pressed() -> Self {
        Self {
            trigger: true,
            ..Default::default()
        }
    }
}

/// Advance the session and return what to draw
///
/// - `Idle`/`Ended` + trigger: start a fresh run (opening impulse applied, no
///   physics this call)
/// - `Running`: simulate `elapsed_ticks` ticks, the trigger applying to the
///   first; stops early if the run ends
/// - otherwise: nothing changes
pub fn tick<R: Rng>(state: &mut GameState<R>, input: &TickInput) -> Snapshot {
    match state.phase {
        GamePhase::Idle | GamePhase::Ended => {
            if input.trigger {
                state.start_run();
            }
        }
        GamePhase::Running => {
            if input.elapsed_ticks == 0 && input.trigger {
                state.avatar.trigger_impulse(state.config.impulse);
            }
            for i in 0..input.elapsed_ticks {
                step(state, input.trigger && i == 0);
                if state.phase != GamePhase::Running {
                    break;
                }
            }
        }
    }
    state.snapshot()
}

/// One running tick: avatar, bounds, obstacles, scoring, collisions, recycling
fn step<R: Rng>(state: &mut GameState<R>, trigger: bool) {
    state.time_ticks += 1;

    // A trigger replaces this tick's gravity
    if trigger {
        state.avatar.trigger_impulse(state.config.impulse);
        state.avatar.integrate();
    } else {
        state.avatar.apply_gravity_and_integrate(state.config.gravity);
    }

    // Fatal boundary check comes before any obstacle update
    if let Some(reason) = state.avatar.out_of_bounds(state.config.screen_height) {
        state.end_run(reason);
        return;
    }

    state.stream.advance_all(state.config.scroll_speed);

    let hitbox = state.avatar.hitbox();
    let collision = first_collision(&hitbox, state.stream.obstacles());

    // An obstacle crossed on the fatal tick still counts
    let avatar_x = state.avatar.x();
    for obstacle in state.stream.obstacles_mut() {
        if obstacle.mark_passed_if_crossed(avatar_x) {
            state.score += 1;
            log::debug!("Score: {}", state.score);
        }
    }

    if let Some((index, body)) = collision {
        log::debug!("Collision with obstacle {index} ({body:?})");
        state.end_run(EndReason::Collision(body));
        return;
    }

    state.stream.prune(state.config.offscreen_threshold);
    state.stream.spawn_if_needed(
        &mut state.rng,
        state.config.screen_width,
        state.config.spawn_interval,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::state::{Obstacle, ObstacleBody, ObstacleShape};
    use proptest::prelude::*;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::new(GameConfig::default(), seed).unwrap();
        tick(&mut state, &TickInput::pressed());
        state
    }

    fn place_obstacle(state: &mut GameState, x: f64, gap_top: f64) {
        let shape = ObstacleShape::from_config(state.config());
        state.stream.obstacles_mut()[0] = Obstacle::new(x, gap_top, shape);
    }

    #[test]
    fn test_idle_waits_for_trigger() {
        let mut state = GameState::new(GameConfig::default(), 1).unwrap();
        for _ in 0..10 {
            let snap = tick(&mut state, &TickInput::default());
            assert_eq!(snap.phase, GamePhase::Idle);
        }
        assert!(state.obstacles().is_empty());
        assert_eq!(state.avatar().y(), 300.0);
    }

    #[test]
    fn test_trigger_starts_run() {
        let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
        let snap = tick(&mut state, &TickInput::pressed());

        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.avatar.velocity_y, -12.0);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].x, 400.0 + 250.0);
    }

    #[test]
    fn test_trigger_while_running_replaces_gravity() {
        let mut state = running(2);
        tick(&mut state, &TickInput::default());
        tick(&mut state, &TickInput::default());
        let y = state.avatar().y();

        let snap = tick(&mut state, &TickInput::pressed());
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.avatar.velocity_y, -12.0);
        assert_eq!(snap.avatar.pos.y, y - 12.0);
        assert_eq!(state.runs(), 1);
    }

    #[test]
    fn test_falls_to_ground() {
        let mut state = running(3);
        let config = state.config().clone();

        let mut ended_at = None;
        for n in 1..=200u64 {
            let velocity = state.avatar().velocity_y + config.gravity;
            let crosses = state.avatar().y() + velocity + config.avatar_height > config.screen_height;

            let snap = tick(&mut state, &TickInput::default());
            if crosses {
                assert_eq!(snap.phase, GamePhase::Ended);
                ended_at = Some(n);
                break;
            }
            assert_eq!(snap.phase, GamePhase::Running);
        }

        assert_eq!(ended_at, Some(41));
        assert_eq!(state.end_reason(), Some(EndReason::HitGround));
        let score = state.score();
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score(), score);
        assert_eq!(state.phase(), GamePhase::Ended);
    }

    #[test]
    fn test_hits_ceiling() {
        let mut state = running(4);
        let mut snap = state.snapshot();
        for _ in 0..100 {
            snap = tick(&mut state, &TickInput::pressed());
            if snap.phase == GamePhase::Ended {
                break;
            }
        }
        assert_eq!(snap.phase, GamePhase::Ended);
        assert_eq!(snap.end_reason, Some(EndReason::HitCeiling));
    }

    #[test]
    fn test_bounds_checked_before_obstacles() {
        let mut state = running(5);
        state.avatar.set_y(575.0);
        let x_before = state.obstacles()[0].x;

        let snap = tick(&mut state, &TickInput::default());
        assert_eq!(snap.phase, GamePhase::Ended);
        assert_eq!(snap.end_reason, Some(EndReason::HitGround));
        assert_eq!(state.obstacles()[0].x, x_before);
    }

    #[test]
    fn test_collision_with_lower_body() {
        let mut state = running(6);
        // After one tick the hitbox spans y 293.9..323.9; the lower hitbox starts at 303
        place_obstacle(&mut state, 60.0, 100.0);

        let snap = tick(&mut state, &TickInput::default());
        assert_eq!(snap.phase, GamePhase::Ended);
        assert_eq!(
            snap.end_reason,
            Some(EndReason::Collision(ObstacleBody::Lower))
        );
        assert_eq!(snap.score, 0);

        // Frozen
        let frozen = tick(&mut state, &TickInput::default());
        assert_eq!(frozen, snap);
    }

    #[test]
    fn test_crossing_scores_on_collision_tick() {
        let mut state = running(6);
        // Left edge crosses x = 50 while the hitbox hits the lower body
        place_obstacle(&mut state, 54.0, 100.0);

        let snap = tick(&mut state, &TickInput::default());
        assert_eq!(snap.phase, GamePhase::Ended);
        assert_eq!(
            snap.end_reason,
            Some(EndReason::Collision(ObstacleBody::Lower))
        );
        assert_eq!(snap.score, 1);
        assert_eq!(snap.best_score, 1);
        assert!(snap.obstacles[0].passed);
        assert_eq!(snap.obstacles.len(), 1);
    }

    #[test]
    fn test_scores_once_per_obstacle() {
        let mut state = running(7);
        // Gap 200..400 contains the hitbox; the left edge crosses x = 50 this tick
        place_obstacle(&mut state, 54.0, 200.0);

        let snap = tick(&mut state, &TickInput::default());
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.score, 1);
        assert!(snap.obstacles[0].passed);

        let snap = tick(&mut state, &TickInput::default());
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.score, 1);
    }

    #[test]
    fn test_restart_after_end() {
        let mut state = running(8);
        place_obstacle(&mut state, 54.0, 200.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.score(), 1);
        state.avatar.set_y(599.0);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase(), GamePhase::Ended);

        let snap = tick(&mut state, &TickInput::pressed());
        assert_eq!(snap.phase, GamePhase::Running);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.best_score, 1);
        assert_eq!(snap.end_reason, None);
        assert_eq!(snap.time_ticks, 0);
        assert_eq!(snap.obstacles.len(), 1);
        assert_eq!(snap.obstacles[0].x, 650.0);
        assert!(!snap.obstacles[0].passed);
        assert_eq!(snap.avatar.pos.y, 300.0);
        assert_eq!(snap.avatar.velocity_y, -12.0);
        assert_eq!(state.runs(), 2);
    }

    #[test]
    fn test_multiple_elapsed_ticks() {
        let mut state = running(9);
        let snap = tick(
            &mut state,
            &TickInput {
                trigger: true,
                elapsed_ticks: 3,
            },
        );
        assert_eq!(snap.time_ticks, 3);
        assert!((snap.avatar.velocity_y - (-12.0 + 2.0 * 0.9)).abs() < 1e-9);
        assert_eq!(snap.obstacles[0].x, 650.0 - 15.0);
    }

    #[test]
    fn test_zero_elapsed_ticks() {
        let mut state = running(10);
        tick(&mut state, &TickInput::default());
        let y = state.avatar().y();

        let snap = tick(
            &mut state,
            &TickInput {
                trigger: true,
                elapsed_ticks: 0,
            },
        );
        assert_eq!(snap.avatar.velocity_y, -12.0);
        assert_eq!(snap.avatar.pos.y, y);
        assert_eq!(snap.time_ticks, 1);
    }

    #[test]
    fn test_substeps_stop_when_run_ends() {
        let mut state = running(11);
        let snap = tick(
            &mut state,
            &TickInput {
                trigger: false,
                elapsed_ticks: 500,
            },
        );
        assert_eq!(snap.phase, GamePhase::Ended);
        assert_eq!(snap.time_ticks, 41);
    }

    #[test]
    fn test_determinism() {
        let inputs: Vec<TickInput> = (0..300)
            .map(|i| TickInput {
                trigger: i % 9 == 0,
                elapsed_ticks: 1,
            })
            .collect();

        let mut a = GameState::new(GameConfig::default(), 99999).unwrap();
        let mut b = GameState::new(GameConfig::default(), 99999).unwrap();
        for input in &inputs {
            assert_eq!(tick(&mut a, input), tick(&mut b, input));
        }
    }

    proptest! {
        #[test]
        fn prop_velocity_follows_gravity_or_impulse(
            seed in any::<u64>(),
            presses in prop::collection::vec(prop::bool::weighted(0.1), 1..300),
        ) {
            let mut state = running(seed);
            let config = state.config().clone();
            for trigger in presses {
                if state.phase() != GamePhase::Running {
                    break;
                }
                let before = state.avatar().velocity_y;
                let snap = tick(&mut state, &TickInput { trigger, elapsed_ticks: 1 });
                if trigger {
                    prop_assert_eq!(snap.avatar.velocity_y, -config.impulse);
                } else {
                    prop_assert_eq!(snap.avatar.velocity_y, before + config.gravity);
                }
            }
        }

        #[test]
        fn prop_score_counts_crossed_obstacles(
            seed in any::<u64>(),
            presses in prop::collection::vec(prop::bool::weighted(0.08), 1..600),
        ) {
            let mut state = running(seed);
            let avatar_x = state.avatar().x();
            let mut last_score = 0;
            for trigger in presses {
                let snap = tick(&mut state, &TickInput { trigger, elapsed_ticks: 1 });
                if snap.phase != GamePhase::Running {
                    break;
                }
                prop_assert!(snap.score >= last_score);
                prop_assert!(snap.score - last_score <= 1);
                for o in &snap.obstacles {
                    prop_assert_eq!(o.passed, o.x < avatar_x);
                }
                last_score = snap.score;
            }
        }

        #[test]
        fn prop_obstacle_list_bounded_and_ordered(
            seed in any::<u64>(),
            presses in prop::collection::vec(any::<bool>(), 1..600),
        ) {
            let mut state = running(seed);
            for trigger in presses {
                let snap = tick(&mut state, &TickInput { trigger, elapsed_ticks: 1 });
                if snap.phase == GamePhase::Running {
                    prop_assert!(!snap.obstacles.is_empty());
                }
                prop_assert!(snap.obstacles.len() <= 3);
                prop_assert!(snap.obstacles.windows(2).all(|w| w[0].x < w[1].x));
            }
        }

        #[test]
        fn prop_ended_is_frozen(seed in any::<u64>(), idle_ticks in 1usize..200) {
            let mut state = running(seed);
            let mut snap = state.snapshot();
            while snap.phase == GamePhase::Running {
                snap = tick(&mut state, &TickInput::default());
            }
            for _ in 0..idle_ticks {
                prop_assert_eq!(&tick(&mut state, &TickInput::default()), &snap);
            }
        }
    }
}
