//! Periodic booster spawning
//!
//! A countdown fires once it goes negative. Each firing draws a weighted
//! booster and looks for a free spot, retrying a bounded number of times.
//! Placement never blocks: if every attempt collides the last candidate is
//! kept anyway.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::arena;
use super::collision::Circle;
use super::effect::Effect;
use super::state::{Booster, Color, GameEvent, GameState};
use crate::consts::SPAWN_ATTEMPTS;

/// Countdown controlling booster cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostSpawnerState {
    /// Seconds until the next spawn (fires once negative)
    pub time_left: f32,
    /// Reset value after each spawn
    pub delay: f32,
}

impl BoostSpawnerState {
    pub fn new(delay: f32) -> Self {
        Self {
            time_left: delay,
            delay,
        }
    }

    /// Count down; returns true when a booster should spawn this tick
    fn advance(&mut self, dt: f32) -> bool {
        self.time_left -= dt;
        if self.time_left < 0.0 {
            self.time_left = self.delay;
            true
        } else {
            false
        }
    }
}

/// Advance the spawner and add at most one booster
pub fn update<R: Rng>(state: &mut GameState, dt: f32, rng: &mut R) {
    if !state.boost_spawner.advance(dt) {
        return;
    }

    let Some(candidate) = place_booster(state, rng) else {
        log::warn!("Booster catalog is empty; nothing to spawn");
        return;
    };
    let (effect, color, collider) = candidate;

    let id = state.next_entity_id();
    state.boosters.push(Booster {
        id,
        effect,
        color,
        collider,
    });
    state.events.push(GameEvent::BoosterSpawned {
        booster_id: id,
        effect,
    });
    log::debug!("Spawned booster {id} ({effect}) at {:?}", collider.pos);
}

/// Draw candidates until one is clear of every collider
///
/// Returns the first clear candidate, or the last one drawn when all
/// attempts collide.
fn place_booster<R: Rng>(state: &GameState, rng: &mut R) -> Option<(Effect, Color, Circle)> {
    let catalog = state.tuning.booster_catalog();
    let mut last = None;
    for attempt in 0..SPAWN_ATTEMPTS {
        let entry = catalog.pick(rng)?;
        let pos = arena::random_inner_point(rng, state.tuning.ring_radius);
        let collider = Circle::new(pos, state.tuning.booster_radius);
        if !state.colliders().any(|other| other.overlaps(&collider)) {
            return Some((entry.effect, entry.color, collider));
        }
        log::trace!("Booster placement attempt {attempt} collided");
        last = Some((entry.effect, entry.color, collider));
    }
    last
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Obstacle;
    use crate::sim::state::test_support::two_player_state;
    use glam::Vec2;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_no_spawn_before_countdown_expires() {
        let mut state = two_player_state();
        let mut rng = Pcg32::seed_from_u64(5);
        state.boost_spawner.time_left = 1.0;
        update(&mut state, 0.5, &mut rng);
        assert!(state.boosters.is_empty());
        assert!((state.boost_spawner.time_left - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_resets_timer() {
        let mut state = two_player_state();
        let mut rng = Pcg32::seed_from_u64(5);
        state.boost_spawner.time_left = 0.01;
        update(&mut state, 0.016, &mut rng);
        assert_eq!(state.boosters.len(), 1);
        assert_eq!(state.boost_spawner.time_left, state.boost_spawner.delay);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::BoosterSpawned { .. })
        ));
    }

    #[test]
    fn test_zero_countdown_does_not_fire() {
        // Fires only once strictly negative
        let mut state = two_player_state();
        let mut rng = Pcg32::seed_from_u64(5);
        state.boost_spawner.time_left = 0.5;
        update(&mut state, 0.5, &mut rng);
        assert!(state.boosters.is_empty());
    }

    #[test]
    fn test_placement_avoids_colliders_when_possible() {
        let mut state = two_player_state();
        let mut rng = Pcg32::seed_from_u64(11);
        state.obstacles.push(Obstacle {
            id: 900,
            collider: Circle::new(Vec2::new(0.6, 0.6), 0.05),
            life_counter: 3,
        });
        for _ in 0..20 {
            let before: Vec<Circle> = state.colliders().collect();
            state.boost_spawner.time_left = -1.0;
            update(&mut state, 0.016, &mut rng);

            let spawned = state.boosters.last().unwrap().collider;
            for other in &before {
                assert!(!other.overlaps(&spawned), "{spawned:?} overlaps {other:?}");
            }
        }
        assert_eq!(state.boosters.len(), 20);
        let ids: std::collections::BTreeSet<_> = state.boosters.iter().map(|b| b.id).collect();
        assert_eq!(ids.len(), 20);
    }

    #[test]
    fn test_colliding_first_candidate_is_rejected() {
        // Ball blocks the middle of the spawn disk
        let mut rejected = 0;
        for seed in 0..50 {
            let mut state = two_player_state();
            state.ball.set_size(0.4);
            let mut rng = Pcg32::seed_from_u64(seed);

            // Replay the first draw on a copy of the RNG
            let mut replay = rng.clone();
            state.tuning.booster_catalog().pick(&mut replay);
            let first = Circle::new(
                arena::random_inner_point(&mut replay, state.tuning.ring_radius),
                state.tuning.booster_radius,
            );

            state.boost_spawner.time_left = -1.0;
            update(&mut state, 0.016, &mut rng);
            let spawned = state.boosters[0].collider;
            assert!(!spawned.overlaps(&state.ball.collider), "seed {seed}");

            if first.overlaps(&state.ball.collider) {
                assert_ne!(spawned.pos, first.pos);
                rejected += 1;
            }
        }
        assert!(rejected > 0);
    }

    #[test]
    fn test_crowded_arena_still_spawns() {
        let mut state = two_player_state();
        // A ball covering the whole arena makes every attempt collide
        state.ball.set_size(4.0);
        let mut rng = Pcg32::seed_from_u64(2);
        state.boost_spawner.time_left = -0.01;
        update(&mut state, 0.016, &mut rng);
        assert_eq!(state.boosters.len(), 1);
        assert!(state.boosters[0].collider.overlaps(&state.ball.collider));
    }
}
