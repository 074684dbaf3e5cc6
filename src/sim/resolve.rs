//! Per-tick movement, collision and effect resolution
//!
//! Each phase is a separate function so the orchestrator in `tick` can run
//! them in a fixed order and tests can drive them one at a time. Phases that
//! drop entities rebuild their collection rather than removing in place.

use glam::Vec2;
use rand::Rng;

use super::collision::{Circle, safe_normalize};
use super::effect::{self, Effect};
use super::state::{AreaBooster, GameEvent, GameState};
use super::tick::TickInput;
use crate::wrap_point;

/// Rotate players along the ring from their buffered input
pub fn apply_inputs(state: &mut GameState, input: &TickInput, dt: f32) {
    for player in &mut state.players {
        let Some(intent) = input.get(&player.name) else {
            continue;
        };
        if !intent.is_moving() {
            continue;
        }
        player.rotate(player.speed * dt * intent.dy);
    }
}

/// Run megaElectric ring spawners and drop the finished ones
pub fn advance_area_spawners(state: &mut GameState, dt: f32) {
    let ring_radius = state.tuning.ring_radius;
    let spawners = std::mem::take(&mut state.area_spawners);
    let mut active = Vec::with_capacity(spawners.len());
    for mut spawner in spawners {
        state.area_boosters.extend(spawner.update(dt, ring_radius));
        if !spawner.finished {
            active.push(spawner);
        }
    }
    state.area_spawners = active;
}

/// Age area zones (expiry is filtered at the end of the tick)
pub fn decay_area_boosters(state: &mut GameState, dt: f32) {
    for zone in &mut state.area_boosters {
        zone.duration -= dt;
    }
}

/// Move the ball along its heading on the unit torus
pub fn move_ball(state: &mut GameState, dt: f32) {
    let next = state.ball.pos + state.direction * state.tuning.ball_speed * dt;
    state.ball.set_position(wrap_point(next));
}

/// Ball vs players
///
/// The first player in list order touching the ball takes it. Players clear
/// of the ball get their speed refreshed from the area zones they stand in;
/// anyone touching it keeps their current speed.
pub fn resolve_ball_players(state: &mut GameState) {
    let ball = state.ball.collider;
    let catcher = state
        .players
        .iter()
        .position(|p| p.collider.overlaps(&ball));

    if let Some(idx) = catcher {
        let player = &state.players[idx];
        let heading = safe_normalize(ball.pos - player.pos);
        if heading != Vec2::ZERO {
            state.direction = heading;
        }
        state.area_boosters.push(AreaBooster {
            collider: Circle::new(player.pos, player.radius() * state.tuning.area_radius_factor),
            color: player.color,
            duration: state.tuning.area_duration,
        });
        state.ball_owner = Some(player.name.clone());
        state.events.push(GameEvent::BallCaught {
            player: player.name.clone(),
        });
    }

    let base = state.tuning.player_base_speed;
    let boost = state.tuning.zone_speed_multiplier;
    for player in state.players.iter_mut() {
        if player.collider.overlaps(&ball) {
            continue;
        }
        player.speed = base;
        let in_own_zone = state
            .area_boosters
            .iter()
            .any(|zone| zone.color == player.color && zone.collider.contains_point(player.pos));
        if in_own_zone {
            player.speed *= boost;
        }
    }
}

/// Ball vs obstacles: deflect, wear down, drop worn-out obstacles
pub fn resolve_ball_obstacles(state: &mut GameState) {
    let ball = state.ball.collider;
    let obstacles = std::mem::take(&mut state.obstacles);
    let mut kept = Vec::with_capacity(obstacles.len());
    for mut obstacle in obstacles {
        if obstacle.collider.overlaps(&ball) {
            let heading = safe_normalize(ball.pos - obstacle.collider.pos);
            if heading != Vec2::ZERO {
                state.direction = heading;
            }
            obstacle.life_counter = obstacle.life_counter.saturating_sub(1);
            state.events.push(GameEvent::ObstacleHit {
                obstacle_id: obstacle.id,
                lives_left: obstacle.life_counter,
            });
        }
        if obstacle.life_counter == 0 {
            state.events.push(GameEvent::ObstacleDestroyed {
                obstacle_id: obstacle.id,
            });
        } else {
            kept.push(obstacle);
        }
    }
    state.obstacles = kept;
}

/// Move boosters being relocated by the shuffle effect
pub fn advance_shuffler(state: &mut GameState, dt: f32) {
    let step = state.tuning.shuffle_speed * dt;
    let arrive = state.tuning.shuffle_arrive_distance;
    state
        .boost_shuffler
        .update(&mut state.boosters, step, arrive);
}

/// Apply externally requested effects to the ball owner, newest first
pub fn drain_requested<R: Rng>(state: &mut GameState, rng: &mut R) {
    while let Some(effect) = state.requested_boosters.pop() {
        let target = state.ball_owner.clone();
        effect::apply(effect, target.as_deref(), state, rng);
        state
            .events
            .push(GameEvent::RequestedEffectApplied { effect, target });
    }
}

/// Boosters vs ball, then vs players; touched boosters are consumed
pub fn resolve_boosters<R: Rng>(state: &mut GameState, rng: &mut R) {
    let boosters = std::mem::take(&mut state.boosters);
    let mut kept = Vec::with_capacity(boosters.len());
    for booster in boosters {
        let target = if booster.collider.overlaps(&state.ball.collider) {
            Some(state.ball_owner.clone())
        } else {
            state
                .players
                .iter()
                .find(|p| p.collider.overlaps(&booster.collider))
                .map(|p| Some(p.name.clone()))
        };

        match target {
            Some(target) => consume(state, booster.id, booster.effect, target, rng),
            None => kept.push(booster),
        }
    }
    state.boosters = kept;
}

fn consume<R: Rng>(
    state: &mut GameState,
    booster_id: u32,
    effect: Effect,
    target: Option<String>,
    rng: &mut R,
) {
    log::debug!("Booster {booster_id} ({effect}) consumed, target {target:?}");
    effect::apply(effect, target.as_deref(), state, rng);
    state.events.push(GameEvent::BoosterConsumed {
        booster_id,
        effect,
        target,
    });
}

/// Drop eliminated players and expired zones
pub fn remove_dead_and_expired(state: &mut GameState) {
    let players = std::mem::take(&mut state.players);
    let (dead, alive): (Vec<_>, Vec<_>) = players.into_iter().partition(|p| p.dead);
    for player in dead {
        log::info!("Player {} eliminated", player.name);
        state
            .events
            .push(GameEvent::PlayerEliminated { player: player.name });
    }
    state.players = alive;
    state.area_boosters.retain(|zone| !zone.is_expired());
}

/// Hand the ball to a random survivor if its owner is gone
pub fn reassign_owner<R: Rng>(state: &mut GameState, rng: &mut R) {
    if state.owner().is_some() {
        return;
    }
    if state.players.is_empty() {
        if state.ball_owner.take().is_some() {
            log::info!("No players left; ball has no owner");
            state.events.push(GameEvent::OwnerLost);
        }
        return;
    }
    let idx = rng.random_range(0..state.players.len());
    let name = state.players[idx].name.clone();
    log::debug!("Ball reassigned to {name}");
    state.ball_owner = Some(name.clone());
    state.events.push(GameEvent::OwnerReassigned { player: name });
}
