//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically. Every source of
//! randomness comes from the RNG handed in by the caller.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::GameState;
use super::{resolve, spawner};
use crate::error::StepError;

/// Movement intent for one player, accumulated since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputState {
    pub dx: f32,
    /// Drives rotation along the ring
    pub dy: f32,
    /// Pointer position, if the client sent one
    pub click: Option<Vec2>,
}

impl InputState {
    pub fn movement(dx: f32, dy: f32) -> Self {
        Self {
            dx,
            dy,
            click: None,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.dx != 0.0 || self.dy != 0.0
    }

    fn is_finite(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite() && self.click.is_none_or(|c| c.is_finite())
    }
}

/// One input message from a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputRecord {
    pub player_name: String,
    #[serde(default)]
    pub dx: f32,
    #[serde(default)]
    pub dy: f32,
    #[serde(default)]
    pub click: Option<Vec2>,
}

/// Input commands for a single tick, keyed by player name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    pub players: BTreeMap<String, InputState>,
}

impl TickInput {
    /// Buffer a client message; deltas from repeated messages add up
    pub fn push(&mut self, record: InputRecord) {
        let entry = self.players.entry(record.player_name).or_default();
        entry.dx += record.dx;
        entry.dy += record.dy;
        if record.click.is_some() {
            entry.click = record.click;
        }
    }

    pub fn set(&mut self, player: &str, input: InputState) {
        self.players.insert(player.to_string(), input);
    }

    pub fn get(&self, player: &str) -> Option<&InputState> {
        self.players.get(player)
    }

    /// Hand the buffered input to a tick and start over empty
    pub fn take(&mut self) -> TickInput {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

fn validate(state: &GameState, input: &TickInput, dt: f32) -> Result<(), StepError> {
    if !dt.is_finite() || dt <= 0.0 {
        return Err(StepError::InvalidTimestep(dt));
    }
    for (name, intent) in &input.players {
        if !intent.is_finite() {
            return Err(StepError::MalformedInput {
                player: name.clone(),
                field: if !intent.dx.is_finite() {
                    "dx"
                } else if !intent.dy.is_finite() {
                    "dy"
                } else {
                    "click"
                },
            });
        }
        if state.player(name).is_none() {
            log::debug!("Ignoring input for unknown player {name}");
        }
    }
    Ok(())
}

/// Advance the game state by one timestep
///
/// Nothing is modified when the timestep or an input is rejected.
pub fn tick<R: Rng>(
    state: &mut GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> Result<(), StepError> {
    validate(state, input, dt)?;

    state.events.clear();
    state.time_ticks += 1;
    state.elapsed += dt;

    resolve::apply_inputs(state, input, dt);

    // Spawners
    spawner::update(state, dt, rng);
    resolve::advance_area_spawners(state, dt);
    resolve::decay_area_boosters(state, dt);

    // Ball
    resolve::move_ball(state, dt);
    resolve::resolve_ball_players(state);
    resolve::resolve_ball_obstacles(state);

    // Boosters and effects
    resolve::advance_shuffler(state, dt);
    resolve::drain_requested(state, rng);
    resolve::resolve_boosters(state, rng);

    resolve::remove_dead_and_expired(state);
    resolve::reassign_owner(state, rng);

    log::trace!(
        "Tick {}: {} players, {} boosters, {} events",
        state.time_ticks,
        state.players.len(),
        state.boosters.len(),
        state.events.len()
    );
    Ok(())
}

/// Produce the next snapshot without touching `state`
pub fn step<R: Rng>(
    state: &GameState,
    input: &TickInput,
    dt: f32,
    rng: &mut R,
) -> Result<GameState, StepError> {
    validate(state, input, dt)?;
    let mut next = state.clone();
    tick(&mut next, input, dt, rng)?;
    Ok(next)
}
