//! Booster relocation triggered by the shuffle effect
//!
//! A fresh shuffler spends its first tick recording where every active
//! booster should go (its mirror image through the arena center). After that
//! it slides boosters toward their destinations at a fixed speed and forgets
//! each one as it arrives. Destinations are keyed by booster id, so the map
//! survives the booster list being rebuilt between ticks.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{distance, safe_normalize};
use super::state::Booster;
use crate::{from_centered, to_centered};

/// Where the shuffler is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShufflerPhase {
    /// Created, destinations not yet recorded
    Initializing,
    /// Moving boosters toward their destinations
    Converging,
    /// Nothing left to move
    Dormant,
}

/// Booster id -> destination mapping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoostShufflerState {
    pub initialized: bool,
    pub destinations: BTreeMap<u32, Vec2>,
}

impl BoostShufflerState {
    /// Fresh, uninitialized shuffler (what the shuffle effect installs)
    pub fn new() -> Self {
        Self {
            initialized: false,
            destinations: BTreeMap::new(),
        }
    }

    /// Shuffler with nothing to do (match start)
    pub fn dormant() -> Self {
        Self {
            initialized: true,
            destinations: BTreeMap::new(),
        }
    }

    pub fn phase(&self) -> ShufflerPhase {
        if !self.initialized {
            ShufflerPhase::Initializing
        } else if self.destinations.is_empty() {
            ShufflerPhase::Dormant
        } else {
            ShufflerPhase::Converging
        }
    }

    /// Advance one tick
    ///
    /// `step` is the distance a booster may travel this tick and
    /// `arrive_distance` the remaining distance at which it counts as there.
    pub fn update(&mut self, boosters: &mut [Booster], step: f32, arrive_distance: f32) {
        if !self.initialized {
            self.destinations = boosters
                .iter()
                .map(|b| (b.id, mirror_destination(b.collider.pos)))
                .collect();
            self.initialized = true;
            log::debug!("Shuffling {} boosters", self.destinations.len());
            return;
        }

        if self.destinations.is_empty() {
            return;
        }

        // Boosters consumed since last tick leave no orphaned entries
        self.destinations
            .retain(|id, _| boosters.iter().any(|b| b.id == *id));

        for booster in boosters.iter_mut() {
            let Some(&dest) = self.destinations.get(&booster.id) else {
                continue;
            };
            let remaining = distance(booster.collider.pos, dest);
            let direction = safe_normalize(dest - booster.collider.pos);
            let pos = booster.collider.pos + direction * step.min(remaining);
            booster.collider.pos = pos;

            if distance(pos, dest) < arrive_distance {
                self.destinations.remove(&booster.id);
            }
        }
    }
}

/// Point reflection through the arena center
pub fn mirror_destination(pos: Vec2) -> Vec2 {
    from_centered(-to_centered(pos))
}
