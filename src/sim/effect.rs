//! Booster effects and the weighted booster catalog
//!
//! The effect set is closed: every effect is a variant of [`Effect`] and
//! [`apply`] matches on all of them.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::area::AreaBoosterSpawnerState;
use super::arena;
use super::collision::Circle;
use super::shuffler::BoostShufflerState;
use super::state::{Color, GameEvent, GameState, Obstacle};
use crate::error::UnknownEffect;

/// Effect triggered by a booster or requested externally
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Effect {
    /// Grow the triggering player
    BiggerPlayer,
    /// Grow the ball (clamped)
    BiggerBall,
    /// Mirror every booster through the arena center
    ShuffleBoosters,
    /// Drop an obstacle somewhere in the arena
    Obstacle,
    /// Paint a ring of speed zones in the triggering player's color
    MegaElectric,
    /// Eliminate the triggering player
    DeathBall,
}

impl Effect {
    pub const ALL: [Effect; 6] = [
        Effect::BiggerPlayer,
        Effect::BiggerBall,
        Effect::ShuffleBoosters,
        Effect::Obstacle,
        Effect::MegaElectric,
        Effect::DeathBall,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Effect::BiggerPlayer => "biggerPlayer",
            Effect::BiggerBall => "biggerBall",
            Effect::ShuffleBoosters => "shuffleBoosters",
            Effect::Obstacle => "obstacle",
            Effect::MegaElectric => "megaElectric",
            Effect::DeathBall => "deathBall",
        }
    }

    /// Whether the effect needs a player to act on
    pub fn targets_player(&self) -> bool {
        matches!(
            self,
            Effect::BiggerPlayer | Effect::MegaElectric | Effect::DeathBall
        )
    }
}

impl fmt::Display for Effect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Effect {
    type Err = UnknownEffect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Effect::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| UnknownEffect(s.to_string()))
    }
}

/// One catalog line: which effect, how it looks, how often it appears
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub effect: Effect,
    pub color: Color,
    pub weight: u32,
}

/// Weighted view over catalog entries
#[derive(Debug, Clone, Copy)]
pub struct BoosterCatalog<'a> {
    entries: &'a [CatalogEntry],
}

impl<'a> BoosterCatalog<'a> {
    pub fn new(entries: &'a [CatalogEntry]) -> Self {
        Self { entries }
    }

    /// Stock catalog used when no tuning overrides it
    pub fn default_entries() -> Vec<CatalogEntry> {
        vec![
            CatalogEntry {
                effect: Effect::BiggerPlayer,
                color: Color(0x4caf50),
                weight: 20,
            },
            CatalogEntry {
                effect: Effect::BiggerBall,
                color: Color(0x2196f3),
                weight: 20,
            },
            CatalogEntry {
                effect: Effect::ShuffleBoosters,
                color: Color(0x9c27b0),
                weight: 10,
            },
            CatalogEntry {
                effect: Effect::Obstacle,
                color: Color(0x795548),
                weight: 20,
            },
            CatalogEntry {
                effect: Effect::MegaElectric,
                color: Color(0xffeb3b),
                weight: 15,
            },
            CatalogEntry {
                effect: Effect::DeathBall,
                color: Color(0x212121),
                weight: 5,
            },
        ]
    }

    pub fn entries(&self) -> &'a [CatalogEntry] {
        self.entries
    }

    /// Sum of all weights, widened so any catalog fits
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Resolve a draw in `[0, total_weight)` to an entry
    ///
    /// Walks the catalog accumulating weights; the first entry whose running
    /// sum is strictly greater than the draw wins.
    pub fn select(&self, draw: u64) -> Option<&'a CatalogEntry> {
        let mut running = 0u64;
        for entry in self.entries {
            running += u64::from(entry.weight);
            if running > draw {
                return Some(entry);
            }
        }
        None
    }

    /// Draw a weighted random entry (None only for an empty catalog)
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&'a CatalogEntry> {
        let total = self.total_weight();
        if total == 0 {
            return None;
        }
        self.select(rng.random_range(0..total))
    }
}

/// Apply an effect on behalf of `target` (a player name)
///
/// Player effects without a live target are dropped. Returns whether the
/// effect did anything.
pub fn apply<R: Rng>(
    effect: Effect,
    target: Option<&str>,
    state: &mut GameState,
    rng: &mut R,
) -> bool {
    if effect.targets_player() && target.and_then(|name| state.player(name)).is_none() {
        return drop_untargeted(effect);
    }
    match effect {
        Effect::BiggerPlayer => {
            let factor = state.tuning.growth_factor;
            match target.and_then(|name| state.player_mut(name)) {
                Some(player) => {
                    let size = player.size * factor;
                    player.set_size(size);
                    true
                }
                None => drop_untargeted(effect),
            }
        }
        Effect::BiggerBall => {
            let size =
                (state.ball.size * state.tuning.growth_factor).min(state.tuning.ball_max_size);
            state.ball.set_size(size);
            true
        }
        Effect::ShuffleBoosters => {
            state.boost_shuffler = BoostShufflerState::new();
            state.events.push(GameEvent::ShuffleStarted);
            true
        }
        Effect::Obstacle => {
            let pos = arena::random_inner_point(rng, state.tuning.ring_radius);
            let id = state.next_entity_id();
            state.obstacles.push(Obstacle {
                id,
                collider: Circle::new(pos, state.tuning.obstacle_radius),
                life_counter: state.tuning.obstacle_lives,
            });
            state.events.push(GameEvent::ObstacleCreated { obstacle_id: id });
            true
        }
        Effect::MegaElectric => {
            let spawner = target
                .and_then(|name| state.player(name))
                .map(|player| AreaBoosterSpawnerState::new(player, &state.tuning));
            match spawner {
                Some(spawner) => {
                    state.events.push(GameEvent::AreaRingStarted {
                        owner: spawner.owner.clone(),
                    });
                    state.area_spawners.push(spawner);
                    true
                }
                None => drop_untargeted(effect),
            }
        }
        Effect::DeathBall => match target.and_then(|name| state.player_mut(name)) {
            Some(player) => {
                player.dead = true;
                true
            }
            None => drop_untargeted(effect),
        },
    }
}

fn drop_untargeted(effect: Effect) -> bool {
    log::debug!("Dropping {effect}: no target player");
    false
}
