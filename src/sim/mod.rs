//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Randomness only through the caller's RNG
//! - Stable iteration order (seating order, booster IDs)
//! - No I/O or wall-clock reads

pub mod area;
pub mod arena;
pub mod collision;
pub mod effect;
pub mod resolve;
pub mod shuffler;
pub mod spawner;
pub mod state;
pub mod tick;

pub use area::AreaBoosterSpawnerState;
pub use arena::Arena;
pub use collision::{Circle, Segment};
pub use effect::{BoosterCatalog, CatalogEntry, Effect};
pub use shuffler::{BoostShufflerState, ShufflerPhase};
pub use spawner::BoostSpawnerState;
pub use state::{
    AreaBooster, Ball, Booster, Color, GameEvent, GameState, Obstacle, PLAYER_PALETTE, Player,
};
pub use tick::{InputRecord, InputState, TickInput, step, tick};
