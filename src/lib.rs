//! Hot Potato - simulation core for a multiplayer ring arena
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, collisions, boosters, game state)
//! - `tuning`: Data-driven game balance
//! - `standings`: Elimination order and match winner
//! - `error`: Error types surfaced at the simulation boundary

pub mod error;
pub mod sim;
pub mod standings;
pub mod tuning;

pub use error::{SetupError, StepError, TuningError, UnknownEffect};
pub use standings::Standings;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep used by the headless driver (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Arena center in normalized coordinates
    pub const ARENA_CENTER: Vec2 = Vec2::new(0.5, 0.5);

    /// Magnitudes below this normalize to zero instead of failing
    pub const NORMALIZE_EPSILON: f32 = 0.001;

    /// Booster placement attempts before accepting an overlapping candidate
    pub const SPAWN_ATTEMPTS: usize = 10;

    /// Ball direction at match start
    pub const INITIAL_DIRECTION: Vec2 = Vec2::new(0.6, 0.8);
}

/// Wrap a coordinate onto the unit torus `[0, 1)`
#[inline]
pub fn wrap_unit(mut v: f32) -> f32 {
    if v >= 1.0 {
        v -= 1.0;
    } else if v < 0.0 {
        v += 1.0;
    }
    // Large steps or rounding can still land outside after one correction
    if !(0.0..1.0).contains(&v) {
        v = v.rem_euclid(1.0);
        if v >= 1.0 {
            v = 0.0;
        }
    }
    v
}

/// Wrap a point onto the unit torus
#[inline]
pub fn wrap_point(p: Vec2) -> Vec2 {
    Vec2::new(wrap_unit(p.x), wrap_unit(p.y))
}

/// Convert polar (r, theta) around the arena center to arena coordinates
#[inline]
pub fn polar_to_arena(r: f32, theta: f32) -> Vec2 {
    consts::ARENA_CENTER + Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Map an arena point from `[0, 1]` into centered `[-1, 1]` space
#[inline]
pub fn to_centered(p: Vec2) -> Vec2 {
    p * 2.0 - Vec2::ONE
}

/// Map a centered `[-1, 1]` point back into arena `[0, 1]` space
#[inline]
pub fn from_centered(p: Vec2) -> Vec2 {
    (p + Vec2::ONE) * 0.5
}
