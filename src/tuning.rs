//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives here so a match can be
//! rebalanced from a JSON file without recompiling. Missing fields fall back
//! to the defaults below.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::TuningError;
use crate::sim::effect::{BoosterCatalog, CatalogEntry};

/// Balance constants for one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Arena ===
    /// Radius of the ring players move along (arena units)
    pub ring_radius: f32,

    // === Ball ===
    /// Ball linear speed (arena units per second)
    pub ball_speed: f32,
    /// Starting ball diameter
    pub ball_size: f32,
    /// Upper bound for the ball diameter after growth effects
    pub ball_max_size: f32,

    // === Players ===
    /// Starting player diameter
    pub player_size: f32,
    /// Base angular speed (radians per second per unit of input)
    pub player_base_speed: f32,
    /// Speed multiplier while standing in an own-color area zone
    pub zone_speed_multiplier: f32,

    // === Effects ===
    /// Size multiplier applied by the growth effects
    pub growth_factor: f32,
    /// Booster collider radius
    pub booster_radius: f32,
    /// Obstacle collider radius
    pub obstacle_radius: f32,
    /// Ball hits an obstacle absorbs before disappearing
    pub obstacle_lives: u32,

    // === Booster spawner ===
    /// Seconds between booster spawns
    pub spawn_delay: f32,

    // === Shuffler ===
    /// Booster relocation speed (arena units per second)
    pub shuffle_speed: f32,
    /// Remaining distance at which a relocated booster counts as arrived
    pub shuffle_arrive_distance: f32,

    // === Area effects ===
    /// Zones emitted by one ring spawner
    pub area_ring_count: u32,
    /// Seconds between ring zone emissions
    pub area_ring_delay: f32,
    /// Lifetime of a single area zone (seconds)
    pub area_duration: f32,
    /// Zone radius relative to the owning player's collider radius
    pub area_radius_factor: f32,

    /// Weighted booster catalog
    pub catalog: Vec<CatalogEntry>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ring_radius: 0.4,

            ball_speed: 0.3,
            ball_size: 0.03,
            ball_max_size: 0.12,

            player_size: 0.05,
            player_base_speed: 2.0,
            zone_speed_multiplier: 1.5,

            growth_factor: 1.2,
            booster_radius: 0.02,
            obstacle_radius: 0.03,
            obstacle_lives: 3,

            spawn_delay: 3.0,

            shuffle_speed: 0.10,
            shuffle_arrive_distance: 0.005,

            area_ring_count: 360,
            area_ring_delay: 0.01,
            area_duration: 2.0,
            area_radius_factor: 1.1,

            catalog: BoosterCatalog::default_entries(),
        }
    }
}

impl Tuning {
    /// Load tuning from a JSON file and validate it
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Parse tuning from a JSON string and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("ring_radius", self.ring_radius),
            ("ball_size", self.ball_size),
            ("ball_max_size", self.ball_max_size),
            ("player_size", self.player_size),
            ("growth_factor", self.growth_factor),
            ("booster_radius", self.booster_radius),
            ("obstacle_radius", self.obstacle_radius),
            ("spawn_delay", self.spawn_delay),
            ("shuffle_arrive_distance", self.shuffle_arrive_distance),
            ("area_ring_delay", self.area_ring_delay),
            ("area_duration", self.area_duration),
            ("area_radius_factor", self.area_radius_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }

        let non_negative = [
            ("ball_speed", self.ball_speed),
            ("player_base_speed", self.player_base_speed),
            ("zone_speed_multiplier", self.zone_speed_multiplier),
            ("shuffle_speed", self.shuffle_speed),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(TuningError::Invalid(format!(
                    "{name} must be non-negative, got {value}"
                )));
            }
        }

        if self.ball_max_size < self.ball_size {
            return Err(TuningError::Invalid(
                "ball_max_size must be at least ball_size".to_string(),
            ));
        }
        if self.obstacle_lives == 0 {
            return Err(TuningError::Invalid(
                "obstacle_lives must be at least 1".to_string(),
            ));
        }
        if self.area_ring_count == 0 {
            return Err(TuningError::Invalid(
                "area_ring_count must be at least 1".to_string(),
            ));
        }
        let total = self
            .catalog
            .iter()
            .try_fold(0u32, |acc, e| acc.checked_add(e.weight))
            .ok_or_else(|| TuningError::Invalid("catalog weight total overflows".to_string()))?;
        if total == 0 {
            return Err(TuningError::Invalid(
                "booster catalog needs a positive total weight".to_string(),
            ));
        }
        Ok(())
    }

    /// Booster catalog view
    pub fn booster_catalog(&self) -> BoosterCatalog<'_> {
        BoosterCatalog::new(&self.catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::effect::Effect;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let tuning = Tuning::from_json(r#"{ "ball_speed": 0.5 }"#).unwrap();
        assert_eq!(tuning.ball_speed, 0.5);
        assert_eq!(tuning.spawn_delay, Tuning::default().spawn_delay);
        assert_eq!(tuning.catalog.len(), 6);
    }

    #[test]
    fn test_catalog_from_json() {
        let json = r#"{
            "catalog": [
                { "effect": "deathBall", "color": 16711680, "weight": 1 },
                { "effect": "biggerBall", "color": 255, "weight": 3 }
            ]
        }"#;
        let tuning = Tuning::from_json(json).unwrap();
        assert_eq!(tuning.catalog.len(), 2);
        assert_eq!(tuning.catalog[0].effect, Effect::DeathBall);
        assert_eq!(tuning.catalog[1].weight, 3);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "spawn_delay": 0.0 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "catalog": [] }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "ball_size": 0.5, "ball_max_size": 0.1 }"#),
            Err(TuningError::Invalid(_))
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_rejects_overflowing_catalog_weights() {
        let json = r#"{
            "catalog": [
                { "effect": "deathBall", "color": 1, "weight": 4294967295 },
                { "effect": "biggerBall", "color": 2, "weight": 1 }
            ]
        }"#;
        match Tuning::from_json(json) {
            Err(TuningError::Invalid(msg)) => assert!(msg.contains("overflows")),
            other => panic!("expected overflow rejection, got {other:?}"),
        }

        // Largest total that still fits is accepted
        let json = r#"{
            "catalog": [
                { "effect": "deathBall", "color": 1, "weight": 4294967294 },
                { "effect": "biggerBall", "color": 2, "weight": 1 }
            ]
        }"#;
        assert!(Tuning::from_json(json).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let result = Tuning::load("/definitely/not/here/tuning.json");
        assert!(matches!(result, Err(TuningError::Io(_))));
    }
}
