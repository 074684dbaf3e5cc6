//! Area-effect ring spawner
//!
//! Emits one zone per `delay` seconds of accumulated simulation time, walking
//! the ring one degree at a time. Emission follows elapsed time rather than
//! tick count, so a long tick emits several zones at once.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use super::arena;
use super::collision::Circle;
use super::state::{AreaBooster, Color, Player};
use crate::tuning::Tuning;

/// One megaElectric activation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaBoosterSpawnerState {
    /// Player the zones belong to
    pub owner: String,
    /// Owner color at activation
    pub color: Color,
    /// Zone radius (owner collider radius scaled)
    pub zone_radius: f32,
    /// Next ring segment to emit
    pub index: u32,
    /// Segments in a full ring
    pub count: u32,
    pub elapsed_time: f32,
    /// Seconds between segments
    pub delay: f32,
    /// Lifetime of each emitted zone
    pub zone_duration: f32,
    pub finished: bool,
}

impl AreaBoosterSpawnerState {
    pub fn new(owner: &Player, tuning: &Tuning) -> Self {
        Self {
            owner: owner.name.clone(),
            color: owner.color,
            zone_radius: owner.radius() * tuning.area_radius_factor,
            index: 0,
            count: tuning.area_ring_count,
            elapsed_time: 0.0,
            delay: tuning.area_ring_delay,
            zone_duration: tuning.area_duration,
            finished: false,
        }
    }

    /// Accumulate `dt` and return the zones due this tick
    pub fn update(&mut self, dt: f32, ring_radius: f32) -> Vec<AreaBooster> {
        let mut zones = Vec::new();
        if self.finished {
            return zones;
        }

        self.elapsed_time += dt;
        let step = TAU / self.count as f32;
        while self.index < self.count && self.elapsed_time / self.delay > self.index as f32 {
            let angle = self.index as f32 * step;
            zones.push(AreaBooster {
                collider: Circle::new(arena::ring_point(angle, ring_radius), self.zone_radius),
                color: self.color,
                duration: self.zone_duration,
            });
            self.index += 1;
        }

        if self.index == self.count {
            self.finished = true;
            log::debug!("Area ring for {} finished", self.owner);
        }
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ARENA_CENTER;
    use crate::sim::collision::distance;
    use glam::Vec2;

    fn spawner() -> AreaBoosterSpawnerState {
        let owner = Player::new("alice", Vec2::new(0.9, 0.5), 0.05, Color(0xff0000), 2.0);
        AreaBoosterSpawnerState::new(&owner, &Tuning::default())
    }

    #[test]
    fn test_new_spawner_defaults() {
        let s = spawner();
        assert_eq!(s.count, 360);
        assert_eq!(s.delay, 0.01);
        assert_eq!(s.index, 0);
        assert!(!s.finished);
        assert!((s.zone_radius - 0.025 * 1.1).abs() < 1e-6);
    }

    #[test]
    fn test_emission_tracks_elapsed_time() {
        let mut s = spawner();
        // 0.016 / 0.01 = 1.6 -> indices 0 and 1 are due
        let zones = s.update(0.016, 0.4);
        assert_eq!(zones.len(), 2);
        assert_eq!(s.index, 2);

        // 0.032 / 0.01 = 3.2 -> indices 2 and 3
        let zones = s.update(0.016, 0.4);
        assert_eq!(zones.len(), 2);
        assert_eq!(s.index, 4);
    }

    #[test]
    fn test_zones_lie_on_ring_in_owner_color() {
        let mut s = spawner();
        let zones = s.update(0.05, 0.4);
        assert!(!zones.is_empty());
        for zone in &zones {
            assert!((distance(zone.collider.pos, ARENA_CENTER) - 0.4).abs() < 1e-5);
            assert_eq!(zone.color, Color(0xff0000));
            assert_eq!(zone.duration, 2.0);
        }
        // First zone sits at angle zero
        assert!((zones[0].collider.pos - Vec2::new(0.9, 0.5)).length() < 1e-6);
    }

    #[test]
    fn test_finishes_after_full_ring() {
        let mut s = spawner();
        let mut total = 0;
        for _ in 0..1000 {
            total += s.update(1.0 / 60.0, 0.4).len();
            if s.finished {
                break;
            }
        }
        assert!(s.finished);
        assert_eq!(total, 360);
        assert!(s.update(1.0, 0.4).is_empty());
    }

    #[test]
    fn test_long_tick_emits_everything_once() {
        let mut s = spawner();
        let zones = s.update(10.0, 0.4);
        assert_eq!(zones.len(), 360);
        assert!(s.finished);
    }
}
