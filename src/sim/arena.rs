//! Ring arena topology
//!
//! Players sit on a ring around the arena center. In polar terms a seat is
//! just an angle; the ring radius comes from tuning. The wall polygon has one
//! side per seat (at least three) and circumscribes the ring.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Circle, Segment, circle_segment_overlap};
use crate::consts::ARENA_CENTER;
use crate::polar_to_arena;

/// Gap between the ring and the wall apothem, relative to ring radius
pub const WALL_MARGIN: f32 = 0.15;

/// Angle of seat `index` when `count` players share the ring
#[inline]
pub fn seat_angle(index: usize, count: usize) -> f32 {
    index as f32 * TAU / count.max(1) as f32
}

/// Arena position of seat `index`
pub fn seat_position(index: usize, count: usize, ring_radius: f32) -> Vec2 {
    ring_point(seat_angle(index, count), ring_radius)
}

/// Point on the ring at `angle`
#[inline]
pub fn ring_point(angle: f32, ring_radius: f32) -> Vec2 {
    polar_to_arena(ring_radius, angle)
}

/// Rotate a point around the arena center
#[inline]
pub fn rotate_about_center(point: Vec2, angle: f32) -> Vec2 {
    ARENA_CENTER + Vec2::from_angle(angle).rotate(point - ARENA_CENTER)
}

/// Uniform random point inside the disk of `radius` around the center
pub fn random_inner_point<R: Rng>(rng: &mut R, radius: f32) -> Vec2 {
    let r = radius * rng.random::<f32>().sqrt();
    let theta = rng.random::<f32>() * TAU;
    polar_to_arena(r, theta)
}

/// Wall polygon around the ring
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    /// Number of wall sides
    pub sides: usize,
    /// Ring radius the walls enclose
    pub ring_radius: f32,
}

impl Arena {
    /// Arena for a match seating `number_of_players`
    pub fn for_players(number_of_players: usize, ring_radius: f32) -> Self {
        Self {
            sides: number_of_players.max(3),
            ring_radius,
        }
    }

    /// Distance from center to the middle of each wall
    pub fn apothem(&self) -> f32 {
        self.ring_radius * (1.0 + WALL_MARGIN)
    }

    /// Wall corners, counter-clockwise
    pub fn corners(&self) -> Vec<Vec2> {
        let corner_radius = self.apothem() / (PI / self.sides as f32).cos();
        (0..self.sides)
            .map(|i| {
                // Offset by half a side so each seat faces the middle of a wall
                let theta = seat_angle(i, self.sides) - PI / self.sides as f32;
                polar_to_arena(corner_radius, theta)
            })
            .collect()
    }

    /// Wall segments
    pub fn walls(&self) -> Vec<Segment> {
        let corners = self.corners();
        (0..corners.len())
            .map(|i| Segment::new(corners[i], corners[(i + 1) % corners.len()]))
            .collect()
    }

    /// Whether a collider touches any wall
    pub fn touches_wall(&self, collider: &Circle) -> bool {
        self.walls()
            .iter()
            .any(|wall| circle_segment_overlap(collider, wall))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::distance;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_seats_are_evenly_spaced() {
        let a = seat_position(0, 4, 0.4);
        let b = seat_position(1, 4, 0.4);
        assert!((a - Vec2::new(0.9, 0.5)).length() < 1e-6);
        assert!((b - Vec2::new(0.5, 0.9)).length() < 1e-6);
        assert!((distance(a, ARENA_CENTER) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_rotation_keeps_ring_distance() {
        let p = seat_position(0, 2, 0.4);
        let rotated = rotate_about_center(p, PI / 2.0);
        assert!((distance(rotated, ARENA_CENTER) - 0.4).abs() < 1e-5);
        assert!((rotated - Vec2::new(0.5, 0.9)).length() < 1e-5);
    }

    #[test]
    fn test_random_inner_point_stays_in_disk() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..1000 {
            let p = random_inner_point(&mut rng, 0.4);
            assert!(distance(p, ARENA_CENTER) <= 0.4 + 1e-6);
        }
    }

    #[test]
    fn test_walls_enclose_ring() {
        let arena = Arena::for_players(2, 0.4);
        assert_eq!(arena.sides, 3);
        assert_eq!(arena.walls().len(), 3);

        // Anything on the ring is clear of the walls
        for i in 0..12 {
            let on_ring = Circle::new(seat_position(i, 12, 0.4), 0.01);
            assert!(!arena.touches_wall(&on_ring));
        }

        // A collider centered on a corner touches
        let corner = arena.corners()[0];
        assert!(arena.touches_wall(&Circle::new(corner, 0.01)));
    }
}
