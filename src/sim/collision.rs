//! Collision primitives for circular colliders
//!
//! Everything in the arena is a circle except the optional wall polygon,
//! which is made of line segments.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::NORMALIZE_EPSILON;

/// A circular collider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub pos: Vec2,
    pub radius: f32,
}

impl Circle {
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self { pos, radius }
    }

    /// Strict overlap: touching circles do not collide
    #[inline]
    pub fn overlaps(&self, other: &Circle) -> bool {
        distance(self.pos, other.pos) < self.radius + other.radius
    }

    /// Point containment, boundary inclusive
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        distance(self.pos, point) <= self.radius
    }
}

/// A line segment (arena walls)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub a: Vec2,
    pub b: Vec2,
}

impl Segment {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self { a, b }
    }

    pub fn min(&self) -> Vec2 {
        self.a.min(self.b)
    }

    pub fn max(&self) -> Vec2 {
        self.a.max(self.b)
    }

    /// Closest point on the segment to `p`
    pub fn closest_point(&self, p: Vec2) -> Vec2 {
        let line = self.b - self.a;
        let len_sq = line.length_squared();
        if len_sq < NORMALIZE_EPSILON * NORMALIZE_EPSILON {
            return self.a;
        }
        let t = ((p - self.a).dot(line) / len_sq).clamp(0.0, 1.0);
        self.a + line * t
    }
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    (a - b).length()
}

/// Normalize, returning zero for near-zero input instead of NaN
#[inline]
pub fn safe_normalize(v: Vec2) -> Vec2 {
    let len = v.length();
    if len < NORMALIZE_EPSILON {
        Vec2::ZERO
    } else {
        v / len
    }
}

/// Axis-aligned bounding box pre-check for two segments
pub fn segments_bbox_overlap(s1: &Segment, s2: &Segment) -> bool {
    let (min1, max1) = (s1.min(), s1.max());
    let (min2, max2) = (s2.min(), s2.max());
    min1.x <= max2.x && max1.x >= min2.x && min1.y <= max2.y && max1.y >= min2.y
}

/// Check whether a circle touches a segment
///
/// Runs the bounding-box pre-check against the circle's own box first.
pub fn circle_segment_overlap(circle: &Circle, segment: &Segment) -> bool {
    let r = Vec2::splat(circle.radius);
    let bounds = Segment::new(circle.pos - r, circle.pos + r);
    if !segments_bbox_overlap(&bounds, segment) {
        return false;
    }
    distance(segment.closest_point(circle.pos), circle.pos) < circle.radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_strict() {
        let a = Circle::new(Vec2::new(0.0, 0.0), 0.5);
        let touching = Circle::new(Vec2::new(1.0, 0.0), 0.5);
        let inside = Circle::new(Vec2::new(0.9, 0.0), 0.5);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_contains_point_inclusive() {
        let c = Circle::new(Vec2::new(0.5, 0.5), 0.25);
        assert!(c.contains_point(Vec2::new(0.75, 0.5)));
        assert!(c.contains_point(Vec2::new(0.5, 0.5)));
        assert!(!c.contains_point(Vec2::new(0.8, 0.5)));
    }

    #[test]
    fn test_safe_normalize() {
        assert_eq!(safe_normalize(Vec2::new(0.0005, 0.0)), Vec2::ZERO);
        assert_eq!(safe_normalize(Vec2::ZERO), Vec2::ZERO);

        let n = safe_normalize(Vec2::new(3.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);

        // Idempotent on unit vectors
        let again = safe_normalize(n);
        assert!((again - n).length() < 1e-6);
    }

    #[test]
    fn test_segment_bbox_precheck() {
        let horizontal = Segment::new(Vec2::new(0.0, 0.5), Vec2::new(1.0, 0.5));
        let vertical = Segment::new(Vec2::new(0.5, 0.0), Vec2::new(0.5, 1.0));
        let far = Segment::new(Vec2::new(2.0, 2.0), Vec2::new(3.0, 3.0));
        assert!(segments_bbox_overlap(&horizontal, &vertical));
        assert!(!segments_bbox_overlap(&horizontal, &far));
    }

    #[test]
    fn test_circle_segment_overlap() {
        let wall = Segment::new(Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0));
        assert!(circle_segment_overlap(
            &Circle::new(Vec2::new(0.5, 0.05), 0.1),
            &wall
        ));
        assert!(!circle_segment_overlap(
            &Circle::new(Vec2::new(0.5, 0.2), 0.1),
            &wall
        ));
        // Past the segment end
        assert!(!circle_segment_overlap(
            &Circle::new(Vec2::new(1.2, 0.05), 0.1),
            &wall
        ));
    }
}
