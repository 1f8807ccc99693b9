//! Axis-aligned wall geometry and ray casting
//!
//! Walls are rectangles in play-area coordinates (y grows downward). A ray
//! from an origin along a unit direction is tested against the four edges of
//! each wall; the nearest positive crossing is the distance the ray can travel.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Size of the play area (origin at the top-left corner)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

impl PlayArea {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Longest straight line inside the area; also the unobstructed ray limit
    #[inline]
    pub fn diagonal(&self) -> f32 {
        self.width.hypot(self.height)
    }
}

/// An axis-aligned rectangular wall
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Wall {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Strict overlap test: all four separating-axis conditions must hold.
    /// Walls that only touch along an edge do not overlap.
    pub fn overlaps(&self, other: &Wall) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// True if `point` lies strictly inside this wall grown by `pad` on every side
    pub fn contains_padded(&self, point: Vec2, pad: f32) -> bool {
        point.x > self.x - pad
            && point.x < self.right() + pad
            && point.y > self.y - pad
            && point.y < self.bottom() + pad
    }

    /// Distance along a ray to the nearest edge crossing, if any
    #[inline]
    pub fn ray_distance(&self, origin: Vec2, dir: Vec2) -> Option<f32> {
        ray_wall_distance(origin, dir, self)
    }
}

/// Overlap predicate for two walls
#[inline]
pub fn rects_overlap(a: &Wall, b: &Wall) -> bool {
    a.overlaps(b)
}

/// Nearest positive parametric distance at which the ray `origin + t * dir`
/// crosses one of the wall's edges.
///
/// Edges perpendicular to an axis are only tested when the direction has a
/// non-zero component on that axis, so a ray running parallel to an edge
/// never reports a hit on it. A crossing counts only if the other coordinate
/// falls within the wall's span (inclusive). Crossings at or behind the
/// origin are ignored.
pub fn ray_wall_distance(origin: Vec2, dir: Vec2, wall: &Wall) -> Option<f32> {
    let mut best: Option<f32> = None;
    let mut accept = |t: f32| {
        if t > 0.0 && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    if dir.x != 0.0 {
        for edge_x in [wall.x, wall.right()] {
            let t = (edge_x - origin.x) / dir.x;
            let yi = origin.y + dir.y * t;
            if yi >= wall.y && yi <= wall.bottom() {
                accept(t);
            }
        }
    }

    if dir.y != 0.0 {
        for edge_y in [wall.y, wall.bottom()] {
            let t = (edge_y - origin.y) / dir.y;
            let xi = origin.x + dir.x * t;
            if xi >= wall.x && xi <= wall.right() {
                accept(t);
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_ray_hits_near_edge() {
        let wall = Wall::new(100.0, -10.0, 20.0, 20.0);
        let t = ray_wall_distance(Vec2::ZERO, Vec2::X, &wall).unwrap();
        assert!(approx(t, 100.0));
    }

    #[test]
    fn test_ray_behind_origin_ignored() {
        let wall = Wall::new(100.0, -10.0, 20.0, 20.0);
        assert_eq!(ray_wall_distance(Vec2::ZERO, -Vec2::X, &wall), None);
    }

    #[test]
    fn test_ray_misses_outside_span() {
        let wall = Wall::new(100.0, 50.0, 20.0, 20.0);
        assert_eq!(ray_wall_distance(Vec2::ZERO, Vec2::X, &wall), None);
    }

    #[test]
    fn test_parallel_ray_no_spurious_hit() {
        // Horizontal wall below a horizontal ray: dir.y == 0 so its top and
        // bottom edges are never tested, and the side edges miss in y.
        let wall = Wall::new(-500.0, 10.0, 1000.0, 12.0);
        assert_eq!(ray_wall_distance(Vec2::ZERO, Vec2::X, &wall), None);
        assert_eq!(ray_wall_distance(Vec2::ZERO, -Vec2::X, &wall), None);

        // Vertical wall beside a vertical ray
        let wall = Wall::new(10.0, -500.0, 12.0, 1000.0);
        assert_eq!(ray_wall_distance(Vec2::ZERO, Vec2::Y, &wall), None);
    }

    #[test]
    fn test_origin_inside_wall_exits_through_far_edge() {
        let wall = Wall::new(-10.0, -10.0, 20.0, 20.0);
        let t = ray_wall_distance(Vec2::ZERO, Vec2::Y, &wall).unwrap();
        assert!(approx(t, 10.0));
    }

    #[test]
    fn test_diagonal_ray_hits_corner_region() {
        let wall = Wall::new(10.0, 10.0, 10.0, 10.0);
        let dir = Vec2::new((PI / 4.0).cos(), (PI / 4.0).sin());
        let t = ray_wall_distance(Vec2::ZERO, dir, &wall).unwrap();
        assert!(approx(t, 10.0 * 2f32.sqrt()));
    }

    #[test]
    fn test_rects_overlap() {
        let a = Wall::new(0.0, 0.0, 10.0, 10.0);
        assert!(rects_overlap(&a, &Wall::new(5.0, 5.0, 10.0, 10.0)));
        // Touching edges do not overlap
        assert!(!rects_overlap(&a, &Wall::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!rects_overlap(&a, &Wall::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_contains_padded() {
        let w = Wall::new(10.0, 10.0, 10.0, 10.0);
        assert!(w.contains_padded(Vec2::new(8.0, 15.0), 3.0));
        assert!(!w.contains_padded(Vec2::new(6.0, 15.0), 3.0));
    }
}
