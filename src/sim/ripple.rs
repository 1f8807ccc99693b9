//! Ripple occlusion engine
//!
//! A ripple is a circular front expanding from a tap. Its angular resolution
//! is split into `segments` samples; each sample stores a limit, the distance
//! the front can travel in that direction before a wall blocks it.
//!
//! Resolution starts coarse and is promoted through [`SEGMENT_THRESHOLDS`] as
//! the radius grows. Promotion never goes backwards, and each promotion
//! recomputes the whole limits array at the new resolution.

use std::f32::consts::TAU;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{PlayArea, Wall};
use crate::consts::SEGMENT_THRESHOLDS;
use crate::direction;

/// An expanding, occluded blast front
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ripple {
    /// Tap position, fixed for the ripple's lifetime
    pub origin: Vec2,
    pub radius: f32,
    /// Angular resolution (number of samples around the circle)
    pub segments: usize,
    /// Max travel distance per angular sample, `limits.len() == segments`
    pub limits: Vec<f32>,
}

/// A ripple front was just stopped by a wall at `pos`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallHit {
    pub pos: Vec2,
}

impl Ripple {
    /// Spawn a ripple at the coarsest resolution with its limits computed
    /// up front, so the first frame already occludes correctly.
    pub fn new(origin: Vec2, area: PlayArea, walls: &[Wall]) -> Self {
        let segments = SEGMENT_THRESHOLDS[0].1;
        Self {
            origin,
            radius: 0.0,
            segments,
            limits: compute_visibility_limits(origin, segments, area, walls),
        }
    }

    /// Angle of sample `j` at the current resolution
    #[inline]
    pub fn sample_angle(&self, j: usize) -> f32 {
        sample_angle(j, self.segments)
    }

    /// Sample index covering `angle` (radians in [0, 2π))
    pub fn segment_index(&self, angle: f32) -> usize {
        let idx = (angle / TAU * self.segments as f32).floor() as usize;
        idx.min(self.segments - 1)
    }

    /// Limit of the sample covering `angle`
    #[inline]
    pub fn limit_toward(&self, angle: f32) -> f32 {
        self.limits[self.segment_index(angle)]
    }

    /// Whether sample `j` is still drawn at the current radius
    #[inline]
    pub fn is_sample_open(&self, j: usize, cutoff: f32) -> bool {
        self.radius + cutoff < self.limits[j]
    }

    /// The visible part of the front as disjoint polylines.
    ///
    /// Walks the samples once around the circle (revisiting sample 0 to close
    /// the loop); consecutive open samples form one arc, and an occluded
    /// sample ends the current arc.
    pub fn front_arcs(&self, cutoff: f32) -> Vec<Vec<Vec2>> {
        let mut arcs = Vec::new();
        let mut current: Vec<Vec2> = Vec::new();

        for i in 0..=self.segments {
            let j = i % self.segments;
            if self.is_sample_open(j, cutoff) {
                let dist = self.radius.min(self.limits[j]);
                current.push(self.origin + direction(self.sample_angle(j)) * dist);
            } else if !current.is_empty() {
                arcs.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            arcs.push(current);
        }
        arcs
    }
}

/// Angle of sample `j` out of `segments`
#[inline]
pub fn sample_angle(j: usize, segments: usize) -> f32 {
    j as f32 / segments as f32 * TAU
}

/// Resolution for a ripple of `radius`, never below `current`
pub fn segments_for_radius(radius: f32, current: usize) -> usize {
    SEGMENT_THRESHOLDS
        .iter()
        .rev()
        .find(|(threshold, _)| radius > *threshold)
        .map_or(current, |&(_, segments)| current.max(segments))
}

/// Per-sample travel limits from `origin` against every wall.
///
/// Unobstructed directions get the play-area diagonal.
pub fn compute_visibility_limits(origin: Vec2, segments: usize, area: PlayArea, walls: &[Wall]) -> Vec<f32> {
    let max_dist = area.diagonal();
    (0..segments)
        .map(|j| {
            let dir = direction(sample_angle(j, segments));
            walls
                .iter()
                .filter_map(|wall| wall.ray_distance(origin, dir))
                .fold(max_dist, f32::min)
        })
        .collect()
}

/// Advance every ripple by one tick.
///
/// Per ripple: promote resolution (recomputing limits if it changed), grow
/// the radius, and report each sample whose limit was crossed this tick.
/// Crossings are checked against the pre-growth radius and the same limits
/// that get stored. Ripples that would reach the diagonal are removed.
pub fn advance(ripples: &mut Vec<Ripple>, walls: &[Wall], area: PlayArea, growth: f32) -> Vec<WallHit> {
    let max_radius = area.diagonal();
    let mut hits = Vec::new();

    ripples.retain_mut(|ripple| {
        let target = segments_for_radius(ripple.radius, ripple.segments);
        if target > ripple.segments {
            ripple.limits = compute_visibility_limits(ripple.origin, target, area, walls);
            ripple.segments = target;
        }

        let new_radius = ripple.radius + growth;
        if new_radius >= max_radius {
            return false;
        }

        for (j, &limit) in ripple.limits.iter().enumerate() {
            if ripple.radius < limit && new_radius >= limit {
                let angle = sample_angle(j, ripple.segments);
                hits.push(WallHit {
                    pos: ripple.origin + direction(angle) * limit,
                });
            }
        }

        ripple.radius = new_radius;
        true
    });

    hits
}
