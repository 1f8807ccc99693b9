//! Orb collection against occluded ripple fronts
//!
//! An orb is reached when it lies inside a ripple's radius AND inside the
//! limit of the angular sample that points at it. The second test is what
//! lets walls shield orbs: a plain circle check would see through them.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ripple::Ripple;
use super::state::Orb;
use crate::angle_from;

/// An orb was just reached by a ripple
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub orb_id: u32,
    pub pos: Vec2,
}

/// Whether `ripple`'s unoccluded front has reached `point`
pub fn ripple_reaches(ripple: &Ripple, point: Vec2) -> bool {
    let dist = point.distance(ripple.origin);
    if dist > ripple.radius {
        return false;
    }
    dist <= ripple.limit_toward(angle_from(ripple.origin, point))
}

/// Mark every orb reached by any ripple as collected.
///
/// Collected orbs are skipped entirely, so each orb yields at most one
/// collection over its lifetime no matter how often this runs. Scoring is
/// left to the caller.
pub fn resolve_collisions(orbs: &mut [Orb], ripples: &[Ripple]) -> Vec<Collection> {
    let mut collected = Vec::new();

    for orb in orbs.iter_mut().filter(|o| !o.collected) {
        if ripples.iter().any(|r| ripple_reaches(r, orb.pos)) {
            orb.collected = true;
            collected.push(Collection {
                orb_id: orb.id,
                pos: orb.pos,
            });
        }
    }

    collected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ORB_RADIUS;
    use crate::sim::geometry::{PlayArea, Wall};

    const AREA: PlayArea = PlayArea {
        width: 200.0,
        height: 200.0,
    };

    fn ripple_at(origin: Vec2, radius: f32, walls: &[Wall]) -> Ripple {
        let mut r = Ripple::new(origin, AREA, walls);
        r.radius = radius;
        r
    }

    #[test]
    fn test_orb_inside_radius_collected() {
        let mut orbs = vec![Orb::new(1, Vec2::new(120.0, 100.0), ORB_RADIUS)];
        let ripples = [ripple_at(Vec2::new(100.0, 100.0), 25.0, &[])];
        let hits = resolve_collisions(&mut orbs, &ripples);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].orb_id, 1);
        assert!(orbs[0].collected);
    }

    #[test]
    fn test_orb_outside_radius_untouched() {
        let mut orbs = vec![Orb::new(1, Vec2::new(150.0, 100.0), ORB_RADIUS)];
        let ripples = [ripple_at(Vec2::new(100.0, 100.0), 25.0, &[])];
        assert!(resolve_collisions(&mut orbs, &ripples).is_empty());
        assert!(!orbs[0].collected);
    }

    #[test]
    fn test_wall_shields_orb() {
        let walls = [Wall::new(0.0, 50.0, 200.0, 12.0)];
        // Orb straight below the origin, behind the wall
        let mut orbs = vec![Orb::new(1, Vec2::new(100.0, 80.0), ORB_RADIUS)];
        let ripples = [ripple_at(Vec2::new(100.0, 20.0), 100.0, &walls)];
        assert!(resolve_collisions(&mut orbs, &ripples).is_empty());
        assert!(!orbs[0].collected);
    }

    #[test]
    fn test_any_ripple_can_collect() {
        let walls = [Wall::new(0.0, 50.0, 200.0, 12.0)];
        let mut orbs = vec![Orb::new(1, Vec2::new(100.0, 80.0), ORB_RADIUS)];
        let ripples = [
            ripple_at(Vec2::new(100.0, 20.0), 100.0, &walls),
            ripple_at(Vec2::new(100.0, 150.0), 100.0, &walls),
        ];
        let hits = resolve_collisions(&mut orbs, &ripples);
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_collection_is_idempotent() {
        let mut orbs = vec![
            Orb::new(1, Vec2::new(110.0, 100.0), ORB_RADIUS),
            Orb::new(2, Vec2::new(90.0, 100.0), ORB_RADIUS),
        ];
        let mut ripples = vec![ripple_at(Vec2::new(100.0, 100.0), 15.0, &[])];

        let first = resolve_collisions(&mut orbs, &ripples);
        assert_eq!(first.len(), 2);

        // Same tick again, then with a bigger front
        assert!(resolve_collisions(&mut orbs, &ripples).is_empty());
        ripples[0].radius = 80.0;
        assert!(resolve_collisions(&mut orbs, &ripples).is_empty());
        assert!(orbs.iter().all(|o| o.collected));
    }
}
