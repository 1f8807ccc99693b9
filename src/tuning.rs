//! Data-driven game balance
//!
//! Every field defaults to the matching constant in [`crate::consts`], so a
//! JSON override only needs the values it changes.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub max_taps: u32,
    /// Ripple radius growth per tick
    pub ripple_growth: f32,
    pub min_walls: u32,
    pub min_orbs: u32,
    pub orb_radius: f32,
    pub wall_thickness: f32,
    pub wall_min_length: f32,
    /// Longest wall, as a fraction of the play-area side it runs along
    pub wall_max_length_frac: f32,
    pub hud_band: f32,
    pub wall_retry_factor: u32,
    pub orb_retry_factor: u32,
    pub grace_ticks: u32,
    pub fade_ticks: u32,
    pub loading_ticks: u32,
    pub flight_ticks: u32,
    pub front_cutoff: f32,
    pub max_sparks: usize,
    pub max_bursts: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_taps: MAX_TAPS,
            ripple_growth: RIPPLE_GROWTH,
            min_walls: MIN_WALLS,
            min_orbs: MIN_ORBS,
            orb_radius: ORB_RADIUS,
            wall_thickness: WALL_THICKNESS,
            wall_min_length: WALL_MIN_LENGTH,
            wall_max_length_frac: WALL_MAX_LENGTH_FRAC,
            hud_band: HUD_BAND,
            wall_retry_factor: WALL_RETRY_FACTOR,
            orb_retry_factor: ORB_RETRY_FACTOR,
            grace_ticks: GRACE_TICKS,
            fade_ticks: FADE_TICKS,
            loading_ticks: LOADING_TICKS,
            flight_ticks: FLIGHT_TICKS,
            front_cutoff: FRONT_CUTOFF,
            max_sparks: MAX_SPARKS,
            max_bursts: MAX_BURSTS,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON override and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        if self.max_taps == 0 {
            return Err(TuningError::Invalid {
                field: "max_taps",
                reason: "must be at least 1",
            });
        }
        if !(self.ripple_growth > 0.0) {
            return Err(TuningError::Invalid {
                field: "ripple_growth",
                reason: "must be positive",
            });
        }
        if !(self.wall_max_length_frac > 0.0 && self.wall_max_length_frac <= 1.0) {
            return Err(TuningError::Invalid {
                field: "wall_max_length_frac",
                reason: "must be in (0, 1]",
            });
        }
        if !(self.orb_radius > 0.0) {
            return Err(TuningError::Invalid {
                field: "orb_radius",
                reason: "must be positive",
            });
        }
        if !(self.wall_thickness > 0.0) {
            return Err(TuningError::Invalid {
                field: "wall_thickness",
                reason: "must be positive",
            });
        }
        Ok(())
    }

    /// Walls requested for a level
    pub fn wall_count(&self, level: u32) -> u32 {
        self.min_walls + level / 2
    }

    /// Orbs requested for a level
    pub fn orb_count(&self, level: u32) -> u32 {
        self.min_orbs + level / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "max_taps": 5, "ripple_growth": 3.5 }"#).unwrap();
        assert_eq!(t.max_taps, 5);
        assert_eq!(t.ripple_growth, 3.5);
        assert_eq!(t.min_orbs, MIN_ORBS);
        assert_eq!(t.grace_ticks, GRACE_TICKS);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(matches!(
            Tuning::from_json(r#"{ "max_taps": 0 }"#),
            Err(TuningError::Invalid { field: "max_taps", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "ripple_growth": -1.0 }"#),
            Err(TuningError::Invalid { field: "ripple_growth", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "orb_radius": 0.0 }"#),
            Err(TuningError::Invalid { field: "orb_radius", .. })
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "wall_thickness": -2.0 }"#),
            Err(TuningError::Invalid { field: "wall_thickness", .. })
        ));
        assert!(matches!(
            Tuning::from_json("not json"),
            Err(TuningError::Parse(_))
        ));
    }

    #[test]
    fn test_counts_scale_with_level() {
        let t = Tuning::default();
        assert_eq!(t.wall_count(1), 2);
        assert_eq!(t.wall_count(4), 4);
        assert_eq!(t.orb_count(1), 3);
        assert_eq!(t.orb_count(7), 6);
    }
}
