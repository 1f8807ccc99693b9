//! Procedural level generation
//!
//! Walls are placed by rejection sampling against the walls already accepted;
//! orbs are placed by rejection sampling against every wall's padded box and
//! the HUD band at the top of the play area. Both loops run on a bounded retry
//! budget and accept a partial set when it runs out.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Wall;
use super::state::Orb;
use crate::tuning::Tuning;

/// A freshly generated level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub index: u32,
    pub walls: Vec<Wall>,
    pub orbs: Vec<Orb>,
}

/// Seeded level generator. Owns the orb id counter so ids stay unique for
/// the generator's whole lifetime, across levels.
#[derive(Debug, Clone)]
pub struct LevelGenerator {
    rng: Pcg32,
    next_orb_id: u32,
}

impl LevelGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            next_orb_id: 1,
        }
    }

    /// Id the next generated orb will receive
    pub fn peek_next_orb_id(&self) -> u32 {
        self.next_orb_id
    }

    /// Generate walls and orbs for `index`
    pub fn generate(&mut self, width: f32, height: f32, index: u32, tuning: &Tuning) -> Level {
        let walls = self.generate_walls(width, height, index, tuning);
        let orbs = self.generate_orbs(width, height, &walls, index, tuning);
        log::info!(
            "Level {}: {} walls, {} orbs ({}x{})",
            index,
            walls.len(),
            orbs.len(),
            width,
            height
        );
        Level { index, walls, orbs }
    }

    /// Place `min_walls + level / 2` non-overlapping walls
    pub fn generate_walls(&mut self, width: f32, height: f32, level: u32, tuning: &Tuning) -> Vec<Wall> {
        let count = tuning.wall_count(level) as usize;
        let budget = count * tuning.wall_retry_factor as usize;
        let mut out: Vec<Wall> = Vec::with_capacity(count);

        let mut tries = 0;
        while out.len() < count && tries < budget {
            tries += 1;
            let wall = self.candidate_wall(width, height, tuning);
            if !out.iter().any(|existing| existing.overlaps(&wall)) {
                out.push(wall);
            }
        }

        if out.len() < count {
            log::warn!(
                "Level {}: wall budget exhausted after {} tries ({} of {} placed)",
                level,
                tries,
                out.len(),
                count
            );
        }
        out
    }

    fn candidate_wall(&mut self, width: f32, height: f32, tuning: &Tuning) -> Wall {
        let thickness = tuning.wall_thickness;
        if self.rng.random_bool(0.5) {
            let w = tuning.wall_min_length + self.rng.random::<f32>() * width * tuning.wall_max_length_frac;
            let x = self.rng.random::<f32>() * (width - w).max(0.0);
            let y = self.rng.random::<f32>() * height;
            Wall::new(x, y, w, thickness)
        } else {
            let h = tuning.wall_min_length + self.rng.random::<f32>() * height * tuning.wall_max_length_frac;
            let x = self.rng.random::<f32>() * width;
            let y = self.rng.random::<f32>() * (height - h).max(0.0);
            Wall::new(x, y, thickness, h)
        }
    }

    /// Place `min_orbs + level / 2` orbs clear of every wall and the HUD band
    pub fn generate_orbs(
        &mut self,
        width: f32,
        height: f32,
        walls: &[Wall],
        level: u32,
        tuning: &Tuning,
    ) -> Vec<Orb> {
        let count = tuning.orb_count(level) as usize;
        let budget = count * tuning.orb_retry_factor as usize;
        let r = tuning.orb_radius;
        let span_x = (width - 2.0 * r).max(0.0);
        let span_y = (height - 2.0 * r - tuning.hud_band).max(0.0);
        let mut out: Vec<Orb> = Vec::with_capacity(count);

        let mut attempts = 0;
        while out.len() < count && attempts < budget {
            attempts += 1;
            let pos = Vec2::new(
                r + self.rng.random::<f32>() * span_x,
                r + tuning.hud_band + self.rng.random::<f32>() * span_y,
            );
            if walls.iter().any(|w| w.contains_padded(pos, r)) {
                continue;
            }
            let id = self.next_orb_id;
            self.next_orb_id += 1;
            out.push(Orb::new(id, pos, r));
        }

        if out.len() < count {
            log::warn!(
                "Level {}: orb budget exhausted after {} attempts ({} of {} placed)",
                level,
                attempts,
                out.len(),
                count
            );
        }
        out
    }
}
