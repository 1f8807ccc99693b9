//! Transient feedback effects
//!
//! Sparks, bursts and fly-to-score flights are spawned from wall-hit and
//! collection events. Only flights feed back into gameplay: an orb is scored
//! and removed when its flight lands.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Spark where a ripple front met a wall
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WallSpark {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

/// Expanding ring where an orb was collected
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Burst {
    pub pos: Vec2,
    pub radius: f32,
    pub opacity: f32,
}

/// A collected orb travelling to the score counter
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrbFlight {
    pub orb_id: u32,
    pub from: Vec2,
    pub to: Vec2,
    pub total_ticks: u32,
    pub ticks_left: u32,
}

impl OrbFlight {
    pub fn new(orb_id: u32, from: Vec2, to: Vec2, total_ticks: u32) -> Self {
        Self {
            orb_id,
            from,
            to,
            total_ticks,
            ticks_left: total_ticks,
        }
    }

    /// Progress in [0, 1]
    pub fn progress(&self) -> f32 {
        if self.total_ticks == 0 {
            return 1.0;
        }
        1.0 - self.ticks_left as f32 / self.total_ticks as f32
    }

    /// Current position (linear; easing is up to the renderer)
    pub fn pos(&self) -> Vec2 {
        self.from.lerp(self.to, self.progress())
    }
}

/// All live transient effects
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Effects {
    pub sparks: Vec<WallSpark>,
    pub bursts: Vec<Burst>,
    pub flights: Vec<OrbFlight>,
}

impl Effects {
    pub fn spawn_spark(&mut self, pos: Vec2) {
        self.sparks.push(WallSpark {
            pos,
            radius: 0.0,
            opacity: 1.0,
        });
    }

    pub fn spawn_burst(&mut self, pos: Vec2) {
        self.bursts.push(Burst {
            pos,
            radius: 0.0,
            opacity: 1.0,
        });
    }

    pub fn spawn_flight(&mut self, flight: OrbFlight) {
        self.flights.push(flight);
    }

    /// Age sparks and bursts, drop faded ones, keep only the newest up to the caps
    pub fn decay(&mut self, max_sparks: usize, max_bursts: usize) {
        for s in &mut self.sparks {
            s.radius += 0.5;
            s.opacity -= 0.1;
        }
        self.sparks.retain(|s| s.opacity > 0.0);
        keep_newest(&mut self.sparks, max_sparks);

        for b in &mut self.bursts {
            b.radius += 4.0;
            b.opacity -= 0.07;
        }
        self.bursts.retain(|b| b.opacity > 0.0);
        keep_newest(&mut self.bursts, max_bursts);
    }

    /// Step flights; returns the orb ids whose flight landed this tick
    pub fn step_flights(&mut self) -> Vec<u32> {
        let mut landed = Vec::new();
        self.flights.retain_mut(|f| {
            f.ticks_left = f.ticks_left.saturating_sub(1);
            if f.ticks_left == 0 {
                landed.push(f.orb_id);
                false
            } else {
                true
            }
        });
        landed
    }

    pub fn is_empty(&self) -> bool {
        self.sparks.is_empty() && self.bursts.is_empty() && self.flights.is_empty()
    }

    pub fn clear(&mut self) {
        self.sparks.clear();
        self.bursts.clear();
        self.flights.clear();
    }
}

fn keep_newest<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        items.drain(..items.len() - cap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spark_fades_out() {
        let mut fx = Effects::default();
        fx.spawn_spark(Vec2::ZERO);
        // 1.0 - 10 * 0.1 lands at (or just around) zero
        for _ in 0..11 {
            fx.decay(50, 40);
        }
        assert!(fx.sparks.is_empty());
    }

    #[test]
    fn test_caps_keep_newest() {
        let mut fx = Effects::default();
        for i in 0..60 {
            fx.spawn_spark(Vec2::new(i as f32, 0.0));
        }
        fx.decay(50, 40);
        assert_eq!(fx.sparks.len(), 50);
        assert_eq!(fx.sparks[0].pos.x, 10.0);
    }

    #[test]
    fn test_flight_lands_after_duration() {
        let mut fx = Effects::default();
        fx.spawn_flight(OrbFlight::new(7, Vec2::ZERO, Vec2::new(10.0, 0.0), 3));
        assert!(fx.step_flights().is_empty());
        assert!((fx.flights[0].pos().x - 10.0 / 3.0).abs() < 1e-4);
        assert!(fx.step_flights().is_empty());
        assert_eq!(fx.step_flights(), vec![7]);
        assert!(fx.is_empty());
    }
}
