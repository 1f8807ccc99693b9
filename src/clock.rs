//! Frame-to-tick scheduling
//!
//! The host calls [`FrameClock::frame`] from its display callback with the
//! elapsed time; the clock runs as many fixed ticks as that time covers.
//! Ripples therefore grow at the same rate on 60 Hz and 120 Hz displays.
//! Input that arrives on a frame too short for a tick is held until the
//! next tick runs.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{GameState, TickInput, tick};

#[derive(Debug, Clone)]
pub struct FrameClock {
    accumulator: f32,
    /// One-shot input not yet consumed by a tick
    pending: TickInput,
    cancelled: bool,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            accumulator: 0.0,
            pending: TickInput::default(),
            cancelled: false,
        }
    }

    /// Run the ticks covered by `dt` seconds; returns how many ran.
    ///
    /// One-shot input (tap, pause) is applied to the first tick that runs,
    /// which may be on a later frame. A newer tap replaces a pending one.
    pub fn frame(&mut self, state: &mut GameState, input: &TickInput, dt: f32) -> u32 {
        if self.cancelled {
            return 0;
        }

        if input.tap.is_some() {
            self.pending.tap = input.tap;
        }
        self.pending.pause |= input.pause;

        // Long stalls (tab switch, debugger) are not replayed
        let dt = if dt.is_finite() { dt.clamp(0.0, 0.1) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.pending);
            tick(state, &input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT);
        }
        substeps
    }

    /// Stop ticking for good (level exit / teardown)
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.accumulator = 0.0;
        self.pending = TickInput::default();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::PlayArea;

    #[test]
    fn test_refresh_rate_independent_growth() {
        let area = PlayArea::new(390.0, 844.0);
        let tap = TickInput {
            tap: Some(glam::Vec2::new(200.0, 400.0)),
            ..Default::default()
        };

        let mut slow = GameState::new(1, area);
        let mut slow_clock = FrameClock::new();
        slow_clock.frame(&mut slow, &tap, SIM_DT);
        for _ in 0..59 {
            slow_clock.frame(&mut slow, &TickInput::default(), SIM_DT);
        }

        let mut fast = GameState::new(1, area);
        let mut fast_clock = FrameClock::new();
        fast_clock.frame(&mut fast, &tap, SIM_DT);
        for _ in 0..118 {
            fast_clock.frame(&mut fast, &TickInput::default(), SIM_DT / 2.0);
        }

        let a = slow.ripples[0].radius;
        let b = fast.ripples[0].radius;
        assert!((a - b).abs() <= 2.0, "{a} vs {b}");
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let mut state = GameState::new(1, PlayArea::new(390.0, 844.0));
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(&mut state, &TickInput::default(), SIM_DT * 2.5), 2);
        clock.cancel();
        let ticks = state.time_ticks;
        assert_eq!(clock.frame(&mut state, &TickInput::default(), 1.0), 0);
        assert_eq!(state.time_ticks, ticks);
    }

    #[test]
    fn test_tap_on_short_frame_is_kept() {
        let mut state = GameState::new(1, PlayArea::new(390.0, 844.0));
        let mut clock = FrameClock::new();
        let tap = TickInput {
            tap: Some(glam::Vec2::new(200.0, 400.0)),
            ..Default::default()
        };

        assert_eq!(clock.frame(&mut state, &tap, SIM_DT / 2.0), 0);
        assert_eq!(state.taps_used, 0);

        let mut ticks = 0;
        for _ in 0..10 {
            ticks += clock.frame(&mut state, &TickInput::default(), SIM_DT / 2.0);
        }
        assert_eq!(ticks, 5);
        assert_eq!(state.taps_used, 1);
        assert_eq!(state.ripples.len(), 1);
    }

    #[test]
    fn test_pause_on_short_frame_is_kept() {
        let mut state = GameState::new(1, PlayArea::new(390.0, 844.0));
        let mut clock = FrameClock::new();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        clock.frame(&mut state, &pause, SIM_DT / 4.0);
        clock.frame(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.phase, crate::sim::GamePhase::Paused);
    }

    #[test]
    fn test_non_finite_dt_is_ignored() {
        let mut state = GameState::new(1, PlayArea::new(390.0, 844.0));
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(&mut state, &TickInput::default(), f32::NAN), 0);
        assert_eq!(clock.frame(&mut state, &TickInput::default(), f32::INFINITY), 0);
        assert_eq!(clock.frame(&mut state, &TickInput::default(), SIM_DT), 1);
    }
}
