//! Orb Blast - a tap-to-blast arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (raycasting, ripples, collisions, level flow)
//! - `clock`: Frame-to-tick scheduling for the host
//! - `storage`: Key/value persistence backends
//! - `platform`: Browser/native differences (logging, default storage)
//! - `tuning`: Data-driven game balance
//! - `highscores`, `profile`, `settings`, `audio`: collaborators driven by sim events

pub mod audio;
pub mod clock;
pub mod error;
pub mod highscores;
pub mod platform;
pub mod profile;
pub mod settings;
pub mod sim;
pub mod storage;
pub mod tuning;

pub use clock::FrameClock;
pub use error::{StorageError, TuningError};
pub use highscores::HighScores;
pub use profile::Profile;
pub use settings::{Settings, Theme};
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one ripple step per display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Taps allowed per level
    pub const MAX_TAPS: u32 = 3;
    /// Ripple radius growth per tick
    pub const RIPPLE_GROWTH: f32 = 2.0;
    /// Ripple front samples closer than this to their limit are not drawn
    pub const FRONT_CUTOFF: f32 = 0.5;

    /// Angular resolution tiers: (radius threshold, segment count)
    pub const SEGMENT_THRESHOLDS: [(f32, usize); 5] =
        [(0.0, 30), (40.0, 60), (80.0, 120), (160.0, 300), (260.0, 600)];

    /// Level generation
    pub const MIN_WALLS: u32 = 2;
    pub const MIN_ORBS: u32 = 3;
    pub const ORB_RADIUS: f32 = 3.0;
    pub const WALL_THICKNESS: f32 = 12.0;
    pub const WALL_MIN_LENGTH: f32 = 50.0;
    pub const WALL_MAX_LENGTH_FRAC: f32 = 0.4;
    /// Orbs never spawn inside this band at the top (HUD)
    pub const HUD_BAND: f32 = 100.0;
    pub const WALL_RETRY_FACTOR: u32 = 20;
    pub const ORB_RETRY_FACTOR: u32 = 10;

    /// Timers, in ticks at 60 Hz
    pub const GRACE_TICKS: u32 = 384; // 6.4 s
    pub const FADE_TICKS: u32 = 21; // 350 ms
    pub const LOADING_TICKS: u32 = 72; // 1.2 s
    pub const FLIGHT_TICKS: u32 = 39; // 650 ms

    /// Transient effect caps
    pub const MAX_SPARKS: usize = 50;
    pub const MAX_BURSTS: usize = 40;

    /// Where collected orbs fly to (score counter)
    pub const SCORE_POS: (f32, f32) = (120.0, 100.0);
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    use std::f32::consts::TAU;
    let a = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if a >= TAU { 0.0 } else { a }
}

/// Unit direction for an angle (radians)
#[inline]
pub fn direction(theta: f32) -> Vec2 {
    Vec2::new(theta.cos(), theta.sin())
}

/// Angle of a point relative to an origin, in [0, 2π)
#[inline]
pub fn angle_from(origin: Vec2, point: Vec2) -> f32 {
    let d = point - origin;
    normalize_angle(d.y.atan2(d.x))
}
