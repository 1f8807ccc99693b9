//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick
//! - Seeded RNG only
//! - Stable iteration order (orbs by generation order, ripples by tap order)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod effects;
pub mod geometry;
pub mod level;
pub mod ripple;
pub mod state;
pub mod tick;

pub use collision::{Collection, resolve_collisions, ripple_reaches};
pub use effects::{Burst, Effects, OrbFlight, WallSpark};
pub use geometry::{PlayArea, Wall, ray_wall_distance, rects_overlap};
pub use level::{Level, LevelGenerator};
pub use ripple::{Ripple, WallHit, advance, compute_visibility_limits, segments_for_radius};
pub use state::{GameEvent, GamePhase, GameState, Orb};
pub use tick::{TickInput, tick};
