//! Game state and core simulation types
//!
//! The driver owns everything here; the ripple engine and collision resolver
//! borrow pieces of it for the duration of a tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::geometry::{PlayArea, Wall};
use super::level::LevelGenerator;
use super::ripple::Ripple;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Taps accepted, ripples growing
    Playing,
    /// Loop frozen by the in-game menu
    Paused,
    /// Level cleared; UI fading out before the swap
    FadingOut { ticks_left: u32 },
    /// Ripples and effects cleared; next level generated once this elapses
    /// and every effect has finished
    Loading { ticks_left: u32 },
    /// Run ended
    GameOver,
}

/// An orb to collect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Orb {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Set once by the collision resolver, never cleared
    pub collected: bool,
}

impl Orb {
    pub fn new(id: u32, pos: Vec2, radius: f32) -> Self {
        Self {
            id,
            pos,
            radius,
            collected: false,
        }
    }
}

/// Events emitted during a tick, drained by the host (audio, UI, persistence)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    TapAccepted { pos: Vec2 },
    WallHit { pos: Vec2 },
    OrbCollected { id: u32, pos: Vec2 },
    /// A fly-to-score animation landed and the score went up
    ScoreChanged { score: u32 },
    /// Last tap spent with orbs remaining; grace countdown started
    OutOfTaps,
    LevelCleared { level: u32 },
    LevelStarted { level: u32 },
    GameOver { score: u32, level: u32 },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub area: PlayArea,
    pub tuning: Tuning,
    /// Current level (1-based)
    pub level: u32,
    pub taps_used: u32,
    pub score: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub walls: Vec<Wall>,
    /// Uncollected orbs plus collected ones still flying to the score
    pub orbs: Vec<Orb>,
    pub ripples: Vec<Ripple>,
    /// Presentation effects (not gameplay-affecting, except flights gating the win)
    pub effects: Effects,
    /// Ticks until game over; `Some` once the tap budget ran out this level
    pub grace_ticks: Option<u32>,
    /// Grace countdown already started for this level attempt
    pub(crate) grace_armed: bool,
    pub(crate) events: Vec<GameEvent>,
    generator: LevelGenerator,
}

impl GameState {
    /// Create a new game at level 1 with default tuning
    pub fn new(seed: u64, area: PlayArea) -> Self {
        Self::with_tuning(seed, area, Tuning::default())
    }

    pub fn with_tuning(seed: u64, area: PlayArea, tuning: Tuning) -> Self {
        let mut state = Self {
            seed,
            area,
            tuning,
            level: 1,
            taps_used: 0,
            score: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            walls: Vec::new(),
            orbs: Vec::new(),
            ripples: Vec::new(),
            effects: Effects::default(),
            grace_ticks: None,
            grace_armed: false,
            events: Vec::new(),
            generator: LevelGenerator::new(seed),
        };
        state.load_level(1);
        state
    }

    /// Start over from level 1 (score and taps reset, orb ids keep counting)
    pub fn restart(&mut self) {
        self.score = 0;
        self.phase = GamePhase::Playing;
        self.load_level(1);
    }

    /// Replace walls and orbs with a freshly generated level
    pub fn load_level(&mut self, index: u32) {
        let level = self
            .generator
            .generate(self.area.width, self.area.height, index, &self.tuning);
        self.level = index;
        self.walls = level.walls;
        self.orbs = level.orbs;
        self.ripples.clear();
        self.effects.clear();
        self.taps_used = 0;
        self.grace_ticks = None;
        self.grace_armed = false;
        self.events.push(GameEvent::LevelStarted { level: index });
    }

    /// Spawn a ripple at `pos` if a tap is allowed right now.
    ///
    /// Returns false (and changes nothing) when out of taps or not playing.
    pub fn try_tap(&mut self, pos: Vec2) -> bool {
        if self.phase != GamePhase::Playing || self.taps_used >= self.tuning.max_taps {
            log::debug!("Tap at {:?} ignored ({:?}, {} taps used)", pos, self.phase, self.taps_used);
            return false;
        }
        self.taps_used += 1;
        self.ripples.push(Ripple::new(pos, self.area, &self.walls));
        self.events.push(GameEvent::TapAccepted { pos });
        log::debug!("Tap {} at {:?}", self.taps_used, pos);
        true
    }

    pub fn taps_left(&self) -> u32 {
        self.tuning.max_taps.saturating_sub(self.taps_used)
    }

    /// Orbs not yet reached by any ripple
    pub fn orbs_remaining(&self) -> usize {
        self.orbs.iter().filter(|o| !o.collected).count()
    }

    /// All orbs collected and every fly-to-score animation landed
    pub fn is_level_clear(&self) -> bool {
        self.orbs.iter().all(|o| o.collected) && self.effects.flights.is_empty()
    }

    /// Take the events emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Id the next generated orb will receive
    pub fn next_orb_id(&self) -> u32 {
        self.generator.peek_next_orb_id()
    }
}
