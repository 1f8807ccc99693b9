//! Orb Blast entry point
//!
//! Native builds run a headless autoplay session: the bot taps straight on
//! the nearest remaining orb whenever the board is quiet, and the run is
//! logged until game over. Usage: `orb-blast [seed] [tuning.json]`

use glam::Vec2;

use orb_blast::audio::{AudioManager, Music, SoundEffect, SoundPlayer};
use orb_blast::consts::SIM_DT;
use orb_blast::sim::{GameEvent, GamePhase, GameState, PlayArea, TickInput};
use orb_blast::{FrameClock, HighScores, Profile, Settings, Tuning, platform};

/// Logical size of a typical phone screen
const PLAY_AREA: PlayArea = PlayArea {
    width: 390.0,
    height: 844.0,
};

/// Stop the demo here even if the bot keeps winning
const MAX_LEVEL: u32 = 20;

/// Sound "backend" for the headless runner
struct LogPlayer;

impl SoundPlayer for LogPlayer {
    fn play(&mut self, effect: SoundEffect, volume: f32) {
        log::debug!("♪ {} @ {:.2}", effect.name(), volume);
    }

    fn set_music(&mut self, music: Music, volume: f32, playing: bool) {
        log::debug!("♫ {:?} @ {:.2} (playing: {})", music, volume, playing);
    }
}

/// Pick a tap: the uncollected orb closest to the previous tap
fn choose_tap(state: &GameState, last: Vec2) -> Option<Vec2> {
    if state.phase != GamePhase::Playing || !state.ripples.is_empty() || state.taps_left() == 0 {
        return None;
    }
    state
        .orbs
        .iter()
        .filter(|o| !o.collected)
        .min_by(|a, b| a.pos.distance(last).total_cmp(&b.pos.distance(last)))
        .map(|o| o.pos)
}

fn load_tuning(path: Option<String>) -> Tuning {
    let Some(path) = path else {
        return Tuning::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Invalid tuning in {}: {}; using defaults", path, e);
                Tuning::default()
            }
        },
        Err(e) => {
            log::warn!("Cannot read {}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}

fn main() {
    platform::init_logging();

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0x0B1A57);
    let tuning = load_tuning(args.next());
    log::info!("Orb Blast (headless) starting with seed {}", seed);

    let mut storage = platform::default_storage();
    let settings = Settings::load(storage.as_ref());
    let mut profile = Profile::load(storage.as_ref());
    let mut high_scores = HighScores::load(storage.as_mut());
    let mut player = LogPlayer;
    let audio = AudioManager::from_settings(&settings);
    audio.update_music(&mut player);

    let mut state = GameState::with_tuning(seed, PLAY_AREA, tuning);
    let mut clock = FrameClock::new();
    let mut last_tap = Vec2::new(PLAY_AREA.width / 2.0, PLAY_AREA.height / 2.0);

    while state.phase != GamePhase::GameOver {
        let tap = choose_tap(&state, last_tap);
        if let Some(pos) = tap {
            last_tap = pos;
        }
        let input = TickInput {
            tap,
            ..Default::default()
        };
        clock.frame(&mut state, &input, SIM_DT);

        let events = state.drain_events();
        audio.handle_events(&events, &mut player);
        for event in &events {
            match *event {
                GameEvent::LevelStarted { level } if level > MAX_LEVEL => {
                    log::info!("Reached level {}, ending demo", level);
                    clock.cancel();
                }
                GameEvent::GameOver { score, level } => {
                    profile.credit(score);
                    if let Some(rank) = high_scores.add_score(score, level) {
                        log::info!("New high score #{}: {} (level {})", rank, score, level);
                    }
                }
                _ => {}
            }
        }
        if clock.is_cancelled() {
            break;
        }
    }

    high_scores.save(storage.as_mut());
    profile.save(storage.as_mut());
    log::info!(
        "Final: level {}, score {}, points {}",
        state.level,
        state.score,
        profile.points
    );
}
