//! Sound cues driven by simulation events
//!
//! The simulation never plays audio itself. The host drains [`GameEvent`]s
//! each frame and hands them to [`AudioManager::handle_events`], which picks
//! the cues and volumes and forwards them to a platform [`SoundPlayer`].

use crate::settings::Settings;
use crate::sim::GameEvent;

/// One-shot sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Orb reached by a ripple
    Orb,
    /// Ripple front stopped by a wall
    Wall,
    /// Level cleared
    Win,
    /// Game over
    Lose,
}

impl SoundEffect {
    /// Asset name for the platform loader
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Orb => "orb",
            SoundEffect::Wall => "wall",
            SoundEffect::Win => "win",
            SoundEffect::Lose => "lose",
        }
    }

    /// Cue for a single event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::OrbCollected { .. } => Some(SoundEffect::Orb),
            GameEvent::WallHit { .. } => Some(SoundEffect::Wall),
            GameEvent::LevelCleared { .. } => Some(SoundEffect::Win),
            GameEvent::GameOver { .. } => Some(SoundEffect::Lose),
            _ => None,
        }
    }
}

/// Looping background tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Music {
    Menu,
}

/// Platform playback (fire-and-forget)
pub trait SoundPlayer {
    fn play(&mut self, effect: SoundEffect, volume: f32);
    fn set_music(&mut self, music: Music, volume: f32, playing: bool);
}

/// Audio manager for the game
#[derive(Debug, Clone)]
pub struct AudioManager {
    sound_volume: f32,
    music_volume: f32,
    mute_sfx: bool,
    mute_music: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl AudioManager {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            sound_volume: settings.sound_volume,
            music_volume: settings.music_volume,
            mute_sfx: settings.mute_sfx,
            mute_music: settings.mute_music,
        }
    }

    /// Pick up changed settings and refresh the music loop
    pub fn apply_settings(&mut self, settings: &Settings, player: &mut dyn SoundPlayer) {
        *self = Self::from_settings(settings);
        self.update_music(player);
    }

    fn effective_sfx_volume(&self) -> f32 {
        if self.mute_sfx { 0.0 } else { self.sound_volume }
    }

    pub fn update_music(&self, player: &mut dyn SoundPlayer) {
        let playing = !self.mute_music && self.music_volume > 0.0;
        let volume = if playing { self.music_volume } else { 0.0 };
        player.set_music(Music::Menu, volume, playing);
    }

    /// Play the cues for one tick's worth of events.
    ///
    /// A burst of wall hits in the same batch plays the wall sound once.
    pub fn handle_events(&self, events: &[GameEvent], player: &mut dyn SoundPlayer) {
        let vol = self.effective_sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let mut wall_played = false;
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            if effect == SoundEffect::Wall {
                if wall_played {
                    continue;
                }
                wall_played = true;
            }
            player.play(effect, vol);
        }
    }
}
