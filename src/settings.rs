//! Game settings and preferences
//!
//! Persisted separately from scores and profile.

use serde::{Deserialize, Serialize};

use crate::storage::{self, Storage};

/// Color theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Sound effects volume (0.0 - 1.0): orb, wall, win, lose
    pub sound_volume: f32,
    /// Menu music volume (0.0 - 1.0)
    pub music_volume: f32,
    pub mute_sfx: bool,
    pub mute_music: bool,

    // === Look ===
    pub theme: Theme,

    /// Tutorial shown once on first launch
    pub tutorial_seen: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sound_volume: 1.0,
            music_volume: 1.0,
            mute_sfx: false,
            mute_music: false,
            theme: Theme::Dark,
            tutorial_seen: false,
        }
    }
}

impl Settings {
    const STORAGE_KEY: &'static str = "orb_blast_settings";

    pub fn set_sound_volume(&mut self, vol: f32) {
        self.sound_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Load settings, clamping anything out of range
    pub fn load(storage: &dyn Storage) -> Self {
        let mut settings: Settings = storage::load_or_default(storage, Self::STORAGE_KEY);
        settings.set_sound_volume(settings.sound_volume);
        settings.set_music_volume(settings.music_volume);
        settings
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        storage::save_quietly(storage, Self::STORAGE_KEY, self);
        log::info!("Settings saved");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_volume_clamped() {
        let mut s = Settings::default();
        s.set_sound_volume(1.7);
        s.set_music_volume(-0.2);
        assert_eq!(s.sound_volume, 1.0);
        assert_eq!(s.music_volume, 0.0);
    }

    #[test]
    fn test_partial_stored_settings() {
        let mut storage = MemoryStorage::new();
        storage
            .set(Settings::STORAGE_KEY, r#"{ "theme": "light", "music_volume": 3.0 }"#)
            .unwrap();
        let s = Settings::load(&storage);
        assert_eq!(s.theme, Theme::Light);
        assert_eq!(s.music_volume, 1.0);
        assert!(!s.tutorial_seen);
    }

    #[test]
    fn test_theme_names() {
        assert_eq!(Theme::from_str("LIGHT"), Some(Theme::Light));
        assert_eq!(Theme::Dark.as_str(), "dark");
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }
}
