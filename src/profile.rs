//! Player profile: currency and orb skins
//!
//! Points are earned by finishing runs (final score is credited) and spent in
//! the shop to unlock skins.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{self, Storage};

/// Skin every player owns
pub const DEFAULT_SKIN: &str = "default";

/// An orb skin for sale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Skin {
    pub key: &'static str,
    pub price: u32,
}

/// Shop catalog, cheapest first
pub const SKINS: &[Skin] = &[
    Skin { key: DEFAULT_SKIN, price: 0 },
    Skin { key: "basketball", price: 100 },
    Skin { key: "football", price: 100 },
    Skin { key: "golf", price: 100 },
    Skin { key: "soccer", price: 100 },
    Skin { key: "saturn", price: 250 },
    Skin { key: "mars", price: 250 },
    Skin { key: "earth", price: 250 },
    Skin { key: "crystal", price: 250 },
    Skin { key: "energy", price: 500 },
    Skin { key: "pokeball", price: 500 },
    Skin { key: "evileye", price: 500 },
    Skin { key: "eye", price: 500 },
    Skin { key: "pizza", price: 1000 },
    Skin { key: "heart", price: 1000 },
    Skin { key: "snowglobe", price: 1000 },
    Skin { key: "plasma", price: 1000 },
    Skin { key: "yinyang", price: 10000 },
    Skin { key: "gemstone", price: 10000 },
    Skin { key: "blackhole", price: 10000 },
];

pub fn find_skin(key: &str) -> Option<&'static Skin> {
    SKINS.iter().find(|s| s.key == key)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PurchaseError {
    #[error("no skin named `{0}`")]
    UnknownSkin(String),
    #[error("skin `{0}` is already owned")]
    AlreadyOwned(String),
    #[error("need {price} points, have {points}")]
    InsufficientPoints { price: u32, points: u32 },
    #[error("skin `{0}` is not owned")]
    NotOwned(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub points: u32,
    pub unlocked: Vec<String>,
    pub equipped: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            points: 0,
            unlocked: Vec::new(),
            equipped: DEFAULT_SKIN.to_string(),
        }
    }
}

impl Profile {
    const POINTS_KEY: &'static str = "PLAYER_POINTS_KEY";
    const UNLOCKED_KEY: &'static str = "UNLOCKED_SKINS_KEY";
    const EQUIPPED_KEY: &'static str = "EQUIPPED_SKIN_KEY";

    pub fn owns(&self, key: &str) -> bool {
        key == DEFAULT_SKIN || self.unlocked.iter().any(|k| k == key)
    }

    /// Credit a finished run's score
    pub fn credit(&mut self, points: u32) {
        self.points = self.points.saturating_add(points);
    }

    /// Buy a skin; deducts its price and unlocks it
    pub fn buy(&mut self, key: &str) -> Result<(), PurchaseError> {
        let skin = find_skin(key).ok_or_else(|| PurchaseError::UnknownSkin(key.to_string()))?;
        if self.owns(key) {
            return Err(PurchaseError::AlreadyOwned(key.to_string()));
        }
        if self.points < skin.price {
            return Err(PurchaseError::InsufficientPoints {
                price: skin.price,
                points: self.points,
            });
        }
        self.points -= skin.price;
        self.unlocked.push(key.to_string());
        log::info!("Unlocked skin {} for {} points", key, skin.price);
        Ok(())
    }

    pub fn equip(&mut self, key: &str) -> Result<(), PurchaseError> {
        if find_skin(key).is_none() {
            return Err(PurchaseError::UnknownSkin(key.to_string()));
        }
        if !self.owns(key) {
            return Err(PurchaseError::NotOwned(key.to_string()));
        }
        self.equipped = key.to_string();
        Ok(())
    }

    /// Load each field independently; any unreadable field keeps its default
    pub fn load(storage: &dyn Storage) -> Self {
        let mut profile = Self {
            points: storage::load_or_default(storage, Self::POINTS_KEY),
            unlocked: storage::load_or_default(storage, Self::UNLOCKED_KEY),
            ..Self::default()
        };
        let equipped: Option<String> = storage::load_or_default(storage, Self::EQUIPPED_KEY);
        if let Some(key) = equipped.filter(|k| profile.owns(k)) {
            profile.equipped = key;
        }
        profile
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        storage::save_quietly(storage, Self::POINTS_KEY, &self.points);
        storage::save_quietly(storage, Self::UNLOCKED_KEY, &self.unlocked);
        storage::save_quietly(storage, Self::EQUIPPED_KEY, &self.equipped);
    }
}
