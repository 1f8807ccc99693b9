//! High score leaderboard
//!
//! Top 5 runs, ordered by score then level (both descending).

use serde::{Deserialize, Serialize};

use crate::storage::{self, Storage};

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u32,
    /// Level reached
    pub level: u32,
}

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    const STORAGE_KEY: &'static str = "HIGHSCORES_KEY";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a finished run. Returns the rank achieved (1-indexed) or None
    /// if it fell off the board.
    pub fn add_score(&mut self, score: u32, level: u32) -> Option<usize> {
        let entry = HighScoreEntry { score, level };
        // Insert after entries that rank at least as high, so older ties stay ahead
        let pos = self
            .entries
            .iter()
            .position(|e| (score, level) > (e.score, e.level))
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u32> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from storage. Unreadable data is dropped from storage and an
    /// empty board returned.
    pub fn load(storage: &mut dyn Storage) -> Self {
        match storage::read_json::<HighScores>(storage, Self::STORAGE_KEY) {
            Ok(Some(mut scores)) => {
                scores.normalize();
                log::info!("Loaded {} high scores", scores.entries.len());
                scores
            }
            Ok(None) => Self::new(),
            Err(e) => {
                log::warn!("Discarding high scores: {}", e);
                if let Err(e) = storage.remove(Self::STORAGE_KEY) {
                    log::warn!("Failed to clear high scores: {}", e);
                }
                Self::new()
            }
        }
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        storage::save_quietly(storage, Self::STORAGE_KEY, self);
    }

    /// Forget every entry, in memory and in storage
    pub fn clear(&mut self, storage: &mut dyn Storage) {
        self.entries.clear();
        if let Err(e) = storage.remove(Self::STORAGE_KEY) {
            log::warn!("Failed to clear high scores: {}", e);
        }
    }

    fn normalize(&mut self) {
        self.entries
            .sort_by(|a, b| b.score.cmp(&a.score).then(b.level.cmp(&a.level)));
        self.entries.truncate(MAX_HIGH_SCORES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_sorted_by_score_then_level() {
        let mut hs = HighScores::new();
        hs.add_score(5, 2);
        hs.add_score(9, 3);
        hs.add_score(5, 4);
        let order: Vec<_> = hs.entries.iter().map(|e| (e.score, e.level)).collect();
        assert_eq!(order, vec![(9, 3), (5, 4), (5, 2)]);
    }

    #[test]
    fn test_keeps_top_five() {
        let mut hs = HighScores::new();
        for s in 1..=6 {
            hs.add_score(s, 1);
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        assert_eq!(hs.top_score(), Some(6));
        assert_eq!(hs.entries.last().map(|e| e.score), Some(2));
        assert_eq!(hs.add_score(1, 1), None);
        assert_eq!(hs.add_score(7, 1), Some(1));
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = MemoryStorage::new();
        let mut hs = HighScores::new();
        hs.add_score(12, 4);
        hs.save(&mut storage);
        assert_eq!(HighScores::load(&mut storage), hs);
    }

    #[test]
    fn test_corrupt_scores_are_removed() {
        let mut storage = MemoryStorage::new();
        storage.set(HighScores::STORAGE_KEY, "[{").unwrap();
        assert!(HighScores::load(&mut storage).is_empty());
        assert_eq!(storage.get(HighScores::STORAGE_KEY).unwrap(), None);
    }
}
