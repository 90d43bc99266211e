//! High score leaderboard
//!
//! Persisted to LocalStorage, tracks the top 10 runs.

use serde::{Deserialize, Serialize};

use crate::sim::Difficulty;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    pub difficulty: Difficulty,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, sorted descending by score
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "sky_pop_highscores";

    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Whether a finished run earns a spot on the board
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Record a finished run. Returns the 1-indexed rank achieved, or None
    /// if it didn't qualify.
    pub fn record(&mut self, score: u64, difficulty: Difficulty, timestamp: f64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry {
            score,
            difficulty,
            timestamp,
        };
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }

    /// Load from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(scores) = serde_json::from_str::<HighScores>(&json) {
                    log::info!("Loaded {} high scores", scores.entries.len());
                    return scores;
                }
            }
        }

        log::info!("No high scores found, starting fresh");
        Self::new()
    }

    /// Save to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("High scores saved ({} entries)", self.entries.len());
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sorts_and_ranks() {
        let mut hs = HighScores::new();
        assert_eq!(hs.record(100, Difficulty::Medium, 0.0), Some(1));
        assert_eq!(hs.record(300, Difficulty::Hard, 0.0), Some(1));
        assert_eq!(hs.record(200, Difficulty::Easy, 0.0), Some(2));
        assert_eq!(hs.top_score(), Some(300));
        assert_eq!(hs.entries.len(), 3);
    }

    #[test]
    fn test_zero_never_qualifies() {
        let hs = HighScores::new();
        assert!(!hs.qualifies(0));
        assert!(hs.qualifies(1));
    }

    #[test]
    fn test_board_truncates_to_cap() {
        let mut hs = HighScores::new();
        for i in 1..=15u64 {
            hs.record(i * 10, Difficulty::Medium, 0.0);
        }
        assert_eq!(hs.entries.len(), MAX_HIGH_SCORES);
        // Lowest surviving score is 60: 10..50 were pushed off the board
        assert_eq!(hs.entries.last().map(|e| e.score), Some(60));
        assert!(!hs.qualifies(50));
        assert!(hs.qualifies(61));
    }
}
