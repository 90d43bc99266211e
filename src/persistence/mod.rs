//! Best-score persistence contract.
//!
//! Storage is best-effort: a failed save degrades to local-only state and is
//! reported as `false`, never as an error the simulation could see.

use serde::{Deserialize, Serialize};

/// Versioned envelope for the persisted best score (used only in wasm32)
#[allow(dead_code)]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct BestScore {
    best: u64,
}

/// The narrow contract the driver talks to. The engine itself never calls
/// this; the driver feeds the fetched value in at startup and writes the
/// final score back on game over.
pub trait ScoreStore {
    fn fetch_high_score(&self) -> u64;
    /// Returns false when the backend rejected the write; callers keep the
    /// in-memory value and move on.
    fn save_score(&mut self, score: u64) -> bool;
}

/// In-memory store used natively and in tests
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryScoreStore {
    best: u64,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn fetch_high_score(&self) -> u64 {
        self.best
    }

    fn save_score(&mut self, score: u64) -> bool {
        if score > self.best {
            self.best = score;
        }
        true
    }
}

/// LocalStorage-backed store (WASM only)
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct LocalScoreStore {
    /// Last value seen, kept so a broken backend still serves reads
    cached: u64,
}

#[cfg(target_arch = "wasm32")]
impl LocalScoreStore {
    const STORAGE_KEY: &'static str = "sky_pop_best_score";

    pub fn new() -> Self {
        let mut store = Self { cached: 0 };
        store.cached = store.read_backend().unwrap_or(0);
        store
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok()).flatten()
    }

    fn read_backend(&self) -> Option<u64> {
        let storage = Self::storage()?;
        let json = storage.get_item(Self::STORAGE_KEY).ok()??;
        serde_json::from_str::<BestScore>(&json).ok().map(|b| b.best)
    }
}

#[cfg(target_arch = "wasm32")]
impl ScoreStore for LocalScoreStore {
    fn fetch_high_score(&self) -> u64 {
        self.read_backend().unwrap_or(self.cached)
    }

    fn save_score(&mut self, score: u64) -> bool {
        if score > self.cached {
            self.cached = score;
        }
        let Some(storage) = Self::storage() else {
            log::warn!("LocalStorage unavailable, score kept in memory only");
            return false;
        };
        let Ok(json) = serde_json::to_string(&BestScore { best: self.cached }) else {
            return false;
        };
        match storage.set_item(Self::STORAGE_KEY, &json) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("Failed to persist best score");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_keeps_best() {
        let mut store = MemoryScoreStore::new();
        assert_eq!(store.fetch_high_score(), 0);

        assert!(store.save_score(120));
        assert_eq!(store.fetch_high_score(), 120);

        // A worse run never regresses the stored best
        assert!(store.save_score(40));
        assert_eq!(store.fetch_high_score(), 120);
    }
}
