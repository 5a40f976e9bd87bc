//! Web-specific persistence for the Permit Desk engine
//!
//! Implements the core crate's [`ScoreStore`] seam over localStorage and
//! re-exports the engine types for host pages.

use gloo::storage::{LocalStorage, Storage};

// Re-export all types from permit-game
pub use permit_game::*;

/// Fixed namespaced localStorage key for the persisted best score.
pub const HIGH_SCORE_KEY: &str = "permit-desk.high-score";

/// Best-score store backed by the browser's localStorage.
pub struct WebScoreStore;

#[derive(Debug, thiserror::Error)]
pub enum WebStorageError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ScoreStore for WebScoreStore {
    type Error = WebStorageError;

    fn load_high_score(&self) -> Result<u32, Self::Error> {
        // Absent keys and unparseable values both read as 0; a stale or
        // hand-edited entry must never break the desk.
        Ok(LocalStorage::get::<u32>(HIGH_SCORE_KEY).unwrap_or(0))
    }

    fn save_high_score(&self, score: u32) -> Result<(), Self::Error> {
        LocalStorage::set(HIGH_SCORE_KEY, score)
            .map_err(|e| WebStorageError::Storage(format!("{e:?}")))
    }
}

/// Create a desk wired to localStorage persistence.
#[must_use]
pub fn create_web_desk(mode: DeskMode, seed: u64) -> PermitDesk<WebScoreStore> {
    PermitDesk::for_mode(mode, WebScoreStore, seed)
}
