//! High-score persistence seam
//!
//! The session talks to durable device storage through [`ScoreStore`] so the
//! engine stays platform-agnostic. Storage failures never surface to
//! gameplay: loads degrade to 0 and saves are fire-and-forget.
use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

/// Reads and writes the single persisted best-score integer.
pub trait ScoreStore {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load the persisted best score.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unavailable or holds an
    /// unparseable value. Callers treat any error as a best score of 0.
    fn load_high_score(&self) -> Result<u32, Self::Error>;

    /// Persist the best score.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store rejects the write. Callers
    /// swallow the error; persistence is best effort.
    fn save_high_score(&self, score: u32) -> Result<(), Self::Error>;
}

/// In-memory fallback store. `Clone` shares the underlying cell, so one
/// instance can span several sessions in tests or storage-less environments.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    best: Rc<Cell<u32>>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn best(&self) -> u32 {
        self.best.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    type Error = Infallible;

    fn load_high_score(&self) -> Result<u32, Self::Error> {
        Ok(self.best.get())
    }

    fn save_high_score(&self, score: u32) -> Result<(), Self::Error> {
        self.best.set(score);
        Ok(())
    }
}
