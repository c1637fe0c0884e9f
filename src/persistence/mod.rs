//! High score persistence
//!
//! Backends:
//! - `MemoryStore` for tests and sessions without storage
//! - `FileStore` (native) writes a JSON file
//! - `LocalStorageStore` (wasm) uses browser LocalStorage
//!
//! Loading never fails: missing or corrupt data reads as an empty list.
//! Writes report a `StoreError` so the caller can log it and carry on.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::fmt;

use crate::highscores::HighScores;

/// Storage key / file stem for the score list
pub const STORAGE_KEY: &str = "neonKatanaHighscores";

/// Failure to write the score list
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// Backing storage is missing or refused the write
    Unavailable(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "I/O error: {}", e),
            StoreError::Json(e) => write!(f, "serialization error: {}", e),
            StoreError::Unavailable(what) => write!(f, "storage unavailable: {}", what),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::Unavailable(_) => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

/// Where finished runs are kept
pub trait ScoreStore {
    /// Current list; empty if nothing readable is stored
    fn load(&self) -> HighScores;

    /// Replace the stored list
    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError>;

    /// Forget every stored score
    fn clear(&mut self) -> Result<(), StoreError> {
        self.save(&HighScores::new())
    }
}

/// Keeps the serialized list in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    json: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from raw stored text, as if read from disk
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Some(json.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.json.as_deref()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> HighScores {
        self.json
            .as_deref()
            .map(HighScores::from_json)
            .unwrap_or_default()
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        self.json = Some(scores.to_json()?);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.json = None;
        Ok(())
    }
}
