//! Browser LocalStorage score store

use super::{STORAGE_KEY, ScoreStore, StoreError};
use crate::highscores::HighScores;

/// Score list under the `neonKatanaHighscores` LocalStorage key
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".into()))?
            .local_storage()
            .map_err(|_| StoreError::Unavailable("localStorage access denied".into()))?
            .ok_or_else(|| StoreError::Unavailable("no localStorage".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load(&self) -> HighScores {
        let storage = match Self::storage() {
            Ok(s) => s,
            Err(e) => {
                log::warn!("Cannot load high scores: {}", e);
                return HighScores::new();
            }
        };
        match storage.get_item(STORAGE_KEY) {
            Ok(Some(json)) => {
                let scores = HighScores::from_json(&json);
                log::info!("Loaded {} high scores", scores.len());
                scores
            }
            Ok(None) => HighScores::new(),
            Err(_) => {
                log::warn!("Reading high scores from localStorage failed");
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        let json = scores.to_json()?;
        Self::storage()?
            .set_item(STORAGE_KEY, &json)
            .map_err(|_| StoreError::Unavailable("localStorage write refused".into()))?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        Self::storage()?
            .remove_item(STORAGE_KEY)
            .map_err(|_| StoreError::Unavailable("localStorage remove refused".into()))
    }
}
