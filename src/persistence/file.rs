//! JSON file score store (native)

use std::fs;
use std::path::{Path, PathBuf};

use super::{STORAGE_KEY, ScoreStore, StoreError};
use crate::highscores::HighScores;

/// Score list kept in a single JSON file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<dir>/neonKatanaHighscores.json`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{}.json", STORAGE_KEY)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ScoreStore for FileStore {
    fn load(&self) -> HighScores {
        match fs::read_to_string(&self.path) {
            Ok(json) => {
                let scores = HighScores::from_json(&json);
                log::debug!("Loaded {} high scores from {}", scores.len(), self.path.display());
                scores
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HighScores::new(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                HighScores::new()
            }
        }
    }

    fn save(&mut self, scores: &HighScores) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        // Write then rename so a crash never leaves a half-written list
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, scores.to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("High scores saved ({} entries)", scores.len());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
