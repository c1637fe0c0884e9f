//! High score list
//!
//! Every finished run is recorded; the list keeps the best 50 and the menu
//! shows the top 10.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of entries kept in storage
pub const MAX_STORED_SCORES: usize = 50;

/// Number of entries shown on the scores screen
pub const DISPLAYED_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    /// Final score, may be negative
    pub score: i32,
    /// When the run finished (older saves call this `date`)
    #[serde(alias = "date")]
    pub timestamp: DateTime<Utc>,
}

/// Score list, sorted by score descending
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HighScores {
    entries: Vec<ScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a stored list; anything unreadable yields an empty list
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<HighScores>(json) {
            Ok(mut scores) => {
                scores.normalize();
                scores
            }
            Err(e) => {
                log::warn!("Discarding unreadable high scores: {}", e);
                Self::new()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Add a finished run. Returns its 1-based rank, or None if it fell off
    /// the end of the list.
    pub fn record(&mut self, name: &str, score: i32, timestamp: DateTime<Utc>) -> Option<usize> {
        self.entries.push(ScoreEntry {
            name: name.to_string(),
            score,
            timestamp,
        });
        let inserted = self.entries.len() - 1;

        // Stable sort: equal scores keep arrival order
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].score.cmp(&self.entries[a].score));
        let rank = order.iter().position(|&i| i == inserted);

        self.normalize();
        rank.filter(|&r| r < MAX_STORED_SCORES).map(|r| r + 1)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(MAX_STORED_SCORES);
    }

    /// Best `n` entries
    pub fn top(&self, n: usize) -> &[ScoreEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Highest score (shown on the menu)
    pub fn best(&self) -> Option<i32> {
        self.entries.first().map(|e| e.score)
    }

    /// Menu line for the best entry
    pub fn best_label(&self) -> String {
        match self.entries.first() {
            Some(top) => format!("Best: {} - {} pts", top.name, top.score),
            None => "No scores yet".to_string(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Format a timestamp relative to `now`
pub fn format_age(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);
    let days = diff.num_days();
    let hours = diff.num_hours();
    let mins = diff.num_minutes();

    if days >= 1 {
        match days {
            1 => "Yesterday".to_string(),
            2..=6 => format!("{} days ago", days),
            _ => timestamp.format("%-m/%-d/%y").to_string(),
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
