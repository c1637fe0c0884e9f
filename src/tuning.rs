//! Data-driven game balance
//!
//! Run length, lives, spawn cadence and scoring. Defaults reproduce the
//! shipped balance; a JSON override may replace any subset of fields.

use serde::{Deserialize, Serialize};

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Length of a run in seconds
    pub run_duration_secs: u32,
    /// Lives at the start of a run
    pub initial_lives: u32,
    /// Countdown steps shown before a run starts (3..2..1)
    pub countdown_steps: u32,
    /// Delay between countdown steps (ms)
    pub countdown_step_ms: f64,
    /// Spawn delay bounds (ms)
    pub spawn_min_ms: f64,
    pub spawn_max_ms: f64,
    /// Probability a spawn is a reward fruit
    pub reward_chance: f32,
    /// Probability a spawn is a rotten fruit (drawn after reward)
    pub penalty_chance: f32,
    /// Points for slicing a reward fruit
    pub reward_points: i32,
    /// Points for slicing a rotten fruit (negative)
    pub penalty_points: i32,
    /// Maximum trail points kept while dragging
    pub trail_cap: usize,
    /// Age after which released trail points are dropped (ms)
    pub trail_decay_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            run_duration_secs: 90,
            initial_lives: 3,
            countdown_steps: 3,
            countdown_step_ms: 700.0,
            spawn_min_ms: 600.0,
            spawn_max_ms: 1200.0,
            reward_chance: 0.70,
            penalty_chance: 0.15,
            reward_points: 10,
            penalty_points: -15,
            trail_cap: 20,
            trail_decay_ms: 140.0,
        }
    }
}

impl Tuning {
    /// Parse a JSON override; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let tuning: Tuning = serde_json::from_str(json)?;
        Ok(tuning.sanitized())
    }

    /// Clamp values that would break the simulation
    pub fn sanitized(mut self) -> Self {
        self.run_duration_secs = self.run_duration_secs.max(1);
        self.initial_lives = self.initial_lives.max(1);
        self.countdown_step_ms = self.countdown_step_ms.max(0.0);
        self.spawn_min_ms = self.spawn_min_ms.max(1.0);
        self.spawn_max_ms = self.spawn_max_ms.max(self.spawn_min_ms);
        self.reward_chance = self.reward_chance.clamp(0.0, 1.0);
        self.penalty_chance = self.penalty_chance.clamp(0.0, 1.0 - self.reward_chance);
        self.trail_cap = self.trail_cap.max(2);
        self.trail_decay_ms = self.trail_decay_ms.max(0.0);
        self
    }

    /// Probability a spawn is a bomb
    pub fn hazard_chance(&self) -> f32 {
        (1.0 - self.reward_chance - self.penalty_chance).max(0.0)
    }

    /// Rules text for the menu's help dialog
    pub fn how_to_play(&self) -> String {
        format!(
            "How to play\n\n\
             Swipe across fruit to slice it.\n\
             Apple, banana, orange: {:+} points\n\
             Rotten fruit: {:+} points\n\
             Bomb: lose a life ({} lives per run)\n\n\
             Score as much as you can in {} seconds.",
            self.reward_points, self.penalty_points, self.initial_lives, self.run_duration_secs
        )
    }
}
