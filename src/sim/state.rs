//! Run state and core simulation types
//!
//! One `GameState` owns everything a run touches: the active projectiles, the
//! blade trail, pending timers and the score/lives/clock session. Behavior
//! lives in `tick.rs`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::effects::Effects;
use super::projectile::{Projectile, ProjectileKind, Viewport};
use super::schedule::{Scheduler, TaskHandle};
use super::trail::GestureTracker;
use crate::tuning::Tuning;

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EndReason {
    /// Clock ran out
    Time,
    /// Last life lost to a bomb
    Lives,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::Time => "time",
            EndReason::Lives => "lives",
        }
    }
}

/// Outcome of a finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub reason: EndReason,
    pub player_name: String,
    pub score: i32,
}

impl RunSummary {
    /// Headline for the end-of-run dialog
    pub fn title(&self) -> String {
        match self.reason {
            EndReason::Time => format!("Congratulations, {}!", self.player_name),
            EndReason::Lives => format!("Game Over, {}", self.player_name),
        }
    }

    /// Body text for the end-of-run dialog
    pub fn message(&self) -> String {
        match self.reason {
            EndReason::Time => format!("You scored {} points.", self.score),
            EndReason::Lives => format!("Score: {}", self.score),
        }
    }
}

/// Current phase of the game
#[derive(Debug, Clone, PartialEq)]
pub enum RunPhase {
    /// Menu shown, nothing simulated
    Idle,
    /// 3..2..1 before a run; input ignored
    Countdown { remaining: u32 },
    /// Spawner, clock and slicing active
    Running,
    /// Run over, summary awaiting acknowledgement
    Ended(RunSummary),
}

/// Score, lives and clock for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub player_name: String,
    /// May go negative from rotten fruit
    pub score: i32,
    pub lives: u32,
    /// Whole seconds left
    pub time_remaining: u32,
}

impl Session {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            player_name: String::new(),
            score: 0,
            lives: tuning.initial_lives,
            time_remaining: tuning.run_duration_secs,
        }
    }

    /// Clock as `m:ss`
    pub fn clock_label(&self) -> String {
        format!("{}:{:02}", self.time_remaining / 60, self.time_remaining % 60)
    }

    /// HUD line, e.g. `Score: 20 • 1:05`
    pub fn hud_label(&self) -> String {
        format!("Score: {} \u{2022} {}", self.score, self.clock_label())
    }

    /// Last five seconds, when the big timer pulses
    pub fn is_final_countdown(&self) -> bool {
        self.time_remaining > 0 && self.time_remaining <= 5
    }
}

/// Things that happened during a call, for audio/HUD/effects consumers
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Countdown digit to display
    CountdownStep { remaining: u32 },
    RunStarted,
    Spawned { id: u32, kind: ProjectileKind },
    /// Every successful cut, regardless of kind
    SliceCue,
    /// Reward or rotten fruit cut
    Sliced {
        id: u32,
        kind: ProjectileKind,
        point: Vec2,
        points: i32,
    },
    /// Bomb cut
    BombDetonated { id: u32, point: Vec2, lives_left: u32 },
    /// Fell out of view uncut
    Missed { id: u32, kind: ProjectileKind },
    ClockTick { remaining: u32 },
    RunEnded(RunSummary),
}

/// Rejected start request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartError {
    /// A countdown or run is already in progress
    AlreadyActive,
}

impl std::fmt::Display for StartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StartError::AlreadyActive => write!(f, "a run is already in progress"),
        }
    }
}

impl std::error::Error for StartError {}

/// Pending scheduler handles owned by the run
#[derive(Debug, Clone, Default)]
pub struct RunTimers {
    pub countdown: Option<TaskHandle>,
    pub spawn: Option<TaskHandle>,
    pub clock: Option<TaskHandle>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    /// Current bounds for spawning and culling
    pub viewport: Viewport,
    pub phase: RunPhase,
    pub session: Session,
    /// Active projectiles in spawn order
    pub projectiles: Vec<Projectile>,
    pub trail: GestureTracker,
    /// Visual particles (not gameplay-affecting)
    pub effects: Effects,
    pub(crate) scheduler: Scheduler,
    pub(crate) timers: RunTimers,
    pub(crate) rng: Pcg32,
    /// Time of the previous frame (ms)
    pub(crate) last_frame: Option<f64>,
    pub(crate) events: Vec<GameEvent>,
    /// Summary of a run that ended but hasn't been persisted yet
    pub(crate) finished: Option<RunSummary>,
    next_id: u32,
}

impl GameState {
    /// Create an idle game with the given seed
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport) -> Self {
        let tuning = tuning.sanitized();
        Self {
            seed,
            session: Session::new(&tuning),
            trail: GestureTracker::new(tuning.trail_cap, tuning.trail_decay_ms),
            tuning,
            viewport,
            phase: RunPhase::Idle,
            projectiles: Vec::new(),
            effects: Effects::new(seed, 256),
            scheduler: Scheduler::new(),
            timers: RunTimers::default(),
            rng: Pcg32::seed_from_u64(seed),
            last_frame: None,
            events: Vec::new(),
            finished: None,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_running(&self) -> bool {
        self.phase == RunPhase::Running
    }

    /// Countdown or run in progress
    pub fn is_active(&self) -> bool {
        matches!(self.phase, RunPhase::Countdown { .. } | RunPhase::Running)
    }

    /// Track a viewport resize
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Take everything that happened since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Hand over a finished run for persistence (once)
    pub fn take_finished(&mut self) -> Option<RunSummary> {
        self.finished.take()
    }

    /// Number of scheduled tasks still pending
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(1, Tuning::default(), Viewport::default());
        assert_eq!(state.phase, RunPhase::Idle);
        assert!(!state.is_active());
        assert_eq!(state.session.lives, 3);
        assert_eq!(state.session.time_remaining, 90);
        assert_eq!(state.pending_tasks(), 0);
    }

    #[test]
    fn test_clock_label() {
        let mut session = Session::new(&Tuning::default());
        assert_eq!(session.clock_label(), "1:30");
        session.time_remaining = 5;
        assert_eq!(session.clock_label(), "0:05");
        session.score = -15;
        assert_eq!(session.hud_label(), "Score: -15 • 0:05");
        assert!(session.is_final_countdown());
        session.time_remaining = 0;
        assert!(!session.is_final_countdown());
    }

    #[test]
    fn test_summary_text() {
        let won = RunSummary {
            reason: EndReason::Time,
            player_name: "Ana".into(),
            score: 120,
        };
        assert_eq!(won.title(), "Congratulations, Ana!");
        assert_eq!(won.message(), "You scored 120 points.");
        let lost = RunSummary {
            reason: EndReason::Lives,
            ..won
        };
        assert_eq!(lost.title(), "Game Over, Ana");
        assert_eq!(lost.message(), "Score: 120");
        assert_eq!(lost.reason.as_str(), "lives");
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(1, Tuning::default(), Viewport::default());
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
