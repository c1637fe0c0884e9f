//! Game orchestrator
//!
//! Ties the simulation to its collaborators: asks for a name before a run and
//! writes the result to the score store when a run ends.

use chrono::Utc;
use glam::Vec2;

use crate::highscores::{DISPLAYED_SCORES, HighScores, ScoreEntry};
use crate::persistence::{ScoreStore, StoreError};
use crate::platform::{NamePrompt, resolve_name};
use crate::settings::Settings;
use crate::sim::autopilot::{self, Swipe};
use crate::sim::{GameEvent, GameState, RunSummary, StartError, Viewport};
use crate::tuning::Tuning;

/// A playable game bound to a score store
pub struct Game<S: ScoreStore> {
    pub state: GameState,
    pub settings: Settings,
    scores: HighScores,
    store: S,
}

impl<S: ScoreStore> Game<S> {
    pub fn new(seed: u64, tuning: Tuning, viewport: Viewport, settings: Settings, store: S) -> Self {
        let mut state = GameState::new(seed, tuning, viewport);
        state.effects.max_particles = settings.max_particles();
        let scores = store.load();
        log::info!("Game ready, {} stored scores", scores.len());
        Self {
            state,
            settings,
            scores,
            store,
        }
    }

    /// Ask for a name and start the countdown.
    ///
    /// The prompt is skipped entirely while a run is already active. `clock`
    /// is read once the prompt returns, since a browser prompt blocks.
    pub fn play(
        &mut self,
        prompt: &mut dyn NamePrompt,
        clock: impl FnOnce() -> f64,
    ) -> Result<(), StartError> {
        if self.state.is_active() {
            return Err(StartError::AlreadyActive);
        }
        let name = resolve_name(prompt.ask_name(), &self.settings.default_name);
        self.state.begin(name, clock())
    }

    /// Advance to `now` (ms) and persist a run that just ended
    pub fn advance(&mut self, now: f64) {
        self.state.advance(now);
        self.record_finished();
    }

    pub fn pointer_down(&mut self, pos: Vec2, now: f64) {
        self.state.pointer_down(pos, now);
    }

    pub fn pointer_move(&mut self, pos: Vec2, now: f64) {
        self.state.pointer_move(pos, now);
        self.record_finished();
    }

    pub fn pointer_up(&mut self) {
        self.state.pointer_up();
    }

    /// Let the bot make one stroke at `now` (ms), if it has a target
    pub fn autopilot_step(&mut self, now: f64) -> Option<Swipe> {
        let swipe = autopilot::plan_swipe(&self.state)?;
        self.pointer_down(swipe.from, now);
        self.pointer_move(swipe.to, now);
        self.pointer_up();
        Some(swipe)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.state.resize(width, height);
    }

    /// Dismiss the end-of-run summary
    pub fn acknowledge(&mut self) {
        self.state.acknowledge();
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn top_scores(&self) -> &[ScoreEntry] {
        self.scores.top(DISPLAYED_SCORES)
    }

    pub fn best(&self) -> Option<i32> {
        self.scores.best()
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clear_scores(&mut self) -> Result<(), StoreError> {
        self.scores.clear();
        self.store.clear()
    }

    fn record_finished(&mut self) {
        if let Some(summary) = self.state.take_finished() {
            self.persist(&summary);
        }
    }

    /// Append a finished run and write the list back
    fn persist(&mut self, summary: &RunSummary) {
        // Reload so another tab's scores aren't overwritten
        self.scores = self.store.load();
        let rank = self
            .scores
            .record(&summary.player_name, summary.score, Utc::now());
        match rank {
            Some(r) => log::info!("{} placed #{} with {}", summary.player_name, r, summary.score),
            None => log::info!("{} scored {} (unranked)", summary.player_name, summary.score),
        }
        if let Err(e) = self.store.save(&self.scores) {
            log::warn!("Failed to save high scores: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use std::cell::Cell;
    use crate::sim::{EndReason, Fruit, ProjectileKind, RunPhase};

    /// Store that refuses every write
    struct ReadOnlyStore;

    impl ScoreStore for ReadOnlyStore {
        fn load(&self) -> HighScores {
            HighScores::new()
        }

        fn save(&mut self, _scores: &HighScores) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("read-only".into()))
        }
    }

    fn new_game() -> Game<MemoryStore> {
        Game::new(
            77,
            Tuning::default(),
            Viewport::new(800.0, 600.0),
            Settings::default(),
            MemoryStore::new(),
        )
    }

    fn start<S: ScoreStore>(game: &mut Game<S>, name: &str) -> f64 {
        let answer = name.to_string();
        let mut prompt = move || Some(answer.clone());
        game.play(&mut prompt, || 0.0).expect("start");
        let mut now = 0.0;
        while !game.state.is_running() {
            now += 16.0;
            game.advance(now);
        }
        now
    }

    fn slice_at<S: ScoreStore>(game: &mut Game<S>, kind: ProjectileKind, x: f32, now: f64) {
        let id = game.state.launch(kind, Vec2::new(x, 300.0));
        if let Some(p) = game.state.projectiles.iter_mut().find(|p| p.id == id) {
            p.vel = Vec2::ZERO;
            p.radius = 30.0;
        }
        game.pointer_down(Vec2::new(x - 50.0, 300.0), now);
        game.pointer_move(Vec2::new(x + 50.0, 300.0), now + 1.0);
        game.pointer_up();
    }

    #[test]
    fn test_lives_scenario_persists_final_score() {
        let mut game = new_game();
        let now = start(&mut game, "Ana");

        slice_at(&mut game, ProjectileKind::Reward(Fruit::Apple), 200.0, now);
        slice_at(&mut game, ProjectileKind::Reward(Fruit::Orange), 400.0, now);
        assert_eq!(game.state.session.score, 20);
        slice_at(&mut game, ProjectileKind::Penalty, 300.0, now);
        assert_eq!(game.state.session.score, 5);

        slice_at(&mut game, ProjectileKind::Hazard, 200.0, now);
        slice_at(&mut game, ProjectileKind::Hazard, 500.0, now);
        assert_eq!(game.state.session.lives, 1);
        assert!(game.state.is_running());

        slice_at(&mut game, ProjectileKind::Hazard, 600.0, now);
        match &game.state.phase {
            RunPhase::Ended(summary) => {
                assert_eq!(summary.reason, EndReason::Lives);
                assert_eq!(summary.score, 5);
                assert_eq!(summary.player_name, "Ana");
            }
            other => panic!("expected Ended, got {:?}", other),
        }

        assert_eq!(game.store().load().len(), 1);
        assert_eq!(game.store().load().entries()[0].score, 5);
        assert_eq!(game.top_scores()[0].name, "Ana");
        assert_eq!(game.best(), Some(5));
    }

    #[test]
    fn test_idle_run_times_out_with_zero() {
        let mut game = new_game();
        let mut now = start(&mut game, "Idle");
        game.drain_events();
        let end = now + 90_000.0;
        while now < end {
            now += 16.0;
            game.advance(now.min(end));
        }
        let endings: Vec<_> = game
            .drain_events()
            .into_iter()
            .filter_map(|e| match e {
                GameEvent::RunEnded(summary) => Some(summary),
                _ => None,
            })
            .collect();
        assert_eq!(endings.len(), 1);
        assert_eq!(endings[0].reason, EndReason::Time);

        let stored = game.store().load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.entries()[0].score, 0);
        assert_eq!(stored.entries()[0].name, "Idle");

        // Nothing more is recorded afterwards
        game.advance(end + 5000.0);
        assert_eq!(game.store().load().len(), 1);
    }

    #[test]
    fn test_blank_name_uses_default() {
        let mut game = new_game();
        let mut prompt = || Some("   ".to_string());
        game.play(&mut prompt, || 0.0).expect("start");
        assert_eq!(game.state.session.player_name, "Player");
    }

    #[test]
    fn test_no_prompt_while_active() {
        let mut game = new_game();
        start(&mut game, "First");
        let mut asked = false;
        let mut prompt = || {
            asked = true;
            Some("Second".to_string())
        };
        assert_eq!(game.play(&mut prompt, || 100.0), Err(StartError::AlreadyActive));
        drop(prompt);
        assert!(!asked);
        assert_eq!(game.state.session.player_name, "First");
    }

    #[test]
    fn test_countdown_starts_after_slow_prompt() {
        let mut game = new_game();
        let clock = Cell::new(16.0);
        // Player takes ten seconds to type a name
        let mut prompt = || {
            clock.set(10_016.0);
            Some("Slow".to_string())
        };
        game.play(&mut prompt, || clock.get()).expect("start");
        game.drain_events();

        game.advance(10_032.0);
        assert_eq!(game.state.phase, RunPhase::Countdown { remaining: 3 });
        assert!(game.state.projectiles.is_empty());
        assert!(
            !game
                .drain_events()
                .iter()
                .any(|e| matches!(e, GameEvent::RunStarted))
        );

        let mut now = 10_032.0;
        while !game.state.is_running() {
            now += 16.0;
            game.advance(now);
        }
        assert_eq!(game.state.session.time_remaining, 90);
        assert!(game.state.projectiles.len() <= 1);
    }

    #[test]
    fn test_autopilot_run_is_saved_once() {
        let mut game = new_game();
        let mut now = start(&mut game, "Bot");
        let mut strokes = 0;
        let mut frames = 0u64;
        while !matches!(game.state.phase, RunPhase::Ended(_)) {
            now += 1000.0 / 60.0;
            frames += 1;
            game.advance(now);
            if frames % 6 == 0 && game.autopilot_step(now).is_some() {
                strokes += 1;
            }
        }
        assert!(strokes > 0);
        assert!(!game.state.trail.is_held());

        let stored = game.store().load();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored.entries()[0].name, "Bot");
        assert_eq!(stored.entries()[0].score, game.state.session.score);
    }

    #[test]
    fn test_save_failure_does_not_abort() {
        let mut game = Game::new(
            5,
            Tuning::default(),
            Viewport::new(800.0, 600.0),
            Settings::default(),
            ReadOnlyStore,
        );
        let now = start(&mut game, "Bo");
        game.state.session.lives = 1;
        slice_at(&mut game, ProjectileKind::Hazard, 400.0, now);
        assert!(matches!(game.state.phase, RunPhase::Ended(_)));
        // In-memory list still holds the run
        assert_eq!(game.scores().len(), 1);
    }

    #[test]
    fn test_existing_scores_are_kept() {
        let mut seeded = HighScores::new();
        seeded.record("Old", 50, Utc::now());
        let mut store = MemoryStore::new();
        store.save(&seeded).expect("seed");

        let mut game = Game::new(
            9,
            Tuning::default(),
            Viewport::new(800.0, 600.0),
            Settings::default(),
            store,
        );
        assert_eq!(game.best(), Some(50));
        let now = start(&mut game, "New");
        game.state.session.lives = 1;
        slice_at(&mut game, ProjectileKind::Hazard, 400.0, now);
        let names: Vec<_> = game.top_scores().iter().map(|e| e.name.clone()).collect();
        assert_eq!(names, vec!["Old".to_string(), "New".to_string()]);

        game.clear_scores().expect("clear");
        assert!(game.top_scores().is_empty());
        assert!(game.store().load().is_empty());
    }

    #[test]
    fn test_settings_cap_particles() {
        let mut game = Game::new(
            77,
            Tuning::default(),
            Viewport::new(800.0, 600.0),
            Settings {
                particles: false,
                ..Default::default()
            },
            MemoryStore::new(),
        );
        let now = start(&mut game, "Fx");
        slice_at(&mut game, ProjectileKind::Reward(Fruit::Banana), 400.0, now);
        assert_eq!(game.state.session.score, 10);
        assert!(game.state.effects.particles.is_empty());
    }
}
