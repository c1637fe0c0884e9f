//! Run state machine and frame simulation
//!
//! All gameplay mutation goes through here: start requests, pointer input,
//! scheduled tasks (countdown, spawns, clock) and per-frame physics.

use glam::Vec2;

use super::collision::{Cut, find_cuts};
use super::projectile::{Projectile, ProjectileKind};
use super::schedule::{Fired, Task};
use super::spawner;
use super::state::{EndReason, GameEvent, GameState, RunPhase, RunSummary, Session, StartError};
use crate::consts::MAX_FRAME_DT;

/// Milliseconds per clock tick
const CLOCK_INTERVAL_MS: f64 = 1000.0;

/// Advance projectiles and effects by `dt` seconds, culling fruit that fell away
pub fn tick(state: &mut GameState, dt: f32) {
    let viewport = state.viewport;
    let mut missed: Vec<(u32, ProjectileKind)> = Vec::new();
    for proj in &mut state.projectiles {
        if proj.update(dt, viewport) {
            missed.push((proj.id, proj.kind));
        }
    }
    state.projectiles.retain(|p| p.alive);
    for (id, kind) in missed {
        state.emit(GameEvent::Missed { id, kind });
    }

    state.effects.update(dt);
}

impl GameState {
    /// Idle/Ended → Countdown.
    ///
    /// Rejected while a countdown or run is already in progress. Starting from
    /// `Ended` dismisses the previous summary.
    pub fn begin(&mut self, player_name: String, now: f64) -> Result<(), StartError> {
        if self.is_active() {
            log::warn!("Start requested while a run is active - ignored");
            return Err(StartError::AlreadyActive);
        }
        self.acknowledge();

        self.session = Session::new(&self.tuning);
        self.session.player_name = player_name;
        log::info!("Countdown for {}", self.session.player_name);

        let steps = self.tuning.countdown_steps;
        if steps == 0 {
            self.start_run(now);
            return Ok(());
        }
        self.phase = RunPhase::Countdown { remaining: steps };
        self.emit(GameEvent::CountdownStep { remaining: steps });
        let at = now + self.tuning.countdown_step_ms;
        self.timers.countdown = Some(self.scheduler.schedule(at, Task::CountdownStep));
        Ok(())
    }

    /// Ended → Idle
    pub fn acknowledge(&mut self) {
        if matches!(self.phase, RunPhase::Ended(_)) {
            self.phase = RunPhase::Idle;
        }
    }

    /// Run every task due by `now`, then simulate the frame
    pub fn advance(&mut self, now: f64) {
        let dt = match self.last_frame {
            Some(last) => (((now - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
            None => 0.0,
        };
        self.last_frame = Some(now);

        while let Some(fired) = self.scheduler.pop_due(now) {
            self.fire(fired);
        }

        tick(self, dt);
        self.trail.decay(now);
    }

    /// Pointer down: start a new blade stroke
    pub fn pointer_down(&mut self, pos: Vec2, now: f64) {
        if !self.is_running() {
            return;
        }
        self.trail.press(pos, now);
    }

    /// Pointer move: extend the stroke and slice whatever it crosses
    pub fn pointer_move(&mut self, pos: Vec2, now: f64) {
        if !self.is_running() {
            return;
        }
        if self.trail.drag(pos, now) {
            self.slice();
        }
    }

    /// Pointer up: the stroke fades out
    pub fn pointer_up(&mut self) {
        self.trail.release();
    }

    /// Launch a projectile of `kind` from `pos`; returns its id
    pub fn launch(&mut self, kind: ProjectileKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let proj = Projectile::spawn(id, pos, kind, &mut self.rng);
        self.projectiles.push(proj);
        self.emit(GameEvent::Spawned { id, kind });
        id
    }

    fn fire(&mut self, fired: Fired) {
        match fired.task {
            Task::CountdownStep => {
                self.timers.countdown = None;
                let RunPhase::Countdown { remaining } = self.phase else {
                    return;
                };
                let remaining = remaining.saturating_sub(1);
                if remaining > 0 {
                    self.phase = RunPhase::Countdown { remaining };
                    self.emit(GameEvent::CountdownStep { remaining });
                    let at = fired.at + self.tuning.countdown_step_ms;
                    self.timers.countdown = Some(self.scheduler.schedule(at, Task::CountdownStep));
                } else {
                    self.start_run(fired.at);
                }
            }
            Task::Spawn => {
                self.timers.spawn = None;
                if !self.is_running() {
                    return;
                }
                self.spawn_one();
                self.schedule_spawn(fired.at);
            }
            Task::ClockTick => {
                self.timers.clock = None;
                if !self.is_running() {
                    return;
                }
                self.session.time_remaining = self.session.time_remaining.saturating_sub(1);
                let remaining = self.session.time_remaining;
                self.emit(GameEvent::ClockTick { remaining });
                if remaining == 0 {
                    self.end_run(EndReason::Time);
                } else {
                    let at = fired.at + CLOCK_INTERVAL_MS;
                    self.timers.clock = Some(self.scheduler.schedule(at, Task::ClockTick));
                }
            }
        }
    }

    /// Countdown → Running
    fn start_run(&mut self, at: f64) {
        let name = std::mem::take(&mut self.session.player_name);
        self.session = Session::new(&self.tuning);
        self.session.player_name = name;
        self.projectiles.clear();
        self.trail.clear();
        self.effects.clear();
        self.phase = RunPhase::Running;

        self.schedule_spawn(at);
        self.timers.clock = Some(self.scheduler.schedule(at + CLOCK_INTERVAL_MS, Task::ClockTick));
        self.emit(GameEvent::RunStarted);
        log::info!(
            "Run started: {} lives, {}s",
            self.session.lives,
            self.session.time_remaining
        );
    }

    fn schedule_spawn(&mut self, from: f64) {
        let delay = spawner::next_delay_ms(&mut self.rng, &self.tuning);
        self.timers.spawn = Some(self.scheduler.schedule(from + delay, Task::Spawn));
    }

    fn spawn_one(&mut self) {
        let pos = spawner::spawn_position(&mut self.rng, self.viewport);
        let kind = spawner::choose_kind(&mut self.rng, &self.tuning);
        let id = self.launch(kind, pos);
        log::debug!("Spawned {} #{} at x={:.0}", kind.name(), id, pos.x);
    }

    /// Running → Ended. No-op in any other phase, so repeated calls are harmless.
    fn end_run(&mut self, reason: EndReason) {
        if !self.is_running() {
            return;
        }

        for handle in [
            self.timers.countdown.take(),
            self.timers.spawn.take(),
            self.timers.clock.take(),
        ]
        .into_iter()
        .flatten()
        {
            self.scheduler.cancel(handle);
        }

        // Terminal cleanup: no explosions, no misses
        for proj in &mut self.projectiles {
            proj.alive = false;
        }
        self.projectiles.clear();
        self.trail.clear();

        let summary = RunSummary {
            reason,
            player_name: self.session.player_name.clone(),
            score: self.session.score,
        };
        log::info!(
            "Run ended ({}): {} scored {}",
            reason.as_str(),
            summary.player_name,
            summary.score
        );
        self.phase = RunPhase::Ended(summary.clone());
        self.finished = Some(summary.clone());
        self.emit(GameEvent::RunEnded(summary));
    }

    fn slice(&mut self) {
        let cuts = find_cuts(&self.trail, &self.projectiles);
        for cut in cuts {
            // A bomb may have ended the run partway through
            if !self.is_running() {
                break;
            }
            self.resolve_cut(cut);
        }
    }

    fn resolve_cut(&mut self, cut: Cut) {
        let Some(idx) = self
            .projectiles
            .iter()
            .position(|p| p.id == cut.projectile_id && p.alive)
        else {
            return;
        };
        self.projectiles.remove(idx);
        self.emit(GameEvent::SliceCue);

        match cut.kind {
            ProjectileKind::Reward(_) | ProjectileKind::Penalty => {
                let points = match cut.kind {
                    ProjectileKind::Reward(_) => self.tuning.reward_points,
                    _ => self.tuning.penalty_points,
                };
                self.session.score += points;
                self.effects.burst(cut.point, cut.kind.color());
                self.emit(GameEvent::Sliced {
                    id: cut.projectile_id,
                    kind: cut.kind,
                    point: cut.point,
                    points,
                });
            }
            ProjectileKind::Hazard => {
                self.session.lives = self.session.lives.saturating_sub(1);
                self.effects.flash(cut.point, cut.kind.color());
                let lives_left = self.session.lives;
                self.emit(GameEvent::BombDetonated {
                    id: cut.projectile_id,
                    point: cut.point,
                    lives_left,
                });
                log::debug!("Bomb cut, {} lives left", lives_left);
                if lives_left == 0 {
                    self.end_run(EndReason::Lives);
                }
            }
        }
    }
}
