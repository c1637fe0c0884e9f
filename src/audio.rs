//! Audio cues
//!
//! Sound effects are synthesized with the Web Audio API; the background
//! loop is a plain `<audio>` element. Everything is fire-and-forget: a
//! failure is logged once and the cue skipped.

use crate::sim::GameEvent;

/// Path of the optional background music loop
pub const MUSIC_PATH: &str = "assets/music/loop.mp3";

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Blade cut anything
    Slice,
    /// Bomb went off
    BombBlast,
    /// Countdown digit
    CountdownBeep,
    /// Countdown finished
    RunStart,
    /// Clock ran out
    TimeUp,
    /// Last life lost
    GameOver,
}

/// Which sound (if any) an event should make
pub fn cue_for(event: &GameEvent) -> Option<SoundEffect> {
    use crate::sim::EndReason;

    match event {
        GameEvent::SliceCue => Some(SoundEffect::Slice),
        GameEvent::BombDetonated { .. } => Some(SoundEffect::BombBlast),
        GameEvent::CountdownStep { .. } => Some(SoundEffect::CountdownBeep),
        GameEvent::RunStarted => Some(SoundEffect::RunStart),
        GameEvent::RunEnded(summary) => match summary.reason {
            EndReason::Time => Some(SoundEffect::TimeUp),
            EndReason::Lives => Some(SoundEffect::GameOver),
        },
        GameEvent::Spawned { .. }
        | GameEvent::Sliced { .. }
        | GameEvent::Missed { .. }
        | GameEvent::ClockTick { .. } => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use std::cell::Cell;

    use web_sys::{AudioContext, GainNode, HtmlAudioElement, OscillatorNode, OscillatorType};

    use super::{MUSIC_PATH, SoundEffect, cue_for};
    use crate::settings::Settings;
    use crate::sim::GameEvent;

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        music: Option<HtmlAudioElement>,
        sfx_gain: f32,
        music_gain: f32,
        warned: Cell<bool>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Created lazily on the first gesture; browsers block it before that
            Self {
                ctx: None,
                music: None,
                sfx_gain: settings.sfx_gain(),
                music_gain: settings.music_gain(),
                warned: Cell::new(false),
            }
        }

        fn warn_once(&self, what: &str) {
            if !self.warned.replace(true) {
                log::warn!("Audio unavailable ({}) - cues disabled", what);
            }
        }

        /// Create/resume the context; call from a user gesture
        pub fn unlock(&mut self) {
            if self.ctx.is_none() {
                match AudioContext::new() {
                    Ok(ctx) => self.ctx = Some(ctx),
                    Err(_) => self.warn_once("no AudioContext"),
                }
            }
            if let Some(ctx) = &self.ctx {
                if ctx.state() == web_sys::AudioContextState::Suspended {
                    let _ = ctx.resume();
                }
            }
        }

        /// Start the background loop (needs a prior user gesture)
        pub fn start_music(&mut self) {
            if self.music.is_none() {
                match HtmlAudioElement::new_with_src(MUSIC_PATH) {
                    Ok(el) => {
                        el.set_loop(true);
                        self.music = Some(el);
                    }
                    Err(_) => {
                        self.warn_once("no <audio> support");
                        return;
                    }
                }
            }
            if let Some(music) = &self.music {
                music.set_volume(self.music_gain as f64);
                // Rejected promise just means playback was blocked
                let _ = music.play();
            }
        }

        pub fn stop_music(&self) {
            if let Some(music) = &self.music {
                let _ = music.pause();
                music.set_current_time(0.0);
            }
        }

        /// Play whatever the event calls for
        pub fn on_event(&self, event: &GameEvent) {
            if let Some(effect) = cue_for(event) {
                self.play(effect);
            }
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            let vol = self.sfx_gain;
            if vol <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else {
                self.warn_once("context not unlocked");
                return;
            };

            match effect {
                SoundEffect::Slice => self.play_slice(ctx, vol),
                SoundEffect::BombBlast => self.play_blast(ctx, vol),
                SoundEffect::CountdownBeep => self.play_beep(ctx, vol, 440.0),
                SoundEffect::RunStart => self.play_beep(ctx, vol, 880.0),
                SoundEffect::TimeUp => self.play_arpeggio(ctx, vol, &[500.0, 650.0, 800.0, 1000.0]),
                SoundEffect::GameOver => self.play_arpeggio(ctx, vol, &[400.0, 350.0, 300.0, 200.0]),
            }
        }

        // === Sound generators ===

        fn create_osc(
            &self,
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
        ) -> Option<(OscillatorNode, GainNode)> {
            let osc = ctx.create_oscillator().ok()?;
            let gain = ctx.create_gain().ok()?;

            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(&gain).ok()?;
            gain.connect_with_audio_node(&ctx.destination()).ok()?;

            Some((osc, gain))
        }

        /// Short sine zip, pitch varies per cut
        fn play_slice(&self, ctx: &AudioContext, vol: f32) {
            let freq = rand::random_range(800.0..=1200.0);
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Sine) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(0.0001, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.12 * vol, t + 0.01)
                .ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.001, t + 0.12)
                .ok();

            osc.start_with_when(t).ok();
            osc.stop_with_when(t + 0.12).ok();
        }

        /// Low sawtooth boom
        fn play_blast(&self, ctx: &AudioContext, vol: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, 110.0, OscillatorType::Sawtooth) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.4, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                .ok();
            osc.frequency().set_value_at_time(110.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(35.0, t + 0.35)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.4).ok();
        }

        fn play_beep(&self, ctx: &AudioContext, vol: f32, freq: f32) {
            let Some((osc, gain)) = self.create_osc(ctx, freq, OscillatorType::Square) else {
                return;
            };
            let t = ctx.current_time();

            gain.gain().set_value_at_time(vol * 0.15, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.15)
                .ok();

            osc.start().ok();
            osc.stop_with_when(t + 0.18).ok();
        }

        fn play_arpeggio(&self, ctx: &AudioContext, vol: f32, notes: &[f32]) {
            for (i, freq) in notes.iter().enumerate() {
                let delay = i as f64 * 0.15;
                if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                    let t = ctx.current_time() + delay;
                    gain.gain().set_value_at_time(vol * 0.25, t).ok();
                    gain.gain()
                        .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                        .ok();
                    osc.start_with_when(t).ok();
                    osc.stop_with_when(t + 0.3).ok();
                }
            }
        }
    }
}
