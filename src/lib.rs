//! Katana Neon - A neon fruit-slicing arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (projectiles, slice trail, collisions, run state)
//! - `game`: Orchestrator binding the simulation to score storage and name entry
//! - `highscores`: Ranked local leaderboard
//! - `persistence`: Score store backends
//! - `platform`: Injected browser/native collaborators
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences
//! - `audio`: Sound cues for game events
//! - `renderer`: Trail/sprite shapes and the Canvas 2D backend

pub mod audio;
pub mod game;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use highscores::{HighScores, ScoreEntry};
pub use settings::Settings;
pub use tuning::Tuning;

use rand::Rng;

/// Game configuration constants
pub mod consts {
    /// Upper bound on a single frame's delta so stalls don't tunnel fruit
    pub const MAX_FRAME_DT: f32 = 0.032;

    /// Downward acceleration applied to every projectile (pixels/s²)
    pub const GRAVITY: f32 = 700.0;

    /// Launch velocity ranges (pixels/s, negative is up)
    pub const LAUNCH_VX_RANGE: (f32, f32) = (-30.0, 30.0);
    pub const LAUNCH_VY_RANGE: (f32, f32) = (-1000.0, -700.0);
    /// Projectile radius range (pixels)
    pub const RADIUS_RANGE: (f32, f32) = (26.0, 42.0);
    /// Spin range (radians per tick)
    pub const SPIN_RANGE: (f32, f32) = (-0.06, 0.06);

    /// Culling margins around the viewport
    pub const CULL_MARGIN_BOTTOM: f32 = 140.0;
    pub const CULL_MARGIN_SIDE: f32 = 200.0;

    /// Squared-radius multiplier for slice hits (1.6 ≈ 1.265²)
    pub const SLICE_LENIENCY: f32 = 1.6;
    /// Number of trailing segments tested per new trail point
    pub const SLICE_SEGMENTS: usize = 8;

    /// Spawn placement
    pub const SPAWN_INSET_X: f32 = 80.0;
    pub const SPAWN_DEPTH: f32 = 160.0;
}

/// Uniform random value in `[min, max]`; returns `min` for an empty range
#[inline]
pub fn rand_range<R: Rng>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max <= min {
        return min;
    }
    rng.random_range(min..=max)
}

/// Linear interpolation between two `0xRRGGBB` colors, rounded per channel
pub fn lerp_color(a: u32, b: u32, t: f32) -> u32 {
    let t = t.clamp(0.0, 1.0);
    let channel = |shift: u32| {
        let ca = ((a >> shift) & 0xff) as f32;
        let cb = ((b >> shift) & 0xff) as f32;
        ((ca + (cb - ca) * t).round() as u32) << shift
    };
    channel(16) | channel(8) | channel(0)
}
