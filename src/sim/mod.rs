//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time comes in as explicit millisecond timestamps
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod effects;
pub mod projectile;
pub mod schedule;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod trail;

pub use collision::{Cut, find_cuts, segment_hits_circle};
pub use effects::{Effects, Flash, Particle};
pub use projectile::{Fruit, Projectile, ProjectileKind, Viewport};
pub use schedule::{Scheduler, Task, TaskHandle};
pub use state::{EndReason, GameEvent, GameState, RunPhase, RunSummary, Session, StartError};
pub use tick::tick;
pub use trail::{GestureTracker, TrailPoint};
