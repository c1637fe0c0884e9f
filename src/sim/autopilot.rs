//! Demo bot that plays the game
//!
//! Picks the highest live fruit and swipes horizontally through it, skipping
//! any stroke that would clip a bomb. Used by the headless demo and tests.

use glam::Vec2;

use super::collision::segment_hits_circle;
use super::projectile::ProjectileKind;
use super::state::GameState;

/// Half-length of a swipe (pixels)
const SWIPE_REACH: f32 = 70.0;

/// A planned blade stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Swipe {
    pub from: Vec2,
    pub to: Vec2,
    pub target: u32,
}

/// Choose a stroke for the current frame, if any is worth making
pub fn plan_swipe(state: &GameState) -> Option<Swipe> {
    if !state.is_running() {
        return None;
    }

    let hazards: Vec<_> = state
        .projectiles
        .iter()
        .filter(|p| p.alive && p.kind.is_hazard())
        .collect();

    let mut targets: Vec<_> = state
        .projectiles
        .iter()
        .filter(|p| {
            p.alive
                && matches!(p.kind, ProjectileKind::Reward(_))
                && p.pos.y < state.viewport.height
        })
        .collect();
    // Highest first: those are about to fall back out of reach
    targets.sort_by(|a, b| {
        a.pos
            .y
            .partial_cmp(&b.pos.y)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    targets.into_iter().find_map(|target| {
        let from = target.pos - Vec2::new(SWIPE_REACH, 0.0);
        let to = target.pos + Vec2::new(SWIPE_REACH, 0.0);
        let clips_bomb = hazards
            .iter()
            .any(|h| segment_hits_circle(from, to, h.pos, h.radius));
        (!clips_bomb).then_some(Swipe {
            from,
            to,
            target: target.id,
        })
    })
}
