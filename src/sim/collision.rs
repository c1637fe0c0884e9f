//! Slice collision detection
//!
//! The blade is a polyline of recent pointer samples. Each new sample tests
//! the tail of that polyline against every live projectile, treating each
//! projectile as a circle with a forgiving hit radius.

use glam::Vec2;

use super::projectile::{Projectile, ProjectileKind};
use super::trail::GestureTracker;
use crate::consts::{SLICE_LENIENCY, SLICE_SEGMENTS};

/// A projectile cut by the blade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cut {
    pub projectile_id: u32,
    pub kind: ProjectileKind,
    /// End point of the cutting segment (where effects spawn)
    pub point: Vec2,
}

/// Closest point to `p` on segment `a`–`b`
#[inline]
pub fn closest_point_on_segment(a: Vec2, b: Vec2, p: Vec2) -> Vec2 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    a + ab * t
}

/// Whether segment `a`–`b` passes within the lenient radius of a circle
#[inline]
pub fn segment_hits_circle(a: Vec2, b: Vec2, center: Vec2, radius: f32) -> bool {
    let closest = closest_point_on_segment(a, b, center);
    center.distance_squared(closest) <= radius * radius * SLICE_LENIENCY
}

/// Find every projectile cut by the newest trail segments.
///
/// Segments are visited oldest to newest, projectiles newest-spawned first.
/// Each segment cuts at most one projectile and a projectile is cut at most
/// once, but separate segments can cut separate projectiles.
pub fn find_cuts(trail: &GestureTracker, projectiles: &[Projectile]) -> Vec<Cut> {
    let mut cuts: Vec<Cut> = Vec::new();

    for (p1, p2) in trail.recent_segments(SLICE_SEGMENTS) {
        let hit = projectiles.iter().rev().find(|proj| {
            proj.alive
                && !cuts.iter().any(|c| c.projectile_id == proj.id)
                && proj.intersects_segment(p1, p2)
        });
        if let Some(proj) = hit {
            cuts.push(Cut {
                projectile_id: proj.id,
                kind: proj.kind,
                point: p2,
            });
        }
    }

    cuts
}
