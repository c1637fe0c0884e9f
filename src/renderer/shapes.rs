//! Drawing primitives for the blade trail and placeholder fruit
//!
//! Pure geometry and colour; the canvas backend only strokes/fills what
//! these return.

use glam::Vec2;

use crate::lerp_color;
use crate::sim::ProjectileKind;
use crate::sim::trail::GestureTracker;

/// Trail colour at the tail and at the blade tip
pub const TRAIL_TAIL_COLOR: u32 = 0x00ffe1;
pub const TRAIL_TIP_COLOR: u32 = 0xff3ec8;
/// Base width of the glow stroke (pixels)
pub const TRAIL_WIDTH: f32 = 18.0;
/// Width of the bright core line
pub const TRAIL_CORE_WIDTH: f32 = 4.0;

/// Burst particle dot radius
pub const PARTICLE_RADIUS: f32 = 4.0;

/// One straight line to stroke
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: u32,
    pub alpha: f32,
}

/// Glow segments (widening and shifting cyan→magenta toward the tip),
/// followed by a thin white core over the whole path
pub fn trail_strokes(trail: &GestureTracker) -> Vec<Stroke> {
    let n = trail.len();
    if n < 2 {
        return Vec::new();
    }

    let segments: Vec<(Vec2, Vec2)> = trail.segments().collect();
    let mut strokes = Vec::with_capacity(segments.len() * 2);

    for (i, &(from, to)) in segments.iter().enumerate() {
        let a = i as f32 / n as f32;
        strokes.push(Stroke {
            from,
            to,
            width: TRAIL_WIDTH * (0.6 + a * 0.9),
            color: lerp_color(TRAIL_TAIL_COLOR, TRAIL_TIP_COLOR, a),
            alpha: (0.95 - a * 0.5).max(0.18),
        });
    }
    for &(from, to) in &segments {
        strokes.push(Stroke {
            from,
            to,
            width: TRAIL_CORE_WIDTH,
            color: 0xffffff,
            alpha: 0.98,
        });
    }

    strokes
}

/// A filled ellipse relative to the sprite centre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub offset: Vec2,
    pub radii: Vec2,
    pub color: u32,
    pub alpha: f32,
}

/// Procedural stand-in for a fruit texture: body, highlight and shine
pub fn placeholder_sprite(kind: ProjectileKind, radius: f32, shaded: bool) -> Vec<Blob> {
    let (base, highlight) = kind.palette();
    let mut blobs = vec![Blob {
        offset: Vec2::ZERO,
        radii: Vec2::splat(radius),
        color: base,
        alpha: 1.0,
    }];
    if shaded {
        blobs.push(Blob {
            offset: Vec2::splat(-radius * 0.35),
            radii: Vec2::new(radius * 0.6, radius * 0.45),
            color: highlight,
            alpha: 0.85,
        });
        blobs.push(Blob {
            offset: Vec2::new(-radius * 0.45, -radius * 0.48),
            radii: Vec2::splat(radius * 0.12),
            color: 0xffffff,
            alpha: 0.6,
        });
    }
    blobs
}

/// `rgba(r,g,b,a)` for canvas styles
pub fn css_rgba(color: u32, alpha: f32) -> String {
    format!(
        "rgba({},{},{},{:.3})",
        (color >> 16) & 0xff,
        (color >> 8) & 0xff,
        color & 0xff,
        alpha.clamp(0.0, 1.0)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Fruit;

    fn trail_of(n: usize) -> GestureTracker {
        let mut trail = GestureTracker::new(20, 140.0);
        trail.press(Vec2::ZERO, 0.0);
        for i in 1..n {
            trail.drag(Vec2::new(i as f32 * 10.0, 0.0), i as f64);
        }
        trail
    }

    #[test]
    fn test_short_trail_draws_nothing() {
        assert!(trail_strokes(&trail_of(1)).is_empty());
    }

    #[test]
    fn test_trail_glow_then_core() {
        let strokes = trail_strokes(&trail_of(5));
        assert_eq!(strokes.len(), 8);

        let first = strokes[0];
        assert_eq!(first.color, TRAIL_TAIL_COLOR);
        assert!((first.width - 10.8).abs() < 1e-4);
        assert!((first.alpha - 0.95).abs() < 1e-6);

        // Widens and fades toward the tip
        assert!(strokes[3].width > strokes[0].width);
        assert!(strokes[3].alpha < strokes[0].alpha);

        for core in &strokes[4..] {
            assert_eq!(core.width, TRAIL_CORE_WIDTH);
            assert_eq!(core.color, 0xffffff);
        }
    }

    #[test]
    fn test_placeholder_uses_kind_palette() {
        let bomb = placeholder_sprite(ProjectileKind::Hazard, 30.0, true);
        assert_eq!(bomb.len(), 3);
        assert_eq!(bomb[0].color, 0x111111);
        assert_eq!(bomb[1].color, 0x444444);

        let flat = placeholder_sprite(ProjectileKind::Reward(Fruit::Banana), 30.0, false);
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].color, 0xfff07a);
    }

    #[test]
    fn test_css_rgba() {
        assert_eq!(css_rgba(0xff3c6b, 0.28), "rgba(255,60,107,0.280)");
        assert_eq!(css_rgba(0x000000, 2.0), "rgba(0,0,0,1.000)");
    }
}
