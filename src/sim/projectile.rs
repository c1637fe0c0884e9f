//! Flying fruit and bombs
//!
//! A projectile is launched from below the viewport, arcs under gravity and
//! is either sliced by the player or falls back out of view.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::rand_range;

/// Reward fruit variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fruit {
    Apple,
    Orange,
    Banana,
}

impl Fruit {
    pub const ALL: [Fruit; 3] = [Fruit::Apple, Fruit::Orange, Fruit::Banana];
}

/// What a projectile is, and therefore what slicing it does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Awards points
    Reward(Fruit),
    /// Rotten fruit, deducts points
    Penalty,
    /// Bomb, costs a life
    Hazard,
}

impl ProjectileKind {
    pub const ALL: [ProjectileKind; 5] = [
        ProjectileKind::Reward(Fruit::Apple),
        ProjectileKind::Reward(Fruit::Orange),
        ProjectileKind::Reward(Fruit::Banana),
        ProjectileKind::Penalty,
        ProjectileKind::Hazard,
    ];

    /// Asset/display name
    pub fn name(&self) -> &'static str {
        match self {
            ProjectileKind::Reward(Fruit::Apple) => "apple",
            ProjectileKind::Reward(Fruit::Orange) => "orange",
            ProjectileKind::Reward(Fruit::Banana) => "banana",
            ProjectileKind::Penalty => "rotten",
            ProjectileKind::Hazard => "bomb",
        }
    }

    /// Effect color (particle bursts, flashes)
    pub fn color(&self) -> u32 {
        match self {
            ProjectileKind::Reward(Fruit::Apple) => 0xff6b6b,
            ProjectileKind::Reward(Fruit::Orange) => 0xffa94d,
            ProjectileKind::Reward(Fruit::Banana) => 0xfff07a,
            ProjectileKind::Penalty => 0x9a9a9a,
            ProjectileKind::Hazard => 0xff3c6b,
        }
    }

    /// Base and highlight colors for the procedurally drawn placeholder
    pub fn palette(&self) -> (u32, u32) {
        match self {
            ProjectileKind::Reward(Fruit::Apple) => (0xff6b6b, 0xffb3b3),
            ProjectileKind::Reward(Fruit::Orange) => (0xffa94d, 0xffd9b3),
            ProjectileKind::Reward(Fruit::Banana) => (0xfff07a, 0xfff9c4),
            ProjectileKind::Penalty => (0x8a8a8a, 0xbfbfbf),
            ProjectileKind::Hazard => (0x111111, 0x444444),
        }
    }

    pub fn is_hazard(&self) -> bool {
        matches!(self, ProjectileKind::Hazard)
    }
}

/// Visible play area in CSS pixels, origin top-left, y down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// A sliceable flying object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Current rotation (radians)
    pub rotation: f32,
    /// Spin applied every tick (radians/tick)
    pub rotation_speed: f32,
    pub radius: f32,
    pub alive: bool,
}

impl Projectile {
    /// Launch a new projectile from `pos` with a randomized upward impulse
    pub fn spawn<R: Rng>(id: u32, pos: Vec2, kind: ProjectileKind, rng: &mut R) -> Self {
        let vel = Vec2::new(
            rand_range(rng, LAUNCH_VX_RANGE.0, LAUNCH_VX_RANGE.1),
            rand_range(rng, LAUNCH_VY_RANGE.0, LAUNCH_VY_RANGE.1),
        );
        let radius = rand_range(rng, RADIUS_RANGE.0, RADIUS_RANGE.1);
        let rotation_speed = rand_range(rng, SPIN_RANGE.0, SPIN_RANGE.1);
        Self {
            id,
            kind,
            pos,
            vel,
            rotation: 0.0,
            rotation_speed,
            radius,
            alive: true,
        }
    }

    /// Advance by `dt` seconds under gravity.
    ///
    /// Returns true when this update carried the projectile out of the
    /// extended viewport; it is then marked dead and counts as a miss.
    pub fn update(&mut self, dt: f32, viewport: Viewport) -> bool {
        if !self.alive {
            return false;
        }

        // Constant acceleration, so the half-step term keeps this exact
        let accel = Vec2::new(0.0, GRAVITY);
        self.pos += self.vel * dt + 0.5 * accel * dt * dt;
        self.vel += accel * dt;
        self.rotation += self.rotation_speed;

        if self.is_out_of_bounds(viewport) {
            self.alive = false;
            return true;
        }
        false
    }

    /// Below the viewport (plus margin) or too far to either side
    pub fn is_out_of_bounds(&self, viewport: Viewport) -> bool {
        self.pos.y - self.radius > viewport.height + CULL_MARGIN_BOTTOM
            || self.pos.x < -CULL_MARGIN_SIDE
            || self.pos.x > viewport.width + CULL_MARGIN_SIDE
    }

    /// Whether the slice segment `p1`–`p2` passes close enough to cut
    pub fn intersects_segment(&self, p1: Vec2, p2: Vec2) -> bool {
        super::collision::segment_hits_circle(p1, p2, self.pos, self.radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn still(pos: Vec2, radius: f32) -> Projectile {
        Projectile {
            id: 1,
            kind: ProjectileKind::Reward(Fruit::Apple),
            pos,
            vel: Vec2::ZERO,
            rotation: 0.0,
            rotation_speed: 0.0,
            radius,
            alive: true,
        }
    }

    #[test]
    fn test_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..500 {
            let p = Projectile::spawn(id, Vec2::new(100.0, 900.0), ProjectileKind::Hazard, &mut rng);
            assert!((-30.0..=30.0).contains(&p.vel.x));
            assert!((-1000.0..=-700.0).contains(&p.vel.y));
            assert!((26.0..=42.0).contains(&p.radius));
            assert!((-0.06..=0.06).contains(&p.rotation_speed));
            assert!(p.alive);
        }
    }

    #[test]
    fn test_update_spins_per_tick() {
        let mut p = still(Vec2::new(200.0, 200.0), 30.0);
        p.rotation_speed = 0.05;
        p.update(0.016, Viewport::default());
        p.update(0.001, Viewport::default());
        assert!((p.rotation - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_dead_projectile_does_not_move() {
        let mut p = still(Vec2::new(200.0, 200.0), 30.0);
        p.alive = false;
        assert!(!p.update(0.016, Viewport::default()));
        assert_eq!(p.pos, Vec2::new(200.0, 200.0));
    }

    #[test]
    fn test_leaves_bottom_exactly_once() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut p = still(Vec2::new(400.0, 600.0 + 140.0 + 30.0 - 1.0), 30.0);
        p.vel = Vec2::new(0.0, 200.0);
        assert!(p.update(0.016, viewport));
        assert!(!p.alive);
        assert!(!p.update(0.016, viewport));
    }

    #[test]
    fn test_side_bounds_follow_viewport() {
        let mut p = still(Vec2::new(950.0, 300.0), 30.0);
        assert!(!p.is_out_of_bounds(Viewport::new(800.0, 600.0)));
        assert!(p.is_out_of_bounds(Viewport::new(700.0, 600.0)));
        p.pos.x = -201.0;
        assert!(p.is_out_of_bounds(Viewport::new(800.0, 600.0)));
    }

    #[test]
    fn test_spawn_depth_is_not_culled() {
        // Fresh spawns sit below the view but inside the cull margin
        let viewport = Viewport::new(800.0, 600.0);
        let p = still(Vec2::new(400.0, 600.0 + SPAWN_DEPTH), RADIUS_RANGE.0);
        assert!(!p.is_out_of_bounds(viewport));
    }

    #[test]
    fn test_segment_through_center_hits() {
        let p = still(Vec2::new(100.0, 100.0), 30.0);
        assert!(p.intersects_segment(Vec2::new(0.0, 100.0), Vec2::new(200.0, 100.0)));
        assert!(!p.intersects_segment(Vec2::new(0.0, 200.0), Vec2::new(200.0, 200.0)));
    }

    proptest! {
        #[test]
        fn prop_matches_closed_form_motion(
            vx in -30.0f32..30.0,
            vy in -1000.0f32..-700.0,
            steps in 1usize..240,
            dt in 0.001f32..0.032,
        ) {
            let p0 = Vec2::new(400.0, 700.0);
            let v0 = Vec2::new(vx, vy);
            let mut p = still(p0, 30.0);
            p.vel = v0;
            // Huge viewport so the projectile is never culled mid-flight
            let viewport = Viewport::new(1.0e6, 1.0e6);
            for _ in 0..steps {
                p.update(dt, viewport);
            }
            let t = steps as f32 * dt;
            let expected = p0 + v0 * t + 0.5 * Vec2::new(0.0, GRAVITY) * t * t;
            let tolerance = 1e-3 * (1.0 + expected.abs().max_element());
            prop_assert!((p.pos - expected).abs().max_element() <= tolerance,
                "pos {:?} expected {:?}", p.pos, expected);
            prop_assert!((p.vel.y - (vy + GRAVITY * t)).abs() <= 5e-2);
        }
    }
}
