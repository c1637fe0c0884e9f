//! Projectile emission: kind selection, placement and cadence

use glam::Vec2;
use rand::Rng;

use super::projectile::{Fruit, ProjectileKind, Viewport};
use crate::consts::{SPAWN_DEPTH, SPAWN_INSET_X};
use crate::rand_range;
use crate::tuning::Tuning;

/// Weighted draw: reward fruit (uniform variant), then rotten, else bomb
pub fn choose_kind<R: Rng>(rng: &mut R, tuning: &Tuning) -> ProjectileKind {
    let roll: f32 = rng.random();
    if roll < tuning.reward_chance {
        let fruit = Fruit::ALL[rng.random_range(0..Fruit::ALL.len())];
        ProjectileKind::Reward(fruit)
    } else if roll < tuning.reward_chance + tuning.penalty_chance {
        ProjectileKind::Penalty
    } else {
        ProjectileKind::Hazard
    }
}

/// Launch point: random x inset from the sides, fixed depth below the view
pub fn spawn_position<R: Rng>(rng: &mut R, viewport: Viewport) -> Vec2 {
    let x = if viewport.width > SPAWN_INSET_X * 2.0 {
        rand_range(rng, SPAWN_INSET_X, viewport.width - SPAWN_INSET_X)
    } else {
        viewport.width * 0.5
    };
    Vec2::new(x, viewport.height + SPAWN_DEPTH)
}

/// Jittered delay until the next spawn (ms)
pub fn next_delay_ms<R: Rng>(rng: &mut R, tuning: &Tuning) -> f64 {
    if tuning.spawn_max_ms <= tuning.spawn_min_ms {
        return tuning.spawn_min_ms;
    }
    rng.random_range(tuning.spawn_min_ms..=tuning.spawn_max_ms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_kind_distribution() {
        let mut rng = Pcg32::seed_from_u64(2024);
        let tuning = Tuning::default();
        let n = 20_000;
        let (mut reward, mut penalty, mut hazard) = (0, 0, 0);
        let mut fruits = [0usize; 3];
        for _ in 0..n {
            match choose_kind(&mut rng, &tuning) {
                ProjectileKind::Reward(f) => {
                    reward += 1;
                    fruits[Fruit::ALL.iter().position(|x| *x == f).unwrap_or(0)] += 1;
                }
                ProjectileKind::Penalty => penalty += 1,
                ProjectileKind::Hazard => hazard += 1,
            }
        }
        let frac = |c: i32| c as f32 / n as f32;
        assert!((frac(reward) - 0.70).abs() < 0.02);
        assert!((frac(penalty) - 0.15).abs() < 0.02);
        assert!((frac(hazard) - 0.15).abs() < 0.02);
        // Fruit variants are roughly uniform
        for count in fruits {
            assert!((count as f32 / reward as f32 - 1.0 / 3.0).abs() < 0.03);
        }
    }

    #[test]
    fn test_no_hazards_when_disabled() {
        let mut rng = Pcg32::seed_from_u64(5);
        let tuning = Tuning {
            reward_chance: 0.5,
            penalty_chance: 0.5,
            ..Default::default()
        };
        for _ in 0..1000 {
            assert!(!choose_kind(&mut rng, &tuning).is_hazard());
        }
    }

    #[test]
    fn test_spawn_position_bounds() {
        let mut rng = Pcg32::seed_from_u64(9);
        let viewport = Viewport::new(1024.0, 768.0);
        for _ in 0..1000 {
            let pos = spawn_position(&mut rng, viewport);
            assert!((80.0..=944.0).contains(&pos.x));
            assert_eq!(pos.y, 768.0 + 160.0);
        }
    }

    #[test]
    fn test_spawn_position_narrow_viewport() {
        let mut rng = Pcg32::seed_from_u64(9);
        let pos = spawn_position(&mut rng, Viewport::new(120.0, 300.0));
        assert_eq!(pos, Vec2::new(60.0, 460.0));
    }

    #[test]
    fn test_delay_bounds() {
        let mut rng = Pcg32::seed_from_u64(11);
        let tuning = Tuning::default();
        for _ in 0..1000 {
            let d = next_delay_ms(&mut rng, &tuning);
            assert!((600.0..=1200.0).contains(&d));
        }
    }
}
