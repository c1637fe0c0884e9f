//! Cosmetic cut bursts and bomb flashes
//!
//! Nothing here feeds back into gameplay. Effects draw from their own RNG
//! stream so toggling particles never changes what spawns.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::rand_range;

/// Particles per cut burst
pub const BURST_PARTICLES: usize = 10;
/// Burst particle lifetime (seconds)
pub const PARTICLE_LIFETIME: f32 = 0.8;
/// Bomb flash radius (pixels), starting alpha and lifetime (seconds)
pub const FLASH_RADIUS: f32 = 140.0;
pub const FLASH_ALPHA: f32 = 0.28;
pub const FLASH_LIFETIME: f32 = 0.36;

/// A spark flung from a cut
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    /// 1 at spawn, 0 when gone
    pub life: f32,
}

/// Expanding fade where a bomb went off
#[derive(Debug, Clone)]
pub struct Flash {
    pub pos: Vec2,
    pub color: u32,
    pub radius: f32,
    pub life: f32,
}

impl Flash {
    pub fn alpha(&self) -> f32 {
        FLASH_ALPHA * self.life
    }
}

/// Live effects plus their private RNG
#[derive(Debug, Clone)]
pub struct Effects {
    pub particles: Vec<Particle>,
    pub flashes: Vec<Flash>,
    /// Particle cap (0 disables bursts)
    pub max_particles: usize,
    rng: Pcg32,
}

impl Effects {
    pub fn new(seed: u64, max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            flashes: Vec::new(),
            max_particles,
            rng: Pcg32::seed_from_u64(seed ^ 0x9e37_79b9_7f4a_7c15),
        }
    }

    /// Spray sparks in `color` from `pos`
    pub fn burst(&mut self, pos: Vec2, color: u32) {
        for _ in 0..BURST_PARTICLES {
            if self.particles.len() >= self.max_particles {
                break;
            }
            let vel = Vec2::new(
                rand_range(&mut self.rng, -220.0, 220.0),
                rand_range(&mut self.rng, -260.0, 20.0),
            );
            self.particles.push(Particle {
                pos,
                vel,
                color,
                life: 1.0,
            });
        }
    }

    /// Bomb detonation flash
    pub fn flash(&mut self, pos: Vec2, color: u32) {
        self.flashes.push(Flash {
            pos,
            color,
            radius: FLASH_RADIUS,
            life: 1.0,
        });
    }

    /// Drift particles and fade everything
    pub fn update(&mut self, dt: f32) {
        for p in &mut self.particles {
            // Sparks travel ~0.9 of their velocity over their lifetime
            p.pos += p.vel * (0.9 / PARTICLE_LIFETIME) * dt;
            p.life -= dt / PARTICLE_LIFETIME;
        }
        self.particles.retain(|p| p.life > 0.0);

        for f in &mut self.flashes {
            f.life -= dt / FLASH_LIFETIME;
        }
        self.flashes.retain(|f| f.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.flashes.clear();
    }
}
