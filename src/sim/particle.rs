//! Cosmetic particles
//!
//! Particles have no physics consequences: they never collide and never wrap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::Randomness;
use crate::render::Tint;
use crate::rotate_deg;
use crate::settings::ParticleSettings;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks remaining
    pub lifetime: i32,
    /// Per-tick velocity multiplier
    pub damping: f32,
    pub tint: Tint,
}

impl Particle {
    pub fn update(&mut self) {
        self.lifetime -= 1;
        self.vel *= self.damping;
        self.pos += self.vel;
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0
    }
}

/// Push particles without exceeding `max`
pub fn emit(particles: &mut Vec<Particle>, max: usize, particle: Particle) {
    if particles.len() < max {
        particles.push(particle);
    }
}

/// Radial explosion at `pos`
pub fn burst(
    particles: &mut Vec<Particle>,
    max: usize,
    pos: Vec2,
    tint: Tint,
    settings: &ParticleSettings,
    rng: &mut dyn Randomness,
) {
    for _ in 0..settings.burst_count {
        let speed = rng.uniform_f32(settings.speed_min, settings.speed_max);
        let particle = Particle {
            pos,
            vel: rng.unit_vector() * speed,
            lifetime: rng.uniform_int(settings.lifetime_min, settings.lifetime_max + 1),
            damping: settings.damping,
            tint,
        };
        emit(particles, max, particle);
    }
}

/// Short-lived exhaust puff behind `pos`, jittered up to 30 degrees off `direction`
pub fn exhaust(
    particles: &mut Vec<Particle>,
    max: usize,
    pos: Vec2,
    direction: Vec2,
    rng: &mut dyn Randomness,
) {
    let offset = rotate_deg(direction, rng.uniform_f32(-30.0, 30.0));
    let particle = Particle {
        pos: pos + offset,
        vel: Vec2::ZERO,
        lifetime: rng.uniform_int(3, 11),
        damping: 1.0,
        tint: Tint::Exhaust,
    };
    emit(particles, max, particle);
}
