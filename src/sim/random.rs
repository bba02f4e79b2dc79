//! Injected randomness
//!
//! The simulation never owns an RNG; every tick receives a [`Randomness`]
//! source so runs are reproducible from a seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of uniform and angle-distributed randomness
pub trait Randomness {
    /// Uniform float in `[min, max)`. Returns `min` for an empty range.
    fn uniform_f32(&mut self, min: f32, max: f32) -> f32;

    /// Uniform integer in `[min, max)`. Returns `min` for an empty range.
    fn uniform_int(&mut self, min: i32, max: i32) -> i32;

    /// Unit vector with a uniformly distributed angle
    fn unit_vector(&mut self) -> Vec2 {
        Vec2::from_angle(self.uniform_f32(0.0, std::f32::consts::TAU))
    }

    /// True with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.uniform_f32(0.0, 1.0) < p
    }
}

/// Seeded PCG generator
#[derive(Debug, Clone)]
pub struct SimRng {
    seed: u64,
    rng: Pcg32,
}

impl SimRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl Randomness for SimRng {
    fn uniform_f32(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    fn uniform_int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }
}
