//! Simulation settings and tuning
//!
//! Loaded from JSON; every field has a default so partial files work.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::error::ConfigError;

/// Quality preset levels (cosmetic particle budget only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum QualityPreset {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            QualityPreset::Low => "Low",
            QualityPreset::Medium => "Medium",
            QualityPreset::High => "High",
        }
    }

    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(QualityPreset::Low),
            "medium" | "med" => Some(QualityPreset::Medium),
            "high" => Some(QualityPreset::High),
            _ => None,
        }
    }

    /// Maximum live particles for this preset
    pub fn max_particles(&self) -> usize {
        match self {
            QualityPreset::Low => 64,
            QualityPreset::Medium => 256,
            QualityPreset::High => 1024,
        }
    }
}

/// Player ship handling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipSettings {
    pub starting_lives: u32,
    /// Forward acceleration per millisecond of frame time
    pub thrust: f32,
    /// Angular acceleration (degrees/tick) per millisecond of frame time
    pub rotation_accel: f32,
    /// Per-tick velocity multiplier
    pub linear_damping: f32,
    /// Per-tick angular velocity multiplier
    pub angular_damping: f32,
    /// Ticks of collision immunity after (re)spawning
    pub spawn_invincibility_ticks: u32,
    /// Cap on live player projectiles
    pub max_projectiles: usize,
}

impl Default for ShipSettings {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            thrust: 0.01,
            rotation_accel: 0.005,
            linear_damping: 0.985,
            angular_damping: 0.8,
            spawn_invincibility_ticks: 120,
            max_projectiles: 4,
        }
    }
}

/// Bullets fired by the ship and saucers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileSettings {
    pub speed: f32,
    pub lifetime_ticks: i32,
    pub radius: f32,
}

impl Default for ProjectileSettings {
    fn default() -> Self {
        Self {
            speed: 10.0,
            lifetime_ticks: 45,
            radius: 5.0,
        }
    }
}

/// Asteroid waves
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidSettings {
    /// Asteroids in the first wave
    pub wave_base: u32,
    /// Extra asteroids per level
    pub wave_growth: u32,
    /// Upper bound on a wave
    pub wave_max: u32,
    /// Speed = `speed_factor * (4 - size)`
    pub speed_factor: f32,
    /// Spin drawn from `[-max_spin, max_spin)` degrees/tick
    pub max_spin: f32,
}

impl Default for AsteroidSettings {
    fn default() -> Self {
        Self {
            wave_base: 4,
            wave_growth: 1,
            wave_max: 11,
            speed_factor: 0.5,
            max_spin: 0.75,
        }
    }
}

/// Saucer spawning and behaviour
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaucerSettings {
    pub spawn_min_ticks: i32,
    pub spawn_max_ticks: i32,
    /// Score at which the small saucer chance would reach 1.0
    pub small_saucer_score_scale: f32,
    pub max_small_saucer_chance: f32,
    pub acceleration: f32,
    pub damping: f32,
    pub recoil: f32,
    /// Saucers die this far past the left/right edge
    pub offscreen_margin: f32,
    pub sensor_radius: f32,
    pub large_aim_range: f32,
    pub small_aim_range: f32,
    pub first_shot_min_ticks: i32,
    pub first_shot_max_ticks: i32,
    pub large_cooldown_min_ticks: i32,
    pub large_cooldown_max_ticks: i32,
    pub small_cooldown_min_ticks: i32,
    pub small_cooldown_max_ticks: i32,
}

impl Default for SaucerSettings {
    fn default() -> Self {
        Self {
            spawn_min_ticks: 600,
            spawn_max_ticks: 1500,
            small_saucer_score_scale: 40_000.0,
            max_small_saucer_chance: 0.8,
            acceleration: 0.02,
            damping: 0.9,
            recoil: 1.25,
            offscreen_margin: 50.0,
            sensor_radius: 200.0,
            large_aim_range: 22.5,
            small_aim_range: 2.5,
            first_shot_min_ticks: 15,
            first_shot_max_ticks: 60,
            large_cooldown_min_ticks: 60,
            large_cooldown_max_ticks: 180,
            small_cooldown_min_ticks: 30,
            small_cooldown_max_ticks: 120,
        }
    }
}

/// Cosmetic particle bursts
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticleSettings {
    pub burst_count: u32,
    pub lifetime_min: i32,
    pub lifetime_max: i32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub damping: f32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            burst_count: 12,
            lifetime_min: 15,
            lifetime_max: 40,
            speed_min: 0.5,
            speed_max: 3.0,
            damping: 0.95,
        }
    }
}

/// Simulation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Width/height of the toroidal play area
    pub resolution: Vec2,
    /// Particle budget preset
    pub quality: QualityPreset,
    pub ship: ShipSettings,
    pub projectile: ProjectileSettings,
    pub asteroid: AsteroidSettings,
    pub saucer: SaucerSettings,
    pub particles: ParticleSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
            quality: QualityPreset::Medium,
            ship: ShipSettings::default(),
            projectile: ProjectileSettings::default(),
            asteroid: AsteroidSettings::default(),
            saucer: SaucerSettings::default(),
            particles: ParticleSettings::default(),
        }
    }
}

impl Settings {
    /// Create settings from a quality preset
    pub fn from_preset(preset: QualityPreset) -> Self {
        Self {
            quality: preset,
            ..Self::default()
        }
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Effective particle cap
    pub fn max_particles(&self) -> usize {
        self.quality.max_particles()
    }

    /// Reject settings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.resolution.x > 0.0 && self.resolution.y > 0.0) || !self.resolution.is_finite() {
            return Err(ConfigError::Invalid(format!(
                "resolution must be positive, got {:?}",
                self.resolution
            )));
        }
        if self.ship.starting_lives == 0 {
            return Err(ConfigError::Invalid("ship.starting_lives must be at least 1".into()));
        }
        if self.projectile.radius <= 0.0 {
            return Err(ConfigError::Invalid("projectile.radius must be positive".into()));
        }
        if self.saucer.spawn_min_ticks <= 0 || self.saucer.spawn_max_ticks < self.saucer.spawn_min_ticks {
            return Err(ConfigError::Invalid(
                "saucer spawn window must be positive and ordered".into(),
            ));
        }
        if self.particles.lifetime_max < self.particles.lifetime_min {
            return Err(ConfigError::Invalid("particle lifetime range is inverted".into()));
        }
        Ok(())
    }
}
