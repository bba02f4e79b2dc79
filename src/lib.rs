//! Toroids - screen-wrapping arcade physics core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (colliders, actors, world tick)
//! - `render`: Narrow render-sink boundary (no drawing happens here)
//! - `settings`: Data-driven tuning loaded from JSON
//! - `error`: Construction and configuration errors

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{ColliderError, ConfigError};
pub use settings::{QualityPreset, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena size (width, height) in pixels
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Velocities at or below this magnitude snap to zero
    pub const SNAP_THRESHOLD: f32 = 1e-3;

    /// Collision layers. Actors sharing a layer never collide.
    pub const PLAYER_LAYER: u32 = 0;
    pub const ASTEROID_LAYER: u32 = 1;
    pub const SAUCER_LAYER: u32 = 2;

    /// Largest asteroid size class
    pub const MAX_ASTEROID_SIZE: u8 = 3;
}

/// Rotate a vector by an angle in degrees (actor rotation unit)
#[inline]
pub fn rotate_deg(v: Vec2, degrees: f32) -> Vec2 {
    Vec2::from_angle(degrees.to_radians()).rotate(v)
}

/// Wrap a position into `[0, resolution.x) x [0, resolution.y)`
#[inline]
pub fn wrap_position(pos: Vec2, resolution: Vec2) -> Vec2 {
    Vec2::new(
        sim::wrap::wrap_axis(pos.x, resolution.x),
        sim::wrap::wrap_axis(pos.y, resolution.y),
    )
}

/// Shortest displacement from `from` to `to` on the torus
pub fn toroidal_displacement(from: Vec2, to: Vec2, resolution: Vec2) -> Vec2 {
    let mut d = to - from;

    if d.x > resolution.x / 2.0 {
        d.x -= resolution.x;
    } else if d.x < -resolution.x / 2.0 {
        d.x += resolution.x;
    }

    if d.y > resolution.y / 2.0 {
        d.y -= resolution.y;
    } else if d.y < -resolution.y / 2.0 {
        d.y += resolution.y;
    }

    d
}
