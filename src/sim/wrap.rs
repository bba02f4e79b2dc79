//! Toroidal play-field helpers
//!
//! The arena's opposite edges are joined. Rather than simulate infinite
//! space, anything whose radius crosses an edge is also tested (and drawn)
//! at a "ghost" copy shifted by one full arena size.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Which axes an actor wraps on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapAxes {
    pub x: bool,
    pub y: bool,
}

impl WrapAxes {
    pub const BOTH: Self = Self { x: true, y: true };
    /// Saucers fly off the side edges but wrap top to bottom
    pub const VERTICAL: Self = Self { x: false, y: true };
}

/// Wrap a coordinate into `[0, extent)`
#[inline]
pub fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = ((value % extent) + extent) % extent;
    // Tiny negatives can round up to exactly `extent`
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Offsets of every ghost copy needed for an actor at `position`.
///
/// At most one offset per edge the radius touches, so up to four in total
/// (both axes can apply at a corner). Axis-aligned only.
pub fn ghost_offsets(position: Vec2, radius: f32, resolution: Vec2, axes: WrapAxes) -> Vec<Vec2> {
    let mut offsets = Vec::new();
    if axes.x {
        if position.x - radius <= 0.0 {
            offsets.push(Vec2::new(resolution.x, 0.0));
        }
        if position.x + radius >= resolution.x {
            offsets.push(Vec2::new(-resolution.x, 0.0));
        }
    }
    if axes.y {
        if position.y - radius <= 0.0 {
            offsets.push(Vec2::new(0.0, resolution.y));
        }
        if position.y + radius >= resolution.y {
            offsets.push(Vec2::new(0.0, -resolution.y));
        }
    }
    offsets
}

/// Shifts the broad phase tries: in place, one arena shift per direction,
/// then the four diagonals.
///
/// The diagonals cover pairs near opposite corners, whose edge ghosts can
/// overlap each other even though neither centre is near the other's
/// axis-aligned copies.
#[inline]
pub fn broad_phase_offsets(resolution: Vec2) -> [Vec2; 9] {
    let (w, h) = (resolution.x, resolution.y);
    [
        Vec2::ZERO,
        Vec2::new(w, 0.0),
        Vec2::new(-w, 0.0),
        Vec2::new(0.0, h),
        Vec2::new(0.0, -h),
        Vec2::new(w, h),
        Vec2::new(w, -h),
        Vec2::new(-w, h),
        Vec2::new(-w, -h),
    ]
}

/// Cheap radius-sum check across every broad-phase shift
pub fn within_reach(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32, resolution: Vec2) -> bool {
    let reach = a_radius + b_radius;
    broad_phase_offsets(resolution)
        .iter()
        .any(|offset| a_pos.distance(b_pos + *offset) <= reach)
}
