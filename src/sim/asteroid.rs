//! Asteroids: three hand-drawn shapes, scaled by size
//!
//! Each outline is concave, so its collision shape is a small set of convex
//! pieces that together cover it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, TickContext};
use super::collider::Collider;
use super::random::Randomness;
use crate::consts::{ASTEROID_LAYER, MAX_ASTEROID_SIZE, PLAYER_LAYER};
use crate::settings::AsteroidSettings;

type Points = &'static [(f32, f32)];

/// Number of distinct asteroid shapes
pub const SHAPE_COUNT: u8 = 3;

static OUTLINES: [Points; SHAPE_COUNT as usize] = [
    &[
        (0.0, -10.0),
        (10.0, -20.0),
        (20.0, -10.0),
        (15.0, 0.0),
        (20.0, 10.0),
        (5.0, 20.0),
        (-10.0, 20.0),
        (-20.0, 10.0),
        (-20.0, -10.0),
        (-10.0, -20.0),
    ],
    &[
        (0.0, -15.0),
        (10.0, -20.0),
        (20.0, -10.0),
        (10.0, -5.0),
        (20.0, 5.0),
        (10.0, 20.0),
        (-5.0, 15.0),
        (-10.0, 20.0),
        (-20.0, 10.0),
        (-15.0, 0.0),
        (-20.0, -10.0),
        (-10.0, -20.0),
    ],
    &[
        (5.0, -20.0),
        (20.0, -10.0),
        (20.0, -5.0),
        (5.0, 0.0),
        (20.0, 10.0),
        (10.0, 20.0),
        (5.0, 15.0),
        (-10.0, 20.0),
        (-20.0, 5.0),
        (-20.0, -10.0),
        (-5.0, -10.0),
        (-10.0, -20.0),
    ],
];

/// Convex pieces per outline
static PIECES: [&[Points]; SHAPE_COUNT as usize] = [
    &[
        &[(0.0, -10.0), (10.0, -20.0), (20.0, -10.0), (15.0, 0.0)],
        &[
            (0.0, -10.0),
            (15.0, 0.0),
            (20.0, 10.0),
            (5.0, 20.0),
            (-10.0, 20.0),
            (-20.0, 10.0),
        ],
        &[(0.0, -10.0), (-20.0, 10.0), (-20.0, -10.0), (-10.0, -20.0)],
    ],
    &[
        &[(0.0, -15.0), (10.0, -20.0), (20.0, -10.0), (10.0, -5.0)],
        &[
            (0.0, -15.0),
            (20.0, 5.0),
            (10.0, 20.0),
            (-5.0, 15.0),
            (-15.0, 0.0),
            (-20.0, -10.0),
            (-10.0, -20.0),
        ],
        &[(-5.0, 15.0), (-10.0, 20.0), (-20.0, 10.0), (-15.0, 0.0)],
    ],
    &[
        &[
            (5.0, -20.0),
            (20.0, -10.0),
            (20.0, -5.0),
            (5.0, 0.0),
            (-5.0, -10.0),
            (-10.0, -20.0),
        ],
        &[(5.0, 0.0), (20.0, 10.0), (10.0, 20.0), (5.0, 15.0)],
        &[
            (5.0, 0.0),
            (5.0, 15.0),
            (-10.0, 20.0),
            (-20.0, 5.0),
            (-20.0, -10.0),
            (-5.0, -10.0),
        ],
    ],
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asteroid {
    /// 1 (smallest) to 3 (largest)
    pub size: u8,
    /// Index into the shape tables
    pub shape: u8,
}

fn scaled(points: &[(f32, f32)], size: f32) -> Vec<Vec2> {
    points.iter().map(|&(x, y)| Vec2::new(x, y) * size).collect()
}

/// Points for destroying an asteroid of `size`
pub fn score_for_size(size: u8) -> u32 {
    match size {
        1 => 100,
        2 => 50,
        3 => 20,
        _ => 0,
    }
}

/// Asteroid at rest with a fixed shape. Out-of-range sizes and shapes are clamped.
pub fn with_shape(position: Vec2, size: u8, shape: u8) -> Actor {
    let size = size.clamp(1, MAX_ASTEROID_SIZE);
    let shape = shape.min(SHAPE_COUNT - 1);
    let scale = f32::from(size);
    let idx = usize::from(shape);

    let colliders = PIECES[idx]
        .iter()
        .map(|piece| Collider::polygon(scaled(piece, scale)))
        .collect();

    Actor::new(
        ActorKind::Asteroid(Asteroid { size, shape }),
        position,
        scaled(OUTLINES[idx], scale),
        colliders,
        ASTEROID_LAYER,
    )
}

/// Asteroid with a random shape, heading and spin; smaller ones move faster
pub fn spawn(
    position: Vec2,
    size: u8,
    rng: &mut dyn Randomness,
    settings: &AsteroidSettings,
) -> Actor {
    let shape = rng.uniform_int(0, i32::from(SHAPE_COUNT)) as u8;
    let actor = with_shape(position, size, shape);
    let size = actor.asteroid_size().unwrap_or(size);
    let speed = settings.speed_factor * (f32::from(MAX_ASTEROID_SIZE + 1) - f32::from(size));
    let velocity = rng.unit_vector() * speed;
    let spin = rng.uniform_f32(-settings.max_spin, settings.max_spin);
    actor.with_velocity(velocity).with_spin(spin)
}

/// Award points if the player did it, then split in two
pub fn on_die(actor: &Actor, ctx: &mut TickContext) {
    let Some(size) = actor.asteroid_size() else {
        return;
    };

    if actor.hit_layers.contains(&PLAYER_LAYER) {
        ctx.scoreboard.increment_score(score_for_size(size));
    }

    if size > 1 {
        for _ in 0..2 {
            let child = spawn(actor.position, size - 1, ctx.rng, &ctx.settings.asteroid);
            ctx.spawn_queue.push(child);
        }
        log::debug!(
            "Asteroid split at ({:.0}, {:.0}) into size {}",
            actor.position.x,
            actor.position.y,
            size - 1
        );
    }
}
