//! Render-sink boundary
//!
//! The simulation never draws. [`draw_world`] walks the world and emits
//! filled shapes to a [`RenderSink`], including every wrap ghost, so a
//! front end only has to rasterize what it is given.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::rotate_deg;
use crate::sim::actor::{Actor, ActorKind};
use crate::sim::collider::Collider;
use crate::sim::state::World;

/// Ghost ships blink at this many ticks per phase while invulnerable
const BLINK_TICKS: u32 = 8;

/// Palette entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tint {
    Player,
    Asteroid,
    Saucer,
    Projectile,
    /// Death bursts
    Debris,
    /// Thruster puffs
    Exhaust,
}

impl Tint {
    /// Linear RGBA
    pub fn rgba(self) -> [f32; 4] {
        match self {
            Tint::Player => [0.9, 0.9, 1.0, 1.0],
            Tint::Asteroid => [0.6, 0.55, 0.5, 1.0],
            Tint::Saucer => [1.0, 0.6, 0.1, 1.0],
            Tint::Projectile => [1.0, 1.0, 1.0, 1.0],
            Tint::Debris => [0.8, 0.8, 0.8, 0.8],
            Tint::Exhaust => [1.0, 0.2, 0.1, 0.9],
        }
    }

    pub fn for_actor(actor: &Actor) -> Self {
        match actor.kind {
            ActorKind::Player(_) => Tint::Player,
            ActorKind::Projectile(_) => Tint::Projectile,
            ActorKind::Asteroid(_) => Tint::Asteroid,
            ActorKind::Saucer(_) => Tint::Saucer,
        }
    }
}

/// Receiver of world-space filled shapes
pub trait RenderSink {
    fn fill_polygon(&mut self, points: &[Vec2], tint: Tint);
    fn fill_circle(&mut self, center: Vec2, radius: f32, tint: Tint);
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Polygon { points: Vec<Vec2>, tint: Tint },
    Circle { center: Vec2, radius: f32, tint: Tint },
}

/// Sink that records draw calls, for headless runs and tests
#[derive(Debug, Default)]
pub struct CommandList {
    pub commands: Vec<DrawCommand>,
}

impl RenderSink for CommandList {
    fn fill_polygon(&mut self, points: &[Vec2], tint: Tint) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            tint,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, tint: Tint) {
        self.commands.push(DrawCommand::Circle { center, radius, tint });
    }
}

/// Emit one actor at each of its draw positions
pub fn draw_actor(actor: &Actor, resolution: Vec2, sink: &mut dyn RenderSink) {
    let tint = Tint::for_actor(actor);
    let outline: Vec<Vec2> = actor
        .points()
        .iter()
        .map(|p| rotate_deg(*p, actor.rotation))
        .collect();
    let circles: Vec<(Vec2, f32)> = actor
        .colliders()
        .iter()
        .filter_map(|c| match c {
            Collider::Circle { center, radius } => Some((rotate_deg(*center, actor.rotation), *radius)),
            Collider::Polygon { .. } => None,
        })
        .collect();

    for origin in actor.draw_positions(resolution) {
        if !outline.is_empty() {
            let placed: Vec<Vec2> = outline.iter().map(|p| *p + origin).collect();
            sink.fill_polygon(&placed, tint);
        }
        for (center, radius) in &circles {
            sink.fill_circle(*center + origin, *radius, tint);
        }
    }
}

/// Emit the whole world: actors (with ghosts), then particles
pub fn draw_world(world: &World, sink: &mut dyn RenderSink) {
    for actor in &world.actors {
        if actor.is_dead {
            continue;
        }
        let blinking = actor
            .ship()
            .is_some_and(|s| s.invincibility > 0 && (s.invincibility / BLINK_TICKS) % 2 == 1);
        if blinking {
            continue;
        }
        draw_actor(actor, world.resolution, sink);
    }

    for particle in &world.particles {
        sink.fill_circle(particle.pos, 1.5, particle.tint);
    }
}
