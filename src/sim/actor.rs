//! Actors: positioned, rotating, moving entities built from colliders
//!
//! Every entity in the arena is one [`Actor`]. Variant behaviour (ship input,
//! saucer AI, asteroid splitting, projectile ageing) hangs off the
//! [`ActorKind`] tag and is dispatched from [`Actor::update`] and
//! [`Actor::die`]; geometry, integration and wrapping are shared.
//!
//! Lifecycle: spawned -> active -> hit (collision pass) -> dead (next
//! integration) -> `die` -> removed, or respawned in place for the player.

use std::collections::BTreeSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::asteroid::{self, Asteroid};
use super::collider::{Collider, any_overlap, get_radius};
use super::particle::{self, Particle};
use super::projectile::{self, Owner, Projectile};
use super::random::Randomness;
use super::saucer::{self, Saucer};
use super::ship::{self, Ship};
use super::state::ScoreSink;
use super::tick::TickInput;
use super::wrap::{WrapAxes, ghost_offsets, within_reach, wrap_axis};
use crate::consts::SNAP_THRESHOLD;
use crate::render::Tint;
use crate::settings::Settings;

/// Variant tag plus per-variant state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActorKind {
    Player(Ship),
    Projectile(Projectile),
    Asteroid(Asteroid),
    Saucer(Saucer),
}

/// Everything an actor may touch besides itself during a tick
pub struct TickContext<'a> {
    pub settings: &'a Settings,
    pub resolution: Vec2,
    pub input: &'a TickInput,
    /// Live player position, if any (saucers aim at it)
    pub player_position: Option<Vec2>,
    /// Live player projectiles, including ones queued this tick
    pub player_projectiles: usize,
    pub max_particles: usize,
    pub rng: &'a mut dyn Randomness,
    pub spawn_queue: &'a mut Vec<Actor>,
    pub particles: &'a mut Vec<Particle>,
    pub scoreboard: &'a mut dyn ScoreSink,
}

/// A physics entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub kind: ActorKind,
    pub position: Vec2,
    /// Degrees
    pub rotation: f32,
    pub velocity: Vec2,
    /// Degrees per tick
    pub angular_velocity: f32,
    /// Local-space outline for rendering
    points: Vec<Vec2>,
    /// Local-space collision shape
    colliders: Vec<Collider>,
    /// Broad-phase radius, fixed at construction
    collision_radius: f32,
    pub collision_layer: u32,
    /// Set by the collision pass
    pub hit: bool,
    /// Layers of everything that hit this actor
    pub hit_layers: BTreeSet<u32>,
    /// Set from `hit` during integration
    pub is_dead: bool,
}

impl Actor {
    /// Create an actor at rest.
    ///
    /// The broad-phase radius is the farthest polygon vertex
    /// ([`get_radius`]) widened to cover any circle colliders, so circle-only
    /// actors such as projectiles still pass the radius test.
    pub fn new(
        kind: ActorKind,
        position: Vec2,
        points: Vec<Vec2>,
        colliders: Vec<Collider>,
        collision_layer: u32,
    ) -> Self {
        let collision_radius = colliders
            .iter()
            .filter(|c| c.is_circle())
            .map(Collider::reach)
            .fold(get_radius(&colliders), f32::max);
        Self {
            kind,
            position,
            rotation: 0.0,
            velocity: Vec2::ZERO,
            angular_velocity: 0.0,
            points,
            colliders,
            collision_radius,
            collision_layer,
            hit: false,
            hit_layers: BTreeSet::new(),
            is_dead: false,
        }
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_spin(mut self, angular_velocity: f32) -> Self {
        self.angular_velocity = angular_velocity;
        self
    }

    pub fn collision_radius(&self) -> f32 {
        self.collision_radius
    }

    /// Local-space colliders
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Local-space render outline
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn is_player(&self) -> bool {
        matches!(self.kind, ActorKind::Player(_))
    }

    pub fn ship(&self) -> Option<&Ship> {
        match &self.kind {
            ActorKind::Player(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        match &mut self.kind {
            ActorKind::Player(ship) => Some(ship),
            _ => None,
        }
    }

    pub fn asteroid_size(&self) -> Option<u8> {
        match &self.kind {
            ActorKind::Asteroid(a) => Some(a.size),
            _ => None,
        }
    }

    pub fn projectile_owner(&self) -> Option<Owner> {
        match &self.kind {
            ActorKind::Projectile(p) => Some(p.owner),
            _ => None,
        }
    }

    pub fn wrap_axes(&self) -> WrapAxes {
        match self.kind {
            ActorKind::Saucer(_) => WrapAxes::VERTICAL,
            _ => WrapAxes::BOTH,
        }
    }

    /// Ghost offsets for the current position
    pub fn ghost_offsets(&self, resolution: Vec2) -> Vec<Vec2> {
        ghost_offsets(self.position, self.collision_radius, resolution, self.wrap_axes())
    }

    /// True position followed by every ghost position
    pub fn draw_positions(&self, resolution: Vec2) -> Vec<Vec2> {
        std::iter::once(self.position)
            .chain(self.ghost_offsets(resolution).into_iter().map(|o| self.position + o))
            .collect()
    }

    /// Colliders in world space, replicated for every wrap ghost
    pub fn world_colliders(&self, resolution: Vec2) -> Vec<Collider> {
        let placed: Vec<Collider> = self
            .colliders
            .iter()
            .map(|c| c.transformed(self.position, self.rotation))
            .collect();
        let ghosts: Vec<Collider> = self
            .ghost_offsets(resolution)
            .into_iter()
            .flat_map(|offset| placed.iter().map(move |c| c.translated(offset)))
            .collect();
        placed.into_iter().chain(ghosts).collect()
    }

    /// Spawn protection
    pub fn is_invulnerable(&self) -> bool {
        self.ship().is_some_and(|s| s.invincibility > 0)
    }

    /// Variant-specific exemption: player shots pass through the player
    pub fn ignores(&self, other: &Actor) -> bool {
        match &self.kind {
            ActorKind::Projectile(p) => p.owner == Owner::Player && other.is_player(),
            _ => false,
        }
    }

    /// Full pair test: exemptions, then broad phase, then SAT
    pub fn collides_with(&self, other: &Actor, resolution: Vec2) -> bool {
        if self.collision_layer == other.collision_layer {
            return false;
        }
        if self.is_invulnerable() || other.is_invulnerable() {
            return false;
        }
        if self.ignores(other) || other.ignores(self) {
            return false;
        }
        if !within_reach(
            self.position,
            self.collision_radius,
            other.position,
            other.collision_radius,
            resolution,
        ) {
            return false;
        }
        any_overlap(&self.world_colliders(resolution), &other.world_colliders(resolution))
    }

    /// Indices of every actor in `actors` this one collides with.
    ///
    /// `index` is this actor's own slot and is skipped. An empty result means
    /// no collision.
    pub fn check_collisions(&self, index: usize, actors: &[Actor], resolution: Vec2) -> Vec<usize> {
        actors
            .iter()
            .enumerate()
            .filter(|(j, other)| *j != index && self.collides_with(other, resolution))
            .map(|(j, _)| j)
            .collect()
    }

    pub fn register_hit(&mut self, layer: u32) {
        self.hit = true;
        self.hit_layers.insert(layer);
    }

    /// Shared per-tick integration.
    ///
    /// Snaps tiny velocities to zero, advances position and rotation, turns a
    /// hit from the collision pass into death, and wraps the position on the
    /// axes this actor wraps on.
    pub fn integrate(&mut self, resolution: Vec2) {
        if self.velocity.length() <= SNAP_THRESHOLD {
            self.velocity = Vec2::ZERO;
        }
        if self.angular_velocity.abs() <= SNAP_THRESHOLD {
            self.angular_velocity = 0.0;
        }

        self.position += self.velocity;
        self.rotation = (self.rotation + self.angular_velocity).rem_euclid(360.0);

        self.is_dead = self.hit;

        self.wrap(resolution);
    }

    /// Bring the position back into the arena on the axes this actor wraps on
    pub fn wrap(&mut self, resolution: Vec2) {
        let axes = self.wrap_axes();
        if axes.x {
            self.position.x = wrap_axis(self.position.x, resolution.x);
        }
        if axes.y {
            self.position.y = wrap_axis(self.position.y, resolution.y);
        }
    }

    /// Variant steering, integration, then variant bookkeeping
    pub fn update(&mut self, ctx: &mut TickContext) {
        match self.kind {
            ActorKind::Player(_) => ship::steer(self, ctx),
            ActorKind::Saucer(_) => saucer::steer(self, ctx),
            ActorKind::Projectile(_) | ActorKind::Asteroid(_) => {}
        }

        self.integrate(ctx.resolution);

        match self.kind {
            ActorKind::Projectile(_) => projectile::age(self),
            ActorKind::Saucer(_) => saucer::check_offscreen(self, ctx.resolution, ctx.settings),
            ActorKind::Player(_) | ActorKind::Asteroid(_) => {}
        }
    }

    /// Called once when the world reaps this actor.
    ///
    /// Returns the actor back if it stays in the world (the player respawns
    /// in place). Only actors destroyed by a hit leave debris.
    pub fn die(self, ctx: &mut TickContext) -> Option<Actor> {
        if self.hit {
            particle::burst(
                ctx.particles,
                ctx.max_particles,
                self.position,
                Tint::Debris,
                &ctx.settings.particles,
                ctx.rng,
            );
        }

        match self.kind {
            ActorKind::Player(_) => ship::on_die(self, ctx),
            ActorKind::Asteroid(_) => {
                asteroid::on_die(&self, ctx);
                None
            }
            ActorKind::Saucer(_) => {
                saucer::on_die(&self, ctx);
                None
            }
            ActorKind::Projectile(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{ASTEROID_LAYER, PLAYER_LAYER, SAUCER_LAYER};

    const RES: Vec2 = Vec2::new(800.0, 600.0);

    fn square_actor(position: Vec2, half: f32, layer: u32) -> Actor {
        let verts = vec![
            Vec2::new(-half, -half),
            Vec2::new(half, -half),
            Vec2::new(half, half),
            Vec2::new(-half, half),
        ];
        Actor::new(
            ActorKind::Asteroid(Asteroid { size: 1, shape: 0 }),
            position,
            verts.clone(),
            vec![Collider::polygon(verts)],
            layer,
        )
    }

    #[test]
    fn test_wrap_is_idempotent_at_rest() {
        let mut actor = square_actor(Vec2::new(800.0, 300.0), 10.0, ASTEROID_LAYER);
        actor.integrate(RES);
        assert_eq!(actor.position.x, 0.0);
        for _ in 0..5 {
            actor.integrate(RES);
            assert_eq!(actor.position, Vec2::new(0.0, 300.0));
        }
    }

    #[test]
    fn test_snap_threshold() {
        let mut actor = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER)
            .with_velocity(Vec2::new(0.0005, 0.0))
            .with_spin(0.001);
        actor.integrate(RES);
        assert_eq!(actor.velocity, Vec2::ZERO);
        assert_eq!(actor.angular_velocity, 0.0);
        assert_eq!(actor.position, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn test_integration_moves_and_rotates() {
        let mut actor = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER)
            .with_velocity(Vec2::new(2.0, -1.0))
            .with_spin(5.0);
        actor.integrate(RES);
        assert_eq!(actor.position, Vec2::new(102.0, 99.0));
        assert_eq!(actor.rotation, 5.0);
    }

    #[test]
    fn test_hit_becomes_death_on_integrate() {
        let mut actor = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER);
        actor.register_hit(PLAYER_LAYER);
        assert!(!actor.is_dead);
        actor.integrate(RES);
        assert!(actor.is_dead);
        assert!(actor.hit_layers.contains(&PLAYER_LAYER));
    }

    #[test]
    fn test_same_layer_never_collides() {
        let a = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER);
        let b = square_actor(Vec2::new(105.0, 100.0), 10.0, ASTEROID_LAYER);
        assert!(!a.collides_with(&b, RES));
        assert!(a.check_collisions(0, &[a.clone(), b], RES).is_empty());
    }

    #[test]
    fn test_different_layers_collide() {
        let a = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER);
        let b = square_actor(Vec2::new(105.0, 100.0), 10.0, SAUCER_LAYER);
        assert!(a.collides_with(&b, RES));
        assert!(b.collides_with(&a, RES));
    }

    #[test]
    fn test_collision_across_wrapped_edge() {
        let a = square_actor(Vec2::new(5.0, 300.0), 10.0, ASTEROID_LAYER);
        let b = square_actor(Vec2::new(795.0, 300.0), 10.0, SAUCER_LAYER);
        assert!(a.collides_with(&b, RES));
        assert_eq!(a.check_collisions(0, &[a.clone(), b], RES), vec![1]);
    }

    #[test]
    fn test_collision_across_opposite_corners() {
        // Only the edge ghosts overlap: (802, 2) against (797, -3)
        let a = square_actor(Vec2::new(2.0, 2.0), 5.0, PLAYER_LAYER);
        let b = square_actor(Vec2::new(797.0, 597.0), 5.0, ASTEROID_LAYER);
        assert!(a.collides_with(&b, RES));
        assert!(b.collides_with(&a, RES));
    }

    #[test]
    fn test_ghost_colliders_replicated_near_edge() {
        let a = square_actor(Vec2::new(5.0, 300.0), 10.0, ASTEROID_LAYER);
        assert_eq!(a.world_colliders(RES).len(), 2);
        assert_eq!(a.draw_positions(RES), vec![Vec2::new(5.0, 300.0), Vec2::new(805.0, 300.0)]);
        let centred = square_actor(Vec2::new(400.0, 300.0), 10.0, ASTEROID_LAYER);
        assert_eq!(centred.world_colliders(RES).len(), 1);
    }

    #[test]
    fn test_collider_less_actor_never_collides() {
        let ghost = Actor::new(
            ActorKind::Asteroid(Asteroid { size: 1, shape: 0 }),
            Vec2::new(100.0, 100.0),
            Vec::new(),
            Vec::new(),
            SAUCER_LAYER,
        );
        assert_eq!(ghost.collision_radius(), 0.0);
        let rock = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER);
        assert!(!ghost.collides_with(&rock, RES));
        assert!(!rock.collides_with(&ghost, RES));
    }

    #[test]
    fn test_empty_candidate_list() {
        let a = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER);
        assert!(a.check_collisions(0, &[], RES).is_empty());
        assert!(a.check_collisions(0, &[a.clone()], RES).is_empty());
    }

    #[test]
    fn test_circle_collider_widens_radius() {
        let bullet = Actor::new(
            ActorKind::Projectile(Projectile {
                owner: Owner::Saucer,
                lifetime: 45,
            }),
            Vec2::ZERO,
            Vec::new(),
            vec![Collider::circle(Vec2::ZERO, 5.0)],
            SAUCER_LAYER,
        );
        assert_eq!(get_radius(bullet.colliders()), 0.0);
        assert_eq!(bullet.collision_radius(), 5.0);
    }

    #[test]
    fn test_invulnerable_player_is_skipped() {
        let mut player = ship::spawn(Vec2::new(100.0, 100.0), 10);
        let rock = square_actor(Vec2::new(100.0, 100.0), 10.0, ASTEROID_LAYER);
        assert!(!rock.collides_with(&player, RES));
        player.ship_mut().expect("ship").invincibility = 0;
        assert!(rock.collides_with(&player, RES));
    }

    #[test]
    fn test_player_projectile_ignores_player() {
        let mut player = ship::spawn(Vec2::new(100.0, 100.0), 0);
        // Put the bullet on another layer so only the owner exemption applies
        let mut bullet = projectile::spawn(
            Vec2::new(100.0, 100.0),
            Vec2::ZERO,
            Owner::Player,
            &Settings::default().projectile,
        );
        bullet.collision_layer = SAUCER_LAYER;
        player.collision_layer = PLAYER_LAYER;
        assert!(!bullet.collides_with(&player, RES));
        assert!(!player.collides_with(&bullet, RES));
    }
}
