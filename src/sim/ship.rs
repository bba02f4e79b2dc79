//! Player ship
//!
//! Reads [`TickInput`](super::tick::TickInput) once per tick. Thrust and
//! rotation scale with frame time; everything else is per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, TickContext};
use super::collider::Collider;
use super::particle;
use super::projectile::{self, Owner};
use crate::consts::PLAYER_LAYER;
use crate::rotate_deg;

/// Local-space hull, nose first
const OUTLINE: [Vec2; 4] = [
    Vec2::new(0.0, -25.0),
    Vec2::new(15.0, 15.0),
    Vec2::new(0.0, 10.0),
    Vec2::new(-15.0, 15.0),
];

/// Distance from the centre to the nose, where shots leave
const NOSE_LENGTH: f32 = 25.0;

/// Exhaust puffs appear this far behind the centre
const EXHAUST_OFFSET: f32 = 12.0;

/// Ship-specific state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    /// Ticks of spawn protection left
    pub invincibility: u32,
    /// Thrust was applied this tick (for drawing the flame)
    pub thrusting: bool,
}

/// Unit vector the nose points along at `rotation` degrees
pub fn facing(rotation: f32) -> Vec2 {
    rotate_deg(Vec2::NEG_Y, rotation)
}

/// Build the player ship at `position`
pub fn spawn(position: Vec2, invincibility: u32) -> Actor {
    // The hull is concave at the tail notch, so it is two triangles
    let colliders = vec![
        Collider::polygon(vec![OUTLINE[0], OUTLINE[1], OUTLINE[2]]),
        Collider::polygon(vec![OUTLINE[0], OUTLINE[2], OUTLINE[3]]),
    ];
    Actor::new(
        ActorKind::Player(Ship {
            invincibility,
            thrusting: false,
        }),
        position,
        OUTLINE.to_vec(),
        colliders,
        PLAYER_LAYER,
    )
}

/// Apply this tick's input to the ship
pub fn steer(actor: &mut Actor, ctx: &mut TickContext) {
    let settings = &ctx.settings.ship;
    let input = ctx.input;
    let dt = input.dt_ms;

    let Some(ship) = actor.ship_mut() else {
        return;
    };
    ship.invincibility = ship.invincibility.saturating_sub(1);
    ship.thrusting = input.thrust;

    let forward = facing(actor.rotation);

    if input.thrust {
        actor.velocity += forward * settings.thrust * dt;
        particle::exhaust(
            ctx.particles,
            ctx.max_particles,
            actor.position,
            -forward * EXHAUST_OFFSET,
            ctx.rng,
        );
    }
    if input.rotate_left {
        actor.angular_velocity -= settings.rotation_accel * dt;
    }
    if input.rotate_right {
        actor.angular_velocity += settings.rotation_accel * dt;
    }

    actor.velocity *= settings.linear_damping;
    actor.angular_velocity *= settings.angular_damping;

    if input.teleport {
        actor.position = Vec2::new(
            ctx.rng.uniform_f32(0.0, ctx.resolution.x),
            ctx.rng.uniform_f32(0.0, ctx.resolution.y),
        );
        actor.velocity = Vec2::ZERO;
        log::debug!("Hyperspace to ({:.0}, {:.0})", actor.position.x, actor.position.y);
    }

    if input.fire && ctx.player_projectiles < settings.max_projectiles {
        let shot = projectile::spawn(
            actor.position + forward * NOSE_LENGTH,
            forward * ctx.settings.projectile.speed + actor.velocity,
            Owner::Player,
            &ctx.settings.projectile,
        );
        ctx.spawn_queue.push(shot);
        ctx.player_projectiles += 1;
    }
}

/// Lose a life; respawn at the arena centre or end the game.
///
/// The actor is always handed back: the player is never removed from the
/// world, even on game over.
pub fn on_die(mut actor: Actor, ctx: &mut TickContext) -> Option<Actor> {
    let lives = ctx.scoreboard.lives().saturating_sub(1);
    ctx.scoreboard.report_lives_changed(lives);

    if lives == 0 {
        log::info!("Game over with score {}", ctx.scoreboard.score());
        ctx.scoreboard.report_game_over();
        return Some(actor);
    }

    actor.position = ctx.resolution / 2.0;
    actor.velocity = Vec2::ZERO;
    actor.rotation = 0.0;
    actor.angular_velocity = 0.0;
    actor.hit = false;
    actor.hit_layers.clear();
    actor.is_dead = false;
    if let Some(ship) = actor.ship_mut() {
        ship.invincibility = ctx.settings.ship.spawn_invincibility_ticks;
        ship.thrusting = false;
    }
    log::info!("Player respawned, {lives} lives left");
    Some(actor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ASTEROID_LAYER;
    use crate::settings::Settings;
    use crate::sim::random::SimRng;
    use crate::sim::state::{GameEvent, ScoreSink, Scoreboard};
    use crate::sim::tick::TickInput;

    struct Harness {
        settings: Settings,
        input: TickInput,
        rng: SimRng,
        spawn_queue: Vec<Actor>,
        particles: Vec<particle::Particle>,
        scoreboard: Scoreboard,
        player_projectiles: usize,
    }

    impl Harness {
        fn new(input: TickInput) -> Self {
            Self {
                settings: Settings::default(),
                input,
                rng: SimRng::new(11),
                spawn_queue: Vec::new(),
                particles: Vec::new(),
                scoreboard: Scoreboard::new(3),
                player_projectiles: 0,
            }
        }

        fn ctx(&mut self) -> TickContext<'_> {
            TickContext {
                settings: &self.settings,
                resolution: self.settings.resolution,
                input: &self.input,
                player_position: None,
                player_projectiles: self.player_projectiles,
                max_particles: 256,
                rng: &mut self.rng,
                spawn_queue: &mut self.spawn_queue,
                particles: &mut self.particles,
                scoreboard: &mut self.scoreboard,
            }
        }
    }

    #[test]
    fn test_thrust_accelerates_along_nose() {
        let mut h = Harness::new(TickInput {
            thrust: true,
            ..Default::default()
        });
        let mut ship = spawn(Vec2::new(400.0, 300.0), 0);
        steer(&mut ship, &mut h.ctx());
        assert!(ship.velocity.y < 0.0);
        assert!(ship.velocity.x.abs() < 1e-5);
        assert!(ship.ship().expect("ship").thrusting);
        assert_eq!(h.particles.len(), 1);
    }

    #[test]
    fn test_rotation_input_turns_ship() {
        let mut h = Harness::new(TickInput {
            rotate_right: true,
            ..Default::default()
        });
        let mut ship = spawn(Vec2::new(400.0, 300.0), 0);
        steer(&mut ship, &mut h.ctx());
        assert!(ship.angular_velocity > 0.0);
    }

    #[test]
    fn test_fire_respects_projectile_cap() {
        let mut h = Harness::new(TickInput {
            fire: true,
            ..Default::default()
        });
        let mut ship = spawn(Vec2::new(400.0, 300.0), 0);
        steer(&mut ship, &mut h.ctx());
        assert_eq!(h.spawn_queue.len(), 1);
        let shot = &h.spawn_queue[0];
        assert_eq!(shot.projectile_owner(), Some(Owner::Player));
        assert_eq!(shot.position, Vec2::new(400.0, 275.0));

        h.spawn_queue.clear();
        h.player_projectiles = h.settings.ship.max_projectiles;
        steer(&mut ship, &mut h.ctx());
        assert!(h.spawn_queue.is_empty());
    }

    #[test]
    fn test_teleport_clears_velocity() {
        let mut h = Harness::new(TickInput {
            teleport: true,
            ..Default::default()
        });
        let mut ship = spawn(Vec2::new(400.0, 300.0), 0).with_velocity(Vec2::new(3.0, 0.0));
        steer(&mut ship, &mut h.ctx());
        assert_eq!(ship.velocity, Vec2::ZERO);
        assert!(ship.position.x >= 0.0 && ship.position.x < 800.0);
        assert!(ship.position.y >= 0.0 && ship.position.y < 600.0);
    }

    #[test]
    fn test_invincibility_counts_down() {
        let mut h = Harness::new(TickInput::default());
        let mut ship = spawn(Vec2::new(400.0, 300.0), 2);
        assert!(ship.is_invulnerable());
        steer(&mut ship, &mut h.ctx());
        steer(&mut ship, &mut h.ctx());
        assert!(!ship.is_invulnerable());
    }

    #[test]
    fn test_death_respawns_at_centre() {
        let mut h = Harness::new(TickInput::default());
        let mut ship = spawn(Vec2::new(10.0, 20.0), 0).with_velocity(Vec2::new(1.0, 1.0));
        ship.register_hit(ASTEROID_LAYER);
        ship.is_dead = true;

        let ship = on_die(ship, &mut h.ctx()).expect("player is retained");
        assert_eq!(ship.position, Vec2::new(400.0, 300.0));
        assert!(!ship.is_dead && !ship.hit);
        assert!(ship.hit_layers.is_empty());
        assert!(ship.is_invulnerable());
        assert_eq!(h.scoreboard.lives, 2);
        assert_eq!(h.scoreboard.events, vec![GameEvent::LivesChanged { lives: 2 }]);
    }

    #[test]
    fn test_last_life_ends_game() {
        let mut h = Harness::new(TickInput::default());
        h.scoreboard = Scoreboard::new(1);
        let mut ship = spawn(Vec2::new(10.0, 20.0), 0);
        ship.is_dead = true;

        let ship = on_die(ship, &mut h.ctx()).expect("player is retained");
        assert!(ship.is_dead);
        assert!(h.scoreboard.game_over);
        assert_eq!(h.scoreboard.lives, 0);
    }

    /// Sink that only tracks lives, like a bare HUD
    #[derive(Default)]
    struct LivesHud {
        lives: u32,
        game_over: bool,
    }

    impl ScoreSink for LivesHud {
        fn score(&self) -> u64 {
            0
        }

        fn lives(&self) -> u32 {
            self.lives
        }

        fn increment_score(&mut self, _points: u32) {}

        fn report_lives_changed(&mut self, lives: u32) {
            self.lives = lives;
        }

        fn report_game_over(&mut self) {
            self.game_over = true;
        }
    }

    #[test]
    fn test_death_reports_to_any_sink() {
        let mut h = Harness::new(TickInput::default());
        let mut hud = LivesHud {
            lives: 2,
            ..Default::default()
        };
        let mut ctx = h.ctx();
        ctx.scoreboard = &mut hud;

        let mut ship = spawn(Vec2::new(10.0, 20.0), 0);
        ship.is_dead = true;
        let mut ship = on_die(ship, &mut ctx).expect("player is retained");
        assert!(!ship.is_dead);

        ship.is_dead = true;
        let ship = on_die(ship, &mut ctx).expect("player is retained");
        assert!(ship.is_dead);
        drop(ctx);

        assert_eq!(hud.lives, 0);
        assert!(hud.game_over);
        assert_eq!(h.scoreboard.lives, 3);
    }
}
