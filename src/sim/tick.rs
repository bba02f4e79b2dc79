//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world by one step. Order matters:
//! reap dead actors, collide against pre-move positions, integrate, merge
//! new spawns, then run the wave and saucer timers. A hit registered in the
//! collision phase of tick N becomes death during tick N's integration and
//! the actor is gone from tick N+1.

use glam::Vec2;

use super::actor::ActorKind;
use super::asteroid;
use super::collision::{resolve_collisions, sense_surroundings};
use super::random::Randomness;
use super::saucer::{self, SaucerKind};
use super::ship;
use super::state::{GameEvent, GamePhase, World};
use crate::consts::{MAX_ASTEROID_SIZE, SIM_DT};
use crate::settings::AsteroidSettings;
use crate::toroidal_displacement;

/// Input commands for a single tick
#[derive(Debug, Clone)]
pub struct TickInput {
    pub thrust: bool,
    pub rotate_left: bool,
    pub rotate_right: bool,
    /// Hyperspace jump
    pub teleport: bool,
    /// Fire requested this tick (edge, not held)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Idle/demo mode - autopilot flies the ship
    pub idle_mode: bool,
    /// Elapsed frame time in milliseconds; scales input-driven acceleration only
    pub dt_ms: f32,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            thrust: false,
            rotate_left: false,
            rotate_right: false,
            teleport: false,
            fire: false,
            pause: false,
            idle_mode: false,
            dt_ms: SIM_DT * 1000.0,
        }
    }
}

/// Advance the world by one fixed step
pub fn tick(world: &mut World, input: &TickInput, rng: &mut dyn Randomness) {
    // Handle pause toggle
    if input.pause {
        match world.phase {
            GamePhase::Playing => {
                world.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => world.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }

    // Don't tick if paused or game over
    if world.phase != GamePhase::Playing {
        return;
    }

    let input = if input.idle_mode {
        autopilot(world, input)
    } else {
        input.clone()
    };
    let input = &input;

    world.time_ticks += 1;

    // Reap: dead actors run their death effects and leave, except the player
    {
        let (actors, mut ctx) = world.split_for_tick(input, rng);
        for actor in std::mem::take(actors) {
            if !actor.is_dead {
                actors.push(actor);
            } else if let Some(kept) = actor.die(&mut ctx) {
                actors.push(kept);
            }
        }
    }
    if world.scoreboard.game_over {
        world.phase = GamePhase::GameOver;
        return;
    }

    // Collide against positions from the end of the previous tick
    let resolution = world.resolution;
    sense_surroundings(&mut world.actors, resolution, world.settings.saucer.sensor_radius);
    resolve_collisions(&mut world.actors, resolution);

    // Integrate
    {
        let (actors, mut ctx) = world.split_for_tick(input, rng);
        for actor in actors.iter_mut() {
            actor.update(&mut ctx);
        }
    }

    // Merge spawns (muzzle positions can sit just past an edge)
    for spawned in world.spawn_queue.iter_mut() {
        spawned.wrap(resolution);
    }
    world.actors.append(&mut world.spawn_queue);

    if !world.hostiles_remaining() {
        start_wave(world, rng);
    }

    tick_saucer_timer(world, rng);

    for particle in world.particles.iter_mut() {
        particle.update();
    }
    world.particles.retain(|p| p.is_alive());
}

/// Number of large asteroids in wave `level` (1-based)
pub fn asteroids_for_level(level: u32, settings: &AsteroidSettings) -> u32 {
    let extra = settings.wave_growth.saturating_mul(level.saturating_sub(1));
    settings.wave_base.saturating_add(extra).min(settings.wave_max)
}

/// Advance the level and drop a fresh wave of large asteroids on the arena edges
pub fn start_wave(world: &mut World, rng: &mut dyn Randomness) {
    world.level += 1;
    let count = asteroids_for_level(world.level, &world.settings.asteroid);
    let res = world.resolution;

    for _ in 0..count {
        // Opposite edges are the same place on a torus, so two edges cover all four
        let position = if rng.chance(0.5) {
            Vec2::new(rng.uniform_f32(0.0, res.x), 0.0)
        } else {
            Vec2::new(0.0, rng.uniform_f32(0.0, res.y))
        };
        let rock = asteroid::spawn(position, MAX_ASTEROID_SIZE, rng, &world.settings.asteroid);
        world.actors.push(rock);
    }

    log::info!("Wave {} started with {} asteroids", world.level, count);
    world.scoreboard.events.push(GameEvent::WaveStarted {
        level: world.level,
        asteroids: count,
    });
}

/// Count down to the next saucer. At zero the timer is refreshed, and a saucer
/// spawns only if none is already flying.
fn tick_saucer_timer(world: &mut World, rng: &mut dyn Randomness) {
    world.saucer_countdown -= 1;
    if world.saucer_countdown > 0 {
        return;
    }

    let settings = &world.settings.saucer;
    world.saucer_countdown = rng.uniform_int(settings.spawn_min_ticks, settings.spawn_max_ticks + 1);
    if world.saucer_active() {
        return;
    }

    let small_chance = (world.scoreboard.score as f32 / settings.small_saucer_score_scale)
        .min(settings.max_small_saucer_chance);
    let kind = if rng.chance(small_chance) {
        SaucerKind::Small
    } else {
        SaucerKind::Large
    };

    let saucer = saucer::spawn(kind, &world.settings, rng);
    log::info!(
        "{:?} saucer spawned at ({:.0}, {:.0})",
        kind,
        saucer.position.x,
        saucer.position.y
    );
    world.actors.push(saucer);
    world.scoreboard.events.push(GameEvent::SaucerSpawned {
        small: kind == SaucerKind::Small,
    });
}

/// Demo pilot: turn toward the nearest hostile, shoot when lined up, and
/// close in when it is far away.
fn autopilot(world: &World, input: &TickInput) -> TickInput {
    let mut input = TickInput {
        thrust: false,
        rotate_left: false,
        rotate_right: false,
        teleport: false,
        fire: false,
        ..input.clone()
    };

    let Some(player) = world.player().filter(|p| !p.is_dead) else {
        return input;
    };

    let nearest = world
        .actors
        .iter()
        .filter(|a| matches!(a.kind, ActorKind::Asteroid(_) | ActorKind::Saucer(_)))
        .map(|a| toroidal_displacement(player.position, a.position, world.resolution))
        .min_by(|a, b| a.length_squared().total_cmp(&b.length_squared()));

    let Some(to_target) = nearest else {
        return input;
    };

    let facing = ship::facing(player.rotation);
    let dir = to_target.normalize_or_zero();
    let turn = facing.perp_dot(dir);
    let alignment = facing.dot(dir);

    // Positive rotation turns the nose from +X toward +Y
    if turn > 0.05 || alignment < 0.0 {
        input.rotate_right = true;
    } else if turn < -0.05 {
        input.rotate_left = true;
    }

    if alignment > 0.95 {
        // Pace the shots so the projectile cap is not hit at once
        input.fire = world.time_ticks % 10 == 0;
        input.thrust = to_target.length() > 250.0;
    }

    input
}
