//! Flying saucers
//!
//! Saucers cross the arena horizontally, wrapping only top to bottom, and
//! shoot at the player. The large saucer wanders and aims loosely. The small
//! one aims tightly and steers around anything it senses within its sensor
//! radius using four axis boosters.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind, TickContext};
use super::collider::Collider;
use super::particle;
use super::projectile::{self, Owner};
use super::random::Randomness;
use crate::consts::{PLAYER_LAYER, SAUCER_LAYER};
use crate::settings::{SaucerSettings, Settings};
use crate::{rotate_deg, toroidal_displacement};

/// Hull outline: rim quad then dome quad
const OUTLINE: [Vec2; 8] = [
    Vec2::new(20.0, -7.5),
    Vec2::new(35.0, 7.5),
    Vec2::new(-35.0, 7.5),
    Vec2::new(-20.0, -7.5),
    Vec2::new(-17.5, -7.5),
    Vec2::new(-14.0, -18.0),
    Vec2::new(14.0, -18.0),
    Vec2::new(17.5, -7.5),
];

const CORE_RADIUS: f32 = 18.0;
const SMALL_SCALE: f32 = 0.6;

/// Largest random turn of the wander direction per tick, in degrees
const WANDER_TURN: f32 = 5.0;

/// Booster exhaust offsets from the centre (up, down, left, right)
const EXHAUST_UP: Vec2 = Vec2::new(0.0, 10.0);
const EXHAUST_DOWN: Vec2 = Vec2::new(0.0, -10.0);
const EXHAUST_LEFT: Vec2 = Vec2::new(20.0, 0.0);
const EXHAUST_RIGHT: Vec2 = Vec2::new(-20.0, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SaucerKind {
    Large,
    Small,
}

impl SaucerKind {
    pub fn score(self) -> u32 {
        match self {
            SaucerKind::Large => 200,
            SaucerKind::Small => 1000,
        }
    }

    pub fn scale(self) -> f32 {
        match self {
            SaucerKind::Large => 1.0,
            SaucerKind::Small => SMALL_SCALE,
        }
    }

    fn aim_range(self, settings: &SaucerSettings) -> f32 {
        match self {
            SaucerKind::Large => settings.large_aim_range,
            SaucerKind::Small => settings.small_aim_range,
        }
    }

    fn cooldown(self, settings: &SaucerSettings, rng: &mut dyn Randomness) -> i32 {
        let (min, max) = match self {
            SaucerKind::Large => (settings.large_cooldown_min_ticks, settings.large_cooldown_max_ticks),
            SaucerKind::Small => (settings.small_cooldown_min_ticks, settings.small_cooldown_max_ticks),
        };
        rng.uniform_int(min, max + 1)
    }
}

/// Something a small saucer is steering around
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensed {
    /// Displacement from the saucer to the (nearest wrapped copy of the) actor
    pub offset: Vec2,
    pub radius: f32,
}

/// Which thrusters fired this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Boosters {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Saucer {
    pub kind: SaucerKind,
    /// Ticks until the next shot
    pub shoot_cooldown: i32,
    /// Wander direction (large saucer)
    pub move_dir: Vec2,
    /// Direction of travel across the arena (small saucer)
    pub target_dir: Vec2,
    /// Aim jitter in degrees either side of the player
    pub aim_range: f32,
    /// Refreshed by the collision pass every tick
    #[serde(skip)]
    pub sensed: Vec<Sensed>,
    pub boosters: Boosters,
}

/// Spawn a saucer just inside a random side edge, heading across
pub fn spawn(kind: SaucerKind, settings: &Settings, rng: &mut dyn Randomness) -> Actor {
    let resolution = settings.resolution;
    let heading = if rng.chance(0.5) { Vec2::X } else { Vec2::NEG_X };
    let x = if heading.x > 0.0 { 0.0 } else { resolution.x };
    let y = rng.uniform_f32(0.0, resolution.y);
    let shoot_cooldown = rng.uniform_int(
        settings.saucer.first_shot_min_ticks,
        settings.saucer.first_shot_max_ticks + 1,
    );
    with_heading(kind, Vec2::new(x, y), heading, shoot_cooldown, &settings.saucer)
}

/// Saucer at `position` travelling along `heading`
pub fn with_heading(
    kind: SaucerKind,
    position: Vec2,
    heading: Vec2,
    shoot_cooldown: i32,
    settings: &SaucerSettings,
) -> Actor {
    let scale = kind.scale();
    let points: Vec<Vec2> = OUTLINE.iter().map(|p| *p * scale).collect();
    let colliders = vec![
        Collider::circle(Vec2::ZERO, CORE_RADIUS * scale),
        Collider::polygon(points[0..4].to_vec()),
        Collider::polygon(points[4..8].to_vec()),
    ];
    let heading = heading.normalize_or(Vec2::X);
    Actor::new(
        ActorKind::Saucer(Saucer {
            kind,
            shoot_cooldown,
            move_dir: heading,
            target_dir: heading,
            aim_range: kind.aim_range(settings),
            sensed: Vec::new(),
            boosters: Boosters::default(),
        }),
        position,
        points,
        colliders,
        SAUCER_LAYER,
    )
}

/// Actors the saucer at `index` can sense: other layers within the radius
/// sum plus the sensor radius, checked in place and one arena up or down.
pub fn sense(index: usize, actors: &[Actor], resolution: Vec2, sensor_radius: f32) -> Vec<Sensed> {
    let Some(me) = actors.get(index) else {
        return Vec::new();
    };
    let shifts = [Vec2::ZERO, Vec2::new(0.0, resolution.y), Vec2::new(0.0, -resolution.y)];

    actors
        .iter()
        .enumerate()
        .filter(|(j, other)| *j != index && other.collision_layer != me.collision_layer)
        .filter_map(|(_, other)| {
            let reach = me.collision_radius() + other.collision_radius() + sensor_radius;
            shifts
                .iter()
                .map(|shift| other.position + *shift - me.position)
                .filter(|offset| offset.length() <= reach)
                .min_by(|a, b| a.length().total_cmp(&b.length()))
                .map(|offset| Sensed {
                    offset,
                    radius: other.collision_radius(),
                })
        })
        .collect()
}

/// Blend the travel direction with repulsion from everything sensed.
///
/// Each sensed actor pushes away with strength `sensor_radius - gap`. With
/// more than one sensed the summed push is divided by `count - 1`, so
/// crowds push harder than a plain average. The push weighs against
/// `target_dir` by its share of the sensor radius. A result pointing mostly
/// backwards is turned 90 degrees so the saucer slides past instead of
/// reversing.
pub fn thrust_direction(sensed: &[Sensed], target_dir: Vec2, sensor_radius: f32) -> Vec2 {
    let mut push = sensed.iter().fold(Vec2::ZERO, |acc, s| {
        let gap = s.offset.length() - s.radius;
        acc + (-s.offset).normalize_or_zero() * (sensor_radius - gap)
    });
    if sensed.len() > 1 {
        push /= (sensed.len() - 1) as f32;
    }

    let weight = (push.length() / sensor_radius).clamp(0.0, 1.0);
    let mut dir = target_dir * (1.0 - weight) + push.normalize_or_zero() * weight;

    if dir.dot(target_dir) < -0.5 {
        dir = Vec2::new(dir.y, -dir.x);
    }
    dir.normalize_or_zero()
}

/// Boosters that push along `dir`
pub fn boosters_for(dir: Vec2) -> Boosters {
    Boosters {
        right: dir.x >= 0.5,
        left: dir.x <= -0.5,
        down: dir.y >= 0.5,
        up: dir.y <= -0.5,
    }
}

/// Fire at the player and take the recoil
fn shoot(actor: &mut Actor, ctx: &mut TickContext) {
    let Some(target) = ctx.player_position else {
        return;
    };
    let ActorKind::Saucer(saucer) = &mut actor.kind else {
        return;
    };

    let aim = toroidal_displacement(actor.position, target, ctx.resolution).normalize_or(saucer.move_dir);
    let dir = rotate_deg(aim, ctx.rng.uniform_f32(-saucer.aim_range, saucer.aim_range));

    let shot = projectile::spawn(
        actor.position + dir,
        dir * ctx.settings.projectile.speed,
        Owner::Saucer,
        &ctx.settings.projectile,
    );
    ctx.spawn_queue.push(shot);

    actor.velocity += -dir * ctx.settings.saucer.recoil;
    saucer.shoot_cooldown = saucer.kind.cooldown(&ctx.settings.saucer, ctx.rng);
}

/// Shooting and movement for one tick
pub fn steer(actor: &mut Actor, ctx: &mut TickContext) {
    let settings = ctx.settings;
    let saucer_settings = &settings.saucer;
    let accel = saucer_settings.acceleration * ctx.input.dt_ms;

    let ready = match &actor.kind {
        ActorKind::Saucer(saucer) => saucer.shoot_cooldown <= 0,
        _ => return,
    };
    if ready {
        shoot(actor, ctx);
    }

    let ActorKind::Saucer(saucer) = &mut actor.kind else {
        return;
    };
    saucer.shoot_cooldown = (saucer.shoot_cooldown - 1).max(0);

    match saucer.kind {
        SaucerKind::Large => {
            let turn = ctx.rng.uniform_f32(-WANDER_TURN, WANDER_TURN);
            saucer.move_dir = rotate_deg(saucer.move_dir, turn);
            actor.velocity += saucer.move_dir.normalize_or_zero() * accel;
            actor.velocity *= saucer_settings.damping;
        }
        SaucerKind::Small => {
            actor.velocity *= saucer_settings.damping;

            let dir = thrust_direction(&saucer.sensed, saucer.target_dir, saucer_settings.sensor_radius);
            saucer.boosters = boosters_for(dir);

            let fired = [
                (saucer.boosters.up, Vec2::NEG_Y, EXHAUST_UP),
                (saucer.boosters.down, Vec2::Y, EXHAUST_DOWN),
                (saucer.boosters.left, Vec2::NEG_X, EXHAUST_LEFT),
                (saucer.boosters.right, Vec2::X, EXHAUST_RIGHT),
            ];
            for (on, push, exhaust) in fired {
                if on {
                    actor.velocity += push * accel;
                    particle::exhaust(ctx.particles, ctx.max_particles, actor.position, exhaust, ctx.rng);
                }
            }
        }
    }
}

/// Saucers that drift past a side edge leave the game
pub fn check_offscreen(actor: &mut Actor, resolution: Vec2, settings: &Settings) {
    let margin = settings.saucer.offscreen_margin;
    if actor.position.x + margin < 0.0 || actor.position.x - margin > resolution.x {
        actor.is_dead = true;
    }
}

/// Award points when shot down by the player
pub fn on_die(actor: &Actor, ctx: &mut TickContext) {
    let ActorKind::Saucer(saucer) = &actor.kind else {
        return;
    };
    if actor.hit_layers.contains(&PLAYER_LAYER) {
        ctx.scoreboard.increment_score(saucer.kind.score());
    } else if !actor.hit {
        log::debug!("{:?} saucer left the arena", saucer.kind);
    }
}
