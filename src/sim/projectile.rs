//! Projectiles fired by the player and by saucers

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::actor::{Actor, ActorKind};
use super::collider::Collider;
use crate::consts::{PLAYER_LAYER, SAUCER_LAYER};
use crate::settings::ProjectileSettings;

/// Who fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    Player,
    Saucer,
}

impl Owner {
    /// Projectiles share their owner's collision layer
    pub fn layer(self) -> u32 {
        match self {
            Owner::Player => PLAYER_LAYER,
            Owner::Saucer => SAUCER_LAYER,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Owner,
    /// Ticks left before expiry
    pub lifetime: i32,
}

pub fn spawn(position: Vec2, velocity: Vec2, owner: Owner, settings: &ProjectileSettings) -> Actor {
    Actor::new(
        ActorKind::Projectile(Projectile {
            owner,
            lifetime: settings.lifetime_ticks,
        }),
        position,
        Vec::new(),
        vec![Collider::circle(Vec2::ZERO, settings.radius)],
        owner.layer(),
    )
    .with_velocity(velocity)
}

/// Post-integration ageing: expire once the lifetime has run out
pub fn age(actor: &mut Actor) {
    if let ActorKind::Projectile(projectile) = &mut actor.kind {
        if projectile.lifetime <= 0 {
            actor.is_dead = true;
        }
        projectile.lifetime -= 1;
    }
}
