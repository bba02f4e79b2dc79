//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per tick; frame time only scales input acceleration
//! - Injected randomness only
//! - Collision results never depend on actor order
//! - No rendering or platform dependencies

pub mod actor;
pub mod asteroid;
pub mod collider;
pub mod collision;
pub mod particle;
pub mod projectile;
pub mod random;
pub mod saucer;
pub mod ship;
pub mod state;
pub mod tick;
pub mod wrap;

pub use actor::{Actor, ActorKind, TickContext};
pub use collider::{Collider, any_overlap, calculate_normals, get_radius, intervals_overlap, overlaps};
pub use collision::{Contact, resolve_collisions};
pub use particle::Particle;
pub use projectile::Owner;
pub use random::{Randomness, SimRng};
pub use saucer::SaucerKind;
pub use state::{GameEvent, GamePhase, ScoreSink, Scoreboard, World};
pub use tick::{TickInput, asteroids_for_level, start_wave, tick};
pub use wrap::{WrapAxes, ghost_offsets, within_reach, wrap_axis};
