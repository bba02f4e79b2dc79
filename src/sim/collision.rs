//! Collision pass over the whole actor set
//!
//! Runs against pre-integration positions: every pair is tested before any
//! actor moves this tick. Results are gathered first and applied afterwards,
//! so the outcome does not depend on actor order.

use glam::Vec2;

use super::actor::{Actor, ActorKind};
use super::saucer::{self, SaucerKind};

/// A colliding pair, by index into the actor list (`a < b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: usize,
    pub b: usize,
}

/// Test every actor against every other and mark both sides of each hit.
///
/// Each actor records the layer of everything that hit it. Already-hit
/// actors stay hit.
pub fn resolve_collisions(actors: &mut [Actor], resolution: Vec2) -> Vec<Contact> {
    let view: &[Actor] = actors;
    let hits: Vec<Vec<usize>> = view
        .iter()
        .enumerate()
        .map(|(i, actor)| actor.check_collisions(i, view, resolution))
        .collect();

    let layers: Vec<u32> = actors.iter().map(|a| a.collision_layer).collect();
    let mut contacts = Vec::new();
    for (i, others) in hits.into_iter().enumerate() {
        for j in others {
            actors[i].register_hit(layers[j]);
            if i < j {
                contacts.push(Contact { a: i, b: j });
            }
        }
    }
    contacts
}

/// Refresh what every small saucer can sense
pub fn sense_surroundings(actors: &mut [Actor], resolution: Vec2, sensor_radius: f32) {
    let view: &[Actor] = actors;
    let readings: Vec<(usize, Vec<saucer::Sensed>)> = view
        .iter()
        .enumerate()
        .filter(|(_, a)| {
            matches!(&a.kind, ActorKind::Saucer(s) if s.kind == SaucerKind::Small)
        })
        .map(|(i, _)| (i, saucer::sense(i, view, resolution, sensor_radius)))
        .collect();

    for (i, sensed) in readings {
        if let ActorKind::Saucer(s) = &mut actors[i].kind {
            s.sensed = sensed;
        }
    }
}
