//! Personality steering rules.
//!
//! Steering only runs for calm bodies.  [`steer`] dispatches on the body's
//! personality with one exhaustive match; each rule reads the neighbourhood
//! and adjusts the body's own velocity and target colour.
//!
//! | Personality | Per neighbour                 | After the scan               |
//! |-------------|-------------------------------|------------------------------|
//! | social      | counted                       | repelled from the centroid   |
//! | shy         | pushed away, lightens         | (wanders every tick)         |
//! | playful     | pulled closer, lightens less  | nothing                      |
//! | loner       | may pair up                   | attracted to the centroid    |
//!
//! Neighbours are scanned in population order and raged neighbours are
//! invisible.  A seeking loner pairs with the *first* eligible loner found
//! within [`FieldConfig::pairing_distance`], not the nearest one.

use crate::body::{direction, Body, BodyId, Bond, Personality};
use crate::config::FieldConfig;
use bevy::prelude::*;
use rand::Rng;

/// Read-only view of every body except the one being updated.
///
/// Bodies before the current one have already moved this tick; bodies after
/// it have not.
#[derive(Debug, Clone, Copy)]
pub struct Neighbors<'a> {
    before: &'a [Body],
    after: &'a [Body],
}

impl<'a> Neighbors<'a> {
    pub fn new(before: &'a [Body], after: &'a [Body]) -> Self {
        Self { before, after }
    }

    pub fn none() -> Self {
        Self {
            before: &[],
            after: &[],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Body> + 'a {
        let (before, after) = (self.before, self.after);
        before.iter().chain(after.iter())
    }

    /// Look up a body by id.  `None` once it has been removed.
    pub fn find(&self, id: BodyId) -> Option<&'a Body> {
        self.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Apply the body's personality rule.
///
/// Returns the partner's id when a loner just paired; both bodies are bound
/// to each other by the caller and the current tick ends for this body.
pub fn steer<R: Rng + ?Sized>(
    body: &mut Body,
    neighbors: &Neighbors<'_>,
    config: &FieldConfig,
    rng: &mut R,
) -> Option<BodyId> {
    match body.personality {
        Personality::Social => {
            social(body, neighbors, config);
            None
        }
        Personality::Shy => {
            shy(body, neighbors, config, rng);
            None
        }
        Personality::Playful => {
            playful(body, neighbors, config);
            None
        }
        Personality::Loner => loner(body, neighbors, config),
    }
}

fn social(body: &mut Body, neighbors: &Neighbors<'_>, config: &FieldConfig) {
    let mut crowd = Crowd::default();
    for (other, _) in perceived(body.pos, neighbors, config.perception_radius) {
        crowd.add(other.pos);
    }
    if let Some(center) = crowd.centroid() {
        body.vel += direction(center, body.pos) * config.social_centroid_repulsion;
    }
}

fn shy<R: Rng + ?Sized>(
    body: &mut Body,
    neighbors: &Neighbors<'_>,
    config: &FieldConfig,
    rng: &mut R,
) {
    body.wander += (rng.gen::<f32>() - 0.5) * config.shy_wander_jitter;
    body.vel += Vec2::from_angle(body.wander) * config.shy_wander_force;

    for (other, _) in perceived(body.pos, neighbors, config.perception_radius) {
        body.vel += direction(other.pos, body.pos) * config.shy_repulsion;
        body.target_color.l = config.shy_lightness;
    }
}

fn playful(body: &mut Body, neighbors: &Neighbors<'_>, config: &FieldConfig) {
    for (other, _) in perceived(body.pos, neighbors, config.perception_radius) {
        body.vel += direction(body.pos, other.pos) * config.playful_attraction;
        body.target_color.l = config.playful_lightness;
    }
}

fn loner(body: &mut Body, neighbors: &Neighbors<'_>, config: &FieldConfig) -> Option<BodyId> {
    if let Bond::Paired { twin } = body.bond {
        if let Some(twin) = neighbors.find(twin) {
            orbit_twin(body, twin.pos, config);
            return None;
        }
    }

    let mut crowd = Crowd::default();
    for (other, distance) in perceived(body.pos, neighbors, config.perception_radius) {
        if body.can_pair() && other.can_pair() && distance < config.pairing_distance {
            body.bind_twin(other.id);
            return Some(other.id);
        }
        crowd.add(other.pos);
    }

    if body.bond == Bond::Seeking {
        if let Some(center) = crowd.centroid() {
            body.vel += direction(body.pos, center) * config.loner_centroid_attraction;
        }
    }
    None
}

/// Spring toward the ideal separation plus a constant sideways push, so the
/// pair circles each other.
fn orbit_twin(body: &mut Body, twin_pos: Vec2, config: &FieldConfig) {
    body.target_color.l = config.twin_lightness;
    let away = direction(twin_pos, body.pos);
    let stretch = config.twin_ideal_distance - body.pos.distance(twin_pos);
    body.vel += away * stretch * config.twin_spring;
    body.vel += away.perp() * config.twin_orbit_force;
}

/// Calm neighbours strictly inside `radius`, with their distance.
fn perceived<'n>(
    pos: Vec2,
    neighbors: &Neighbors<'n>,
    radius: f32,
) -> impl Iterator<Item = (&'n Body, f32)> + 'n {
    neighbors
        .iter()
        .filter(|other| other.rage().is_calm())
        .map(move |other| (other, pos.distance(other.pos)))
        .filter(move |(_, distance)| *distance < radius)
}

#[derive(Debug, Default)]
struct Crowd {
    count: u32,
    sum: Vec2,
}

impl Crowd {
    fn add(&mut self, pos: Vec2) {
        self.count += 1;
        self.sum += pos;
    }

    fn centroid(&self) -> Option<Vec2> {
        (self.count > 0).then(|| self.sum / self.count as f32)
    }
}
