//! Bounded body population.
//!
//! Every insertion path (initial fill, twin births, respawns) goes through
//! [`Population::spawn`], which checks the ceiling first.  Ids are handed out
//! monotonically and never reused, so a removed twin can never be mistaken for
//! a newcomer.

use crate::body::{Body, BodyId, Personality, TickContext};
use crate::config::FieldConfig;
use crate::effects::Stardust;
use crate::steering::Neighbors;
use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Population {
    bodies: Vec<Body>,
    next_id: u64,
    ceiling: usize,
}

impl Population {
    pub fn new(ceiling: usize) -> Self {
        Self {
            bodies: Vec::new(),
            next_id: 0,
            ceiling,
        }
    }

    pub fn ceiling(&self) -> usize {
        self.ceiling
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Free slots under the ceiling.
    pub fn headroom(&self) -> usize {
        self.ceiling.saturating_sub(self.bodies.len())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Insert a new body unless the population is full.
    pub fn spawn<R: Rng + ?Sized>(
        &mut self,
        pos: Vec2,
        personality: Option<Personality>,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Option<BodyId> {
        if self.headroom() == 0 {
            return None;
        }
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::new(id, pos, personality, config, rng));
        Some(id)
    }

    /// Two fresh loners either side of `origin`, already bound to each other.
    ///
    /// Both or neither: with fewer than two free slots nothing is spawned.
    pub fn spawn_twins<R: Rng + ?Sized>(
        &mut self,
        origin: Vec2,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Option<(BodyId, BodyId)> {
        if self.headroom() < 2 {
            return None;
        }
        let offset = Vec2::new(config.twin_spawn_offset, 0.0);
        let left = self.spawn(origin - offset, Some(Personality::Loner), config, rng)?;
        let right = self.spawn(origin + offset, Some(Personality::Loner), config, rng)?;
        if let Some(b) = self.get_mut(left) {
            b.bind_twin(right);
        }
        if let Some(b) = self.get_mut(right) {
            b.bind_twin(left);
        }
        Some((left, right))
    }

    /// Replace the population with `count` random bodies (capped).
    pub fn populate<R: Rng + ?Sized>(
        &mut self,
        count: usize,
        bounds: Vec2,
        config: &FieldConfig,
        rng: &mut R,
    ) {
        self.bodies.clear();
        for _ in 0..count {
            let pos = random_point(bounds, rng);
            if self.spawn(pos, None, config, rng).is_none() {
                break;
            }
        }
    }

    /// Remove by index, shifting later bodies down.
    pub fn remove_at(&mut self, index: usize) -> Body {
        self.bodies.remove(index)
    }

    /// Update every body once, in population order.
    ///
    /// Each body sees the others through [`Neighbors`]; pairings bind the
    /// partner immediately so later bodies in the same pass already see it as
    /// paired.  Newborn twins are committed after the pass, under the ceiling.
    /// Returns the number of bodies born.
    pub fn update_all<R: Rng + ?Sized>(
        &mut self,
        ctx: &TickContext<'_>,
        rng: &mut R,
        stardust: &mut Vec<Stardust>,
    ) -> usize {
        let mut births = Vec::new();

        for i in 0..self.bodies.len() {
            let (before, rest) = self.bodies.split_at_mut(i);
            let Some((body, after)) = rest.split_first_mut() else {
                break;
            };
            let out = body.update(ctx, &Neighbors::new(before, after), rng);
            stardust.extend(out.stardust);

            if let Some(partner) = out.paired_with {
                let me = body.id;
                births.push(body.pos);
                if let Some(other) = self.get_mut(partner) {
                    other.bind_twin(me);
                }
            }
        }

        let mut born = 0;
        for origin in births {
            if self.spawn_twins(origin, ctx.config, rng).is_some() {
                born += 2;
            }
        }
        born
    }
}

/// Uniform point inside `[0, bounds)`.
pub fn random_point<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Vec2 {
    Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y)
}
