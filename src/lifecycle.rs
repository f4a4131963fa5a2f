//! Explosions and delayed respawns.
//!
//! A body whose collision count passes the threshold explodes: it leaves a
//! pale ring, hyper-rages everything nearby and disappears in the same tick.
//! A replacement with the same personality is queued and arrives once its
//! due time has passed *and* the population has room.  Requests that never
//! find room stay queued.

use std::time::Duration;

use crate::body::Personality;
use crate::config::FieldConfig;
use crate::effects::{Effects, Wave, EXPLOSION_WAVE_COLOR};
use crate::population::{random_point, Population};
use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RespawnRequest {
    pub personality: Personality,
    pub due: Duration,
}

/// Pending respawns in the order they were requested; served newest first.
#[derive(Debug, Clone, Default)]
pub struct RespawnQueue {
    pending: Vec<RespawnRequest>,
}

impl RespawnQueue {
    pub fn push(&mut self, request: RespawnRequest) {
        self.pending.push(request);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RespawnRequest> {
        self.pending.iter()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Explode every body over the collision threshold.  Returns how many went off.
pub fn detonate(
    population: &mut Population,
    effects: &mut Effects,
    queue: &mut RespawnQueue,
    now: Duration,
    config: &FieldConfig,
) -> usize {
    let mut exploded = 0;
    let mut i = population.len();
    while i > 0 {
        i -= 1;
        if population.as_slice()[i].collisions <= config.explosion_threshold {
            continue;
        }
        let (origin, personality) = {
            let body = &population.as_slice()[i];
            (body.pos, body.personality)
        };

        effects.waves.push(Wave::new(
            origin,
            config.explosion_wave_radius,
            EXPLOSION_WAVE_COLOR,
            config.wave_life,
        ));
        queue.push(RespawnRequest {
            personality,
            due: now + config.respawn_delay(),
        });
        for (j, other) in population.bodies_mut().iter_mut().enumerate() {
            if j != i && other.pos.distance(origin) < config.explosion_radius {
                other.hyper_rage(now, config);
            }
        }

        let body = population.remove_at(i);
        debug!(
            "Body {:?} ({:?}) exploded at ({:.0}, {:.0}) after {} collisions",
            body.id, body.personality, origin.x, origin.y, body.collisions
        );
        exploded += 1;
    }
    exploded
}

/// Spawn every request strictly past due while there is headroom.
///
/// The queue is walked from the newest request back, so when room is short
/// the most recent explosion is replaced first.  A request that cannot be
/// placed stays queued.
pub fn respawn_due<R: Rng + ?Sized>(
    population: &mut Population,
    queue: &mut RespawnQueue,
    now: Duration,
    bounds: Vec2,
    config: &FieldConfig,
    rng: &mut R,
) -> usize {
    let mut spawned = 0;
    for i in (0..queue.pending.len()).rev() {
        let request = queue.pending[i];
        if now <= request.due {
            continue;
        }
        let pos = random_point(bounds, rng);
        if let Some(id) = population.spawn(pos, Some(request.personality), config, rng) {
            debug!("Respawned {:?} as {:?}", request.personality, id);
            queue.pending.remove(i);
            spawned += 1;
        }
    }
    spawned
}
