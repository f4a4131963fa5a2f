//! The circle backdrop: population, effects, respawns and pointer in one
//! explicit state structure.
//!
//! ## Frame order
//!
//! 1. Fade the previous frame with a translucent background fill (trails).
//! 2. Age, draw and cull effects.
//! 3. Update every body, collecting stardust; commit twin births.
//! 4. Resolve collisions.
//! 5. Explode over-collided bodies, then serve due respawns.
//! 6. Draw bodies.

use std::time::Duration;

use crate::backdrop::{Backdrop, BACKGROUND};
use crate::body::TickContext;
use crate::collision::resolve_collisions;
use crate::config::FieldConfig;
use crate::effects::{Effects, Wave, CLICK_WAVE_COLOR};
use crate::lifecycle::{detonate, respawn_due, RespawnQueue};
use crate::pointer::PointerState;
use crate::population::Population;
use crate::surface::Surface;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub births: usize,
    pub contacts: usize,
    pub explosions: usize,
    pub respawns: usize,
}

#[derive(Resource)]
pub struct CircleField {
    config: FieldConfig,
    size: Vec2,
    population: Population,
    effects: Effects,
    respawns: RespawnQueue,
    pointer: PointerState,
    rng: StdRng,
    mounted: bool,
}

impl CircleField {
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic field for tests and reproducible runs.
    pub fn with_seed(config: FieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: StdRng) -> Self {
        Self {
            population: Population::new(config.max_bodies),
            config,
            size: Vec2::ZERO,
            effects: Effects::default(),
            respawns: RespawnQueue::default(),
            pointer: PointerState::default(),
            rng,
            mounted: false,
        }
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn population_mut(&mut self) -> &mut Population {
        &mut self.population
    }

    pub fn effects(&self) -> &Effects {
        &self.effects
    }

    pub fn respawns(&self) -> &RespawnQueue {
        &self.respawns
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Run one frame.  A zero-sized or unmounted field does nothing.
    pub fn step(&mut self, now: Duration, surface: &mut dyn Surface) -> FrameStats {
        let mut stats = FrameStats::default();
        if !self.mounted || self.size.x <= 0.0 || self.size.y <= 0.0 {
            return stats;
        }

        surface.set_fill(BACKGROUND.with_alpha(self.config.trail_fade_alpha));
        surface.fill_rect(Vec2::ZERO, self.size);

        self.effects.age_and_draw(surface);

        let ctx = TickContext {
            now,
            bounds: self.size,
            pointer: self.pointer.snapshot(now, self.config.pointer_idle()),
            config: &self.config,
        };
        stats.births = self
            .population
            .update_all(&ctx, &mut self.rng, &mut self.effects.stardust);

        stats.contacts = resolve_collisions(
            self.population.bodies_mut(),
            &self.config,
            &mut self.effects.streaks,
        );

        stats.explosions = detonate(
            &mut self.population,
            &mut self.effects,
            &mut self.respawns,
            now,
            &self.config,
        );
        stats.respawns = respawn_due(
            &mut self.population,
            &mut self.respawns,
            now,
            self.size,
            &self.config,
            &mut self.rng,
        );

        for body in self.population.iter() {
            body.draw(surface);
        }
        stats
    }

    /// Click response: a ring plus an enrage pulse.  Returns how many bodies
    /// were enraged.
    pub fn strike(&mut self, pos: Vec2, now: Duration) -> usize {
        self.effects.waves.push(Wave::new(
            pos,
            self.config.click_radius,
            CLICK_WAVE_COLOR,
            self.config.wave_life,
        ));

        let mut enraged = 0;
        for body in self.population.bodies_mut() {
            if body.pos.distance(pos) < self.config.click_radius
                && body.enrage(pos, now, &self.config)
            {
                enraged += 1;
            }
        }
        enraged
    }
}

impl Backdrop for CircleField {
    fn mount(&mut self, size: Vec2) {
        self.mounted = true;
        self.resize(size);
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
        if !self.mounted {
            return;
        }
        let count = self.config.population_for(size);
        self.population.populate(count, size, &self.config, &mut self.rng);
        info!(
            "Circle field sized {:.0}x{:.0}: {} bodies (ceiling {})",
            size.x,
            size.y,
            self.population.len(),
            self.population.ceiling()
        );
    }

    fn size(&self) -> Vec2 {
        self.size
    }

    fn pointer_moved(&mut self, pos: Vec2, now: Duration) {
        if self.mounted {
            self.pointer.moved(pos, now);
        }
    }

    fn click(&mut self, pos: Vec2, now: Duration) {
        if self.mounted {
            let enraged = self.strike(pos, now);
            debug!("Click at ({:.0}, {:.0}) enraged {enraged} bodies", pos.x, pos.y);
        }
    }

    fn tick(&mut self, now: Duration, surface: &mut dyn Surface) {
        let stats = self.step(now, surface);
        if stats.explosions > 0 || stats.respawns > 0 {
            debug!(
                "Frame: {} bodies, {} effects, {} pending respawns",
                self.population.len(),
                self.effects.len(),
                self.respawns.len()
            );
        }
    }

    fn teardown(&mut self) {
        self.mounted = false;
        self.population.clear();
        self.effects.clear();
        self.respawns.clear();
        self.pointer = PointerState::default();
        info!("Circle field torn down");
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}
