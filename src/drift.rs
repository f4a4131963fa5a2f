//! The drift backdrop: a light field of blue motes that swell and turn yellow
//! under the pointer.  No collisions, personalities or reproduction.

use std::time::Duration;

use crate::backdrop::{Backdrop, BACKGROUND};
use crate::color::Hsl;
use crate::config::FieldConfig;
use crate::constants::*;
use crate::pointer::PointerState;
use crate::population::random_point;
use crate::surface::Surface;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Colour of a mote under the pointer.
pub const HOVER_COLOR: Hsl = Hsl::new(50.0, 100.0, 60.0);

#[derive(Debug, Clone)]
pub struct Mote {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: Hsl,
    pub hovered: bool,
}

impl Mote {
    fn new<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Self {
        let radius = resting_radius(rng);
        let inner = (bounds - Vec2::splat(radius * 2.0)).max(Vec2::ZERO);
        let pos = random_point(inner, rng) + Vec2::splat(radius);
        let vel = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5);
        let hue = DRIFT_HUE_MIN + rng.gen::<f32>() * DRIFT_HUE_SPAN;
        Self {
            pos,
            vel,
            radius,
            color: Hsl::new(hue, 70.0, 50.0),
            hovered: false,
        }
    }

    fn update<R: Rng + ?Sized>(
        &mut self,
        bounds: Vec2,
        pointer: Vec2,
        config: &FieldConfig,
        rng: &mut R,
    ) {
        let r = self.radius;
        if self.pos.x + r > bounds.x || self.pos.x - r < 0.0 {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y + r > bounds.y || self.pos.y - r < 0.0 {
            self.vel.y = -self.vel.y;
        }

        self.hovered = self.pos.distance(pointer) < config.drift_hover_radius;
        self.radius = if self.hovered {
            (self.radius + DRIFT_GROW_STEP).min(config.drift_max_radius)
        } else {
            // The floor is redrawn every frame, which gives resting motes a
            // faint shimmer.
            (self.radius - DRIFT_SHRINK_STEP).max(resting_radius(rng))
        };

        self.pos += self.vel;
    }

    fn draw(&self, surface: &mut dyn Surface) {
        let color = if self.hovered { HOVER_COLOR } else { self.color };
        surface.set_fill(color.to_color());
        surface.fill_circle(self.pos, self.radius);
    }
}

fn resting_radius<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    BODY_RADIUS_MIN + rng.gen::<f32>() * BODY_RADIUS_SPAN
}

#[derive(Resource)]
pub struct DriftField {
    config: FieldConfig,
    size: Vec2,
    motes: Vec<Mote>,
    pointer: PointerState,
    rng: StdRng,
    mounted: bool,
}

impl DriftField {
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_seed(config: FieldConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: FieldConfig, rng: StdRng) -> Self {
        Self {
            config,
            size: Vec2::ZERO,
            motes: Vec::new(),
            pointer: PointerState::default(),
            rng,
            mounted: false,
        }
    }

    pub fn motes(&self) -> &[Mote] {
        &self.motes
    }

    pub fn motes_mut(&mut self) -> &mut [Mote] {
        &mut self.motes
    }
}

impl Backdrop for DriftField {
    fn mount(&mut self, size: Vec2) {
        self.mounted = true;
        self.resize(size);
    }

    fn resize(&mut self, size: Vec2) {
        self.size = size;
        if !self.mounted {
            return;
        }
        let count = self.config.drift_count_for(size);
        let rng = &mut self.rng;
        self.motes = (0..count).map(|_| Mote::new(size, rng)).collect();
        info!(
            "Drift field sized {:.0}x{:.0}: {} motes",
            size.x,
            size.y,
            self.motes.len()
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

    fn tick(&mut self, _now: Duration, surface: &mut dyn Surface) {
        if !self.mounted || self.size.x <= 0.0 || self.size.y <= 0.0 {
            return;
        }
        surface.set_fill(BACKGROUND);
        surface.fill_rect(Vec2::ZERO, self.size);

        let pointer = self.pointer.position();
        for mote in &mut self.motes {
            mote.update(self.size, pointer, &self.config, &mut self.rng);
            mote.draw(surface);
        }
    }

    fn teardown(&mut self) {
        self.mounted = false;
        self.motes.clear();
        self.pointer = PointerState::default();
        info!("Drift field torn down");
    }

    fn is_mounted(&self) -> bool {
        self.mounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::DrawList;

    fn mounted(size: Vec2) -> DriftField {
        let mut field = DriftField::with_seed(FieldConfig::default(), 9);
        field.mount(size);
        field
    }

    #[test]
    fn motes_start_inside_with_cool_hues() {
        let field = mounted(Vec2::new(400.0, 300.0));
        assert_eq!(field.motes().len(), 24);
        for mote in field.motes() {
            assert!(mote.pos.x >= mote.radius && mote.pos.x <= 400.0 - mote.radius);
            assert!(mote.pos.y >= mote.radius && mote.pos.y <= 300.0 - mote.radius);
            assert!(mote.color.h >= 200.0 && mote.color.h < 260.0);
            assert!(mote.vel.x.abs() <= 0.5 && mote.vel.y.abs() <= 0.5);
        }
    }

    #[test]
    fn hovered_mote_swells_to_cap_and_turns_yellow() {
        let mut field = mounted(Vec2::new(400.0, 300.0));
        let target = field.motes()[0].pos;
        for mote in field.motes_mut() {
            mote.vel = Vec2::ZERO;
        }
        field.pointer_moved(target, Duration::ZERO);

        let mut list = DrawList::default();
        for _ in 0..20 {
            field.tick(Duration::ZERO, &mut list);
        }
        let mote = &field.motes()[0];
        assert!(mote.hovered);
        assert_eq!(mote.radius, DRIFT_MAX_RADIUS);

        field.pointer_moved(Vec2::splat(POINTER_PARKED), Duration::ZERO);
        field.tick(Duration::ZERO, &mut list);
        let mote = &field.motes()[0];
        assert!(!mote.hovered);
        assert!((mote.radius - (DRIFT_MAX_RADIUS - DRIFT_SHRINK_STEP)).abs() < 1e-5);
    }

    #[test]
    fn motes_bounce_off_edges() {
        let mut field = mounted(Vec2::new(100.0, 100.0));
        {
            let mote = &mut field.motes_mut()[0];
            mote.pos = Vec2::new(101.0, 50.0);
            mote.vel = Vec2::new(0.3, 0.0);
        }
        field.tick(Duration::ZERO, &mut DrawList::default());
        assert!(field.motes()[0].vel.x < 0.0);
    }

    #[test]
    fn rim_crossing_the_edge_bounces() {
        let mut field = mounted(Vec2::new(100.0, 100.0));
        {
            let mote = &mut field.motes_mut()[0];
            mote.pos = Vec2::new(50.0, 1.5);
            mote.radius = 2.0;
            mote.vel = Vec2::new(0.0, -0.3);
        }
        field.tick(Duration::ZERO, &mut DrawList::default());
        assert!(field.motes()[0].vel.y > 0.0);
    }

    #[test]
    fn frame_is_a_solid_clear() {
        let mut field = mounted(Vec2::new(100.0, 100.0));
        let mut list = DrawList::default();
        field.tick(Duration::ZERO, &mut list);
        assert_eq!(list.filled_circles(), field.motes().len());
    }
}
