//! Transient visual effects: wave rings, collision streaks, and stardust.
//!
//! ## Design
//!
//! Effects are non-physical.  Each carries a life counter measured in ticks
//! that starts at its maximum and drops by one per frame; every visual
//! property (radius, length, opacity, width) is a pure function of the
//! remaining-life fraction.
//!
//! | Effect     | Spawned by                    | Drawn as        | Life (ticks) |
//! |------------|-------------------------------|-----------------|--------------|
//! | [`Wave`]     | clicks, explosions          | stroked circle  | 30           |
//! | [`Streak`]   | body collisions             | stroked line    | 20           |
//! | [`Stardust`] | hyper-raged bodies          | filled circle   | 20–50        |
//!
//! [`Effects`] owns the three collections.  [`Effects::age_and_draw`] ages
//! every effect, draws the ones still alive, and drops the rest in the same
//! pass, so nothing is ever drawn with a non-positive life.

use crate::color::Hsl;
use crate::constants::*;
use crate::surface::Surface;
use bevy::prelude::*;
use rand::Rng;

/// Click ring tint (light blue).
pub const CLICK_WAVE_COLOR: Color = Color::srgb(173.0 / 255.0, 216.0 / 255.0, 230.0 / 255.0);
/// Explosion ring tint (pale yellow).
pub const EXPLOSION_WAVE_COLOR: Color = Color::srgb(1.0, 1.0, 180.0 / 255.0);

/// Shared behaviour of every effect kind.
pub trait Fading {
    /// Advance one tick.
    fn age(&mut self);
    /// Remaining life in ticks; the effect is dead at or below zero.
    fn life(&self) -> f32;
    fn draw(&self, surface: &mut dyn Surface);

    fn is_alive(&self) -> bool {
        self.life() > 0.0
    }
}

// ── Wave ─────────────────────────────────────────────────────────────────────

/// Expanding ring that thins and fades as it grows.
#[derive(Debug, Clone)]
pub struct Wave {
    pub center: Vec2,
    pub max_radius: f32,
    pub color: Color,
    pub radius: f32,
    life: f32,
    max_life: f32,
}

impl Wave {
    pub fn new(center: Vec2, max_radius: f32, color: Color, max_life: f32) -> Self {
        Self {
            center,
            max_radius,
            color,
            radius: 0.0,
            life: max_life,
            max_life,
        }
    }

    fn fraction(&self) -> f32 {
        self.life / self.max_life
    }
}

impl Fading for Wave {
    fn age(&mut self) {
        self.life -= 1.0;
        self.radius = self.max_radius * (1.0 - self.fraction());
    }

    fn life(&self) -> f32 {
        self.life
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_alive() {
            return;
        }
        let f = self.fraction();
        surface.set_stroke(self.color.with_alpha(f * WAVE_MAX_OPACITY));
        surface.set_line_width((f * WAVE_MAX_LINE_WIDTH).max(1.0));
        surface.stroke_circle(self.center, self.radius);
    }
}

// ── Streak ───────────────────────────────────────────────────────────────────

/// Short white line centred on a collision point, growing as it fades.
#[derive(Debug, Clone)]
pub struct Streak {
    pub center: Vec2,
    /// Orientation in radians.
    pub angle: f32,
    pub max_length: f32,
    pub length: f32,
    life: f32,
    max_life: f32,
}

impl Streak {
    pub fn new(center: Vec2, angle: f32, max_length: f32, max_life: f32) -> Self {
        Self {
            center,
            angle,
            max_length,
            length: 0.0,
            life: max_life,
            max_life,
        }
    }

    fn fraction(&self) -> f32 {
        self.life / self.max_life
    }

    /// Endpoints of the line at its current length.
    pub fn endpoints(&self) -> (Vec2, Vec2) {
        let half = Vec2::from_angle(self.angle) * (self.length / 2.0);
        (self.center - half, self.center + half)
    }
}

impl Fading for Streak {
    fn age(&mut self) {
        self.life -= 1.0;
        self.length = self.max_length * (1.0 - self.fraction());
    }

    fn life(&self) -> f32 {
        self.life
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_alive() {
            return;
        }
        let (from, to) = self.endpoints();
        surface.set_stroke(Color::WHITE.with_alpha(self.fraction()));
        surface.set_line_width(STREAK_LINE_WIDTH);
        surface.stroke_line(from, to);
    }
}

// ── Stardust ─────────────────────────────────────────────────────────────────

/// Pink speck shed by hyper-raged bodies; shrinks and fades in place.
#[derive(Debug, Clone)]
pub struct Stardust {
    pub center: Vec2,
    pub size: f32,
    pub color: Hsl,
    life: f32,
    max_life: f32,
}

impl Stardust {
    pub fn new<R: Rng + ?Sized>(center: Vec2, rng: &mut R) -> Self {
        let max_life = STARDUST_LIFE_MIN + rng.gen::<f32>() * STARDUST_LIFE_SPAN;
        Self {
            center,
            size: STARDUST_SIZE_MIN + rng.gen::<f32>() * STARDUST_SIZE_SPAN,
            color: Hsl::new(320.0, 100.0, 70.0 + rng.gen::<f32>() * 30.0),
            life: max_life,
            max_life,
        }
    }

    fn fraction(&self) -> f32 {
        self.life / self.max_life
    }
}

impl Fading for Stardust {
    fn age(&mut self) {
        self.life -= 1.0;
    }

    fn life(&self) -> f32 {
        self.life
    }

    fn draw(&self, surface: &mut dyn Surface) {
        if !self.is_alive() {
            return;
        }
        let f = self.fraction();
        surface.set_fill(self.color.to_color_alpha(f));
        surface.fill_circle(self.center, self.size * f);
    }
}

// ── Collections ──────────────────────────────────────────────────────────────

/// The three live effect collections.
#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub waves: Vec<Wave>,
    pub streaks: Vec<Streak>,
    pub stardust: Vec<Stardust>,
}

impl Effects {
    /// Age, draw, and cull every effect.  Waves draw first, stardust last.
    pub fn age_and_draw(&mut self, surface: &mut dyn Surface) {
        age_layer(&mut self.waves, surface);
        age_layer(&mut self.streaks, surface);
        age_layer(&mut self.stardust, surface);
    }

    pub fn len(&self) -> usize {
        self.waves.len() + self.streaks.len() + self.stardust.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.waves.clear();
        self.streaks.clear();
        self.stardust.clear();
    }
}

fn age_layer<T: Fading>(layer: &mut Vec<T>, surface: &mut dyn Surface) {
    layer.retain_mut(|effect| {
        effect.age();
        effect.draw(surface);
        effect.is_alive()
    });
}
