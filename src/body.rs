//! A single simulated circular agent.
//!
//! ## Per-tick order
//!
//! 1. Rage branch: hyper-raged bodies shake on both axes, swell, shed
//!    stardust and glow pink; enraged bodies shake horizontally, swell and glow
//!    red; calm bodies run their
//!    personality steering and then react to the pointer.  A steering pass
//!    that pairs two loners ends the tick on the spot.
//! 2. Colour eases toward its target.
//! 3. Edge bounce, drag, speed clamp, integration.
//! 4. Calm bodies pulse around their base radius.
//!
//! Rage expiry is an absolute timestamp, so irregular frame intervals only
//! change how many ticks a rage spans, never how long it lasts.

use std::time::Duration;

use crate::color::Hsl;
use crate::config::FieldConfig;
use crate::effects::Stardust;
use crate::pointer::Pointer;
use crate::steering::{self, Neighbors};
use crate::surface::Surface;
use bevy::prelude::*;
use rand::Rng;

/// Target colour while enraged.
pub const ENRAGE_COLOR: Hsl = Hsl::new(0.0, 100.0, 55.0);
/// Target colour at the peak of hyper-rage.
pub const HYPER_RAGE_COLOR: Hsl = Hsl::new(320.0, 100.0, 65.0);

/// Stable identifier of a body within its population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u64);

/// Behavioural archetype that selects the steering rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Personality {
    Playful,
    Shy,
    Loner,
    Social,
}

impl Personality {
    pub const ALL: [Personality; 4] = [
        Personality::Playful,
        Personality::Shy,
        Personality::Loner,
        Personality::Social,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Resting colour of the archetype.
    pub fn home_color(self) -> Hsl {
        match self {
            Personality::Playful => Hsl::new(50.0, 100.0, 60.0),
            Personality::Shy => Hsl::new(180.0, 80.0, 70.0),
            Personality::Loner => Hsl::new(260.0, 80.0, 40.0),
            Personality::Social => Hsl::new(140.0, 80.0, 50.0),
        }
    }
}

/// Timed override of normal behaviour.  At most one rage is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rage {
    Calm,
    /// Click response: suppresses steering.
    Enraged { until: Duration },
    /// Explosion response: suppresses steering and pointer interaction.
    HyperRaged { until: Duration },
}

impl Rage {
    pub fn is_calm(self) -> bool {
        matches!(self, Rage::Calm)
    }
}

/// Pairing status.  Only loners ever leave `Seeking`, and never return to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bond {
    Seeking,
    /// The twin may since have been removed; look it up before use.
    Paired { twin: BodyId },
}

/// What a body produced during its tick.
#[derive(Debug, Default)]
pub struct TickOutput {
    /// Set when this body just paired with the given loner.
    pub paired_with: Option<BodyId>,
    pub stardust: Vec<Stardust>,
}

/// Everything a body reads from the world during its tick, besides neighbours.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    pub now: Duration,
    pub bounds: Vec2,
    pub pointer: Pointer,
    pub config: &'a FieldConfig,
}

#[derive(Debug, Clone)]
pub struct Body {
    pub id: BodyId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub base_radius: f32,
    /// Drawn and collided radius; pulses when calm, swells when raged.
    pub radius: f32,
    pub mass: f32,
    /// Base speed; calm bodies are clamped to twice this.
    pub speed: f32,
    pub personality: Personality,
    pub collisions: u32,
    pub(crate) rage: Rage,
    pub(crate) bond: Bond,
    pub(crate) wander: f32,
    pub(crate) home_color: Hsl,
    pub(crate) target_color: Hsl,
    color: Hsl,
    phase: f32,
}

impl Body {
    /// Random size, speed, heading and (unless given) personality.
    pub fn new<R: Rng + ?Sized>(
        id: BodyId,
        pos: Vec2,
        personality: Option<Personality>,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Self {
        let base_radius = config.body_radius_min + rng.gen::<f32>() * config.body_radius_span;
        let personality = match personality {
            Some(p) => p,
            None => Personality::random(rng),
        };
        let speed = config.body_speed_min + rng.gen::<f32>() * config.body_speed_span;
        let vel = Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5) * speed;
        let home = personality.home_color();

        Self {
            id,
            pos,
            vel,
            base_radius,
            radius: base_radius,
            mass: base_radius * config.mass_per_radius,
            speed,
            personality,
            collisions: 0,
            rage: Rage::Calm,
            bond: Bond::Seeking,
            wander: rng.gen::<f32>() * std::f32::consts::TAU,
            home_color: home,
            target_color: home,
            color: home,
            phase: rng.gen::<f32>() * std::f32::consts::TAU,
        }
    }

    pub fn rage(&self) -> Rage {
        self.rage
    }

    pub fn bond(&self) -> Bond {
        self.bond
    }

    pub fn color(&self) -> Hsl {
        self.color
    }

    pub fn target_color(&self) -> Hsl {
        self.target_color
    }

    pub fn home_color(&self) -> Hsl {
        self.home_color
    }

    /// Pairing is one-shot: a loner that ever paired keeps this true.
    pub fn has_twinned(&self) -> bool {
        matches!(self.bond, Bond::Paired { .. })
    }

    pub fn is_paired_loner(&self) -> bool {
        self.personality == Personality::Loner && self.has_twinned()
    }

    /// Eligible to start (or accept) a pairing.
    pub fn can_pair(&self) -> bool {
        self.personality == Personality::Loner && self.bond == Bond::Seeking
    }

    pub(crate) fn bind_twin(&mut self, twin: BodyId) {
        self.bond = Bond::Paired { twin };
    }

    /// Click response.  Launches the body away from `origin` and turns it red.
    ///
    /// Returns `false` (and changes nothing) when the body is already raged.
    pub fn enrage(&mut self, origin: Vec2, now: Duration, config: &FieldConfig) -> bool {
        if !self.rage.is_calm() {
            return false;
        }
        self.rage = Rage::Enraged {
            until: now + config.enrage_duration(),
        };
        self.vel = direction(origin, self.pos) * config.enrage_launch_speed;
        self.target_color = ENRAGE_COLOR;
        true
    }

    /// Explosion response.  Replaces any current rage and restarts the clock.
    pub fn hyper_rage(&mut self, now: Duration, config: &FieldConfig) {
        self.rage = Rage::HyperRaged {
            until: now + config.hyper_rage_duration(),
        };
    }

    /// Advance one tick.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        ctx: &TickContext<'_>,
        neighbors: &Neighbors<'_>,
        rng: &mut R,
    ) -> TickOutput {
        let config = ctx.config;
        let mut out = TickOutput::default();

        match self.rage {
            Rage::HyperRaged { until } => {
                if ctx.now >= until {
                    self.rage = Rage::Calm;
                    self.target_color = self.home_color;
                } else {
                    let p = decay_progress(until, ctx.now, config.hyper_rage_duration());
                    self.vel += jitter(rng) * config.hyper_rage_jitter * p;
                    self.radius = self.base_radius * (1.0 + config.hyper_rage_swell * p);

                    if rng.gen::<f32>() < p {
                        out.stardust.push(Stardust::new(self.pos, rng));
                        if rng.gen::<f32>() > 0.5 && rng.gen::<f32>() < p {
                            out.stardust.push(Stardust::new(self.pos, rng));
                        }
                    }
                    self.target_color = self.home_color.lerp(HYPER_RAGE_COLOR, p);
                }
            }
            Rage::Enraged { until } => {
                if ctx.now >= until {
                    self.rage = Rage::Calm;
                    self.target_color = self.home_color;
                } else {
                    let p = decay_progress(until, ctx.now, config.enrage_duration());
                    // Enraged bodies shake sideways only.
                    self.vel.x += (rng.gen::<f32>() - 0.5) * config.enrage_jitter * p;
                    self.radius = self.base_radius * (1.0 + config.enrage_swell * p);
                    self.target_color = self.home_color.lerp(ENRAGE_COLOR, p);
                }
            }
            Rage::Calm => {
                if let Some(partner) = steering::steer(self, neighbors, config, rng) {
                    out.paired_with = Some(partner);
                    return out;
                }
                self.react_to_pointer(ctx.pointer, config);
            }
        }

        self.color.ease_toward(self.target_color, config.color_easing);
        self.bounce_off_edges(ctx.bounds, config.edge_restitution);

        self.vel *= config.drag;
        self.vel = self.vel.clamp_length_max(self.max_speed(config));
        self.pos += self.vel;

        self.phase += config.pulse_step;
        if self.rage.is_calm() {
            self.radius = self.base_radius + self.phase.sin() * config.pulse_amplitude;
        }

        out
    }

    pub fn max_speed(&self, config: &FieldConfig) -> f32 {
        match self.rage {
            Rage::HyperRaged { .. } => config.hyper_raged_max_speed,
            Rage::Enraged { .. } => config.enraged_max_speed,
            Rage::Calm => self.speed * 2.0,
        }
    }

    /// Push away from a moving pointer; orbit an idle one.
    fn react_to_pointer(&mut self, pointer: Pointer, config: &FieldConfig) {
        if self.is_paired_loner() || !self.rage.is_calm() {
            return;
        }
        let distance = self.pos.distance(pointer.pos);
        if distance >= config.pointer_radius {
            return;
        }
        let falloff = (config.pointer_radius - distance) / config.pointer_radius;
        let away = direction(pointer.pos, self.pos);

        if pointer.idle {
            let orbit = config.pointer_orbit * falloff;
            self.vel += away.perp() * orbit;
            self.vel -= away * orbit * config.pointer_orbit_inward;
        } else {
            self.vel += away * falloff * config.pointer_push;
        }
    }

    fn bounce_off_edges(&mut self, bounds: Vec2, restitution: f32) {
        if self.pos.x + self.radius > bounds.x {
            self.pos.x = bounds.x - self.radius;
            self.vel.x *= -restitution;
        } else if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x *= -restitution;
        }
        if self.pos.y + self.radius > bounds.y {
            self.pos.y = bounds.y - self.radius;
            self.vel.y *= -restitution;
        } else if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y *= -restitution;
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        surface.set_fill(self.color.to_color());
        surface.fill_circle(self.pos, self.radius);
    }
}

/// Unit vector pointing from `from` toward `to`; `+x` when they coincide.
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    Vec2::from_angle(d.y.atan2(d.x))
}

/// Remaining fraction of a rage: 1.0 when it starts, 0.0 at expiry.
pub fn decay_progress(until: Duration, now: Duration, total: Duration) -> f32 {
    let total = total.as_secs_f32();
    if total <= 0.0 {
        return 0.0;
    }
    (until.saturating_sub(now).as_secs_f32() / total).clamp(0.0, 1.0)
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    Vec2::new(rng.gen::<f32>() - 0.5, rng.gen::<f32>() - 0.5)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::POINTER_PARKED;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn body_at(pos: Vec2, personality: Personality, config: &FieldConfig) -> Body {
        let mut b = Body::new(BodyId(1), pos, Some(personality), config, &mut rng());
        b.vel = Vec2::ZERO;
        b
    }

    fn ctx(now: Duration, config: &FieldConfig) -> TickContext<'_> {
        TickContext {
            now,
            bounds: Vec2::new(500.0, 500.0),
            pointer: Pointer {
                pos: Vec2::splat(POINTER_PARKED),
                idle: false,
            },
            config,
        }
    }

    #[test]
    fn new_body_derives_mass_and_home_color() {
        let config = FieldConfig::default();
        let b = Body::new(BodyId(3), Vec2::ZERO, Some(Personality::Shy), &config, &mut rng());
        assert!(b.base_radius >= 1.0 && b.base_radius < 3.0);
        assert!((b.mass - b.base_radius * 0.5).abs() < 1e-6);
        assert!(b.speed >= 0.5 && b.speed < 1.0);
        assert_eq!(b.color(), Hsl::new(180.0, 80.0, 70.0));
        assert!(b.rage().is_calm());
        assert!(!b.has_twinned());
    }

    #[test]
    fn edge_bounce_clamps_and_loses_energy() {
        let config = FieldConfig::default();
        let mut b = body_at(Vec2::new(499.5, 250.0), Personality::Social, &config);
        b.vel = Vec2::new(0.8, 0.0);
        b.update(&ctx(Duration::ZERO, &config), &Neighbors::none(), &mut rng());
        assert!(b.vel.x < 0.0, "x velocity must reverse");
        assert!(b.pos.x <= 500.0);
    }

    #[test]
    fn calm_speed_clamped_to_twice_base_speed() {
        let config = FieldConfig::default();
        let mut b = body_at(Vec2::splat(250.0), Personality::Social, &config);
        b.vel = Vec2::new(30.0, 0.0);
        b.update(&ctx(Duration::ZERO, &config), &Neighbors::none(), &mut rng());
        assert!(b.vel.length() <= b.speed * 2.0 + 1e-4);
    }

    #[test]
    fn enrage_launches_outward_and_ignores_raged_bodies() {
        let config = FieldConfig::default();
        let now = Duration::from_secs(1);
        let mut b = body_at(Vec2::new(200.0, 100.0), Personality::Playful, &config);
        assert!(b.enrage(Vec2::new(100.0, 100.0), now, &config));
        assert_eq!(
            b.rage(),
            Rage::Enraged {
                until: now + Duration::from_secs(5)
            }
        );
        assert!((b.vel - Vec2::new(15.0, 0.0)).length() < 1e-4);
        assert_eq!(b.target_color(), ENRAGE_COLOR);

        assert!(!b.enrage(Vec2::new(300.0, 100.0), now, &config));
        assert!(b.vel.x > 0.0, "second click must not redirect");
    }

    #[test]
    fn hyper_rage_replaces_enrage() {
        let config = FieldConfig::default();
        let now = Duration::from_secs(2);
        let mut b = body_at(Vec2::splat(50.0), Personality::Social, &config);
        b.enrage(Vec2::ZERO, now, &config);
        b.hyper_rage(now, &config);
        assert_eq!(
            b.rage(),
            Rage::HyperRaged {
                until: now + Duration::from_secs(3)
            }
        );
    }

    #[test]
    fn hyper_rage_ends_at_expiry_and_restores_home_target() {
        let config = FieldConfig::default();
        let start = Duration::from_secs(10);
        let mut b = body_at(Vec2::splat(250.0), Personality::Loner, &config);
        b.hyper_rage(start, &config);

        let mut r = rng();
        b.update(&ctx(start + Duration::from_millis(2999), &config), &Neighbors::none(), &mut r);
        assert!(matches!(b.rage(), Rage::HyperRaged { .. }));
        assert_ne!(b.target_color(), b.home_color());

        b.update(&ctx(start + Duration::from_secs(3), &config), &Neighbors::none(), &mut r);
        assert!(b.rage().is_calm());
        assert_eq!(b.target_color(), b.home_color());
    }

    #[test]
    fn enrage_ends_at_expiry_and_restores_home_target() {
        let config = FieldConfig::default();
        let start = Duration::from_secs(4);
        let mut b = body_at(Vec2::splat(250.0), Personality::Playful, &config);
        b.enrage(Vec2::ZERO, start, &config);

        let mut r = rng();
        b.update(&ctx(start + Duration::from_millis(4999), &config), &Neighbors::none(), &mut r);
        assert!(matches!(b.rage(), Rage::Enraged { .. }));
        assert_ne!(b.target_color(), b.home_color());

        b.update(&ctx(start + Duration::from_secs(5), &config), &Neighbors::none(), &mut r);
        assert!(b.rage().is_calm());
        assert_eq!(b.target_color(), b.home_color());
    }

    #[test]
    fn enraged_jitter_leaves_vertical_velocity_alone() {
        let config = FieldConfig {
            drag: 1.0,
            ..Default::default()
        };
        let now = Duration::from_secs(1);
        let mut b = body_at(Vec2::splat(250.0), Personality::Social, &config);
        b.enrage(Vec2::new(250.0, 200.0), now, &config);
        let launched = b.vel;
        assert!(launched.y > 0.0);

        let mut r = rng();
        for _ in 0..10 {
            b.update(&ctx(now, &config), &Neighbors::none(), &mut r);
            assert_eq!(b.vel.y, launched.y);
        }
        assert_ne!(b.vel.x, launched.x);
    }

    #[test]
    fn only_hyper_rage_sheds_stardust() {
        let config = FieldConfig::default();
        let now = Duration::from_secs(1);
        let mut r = rng();

        let mut hyper = body_at(Vec2::splat(250.0), Personality::Shy, &config);
        hyper.hyper_rage(now, &config);
        let mut shed = 0;
        for _ in 0..20 {
            shed += hyper
                .update(&ctx(now, &config), &Neighbors::none(), &mut r)
                .stardust
                .len();
        }
        // Decay progress is 1.0 at `now`, so every tick sheds at least one speck.
        assert!(shed >= 20);

        let mut angry = body_at(Vec2::splat(250.0), Personality::Shy, &config);
        angry.enrage(Vec2::ZERO, now, &config);
        for _ in 0..20 {
            let out = angry.update(&ctx(now, &config), &Neighbors::none(), &mut r);
            assert!(out.stardust.is_empty());
        }
    }

    #[test]
    fn pairing_tick_skips_physics_and_color() {
        let config = FieldConfig::default();
        let mut b = body_at(Vec2::new(100.0, 100.0), Personality::Loner, &config);
        b.vel = Vec2::new(0.7, -0.4);
        b.target_color = ENRAGE_COLOR;
        let partner = Body::new(
            BodyId(2),
            Vec2::new(120.0, 100.0),
            Some(Personality::Loner),
            &config,
            &mut rng(),
        );
        let (pos, vel, radius, color) = (b.pos, b.vel, b.radius, b.color());

        let neighbors = Neighbors::new(&[], std::slice::from_ref(&partner));
        let out = b.update(&ctx(Duration::ZERO, &config), &neighbors, &mut rng());

        assert_eq!(out.paired_with, Some(BodyId(2)));
        assert_eq!(b.pos, pos);
        assert_eq!(b.vel, vel);
        assert_eq!(b.radius, radius);
        assert_eq!(b.color(), color);
    }

    #[test]
    fn raged_radius_swells_with_progress() {
        let config = FieldConfig::default();
        let now = Duration::from_secs(1);
        let mut b = body_at(Vec2::splat(250.0), Personality::Social, &config);
        b.hyper_rage(now, &config);
        b.update(&ctx(now, &config), &Neighbors::none(), &mut rng());
        assert!((b.radius - b.base_radius * 1.8).abs() < 1e-4);
    }

    #[test]
    fn moving_pointer_pushes_away_idle_pointer_orbits() {
        let config = FieldConfig::default();
        let mut r = rng();

        let mut pushed = body_at(Vec2::new(250.0, 250.0), Personality::Social, &config);
        let mut c = ctx(Duration::ZERO, &config);
        c.pointer = Pointer {
            pos: Vec2::new(200.0, 250.0),
            idle: false,
        };
        pushed.update(&c, &Neighbors::none(), &mut r);
        assert!(pushed.vel.x > 0.0, "pushed away from the pointer");

        let mut orbiting = body_at(Vec2::new(250.0, 250.0), Personality::Social, &config);
        c.pointer.idle = true;
        orbiting.update(&c, &Neighbors::none(), &mut r);
        assert!(orbiting.vel.y.abs() > orbiting.vel.x.abs(), "mostly tangential");
        assert!(orbiting.vel.x < 0.0, "slight inward pull");
    }

    #[test]
    fn direction_of_coincident_points_is_positive_x() {
        assert_eq!(direction(Vec2::ONE, Vec2::ONE), Vec2::X);
        let d = direction(Vec2::ZERO, Vec2::new(0.0, 3.0));
        assert!((d - Vec2::Y).length() < 1e-6);
    }

    #[test]
    fn decay_progress_runs_from_one_to_zero() {
        let total = Duration::from_secs(5);
        let until = Duration::from_secs(15);
        assert_eq!(decay_progress(until, Duration::from_secs(10), total), 1.0);
        assert!((decay_progress(until, Duration::from_millis(12_500), total) - 0.5).abs() < 1e-5);
        assert_eq!(decay_progress(until, Duration::from_secs(20), total), 0.0);
    }
}
