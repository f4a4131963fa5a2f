//! Centralised simulation and backdrop constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place without source-diving across multiple modules.
//! [`crate::config::FieldConfig`] mirrors the tunable ones and lets
//! `assets/field.toml` override any subset at startup.
//!
//! ## Units
//!
//! Distances are surface pixels.  Velocities are pixels per tick: the
//! simulation advances one fixed step per display refresh.  Durations are
//! seconds of wall-clock time, measured against the timestamp handed to each
//! tick.

// ── Population ────────────────────────────────────────────────────────────────

/// Hard ceiling on live bodies.  Checked before every insertion.
pub const MAX_BODIES: usize = 400;

/// Surface area (px²) per initial body.
///
/// A 1920×1080 surface gets `ceil(2_073_600 / 12_000) = 173` bodies.
pub const AREA_PER_BODY: f32 = 12_000.0;

// ── Body: Geometry & Motion ───────────────────────────────────────────────────

/// Base radius is drawn uniformly from `[MIN, MIN + SPAN)`.
pub const BODY_RADIUS_MIN: f32 = 1.0;
pub const BODY_RADIUS_SPAN: f32 = 2.0;

/// Mass per unit of base radius.
pub const MASS_PER_RADIUS: f32 = 0.5;

/// Base speed is drawn uniformly from `[MIN, MIN + SPAN)`.
/// Calm bodies are clamped to twice their base speed.
pub const BODY_SPEED_MIN: f32 = 0.5;
pub const BODY_SPEED_SPAN: f32 = 0.5;

/// Per-tick velocity retention (uniform drag).
pub const DRAG: f32 = 0.98;

/// Fraction of the normal velocity kept after bouncing off a surface edge.
pub const EDGE_RESTITUTION: f32 = 0.9;

/// Exponential colour smoothing factor applied every tick.
pub const COLOR_EASING: f32 = 0.1;

/// Pulse phase advance per tick and pulse amplitude (px) for calm bodies.
pub const PULSE_STEP: f32 = 0.05;
pub const PULSE_AMPLITUDE: f32 = 0.5;

// ── Steering ──────────────────────────────────────────────────────────────────

/// Neighbours farther than this are invisible to steering.
pub const PERCEPTION_RADIUS: f32 = 100.0;

/// Two seeking loners closer than this pair up.
pub const PAIRING_DISTANCE: f32 = 30.0;

/// Newborn twins appear this far either side of the pairing body.
pub const TWIN_SPAWN_OFFSET: f32 = 10.0;

/// Paired loners orbit each other around this separation.
pub const TWIN_IDEAL_DISTANCE: f32 = 40.0;
pub const TWIN_SPRING: f32 = 0.01;
pub const TWIN_ORBIT_FORCE: f32 = 0.2;
pub const TWIN_LIGHTNESS: f32 = 65.0;

/// Shy bodies random-walk their wander heading by up to ±JITTER/2 per tick.
pub const SHY_WANDER_JITTER: f32 = 0.3;
pub const SHY_WANDER_FORCE: f32 = 0.05;
pub const SHY_REPULSION: f32 = 0.1;
pub const SHY_LIGHTNESS: f32 = 90.0;

pub const PLAYFUL_ATTRACTION: f32 = 0.05;
pub const PLAYFUL_LIGHTNESS: f32 = 75.0;

/// Centroid gains applied once per tick after the neighbour scan.
pub const SOCIAL_CENTROID_REPULSION: f32 = 0.03;
pub const LONER_CENTROID_ATTRACTION: f32 = 0.04;

// ── Pointer ───────────────────────────────────────────────────────────────────

/// Bodies within this distance of the pointer react to it.
pub const POINTER_RADIUS: f32 = 150.0;

/// Push-away gain while the pointer is moving.
pub const POINTER_PUSH: f32 = 2.0;

/// Orbit gain while the pointer is idle.  A fifth of it pulls inward.
pub const POINTER_ORBIT: f32 = 0.3;
pub const POINTER_ORBIT_INWARD: f32 = 0.2;

/// Seconds without pointer movement before the pointer counts as idle.
pub const POINTER_IDLE_SECS: f32 = 0.15;

/// Off-surface sentinel used before the first pointer event.
pub const POINTER_PARKED: f32 = -1000.0;

// ── Rage ──────────────────────────────────────────────────────────────────────

/// Click response: radius, outward launch speed, and rage duration.
pub const CLICK_RADIUS: f32 = 150.0;
pub const ENRAGE_LAUNCH_SPEED: f32 = 15.0;
pub const ENRAGE_SECS: f32 = 5.0;
pub const ENRAGE_JITTER: f32 = 2.0;
pub const ENRAGE_SWELL: f32 = 0.5;
pub const ENRAGED_MAX_SPEED: f32 = 20.0;

/// Hyper-rage is triggered by nearby explosions.
pub const HYPER_RAGE_SECS: f32 = 3.0;
pub const HYPER_RAGE_JITTER: f32 = 4.0;
pub const HYPER_RAGE_SWELL: f32 = 0.8;
pub const HYPER_RAGED_MAX_SPEED: f32 = 25.0;

// ── Collisions & Explosions ───────────────────────────────────────────────────

/// Impulse factor along the collision normal.
///
/// 2.0 is the textbook elastic exchange; 3.0 deliberately over-bounces so
/// crowded regions scatter.
pub const COLLISION_IMPULSE: f32 = 3.0;

/// A body explodes once its collision counter exceeds this value.
pub const EXPLOSION_THRESHOLD: u32 = 100;

/// Bodies within this distance of an explosion become hyper-raged.
pub const EXPLOSION_RADIUS: f32 = 200.0;

/// Seconds between an explosion and the matching respawn.
pub const RESPAWN_DELAY_SECS: f32 = 10.0;

/// Longest span any configured timer may hold, in seconds.
pub const MAX_TIMER_SECS: f32 = 3600.0;

// ── Effects ───────────────────────────────────────────────────────────────────

/// Wave rings live this many ticks.
pub const WAVE_LIFE: f32 = 30.0;
pub const WAVE_MAX_OPACITY: f32 = 0.7;
pub const WAVE_MAX_LINE_WIDTH: f32 = 4.0;

/// Explosion ring radius; click rings use [`CLICK_RADIUS`].
pub const EXPLOSION_WAVE_RADIUS: f32 = 200.0;

/// Collision streaks.
pub const STREAK_LIFE: f32 = 20.0;
pub const STREAK_LENGTH: f32 = 50.0;
pub const STREAK_LINE_WIDTH: f32 = 1.5;

/// Stardust specks: size and lifetime are drawn from `[MIN, MIN + SPAN)`.
pub const STARDUST_SIZE_MIN: f32 = 1.0;
pub const STARDUST_SIZE_SPAN: f32 = 2.0;
pub const STARDUST_LIFE_MIN: f32 = 20.0;
pub const STARDUST_LIFE_SPAN: f32 = 30.0;

/// Alpha of the per-frame background wash that leaves motion trails.
pub const TRAIL_FADE_ALPHA: f32 = 0.25;

// ── Drift Field ───────────────────────────────────────────────────────────────

pub const DRIFT_MAX_PARTICLES: usize = 200;
pub const DRIFT_AREA_PER_PARTICLE: f32 = 5_000.0;

/// Particles within this distance of the pointer swell and turn yellow.
pub const DRIFT_HOVER_RADIUS: f32 = 100.0;
pub const DRIFT_MAX_RADIUS: f32 = 8.0;
pub const DRIFT_GROW_STEP: f32 = 1.0;
pub const DRIFT_SHRINK_STEP: f32 = 0.1;

/// Particle hue is drawn from `[MIN, MIN + SPAN)` (blues into purples).
pub const DRIFT_HUE_MIN: f32 = 200.0;
pub const DRIFT_HUE_SPAN: f32 = 60.0;
