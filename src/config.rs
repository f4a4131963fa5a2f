//! Runtime backdrop configuration loaded from `assets/field.toml`.
//!
//! [`FieldConfig`] is a Bevy [`Resource`] that mirrors the tunable constants in
//! [`crate::constants`].  At startup, [`load_field_config`] reads
//! `assets/field.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the constants you care about.
//!
//! ## Tuning workflow
//!
//! 1. Edit `assets/field.toml`.
//! 2. Restart; no recompilation required.
//! 3. Watch the log: rejected values are reported and the defaults are kept.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `FieldConfig::default()`.

use std::time::Duration;

use crate::constants::*;
use crate::error::{
    require_positive, require_seconds, require_unit_fraction, FieldError, FieldResult,
};
use bevy::prelude::*;
use serde::Deserialize;

/// Default location of the optional override file.
pub const CONFIG_PATH: &str = "assets/field.toml";

/// Runtime-tunable simulation configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Durations are seconds.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    // ── Population ────────────────────────────────────────────────────────────
    pub max_bodies: usize,
    pub area_per_body: f32,

    // ── Body: Geometry & Motion ───────────────────────────────────────────────
    pub body_radius_min: f32,
    pub body_radius_span: f32,
    pub mass_per_radius: f32,
    pub body_speed_min: f32,
    pub body_speed_span: f32,
    pub drag: f32,
    pub edge_restitution: f32,
    pub color_easing: f32,
    pub pulse_step: f32,
    pub pulse_amplitude: f32,

    // ── Steering ──────────────────────────────────────────────────────────────
    pub perception_radius: f32,
    pub pairing_distance: f32,
    pub twin_spawn_offset: f32,
    pub twin_ideal_distance: f32,
    pub twin_spring: f32,
    pub twin_orbit_force: f32,
    pub twin_lightness: f32,
    pub shy_wander_jitter: f32,
    pub shy_wander_force: f32,
    pub shy_repulsion: f32,
    pub shy_lightness: f32,
    pub playful_attraction: f32,
    pub playful_lightness: f32,
    pub social_centroid_repulsion: f32,
    pub loner_centroid_attraction: f32,

    // ── Pointer ───────────────────────────────────────────────────────────────
    pub pointer_radius: f32,
    pub pointer_push: f32,
    pub pointer_orbit: f32,
    pub pointer_orbit_inward: f32,
    pub pointer_idle_secs: f32,

    // ── Rage ──────────────────────────────────────────────────────────────────
    pub click_radius: f32,
    pub enrage_launch_speed: f32,
    pub enrage_secs: f32,
    pub enrage_jitter: f32,
    pub enrage_swell: f32,
    pub enraged_max_speed: f32,
    pub hyper_rage_secs: f32,
    pub hyper_rage_jitter: f32,
    pub hyper_rage_swell: f32,
    pub hyper_raged_max_speed: f32,

    // ── Collisions & Explosions ───────────────────────────────────────────────
    pub collision_impulse: f32,
    pub explosion_threshold: u32,
    pub explosion_radius: f32,
    pub respawn_delay_secs: f32,

    // ── Effects ───────────────────────────────────────────────────────────────
    pub wave_life: f32,
    pub explosion_wave_radius: f32,
    pub streak_life: f32,
    pub streak_length: f32,
    pub trail_fade_alpha: f32,

    // ── Drift Field ───────────────────────────────────────────────────────────
    pub drift_max_particles: usize,
    pub drift_area_per_particle: f32,
    pub drift_hover_radius: f32,
    pub drift_max_radius: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            // Population
            max_bodies: MAX_BODIES,
            area_per_body: AREA_PER_BODY,
            // Geometry & Motion
            body_radius_min: BODY_RADIUS_MIN,
            body_radius_span: BODY_RADIUS_SPAN,
            mass_per_radius: MASS_PER_RADIUS,
            body_speed_min: BODY_SPEED_MIN,
            body_speed_span: BODY_SPEED_SPAN,
            drag: DRAG,
            edge_restitution: EDGE_RESTITUTION,
            color_easing: COLOR_EASING,
            pulse_step: PULSE_STEP,
            pulse_amplitude: PULSE_AMPLITUDE,
            // Steering
            perception_radius: PERCEPTION_RADIUS,
            pairing_distance: PAIRING_DISTANCE,
            twin_spawn_offset: TWIN_SPAWN_OFFSET,
            twin_ideal_distance: TWIN_IDEAL_DISTANCE,
            twin_spring: TWIN_SPRING,
            twin_orbit_force: TWIN_ORBIT_FORCE,
            twin_lightness: TWIN_LIGHTNESS,
            shy_wander_jitter: SHY_WANDER_JITTER,
            shy_wander_force: SHY_WANDER_FORCE,
            shy_repulsion: SHY_REPULSION,
            shy_lightness: SHY_LIGHTNESS,
            playful_attraction: PLAYFUL_ATTRACTION,
            playful_lightness: PLAYFUL_LIGHTNESS,
            social_centroid_repulsion: SOCIAL_CENTROID_REPULSION,
            loner_centroid_attraction: LONER_CENTROID_ATTRACTION,
            // Pointer
            pointer_radius: POINTER_RADIUS,
            pointer_push: POINTER_PUSH,
            pointer_orbit: POINTER_ORBIT,
            pointer_orbit_inward: POINTER_ORBIT_INWARD,
            pointer_idle_secs: POINTER_IDLE_SECS,
            // Rage
            click_radius: CLICK_RADIUS,
            enrage_launch_speed: ENRAGE_LAUNCH_SPEED,
            enrage_secs: ENRAGE_SECS,
            enrage_jitter: ENRAGE_JITTER,
            enrage_swell: ENRAGE_SWELL,
            enraged_max_speed: ENRAGED_MAX_SPEED,
            hyper_rage_secs: HYPER_RAGE_SECS,
            hyper_rage_jitter: HYPER_RAGE_JITTER,
            hyper_rage_swell: HYPER_RAGE_SWELL,
            hyper_raged_max_speed: HYPER_RAGED_MAX_SPEED,
            // Collisions & Explosions
            collision_impulse: COLLISION_IMPULSE,
            explosion_threshold: EXPLOSION_THRESHOLD,
            explosion_radius: EXPLOSION_RADIUS,
            respawn_delay_secs: RESPAWN_DELAY_SECS,
            // Effects
            wave_life: WAVE_LIFE,
            explosion_wave_radius: EXPLOSION_WAVE_RADIUS,
            streak_life: STREAK_LIFE,
            streak_length: STREAK_LENGTH,
            trail_fade_alpha: TRAIL_FADE_ALPHA,
            // Drift Field
            drift_max_particles: DRIFT_MAX_PARTICLES,
            drift_area_per_particle: DRIFT_AREA_PER_PARTICLE,
            drift_hover_radius: DRIFT_HOVER_RADIUS,
            drift_max_radius: DRIFT_MAX_RADIUS,
        }
    }
}

impl FieldConfig {
    /// Parse a TOML document; absent keys keep their defaults.
    pub fn from_toml_str(text: &str) -> FieldResult<Self> {
        Ok(toml::from_str::<FieldConfig>(text)?)
    }

    /// Reject values that would stall or blow up the simulation.  Timer spans
    /// must fit a [`Duration`] and the population may only be lowered below
    /// [`MAX_BODIES`].
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> FieldResult<()> {
        if self.max_bodies == 0 || self.max_bodies > MAX_BODIES {
            return Err(FieldError::UnsafeConstant {
                name: "max_bodies",
                value: self.max_bodies as f32,
                safe_range: "[1, 400]",
            });
        }
        require_positive("area_per_body", self.area_per_body)?;
        require_positive("drift_area_per_particle", self.drift_area_per_particle)?;
        require_positive("body_radius_min", self.body_radius_min)?;
        require_positive("mass_per_radius", self.mass_per_radius)?;
        require_positive("body_speed_min", self.body_speed_min)?;
        require_unit_fraction("drag", self.drag)?;
        require_unit_fraction("edge_restitution", self.edge_restitution)?;
        require_unit_fraction("color_easing", self.color_easing)?;
        require_positive("perception_radius", self.perception_radius)?;
        require_positive("pointer_radius", self.pointer_radius)?;
        require_positive("enrage_secs", self.enrage_secs)?;
        require_seconds("enrage_secs", self.enrage_secs)?;
        require_positive("hyper_rage_secs", self.hyper_rage_secs)?;
        require_seconds("hyper_rage_secs", self.hyper_rage_secs)?;
        require_seconds("respawn_delay_secs", self.respawn_delay_secs)?;
        require_seconds("pointer_idle_secs", self.pointer_idle_secs)?;
        require_positive("collision_impulse", self.collision_impulse)?;
        require_positive("wave_life", self.wave_life)?;
        require_positive("streak_life", self.streak_life)?;
        Ok(())
    }

    pub fn enrage_duration(&self) -> Duration {
        Duration::from_secs_f32(self.enrage_secs)
    }

    pub fn hyper_rage_duration(&self) -> Duration {
        Duration::from_secs_f32(self.hyper_rage_secs)
    }

    pub fn respawn_delay(&self) -> Duration {
        Duration::from_secs_f32(self.respawn_delay_secs)
    }

    pub fn pointer_idle(&self) -> Duration {
        Duration::from_secs_f32(self.pointer_idle_secs)
    }

    /// Initial body count for a surface: one per `area_per_body`, rounded up,
    /// capped at `max_bodies`.
    pub fn population_for(&self, size: Vec2) -> usize {
        scaled_count(size, self.area_per_body, self.max_bodies)
    }

    /// Drift particle count for a surface.
    pub fn drift_count_for(&self, size: Vec2) -> usize {
        scaled_count(size, self.drift_area_per_particle, self.drift_max_particles)
    }
}

fn scaled_count(size: Vec2, area_per_item: f32, cap: usize) -> usize {
    let area = size.x.max(0.0) * size.y.max(0.0);
    let wanted = (area / area_per_item).ceil();
    if wanted >= cap as f32 {
        cap
    } else {
        wanted as usize
    }
}

/// Startup system: attempt to load `assets/field.toml` and overwrite the
/// `FieldConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse or validation errors
/// are logged but do not abort the backdrop.  A missing file is not an error.
pub fn load_field_config(mut config: ResMut<FieldConfig>) {
    match read_config(CONFIG_PATH) {
        Ok(Some(loaded)) => {
            *config = loaded;
            info!("Loaded backdrop config from {CONFIG_PATH}");
        }
        Ok(None) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => {
            warn!("{e}; using defaults");
        }
    }
}

/// Read and validate a config file.  `Ok(None)` means the file does not exist.
pub fn read_config(path: &str) -> FieldResult<Option<FieldConfig>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(FieldError::ConfigRead {
                path: path.to_string(),
                source,
            })
        }
    };
    let config = FieldConfig::from_toml_str(&contents)?;
    config.validate()?;
    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pass_validation() {
        FieldConfig::default()
            .validate()
            .expect("compiled defaults must be valid");
    }

    #[test]
    fn partial_toml_keeps_other_defaults() {
        let config = FieldConfig::from_toml_str("max_bodies = 50\nexplosion_radius = 80.0")
            .expect("valid toml");
        assert_eq!(config.max_bodies, 50);
        assert_eq!(config.explosion_radius, 80.0);
        assert_eq!(config.perception_radius, PERCEPTION_RADIUS);
        assert_eq!(config.explosion_threshold, EXPLOSION_THRESHOLD);
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        let err = FieldConfig::from_toml_str("max_bodies = \"many\"").unwrap_err();
        assert!(matches!(err, FieldError::ConfigParse { .. }));
    }

    #[test]
    fn drag_above_one_is_rejected() {
        let config = FieldConfig {
            drag: 1.2,
            ..Default::default()
        };
        match config.validate() {
            Err(FieldError::UnsafeConstant { name, .. }) => assert_eq!(name, "drag"),
            other => panic!("expected UnsafeConstant, got {other:?}"),
        }
    }

    fn rejected_field(config: FieldConfig) -> &'static str {
        match config.validate() {
            Err(FieldError::UnsafeConstant { name, .. }) => name,
            other => panic!("expected UnsafeConstant, got {other:?}"),
        }
    }

    #[test]
    fn timer_spans_must_fit_a_duration() {
        let huge = FieldConfig::from_toml_str("enrage_secs = 1e30").expect("valid toml");
        assert_eq!(rejected_field(huge), "enrage_secs");

        let endless = FieldConfig::from_toml_str("respawn_delay_secs = inf").expect("valid toml");
        assert_eq!(rejected_field(endless), "respawn_delay_secs");

        let idle = FieldConfig {
            pointer_idle_secs: f32::INFINITY,
            ..Default::default()
        };
        assert_eq!(rejected_field(idle), "pointer_idle_secs");

        let negative = FieldConfig {
            respawn_delay_secs: -2.0,
            ..Default::default()
        };
        assert_eq!(rejected_field(negative), "respawn_delay_secs");
    }

    #[test]
    fn ceiling_can_be_lowered_but_not_raised() {
        let lowered = FieldConfig {
            max_bodies: 50,
            ..Default::default()
        };
        assert!(lowered.validate().is_ok());

        let raised = FieldConfig::from_toml_str("max_bodies = 5000").expect("valid toml");
        assert_eq!(rejected_field(raised), "max_bodies");
    }

    #[test]
    fn population_scales_with_area_and_caps() {
        let config = FieldConfig::default();
        assert_eq!(config.population_for(Vec2::new(1920.0, 1080.0)), 173);
        assert_eq!(config.population_for(Vec2::new(120.0, 100.0)), 1);
        assert_eq!(config.population_for(Vec2::new(8000.0, 8000.0)), MAX_BODIES);
        assert_eq!(config.population_for(Vec2::ZERO), 0);
    }

    #[test]
    fn drift_count_caps_at_two_hundred() {
        let config = FieldConfig::default();
        assert_eq!(config.drift_count_for(Vec2::new(100.0, 100.0)), 2);
        assert_eq!(config.drift_count_for(Vec2::new(1920.0, 1080.0)), 200);
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let result = read_config("assets/definitely-not-here.toml").expect("missing is ok");
        assert!(result.is_none());
    }
}
