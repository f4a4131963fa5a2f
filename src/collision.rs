//! Pairwise overlap detection and impulse response.
//!
//! All unordered pairs are tested; the population is capped, so the O(n²)
//! sweep stays cheap.  A touching pair is pushed apart along the contact
//! normal in proportion to the *other* body's mass, then exchanges an impulse
//!
//! ```text
//! p  = k · (v₁·n − v₂·n) / (m₁ + m₂)
//! v₁ -= p · m₂ · n
//! v₂ += p · m₁ · n
//! ```
//!
//! With `k = 2` this is the classic elastic collision; the default `k = 3`
//! overshoots for livelier bounces but still conserves momentum along `n`.

use crate::body::Body;
use crate::config::FieldConfig;
use crate::effects::Streak;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Resolve every overlapping pair.  Returns the number of contacts.
pub fn resolve_collisions(
    bodies: &mut [Body],
    config: &FieldConfig,
    streaks: &mut Vec<Streak>,
) -> usize {
    let mut contacts = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let a = &mut head[i];
        for b in tail.iter_mut() {
            if collide(a, b, config, streaks) {
                contacts += 1;
            }
        }
    }
    contacts
}

/// Resolve a single pair.  Returns `false` when the bodies do not touch.
pub fn collide(a: &mut Body, b: &mut Body, config: &FieldConfig, streaks: &mut Vec<Streak>) -> bool {
    let delta = b.pos - a.pos;
    let distance = delta.length();
    let reach = a.radius + b.radius;
    if distance >= reach {
        return false;
    }

    a.collisions += 1;
    b.collisions += 1;

    // Coincident centres have no direction; push along +x.
    let normal = if distance > f32::EPSILON {
        delta / distance
    } else {
        Vec2::X
    };

    let contact = (a.pos * b.radius + b.pos * a.radius) / reach;
    let angle = normal.y.atan2(normal.x) + FRAC_PI_2;
    streaks.push(Streak::new(
        contact,
        angle,
        config.streak_length,
        config.streak_life,
    ));

    let total_mass = a.mass + b.mass;
    let overlap = reach - distance;
    a.pos -= normal * overlap * (b.mass / total_mass);
    b.pos += normal * overlap * (a.mass / total_mass);

    let p = config.collision_impulse * (a.vel.dot(normal) - b.vel.dot(normal)) / total_mass;
    a.vel -= normal * p * b.mass;
    b.vel += normal * p * a.mass;

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::{BodyId, Personality};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn disc(id: u64, pos: Vec2, vel: Vec2, radius: f32, config: &FieldConfig) -> Body {
        let mut rng = StdRng::seed_from_u64(id);
        let mut b = Body::new(BodyId(id), pos, Some(Personality::Social), config, &mut rng);
        b.vel = vel;
        b.radius = radius;
        b.base_radius = radius;
        b.mass = radius * config.mass_per_radius;
        b
    }

    #[test]
    fn separated_bodies_are_untouched() {
        let config = FieldConfig::default();
        let mut bodies = vec![
            disc(1, Vec2::ZERO, Vec2::X, 2.0, &config),
            disc(2, Vec2::new(4.5, 0.0), -Vec2::X, 2.0, &config),
        ];
        let mut streaks = Vec::new();
        assert_eq!(resolve_collisions(&mut bodies, &config, &mut streaks), 0);
        assert_eq!(bodies[0].collisions, 0);
        assert!(streaks.is_empty());
    }

    #[test]
    fn no_residual_overlap_after_resolution() {
        let config = FieldConfig::default();
        let mut bodies = vec![
            disc(1, Vec2::new(10.0, 10.0), Vec2::ZERO, 3.0, &config),
            disc(2, Vec2::new(12.0, 11.0), Vec2::ZERO, 1.5, &config),
        ];
        let mut streaks = Vec::new();
        resolve_collisions(&mut bodies, &config, &mut streaks);
        let gap = bodies[0].pos.distance(bodies[1].pos);
        assert!(gap >= bodies[0].radius + bodies[1].radius - 1e-4);
    }

    #[test]
    fn elastic_factor_swaps_equal_masses() {
        let config = FieldConfig {
            collision_impulse: 2.0,
            ..Default::default()
        };
        let mut a = disc(1, Vec2::ZERO, Vec2::new(1.0, 0.0), 2.0, &config);
        let mut b = disc(2, Vec2::new(3.0, 0.0), Vec2::new(-1.0, 0.0), 2.0, &config);
        assert!(collide(&mut a, &mut b, &config, &mut Vec::new()));
        assert!((a.vel - Vec2::new(-1.0, 0.0)).length() < 1e-5);
        assert!((b.vel - Vec2::new(1.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn default_factor_conserves_momentum() {
        let config = FieldConfig::default();
        let mut a = disc(1, Vec2::ZERO, Vec2::new(0.7, 0.2), 2.5, &config);
        let mut b = disc(2, Vec2::new(2.0, 1.0), Vec2::new(-0.4, 0.1), 1.2, &config);
        let before = a.vel * a.mass + b.vel * b.mass;
        assert!(collide(&mut a, &mut b, &config, &mut Vec::new()));
        let after = a.vel * a.mass + b.vel * b.mass;
        assert!((before - after).length() < 1e-5);
    }

    #[test]
    fn contact_counts_and_emits_streak() {
        let config = FieldConfig::default();
        let mut bodies = vec![
            disc(1, Vec2::ZERO, Vec2::ZERO, 2.0, &config),
            disc(2, Vec2::new(3.0, 0.0), Vec2::ZERO, 1.0, &config),
        ];
        let mut streaks = Vec::new();
        assert_eq!(resolve_collisions(&mut bodies, &config, &mut streaks), 1);
        assert_eq!(bodies[0].collisions, 1);
        assert_eq!(bodies[1].collisions, 1);
        assert_eq!(streaks.len(), 1);
        // Radius-weighted contact point: (0·1 + 3·2) / 3 = 2.
        assert!((streaks[0].center - Vec2::new(2.0, 0.0)).length() < 1e-5);
        assert!((streaks[0].angle - FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn coincident_centres_do_not_produce_nan() {
        let config = FieldConfig::default();
        let mut a = disc(1, Vec2::splat(5.0), Vec2::ZERO, 2.0, &config);
        let mut b = disc(2, Vec2::splat(5.0), Vec2::ZERO, 2.0, &config);
        assert!(collide(&mut a, &mut b, &config, &mut Vec::new()));
        assert!(a.pos.is_finite() && b.pos.is_finite());
        assert!(b.pos.x > a.pos.x);
    }
}
