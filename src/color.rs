//! Hue/saturation/lightness channels that can be eased and interpolated.
//!
//! Bodies animate colour by moving three plain numbers toward a target every
//! tick, so interpolation here is channel-wise and linear (hue does not take
//! the short way round the wheel).  Saturation and lightness are percentages.

use bevy::prelude::*;

/// Colour as raw HSL channels: hue in degrees, saturation/lightness in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f32,
    pub s: f32,
    pub l: f32,
}

impl Hsl {
    pub const fn new(h: f32, s: f32, l: f32) -> Self {
        Self { h, s, l }
    }

    /// Channel-wise linear interpolation; `t = 0` is `self`, `t = 1` is `other`.
    pub fn lerp(self, other: Hsl, t: f32) -> Hsl {
        Hsl {
            h: self.h + (other.h - self.h) * t,
            s: self.s + (other.s - self.s) * t,
            l: self.l + (other.l - self.l) * t,
        }
    }

    /// Move `factor` of the remaining distance toward `target`.
    pub fn ease_toward(&mut self, target: Hsl, factor: f32) {
        *self = self.lerp(target, factor);
    }

    pub fn to_color(self) -> Color {
        self.to_color_alpha(1.0)
    }

    pub fn to_color_alpha(self, alpha: f32) -> Color {
        Color::hsla(
            self.h.rem_euclid(360.0),
            (self.s / 100.0).clamp(0.0, 1.0),
            (self.l / 100.0).clamp(0.0, 1.0),
            alpha.clamp(0.0, 1.0),
        )
    }
}
