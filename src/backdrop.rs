//! Host-facing backdrop lifecycle.
//!
//! A backdrop is mounted once with the surface size, told about resizes and
//! pointer input between frames, ticked once per display refresh, and torn
//! down when its host goes away.  Input and ticks received while unmounted
//! are ignored.

use std::str::FromStr;
use std::time::Duration;

use crate::error::FieldError;
use crate::surface::Surface;
use bevy::prelude::*;

/// Page background, `rgb(10, 10, 22)`.
pub const BACKGROUND: Color = Color::srgb(10.0 / 255.0, 10.0 / 255.0, 22.0 / 255.0);

pub trait Backdrop: Send + Sync + 'static {
    /// Start simulating on a surface of `size` pixels.
    fn mount(&mut self, size: Vec2);
    /// Adopt a new surface size and rebuild the scene for it.
    fn resize(&mut self, size: Vec2);
    fn size(&self) -> Vec2;
    fn pointer_moved(&mut self, pos: Vec2, now: Duration);
    fn click(&mut self, _pos: Vec2, _now: Duration) {}
    /// Advance one frame and draw it.
    fn tick(&mut self, now: Duration, surface: &mut dyn Surface);
    /// Stop simulating and release the scene.
    fn teardown(&mut self);
    fn is_mounted(&self) -> bool;
}

/// Which backdrop the host runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackdropKind {
    #[default]
    Circles,
    Drift,
}

impl FromStr for BackdropKind {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circles" => Ok(BackdropKind::Circles),
            "drift" => Ok(BackdropKind::Drift),
            _ => Err(FieldError::UnknownBackdrop {
                name: s.to_string(),
            }),
        }
    }
}
