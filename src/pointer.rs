//! Pointer position and idle tracking.
//!
//! Hosts report every pointer move with a timestamp.  The pointer counts as
//! idle once no move has been reported for the configured idle window; it is
//! never idle before the first move.

use std::time::Duration;

use crate::constants::POINTER_PARKED;
use bevy::prelude::*;

/// Pointer as seen by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub pos: Vec2,
    pub idle: bool,
}

/// Last reported pointer position and when it arrived.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerState {
    pos: Vec2,
    last_moved: Option<Duration>,
}

impl Default for PointerState {
    fn default() -> Self {
        Self {
            pos: Vec2::splat(POINTER_PARKED),
            last_moved: None,
        }
    }
}

impl PointerState {
    pub fn moved(&mut self, pos: Vec2, now: Duration) {
        self.pos = pos;
        self.last_moved = Some(now);
    }

    pub fn position(&self) -> Vec2 {
        self.pos
    }

    pub fn is_idle(&self, now: Duration, idle_after: Duration) -> bool {
        match self.last_moved {
            Some(at) => now.saturating_sub(at) >= idle_after,
            None => false,
        }
    }

    pub fn snapshot(&self, now: Duration, idle_after: Duration) -> Pointer {
        Pointer {
            pos: self.pos,
            idle: self.is_idle(now, idle_after),
        }
    }
}
