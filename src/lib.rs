//! Animated backdrop library
//!
//! Two decorative backgrounds for a window: a swarm of personality-driven
//! circles that collide, pair up, rage and explode, and a lighter field of
//! drifting motes.  The simulation core draws through the [`surface::Surface`]
//! trait and is independent of Bevy's ECS; [`simulation::SimulationPlugin`]
//! binds a backdrop to the primary window.

pub mod backdrop;
pub mod body;
pub mod collision;
pub mod color;
pub mod config;
pub mod constants;
pub mod drift;
pub mod effects;
pub mod error;
pub mod field;
pub mod graphics;
pub mod lifecycle;
pub mod pointer;
pub mod population;
pub mod rendering;
pub mod simulation;
pub mod steering;
pub mod surface;
