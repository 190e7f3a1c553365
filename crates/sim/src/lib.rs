//! # Ringwood Simulation
//!
//! Simulation core for the Ringwood scene, shared by the viewer binary and
//! the headless tests.
//!
//! ## Modules
//!
//! - [`registry`]: paired visual/physical records for the falling boxes,
//!   per-frame transform sync, user-triggered reset
//! - [`scatter`]: static scenery builders and their placement sampling
//! - [`daynight`]: two-state day/night cycle and its visibility rules
//! - [`firework`]: night-time firework burst state machine
//! - [`drift`]: frame-locked leaf and cloud animation
//! - [`clock`]: diagnostic frame counter
//!
//! The physics world is authoritative for every dynamic box; visual nodes
//! are rewritten from body transforms each frame. All state lives in ECS
//! resources and components owned by the [`App`]; the only user-facing
//! mutations are the [`daynight::ToggleDayNight`] and
//! [`registry::ResetBoxes`] messages.

pub mod clock;
pub mod daynight;
pub mod drift;
pub mod firework;
pub mod registry;
pub mod scatter;

use bevy::prelude::*;

pub use clock::{ClockPlugin, SceneClock};
pub use daynight::{DayNightPlugin, DayNightState, SkyRole, ToggleDayNight};
pub use drift::DriftPlugin;
pub use firework::{FireworkPhase, FireworkPlugin, FireworkTally};
pub use registry::{DynamicEntity, DynamicRegistry, RegistryPlugin, ResetBoxes};

/// Everything the scene needs besides rendering and input: add to the viewer
/// `App` after the physics plugins.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ClockPlugin,
            RegistryPlugin,
            DayNightPlugin,
            FireworkPlugin,
            DriftPlugin,
        ));
    }
}
