//! Ringwood Viewer
//!
//! Windowed build of the Ringwood scene: falling physics boxes in a
//! ring-shaped clearing, a user-toggled day/night cycle, night-time
//! fireworks, and a two-button debug panel.
//!
//! ## Plugins
//! - `SimulationPlugin`: registry sync, day/night, fireworks, drift
//! - `WorldPlugin`: static scenery, boxes, camera, lights
//! - `OrbitCameraPlugin`: mouse orbit + scroll zoom
//! - `HudPlugin`: toggle/reset buttons and the firework counter

mod plugins;

use avian3d::prelude::*;
use bevy::prelude::*;
use ringwood_sim::SimulationPlugin;

use plugins::{HudPlugin, OrbitCameraPlugin, WorldPlugin};

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Ringwood".to_string(),
                    resolution: bevy::window::WindowResolution::new(1600, 900),
                    present_mode: bevy::window::PresentMode::Fifo, // VSync
                    ..default()
                }),
                ..default()
            }),
        )
        // Physics (Avian3D), stepped at the scene's fixed 60 Hz timestep
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(Gravity(Vec3::NEG_Y * 9.82))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        // Scene simulation
        .add_plugins(SimulationPlugin)
        // Presentation
        .add_plugins((WorldPlugin, OrbitCameraPlugin, HudPlugin))
        .run();
}
