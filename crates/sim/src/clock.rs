//! Monotonic frame counter for diagnostics. Never used for timing; the
//! physics world runs on its own fixed timestep.

use bevy::prelude::*;
use tracing::debug;

/// Frames elapsed since startup.
#[derive(Resource, Default)]
pub struct SceneClock {
    pub frame: u64,
}

fn tick(mut clock: ResMut<SceneClock>) {
    clock.frame += 1;
    if clock.frame % 600 == 0 {
        debug!(frame = clock.frame, "scene clock");
    }
}

pub struct ClockPlugin;

impl Plugin for ClockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SceneClock>().add_systems(First, tick);
    }
}
