//! Orbit camera: left-drag to orbit the scene center, scroll to zoom.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

const RADIANS_PER_DOT: f32 = 0.005;
const ZOOM_FACTOR: f32 = 0.1;
const MIN_DISTANCE: f32 = 10.0;
const MAX_DISTANCE: f32 = 1500.0;

/// Orbit state around a fixed target.
#[derive(Component)]
pub struct OrbitCamera {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
    pub initialized: bool,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 200.0,
            initialized: false,
        }
    }
}

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (attach_controller, run_orbit_camera).chain());
    }
}

/// Give any fresh 3D camera an orbit controller.
fn attach_controller(
    mut commands: Commands,
    cameras: Query<Entity, (With<Camera3d>, Without<OrbitCamera>)>,
) {
    for entity in &cameras {
        commands.entity(entity).insert(OrbitCamera::default());
    }
}

fn run_orbit_camera(
    mut mouse_motion_events: MessageReader<MouseMotion>,
    mut mouse_wheel_events: MessageReader<MouseWheel>,
    mouse_button_input: Res<ButtonInput<MouseButton>>,
    mut query: Query<(&mut Transform, &mut OrbitCamera), With<Camera>>,
) {
    let Ok((mut transform, mut orbit)) = query.single_mut() else {
        return;
    };

    if !orbit.initialized {
        let offset = transform.translation - orbit.target;
        orbit.distance = offset.length().max(MIN_DISTANCE);
        orbit.yaw = offset.x.atan2(offset.z);
        orbit.pitch = -(offset.y / orbit.distance).asin();
        orbit.initialized = true;
    }

    let mut drag = Vec2::ZERO;
    for event in mouse_motion_events.read() {
        drag += event.delta;
    }
    if mouse_button_input.pressed(MouseButton::Left) && drag != Vec2::ZERO {
        orbit.yaw -= drag.x * RADIANS_PER_DOT;
        orbit.pitch = (orbit.pitch - drag.y * RADIANS_PER_DOT)
            .clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
    }

    let mut scroll = 0.0;
    for event in mouse_wheel_events.read() {
        let amount = match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / 16.0,
        };
        scroll += amount;
    }
    if scroll != 0.0 {
        orbit.distance =
            (orbit.distance * (1.0 - scroll * ZOOM_FACTOR)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    let rotation = Quat::from_euler(EulerRot::YXZ, orbit.yaw, orbit.pitch, 0.0);
    transform.translation = orbit.target + rotation * (Vec3::Z * orbit.distance);
    transform.look_at(orbit.target, Vec3::Y);
}
