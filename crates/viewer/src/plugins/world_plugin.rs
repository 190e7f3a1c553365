//! Scene assembly: static scenery, the falling boxes, camera and lights.

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;
use ringwood_sim::daynight::DAY_LIGHT_LUMENS;
use ringwood_sim::registry::spawn_falling_boxes;
use ringwood_sim::scatter::{
    spawn_boulder_ring, spawn_cloud_deck, spawn_ground, spawn_sky, spawn_star_field,
    spawn_tree_stand,
};
use std::f32::consts::FRAC_PI_6;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (setup_scene, setup_camera_and_lights));
    }
}

/// Build all scenery once, then the dynamic boxes and their registry.
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let mut rng = rand::thread_rng();

    spawn_ground(&mut commands, &mut meshes, &mut materials);
    spawn_tree_stand(&mut commands, &mut meshes, &mut materials, &mut rng);
    spawn_boulder_ring(&mut commands, &mut meshes, &mut materials, &mut rng);
    spawn_sky(&mut commands, &mut meshes, &mut materials);
    spawn_star_field(&mut commands, &mut meshes, &mut materials, &mut rng);
    spawn_cloud_deck(&mut commands, &mut meshes, &mut materials, &mut rng);

    let registry = spawn_falling_boxes(&mut commands, &mut meshes, &mut materials, &mut rng);
    commands.insert_resource(registry);
}

fn setup_camera_and_lights(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 50.0, 200.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Camera"),
    ));

    // Key light over the far corner of the scene; the day/night cycle only
    // touches its intensity.
    commands.spawn((
        SpotLight {
            intensity: DAY_LIGHT_LUMENS,
            color: Color::WHITE,
            range: 2000.0,
            outer_angle: FRAC_PI_6,
            inner_angle: FRAC_PI_6 * 0.5,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(-200.0, 250.0, -250.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("KeyLight"),
    ));

    commands.insert_resource(GlobalAmbientLight {
        color: Color::srgb(0.13, 0.13, 0.13),
        brightness: 120.0,
        affects_lightmapped_meshes: true,
    });
}
