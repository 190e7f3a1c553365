//! # Static Scene Scatter
//!
//! Builds the immovable scenery once at startup: ground rings, trees,
//! boulders, sky box, sun/moon, star field and cloud deck. Static elements
//! that boxes can land on get a static rigid body at the same position.
//!
//! Two placement strategies:
//! - trees use area-uniform disk sampling (sqrt-radius polar) with the
//!   central clearing pushed out rather than resampled;
//! - boulders sit on a perfect ring at a fixed radius with random sizes.

use avian3d::prelude::*;
use bevy::light::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::{FRAC_PI_2, TAU};
use tracing::info;

use crate::daynight::{visibility_for, DayNightState, SkyRole};
use crate::drift::{CloudDrift, LeafDrift};

// ============================================================================
// Parameters
// ============================================================================

pub const TREE_COUNT: usize = 100;
/// Trees scatter over a disk of this radius.
pub const TREE_FIELD_RADIUS: f32 = 90.0;
/// Half-extent of the square clearing kept free of trees.
pub const CLEARING_HALF_EXTENT: f32 = 20.0;
/// Points landing in the clearing are pushed out by this much on both axes.
pub const CLEARING_SHIFT: f32 = 40.0;
/// Leaf cubes parented to each trunk.
pub const LEAF_CLUSTERS_PER_TREE: usize = 4;
/// Drifting leaf particles parented to each trunk.
pub const LEAF_PARTICLES_PER_TREE: usize = 7;

pub const BOULDER_COUNT: usize = 100;
/// Boulders sit exactly on this ring. A ring, not an annulus.
pub const BOULDER_RING_RADIUS: f32 = 103.0;
pub const BOULDER_MIN_RADIUS: f32 = 5.0;
pub const BOULDER_MAX_RADIUS: f32 = 20.0;

pub const STAR_COUNT: usize = 1000;
/// Stars scatter in a cube of this half-extent.
pub const STAR_FIELD_EXTENT: f32 = 3000.0;
/// No star may sit inside the cube of this half-extent around the scene.
pub const STAR_EXCLUSION_EXTENT: f32 = 700.0;

pub const CLOUD_COUNT: usize = 20;
/// Clouds roam horizontally within this half-extent.
pub const CLOUD_FIELD_EXTENT: f32 = 1000.0;
pub const CLOUD_ALTITUDE: f32 = 150.0;

pub const SKY_EXTENT: f32 = 3000.0;

// ============================================================================
// Sampling
// ============================================================================

/// Area-uniform point on the tree disk: uniform angle, sqrt-distributed
/// radial factor. Avoids the center clustering of naive polar sampling.
pub fn sample_disk_point(rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..TAU);
    let radial = rng.gen_range(0.0f32..1.0).sqrt() * TREE_FIELD_RADIUS;
    Vec2::new(radial * angle.cos(), radial * angle.sin())
}

/// Tree position: disk sample, with clearing hits translated out instead of
/// resampled.
pub fn sample_tree_spot(rng: &mut impl Rng) -> Vec2 {
    let mut spot = sample_disk_point(rng);
    if spot.x.abs() <= CLEARING_HALF_EXTENT && spot.y.abs() <= CLEARING_HALF_EXTENT {
        spot.x += CLEARING_SHIFT;
        spot.y += CLEARING_SHIFT;
    }
    spot
}

/// Boulder placement: uniform angle on the fixed ring, independent size.
pub fn sample_boulder_spot(rng: &mut impl Rng) -> (Vec2, f32) {
    let angle = rng.gen_range(0.0..TAU);
    let spot = Vec2::new(
        angle.cos() * BOULDER_RING_RADIUS,
        angle.sin() * BOULDER_RING_RADIUS,
    );
    let radius = rng.gen_range(BOULDER_MIN_RADIUS..BOULDER_MAX_RADIUS);
    (spot, radius)
}

/// Star position: uniform in the field cube, resampled while it falls inside
/// the exclusion cube around the playable area.
pub fn sample_star_point(rng: &mut impl Rng) -> Vec3 {
    loop {
        let p = Vec3::new(
            rng.gen_range(-STAR_FIELD_EXTENT..STAR_FIELD_EXTENT),
            rng.gen_range(-STAR_FIELD_EXTENT..STAR_FIELD_EXTENT),
            rng.gen_range(-STAR_FIELD_EXTENT..STAR_FIELD_EXTENT),
        );
        let inside = p.x.abs() <= STAR_EXCLUSION_EXTENT
            && p.y.abs() <= STAR_EXCLUSION_EXTENT
            && p.z.abs() <= STAR_EXCLUSION_EXTENT;
        if !inside {
            return p;
        }
    }
}

/// Horizontal cloud position at the fixed altitude.
pub fn sample_cloud_spot(rng: &mut impl Rng) -> Vec2 {
    Vec2::new(
        rng.gen_range(-CLOUD_FIELD_EXTENT..CLOUD_FIELD_EXTENT),
        rng.gen_range(-CLOUD_FIELD_EXTENT..CLOUD_FIELD_EXTENT),
    )
}

// ============================================================================
// Ground & Mountains
// ============================================================================

/// Flat static ground plane plus the ring-shaped lawn, road and the two
/// torus mountain ranges.
pub fn spawn_ground(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    // Infinite plane the boxes land on.
    commands.spawn((
        RigidBody::Static,
        Collider::half_space(Vec3::Y),
        Transform::default(),
        Name::new("Ground"),
    ));

    let lawn = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x52, 0x88, 0x3f),
        perceptual_roughness: 1.0,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let road = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x76, 0x5e, 0x47),
        perceptual_roughness: 1.0,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    let rock = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.42, 0.40),
        perceptual_roughness: 1.0,
        ..default()
    });

    // Annulus meshes lie in the XY plane; lay them flat.
    let flat = Quat::from_rotation_x(-FRAC_PI_2);

    commands.spawn((
        Mesh3d(meshes.add(Annulus::new(20.0, 100.0))),
        MeshMaterial3d(lawn),
        Transform::from_rotation(flat),
        NotShadowCaster,
        Name::new("Lawn"),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Annulus::new(60.0, 70.0))),
        MeshMaterial3d(road),
        Transform::from_xyz(0.0, 0.1, 0.0).with_rotation(flat),
        NotShadowCaster,
        Name::new("RingRoad"),
    ));

    // Bevy torus meshes already lie flat around the Y axis.
    commands.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: 20.0,
            major_radius: 120.0,
        })),
        MeshMaterial3d(rock.clone()),
        Transform::from_xyz(0.0, -5.0, 0.0),
        Name::new("OuterRange"),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: 6.0,
            major_radius: 20.0,
        })),
        MeshMaterial3d(rock),
        Transform::from_xyz(0.0, -5.0, 0.0),
        Name::new("InnerRange"),
    ));
}

// ============================================================================
// Trees
// ============================================================================

/// Scatter the tree stand. Each trunk carries a static collider; leaf cubes
/// and drifting particles are children with local offsets and no bodies.
pub fn spawn_tree_stand(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
) {
    let trunk_mesh = meshes.add(Cuboid::new(2.0, 8.0, 2.0));
    let leaf_mesh = meshes.add(Cuboid::new(5.0, 5.0, 5.0));
    let particle_mesh = meshes.add(Cuboid::new(0.65, 0.6, 0.6));

    let trunk_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x7b, 0x61, 0x47),
        perceptual_roughness: 0.9,
        ..default()
    });
    let leaf_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xff, 0xb3, 0xff),
        perceptual_roughness: 0.9,
        ..default()
    });

    for _ in 0..TREE_COUNT {
        let spot = sample_tree_spot(rng);

        let mut leaf_offsets = Vec::with_capacity(LEAF_CLUSTERS_PER_TREE);
        for tier in 0..LEAF_CLUSTERS_PER_TREE {
            leaf_offsets.push(Vec3::new(
                rng.gen_range(-2.0..2.0),
                3.0 + tier as f32,
                rng.gen_range(-2.0..2.0),
            ));
        }
        let mut particle_spawns = Vec::with_capacity(LEAF_PARTICLES_PER_TREE);
        for _ in 0..LEAF_PARTICLES_PER_TREE {
            let offset = Vec3::new(
                rng.gen_range(-2.5..2.5),
                rng.gen_range(-2.5..2.5),
                rng.gen_range(-2.5..2.5),
            );
            let material = materials.add(StandardMaterial {
                base_color: Color::srgba_u8(0xff, 0xb3, 0xff, (rng.gen::<f32>() * 0.8 * 255.0) as u8),
                alpha_mode: AlphaMode::Blend,
                perceptual_roughness: 0.9,
                ..default()
            });
            particle_spawns.push((offset, material));
        }

        commands
            .spawn((
                Mesh3d(trunk_mesh.clone()),
                MeshMaterial3d(trunk_material.clone()),
                Transform::from_xyz(spot.x, 4.0, spot.y),
                RigidBody::Static,
                Collider::cuboid(2.0, 8.0, 2.0),
                Name::new("Tree"),
            ))
            .with_children(|tree| {
                for offset in leaf_offsets {
                    tree.spawn((
                        Mesh3d(leaf_mesh.clone()),
                        MeshMaterial3d(leaf_material.clone()),
                        Transform::from_translation(offset),
                        Name::new("LeafCluster"),
                    ));
                }
                for (offset, material) in particle_spawns {
                    tree.spawn((
                        Mesh3d(particle_mesh.clone()),
                        MeshMaterial3d(material),
                        Transform::from_translation(offset),
                        LeafDrift,
                        NotShadowCaster,
                        Name::new("LeafParticle"),
                    ));
                }
            });
    }

    info!(count = TREE_COUNT, "scattered tree stand");
}

// ============================================================================
// Boulders
// ============================================================================

/// Ring of boulders around the scene, each with a matching sphere collider.
pub fn spawn_boulder_ring(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
) {
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.5, 0.47, 0.44),
        perceptual_roughness: 1.0,
        ..default()
    });

    for _ in 0..BOULDER_COUNT {
        let (spot, radius) = sample_boulder_spot(rng);
        commands.spawn((
            Mesh3d(meshes.add(Sphere::new(radius))),
            MeshMaterial3d(material.clone()),
            Transform::from_xyz(spot.x, rng.gen_range(-2.0..2.0), spot.y),
            RigidBody::Static,
            Collider::sphere(radius),
            Name::new("Boulder"),
        ));
    }

    info!(count = BOULDER_COUNT, "placed boulder ring");
}

// ============================================================================
// Sky props
// ============================================================================

/// Sky box, sun and moon. Day-phase visibility applied at spawn.
pub fn spawn_sky(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let sky_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0x87, 0xce, 0xeb),
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(SKY_EXTENT, SKY_EXTENT, SKY_EXTENT))),
        MeshMaterial3d(sky_material),
        Transform::default(),
        SkyRole::Sky,
        visibility_for(SkyRole::Sky, DayNightState::Day),
        NotShadowCaster,
        NotShadowReceiver,
        Name::new("Sky"),
    ));

    let orb_mesh = meshes.add(Sphere::new(15.0));
    let sun_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xf9, 0xd7, 0x1c),
        unlit: true,
        ..default()
    });
    let moon_material = materials.add(StandardMaterial {
        base_color: Color::srgb_u8(0xf4, 0xf1, 0xc9),
        unlit: true,
        ..default()
    });

    commands.spawn((
        Mesh3d(orb_mesh.clone()),
        MeshMaterial3d(sun_material),
        Transform::from_xyz(-200.0, 130.0, -500.0),
        SkyRole::Sun,
        visibility_for(SkyRole::Sun, DayNightState::Day),
        NotShadowCaster,
        Name::new("Sun"),
    ));
    commands.spawn((
        Mesh3d(orb_mesh),
        MeshMaterial3d(moon_material),
        Transform::from_xyz(-200.0, 130.0, -500.0),
        SkyRole::Moon,
        visibility_for(SkyRole::Moon, DayNightState::Day),
        NotShadowCaster,
        Name::new("Moon"),
    ));
}

/// Distant star field, hidden until night.
pub fn spawn_star_field(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
) {
    let mesh = meshes.add(Sphere::new(4.0));
    let material = materials.add(StandardMaterial {
        base_color: Color::WHITE,
        unlit: true,
        ..default()
    });

    for _ in 0..STAR_COUNT {
        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            Transform::from_translation(sample_star_point(rng)),
            SkyRole::Star,
            visibility_for(SkyRole::Star, DayNightState::Day),
            NotShadowCaster,
            Name::new("Star"),
        ));
    }

    info!(count = STAR_COUNT, "scattered star field");
}

/// Translucent cloud deck, drifting during the day.
pub fn spawn_cloud_deck(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
) {
    for _ in 0..CLOUD_COUNT {
        let spot = sample_cloud_spot(rng);
        let mesh = meshes.add(Cuboid::new(
            rng.gen_range(50.0..150.0),
            30.0,
            rng.gen_range(50.0..150.0),
        ));
        let material = materials.add(StandardMaterial {
            base_color: Color::srgba(1.0, 1.0, 1.0, rng.gen_range(0.5..0.8)),
            alpha_mode: AlphaMode::Blend,
            unlit: true,
            ..default()
        });
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::from_xyz(spot.x, CLOUD_ALTITUDE, spot.y),
            SkyRole::Cloud,
            CloudDrift,
            visibility_for(SkyRole::Cloud, DayNightState::Day),
            NotShadowCaster,
            NotShadowReceiver,
            Name::new("Cloud"),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const SAMPLES: usize = 100_000;

    #[test]
    fn disk_sampling_is_area_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        // Four equal-area annuli over the disk should collect equal shares.
        let mut counts = [0usize; 4];
        for _ in 0..SAMPLES {
            let p = sample_disk_point(&mut rng);
            let r = p.length();
            assert!(r <= TREE_FIELD_RADIUS + 1e-3);
            let band = ((r / TREE_FIELD_RADIUS).powi(2) * 4.0).min(3.0) as usize;
            counts[band] += 1;
        }
        let expected = SAMPLES as f32 / 4.0;
        for (band, &count) in counts.iter().enumerate() {
            let deviation = (count as f32 - expected).abs() / expected;
            assert!(
                deviation < 0.05,
                "band {band} holds {count} of {SAMPLES}, not area-uniform"
            );
        }
    }

    #[test]
    fn tree_spots_avoid_the_clearing() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..SAMPLES {
            let p = sample_tree_spot(&mut rng);
            let in_clearing =
                p.x.abs() <= CLEARING_HALF_EXTENT && p.y.abs() <= CLEARING_HALF_EXTENT;
            assert!(!in_clearing, "tree at {p:?} inside the clearing");
        }
    }

    #[test]
    fn clearing_hits_are_translated_not_resampled() {
        // A point inside the clearing must land exactly at +40/+40 of its
        // raw sample, so the translated region around (40, 40) is populated.
        let mut rng = StdRng::seed_from_u64(7);
        let mut translated = 0usize;
        for _ in 0..SAMPLES {
            let p = sample_tree_spot(&mut rng);
            if (p.x - CLEARING_SHIFT).abs() <= CLEARING_HALF_EXTENT
                && (p.y - CLEARING_SHIFT).abs() <= CLEARING_HALF_EXTENT
            {
                translated += 1;
            }
        }
        // The clearing covers ~6.3% of the disk; the shifted copies land on
        // top of the regular samples around (40, 40).
        assert!(translated > SAMPLES / 20);
    }

    #[test]
    fn boulders_sit_exactly_on_the_ring() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let (spot, radius) = sample_boulder_spot(&mut rng);
            assert!((spot.length() - BOULDER_RING_RADIUS).abs() < 1e-2);
            assert!((BOULDER_MIN_RADIUS..BOULDER_MAX_RADIUS).contains(&radius));
        }
    }

    #[test]
    fn stars_avoid_the_scene_cube() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..10_000 {
            let p = sample_star_point(&mut rng);
            let inside = p.x.abs() <= STAR_EXCLUSION_EXTENT
                && p.y.abs() <= STAR_EXCLUSION_EXTENT
                && p.z.abs() <= STAR_EXCLUSION_EXTENT;
            assert!(!inside, "star at {p:?} inside the exclusion cube");
            assert!(p.abs().max_element() <= STAR_FIELD_EXTENT);
        }
    }
}
