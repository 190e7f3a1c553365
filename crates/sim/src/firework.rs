//! # Fireworks
//!
//! One-burst-at-a-time particle fireworks, launched automatically while the
//! scene is in its Night phase.
//!
//! Lifecycle: Idle -> Bursting -> Idle. A burst spawns a fixed number of
//! particles at a random sky position, each with an independent random
//! velocity. Particles integrate ballistically (velocity added to position
//! each frame, no gravity). The frame any single particle travels farther
//! than [`BURST_RADIUS_LIMIT`] from the origin, the whole burst is despawned.

use bevy::prelude::*;
use rand::Rng;
use tracing::{debug, info};

use crate::daynight::DayNightState;

// ============================================================================
// Parameters
// ============================================================================

/// Particles per burst.
pub const PARTICLES_PER_BURST: usize = 50;

/// A burst ends once any particle is this far from its origin.
pub const BURST_RADIUS_LIMIT: f32 = 200.0;

/// Velocity components are uniform in `[-PARTICLE_SPEED, PARTICLE_SPEED]`.
pub const PARTICLE_SPEED: f32 = 5.0;

/// Visual radius of one particle.
pub const PARTICLE_RADIUS: f32 = 2.0;

/// Horizontal launch offset is uniform in `[-LAUNCH_HALF_RANGE, LAUNCH_HALF_RANGE]`.
pub const LAUNCH_HALF_RANGE: f32 = 250.0;

/// Fixed launch height.
pub const LAUNCH_HEIGHT: f32 = 100.0;

/// Fixed launch depth, behind the scenery.
pub const LAUNCH_DEPTH: f32 = -400.0;

// ============================================================================
// State
// ============================================================================

/// Marker on every live firework particle.
#[derive(Component)]
pub struct FireworkParticle;

/// A burst in flight: its origin and every (particle, velocity) pair.
#[derive(Debug)]
pub struct FireworkBurst {
    pub origin: Vec3,
    pub particles: Vec<(Entity, Vec3)>,
}

/// Firework state machine. At most one burst exists at a time.
#[derive(Resource, Default)]
pub enum FireworkPhase {
    #[default]
    Idle,
    Bursting(FireworkBurst),
}

impl FireworkPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Total bursts launched since startup. Surfaced in the HUD.
#[derive(Resource, Default)]
pub struct FireworkTally(pub u64);

// ============================================================================
// Sampling
// ============================================================================

/// Launch point: random horizontal offset, fixed height and depth.
pub fn sample_launch_point(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-LAUNCH_HALF_RANGE..LAUNCH_HALF_RANGE),
        LAUNCH_HEIGHT,
        LAUNCH_DEPTH,
    )
}

/// Per-particle velocity, components independent and symmetric around zero.
pub fn sample_particle_velocity(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-PARTICLE_SPEED..PARTICLE_SPEED),
        rng.gen_range(-PARTICLE_SPEED..PARTICLE_SPEED),
        rng.gen_range(-PARTICLE_SPEED..PARTICLE_SPEED),
    )
}

// ============================================================================
// Systems
// ============================================================================

/// Launch a burst when none is active. Runs only during Night.
pub fn launch_burst(
    mut commands: Commands,
    mut phase: ResMut<FireworkPhase>,
    mut tally: ResMut<FireworkTally>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    if !phase.is_idle() {
        return;
    }

    let mut rng = rand::thread_rng();
    let origin = sample_launch_point(&mut rng);
    let color = Color::srgb(rng.gen(), rng.gen(), rng.gen());

    let mesh = meshes.add(Sphere::new(PARTICLE_RADIUS));
    let material = materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    });

    let mut particles = Vec::with_capacity(PARTICLES_PER_BURST);
    for _ in 0..PARTICLES_PER_BURST {
        let velocity = sample_particle_velocity(&mut rng);
        let entity = commands
            .spawn((
                FireworkParticle,
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(origin),
                Name::new("FireworkParticle"),
            ))
            .id();
        particles.push((entity, velocity));
    }

    tally.0 += 1;
    info!(total = tally.0, ?origin, "firework launched");
    *phase = FireworkPhase::Bursting(FireworkBurst { origin, particles });
}

/// Integrate every particle and tear the burst down once spent.
///
/// Teardown triggers on the first particle to cross the radius limit, not on
/// consensus; all particles are removed in the same step.
pub fn advance_burst(
    mut commands: Commands,
    mut phase: ResMut<FireworkPhase>,
    mut transforms: Query<&mut Transform, With<FireworkParticle>>,
) {
    let FireworkPhase::Bursting(burst) = &mut *phase else {
        return;
    };

    let mut spent = false;
    for (entity, velocity) in &burst.particles {
        let Ok(mut transform) = transforms.get_mut(*entity) else {
            continue;
        };
        transform.translation += *velocity;
        if transform.translation.distance(burst.origin) > BURST_RADIUS_LIMIT {
            spent = true;
        }
    }

    if spent {
        for (entity, _) in &burst.particles {
            commands.entity(*entity).despawn();
        }
        debug!("firework burst retired");
        *phase = FireworkPhase::Idle;
    }
}

// ============================================================================
// Plugin
// ============================================================================

pub struct FireworkPlugin;

impl Plugin for FireworkPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FireworkPhase>()
            .init_resource::<FireworkTally>()
            .add_systems(
                Update,
                (
                    launch_burst.run_if(in_state(DayNightState::Night)),
                    advance_burst,
                )
                    .chain(),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn launch_points_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..10_000 {
            let p = sample_launch_point(&mut rng);
            assert!(p.x.abs() < LAUNCH_HALF_RANGE);
            assert_eq!(p.y, LAUNCH_HEIGHT);
            assert_eq!(p.z, LAUNCH_DEPTH);
        }
    }

    #[test]
    fn velocities_are_bounded_and_symmetric() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut sum = Vec3::ZERO;
        let n = 50_000;
        for _ in 0..n {
            let v = sample_particle_velocity(&mut rng);
            assert!(v.x.abs() < PARTICLE_SPEED);
            assert!(v.y.abs() < PARTICLE_SPEED);
            assert!(v.z.abs() < PARTICLE_SPEED);
            sum += v;
        }
        let mean = sum / n as f32;
        assert!(mean.length() < 0.1, "mean velocity {mean:?} not near zero");
    }

    #[test]
    fn phase_starts_idle() {
        assert!(FireworkPhase::default().is_idle());
    }
}
