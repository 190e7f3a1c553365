//! # Drift Animations
//!
//! Frame-locked cosmetic motion: leaf particles falling and wrapping inside
//! their tree, and clouds drifting across the sky during the day. These are
//! infinite loops driven by fixed per-frame increments, not by the physics
//! world and not by delta time.

use bevy::prelude::*;

use crate::daynight::DayNightState;
use crate::scatter::{sample_cloud_spot, CLOUD_FIELD_EXTENT};

// ============================================================================
// Parameters
// ============================================================================

/// Leaf particles sink by this much each frame, in trunk-local units.
pub const LEAF_FALL_PER_FRAME: f32 = 0.02;

/// A particle below this local height wraps back up.
pub const LEAF_WRAP_FLOOR: f32 = -4.0;

/// Wrap lifts the particle by this much.
pub const LEAF_WRAP_LIFT: f32 = 6.0;

/// Per-frame cloud drift.
pub const CLOUD_DRIFT_X: f32 = 0.6;
pub const CLOUD_DRIFT_Z: f32 = -0.35;

// ============================================================================
// Components
// ============================================================================

/// Leaf particle that sinks and wraps in trunk-local space.
#[derive(Component)]
pub struct LeafDrift;

/// Cloud that drifts during the day and wraps around the field.
#[derive(Component)]
pub struct CloudDrift;

// ============================================================================
// Stepping
// ============================================================================

/// One frame of leaf motion in local Y.
pub fn step_leaf_height(y: f32) -> f32 {
    let y = y - LEAF_FALL_PER_FRAME;
    if y < LEAF_WRAP_FLOOR {
        y + LEAF_WRAP_LIFT
    } else {
        y
    }
}

/// Whether a cloud has left the field and needs repositioning.
pub fn cloud_out_of_field(x: f32, z: f32) -> bool {
    x > CLOUD_FIELD_EXTENT || z < -CLOUD_FIELD_EXTENT
}

// ============================================================================
// Systems
// ============================================================================

fn drift_leaves(mut leaves: Query<&mut Transform, With<LeafDrift>>) {
    for mut transform in &mut leaves {
        transform.translation.y = step_leaf_height(transform.translation.y);
    }
}

fn drift_clouds(mut clouds: Query<&mut Transform, With<CloudDrift>>) {
    let mut rng = rand::thread_rng();
    for mut transform in &mut clouds {
        transform.translation.x += CLOUD_DRIFT_X;
        transform.translation.z += CLOUD_DRIFT_Z;
        if cloud_out_of_field(transform.translation.x, transform.translation.z) {
            let spot = sample_cloud_spot(&mut rng);
            transform.translation.x = spot.x;
            transform.translation.z = spot.y;
        }
    }
}

// ============================================================================
// Plugin
// ============================================================================

pub struct DriftPlugin;

impl Plugin for DriftPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                drift_leaves,
                drift_clouds.run_if(in_state(DayNightState::Day)),
            ),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaves_sink_then_wrap() {
        let mut y = 1.0_f32;
        let mut wrapped = false;
        for _ in 0..1000 {
            let next = step_leaf_height(y);
            if next > y {
                // Wrap is a single fixed lift from just below the floor.
                assert!(y - LEAF_FALL_PER_FRAME < LEAF_WRAP_FLOOR);
                assert!((next - (y - LEAF_FALL_PER_FRAME + LEAF_WRAP_LIFT)).abs() < 1e-6);
                wrapped = true;
            }
            y = next;
            assert!(y >= LEAF_WRAP_FLOOR);
            assert!(y <= LEAF_WRAP_FLOOR + LEAF_WRAP_LIFT);
        }
        assert!(wrapped, "particle never wrapped in 1000 frames");
    }

    #[test]
    fn clouds_wrap_only_past_the_edges() {
        assert!(!cloud_out_of_field(0.0, 0.0));
        assert!(!cloud_out_of_field(999.0, -999.0));
        assert!(cloud_out_of_field(1000.5, 0.0));
        assert!(cloud_out_of_field(0.0, -1000.5));
    }
}
