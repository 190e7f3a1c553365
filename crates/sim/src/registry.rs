//! # Dynamic Entity Registry
//!
//! Paired visual/physical records for the falling boxes, the per-frame
//! physics-to-visual transform sync, and the user-triggered box reset.
//!
//! The physical body is the source of truth for position and orientation.
//! The visual node is derived: its transform is overwritten every frame by
//! [`sync_dynamic_visuals`], after the physics step and before rendering.

use avian3d::prelude::*;
use bevy::prelude::*;
use rand::Rng;
use tracing::info;

// ============================================================================
// Parameters
// ============================================================================

/// Number of falling boxes in the scene.
pub const BOX_COUNT: usize = 199;

/// Edge length of each box, visual and collider alike.
pub const BOX_SIZE: f32 = 2.5;

/// Mass of each dynamic box.
pub const BOX_MASS: f32 = 10.0;

/// Boxes drop from this height, stacked upward per index.
pub const DROP_BASE_HEIGHT: f32 = 80.0;

/// Vertical spacing between consecutive boxes in the drop stack.
pub const DROP_STACK_STEP: f32 = 10.0;

/// Horizontal drop coordinates are integers in `[-DROP_HALF_RANGE, DROP_HALF_RANGE]`.
pub const DROP_HALF_RANGE: i32 = 70;

// ============================================================================
// Registry
// ============================================================================

/// Marker for a box's physical body entity.
#[derive(Component)]
pub struct BoxBody;

/// Marker for a box's visual mesh entity.
#[derive(Component)]
pub struct BoxVisual;

/// One falling box: a visual node and the physical body that drives it.
///
/// The two entities are created and despawned together. Nothing outside the
/// sync step may write the visual transform.
#[derive(Clone, Copy, Debug)]
pub struct DynamicEntity {
    pub visual: Entity,
    pub body: Entity,
}

/// All dynamic boxes, indexed by spawn order.
#[derive(Resource, Default)]
pub struct DynamicRegistry {
    pub entries: Vec<DynamicEntity>,
}

impl DynamicRegistry {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// User action: re-randomize every box's drop position.
#[derive(Message, Clone)]
pub struct ResetBoxes;

// ============================================================================
// Spawning
// ============================================================================

/// Integer drop coordinate in `[-70, 70]`, floor-based and inclusive.
pub fn sample_drop_coord(rng: &mut impl Rng) -> f32 {
    (rng.gen_range(0..=2 * DROP_HALF_RANGE) - DROP_HALF_RANGE) as f32
}

/// Drop position for the box at `index`: random column, stacked height.
pub fn drop_position(rng: &mut impl Rng, index: usize) -> Vec3 {
    Vec3::new(
        sample_drop_coord(rng),
        DROP_BASE_HEIGHT + index as f32 * DROP_STACK_STEP,
        sample_drop_coord(rng),
    )
}

/// Spawn all box pairs and return the registry recording them.
///
/// The caller inserts the returned registry as a resource.
pub fn spawn_falling_boxes(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    rng: &mut impl Rng,
) -> DynamicRegistry {
    let mesh = meshes.add(Cuboid::new(BOX_SIZE, BOX_SIZE, BOX_SIZE));
    let material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.8, 0.0, 0.0),
        perceptual_roughness: 0.9,
        ..default()
    });

    let mut registry = DynamicRegistry::default();
    for index in 0..BOX_COUNT {
        let start = drop_position(rng, index);

        let body = commands
            .spawn((
                BoxBody,
                RigidBody::Dynamic,
                Collider::cuboid(BOX_SIZE, BOX_SIZE, BOX_SIZE),
                Mass(BOX_MASS),
                Position(start),
                Rotation::default(),
                Transform::from_translation(start),
                Name::new("BoxBody"),
            ))
            .id();

        let visual = commands
            .spawn((
                BoxVisual,
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_translation(start),
                Name::new("Box"),
            ))
            .id();

        registry.entries.push(DynamicEntity { visual, body });
    }

    info!(count = registry.len(), "spawned falling boxes");
    registry
}

// ============================================================================
// Systems
// ============================================================================

/// Copy each body's position and rotation onto its paired visual node.
///
/// Runs for every registry entry every frame, visible or not, after the
/// physics sync set. Direct assignment, no interpolation.
pub fn sync_dynamic_visuals(
    registry: Res<DynamicRegistry>,
    bodies: Query<(&Position, &Rotation), With<BoxBody>>,
    mut visuals: Query<&mut Transform, With<BoxVisual>>,
) {
    for entry in &registry.entries {
        let Ok((position, rotation)) = bodies.get(entry.body) else {
            continue;
        };
        let Ok(mut transform) = visuals.get_mut(entry.visual) else {
            continue;
        };
        transform.translation = position.0;
        transform.rotation = rotation.0;
    }
}

/// Teleport every body to a fresh drop position.
///
/// Velocity and orientation are deliberately left untouched: boxes resume
/// falling with whatever spin and speed the solver last gave them.
pub fn handle_reset_boxes(
    mut messages: MessageReader<ResetBoxes>,
    registry: Res<DynamicRegistry>,
    mut bodies: Query<&mut Position, With<BoxBody>>,
) {
    if messages.is_empty() {
        return;
    }
    messages.clear();

    let mut rng = rand::thread_rng();
    for (index, entry) in registry.entries.iter().enumerate() {
        let Ok(mut position) = bodies.get_mut(entry.body) else {
            continue;
        };
        position.0 = drop_position(&mut rng, index);
    }

    info!(count = registry.len(), "reset falling boxes");
}

// ============================================================================
// Plugin
// ============================================================================

/// Registry bookkeeping: reset handling and the per-frame transform sync.
pub struct RegistryPlugin;

impl Plugin for RegistryPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DynamicRegistry>()
            .add_message::<ResetBoxes>()
            .add_systems(Update, handle_reset_boxes)
            .add_systems(PostUpdate, sync_dynamic_visuals.after(PhysicsSystems::Writeback));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn drop_coords_are_integral_and_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let c = sample_drop_coord(&mut rng);
            assert!((-70.0..=70.0).contains(&c));
            assert_eq!(c, c.floor());
        }
    }

    #[test]
    fn drop_heights_stack_by_index() {
        let mut rng = StdRng::seed_from_u64(7);
        for index in 0..BOX_COUNT {
            let p = drop_position(&mut rng, index);
            assert_eq!(p.y, 80.0 + index as f32 * 10.0);
        }
    }
}
