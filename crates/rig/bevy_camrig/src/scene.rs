use bevy::prelude::*;
use camrig_core::{ComponentKind, ObjectId, SceneLookup, SpatialState, SpatialStore};

use crate::components::{Animator, RigTag};

/// Handle the rig uses for `entity`.
pub fn object_id(entity: Entity) -> ObjectId {
    ObjectId(entity.to_bits())
}

/// Inverse of [`object_id`]. Ids that were never produced by it map to `None`.
pub fn entity(id: ObjectId) -> Option<Entity> {
    Entity::try_from_bits(id.0).ok()
}

/// Rig rotations face +Z, Bevy transforms face -Z (`Transform::forward`).
/// A half turn about local Y maps one onto the other and keeps up as up.
fn half_turn() -> Quat {
    Quat::from_rotation_y(std::f32::consts::PI)
}

/// Degrees, intrinsic Y-X-Z, as stored in [`SpatialState::rotation`], to a
/// Bevy rotation whose `forward()` is the rig's forward.
pub fn euler_to_quat(rotation: [f32; 3]) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        rotation[1].to_radians(),
        rotation[0].to_radians(),
        rotation[2].to_radians(),
    ) * half_turn()
}

pub fn quat_to_euler(rotation: Quat) -> [f32; 3] {
    let (y, x, z) = (rotation * half_turn().inverse()).to_euler(EulerRot::YXZ);
    [x.to_degrees(), y.to_degrees(), z.to_degrees()]
}

pub fn spatial_from_transform(tf: &Transform) -> SpatialState {
    SpatialState::new(tf.translation.to_array(), quat_to_euler(tf.rotation))
}

/// Write position and rotation, keeping scale.
pub fn apply_spatial(tf: &mut Transform, state: &SpatialState) {
    tf.translation = Vec3::from_array(state.position);
    tf.rotation = euler_to_quat(state.rotation);
}

/// Scene view over a Bevy [`World`]. Objects are entities with a local
/// [`Transform`]; the rig writes before transform propagation, so for root
/// entities this is also their world-space pose.
pub struct WorldScene<'w> {
    world: &'w mut World,
}

impl<'w> WorldScene<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }
}

impl SceneLookup for WorldScene<'_> {
    /// Lowest entity wins when several share a name.
    fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.world
            .iter_entities()
            .filter(|e| e.get::<Name>().is_some_and(|n| n.as_str() == name))
            .map(|e| e.id())
            .min()
            .map(object_id)
    }

    fn find_by_tag(&self, tag: &str) -> Option<ObjectId> {
        self.world
            .iter_entities()
            .filter(|e| e.get::<RigTag>().is_some_and(|t| t.0 == tag))
            .map(|e| e.id())
            .min()
            .map(object_id)
    }
}

impl SpatialStore for WorldScene<'_> {
    fn state(&self, id: ObjectId) -> Option<SpatialState> {
        let tf = self.world.get::<Transform>(entity(id)?)?;
        Some(spatial_from_transform(tf))
    }

    fn set_state(&mut self, id: ObjectId, state: SpatialState) -> bool {
        let Some(e) = entity(id) else {
            return false;
        };
        match self.world.get_mut::<Transform>(e) {
            Some(mut tf) => {
                apply_spatial(&mut tf, &state);
                true
            }
            None => false,
        }
    }

    fn has_component(&self, id: ObjectId, kind: &ComponentKind) -> bool {
        let Some(e) = entity(id) else {
            return false;
        };
        match kind {
            ComponentKind::Animator => self.world.get::<Animator>(e).is_some(),
            ComponentKind::Other(name) => {
                log::debug!("[WorldScene] no mapping for component '{name}'");
                false
            }
        }
    }
}
