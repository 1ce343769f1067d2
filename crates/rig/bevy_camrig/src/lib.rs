use bevy::prelude::*;
use bevy::transform::TransformSystem;

pub mod components;
pub mod resources;
pub mod scene;
pub mod systems;

pub use components::{Animator, RigTag};
pub use resources::{CamRig, LastRigFrame, TimelineHost};
pub use scene::{entity, object_id, WorldScene};

/// Systems that run the rig. Ordered after gameplay (`Update`) and before
/// transform propagation so rendering sees the committed camera states.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CamRigSet;

pub struct CamRigPlugin;

impl Plugin for CamRigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CamRig>()
            .init_resource::<LastRigFrame>()
            .configure_sets(
                PostUpdate,
                CamRigSet.before(TransformSystem::TransformPropagate),
            )
            .add_systems(
                PostUpdate,
                (systems::timeline_system, systems::step_rig_system)
                    .chain()
                    .in_set(CamRigSet),
            );
    }
}
