use serde::{Deserialize, Serialize};

use crate::camera::CameraState;
use crate::diagnostics::DiagnosticKind;
use crate::rig::{Activation, Rig, RigFrame};
use crate::scene::SceneHost;
use crate::writers::WriterCtx;

/// Stages of one rig frame. The host runs its own simulation before calling
/// [`Rig::step`]; rendering consumes the committed states afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrameStage {
    /// Components registered or re-activated since the last frame resolve
    /// their targets and take their snapshots.
    Activate,
    /// Writers on scene objects, in registration order.
    LateUpdate,
    /// Virtual cameras, in registration order, each running its stage list.
    CameraPipeline,
}

impl FrameStage {
    pub const ORDER: [FrameStage; 3] = [
        FrameStage::Activate,
        FrameStage::LateUpdate,
        FrameStage::CameraPipeline,
    ];
}

/// Run one frame:
///   Activate -> LateUpdate -> CameraPipeline -> frame
pub fn run_frame(rig: &mut Rig, scene: &mut dyn SceneHost, dt: f32) -> RigFrame {
    rig.epoch = rig.epoch.wrapping_add(1);
    let mut cameras = Vec::new();

    for stage in FrameStage::ORDER {
        match stage {
            FrameStage::Activate => run_activations(rig, scene, dt),
            FrameStage::LateUpdate => run_late_update(rig, scene, dt),
            FrameStage::CameraPipeline => run_cameras(rig, scene, dt, &mut cameras),
        }
    }

    RigFrame {
        epoch: rig.epoch,
        dt,
        cameras,
        diagnostics: rig.diagnostics.drain(),
    }
}

fn run_activations(rig: &mut Rig, scene: &mut dyn SceneHost, dt: f32) {
    for slot in rig.writers.values_mut() {
        if slot.activation != Activation::Pending {
            continue;
        }
        slot.activation = Activation::Active;
        // No owner: nothing to snapshot, and every late update is a no-op.
        if scene.state(slot.owner).is_none() {
            rig.diagnostics.error(
                DiagnosticKind::MissingUpstreamComponent,
                &slot.label,
                format!("owner {} is missing; writer stays inert", slot.owner),
            );
            continue;
        }
        let mut ctx = WriterCtx {
            scene: &mut *scene,
            diagnostics: &mut rig.diagnostics,
            owner: slot.owner,
            source: &slot.label,
            dt,
        };
        slot.writer.activate(&mut ctx);
    }

    for slot in rig.cameras.values_mut() {
        if slot.activation != Activation::Pending {
            continue;
        }
        slot.camera.activate(&*scene, &mut rig.diagnostics);
        slot.activation = Activation::Active;
    }
}

fn run_late_update(rig: &mut Rig, scene: &mut dyn SceneHost, dt: f32) {
    for slot in rig.writers.values_mut() {
        if slot.activation != Activation::Active {
            continue;
        }
        let mut ctx = WriterCtx {
            scene: &mut *scene,
            diagnostics: &mut rig.diagnostics,
            owner: slot.owner,
            source: &slot.label,
            dt,
        };
        slot.writer.late_update(&mut ctx);
    }
}

fn run_cameras(
    rig: &mut Rig,
    scene: &mut dyn SceneHost,
    dt: f32,
    out: &mut Vec<(String, CameraState)>,
) {
    for (id, slot) in rig.cameras.iter_mut() {
        if slot.activation != Activation::Active {
            continue;
        }
        if let Some(state) = slot.camera.update(&mut *scene, dt) {
            out.push((id.clone(), state));
        }
    }
}
