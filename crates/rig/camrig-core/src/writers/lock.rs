//! Per-axis position/rotation lock.
//!
//! The same component runs either as a late-update writer on a scene object
//! or as a camera extension at the `Finalize` stage. In both positions it
//! only touches locked axes and leaves every other axis as computed upstream.

use std::any::Any;

use crate::camera::{CameraExtension, CameraState, PipelineStage};
use crate::config::AxisLockConfig;
use crate::spatial::{Axis, SpatialState};
use crate::writers::{FrameWriter, WriterCtx};

#[derive(Debug, Clone, Default)]
pub struct AxisLocker {
    pub config: AxisLockConfig,
}

impl AxisLocker {
    pub fn new(config: AxisLockConfig) -> Self {
        Self { config }
    }

    pub fn apply_position(&self, position: &mut [f32; 3]) {
        for (value, slot) in position.iter_mut().zip(self.config.position.iter()) {
            if slot.locked {
                *value = slot.value;
            }
        }
    }

    pub fn apply_rotation(&self, rotation: &mut [f32; 3]) {
        for (value, slot) in rotation.iter_mut().zip(self.config.rotation.iter()) {
            if slot.locked {
                *value = slot.value;
            }
        }
    }

    pub fn apply(&self, state: &mut SpatialState) {
        self.apply_position(&mut state.position);
        self.apply_rotation(&mut state.rotation);
    }

    /// Activation-time snapshot, honouring the snapshot flags.
    pub fn snapshot(&mut self, owner: &SpatialState) {
        if self.config.snapshot_position_on_activate {
            self.lock_current_position(owner);
        }
        if self.config.snapshot_rotation_on_activate {
            self.lock_current_rotation(owner);
        }
    }

    /// Use the given position as the fixed values. Lock flags are untouched.
    pub fn lock_current_position(&mut self, current: &SpatialState) {
        for (slot, value) in self.config.position.iter_mut().zip(current.position) {
            slot.value = value;
        }
    }

    pub fn lock_current_rotation(&mut self, current: &SpatialState) {
        for (slot, value) in self.config.rotation.iter_mut().zip(current.rotation) {
            slot.value = value;
        }
    }

    pub fn set_fixed_position(&mut self, axis: Axis, value: f32) {
        self.config.position[axis.index()].value = value;
    }

    pub fn set_fixed_rotation(&mut self, axis: Axis, value: f32) {
        self.config.rotation[axis.index()].value = value;
    }

    pub fn set_position_locked(&mut self, axis: Axis, locked: bool) {
        self.config.position[axis.index()].locked = locked;
    }

    pub fn set_rotation_locked(&mut self, axis: Axis, locked: bool) {
        self.config.rotation[axis.index()].locked = locked;
    }

    pub fn fixed_position(&self) -> [f32; 3] {
        self.config.position.map(|slot| slot.value)
    }

    pub fn fixed_rotation(&self) -> [f32; 3] {
        self.config.rotation.map(|slot| slot.value)
    }

    /// Editor convenience: after the fixed values were edited, push all of
    /// them into the owner state so the scene shows what the lock will hold.
    /// Does nothing unless `sync_on_validate` is set. Returns whether `owner`
    /// was modified.
    pub fn validate(&self, owner: &mut SpatialState) -> bool {
        if !self.config.sync_on_validate {
            return false;
        }
        owner.position = self.fixed_position();
        owner.rotation = self.fixed_rotation();
        true
    }
}

impl FrameWriter for AxisLocker {
    fn activate(&mut self, ctx: &mut WriterCtx<'_>) {
        if let Some(owner) = ctx.scene.state(ctx.owner) {
            self.snapshot(&owner);
        }
    }

    fn late_update(&mut self, ctx: &mut WriterCtx<'_>) {
        let Some(mut state) = ctx.scene.state(ctx.owner) else {
            return;
        };
        self.apply(&mut state);
        ctx.scene.set_state(ctx.owner, state);
    }

    fn type_name(&self) -> &'static str {
        "AxisLocker"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl CameraExtension for AxisLocker {
    fn on_activate(&mut self, owner: &SpatialState) {
        self.snapshot(owner);
    }

    fn post_pipeline_stage(&mut self, stage: PipelineStage, state: &mut CameraState, _dt: f32) {
        if stage != PipelineStage::Finalize {
            return;
        }
        self.apply_position(&mut state.raw_position);
        self.apply_rotation(&mut state.raw_orientation);
    }

    fn type_name(&self) -> &'static str {
        "AxisLocker"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
