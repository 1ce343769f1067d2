//! Minimal virtual-camera pipeline.
//!
//! Each tick a camera seeds a [`CameraState`] from its owner object, runs the
//! stages in [`PipelineStage::ORDER`] and, after every stage, hands the state
//! to its extensions by mutable reference. Whatever the last extension leaves
//! in the state is committed to the owner (and the output object, if any).

pub mod targets;

use std::any::Any;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::{Result, RigError};
use crate::ids::ObjectId;
use crate::scene::SceneHost;
use crate::spatial::{add, look_rotation, sub, SpatialState};

pub use targets::CameraTargetResolver;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PipelineStage {
    /// Positions the camera (follow).
    Body,
    /// Orients the camera (look-at).
    Aim,
    Noise,
    /// Last chance to adjust before the state is consumed.
    Finalize,
}

impl PipelineStage {
    pub const ORDER: [PipelineStage; 4] = [
        PipelineStage::Body,
        PipelineStage::Aim,
        PipelineStage::Noise,
        PipelineStage::Finalize,
    ];
}

/// Intermediate camera record passed through the stages.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraState {
    pub raw_position: [f32; 3],
    /// Euler angles in degrees, same convention as [`SpatialState::rotation`].
    pub raw_orientation: [f32; 3],
}

impl From<SpatialState> for CameraState {
    fn from(s: SpatialState) -> Self {
        Self {
            raw_position: s.position,
            raw_orientation: s.rotation,
        }
    }
}

impl From<CameraState> for SpatialState {
    fn from(c: CameraState) -> Self {
        SpatialState::new(c.raw_position, c.raw_orientation)
    }
}

/// Observer/modifier hooked in after every pipeline stage.
pub trait CameraExtension: fmt::Debug + Send + Sync {
    /// Called when the owning camera activates, with the owner's state.
    fn on_activate(&mut self, _owner: &SpatialState) {}

    fn post_pipeline_stage(&mut self, stage: PipelineStage, state: &mut CameraState, dt: f32);

    fn type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}

#[derive(Debug)]
struct ExtensionSlot {
    enabled: bool,
    ext: Box<dyn CameraExtension>,
}

#[derive(Debug)]
pub struct VirtualCamera {
    pub id: String,
    /// Object carrying the camera; its state seeds every tick.
    pub owner: ObjectId,
    /// Render camera that receives the final state.
    pub output: Option<ObjectId>,
    pub follow_offset: [f32; 3],
    pub follow: Option<ObjectId>,
    pub look_at: Option<ObjectId>,
    pub target_resolver: CameraTargetResolver,
    extensions: IndexMap<String, ExtensionSlot>,
    last_state: Option<CameraState>,
    inert: bool,
}

impl VirtualCamera {
    pub fn new(id: impl Into<String>, owner: ObjectId) -> Self {
        Self {
            id: id.into(),
            owner,
            output: None,
            follow_offset: [0.0; 3],
            follow: None,
            look_at: None,
            target_resolver: CameraTargetResolver::default(),
            extensions: IndexMap::new(),
            last_state: None,
            inert: false,
        }
    }

    pub fn with_output(mut self, output: ObjectId) -> Self {
        self.output = Some(output);
        self
    }

    pub fn with_follow_offset(mut self, offset: [f32; 3]) -> Self {
        self.follow_offset = offset;
        self
    }

    pub fn with_targets(mut self, resolver: CameraTargetResolver) -> Self {
        self.target_resolver = resolver;
        self
    }

    /// Append an extension; extensions run in the order they were added.
    pub fn add_extension(
        &mut self,
        id: impl Into<String>,
        ext: Box<dyn CameraExtension>,
    ) -> Result<()> {
        let id = id.into();
        if self.extensions.contains_key(&id) {
            return Err(RigError::DuplicateId(id));
        }
        self.extensions.insert(id, ExtensionSlot { enabled: true, ext });
        Ok(())
    }

    /// Disabled extensions are skipped from the next stage on.
    pub fn set_extension_enabled(&mut self, id: &str, enabled: bool) -> Result<()> {
        match self.extensions.get_mut(id) {
            Some(slot) => {
                slot.enabled = enabled;
                Ok(())
            }
            None => Err(self.unknown_extension(id)),
        }
    }

    pub fn extension_mut<T: CameraExtension + 'static>(&mut self, id: &str) -> Result<&mut T> {
        if !self.extensions.contains_key(id) {
            return Err(self.unknown_extension(id));
        }
        let slot = &mut self.extensions[id];
        slot.ext
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(RigError::WrongComponentType {
                id: id.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    pub fn extension<T: CameraExtension + 'static>(&self, id: &str) -> Option<&T> {
        self.extensions
            .get(id)
            .and_then(|slot| slot.ext.as_any().downcast_ref::<T>())
    }

    fn unknown_extension(&self, id: &str) -> RigError {
        RigError::UnknownExtension {
            camera: self.id.clone(),
            extension: id.to_string(),
        }
    }

    /// State committed by the most recent tick.
    pub fn last_state(&self) -> Option<CameraState> {
        self.last_state
    }

    /// True when the last activation found no owner object.
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// Resolve follow/look-at names and let extensions snapshot the owner.
    pub fn activate(&mut self, scene: &dyn SceneHost, diagnostics: &mut Diagnostics) {
        let source = format!("VirtualCamera({})", self.id);
        let Some(owner) = scene.state(self.owner) else {
            diagnostics.error(
                DiagnosticKind::MissingUpstreamComponent,
                &source,
                format!("owner {} is missing; camera stays inert", self.owner),
            );
            self.inert = true;
            return;
        };
        self.inert = false;

        let resolver = std::mem::take(&mut self.target_resolver);
        resolver.resolve(Some(&mut *self), scene, diagnostics);
        self.target_resolver = resolver;

        for slot in self.extensions.values_mut() {
            slot.ext.on_activate(&owner);
        }
    }

    /// Run the pipeline once and commit the result. Returns the committed
    /// state, or `None` when the camera is inert or its owner is gone.
    pub fn update(&mut self, scene: &mut dyn SceneHost, dt: f32) -> Option<CameraState> {
        if self.inert {
            return None;
        }
        let owner = scene.state(self.owner)?;
        let mut state = CameraState::from(owner);

        for stage in PipelineStage::ORDER {
            match stage {
                PipelineStage::Body => {
                    if let Some(target) = self.follow.and_then(|id| scene.state(id)) {
                        state.raw_position = add(target.position, self.follow_offset);
                    }
                }
                PipelineStage::Aim => {
                    if let Some(target) = self.look_at.and_then(|id| scene.state(id)) {
                        if let Some(rot) = look_rotation(sub(target.position, state.raw_position)) {
                            state.raw_orientation = rot;
                        }
                    }
                }
                PipelineStage::Noise | PipelineStage::Finalize => {}
            }
            for slot in self.extensions.values_mut() {
                if slot.enabled {
                    slot.ext.post_pipeline_stage(stage, &mut state, dt);
                }
            }
        }

        let committed = SpatialState::from(state);
        scene.set_state(self.owner, committed);
        if let Some(output) = self.output {
            scene.set_state(output, committed);
        }
        self.last_state = Some(state);
        Some(state)
    }
}
