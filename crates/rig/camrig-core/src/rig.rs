//! The rig: an ordered registry of writers and virtual cameras.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::camera::{CameraExtension, CameraState, CameraTargetResolver, VirtualCamera};
use crate::config::{ExtensionKind, RigConfig, WriterKind};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsCfg};
use crate::error::{Result, RigError};
use crate::ids::ObjectId;
use crate::scene::{SceneHost, SceneLookup};
use crate::writers::{AxisLocker, AxisScaler, FrameWriter, TransformProxy};

/// Where a component is in its activation lifecycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Activation {
    /// Activation runs at the start of the next frame.
    Pending,
    Active,
    Inactive,
}

#[derive(Debug)]
pub(crate) struct WriterSlot {
    pub(crate) owner: ObjectId,
    pub(crate) label: String,
    pub(crate) activation: Activation,
    pub(crate) writer: Box<dyn FrameWriter>,
}

#[derive(Debug)]
pub(crate) struct CameraSlot {
    pub(crate) activation: Activation,
    pub(crate) camera: VirtualCamera,
}

/// What happened during one [`Rig::step`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigFrame {
    pub epoch: u64,
    pub dt: f32,
    /// Committed camera states, in camera registration order.
    pub cameras: Vec<(String, CameraState)>,
    /// Diagnostics recorded since the previous frame.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug)]
pub struct Rig {
    pub epoch: u64,
    pub(crate) writers: IndexMap<String, WriterSlot>,
    pub(crate) cameras: IndexMap<String, CameraSlot>,
    pub(crate) diagnostics: Diagnostics,
}

impl Default for Rig {
    fn default() -> Self {
        Self::new(DiagnosticsCfg::default())
    }
}

impl Rig {
    pub fn new(diagnostics: DiagnosticsCfg) -> Self {
        Self {
            epoch: 0,
            writers: IndexMap::new(),
            cameras: IndexMap::new(),
            diagnostics: Diagnostics::new(diagnostics),
        }
    }

    /// Build a rig from authored config. Owner and output objects are looked
    /// up by name now; follow/look-at and proxy targets resolve on activation.
    pub fn from_config<L: SceneLookup + ?Sized>(cfg: &RigConfig, lookup: &L) -> Result<Self> {
        let find = |name: &str| {
            lookup
                .find_by_name(name)
                .ok_or_else(|| RigError::UnknownObject(name.to_string()))
        };

        let mut rig = Rig::new(cfg.diagnostics.clone());
        for w in cfg.writers.iter() {
            let owner = find(&w.owner)?;
            let writer: Box<dyn FrameWriter> = match &w.kind {
                WriterKind::TransformProxy(p) => Box::new(TransformProxy::new(p.clone())),
                WriterKind::AxisLock(l) => Box::new(AxisLocker::new(l.clone())),
            };
            rig.add_writer(w.id.clone(), owner, writer)?;
        }

        for c in cfg.cameras.iter() {
            let owner = find(&c.owner)?;
            let mut cam = VirtualCamera::new(c.id.clone(), owner)
                .with_follow_offset(c.follow_offset)
                .with_targets(CameraTargetResolver::new(c.targets.clone()));
            if let Some(output) = c.output.as_deref() {
                cam = cam.with_output(find(output)?);
            }
            for e in c.extensions.iter() {
                let ext: Box<dyn CameraExtension> = match &e.kind {
                    ExtensionKind::AxisLock(l) => Box::new(AxisLocker::new(l.clone())),
                    ExtensionKind::AxisScale(s) => Box::new(AxisScaler::new(s.clone())),
                };
                cam.add_extension(e.id.clone(), ext)?;
            }
            rig.add_camera(cam)?;
        }
        Ok(rig)
    }

    fn check_free(&self, id: &str) -> Result<()> {
        if self.writers.contains_key(id) || self.cameras.contains_key(id) {
            return Err(RigError::DuplicateId(id.to_string()));
        }
        Ok(())
    }

    /// Register a writer driving `owner`. It activates at the start of the next step.
    pub fn add_writer(
        &mut self,
        id: impl Into<String>,
        owner: ObjectId,
        writer: Box<dyn FrameWriter>,
    ) -> Result<()> {
        let id = id.into();
        self.check_free(&id)?;
        let label = format!("{}({})", writer.type_name(), id);
        self.writers.insert(
            id,
            WriterSlot {
                owner,
                label,
                activation: Activation::Pending,
                writer,
            },
        );
        Ok(())
    }

    pub fn add_camera(&mut self, camera: VirtualCamera) -> Result<()> {
        self.check_free(&camera.id)?;
        self.cameras.insert(
            camera.id.clone(),
            CameraSlot {
                activation: Activation::Pending,
                camera,
            },
        );
        Ok(())
    }

    fn activation_mut(&mut self, id: &str) -> Result<&mut Activation> {
        if let Some(slot) = self.writers.get_mut(id) {
            return Ok(&mut slot.activation);
        }
        match self.cameras.get_mut(id) {
            Some(slot) => Ok(&mut slot.activation),
            None => Err(RigError::UnknownComponent(id.to_string())),
        }
    }

    /// (Re)activate a writer or camera at the start of the next step. This is
    /// the only way a failed target resolution is retried.
    pub fn activate(&mut self, id: &str) -> Result<()> {
        *self.activation_mut(id)? = Activation::Pending;
        Ok(())
    }

    /// Stop a writer or camera. No further writes happen from this point on.
    pub fn deactivate(&mut self, id: &str) -> Result<()> {
        *self.activation_mut(id)? = Activation::Inactive;
        Ok(())
    }

    pub fn is_active(&self, id: &str) -> bool {
        let activation = self
            .writers
            .get(id)
            .map(|s| s.activation)
            .or_else(|| self.cameras.get(id).map(|s| s.activation));
        activation == Some(Activation::Active)
    }

    pub fn writer<T: FrameWriter + 'static>(&self, id: &str) -> Option<&T> {
        self.writers
            .get(id)
            .and_then(|slot| slot.writer.as_any().downcast_ref::<T>())
    }

    pub fn writer_mut<T: FrameWriter + 'static>(&mut self, id: &str) -> Result<&mut T> {
        let slot = self
            .writers
            .get_mut(id)
            .ok_or_else(|| RigError::UnknownWriter(id.to_string()))?;
        slot.writer
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(RigError::WrongComponentType {
                id: id.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Object a writer drives.
    pub fn writer_owner(&self, id: &str) -> Option<ObjectId> {
        self.writers.get(id).map(|slot| slot.owner)
    }

    pub fn camera(&self, id: &str) -> Option<&VirtualCamera> {
        self.cameras.get(id).map(|slot| &slot.camera)
    }

    pub fn camera_mut(&mut self, id: &str) -> Result<&mut VirtualCamera> {
        self.cameras
            .get_mut(id)
            .map(|slot| &mut slot.camera)
            .ok_or_else(|| RigError::UnknownCamera(id.to_string()))
    }

    pub fn extension_mut<T: CameraExtension + 'static>(
        &mut self,
        camera: &str,
        extension: &str,
    ) -> Result<&mut T> {
        self.camera_mut(camera)?.extension_mut::<T>(extension)
    }

    /// "Lock current value" for an axis-lock writer: take the owner's current
    /// position and rotation as the fixed values.
    pub fn lock_current(&mut self, id: &str, scene: &dyn SceneHost) -> Result<()> {
        let owner = self
            .writer_owner(id)
            .ok_or_else(|| RigError::UnknownWriter(id.to_string()))?;
        let locker = self.writer_mut::<AxisLocker>(id)?;
        if let Some(state) = scene.state(owner) {
            locker.lock_current_position(&state);
            locker.lock_current_rotation(&state);
        }
        Ok(())
    }

    /// Same as [`Rig::lock_current`] for an axis-lock extension, using the
    /// camera owner's state.
    pub fn lock_extension_current(
        &mut self,
        camera: &str,
        extension: &str,
        scene: &dyn SceneHost,
    ) -> Result<()> {
        let cam = self.camera_mut(camera)?;
        let owner = cam.owner;
        let locker = cam.extension_mut::<AxisLocker>(extension)?;
        if let Some(state) = scene.state(owner) {
            locker.lock_current_position(&state);
            locker.lock_current_rotation(&state);
        }
        Ok(())
    }

    /// Run an axis-lock writer's `validate` against its owner. Returns whether
    /// the owner state was rewritten.
    pub fn validate(&mut self, id: &str, scene: &mut dyn SceneHost) -> Result<bool> {
        let owner = self
            .writer_owner(id)
            .ok_or_else(|| RigError::UnknownWriter(id.to_string()))?;
        let locker = self.writer_mut::<AxisLocker>(id)?;
        let Some(mut state) = scene.state(owner) else {
            return Ok(false);
        };
        if locker.validate(&mut state) {
            return Ok(scene.set_state(owner, state));
        }
        Ok(false)
    }

    pub fn validate_extension(
        &mut self,
        camera: &str,
        extension: &str,
        scene: &mut dyn SceneHost,
    ) -> Result<bool> {
        let cam = self.camera_mut(camera)?;
        let owner = cam.owner;
        let locker = cam.extension_mut::<AxisLocker>(extension)?;
        let Some(mut state) = scene.state(owner) else {
            return Ok(false);
        };
        if locker.validate(&mut state) {
            return Ok(scene.set_state(owner, state));
        }
        Ok(false)
    }

    /// Re-run follow/look-at resolution for one camera right away. An unknown
    /// camera is reported as a missing upstream component.
    pub fn resolve_camera_targets(&mut self, id: &str, scene: &dyn SceneHost) {
        match self.cameras.get_mut(id) {
            Some(slot) => {
                let resolver = slot.camera.target_resolver.clone();
                resolver.resolve(Some(&mut slot.camera), scene, &mut self.diagnostics);
            }
            None => self.diagnostics.error(
                DiagnosticKind::MissingUpstreamComponent,
                "CameraTargetResolver",
                format!("virtual camera '{id}' not found"),
            ),
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        self.diagnostics.drain()
    }

    /// Advance one frame: pending activations, late-update writers, then the
    /// camera pipelines.
    pub fn step(&mut self, scene: &mut dyn SceneHost, dt: f32) -> RigFrame {
        crate::scheduler::run_frame(self, scene, dt)
    }
}
