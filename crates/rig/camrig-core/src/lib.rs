//! CamRig Core (engine-agnostic)
//!
//! Name-resolved transform writers, a minimal virtual-camera pipeline with
//! post-stage extensions, and timeline track binding. Hosts implement the
//! [`SceneLookup`] / [`SpatialStore`] traits and drive a [`Rig`] once per
//! frame after their own simulation has run.

pub mod camera;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod ids;
pub mod resolver;
pub mod rig;
pub mod scene;
pub mod scheduler;
pub mod spatial;
pub mod timeline;
pub mod writers;

// Re-exports for consumers (adapters)
pub use camera::{CameraExtension, CameraState, CameraTargetResolver, PipelineStage, VirtualCamera};
pub use config::{
    AxisLockConfig, AxisScaleConfig, AxisSlot, CameraConfig, CameraTargetConfig, ExtensionConfig,
    ExtensionKind, ProxyConfig, RigConfig, WriterConfig, WriterKind,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, DiagnosticsCfg, Severity};
pub use error::{Result, RigError};
pub use ids::{ObjectId, TrackId};
pub use resolver::{resolve_target, TargetReference, TargetSpec};
pub use rig::{Rig, RigFrame};
pub use scene::{ComponentKind, MemoryScene, SceneHost, SceneLookup, SceneObject, SpatialStore};
pub use scheduler::FrameStage;
pub use spatial::{Axis, SpatialState};
pub use timeline::{
    AutoRewind, BindingReport, BindingSet, BindingTarget, Director, HostEnvironment, HostMode,
    PlayState, PlayableDirector, ResolverState, TimelineAsset, TimelineBindingResolver, TrackKind,
};
pub use writers::{AxisLocker, AxisScaler, FrameWriter, TransformProxy, WriterCtx};
