use bevy::prelude::*;
use camrig_core::diagnostics::{Diagnostics, DiagnosticsCfg};
use camrig_core::{
    AutoRewind, BindingReport, BindingSet, HostEnvironment, PlayableDirector, Rig, RigFrame,
    TimelineBindingResolver,
};

/// The rig stepped once per frame in `PostUpdate`.
#[derive(Resource, Default)]
pub struct CamRig(pub Rig);

/// Report from the most recent rig step.
#[derive(Resource, Default)]
pub struct LastRigFrame(pub Option<RigFrame>);

/// Optional timeline playback. Tracks are (re)bound whenever the resolver is
/// unresolved, then the director advances by the frame delta and the
/// auto-rewind watcher runs. Rewinding is off until `rewind` is enabled.
#[derive(Resource)]
pub struct TimelineHost {
    pub director: PlayableDirector,
    pub resolver: TimelineBindingResolver,
    pub rewind: AutoRewind,
    pub diagnostics: Diagnostics,
    /// Outcome of the latest binding pass.
    pub last_report: Option<BindingReport>,
}

impl TimelineHost {
    pub fn new(director: PlayableDirector, bindings: BindingSet) -> Self {
        Self {
            director,
            resolver: TimelineBindingResolver::new(bindings),
            rewind: AutoRewind::new(HostEnvironment::Runtime),
            diagnostics: Diagnostics::new(DiagnosticsCfg::default()),
            last_report: None,
        }
    }
}
