//! Follow / look-at assignment by object name.

use crate::camera::VirtualCamera;
use crate::config::CameraTargetConfig;
use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::scene::SceneLookup;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraTargetResolver {
    pub config: CameraTargetConfig,
}

impl CameraTargetResolver {
    pub fn new(config: CameraTargetConfig) -> Self {
        Self { config }
    }

    /// Look up the configured names and assign them to `camera`. A miss keeps
    /// the camera's current reference and records a warning. Without a camera
    /// nothing is looked up.
    pub fn resolve<L: SceneLookup + ?Sized>(
        &self,
        camera: Option<&mut VirtualCamera>,
        lookup: &L,
        diagnostics: &mut Diagnostics,
    ) {
        let Some(camera) = camera else {
            diagnostics.error(
                DiagnosticKind::MissingUpstreamComponent,
                "CameraTargetResolver",
                "virtual camera not found",
            );
            return;
        };
        let source = format!("CameraTargetResolver({})", camera.id);

        if let Some(name) = self.config.follow.as_deref().filter(|n| !n.is_empty()) {
            match lookup.find_by_name(name) {
                Some(id) => camera.follow = Some(id),
                None => diagnostics.warn(
                    DiagnosticKind::LookupFailure,
                    &source,
                    format!("follow target '{name}' not found"),
                ),
            }
        }

        if let Some(name) = self.config.look_at.as_deref().filter(|n| !n.is_empty()) {
            match lookup.find_by_name(name) {
                Some(id) => camera.look_at = Some(id),
                None => diagnostics.warn(
                    DiagnosticKind::LookupFailure,
                    &source,
                    format!("look-at target '{name}' not found"),
                ),
            }
        }
    }
}
