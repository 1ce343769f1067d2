//! Target resolution: authored reference -> live handle, once per activation.

use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::ids::ObjectId;
use crate::scene::SceneLookup;

/// How a component finds its target.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetSpec {
    /// A handle wired up by the host.
    Direct(Option<ObjectId>),
    ByName(String),
    ByTag(String),
}

impl Default for TargetSpec {
    fn default() -> Self {
        TargetSpec::Direct(None)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TargetReference {
    #[default]
    Unresolved,
    Resolved(ObjectId),
    /// Resolution ran and found nothing. Not retried until reactivation.
    Absent,
}

impl TargetReference {
    pub fn handle(self) -> Option<ObjectId> {
        match self {
            TargetReference::Resolved(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_resolved(self) -> bool {
        matches!(self, TargetReference::Resolved(_))
    }
}

/// Resolve `spec` against the scene. A blank name or tag is treated as "not
/// configured" and yields `Absent` without a warning; a lookup miss records a
/// `LookupFailure` warning attributed to `source`.
pub fn resolve_target<L: SceneLookup + ?Sized>(
    spec: &TargetSpec,
    lookup: &L,
    diagnostics: &mut Diagnostics,
    source: &str,
) -> TargetReference {
    match spec {
        TargetSpec::Direct(Some(id)) => TargetReference::Resolved(*id),
        TargetSpec::Direct(None) => TargetReference::Absent,
        TargetSpec::ByName(name) => {
            if name.is_empty() {
                return TargetReference::Absent;
            }
            match lookup.find_by_name(name) {
                Some(id) => TargetReference::Resolved(id),
                None => {
                    diagnostics.warn(
                        DiagnosticKind::LookupFailure,
                        source,
                        format!("'{name}' not found"),
                    );
                    TargetReference::Absent
                }
            }
        }
        TargetSpec::ByTag(tag) => {
            if tag.is_empty() {
                return TargetReference::Absent;
            }
            match lookup.find_by_tag(tag) {
                Some(id) => TargetReference::Resolved(id),
                None => {
                    diagnostics.warn(
                        DiagnosticKind::LookupFailure,
                        source,
                        format!("tag '{tag}' not found"),
                    );
                    TargetReference::Absent
                }
            }
        }
    }
}
