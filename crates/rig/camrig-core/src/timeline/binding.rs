//! Track -> scene object binding by name.
//!
//! The authored [`BindingSet`] maps a track's stream name to the name of the
//! scene object it should drive. Resolution looks each name up and binds the
//! object (or its animator, for animation tracks) on the director. A failed
//! lookup only affects its own track.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::diagnostics::{DiagnosticKind, Diagnostics};
use crate::error::Result;
use crate::scene::{ComponentKind, SceneHost};
use crate::timeline::{BindingTarget, Director, HostMode, TimelineAsset, TrackKind};

const SOURCE: &str = "TimelineBindingResolver";

/// Stream name some timelines give their marker track.
const MARKERS_STREAM: &str = "Markers";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingEntry {
    pub track_name: String,
    pub target_object_name: String,
}

/// Authored mapping, unique by track name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BindingSet {
    entries: IndexMap<String, String>,
}

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Later entries for the same track replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = BindingEntry>) -> Self {
        entries
            .into_iter()
            .map(|e| (e.track_name, e.target_object_name))
            .collect()
    }

    /// Returns the previous target name for the track, if any.
    pub fn insert(&mut self, track: impl Into<String>, target: impl Into<String>) -> Option<String> {
        self.entries.insert(track.into(), target.into())
    }

    pub fn get(&self, track: &str) -> Option<&str> {
        self.entries.get(track).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn entries(&self) -> Vec<BindingEntry> {
        self.iter()
            .map(|(track, target)| BindingEntry {
                track_name: track.to_string(),
                target_object_name: target.to_string(),
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BindingSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = BindingSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ResolverState {
    /// Created, or the track list was regenerated since the last resolve.
    #[default]
    Unresolved,
    Resolved,
}

/// Outcome of one resolve pass, by stream name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BindingReport {
    pub bound: Vec<String>,
    /// No entry, blank target name, or no suitable component.
    pub skipped: Vec<String>,
    /// Target name did not match any scene object.
    pub failed: Vec<String>,
}

#[derive(Clone, Debug, Default)]
pub struct TimelineBindingResolver {
    pub bindings: BindingSet,
    state: ResolverState,
}

impl TimelineBindingResolver {
    pub fn new(bindings: BindingSet) -> Self {
        Self {
            bindings,
            state: ResolverState::Unresolved,
        }
    }

    pub fn state(&self) -> ResolverState {
        self.state
    }

    /// Resolve on enable. In edit preview the director is evaluated right away
    /// so the new bindings show up without playing. Without a director the
    /// resolver records an error and does nothing.
    pub fn activate<D, S>(
        &mut self,
        director: Option<&mut D>,
        scene: &S,
        diagnostics: &mut Diagnostics,
        mode: HostMode,
    ) -> Option<BindingReport>
    where
        D: Director + ?Sized,
        S: SceneHost + ?Sized,
    {
        let Some(director) = director else {
            diagnostics.error(
                DiagnosticKind::MissingUpstreamComponent,
                SOURCE,
                "no director to bind tracks on",
            );
            return None;
        };
        let report = self.resolve(director, scene, diagnostics);
        if mode == HostMode::EditPreview {
            director.evaluate();
        }
        Some(report)
    }

    /// Bind every authored track on `director`. A director without a
    /// timeline asset leaves everything untouched.
    pub fn resolve<D, S>(
        &mut self,
        director: &mut D,
        scene: &S,
        diagnostics: &mut Diagnostics,
    ) -> BindingReport
    where
        D: Director + ?Sized,
        S: SceneHost + ?Sized,
    {
        let mut report = BindingReport::default();
        let Some(outputs) = director.asset().map(|a| a.outputs.clone()) else {
            log::debug!("[{SOURCE}] director has no timeline asset");
            return report;
        };

        for output in outputs {
            if output.kind == TrackKind::Marker {
                continue;
            }
            let name = output.stream_name;
            let target_name = match self.bindings.get(&name) {
                Some(t) if !t.is_empty() => t,
                _ => {
                    report.skipped.push(name);
                    continue;
                }
            };

            let Some(object) = scene.find_by_name(target_name) else {
                diagnostics.warn(
                    DiagnosticKind::UnboundTrack,
                    SOURCE,
                    format!("'{target_name}' not found (track '{name}')"),
                );
                report.failed.push(name);
                continue;
            };

            match output.kind {
                TrackKind::Animation => {
                    if scene.has_component(object, &ComponentKind::Animator) {
                        director.set_binding(
                            output.source,
                            BindingTarget::Component {
                                object,
                                kind: ComponentKind::Animator,
                            },
                        );
                        report.bound.push(name);
                    } else {
                        log::debug!("[{SOURCE}] '{target_name}' has no animator (track '{name}')");
                        report.skipped.push(name);
                    }
                }
                _ => {
                    director.set_binding(output.source, BindingTarget::Object(object));
                    report.bound.push(name);
                }
            }
        }

        self.state = ResolverState::Resolved;
        report
    }

    /// Rebuild the key set from `asset`'s tracks. Names that already had a
    /// target keep it, new names start blank, marker tracks are dropped.
    pub fn auto_populate(&mut self, asset: &TimelineAsset) {
        let mut next = BindingSet::new();
        for output in asset.outputs.iter() {
            if output.kind == TrackKind::Marker || output.stream_name == MARKERS_STREAM {
                continue;
            }
            let name = output.stream_name.as_str();
            if name.is_empty() {
                continue;
            }
            let target = self.bindings.get(name).unwrap_or_default();
            next.insert(name, target);
        }
        self.bindings = next;
        self.state = ResolverState::Unresolved;
        log::info!(
            "[{SOURCE}] updated {} tracks (preserved existing names)",
            self.bindings.len()
        );
    }
}
