//! Sequencing: timeline assets, the director that plays them, track binding
//! and the transport auto-rewind watcher.

pub mod binding;
pub mod transport;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{ObjectId, TrackId};
use crate::scene::ComponentKind;

pub use binding::{BindingReport, BindingSet, ResolverState, TimelineBindingResolver};
pub use transport::{
    detector_for, AutoRewind, EventStopDetector, HostEnvironment, PollingStopDetector,
    StopDetector,
};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackKind {
    Animation,
    Activation,
    /// Markers/signals; never bound.
    Marker,
    Other(String),
}

/// One output stream of a timeline asset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackOutput {
    pub stream_name: String,
    pub source: TrackId,
    pub kind: TrackKind,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TimelineAsset {
    pub name: String,
    /// Seconds.
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub outputs: Vec<TrackOutput>,
}

#[derive(Clone, Debug, Deserialize)]
struct TrackDesc {
    name: String,
    kind: TrackKind,
}

#[derive(Clone, Debug, Deserialize)]
struct TimelineDesc {
    name: String,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    tracks: Vec<TrackDesc>,
}

impl TimelineAsset {
    pub fn new(name: impl Into<String>, duration: f64) -> Self {
        Self {
            name: name.into(),
            duration,
            outputs: Vec::new(),
        }
    }

    /// Build from `{"name": .., "duration": .., "tracks": [{"name": .., "kind": ..}]}`.
    /// Track ids are assigned in listing order.
    pub fn from_json(json: &str) -> Result<Self> {
        let desc: TimelineDesc = serde_json::from_str(json)?;
        let mut asset = TimelineAsset::new(desc.name, desc.duration);
        for track in desc.tracks {
            asset.push_track(track.name, track.kind);
        }
        Ok(asset)
    }

    /// Append a track and return its id.
    pub fn push_track(&mut self, stream_name: impl Into<String>, kind: TrackKind) -> TrackId {
        let source = TrackId(self.outputs.len() as u32);
        self.outputs.push(TrackOutput {
            stream_name: stream_name.into(),
            source,
            kind,
        });
        source
    }

    pub fn track(&self, stream_name: &str) -> Option<&TrackOutput> {
        self.outputs.iter().find(|o| o.stream_name == stream_name)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayState {
    Playing,
    /// Paused or stopped; the director does not distinguish them.
    #[default]
    Paused,
}

/// Whether the host is previewing in the editor or running the game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostMode {
    EditPreview,
    Playing,
}

/// What a track drives during playback.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingTarget {
    Object(ObjectId),
    Component { object: ObjectId, kind: ComponentKind },
}

/// Host sequencing director.
pub trait Director {
    fn asset(&self) -> Option<&TimelineAsset>;
    fn state(&self) -> PlayState;
    fn time(&self) -> f64;
    fn set_time(&mut self, time: f64);
    /// Re-apply the current time immediately.
    fn evaluate(&mut self);
    fn set_binding(&mut self, track: TrackId, target: BindingTarget);
    fn binding(&self, track: TrackId) -> Option<&BindingTarget>;
    /// Consume the "stopped" notification raised since the last call.
    fn take_stopped(&mut self) -> bool;
}

/// In-memory director used by tests and headless hosts.
#[derive(Debug, Default, Clone)]
pub struct PlayableDirector {
    asset: Option<TimelineAsset>,
    state: PlayState,
    time: f64,
    bindings: HashMap<TrackId, BindingTarget>,
    stopped: bool,
    evaluations: u64,
}

impl PlayableDirector {
    pub fn new(asset: TimelineAsset) -> Self {
        Self {
            asset: Some(asset),
            ..Self::default()
        }
    }

    /// A director with no timeline assigned.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn play(&mut self) {
        self.state = PlayState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlayState::Paused;
    }

    /// Pause and raise the stopped notification.
    pub fn stop(&mut self) {
        self.state = PlayState::Paused;
        self.stopped = true;
    }

    /// Advance playback time; reaching the end of the asset stops playback.
    pub fn advance(&mut self, dt: f64) {
        if self.state() != PlayState::Playing {
            return;
        }
        self.time += dt;
        let duration = self.asset.as_ref().map(|a| a.duration).unwrap_or(0.0);
        if self.time >= duration {
            self.time = duration;
            self.stop();
        }
    }

    /// Number of `evaluate` calls so far.
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Bound object ids keyed by stream name, for inspection.
    pub fn bound_objects(&self) -> Vec<(String, ObjectId)> {
        let Some(asset) = self.asset.as_ref() else {
            return Vec::new();
        };
        asset
            .outputs
            .iter()
            .filter_map(|o| {
                let object = match self.bindings.get(&o.source)? {
                    BindingTarget::Object(id) => *id,
                    BindingTarget::Component { object, .. } => *object,
                };
                Some((o.stream_name.clone(), object))
            })
            .collect()
    }

    pub fn set_asset(&mut self, asset: Option<TimelineAsset>) {
        self.asset = asset;
    }
}

impl Director for PlayableDirector {
    fn asset(&self) -> Option<&TimelineAsset> {
        self.asset.as_ref()
    }

    fn state(&self) -> PlayState {
        self.state
    }

    fn time(&self) -> f64 {
        self.time
    }

    fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    fn evaluate(&mut self) {
        self.evaluations += 1;
    }

    fn set_binding(&mut self, track: TrackId, target: BindingTarget) {
        self.bindings.insert(track, target);
    }

    fn binding(&self, track: TrackId) -> Option<&BindingTarget> {
        self.bindings.get(&track)
    }

    fn take_stopped(&mut self) -> bool {
        std::mem::take(&mut self.stopped)
    }
}
