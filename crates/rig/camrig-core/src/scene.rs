//! Host scene abstraction.
//!
//! Adapters (Bevy, tests) implement [`SceneLookup`] and [`SpatialStore`] and
//! pass the scene into the rig each frame. [`MemoryScene`] is the in-crate
//! implementation used by tests and headless hosts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ids::{IdAllocator, ObjectId};
use crate::spatial::SpatialState;

/// Companion components a scene object may carry.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentKind {
    /// Something that can play animation tracks.
    Animator,
    /// Anything else, named by the host.
    Other(String),
}

/// Global, stringly-typed object search. When several objects match, which
/// one is returned is up to the host.
pub trait SceneLookup {
    fn find_by_name(&self, name: &str) -> Option<ObjectId>;
    fn find_by_tag(&self, tag: &str) -> Option<ObjectId>;
}

/// Read/write access to object spatial state. A destroyed object reads as
/// `None` and rejects writes.
pub trait SpatialStore {
    fn state(&self, id: ObjectId) -> Option<SpatialState>;
    /// Returns false when the object no longer exists.
    fn set_state(&mut self, id: ObjectId, state: SpatialState) -> bool;
    fn has_component(&self, id: ObjectId, kind: &ComponentKind) -> bool;
}

/// Everything a rig needs from its host.
pub trait SceneHost: SceneLookup + SpatialStore {}

impl<T: SceneLookup + SpatialStore + ?Sized> SceneHost for T {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    #[serde(default)]
    pub id: Option<ObjectId>,
    pub name: String,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub state: SpatialState,
    #[serde(default)]
    pub components: Vec<ComponentKind>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SceneDesc {
    #[serde(default)]
    objects: Vec<SceneObject>,
}

/// Insertion-ordered in-memory scene. Lookups return the earliest spawned
/// live match.
#[derive(Debug, Default, Clone)]
pub struct MemoryScene {
    objects: IndexMap<ObjectId, SceneObject>,
    ids: IdAllocator,
}

impl MemoryScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a scene from `{"objects": [{"name": .., "tag": .., "state": ..}]}`.
    /// Objects without an explicit `id` get one allocated.
    pub fn from_json(json: &str) -> Result<Self> {
        let desc: SceneDesc = serde_json::from_str(json)?;
        let mut scene = MemoryScene::new();
        for obj in desc.objects.iter() {
            if let Some(id) = obj.id {
                scene.ids.reserve_object(id);
            }
        }
        for obj in desc.objects {
            scene.insert(obj);
        }
        Ok(scene)
    }

    pub fn spawn(&mut self, name: impl Into<String>, state: SpatialState) -> ObjectId {
        self.insert(SceneObject {
            id: None,
            name: name.into(),
            tag: None,
            state,
            components: Vec::new(),
        })
    }

    fn insert(&mut self, mut obj: SceneObject) -> ObjectId {
        let id = match obj.id {
            Some(id) => id,
            None => self.ids.alloc_object(),
        };
        obj.id = Some(id);
        self.objects.insert(id, obj);
        id
    }

    pub fn set_tag(&mut self, id: ObjectId, tag: impl Into<String>) {
        if let Some(obj) = self.objects.get_mut(&id) {
            obj.tag = Some(tag.into());
        }
    }

    pub fn add_component(&mut self, id: ObjectId, kind: ComponentKind) {
        if let Some(obj) = self.objects.get_mut(&id) {
            if !obj.components.contains(&kind) {
                obj.components.push(kind);
            }
        }
    }

    pub fn set_position(&mut self, id: ObjectId, position: [f32; 3]) -> bool {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.state.position = position;
                true
            }
            None => false,
        }
    }

    /// Remove the object. Handles to it stay around but read as absent.
    pub fn destroy(&mut self, id: ObjectId) -> bool {
        self.objects.shift_remove(&id).is_some()
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(&id)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl SceneLookup for MemoryScene {
    fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, obj)| obj.name == name)
            .map(|(id, _)| *id)
    }

    fn find_by_tag(&self, tag: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, obj)| obj.tag.as_deref() == Some(tag))
            .map(|(id, _)| *id)
    }
}

impl SpatialStore for MemoryScene {
    fn state(&self, id: ObjectId) -> Option<SpatialState> {
        self.objects.get(&id).map(|obj| obj.state)
    }

    fn set_state(&mut self, id: ObjectId, state: SpatialState) -> bool {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.state = state;
                true
            }
            None => false,
        }
    }

    fn has_component(&self, id: ObjectId, kind: &ComponentKind) -> bool {
        self.objects
            .get(&id)
            .map(|obj| obj.components.contains(kind))
            .unwrap_or(false)
    }
}
