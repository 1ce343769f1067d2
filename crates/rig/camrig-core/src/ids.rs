//! Identifiers for scene objects and timeline tracks.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque handle to a scene object. Hosts pick the encoding (the Bevy adapter
/// stores `Entity::to_bits`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// Opaque handle to a track inside a timeline asset.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TrackId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "object#{}", self.0)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "track#{}", self.0)
    }
}

/// Monotonic allocator for ObjectId.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next_object: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_object(&mut self) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object = self.next_object.wrapping_add(1);
        id
    }

    /// Make sure future object ids never collide with `id`.
    #[inline]
    pub fn reserve_object(&mut self, id: ObjectId) {
        if id.0 >= self.next_object {
            self.next_object = id.0.wrapping_add(1);
        }
    }
}
