use bevy::prelude::*;

/// Tag used by tag-based target lookup (`TargetSpec::ByTag`). Names come from
/// Bevy's own [`Name`] component.
#[derive(Component, Debug, Clone, PartialEq, Eq)]
pub struct RigTag(pub String);

impl RigTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }
}

/// Marks an entity that can play animation tracks. Timeline binding attaches
/// animation tracks to it.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Animator;
