//! Shared JSON fixtures for camrig tests and benches.
//!
//! `fixtures/manifest.json` maps short keys to files under `fixtures/`. Each
//! entry resolves to a [`Fixture`]; timelines resolve to a [`timelines::Timeline`]
//! pairing the asset with its optional binding set.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../../../fixtures/manifest.json"))
        .expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenes: BTreeMap<String, String>,
    rigs: BTreeMap<String, RigEntry>,
    timelines: BTreeMap<String, TimelineEntry>,
}

/// A rig is either a bare path or a path plus the scene it was authored for.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RigEntry {
    Bare(String),
    Staged { path: String, scene: String },
}

#[derive(Debug, Deserialize)]
struct TimelineEntry {
    asset: String,
    #[serde(default)]
    bindings: Option<String>,
}

/// One file under `fixtures/`, addressed relative to that directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fixture {
    rel: String,
}

impl Fixture {
    fn new(rel: &str) -> Self {
        Self { rel: rel.to_string() }
    }

    pub fn path(&self) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(&self.rel)
    }

    pub fn text(&self) -> Result<String> {
        let path = self.path();
        fs::read_to_string(&path).with_context(|| format!("reading fixture {}", path.display()))
    }

    pub fn parse<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.text()?)
            .with_context(|| format!("fixture {} is not the expected JSON", self.rel))
    }
}

fn entry<'m, T>(section: &'m BTreeMap<String, T>, what: &str, key: &str) -> Result<&'m T> {
    section
        .get(key)
        .with_context(|| format!("no {what} fixture named '{key}'"))
}

pub mod scenes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenes.keys().cloned().collect()
    }

    pub fn get(name: &str) -> Result<Fixture> {
        entry(&MANIFEST.scenes, "scene", name).map(|rel| Fixture::new(rel))
    }

    pub fn json(name: &str) -> Result<String> {
        get(name)?.text()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        get(name)?.parse()
    }
}

pub mod rigs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.rigs.keys().cloned().collect()
    }

    pub fn get(name: &str) -> Result<Fixture> {
        let rel = match entry(&MANIFEST.rigs, "rig", name)? {
            RigEntry::Bare(path) | RigEntry::Staged { path, .. } => path,
        };
        Ok(Fixture::new(rel))
    }

    pub fn json(name: &str) -> Result<String> {
        get(name)?.text()
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        get(name)?.parse()
    }

    /// Scene key the rig expects to run against, if the manifest names one.
    pub fn scene_key(name: &str) -> Result<Option<String>> {
        Ok(match entry(&MANIFEST.rigs, "rig", name)? {
            RigEntry::Bare(_) => None,
            RigEntry::Staged { scene, .. } => Some(scene.clone()),
        })
    }
}

pub mod timelines {
    use super::*;

    /// A timeline asset and the track bindings authored for it.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct Timeline {
        pub asset: Fixture,
        pub bindings: Option<Fixture>,
    }

    pub fn keys() -> Vec<String> {
        MANIFEST.timelines.keys().cloned().collect()
    }

    pub fn get(name: &str) -> Result<Timeline> {
        let e = entry(&MANIFEST.timelines, "timeline", name)?;
        Ok(Timeline {
            asset: Fixture::new(&e.asset),
            bindings: e.bindings.as_deref().map(Fixture::new),
        })
    }

    pub fn asset_json(name: &str) -> Result<String> {
        get(name)?.asset.text()
    }

    pub fn bindings_json(name: &str) -> Result<Option<String>> {
        get(name)?.bindings.map(|f| f.text()).transpose()
    }

    pub fn bindings<T: DeserializeOwned>(name: &str) -> Result<Option<T>> {
        get(name)?.bindings.map(|f| f.parse()).transpose()
    }
}
