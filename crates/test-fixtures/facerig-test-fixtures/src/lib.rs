//! Shared JSON fixtures for the facerig crates' tests.
//!
//! `fixtures/manifest.json` at the workspace root maps fixture names to files. Each
//! category module resolves a name through the manifest and either returns the raw
//! JSON text or deserializes it.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    rigs: HashMap<String, String>,
    scenes: HashMap<String, String>,
    connections: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Rig configurations: suffix associations and deformer stacks.
pub mod rigs {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.rigs.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.rigs, "rig", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_json(lookup(&MANIFEST.rigs, "rig", name)?)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        Ok(resolve_path(lookup(&MANIFEST.rigs, "rig", name)?))
    }
}

/// Scene descriptions used to seed an in-memory scene.
pub mod scenes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenes.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.scenes, "scene", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_json(lookup(&MANIFEST.scenes, "scene", name)?)
    }
}

/// Template connection maps.
pub mod connections {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.connections.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        read_to_string(lookup(&MANIFEST.connections, "connection map", name)?)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        load_json(lookup(&MANIFEST.connections, "connection map", name)?)
    }
}
