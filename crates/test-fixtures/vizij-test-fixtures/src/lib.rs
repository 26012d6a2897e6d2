//! Shared JSON fixtures for carousel tests, indexed by `fixtures/manifest.json`.

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
    #[serde(rename = "snap-models")]
    snap_models: HashMap<String, String>,
    scenarios: HashMap<String, ScenarioEntry>,
}

#[derive(Debug, Deserialize)]
struct ScenarioEntry {
    /// Key into `snap-models`.
    model: String,
    script: String,
    #[serde(default)]
    config: Option<String>,
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

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod snap_models {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.snap_models.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.snap_models, "snap model", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.snap_models, "snap model", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.snap_models, "snap model", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod scenarios {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.scenarios.keys().cloned().collect()
    }

    /// Key of the snap model a scenario runs against.
    pub fn model_key(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.scenarios, "scenario", name)?;
        Ok(entry.model.clone())
    }

    pub fn model_json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.scenarios, "scenario", name)?;
        super::snap_models::json(&entry.model)
    }

    pub fn script<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.scenarios, "scenario", name)?;
        super::load_json(&entry.script)
    }

    /// Raw config JSON, if the scenario overrides the defaults.
    pub fn config_json(name: &str) -> Result<Option<String>> {
        let entry = lookup(&MANIFEST.scenarios, "scenario", name)?;
        match &entry.config {
            Some(config) => read_to_string(config).map(Some),
            None => Ok(None),
        }
    }
}
