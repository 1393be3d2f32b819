//! hv-config
//!
//! Layered YAML configuration for the holdings viewer.
//!
//! Layers merge bottom to top. The merged document is hashed over its
//! sorted-key JSON text, so the same settings always give the same hash no
//! matter how the YAML was laid out. [`HoldingsConfig`] is the typed view;
//! keys it does not define are listed by [`LoadedConfig::unknown_keys`].

mod settings;

pub use settings::{HoldingsConfig, SourceConfig, ViewConfig, DEFAULT_CONFIG_YAML};

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

/// A merged config document plus its identity.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Hex SHA-256 of `canonical_json`.
    pub config_hash: String,
    pub canonical_json: String,
    pub config_json: Value,
}

impl LoadedConfig {
    fn from_document(config_json: Value) -> Result<Self> {
        let canonical_json =
            serde_json::to_string(&config_json).context("serialize merged config")?;
        let config_hash = hex::encode(Sha256::digest(canonical_json.as_bytes()));
        Ok(Self {
            config_hash,
            canonical_json,
            config_json,
        })
    }

    /// Typed settings, with defaults for anything the layers leave out.
    pub fn holdings(&self) -> Result<HoldingsConfig> {
        HoldingsConfig::from_json(&self.config_json)
    }

    /// Sorted JSON pointers of keys [`HoldingsConfig`] does not define.
    /// An unknown section is reported once rather than per leaf.
    pub fn unknown_keys(&self) -> Result<Vec<String>> {
        settings::unknown_keys(&self.config_json)
    }
}

/// Merge YAML files in order: the first is the base, each later file overrides.
pub fn load_files(paths: &[&str]) -> Result<LoadedConfig> {
    let layers = read_layers(paths)?;
    load_from_strings(&as_strs(&layers))
}

/// Like [`load_files`], with [`DEFAULT_CONFIG_YAML`] as the bottom layer.
pub fn load_with_defaults(paths: &[&str]) -> Result<LoadedConfig> {
    let mut layers = vec![DEFAULT_CONFIG_YAML.to_string()];
    layers.extend(read_layers(paths)?);
    load_from_strings(&as_strs(&layers))
}

pub fn load_from_strings(layers: &[&str]) -> Result<LoadedConfig> {
    let mut merged = Value::Object(Map::new());
    for (i, raw) in layers.iter().enumerate() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(raw)
            .with_context(|| format!("config layer {i} is not valid YAML"))?;
        let layer = serde_json::to_value(yaml)
            .with_context(|| format!("config layer {i} has no JSON form"))?;
        merge_into(&mut merged, layer);
    }
    LoadedConfig::from_document(merged)
}

fn read_layers(paths: &[&str]) -> Result<Vec<String>> {
    paths
        .iter()
        .map(|p| {
            std::fs::read_to_string(p).with_context(|| format!("failed to read config layer {p}"))
        })
        .collect()
}

fn as_strs(layers: &[String]) -> Vec<&str> {
    layers.iter().map(String::as_str).collect()
}

/// Objects merge key by key; any other value replaces the base. A null
/// layer (an empty YAML document or a bare `key:`) leaves the base alone.
fn merge_into(base: &mut Value, layer: Value) {
    match (base, layer) {
        (_, Value::Null) => {}
        (Value::Object(base), Value::Object(layer)) => {
            for (key, value) in layer {
                match base.get_mut(&key) {
                    Some(slot) => merge_into(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
