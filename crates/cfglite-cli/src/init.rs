//! # Init Command
//!
//! Writes a starter `config.yaml` that passes the shipped schemas.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{json, Map};

use cfglite_core::ConfigData;

use crate::output;

/// File name written by `--init`.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// The starter config: `name`, `mode`, `enabled`, in that order.
pub fn default_config() -> ConfigData {
    let mut map = Map::new();
    map.insert("name".to_string(), json!("example"));
    map.insert("mode".to_string(), json!("lite"));
    map.insert("enabled".to_string(), json!(true));
    ConfigData::from(map)
}

/// Write the starter config into `dir`, overwriting any existing file.
///
/// # Errors
///
/// Returns an error if YAML serialization or the file write fails.
pub fn write_default_config(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(DEFAULT_CONFIG_FILE);
    let yaml = serde_yaml::to_string(&default_config()).context("failed to serialize default config")?;
    std::fs::write(&path, yaml).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote default config");
    Ok(path)
}

/// Execute `--init` in `dir`.
///
/// Returns exit code 0.
///
/// # Errors
///
/// Propagates the write failure.
pub fn run_init(dir: &Path) -> Result<u8> {
    write_default_config(dir)?;
    output::success(&format!("Created {DEFAULT_CONFIG_FILE}"));
    Ok(0)
}
