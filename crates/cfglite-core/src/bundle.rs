//! # Bundle Emission
//!
//! A bundle is the artifact of a successful run: tool metadata, the UTC
//! time it was generated, and the validated config, written as pretty JSON
//! to `<output_dir>/bundle-<name>.json`.
//!
//! Bundles are created once and never modified. A second run with the same
//! config name overwrites the earlier file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::ConfigData;
use crate::error::CfgliteError;
use crate::temporal::Timestamp;

/// File-name stem used when the config has no `name` key.
pub const UNNAMED_BUNDLE: &str = "unnamed";

/// The persisted output envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
    tool: String,
    version: String,
    generated_at: Timestamp,
    config: ConfigData,
}

impl Bundle {
    /// Assemble a bundle around a copy of `config`.
    pub fn new(
        config: &ConfigData,
        tool: impl Into<String>,
        version: impl Into<String>,
        generated_at: Timestamp,
    ) -> Self {
        Self {
            tool: tool.into(),
            version: version.into(),
            generated_at,
            config: config.clone(),
        }
    }

    /// Tool name recorded in the bundle.
    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// Tool version recorded in the bundle.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// When the bundle was generated.
    pub fn generated_at(&self) -> Timestamp {
        self.generated_at
    }

    /// The validated config.
    pub fn config(&self) -> &ConfigData {
        &self.config
    }

    /// Render as 2-space-indented JSON with a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns [`CfgliteError::Serialization`] if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String, CfgliteError> {
        let mut out = serde_json::to_string_pretty(self)?;
        out.push('\n');
        Ok(out)
    }

    /// Write the bundle into `output_dir`, creating the directory if needed
    /// and overwriting any existing bundle with the same name.
    ///
    /// Returns the path written.
    ///
    /// # Errors
    ///
    /// Propagates IO failures (permission denied, disk full, ...).
    pub fn write(&self, output_dir: &Path) -> Result<PathBuf, CfgliteError> {
        std::fs::create_dir_all(output_dir)?;
        let path = output_dir.join(bundle_file_name(&self.config));
        std::fs::write(&path, self.to_pretty_json()?)?;
        tracing::info!(path = %path.display(), "bundle written");
        Ok(path)
    }

    /// Read a bundle back from disk.
    ///
    /// # Errors
    ///
    /// Returns [`CfgliteError::Io`] or [`CfgliteError::Parse`].
    pub fn read(path: &Path) -> Result<Self, CfgliteError> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| CfgliteError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// Build a bundle stamped with the current time and write it to `output_dir`.
///
/// # Errors
///
/// Propagates IO and serialization failures.
pub fn emit_bundle(
    config: &ConfigData,
    tool_name: &str,
    version: &str,
    output_dir: &Path,
) -> Result<PathBuf, CfgliteError> {
    Bundle::new(config, tool_name, version, Timestamp::now()).write(output_dir)
}

/// `bundle-<name>.json`, where `<name>` comes from the config's `name` key.
///
/// String names are used verbatim except that path separators become `_`,
/// so the file always lands directly inside the output directory. Other
/// JSON values use their JSON text.
pub fn bundle_file_name(config: &ConfigData) -> String {
    let stem = match config.get("name") {
        None => UNNAMED_BUNDLE.to_string(),
        Some(Value::String(s)) => s.replace(['/', '\\'], "_"),
        Some(other) => other.to_string().replace(['/', '\\'], "_"),
    };
    format!("bundle-{stem}.json")
}
