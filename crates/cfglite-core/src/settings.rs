//! # Tool Settings
//!
//! Process-wide constants and filesystem locations, gathered into one
//! struct that is handed to the pipeline. Tests build their own settings
//! pointing at temporary directories.

use std::path::{Path, PathBuf};

/// Human-readable tool name, written into every bundle.
pub const TOOL_NAME: &str = "Configurator Lite";

/// Tool version, written into every bundle.
pub const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Release build date shown by `--version`.
pub const BUILD_DATE: &str = "2025-12-17";

/// Location of the base JSON Schema, relative to the base directory.
pub const BASE_SCHEMA_RELATIVE_PATH: &str = "schemas/config.schema.json";

/// Location of the lite contract, relative to the base directory.
pub const LITE_CONTRACT_RELATIVE_PATH: &str = "schemas/lite.schema.json";

/// Bundle output directory, relative to the base directory.
pub const OUTPUT_RELATIVE_DIR: &str = "dist";

/// Everything the pipeline needs to know about its environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Tool name recorded in bundles.
    pub tool_name: String,
    /// Tool version recorded in bundles.
    pub version: String,
    /// Build date shown by `--version`.
    pub build_date: String,
    /// Path to the base JSON Schema document.
    pub base_schema_path: PathBuf,
    /// Path to the lite contract document.
    pub lite_contract_path: PathBuf,
    /// Directory bundles are written to.
    pub output_dir: PathBuf,
}

impl ToolSettings {
    /// Default settings with every location resolved under `base_dir`.
    pub fn with_base_dir(base_dir: impl AsRef<Path>) -> Self {
        let base = base_dir.as_ref();
        Self {
            tool_name: TOOL_NAME.to_string(),
            version: TOOL_VERSION.to_string(),
            build_date: BUILD_DATE.to_string(),
            base_schema_path: base.join(BASE_SCHEMA_RELATIVE_PATH),
            lite_contract_path: base.join(LITE_CONTRACT_RELATIVE_PATH),
            output_dir: base.join(OUTPUT_RELATIVE_DIR),
        }
    }

    /// Override the base schema location.
    pub fn base_schema(mut self, path: impl Into<PathBuf>) -> Self {
        self.base_schema_path = path.into();
        self
    }

    /// Override the lite contract location.
    pub fn lite_contract(mut self, path: impl Into<PathBuf>) -> Self {
        self.lite_contract_path = path.into();
        self
    }

    /// Override the bundle output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = path.into();
        self
    }

    /// One-line version banner, e.g. `Configurator Lite v1.1.0 (2025-12-17)`.
    pub fn version_line(&self) -> String {
        format!("{} v{} ({})", self.tool_name, self.version, self.build_date)
    }
}
