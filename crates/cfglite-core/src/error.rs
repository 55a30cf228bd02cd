//! # Error Types
//!
//! Errors raised while loading a config document or writing a bundle.
//! Schema and contract errors live in `cfglite-schema`; the CLI folds
//! everything into its own pipeline error.

use thiserror::Error;

/// Top-level error type for config loading and bundle emission.
#[derive(Error, Debug)]
pub enum CfgliteError {
    /// The config file does not exist.
    #[error("config file not found: {path}")]
    FileNotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The config file extension is not `.yml`, `.yaml` or `.json`.
    #[error("unsupported config format '{extension}' for {path}")]
    UnsupportedFormat {
        /// Path of the rejected file.
        path: String,
        /// The extension found, or an empty string if there was none.
        extension: String,
    },

    /// The config file could not be parsed in its declared format.
    #[error("failed to parse {path}: {reason}")]
    Parse {
        /// Path of the file.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The document parsed, but its top level is not a mapping.
    #[error("{path}: top-level document must be a mapping, found {found}")]
    NotAMapping {
        /// Path of the file.
        path: String,
        /// JSON type name of what was found instead.
        found: &'static str,
    },

    /// Serialization of an output document failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CfgliteError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
