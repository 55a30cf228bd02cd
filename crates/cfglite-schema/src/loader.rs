//! # Schema Loading
//!
//! Reads a JSON document (base schema or lite contract) from disk. No
//! caching: each run loads its schemas fresh.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Error reading a schema document.
#[derive(Error, Debug)]
pub enum SchemaLoadError {
    /// The schema file does not exist.
    #[error("schema file not found: {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// The schema file is not valid JSON.
    #[error("schema '{path}' is not valid JSON: {reason}")]
    Parse {
        /// Path of the schema file.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// IO error reading an existing file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load and parse a JSON schema document.
///
/// # Errors
///
/// Returns [`SchemaLoadError::NotFound`] if the file is absent and
/// [`SchemaLoadError::Parse`] if it is not valid JSON.
pub fn load_schema(path: &Path) -> Result<Value, SchemaLoadError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(SchemaLoadError::NotFound {
                path: path.display().to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    let value = serde_json::from_str(&content).map_err(|e| SchemaLoadError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "loaded schema document");
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loads_valid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, r#"{"type": "object"}"#).unwrap();
        assert_eq!(load_schema(&path).unwrap(), json!({"type": "object"}));
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(&dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SchemaLoadError::NotFound { .. }), "got {err}");
    }

    #[test]
    fn invalid_json_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("s.json");
        std::fs::write(&path, "{\"type\": ").unwrap();
        let err = load_schema(&path).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Parse { .. }), "got {err}");
    }

    #[test]
    fn directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_schema(dir.path()).unwrap_err();
        assert!(!matches!(err, SchemaLoadError::Parse { .. }));
    }
}
