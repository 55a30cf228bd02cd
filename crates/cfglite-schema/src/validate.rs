//! # Base Schema Validation
//!
//! First validation stage: the whole config document against a JSON Schema
//! document, using the `jsonschema` crate. The draft is taken from the
//! schema's `$schema` keyword, defaulting to Draft 2020-12.
//!
//! Failure carries one primary violation (the first the library reports)
//! plus a count of the rest. The caller reports it and stops; there is no
//! partial acceptance.
//!
//! Remote `$ref`s are refused rather than fetched. Schemas for this tool are
//! flat, self-contained documents.

use std::fmt;
use std::path::Path;

use cfglite_core::ConfigData;
use jsonschema::{Retrieve, Uri, Validator};
use serde_json::Value;
use thiserror::Error;

use crate::loader::{load_schema, SchemaLoadError};

/// Refuses every external `$ref`, so validation never touches the network
/// or the filesystem.
struct NoRemoteRetriever;

impl Retrieve for NoRemoteRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external $ref '{}' is not supported", uri.as_str()).into())
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value in the config.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that failed.
    pub schema_path: String,
    /// Human-readable description from the validator.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "(root): {}", self.message)
        } else {
            write!(f, "{}: {}", self.instance_path, self.message)
        }
    }
}

/// Error from the base schema stage.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The config does not conform to the schema.
    #[error("{primary}")]
    ValidationFailed {
        /// The violation reported to the user.
        primary: Violation,
        /// Total number of violations found, including `primary`.
        total: usize,
    },

    /// The schema document itself is not a valid JSON Schema.
    #[error("invalid schema: {reason}")]
    InvalidSchema {
        /// Compiler diagnostic.
        reason: String,
    },

    /// The schema document could not be loaded.
    #[error(transparent)]
    Load(#[from] SchemaLoadError),
}

impl SchemaValidationError {
    /// The message shown to the user: the primary violation's text without
    /// its location prefix, or the error's own text for other variants.
    pub fn message(&self) -> String {
        match self {
            Self::ValidationFailed { primary, .. } => primary.message.clone(),
            other => other.to_string(),
        }
    }
}

/// A compiled base schema.
pub struct BaseSchemaValidator {
    validator: Validator,
}

impl fmt::Debug for BaseSchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BaseSchemaValidator").finish_non_exhaustive()
    }
}

impl BaseSchemaValidator {
    /// Compile a schema document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::InvalidSchema`] if `schema` is not a
    /// valid JSON Schema (for example, `"type": 42`).
    pub fn new(schema: &Value) -> Result<Self, SchemaValidationError> {
        let mut opts = jsonschema::options();
        opts.with_retriever(NoRemoteRetriever);
        let validator = opts
            .build(schema)
            .map_err(|e| SchemaValidationError::InvalidSchema {
                reason: e.to_string(),
            })?;
        Ok(Self { validator })
    }

    /// Load a schema document from disk and compile it.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::Load`] or
    /// [`SchemaValidationError::InvalidSchema`].
    pub fn from_path(path: &Path) -> Result<Self, SchemaValidationError> {
        let schema = load_schema(path)?;
        Self::new(&schema)
    }

    /// Validate an arbitrary JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidationFailed`] on any violation.
    pub fn validate_value(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let mut violations = self.validator.iter_errors(instance).map(|e| Violation {
            instance_path: e.instance_path.to_string(),
            schema_path: e.schema_path.to_string(),
            message: e.to_string(),
        });

        match violations.next() {
            None => Ok(()),
            Some(primary) => {
                let total = 1 + violations.count();
                tracing::warn!(
                    path = %primary.instance_path,
                    total,
                    "config rejected by base schema"
                );
                Err(SchemaValidationError::ValidationFailed { primary, total })
            }
        }
    }

    /// Validate a config document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaValidationError::ValidationFailed`] on any violation.
    pub fn validate(&self, data: &ConfigData) -> Result<(), SchemaValidationError> {
        self.validate_value(&data.to_value())
    }
}

/// Compile `schema` and validate `data` against it in one step.
///
/// # Errors
///
/// Returns [`SchemaValidationError::InvalidSchema`] or
/// [`SchemaValidationError::ValidationFailed`].
pub fn validate(data: &ConfigData, schema: &Value) -> Result<(), SchemaValidationError> {
    BaseSchemaValidator::new(schema)?.validate(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> ConfigData {
        ConfigData::from_value(value).unwrap()
    }

    fn config_schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["name", "mode", "enabled"],
            "properties": {
                "name": {"type": "string", "minLength": 1},
                "mode": {"type": "string"},
                "enabled": {"type": "boolean"},
                "limits": {
                    "type": "object",
                    "properties": {"cpu": {"type": "integer", "minimum": 1}}
                }
            }
        })
    }

    #[test]
    fn valid_config_passes() {
        validate(&data(json!({"name": "demo", "mode": "lite", "enabled": true})), &config_schema()).unwrap();
    }

    #[test]
    fn missing_required_property_fails() {
        let err = validate(&data(json!({"name": "demo", "mode": "lite"})), &config_schema()).unwrap_err();
        match &err {
            SchemaValidationError::ValidationFailed { primary, total } => {
                assert!(primary.message.contains("enabled"), "got: {}", primary.message);
                assert_eq!(primary.instance_path, "");
                assert_eq!(*total, 1);
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn wrong_type_reports_instance_path() {
        let err = validate(
            &data(json!({"name": "demo", "mode": "lite", "enabled": "yes"})),
            &config_schema(),
        )
        .unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { primary, .. } => {
                assert_eq!(primary.instance_path, "/enabled");
                assert!(primary.to_string().starts_with("/enabled: "));
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn nested_violation_detected() {
        let err = validate(
            &data(json!({"name": "d", "mode": "lite", "enabled": true, "limits": {"cpu": 0}})),
            &config_schema(),
        )
        .unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { primary, .. } => {
                assert_eq!(primary.instance_path, "/limits/cpu");
            }
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn all_violations_counted() {
        let err = validate(&data(json!({"name": 1, "mode": 2, "enabled": 3})), &config_schema()).unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { total, .. } => assert_eq!(total, 3),
            other => panic!("expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn invalid_schema_rejected() {
        let err = BaseSchemaValidator::new(&json!({"type": 42})).unwrap_err();
        assert!(matches!(err, SchemaValidationError::InvalidSchema { .. }), "got {err}");
    }

    #[test]
    fn remote_ref_refused() {
        let schema = json!({"$ref": "https://example.invalid/remote.schema.json"});
        assert!(BaseSchemaValidator::new(&schema).is_err());
    }

    #[test]
    fn local_definitions_resolve() {
        let schema = json!({
            "type": "object",
            "properties": {"mode": {"$ref": "#/$defs/mode"}},
            "$defs": {"mode": {"enum": ["lite", "full"]}}
        });
        let validator = BaseSchemaValidator::new(&schema).unwrap();
        validator.validate(&data(json!({"mode": "lite"}))).unwrap();
        assert!(validator.validate(&data(json!({"mode": "turbo"}))).is_err());
    }

    #[test]
    fn from_path_missing_schema() {
        let dir = tempfile::tempdir().unwrap();
        let err = BaseSchemaValidator::from_path(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SchemaValidationError::Load(SchemaLoadError::NotFound { .. })));
    }

    #[test]
    fn message_strips_location() {
        let err = SchemaValidationError::ValidationFailed {
            primary: Violation {
                instance_path: "/enabled".to_string(),
                schema_path: "/properties/enabled/type".to_string(),
                message: r#""yes" is not of type "boolean""#.to_string(),
            },
            total: 1,
        };
        assert_eq!(err.message(), r#""yes" is not of type "boolean""#);
        assert_eq!(err.to_string(), r#"/enabled: "yes" is not of type "boolean""#);
    }

    #[test]
    fn violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""kind" is a required property"#.to_string(),
        };
        assert!(v.to_string().starts_with("(root)"));
    }
}
