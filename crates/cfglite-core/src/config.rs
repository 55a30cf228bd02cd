//! # Config Documents
//!
//! Loads the user's configuration file into [`ConfigData`], a JSON object
//! that both validation stages and the bundle share.
//!
//! The format is chosen by extension alone: `.yml`/`.yaml` parse as YAML,
//! `.json` as JSON, and anything else is rejected before the file is read.
//! YAML is converted into the JSON value model at load time so that the
//! schema validator, the contract engine and the bundle writer all see
//! identical values.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::CfgliteError;

/// On-disk format of a config document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.yml` or `.yaml`.
    Yaml,
    /// `.json`.
    Json,
}

impl ConfigFormat {
    /// Determine the format from a file extension.
    ///
    /// Matching is exact and case-sensitive.
    ///
    /// # Errors
    ///
    /// Returns [`CfgliteError::UnsupportedFormat`] for any other extension,
    /// including a missing one.
    pub fn from_path(path: &Path) -> Result<Self, CfgliteError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            "yml" | "yaml" => Ok(Self::Yaml),
            "json" => Ok(Self::Json),
            other => Err(CfgliteError::UnsupportedFormat {
                path: path.display().to_string(),
                extension: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for ConfigFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Yaml => f.write_str("yaml"),
            Self::Json => f.write_str("json"),
        }
    }
}

/// A parsed configuration document.
///
/// Always a JSON object at the top level. Parsed once, then only read:
/// there are no mutating methods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ConfigData(Map<String, Value>);

impl ConfigData {
    /// Load a config file from disk.
    ///
    /// # Errors
    ///
    /// - [`CfgliteError::FileNotFound`] if `path` does not exist.
    /// - [`CfgliteError::UnsupportedFormat`] if the extension is not recognised.
    /// - [`CfgliteError::Parse`] if the content is malformed.
    /// - [`CfgliteError::NotAMapping`] if the top level is not a mapping.
    pub fn load(path: &Path) -> Result<Self, CfgliteError> {
        if !path.exists() {
            return Err(CfgliteError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), %format, "loaded config file");

        Self::parse_str(&content, format, &path.display().to_string())
    }

    /// Parse config text in the given format. `origin` names the source in
    /// error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CfgliteError::Parse`] or [`CfgliteError::NotAMapping`].
    pub fn parse_str(content: &str, format: ConfigFormat, origin: &str) -> Result<Self, CfgliteError> {
        let value = match format {
            ConfigFormat::Json => serde_json::from_str::<Value>(content).map_err(|e| {
                CfgliteError::Parse {
                    path: origin.to_string(),
                    reason: format!("invalid JSON: {e}"),
                }
            })?,
            ConfigFormat::Yaml => {
                let yaml: serde_yaml::Value = serde_yaml::from_str(content).map_err(|e| {
                    CfgliteError::Parse {
                        path: origin.to_string(),
                        reason: format!("invalid YAML: {e}"),
                    }
                })?;
                yaml_to_json(&yaml).map_err(|reason| CfgliteError::Parse {
                    path: origin.to_string(),
                    reason,
                })?
            }
        };

        Self::from_value(value).map_err(|found| CfgliteError::NotAMapping {
            path: origin.to_string(),
            found,
        })
    }

    /// Wrap a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns the JSON type name of `value` if it is not an object.
    pub fn from_value(value: Value) -> Result<Self, &'static str> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(json_type_name(&other)),
        }
    }

    /// Look up a top-level key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Whether a top-level key is present (even if its value is `null`).
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Borrow the underlying object map.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Copy the document into a standalone JSON value.
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

impl TryFrom<Value> for ConfigData {
    type Error = String;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
            .map_err(|found| format!("config must be a mapping, found {found}"))
    }
}

impl From<Map<String, Value>> for ConfigData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl From<ConfigData> for Value {
    fn from(data: ConfigData) -> Self {
        Value::Object(data.0)
    }
}

/// JSON type name used in diagnostics.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Convert a `serde_yaml::Value` tree into the equivalent `serde_json::Value`.
///
/// Mapping keys that are numbers or booleans become their string form.
/// Tags are dropped. Non-finite floats have no JSON form and are an error.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Y;

    match yaml {
        Y::Null => Ok(Value::Null),
        Y::Bool(b) => Ok(Value::Bool(*b)),
        Y::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else {
                let f = n.as_f64().unwrap_or(f64::NAN);
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent number {n} in JSON"))
            }
        }
        Y::String(s) => Ok(Value::String(s.clone())),
        Y::Sequence(seq) => seq.iter().map(yaml_to_json).collect::<Result<Vec<_>, _>>().map(Value::Array),
        Y::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (k, v) in mapping {
                let key = match k {
                    Y::String(s) => s.clone(),
                    Y::Number(n) => n.to_string(),
                    Y::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML mapping key: {other:?}")),
                };
                map.insert(key, yaml_to_json(v)?);
            }
            Ok(Value::Object(map))
        }
        Y::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_from_extension() {
        assert_eq!(ConfigFormat::from_path(Path::new("a.yml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("a.yaml")).unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path(Path::new("dir/a.json")).unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn format_rejects_other_extensions() {
        for name in ["a.toml", "a.YAML", "a", "a.json.bak"] {
            let err = ConfigFormat::from_path(Path::new(name)).unwrap_err();
            assert!(
                matches!(err, CfgliteError::UnsupportedFormat { .. }),
                "{name} should be unsupported, got {err}"
            );
        }
    }

    #[test]
    fn parse_yaml_document() {
        let data = ConfigData::parse_str(
            "name: demo\nmode: lite\nenabled: true\ncount: 3\nratio: 0.5\n",
            ConfigFormat::Yaml,
            "inline",
        )
        .unwrap();
        assert_eq!(data.get("name"), Some(&json!("demo")));
        assert_eq!(data.get("enabled"), Some(&json!(true)));
        assert_eq!(data.get("count"), Some(&json!(3)));
        assert_eq!(data.get("ratio"), Some(&json!(0.5)));
    }

    #[test]
    fn parse_yaml_keeps_key_order() {
        let data =
            ConfigData::parse_str("zeta: 1\nalpha: 2\nmid: 3\n", ConfigFormat::Yaml, "inline").unwrap();
        let keys: Vec<&str> = data.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn parse_yaml_non_string_keys() {
        let data = ConfigData::parse_str("1: one\ntrue: yes\n", ConfigFormat::Yaml, "inline").unwrap();
        assert_eq!(data.get("1"), Some(&json!("one")));
        assert!(data.contains_key("true"));
    }

    #[test]
    fn parse_yaml_nested_and_tagged() {
        let data = ConfigData::parse_str(
            "outer:\n  inner: [1, two]\ntagged: !custom value\n",
            ConfigFormat::Yaml,
            "inline",
        )
        .unwrap();
        assert_eq!(data.get("outer"), Some(&json!({"inner": [1, "two"]})));
        assert_eq!(data.get("tagged"), Some(&json!("value")));
    }

    #[test]
    fn parse_json_document() {
        let data = ConfigData::parse_str(
            r#"{"name": "demo", "nested": {"a": null}}"#,
            ConfigFormat::Json,
            "inline",
        )
        .unwrap();
        assert_eq!(data.get("nested"), Some(&json!({"a": null})));
    }

    #[test]
    fn parse_invalid_json() {
        let err = ConfigData::parse_str("{not json", ConfigFormat::Json, "bad.json").unwrap_err();
        match err {
            CfgliteError::Parse { path, reason } => {
                assert_eq!(path, "bad.json");
                assert!(reason.contains("invalid JSON"));
            }
            other => panic!("expected Parse, got {other}"),
        }
    }

    #[test]
    fn parse_invalid_yaml() {
        let err = ConfigData::parse_str("key: [unclosed", ConfigFormat::Yaml, "bad.yaml").unwrap_err();
        assert!(matches!(err, CfgliteError::Parse { .. }));
    }

    #[test]
    fn non_mapping_documents_rejected() {
        let cases = [
            ("- a\n- b\n", ConfigFormat::Yaml, "array"),
            ("", ConfigFormat::Yaml, "null"),
            ("42", ConfigFormat::Json, "number"),
            ("\"text\"", ConfigFormat::Json, "string"),
        ];
        for (content, format, expected) in cases {
            let err = ConfigData::parse_str(content, format, "doc").unwrap_err();
            match err {
                CfgliteError::NotAMapping { found, .. } => assert_eq!(found, expected),
                other => panic!("expected NotAMapping for {content:?}, got {other}"),
            }
        }
    }

    #[test]
    fn load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigData::load(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, CfgliteError::FileNotFound { .. }));
    }

    #[test]
    fn load_missing_file_checked_before_extension() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConfigData::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, CfgliteError::FileNotFound { .. }));
    }

    #[test]
    fn load_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "name = \"demo\"\n").unwrap();
        let err = ConfigData::load(&path).unwrap_err();
        assert!(matches!(err, CfgliteError::UnsupportedFormat { ref extension, .. } if extension == "toml"));
    }

    #[test]
    fn load_yaml_and_json_agree() {
        let dir = tempfile::tempdir().unwrap();
        let yaml = dir.path().join("c.yaml");
        let json_path = dir.path().join("c.json");
        std::fs::write(&yaml, "name: demo\nmode: lite\nenabled: true\n").unwrap();
        std::fs::write(&json_path, r#"{"name":"demo","mode":"lite","enabled":true}"#).unwrap();
        assert_eq!(ConfigData::load(&yaml).unwrap(), ConfigData::load(&json_path).unwrap());
    }

    #[test]
    fn serde_requires_object() {
        let ok: ConfigData = serde_json::from_value(json!({"a": 1})).unwrap();
        assert_eq!(serde_json::to_value(&ok).unwrap(), json!({"a": 1}));
        assert!(serde_json::from_value::<ConfigData>(json!([1, 2])).is_err());
    }
}
