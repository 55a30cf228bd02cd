//! # Lite Contract Enforcement
//!
//! Second validation stage. A lite contract is a JSON object mapping field
//! names to rule descriptors:
//!
//! ```json
//! {"name": "string", "mode": ["lite", "full"], "enabled": "boolean"}
//! ```
//!
//! | Descriptor       | Rule                                   |
//! |------------------|----------------------------------------|
//! | `"string"`       | value must be a JSON string            |
//! | `"boolean"`      | value must be a JSON boolean (not 0/1) |
//! | `[v1, v2, ...]`  | value must equal one of the listed     |
//!
//! Every contract key is required. Keys are checked in the order they are
//! declared in the contract file, and enforcement stops at the first
//! violation.

use std::fmt;
use std::path::Path;

use cfglite_core::ConfigData;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::loader::{load_schema, SchemaLoadError};

/// One rule from a lite contract.
#[derive(Debug, Clone, PartialEq)]
pub enum RuleDescriptor {
    /// `"string"`
    StringType,
    /// `"boolean"`
    BooleanType,
    /// A list of allowed values, in contract order.
    Enum(Vec<Value>),
}

impl RuleDescriptor {
    /// Parse a descriptor from its JSON form.
    ///
    /// Returns `None` for anything other than `"string"`, `"boolean"` or an
    /// array.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) if s == "string" => Some(Self::StringType),
            Value::String(s) if s == "boolean" => Some(Self::BooleanType),
            Value::Array(allowed) => Some(Self::Enum(allowed.clone())),
            _ => None,
        }
    }

    /// Check one present value against this rule.
    ///
    /// # Errors
    ///
    /// Returns [`ContractViolation::TypeMismatch`] or
    /// [`ContractViolation::EnumViolation`] naming `key`.
    pub fn check(&self, key: &str, value: &Value) -> Result<(), ContractViolation> {
        match self {
            Self::StringType if !value.is_string() => Err(ContractViolation::TypeMismatch {
                key: key.to_string(),
                expected: "string",
            }),
            Self::BooleanType if !value.is_boolean() => Err(ContractViolation::TypeMismatch {
                key: key.to_string(),
                expected: "boolean",
            }),
            Self::Enum(allowed) if !allowed.iter().any(|a| values_equal(a, value)) => {
                Err(ContractViolation::EnumViolation {
                    key: key.to_string(),
                    allowed: allowed.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Why a config failed the lite contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ContractViolation {
    /// A contract key is absent from the config.
    #[error("Missing required key: {key}")]
    MissingKey {
        /// The absent key.
        key: String,
    },

    /// A value has the wrong JSON type.
    #[error("{key} must be a {expected}")]
    TypeMismatch {
        /// The offending key.
        key: String,
        /// `"string"` or `"boolean"`.
        expected: &'static str,
    },

    /// A value is not among the allowed values.
    #[error("{key} must be one of {}", AllowedList(.allowed))]
    EnumViolation {
        /// The offending key.
        key: String,
        /// The allowed values, in contract order.
        allowed: Vec<Value>,
    },
}

impl ContractViolation {
    /// The config key the violation is about.
    pub fn key(&self) -> &str {
        match self {
            Self::MissingKey { key }
            | Self::TypeMismatch { key, .. }
            | Self::EnumViolation { key, .. } => key,
        }
    }
}

/// Renders allowed values as `["lite", "full"]`.
struct AllowedList<'a>(&'a [Value]);

impl fmt::Display for AllowedList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]")
    }
}

/// Error reading a lite contract document.
#[derive(Error, Debug)]
pub enum ContractLoadError {
    /// The contract file could not be read or parsed.
    #[error(transparent)]
    Load(#[from] SchemaLoadError),

    /// The contract's top level is not a JSON object.
    #[error("lite contract must be a JSON object")]
    NotAnObject,

    /// A descriptor is not `"string"`, `"boolean"` or an array.
    #[error("unknown rule for key '{key}': {rule}")]
    UnknownRule {
        /// The key carrying the descriptor.
        key: String,
        /// The descriptor as found.
        rule: Value,
    },
}

/// An ordered set of field rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LiteContract {
    rules: Vec<(String, RuleDescriptor)>,
}

impl LiteContract {
    /// Build a contract from `(key, rule)` pairs, keeping their order.
    pub fn new(rules: impl IntoIterator<Item = (String, RuleDescriptor)>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    /// Parse a contract from its JSON object form.
    ///
    /// # Errors
    ///
    /// Returns [`ContractLoadError::NotAnObject`] or
    /// [`ContractLoadError::UnknownRule`].
    pub fn from_json(value: &Value) -> Result<Self, ContractLoadError> {
        let map: &Map<String, Value> = value.as_object().ok_or(ContractLoadError::NotAnObject)?;
        let mut rules = Vec::with_capacity(map.len());
        for (key, rule) in map {
            let descriptor =
                RuleDescriptor::from_json(rule).ok_or_else(|| ContractLoadError::UnknownRule {
                    key: key.clone(),
                    rule: rule.clone(),
                })?;
            rules.push((key.clone(), descriptor));
        }
        Ok(Self { rules })
    }

    /// Load a contract file from disk.
    ///
    /// # Errors
    ///
    /// Returns [`ContractLoadError`] if the file is missing, is not JSON, or
    /// contains an unknown descriptor.
    pub fn load(path: &Path) -> Result<Self, ContractLoadError> {
        let value = load_schema(path)?;
        let contract = Self::from_json(&value)?;
        tracing::debug!(path = %path.display(), rules = contract.len(), "loaded lite contract");
        Ok(contract)
    }

    /// The rules, in enforcement order.
    pub fn rules(&self) -> &[(String, RuleDescriptor)] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the contract has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Enforce this contract against `data`.
    ///
    /// # Errors
    ///
    /// Returns the first [`ContractViolation`] in contract order.
    pub fn enforce(&self, data: &ConfigData) -> Result<(), ContractViolation> {
        for (key, rule) in &self.rules {
            let value = data.get(key).ok_or_else(|| ContractViolation::MissingKey {
                key: key.clone(),
            })?;
            rule.check(key, value)?;
        }
        Ok(())
    }
}

/// Enforce `contract` against `data`, stopping at the first violation.
///
/// # Errors
///
/// Returns the first [`ContractViolation`] in contract order.
pub fn enforce(data: &ConfigData, contract: &LiteContract) -> Result<(), ContractViolation> {
    let result = contract.enforce(data);
    if let Err(violation) = &result {
        tracing::warn!(key = violation.key(), "config rejected by lite contract");
    }
    result
}

/// JSON equality, except that two numbers are equal when their values are
/// (`1` == `1.0`). Booleans never equal numbers.
fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) if x.is_f64() || y.is_f64() => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}
