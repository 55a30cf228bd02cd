//! # cfglite-schema — Config Validation
//!
//! A config document passes two gates before it may be bundled:
//!
//! 1. **Base schema** ([`validate`]) — the whole document is checked against
//!    a JSON Schema document using the `jsonschema` crate. Type constraints,
//!    required properties, enums and nesting are whatever that schema says.
//!
//! 2. **Lite contract** ([`contract`]) — a flat mapping of field name to
//!    rule (`"string"`, `"boolean"`, or a list of allowed values), enforced
//!    key by key in declaration order. The first violation stops
//!    enforcement; violations are never aggregated.
//!
//! Schema documents are read with [`loader::load_schema`].
//!
//! ## Crate Policy
//!
//! - Depends only on `cfglite-core` internally.
//! - JSON Schema semantics are delegated to `jsonschema`, never reimplemented.
//! - Every failure is a typed error; nothing here prints or exits.

pub mod contract;
pub mod loader;
pub mod validate;

pub use contract::{enforce, ContractLoadError, ContractViolation, LiteContract, RuleDescriptor};
pub use loader::{load_schema, SchemaLoadError};
pub use validate::{validate, BaseSchemaValidator, SchemaValidationError, Violation};
