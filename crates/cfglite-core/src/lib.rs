//! # cfglite-core — Foundational Types for Configurator Lite
//!
//! Leaf crate of the workspace. Everything the validation pipeline passes
//! between stages is defined here, so the schema and CLI crates agree on a
//! single representation.
//!
//! ## Key Design Principles
//!
//! 1. **One config representation.** [`ConfigData`] is a JSON object map,
//!    whether the file on disk was YAML or JSON. YAML is converted at load
//!    time; nothing downstream sees `serde_yaml` values.
//!
//! 2. **Explicit settings.** Tool name, version, build date and every
//!    filesystem location travel in [`ToolSettings`]. No stage reads a
//!    global or the working directory on its own.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] renders as
//!    `YYYY-MM-DDTHH:MM:SSZ` and nothing else.
//!
//! 4. **Bundles are write-once.** [`Bundle`] has no mutating methods;
//!    [`emit_bundle`] builds one and persists it in a single step.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `cfglite-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bundle;
pub mod config;
pub mod error;
pub mod settings;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use bundle::{bundle_file_name, emit_bundle, Bundle, UNNAMED_BUNDLE};
pub use config::{ConfigData, ConfigFormat};
pub use error::CfgliteError;
pub use settings::{ToolSettings, BUILD_DATE, TOOL_NAME, TOOL_VERSION};
pub use temporal::Timestamp;
