//! # Validation Pipeline
//!
//! parse → base schema → lite contract → bundle, each stage fail-fast.
//! Schemas are loaded fresh on every call. The bundle is only written once
//! both validation stages have passed.

use std::path::{Path, PathBuf};

use thiserror::Error;

use cfglite_core::{emit_bundle, CfgliteError, ConfigData, ToolSettings};
use cfglite_schema::{enforce, BaseSchemaValidator, ContractLoadError, ContractViolation, LiteContract, SchemaValidationError};

/// The stage at which a run stopped.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The config file is missing, has an unsupported extension, or does not parse.
    #[error(transparent)]
    Config(CfgliteError),

    /// The base schema could not be loaded, could not be compiled, or rejected the config.
    #[error(transparent)]
    BaseSchema(#[from] SchemaValidationError),

    /// The lite contract document could not be loaded.
    #[error(transparent)]
    ContractLoad(#[from] ContractLoadError),

    /// The config violates the lite contract.
    #[error(transparent)]
    Contract(#[from] ContractViolation),

    /// Writing the bundle failed.
    #[error("failed to write bundle: {0}")]
    Emit(CfgliteError),
}

impl PipelineError {
    /// The one-line diagnostic shown after `ERROR:`.
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(CfgliteError::FileNotFound { .. }) => "Config file not found".to_string(),
            Self::Config(CfgliteError::UnsupportedFormat { .. }) => "Unsupported config format".to_string(),
            other => other.to_string(),
        }
    }

    /// Whether the config itself was rejected by the base schema, as
    /// opposed to the schema failing to load.
    pub fn is_schema_rejection(&self) -> bool {
        matches!(self, Self::BaseSchema(SchemaValidationError::ValidationFailed { .. }))
    }
}

/// A successful run.
#[derive(Debug)]
pub struct PipelineOutcome {
    /// The config, as validated and bundled.
    pub config: ConfigData,
    /// Where the bundle was written.
    pub bundle_path: PathBuf,
}

/// Load `config_path`, check it against the schema and contract named in
/// `settings`, and write its bundle.
///
/// # Errors
///
/// Returns the first failure as a [`PipelineError`].
pub fn run_pipeline(config_path: &Path, settings: &ToolSettings) -> Result<PipelineOutcome, PipelineError> {
    let config = ConfigData::load(config_path).map_err(PipelineError::Config)?;

    check_config(&config, settings)?;

    let bundle_path = emit_bundle(&config, &settings.tool_name, &settings.version, &settings.output_dir)
        .map_err(PipelineError::Emit)?;

    Ok(PipelineOutcome { config, bundle_path })
}

/// Run both validation stages against an already-parsed config.
///
/// # Errors
///
/// Returns [`PipelineError::BaseSchema`], [`PipelineError::ContractLoad`]
/// or [`PipelineError::Contract`].
pub fn check_config(config: &ConfigData, settings: &ToolSettings) -> Result<(), PipelineError> {
    BaseSchemaValidator::from_path(&settings.base_schema_path)?.validate(config)?;
    tracing::info!(schema = %settings.base_schema_path.display(), "base schema validation passed");

    let contract = LiteContract::load(&settings.lite_contract_path)?;
    enforce(config, &contract)?;
    tracing::info!(rules = contract.len(), "lite contract satisfied");

    Ok(())
}
