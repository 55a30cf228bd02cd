//! # Validate Command
//!
//! Default command: run the pipeline on one config file and report the
//! result on the console.

use std::path::Path;

use cfglite_core::ToolSettings;

use crate::output;
use crate::pipeline::{run_pipeline, PipelineError, PipelineOutcome};

/// Validate `config_path` and emit its bundle.
///
/// Returns exit code: 0 on success, 1 on any failure.
pub fn run_validate(config_path: &Path, settings: &ToolSettings) -> u8 {
    tracing::debug!(config = %config_path.display(), "validating config");

    match run_pipeline(config_path, settings) {
        Ok(outcome) => {
            report_success(&outcome, settings);
            0
        }
        Err(e) => {
            report_failure(&e);
            crate::EXIT_FAILURE
        }
    }
}

fn report_success(outcome: &PipelineOutcome, settings: &ToolSettings) {
    output::header(&format!("{} v{}", settings.tool_name, settings.version));
    output::success(&format!("{} Output", settings.tool_name));
    output::json(&outcome.config.to_value());
    output::success_with("Bundle written to", outcome.bundle_path.display());
}

fn report_failure(err: &PipelineError) {
    match err {
        PipelineError::BaseSchema(e) if err.is_schema_rejection() => {
            output::schema_failure(&e.message());
        }
        other => output::error(&other.user_message()),
    }
    tracing::debug!(error = ?err, "pipeline stopped");
}
