//! # cfglite CLI entry point
//!
//! Parses command-line arguments, builds [`ToolSettings`], and dispatches to
//! the version, init, or validate handler.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cfglite_cli::init::run_init;
use cfglite_cli::validate::run_validate;
use cfglite_cli::{find_base_dir, output, EXIT_FAILURE};
use cfglite_core::ToolSettings;

/// Configurator Lite — validate a config file and emit a bundle.
///
/// The config is checked against a base JSON Schema and then against the
/// lite contract. On success a `bundle-<name>.json` is written to the
/// output directory.
#[derive(Parser, Debug)]
#[command(name = "cfglite", about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Config file to validate (.yml, .yaml or .json).
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Show version and exit.
    #[arg(long)]
    version: bool,

    /// Create a default config.yaml in the current directory.
    #[arg(long)]
    init: bool,

    /// Directory holding `schemas/` and `dist/`. Defaults to the nearest
    /// ancestor of the current directory that contains the schemas.
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Base JSON Schema document.
    #[arg(long, value_name = "FILE")]
    schema: Option<PathBuf>,

    /// Lite contract document.
    #[arg(long, value_name = "FILE")]
    contract: Option<PathBuf>,

    /// Output directory for bundles.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn settings(&self, cwd: PathBuf) -> ToolSettings {
        let base_dir = self
            .base_dir
            .clone()
            .or_else(|| find_base_dir(&cwd))
            .unwrap_or(cwd);
        tracing::debug!(base_dir = %base_dir.display(), "resolved base directory");

        let mut settings = ToolSettings::with_base_dir(base_dir);
        if let Some(ref path) = self.schema {
            settings = settings.base_schema(path);
        }
        if let Some(ref path) = self.contract {
            settings = settings.lite_contract(path);
        }
        if let Some(ref dir) = self.output_dir {
            settings = settings.output_dir(dir);
        }
        settings
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let settings = cli.settings(cwd.clone());

    if cli.version {
        println!("{}", settings.version_line());
        return ExitCode::SUCCESS;
    }

    if cli.init {
        return match run_init(&cwd) {
            Ok(code) => ExitCode::from(code),
            Err(e) => {
                tracing::error!("{e:#}");
                output::error(&format!("{e:#}"));
                ExitCode::from(EXIT_FAILURE)
            }
        };
    }

    let Some(config) = cli.config.as_deref() else {
        output::notice("No config file provided");
        return ExitCode::SUCCESS;
    };

    ExitCode::from(run_validate(config, &settings))
}
