//! # cfglite-cli — Configurator Lite Command-Line Interface
//!
//! Provides the `cfglite` binary:
//!
//! ```bash
//! cfglite --version          # print tool name, version and build date
//! cfglite --init             # write a default config.yaml
//! cfglite config.yaml        # validate and bundle
//! ```
//!
//! Validation runs in a fixed order, stopping at the first failure:
//! parse → base schema → lite contract → bundle. Nothing is written to the
//! output directory unless both validation stages pass.
//!
//! ## Exit Codes
//!
//! - `0` — success, or an informational path (`--version`, `--init`, no config).
//! - `1` — any validation failure, missing file, unsupported format, or IO error.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives in `main.rs`; handlers here take explicit
//!   [`ToolSettings`](cfglite_core::ToolSettings).
//! - Validation and bundling are delegated to `cfglite-schema` and
//!   `cfglite-core`.

pub mod init;
pub mod output;
pub mod pipeline;
pub mod validate;

use std::path::{Path, PathBuf};

/// Exit status for every failure path.
pub const EXIT_FAILURE: u8 = 1;

/// Walk up from `start` to find the directory holding the shipped schemas.
///
/// The base directory is the first ancestor containing
/// `schemas/lite.schema.json`.
pub fn find_base_dir(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(cfglite_core::settings::LITE_CONTRACT_RELATIVE_PATH).is_file())
        .map(Path::to_path_buf)
}
