//! Default values for xams.
//!
//! This module provides centralized default values used across commands,
//! ensuring consistency and avoiding duplication.

use std::env;

/// Name of the version-control metadata directory stripped by `clone --remove`.
pub const METADATA_DIR: &str = ".git";

/// Message shown next to the spinner while a template is being fetched.
pub const LOADING_MESSAGE: &str = "Loading...";

/// Oldest git release the clone adapter is known to work with.
///
/// 2.24 introduced `--end-of-options`, which guards the checkout ref.
pub const MIN_GIT_VERSION: &str = "2.24.0";

/// Environment variable overriding the dev-server command used by `serve`.
pub const SERVE_COMMAND_ENV: &str = "XAMS_SERVE_COMMAND";

/// Dev-server command used when `XAMS_SERVE_COMMAND` is not set.
pub const DEFAULT_SERVE_COMMAND: &str = "npm run serve --";

/// Returns the dev-server command line for `serve`.
///
/// Reads `XAMS_SERVE_COMMAND`, falling back to [`DEFAULT_SERVE_COMMAND`] when
/// the variable is unset or blank.
pub fn serve_command() -> String {
    env::var(SERVE_COMMAND_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_SERVE_COMMAND.to_string())
}
