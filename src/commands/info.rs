//! # Info Command Implementation
//!
//! Prints debugging information about the environment: operating system,
//! CPU, shell, and the versions of node, yarn, npm, git and java. Tools that
//! are not installed show as `Not Found`.
//!
//! This command is a safe, read-only operation that does not modify any files.

use anyhow::Result;
use console::style;

use xams::diagnostics;
use xams::dispatch::CommandStatus;
use xams::options::NormalizedOptions;
use xams::output::{emoji, OutputConfig};

/// Execute the `info` command.
pub fn execute(output: &OutputConfig, _options: NormalizedOptions) -> Result<CommandStatus> {
    println!(
        "{} {}",
        emoji(output, "🔍", "[INFO]"),
        style("Environment Info:").bold()
    );
    print!("{}", diagnostics::collect());

    Ok(CommandStatus::Success)
}
