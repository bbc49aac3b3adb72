//! # Clone Command Implementation
//!
//! This module implements the `clone` subcommand, which generates a new
//! project from a remote template repository.
//!
//! ## Functionality
//!
//! - **Fetch**: clones `<repository>` into `<path>` with the system `git`,
//!   showing a spinner while the transfer runs.
//! - **Checkout**: `-c/--checkout <branch>` checks out a branch, tag or
//!   commit once the transfer finishes.
//! - **Metadata stripping**: `-r/--remove` deletes `<path>/.git` after a
//!   successful clone so the new project starts untracked.
//!
//! The destination is not checked beforehand; cloning into an existing
//! non-empty directory fails and is reported like any other clone failure.

use anyhow::{Context, Result};
use log::info;

use xams::clone::{self, CloneOutcome, CloneRequest};
use xams::dispatch::CommandStatus;
use xams::git::{self, GitCli};
use xams::options::NormalizedOptions;
use xams::output::OutputConfig;
use xams::progress::TerminalReporter;

/// Execute the `clone` command.
///
/// Returns [`CommandStatus::Failed`] when the transfer fails; the failure
/// detail has already been printed by then.
pub fn execute(
    output: &OutputConfig,
    repository: &str,
    path: &str,
    options: NormalizedOptions,
) -> Result<CommandStatus> {
    let request = CloneRequest::from_options(repository, path, &options)
        .with_context(|| format!("Failed to resolve destination {}", path))?;
    info!("clone {} -> {} {}", repository, request.destination.display(), options);

    let adapter = GitCli::new();
    git::check_git_prerequisite("git");

    let mut reporter = TerminalReporter::new(*output);
    let report = clone::run(&request, &adapter, &mut reporter);

    Ok(match report.outcome {
        CloneOutcome::Success(_) => CommandStatus::Success,
        CloneOutcome::Failure(_) => CommandStatus::Failed,
    })
}
