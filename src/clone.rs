//! # Template Clone Workflow
//!
//! Fetches a template repository into a local directory and optionally strips
//! its `.git` directory so the new project starts untracked.
//!
//! The workflow runs once per invocation through these states:
//!
//! ```text
//! Init -> Cloning -> CloneOk -----> [Cleanup] -> Done
//!                 \-> CloneFailed ------------> Done
//! ```
//!
//! The progress indicator is stopped as soon as the adapter returns, before
//! cleanup and before the final notice. A failed clone is reported and not
//! retried. Cleanup failures are reported but never undo the clone.
//!
//! The destination is not checked before cloning; an existing non-empty
//! directory makes `git` fail and that failure is reported like any other.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::defaults::{LOADING_MESSAGE, METADATA_DIR};
use crate::error::{Error, Result};
use crate::git::{CloneOptions, RemoteClone};
use crate::options::NormalizedOptions;
use crate::progress::{Notice, Reporter};

/// Everything needed to run one clone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    pub repository: String,
    /// Absolute destination directory.
    pub destination: PathBuf,
    pub checkout: Option<String>,
    pub remove_metadata: bool,
}

impl CloneRequest {
    /// Build a request from the `clone` positionals and normalized options.
    ///
    /// `path` is resolved against the current working directory.
    pub fn from_options(repository: &str, path: &str, options: &NormalizedOptions) -> Result<Self> {
        Ok(Self {
            repository: repository.to_string(),
            destination: std::path::absolute(path)?,
            checkout: options.get_str("checkout").map(str::to_string),
            remove_metadata: options.get_bool("remove"),
        })
    }

    fn clone_options(&self) -> CloneOptions {
        CloneOptions {
            checkout: self.checkout.clone(),
        }
    }
}

/// Workflow states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloneState {
    Init,
    Cloning,
    CloneOk,
    CloneFailed,
    Cleanup,
    Done,
}

/// Final result of the transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloneOutcome {
    Success(PathBuf),
    Failure(String),
}

impl CloneOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CloneOutcome::Success(_))
    }
}

/// Result of the metadata-stripping step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupStatus {
    Removed,
    /// There was no metadata directory to remove.
    Absent,
    Failed(String),
}

/// What happened during one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneReport {
    pub outcome: CloneOutcome,
    /// `None` when cleanup was not requested or the clone failed.
    pub cleanup: Option<CleanupStatus>,
    /// Every state the run passed through, in order.
    pub transitions: Vec<CloneState>,
}

struct Machine {
    transitions: Vec<CloneState>,
}

impl Machine {
    fn new() -> Self {
        Self {
            transitions: vec![CloneState::Init],
        }
    }

    fn enter(&mut self, state: CloneState) {
        debug!("clone: {:?} -> {:?}", self.transitions.last(), state);
        self.transitions.push(state);
    }
}

/// Run the clone workflow for `request`.
pub fn run<A, R>(request: &CloneRequest, adapter: &A, reporter: &mut R) -> CloneReport
where
    A: RemoteClone + ?Sized,
    R: Reporter + ?Sized,
{
    let mut machine = Machine::new();
    let destination = request.destination.clone();

    reporter.notice(Notice::Fetching {
        destination: destination.clone(),
    });

    machine.enter(CloneState::Cloning);
    let handle = reporter.start(LOADING_MESSAGE);
    let result = adapter.clone_repo(&request.repository, &destination, &request.clone_options());
    reporter.stop(handle);

    if let Err(e) = result {
        machine.enter(CloneState::CloneFailed);
        let detail = e.to_string();
        machine.enter(CloneState::Done);
        reporter.notice(Notice::CloneFailed {
            detail: detail.clone(),
        });
        return CloneReport {
            outcome: CloneOutcome::Failure(detail),
            cleanup: None,
            transitions: machine.transitions,
        };
    }
    machine.enter(CloneState::CloneOk);

    let cleanup = if request.remove_metadata {
        machine.enter(CloneState::Cleanup);
        let status = strip_metadata(&destination);
        if let CleanupStatus::Failed(detail) = &status {
            warn!("cleanup of {} failed: {}", destination.display(), detail);
            reporter.notice(Notice::CleanupFailed {
                detail: detail.clone(),
            });
        }
        Some(status)
    } else {
        None
    };

    machine.enter(CloneState::Done);
    reporter.notice(Notice::Cloned {
        destination: destination.clone(),
    });

    CloneReport {
        outcome: CloneOutcome::Success(destination),
        cleanup,
        transitions: machine.transitions,
    }
}

/// Remove `<destination>/.git` recursively.
///
/// A missing directory is [`CleanupStatus::Absent`], not an error.
pub fn strip_metadata(destination: &Path) -> CleanupStatus {
    let metadata_dir = destination.join(METADATA_DIR);

    match fs::remove_dir_all(&metadata_dir) {
        Ok(()) => {
            debug!("removed {}", metadata_dir.display());
            CleanupStatus::Removed
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => CleanupStatus::Absent,
        Err(e) => CleanupStatus::Failed(
            Error::Cleanup {
                path: metadata_dir,
                message: e.to_string(),
            }
            .to_string(),
        ),
    }
}
