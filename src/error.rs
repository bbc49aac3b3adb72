//! # Error Handling
//!
//! This module defines the error type shared by the `xams` library. It uses
//! `thiserror` so each failure mode carries the context a user needs to act
//! on it: the repository and ref for clone failures, the directory for
//! cleanup failures, the program for launch failures.
//!
//! The binary wraps these in `anyhow` at the command level; library code
//! returns [`Result<T>`].

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for xams operations
#[derive(Error, Debug)]
pub enum Error {
    /// Cloning a template repository failed.
    ///
    /// Covers both the transfer itself and the follow-up checkout of the
    /// requested ref.
    #[error("Git clone error for {url}{}: {message}{}",
        r#ref.as_ref().map(|r| format!("@{}", r)).unwrap_or_default(),
        hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    GitClone {
        url: String,
        r#ref: Option<String>,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A git command other than the transfer failed.
    #[error("Git command failed: {command} - {stderr}")]
    GitCommand { command: String, stderr: String },

    /// Removing the version-control metadata directory failed.
    #[error("Could not remove {}: {message}", path.display())]
    Cleanup { path: PathBuf, message: String },

    /// An external program (dev server, diagnostics probe) could not be started.
    #[error("Failed to launch {program}: {message}")]
    Launch { program: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A semantic versioning parsing error, wrapped from `semver::Error`.
    #[error("Semver parsing error: {0}")]
    Semver(#[from] semver::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
