//! Remote clone adapter backed by the system `git` binary.
//!
//! Using the system git means authentication is whatever the user already
//! has configured:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig

use std::path::Path;
use std::process::Command;

use log::{debug, trace, warn};
use semver::Version;

use crate::defaults::MIN_GIT_VERSION;
use crate::error::{Error, Result};

/// Options passed through to the adapter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Branch, tag or commit to check out once the transfer finishes.
    pub checkout: Option<String>,
}

/// Transfers a remote repository into a local directory.
///
/// Implementations report every transport failure through the returned
/// `Result`; they never panic for network, auth or bad-ref errors. On `Ok`
/// the destination holds a full checkout honoring `options.checkout`.
pub trait RemoteClone {
    fn clone_repo(&self, source: &str, destination: &Path, options: &CloneOptions) -> Result<()>;
}

/// [`RemoteClone`] implementation that shells out to `git`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: "git".to_string(),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteClone for GitCli {
    fn clone_repo(&self, source: &str, destination: &Path, options: &CloneOptions) -> Result<()> {
        let clone_error = |message: String| Error::GitClone {
            url: source.to_string(),
            r#ref: options.checkout.clone(),
            hint: auth_hint(&message),
            message,
        };

        debug!("{} clone {} {}", self.program, source, destination.display());
        let output = Command::new(&self.program)
            .args(["clone", "--quiet", "--", source])
            .arg(destination)
            .output()
            .map_err(|e| clone_error(e.to_string()))?;

        if !output.status.success() {
            return Err(clone_error(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        if let Some(reference) = &options.checkout {
            debug!("{} checkout {}", self.program, reference);
            let output = Command::new(&self.program)
                .arg("-C")
                .arg(destination)
                .args(["checkout", "--quiet", "--end-of-options", reference.as_str()])
                .output()
                .map_err(|e| clone_error(e.to_string()))?;

            if !output.status.success() {
                return Err(clone_error(
                    String::from_utf8_lossy(&output.stderr).trim().to_string(),
                ));
            }
        }

        trace!("clone of {} finished", source);
        Ok(())
    }
}

fn auth_hint(stderr: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "Make sure you have access to the repository: add your SSH key to \
             ssh-agent, configure git credentials, or set up a personal access token"
                .to_string(),
        )
    } else {
        None
    }
}

/// Parse the output of `git --version` into a semantic version.
///
/// Handles vendor suffixes such as `2.39.3 (Apple Git-146)` and
/// `2.45.1.windows.1`.
pub fn parse_git_version(output: &str) -> Option<Version> {
    let raw = output.trim().strip_prefix("git version ")?;
    let token = raw.split_whitespace().next()?;

    let mut parts = token
        .split('.')
        .map_while(|p| p.parse::<u64>().ok());
    let major = parts.next()?;
    let minor = parts.next().unwrap_or(0);
    let patch = parts.next().unwrap_or(0);

    Some(Version::new(major, minor, patch))
}

/// Query the installed git version.
pub fn git_version(program: &str) -> Result<Version> {
    let output = Command::new(program)
        .arg("--version")
        .output()
        .map_err(|e| Error::GitCommand {
            command: "--version".to_string(),
            stderr: e.to_string(),
        })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    match parse_git_version(&stdout) {
        Some(version) => Ok(version),
        None => Err(Error::GitCommand {
            command: "--version".to_string(),
            stderr: format!("unrecognized output: {}", stdout.trim()),
        }),
    }
}

fn min_git_version() -> Result<Version> {
    Ok(Version::parse(MIN_GIT_VERSION)?)
}

/// Warn when git is missing or older than [`MIN_GIT_VERSION`].
///
/// Never fails; returns whether the prerequisite is satisfied.
pub fn check_git_prerequisite(program: &str) -> bool {
    let wanted = match min_git_version() {
        Ok(v) => v,
        Err(e) => {
            warn!("{}", e);
            return true;
        }
    };

    match git_version(program) {
        Ok(found) if found >= wanted => {
            debug!("found git {}", found);
            true
        }
        Ok(found) => {
            warn!("git {} is installed, but xams expects git {} or newer", found, wanted);
            false
        }
        Err(e) => {
            warn!("could not determine the git version: {}", e);
            false
        }
    }
}
