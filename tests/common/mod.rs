//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let Some(template) = TemplateRepo::new() else { return };
//!     let fixture = TestFixture::new();
//!     fixture.command().arg("clone").arg(template.url()).arg("myapp");
//! }
//! ```

#![allow(dead_code)]

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::git_available;
    #[allow(unused_imports)]
    pub use super::TemplateRepo;
    pub use super::TestFixture;
}

/// Whether a usable `git` binary is on the PATH.
///
/// Tests that need git return early when it is missing.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=xams",
            "-c",
            "user.email=xams@example.com",
            "-c",
            "commit.gpgsign=false",
        ])
        .arg("-C")
        .arg(dir)
        .args(args)
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}

/// A local template repository with two branches.
///
/// The default branch holds `README.md`; the `develop` branch adds
/// `DEVELOP.md`.
pub struct TemplateRepo {
    _temp_dir: assert_fs::TempDir,
    path: PathBuf,
}

impl TemplateRepo {
    /// Create the repository, or `None` when git is not installed.
    pub fn new() -> Option<Self> {
        if !git_available() {
            eprintln!("git not available, skipping");
            return None;
        }

        let temp_dir = assert_fs::TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("template");
        fs::create_dir_all(&path).expect("Failed to create template directory");

        git(&path, &["init", "--quiet"]);
        fs::write(path.join("README.md"), "# Template\n").expect("Failed to write README");
        git(&path, &["add", "."]);
        git(&path, &["commit", "--quiet", "-m", "initial template"]);

        git(&path, &["checkout", "--quiet", "-b", "develop"]);
        fs::write(path.join("DEVELOP.md"), "develop only\n").expect("Failed to write DEVELOP");
        git(&path, &["add", "."]);
        git(&path, &["commit", "--quiet", "-m", "develop changes"]);
        git(&path, &["checkout", "--quiet", "-"]);

        Some(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    /// Clone source for the repository.
    pub fn url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// A temporary working directory for running the CLI.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a CLI command running in the fixture directory with colors off.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = cargo_bin_cmd!("xams");
        cmd.current_dir(self.path()).env("NO_COLOR", "1");
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
