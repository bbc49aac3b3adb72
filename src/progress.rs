//! Progress reporting for long-running operations.
//!
//! A [`Reporter`] owns the busy indicator and prints the user-visible
//! notices of a workflow. The indicator's lifecycle is explicit: `start`
//! hands out a handle and `stop` consumes it, so a handle cannot be stopped
//! twice or used after it was stopped.

use std::path::PathBuf;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::output::{self, OutputConfig};

/// A user-visible notice emitted by a workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The template is being fetched into `destination`.
    Fetching { destination: PathBuf },
    /// The template was cloned successfully.
    Cloned { destination: PathBuf },
    /// The clone failed with the given detail.
    CloneFailed { detail: String },
    /// The metadata directory could not be removed.
    CleanupFailed { detail: String },
}

/// Sink for progress and notices.
pub trait Reporter {
    /// Token for an active indicator.
    type Handle;

    /// Start the busy indicator.
    fn start(&mut self, message: &str) -> Self::Handle;

    /// Stop the busy indicator, consuming its handle.
    fn stop(&mut self, handle: Self::Handle);

    /// Emit a notice.
    fn notice(&mut self, notice: Notice);
}

/// [`Reporter`] that draws an `indicatif` spinner and prints notices.
///
/// Notices go to stdout, except failures which go to stderr.
#[derive(Debug, Clone)]
pub struct TerminalReporter {
    config: OutputConfig,
}

impl TerminalReporter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Render a notice the way it is printed.
    pub fn render(&self, notice: &Notice) -> String {
        match notice {
            Notice::Fetching { destination } => output::info_line(
                &self.config,
                &format!("Fetching template into {} ...", destination.display()),
            ),
            Notice::Cloned { destination } => output::success_line(
                &self.config,
                &format!("Template ready at {}", destination.display()),
            ),
            Notice::CloneFailed { detail } => {
                output::error_line(&self.config, &format!("Clone failed: {}", detail))
            }
            Notice::CleanupFailed { detail } => output::warning_line(
                &self.config,
                &format!("Could not remove version-control metadata: {}", detail),
            ),
        }
    }
}

impl Reporter for TerminalReporter {
    type Handle = ProgressBar;

    fn start(&mut self, message: &str) -> ProgressBar {
        let pb = if self.config.use_color {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn stop(&mut self, handle: ProgressBar) {
        handle.finish_and_clear();
    }

    fn notice(&mut self, notice: Notice) {
        let line = self.render(&notice);
        match notice {
            Notice::CloneFailed { .. } | Notice::CleanupFailed { .. } => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }
}
