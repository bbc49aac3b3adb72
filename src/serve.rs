//! Dev-server launcher for `serve`.
//!
//! The dev server itself is an external program. This module only turns the
//! configured command line plus the normalized `serve` options into a process
//! invocation and waits for it.

use std::process::Command;

use log::debug;

use crate::error::{Error, Result};
use crate::options::NormalizedOptions;

/// A resolved dev-server invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DevServer {
    pub program: String,
    pub args: Vec<String>,
}

impl DevServer {
    /// Build the invocation from a whitespace-separated base command line and
    /// the `serve` options (`port`, `open`).
    pub fn plan(command_line: &str, options: &NormalizedOptions) -> Result<Self> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next().ok_or_else(|| Error::Launch {
            program: command_line.to_string(),
            message: "empty dev-server command".to_string(),
        })?;
        let mut args: Vec<String> = words.collect();

        if let Some(port) = options.get_str("port") {
            args.push("--port".to_string());
            args.push(port.to_string());
        }
        if options.get_bool("open") {
            args.push("--open".to_string());
        }

        Ok(Self { program, args })
    }

    /// Run the dev server in the foreground and return whether it exited
    /// successfully.
    pub fn launch(&self) -> Result<bool> {
        debug!("launching {} {}", self.program, self.args.join(" "));
        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| Error::Launch {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        Ok(status.success())
    }
}
