//! # Serve Command Implementation
//!
//! Starts the project's dev server. The server command comes from
//! `XAMS_SERVE_COMMAND` (default `npm run serve --`); `--port` and `--open`
//! are forwarded to it.

use anyhow::Result;

use xams::defaults;
use xams::dispatch::CommandStatus;
use xams::options::NormalizedOptions;
use xams::serve::DevServer;

/// Execute the `serve` command.
pub fn execute(options: NormalizedOptions) -> Result<CommandStatus> {
    let server = DevServer::plan(&defaults::serve_command(), &options)?;

    if server.launch()? {
        Ok(CommandStatus::Success)
    } else {
        Ok(CommandStatus::Failed)
    }
}
