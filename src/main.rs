//! # xams CLI
//!
//! This is the binary entry point for the `xams` command-line tool.
//!
//! Its primary responsibilities are:
//! - Installing the process-wide panic backstop and logging.
//! - Dispatching the command line through the `xams` library.
//! - Translating the dispatch result or a top-level error into an exit code.

mod cli;
mod commands;

use std::process::ExitCode;

fn main() -> ExitCode {
    cli::install_panic_hook();

    match cli::run(std::env::args_os()) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
