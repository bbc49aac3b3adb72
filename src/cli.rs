//! CLI setup and command dispatch

use std::any::Any;
use std::ffi::OsString;
use std::panic;

use anyhow::Result;
use log::error;

use xams::dispatch::{CommandStatus, Dispatcher, Globals, Handlers};
use xams::options::NormalizedOptions;
use xams::output::OutputConfig;

use crate::commands;

const BANNER: &str = r" __  __   __ _   _ __ ___    ___
 \ \/ /  / _` | | '_ ` _ \  / __|
  >  <  | (_| | | | | | | | \__ \
 /_/\_\  \__,_| |_| |_| |_| |___/";

/// Handlers that run the real commands.
struct App {
    output: OutputConfig,
}

impl Handlers for App {
    type Error = anyhow::Error;

    fn configure(&mut self, globals: &Globals) {
        init_logging(&globals.log_level);
        self.output = OutputConfig::from_env_and_flag(&globals.color);
    }

    fn serve(&mut self, options: NormalizedOptions) -> Result<CommandStatus> {
        commands::serve::execute(options)
    }

    fn clone_template(
        &mut self,
        repository: &str,
        path: &str,
        options: NormalizedOptions,
    ) -> Result<CommandStatus> {
        commands::clone::execute(&self.output, repository, path, options)
    }

    fn info(&mut self, options: NormalizedOptions) -> Result<CommandStatus> {
        commands::info::execute(&self.output, options)
    }
}

/// Run the CLI and return the process exit code.
pub fn run<I>(args: I) -> Result<u8>
where
    I: IntoIterator<Item = OsString>,
{
    // Replaced by `configure` once the command line is parsed
    let mut app = App {
        output: OutputConfig { use_color: false },
    };
    let dispatch = Dispatcher::new(BANNER).run(args, &mut app)?;

    Ok(dispatch.exit_code())
}

/// Install the process-wide panic backstop.
///
/// Panics are logged and printed with their origin before the process
/// unwinds, so nothing dies silently.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let message = panic_message(info.payload());
        let origin = info
            .location()
            .map(|l| l.to_string())
            .unwrap_or_else(|| "unknown".to_string());

        error!("uncaught panic at {}: {}", origin, message);
        eprintln!("{}", panic_report(&message, &origin));
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

fn panic_report(message: &str, origin: &str) -> String {
    format!("\n    Exception: [{}],\n    Source: [{}]\n", message, origin)
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A second init (tests) keeps the first logger
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_report_format() {
        assert_eq!(
            panic_report("boom", "src/clone.rs:10:5"),
            "\n    Exception: [boom],\n    Source: [src/clone.rs:10:5]\n"
        );
    }

    #[test]
    fn test_panic_message_from_payloads() {
        let literal: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(literal.as_ref()), "static message");

        let owned: Box<dyn Any + Send> = Box::new(format!("code {}", 7));
        assert_eq!(panic_message(owned.as_ref()), "code 7");

        let other: Box<dyn Any + Send> = Box::new(42_u32);
        assert_eq!(panic_message(other.as_ref()), "unknown panic");
    }

    #[test]
    fn test_caught_panic_payload_is_reported() {
        let payload = std::panic::catch_unwind(|| {
            std::panic::panic_any("template missing".to_string());
        })
        .unwrap_err();

        let report = panic_report(&panic_message(payload.as_ref()), "here");
        assert!(report.contains("Exception: [template missing]"));
        assert!(report.contains("Source: [here]"));
    }
}
