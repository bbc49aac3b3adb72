//! Command dispatch.
//!
//! Parses argv against the registry, normalizes the chosen command's options
//! and hands them to a [`Handlers`] implementation. Unknown commands, a bare
//! invocation and `--help`/`--version` are resolved here without invoking
//! any handler.
//!
//! The global `--color` and `--log-level` values are read from the same
//! parse and handed to [`Handlers::configure`] before anything is printed.

use std::ffi::OsString;

use clap::error::ErrorKind;
use clap::ArgMatches;
use log::debug;

use crate::options::{normalize, NormalizedOptions, RawOptions};
use crate::registry::{self, CommandSpec};

/// How a handler finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
    /// The command ran and already reported its own failure.
    Failed,
}

/// Values of the global flags, with their defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Globals {
    pub color: String,
    pub log_level: String,
}

impl Globals {
    fn from_matches(matches: &ArgMatches) -> Self {
        let value = |id: &str, default: &str| {
            matches
                .try_get_one::<String>(id)
                .ok()
                .flatten()
                .cloned()
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            color: value("color", "auto"),
            log_level: value("log-level", "warn"),
        }
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self {
            color: "auto".to_string(),
            log_level: "warn".to_string(),
        }
    }
}

/// Entry points for the registered commands.
pub trait Handlers {
    type Error;

    /// Called once per successful parse, before the banner, the unknown
    /// command notice or any command runs.
    fn configure(&mut self, _globals: &Globals) {}

    fn serve(&mut self, options: NormalizedOptions) -> Result<CommandStatus, Self::Error>;
    fn clone_template(
        &mut self,
        repository: &str,
        path: &str,
        options: NormalizedOptions,
    ) -> Result<CommandStatus, Self::Error>;
    fn info(&mut self, options: NormalizedOptions) -> Result<CommandStatus, Self::Error>;
}

/// What the dispatcher did with an invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// A registered command ran.
    Ran(CommandStatus),
    /// No command was given; banner and help were printed.
    Banner,
    /// The named command is not registered; help and a notice were printed.
    Unknown(String),
    /// clap handled the invocation itself (help, version, usage error).
    Early { code: i32 },
}

impl Dispatch {
    pub fn exit_code(&self) -> u8 {
        match self {
            Dispatch::Ran(CommandStatus::Success) | Dispatch::Banner => 0,
            Dispatch::Ran(CommandStatus::Failed) => 1,
            Dispatch::Unknown(_) => 2,
            Dispatch::Early { code } => u8::try_from(*code).unwrap_or(1),
        }
    }
}

/// Notice printed after the help text for an unregistered command.
pub fn unknown_command_notice(name: &str) -> String {
    format!(
        "  {} {}.",
        console::style("Unknown command").red(),
        console::style(name).yellow()
    )
}

/// Dispatches one invocation.
pub struct Dispatcher {
    banner: String,
}

impl Dispatcher {
    /// `banner` is printed above the help text when no command is given.
    pub fn new(banner: impl Into<String>) -> Self {
        Self {
            banner: banner.into(),
        }
    }

    pub fn run<I, T, H>(&self, args: I, handlers: &mut H) -> Result<Dispatch, H::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        H: Handlers + ?Sized,
    {
        let mut root = registry::root_command();

        let matches = match root.try_get_matches_from_mut(args) {
            Ok(matches) => matches,
            Err(err) => {
                let code = match err.kind() {
                    ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                    _ => 2,
                };
                // Nothing useful to do if the terminal is gone
                let _ = err.print();
                return Ok(Dispatch::Early { code });
            }
        };

        handlers.configure(&Globals::from_matches(&matches));

        let Some((name, sub_matches)) = matches.subcommand() else {
            println!("{}", console::style(&self.banner).blue());
            println!("{}", root.render_help());
            return Ok(Dispatch::Banner);
        };

        let Some(spec) = registry::find(name) else {
            debug!("unknown command {}", name);
            println!("{}", root.render_help());
            println!("{}", unknown_command_notice(name));
            println!();
            return Ok(Dispatch::Unknown(name.to_string()));
        };

        let raw = match root.find_subcommand(name) {
            Some(command) => RawOptions::from_matches(command, sub_matches),
            None => RawOptions::new(),
        };
        let options = normalize(&spec.option_names(), &raw);
        debug!("{} {}", spec.name, options);

        let status = invoke(spec, sub_matches, options, handlers)?;
        Ok(Dispatch::Ran(status))
    }
}

fn invoke<H>(
    spec: &CommandSpec,
    matches: &clap::ArgMatches,
    options: NormalizedOptions,
    handlers: &mut H,
) -> Result<CommandStatus, H::Error>
where
    H: Handlers + ?Sized,
{
    let positional = |name: &str| {
        matches
            .try_get_one::<String>(name)
            .ok()
            .flatten()
            .cloned()
            .unwrap_or_default()
    };

    match spec.name {
        "serve" => handlers.serve(options),
        "clone" => {
            handlers.clone_template(&positional("repository"), &positional("path"), options)
        }
        _ => handlers.info(options),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionValue;
    use serial_test::serial;
    use std::convert::Infallible;

    #[derive(Debug, Default)]
    struct Calls {
        globals: Vec<Globals>,
        serve: Vec<NormalizedOptions>,
        clones: Vec<(String, String, NormalizedOptions)>,
        info: usize,
    }

    impl Calls {
        fn total(&self) -> usize {
            self.serve.len() + self.clones.len() + self.info
        }
    }

    impl Handlers for Calls {
        type Error = Infallible;

        fn configure(&mut self, globals: &Globals) {
            self.globals.push(globals.clone());
        }

        fn serve(&mut self, options: NormalizedOptions) -> Result<CommandStatus, Infallible> {
            self.serve.push(options);
            Ok(CommandStatus::Success)
        }

        fn clone_template(
            &mut self,
            repository: &str,
            path: &str,
            options: NormalizedOptions,
        ) -> Result<CommandStatus, Infallible> {
            self.clones
                .push((repository.to_string(), path.to_string(), options));
            Ok(CommandStatus::Failed)
        }

        fn info(&mut self, _options: NormalizedOptions) -> Result<CommandStatus, Infallible> {
            self.info += 1;
            Ok(CommandStatus::Success)
        }
    }

    fn dispatch(args: &[&str]) -> (Dispatch, Calls) {
        let mut calls = Calls::default();
        let outcome = Dispatcher::new("xams")
            .run(args.iter().copied(), &mut calls)
            .unwrap();
        (outcome, calls)
    }

    #[test]
    fn test_unknown_command_invokes_nothing() {
        let (outcome, calls) = dispatch(&["xams", "foo"]);

        assert_eq!(outcome, Dispatch::Unknown("foo".to_string()));
        assert_eq!(calls.total(), 0);
        assert_eq!(outcome.exit_code(), 2);
    }

    #[test]
    #[serial]
    fn test_unknown_command_notice_names_command() {
        console::set_colors_enabled(false);
        assert_eq!(unknown_command_notice("foo"), "  Unknown command foo.");
    }

    #[test]
    fn test_no_arguments_prints_banner() {
        let (outcome, calls) = dispatch(&["xams"]);

        assert_eq!(outcome, Dispatch::Banner);
        assert_eq!(calls.total(), 0);
        assert_eq!(outcome.exit_code(), 0);
    }

    #[test]
    fn test_clone_receives_positionals_and_normalized_options() {
        let (outcome, calls) = dispatch(&[
            "xams",
            "clone",
            "repo.git",
            "./myapp",
            "--checkout",
            "main",
            "-r",
            "--color",
            "never",
        ]);

        assert_eq!(outcome, Dispatch::Ran(CommandStatus::Failed));
        assert_eq!(calls.clones.len(), 1);
        let (repository, path, options) = &calls.clones[0];
        assert_eq!(repository, "repo.git");
        assert_eq!(path, "./myapp");

        let mut expected = NormalizedOptions::new();
        expected.insert("checkout", OptionValue::Str("main".into()));
        expected.insert("remove", OptionValue::Bool(true));
        assert_eq!(options, &expected);
    }

    #[test]
    fn test_serve_options() {
        let (outcome, calls) = dispatch(&["xams", "serve", "-p", "3000"]);

        assert_eq!(outcome, Dispatch::Ran(CommandStatus::Success));
        assert_eq!(calls.serve.len(), 1);
        assert_eq!(calls.serve[0].get_str("port"), Some("3000"));
        assert!(!calls.serve[0].contains("open"));
        assert!(!calls.serve[0].contains("help"));
    }

    #[test]
    fn test_info_has_no_options() {
        let (_, calls) = dispatch(&["xams", "info"]);

        assert_eq!(calls.info, 1);
    }

    #[test]
    fn test_subcommand_help_short_circuits() {
        let (outcome, calls) = dispatch(&["xams", "clone", "--help"]);

        assert_eq!(outcome, Dispatch::Early { code: 0 });
        assert_eq!(calls.total(), 0);
    }

    #[test]
    fn test_missing_positional_is_usage_error() {
        let (outcome, calls) = dispatch(&["xams", "clone", "repo.git"]);

        assert_eq!(outcome, Dispatch::Early { code: 2 });
        assert_eq!(calls.total(), 0);
    }

    #[test]
    fn test_globals_default_when_absent() {
        let (_, calls) = dispatch(&["xams", "info"]);

        assert_eq!(calls.globals, vec![Globals::default()]);
    }

    #[test]
    fn test_globals_after_subcommand() {
        let (_, calls) = dispatch(&[
            "xams",
            "serve",
            "--color",
            "never",
            "--log-level=debug",
        ]);

        assert_eq!(
            calls.globals,
            vec![Globals {
                color: "never".to_string(),
                log_level: "debug".to_string(),
            }]
        );
        assert_eq!(calls.serve.len(), 1);
        assert!(calls.serve[0].is_empty());
    }

    #[test]
    fn test_globals_without_command_configure_banner() {
        let (outcome, calls) = dispatch(&["xams", "--color=always"]);

        assert_eq!(outcome, Dispatch::Banner);
        assert_eq!(calls.globals.len(), 1);
        assert_eq!(calls.globals[0].color, "always");
    }

    #[test]
    fn test_help_skips_configure() {
        let (_, calls) = dispatch(&["xams", "--help"]);

        assert!(calls.globals.is_empty());
    }

    #[test]
    fn test_version_flag() {
        let (outcome, _) = dispatch(&["xams", "-v"]);
        assert_eq!(outcome, Dispatch::Early { code: 0 });
    }
}
