//! Command registry.
//!
//! Each subcommand is declared once as a static [`CommandSpec`]. The clap
//! command tree is built from these declarations, and the option normalizer
//! uses the same declarations as its allow-list.

use clap::{crate_version, Arg, ArgAction, Command};

/// A positional argument of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionalSpec {
    pub name: &'static str,
    pub help: &'static str,
}

/// An option recognized by a command.
///
/// `value_name == None` makes it a boolean switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub long: &'static str,
    pub short: Option<char>,
    pub value_name: Option<&'static str>,
    pub help: &'static str,
}

/// A registered subcommand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    pub about: &'static str,
    pub positionals: &'static [PositionalSpec],
    pub options: &'static [OptionSpec],
}

impl CommandSpec {
    /// Long flag names of the declared options, in declaration order.
    pub fn option_names(&self) -> Vec<&'static str> {
        self.options.iter().map(|o| o.long).collect()
    }

    /// Build the clap subcommand for this declaration.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(self.name).about(self.about);

        for positional in self.positionals {
            command = command.arg(
                Arg::new(positional.name)
                    .help(positional.help)
                    .required(true),
            );
        }

        for option in self.options {
            let mut arg = Arg::new(option.long).long(option.long).help(option.help);
            if let Some(short) = option.short {
                arg = arg.short(short);
            }
            arg = match option.value_name {
                Some(value_name) => arg.value_name(value_name).action(ArgAction::Set),
                None => arg.action(ArgAction::SetTrue),
            };
            command = command.arg(arg);
        }

        command
    }
}

pub const SERVE: CommandSpec = CommandSpec {
    name: "serve",
    about: "start current project",
    positionals: &[],
    options: &[
        OptionSpec {
            long: "port",
            short: Some('p'),
            value_name: Some("value"),
            help: "set default port",
        },
        OptionSpec {
            long: "open",
            short: Some('o'),
            value_name: None,
            help: "open browser",
        },
    ],
};

pub const CLONE: CommandSpec = CommandSpec {
    name: "clone",
    about: "generate a project from a remote template",
    positionals: &[
        PositionalSpec {
            name: "repository",
            help: "template repository to fetch",
        },
        PositionalSpec {
            name: "path",
            help: "destination directory, relative to the working directory",
        },
    ],
    options: &[
        OptionSpec {
            long: "checkout",
            short: Some('c'),
            value_name: Some("branch"),
            help: "check out this branch after cloning",
        },
        OptionSpec {
            long: "remove",
            short: Some('r'),
            value_name: None,
            help: "remove the .git directory after cloning",
        },
    ],
};

pub const INFO: CommandSpec = CommandSpec {
    name: "info",
    about: "print debugging information about your environment",
    positionals: &[],
    options: &[],
};

static COMMANDS: [CommandSpec; 3] = [SERVE, CLONE, INFO];

/// All registered commands, in help order.
pub fn commands() -> &'static [CommandSpec] {
    &COMMANDS
}

/// Look up a registered command by name.
pub fn find(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Build the root `xams` command with every registered subcommand.
pub fn root_command() -> Command {
    let mut root = Command::new("xams")
        .version(crate_version!())
        .about("Scaffold new projects from remote template repositories")
        .override_usage("xams <command> [options]")
        .after_help("Run `xams <command> --help` for detailed usage of given command.")
        .disable_version_flag(true)
        .allow_external_subcommands(true)
        .arg(
            Arg::new("version")
                .short('v')
                .long("version")
                .help("Print version")
                .action(ArgAction::Version),
        )
        .arg(
            Arg::new("color")
                .long("color")
                .global(true)
                .value_name("WHEN")
                .default_value("auto")
                .help("Colorize output (always, never, auto)"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .default_value("warn")
                .help("Set log level (error, warn, info, debug, trace)"),
        );

    for spec in commands() {
        root = root.subcommand(spec.to_command());
    }

    root
}
