//! # Option Normalization
//!
//! The argument parser hands back a container that mixes the options a user
//! actually typed with parser internals (the help and version actions). This
//! module turns that container into a clean, allow-listed
//! [`NormalizedOptions`] map keyed by camel-case option names, which is the
//! only shape the command handlers ever see.
//!
//! ```
//! use xams::options::{normalize, OptionValue, RawOption, RawOptions};
//!
//! let mut raw = RawOptions::new();
//! raw.insert("checkout", RawOption::Value(OptionValue::Str("main".into())));
//! raw.insert("remove", RawOption::Value(OptionValue::Bool(true)));
//! raw.insert("help", RawOption::Method);
//!
//! let options = normalize(&["checkout", "remove"], &raw);
//! assert_eq!(options.get_str("checkout"), Some("main"));
//! assert!(options.get_bool("remove"));
//! assert!(!options.contains("help"));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use clap::parser::ValueSource;
use clap::{ArgAction, ArgMatches, Command};

/// A scalar option value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Str(String),
    Bool(bool),
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Str(s) => write!(f, "{:?}", s),
            OptionValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// One entry of the parser-shaped option container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawOption {
    /// A value the user supplied.
    Value(OptionValue),
    /// A parser-internal action (help, version) that happens to share the
    /// option namespace. Never copied into [`NormalizedOptions`].
    Method,
}

/// The parser-shaped option container, keyed by camel-case name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawOptions {
    entries: BTreeMap<String, RawOption>,
}

impl RawOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: RawOption) {
        self.entries.insert(key.into(), entry);
    }

    pub fn get(&self, key: &str) -> Option<&RawOption> {
        self.entries.get(key)
    }

    /// Build the raw container from everything clap knows about a command.
    ///
    /// Every argument of `command` is visited, including globals and the
    /// built-in help/version actions, so the result deliberately carries more
    /// than the user typed. Options that were not supplied are left out, and
    /// flags that default to `false` only appear once they are set.
    pub fn from_matches(command: &Command, matches: &ArgMatches) -> Self {
        let mut raw = Self::new();

        for arg in command.get_arguments() {
            if arg.is_positional() {
                continue;
            }
            let id = arg.get_id().as_str();
            let key = camelize(id);

            match arg.get_action() {
                ArgAction::Help
                | ArgAction::HelpShort
                | ArgAction::HelpLong
                | ArgAction::Version => raw.insert(key, RawOption::Method),
                ArgAction::SetTrue => {
                    if let Ok(Some(true)) = matches.try_get_one::<bool>(id) {
                        raw.insert(key, RawOption::Value(OptionValue::Bool(true)));
                    }
                }
                _ => {
                    if matches.value_source(id) == Some(ValueSource::DefaultValue) {
                        continue;
                    }
                    if let Ok(Some(value)) = matches.try_get_one::<String>(id) {
                        raw.insert(key, RawOption::Value(OptionValue::Str(value.clone())));
                    }
                }
            }
        }

        raw
    }
}

/// Clean option map handed to command handlers.
///
/// Keys are camel-case and always belong to the invoked command's declared
/// options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedOptions {
    values: BTreeMap<String, OptionValue>,
}

impl NormalizedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: OptionValue) {
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&OptionValue> {
        self.values.get(key)
    }

    /// String value for `key`, if the option was given a string.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        match self.values.get(key) {
            Some(OptionValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// `true` only when `key` is present and set to boolean `true`.
    pub fn get_bool(&self, key: &str) -> bool {
        matches!(self.values.get(key), Some(OptionValue::Bool(true)))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

impl fmt::Display for NormalizedOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, " {}: {}", key, value)?;
        }
        if !self.values.is_empty() {
            write!(f, " ")?;
        }
        write!(f, "}}")
    }
}

/// Convert a hyphen-case flag name to camel case.
///
/// Each `-` followed by an ASCII word character (`[A-Za-z0-9_]`) is replaced
/// by that character upper-cased. Any other `-`, including a trailing one,
/// is kept.
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        match chars.peek() {
            Some(&next) if c == '-' && (next.is_ascii_alphanumeric() || next == '_') => {
                out.push(next.to_ascii_uppercase());
                chars.next();
            }
            _ => out.push(c),
        }
    }

    out
}

/// Extract the declared options from a raw container.
///
/// Only the long flag names in `declared` are consulted. A value is copied
/// when the raw entry exists and is not a [`RawOption::Method`].
pub fn normalize(declared: &[&str], raw: &RawOptions) -> NormalizedOptions {
    let mut options = NormalizedOptions::new();

    for long in declared {
        let key = camelize(long.trim_start_matches("--"));
        if let Some(RawOption::Value(value)) = raw.get(&key) {
            options.insert(key, value.clone());
        }
    }

    options
}
