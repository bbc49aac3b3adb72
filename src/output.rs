//! # Output Configuration
//!
//! Controls how `xams` talks to the terminal: whether colors, emoji and the
//! animated spinner are used, and how status lines are formatted.
//!
//! The module respects the following environment variables and flags:
//! - `--color=never|always|auto` - CLI flag for color control
//! - `NO_COLOR` - Disables colors when set (per https://no-color.org/)
//! - `CLICOLOR=0` - Disables colors
//! - `CLICOLOR_FORCE=1` - Forces colors even in non-TTY
//! - `TERM=dumb` - Disables colors for dumb terminals

use std::env;

use console::style;

/// Output configuration for controlling colors and emojis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Whether colors, emojis and the animated spinner should be used.
    pub use_color: bool,
}

impl OutputConfig {
    /// Create an output configuration from environment and CLI flag.
    ///
    /// - `always`: force colors on (overrides NO_COLOR)
    /// - `never`: force colors off
    /// - anything else: detect from the environment
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => Self::detect_color_support(),
        };

        console::set_colors_enabled(use_color);
        console::set_colors_enabled_stderr(use_color);

        Self { use_color }
    }

    fn detect_color_support() -> bool {
        // The presence of NO_COLOR (even if empty) disables colors
        if env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if env::var("CLICOLOR").is_ok_and(|v| v == "0") {
            return false;
        }

        if env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0" && !v.is_empty()) {
            return true;
        }

        if env::var("TERM").is_ok_and(|v| v == "dumb") {
            return false;
        }

        console::Term::stdout().features().colors_supported()
    }

    /// Create a configuration with colors always enabled.
    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    /// Create a configuration with colors always disabled.
    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::from_env_and_flag("auto")
    }
}

/// Returns the emoji when colors are enabled, the plain alternative otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}

/// Format a success line.
pub fn success_line(config: &OutputConfig, msg: &str) -> String {
    format!("{} {}", style(emoji(config, "✓", "[OK]")).green().bold(), style(msg).green())
}

/// Format an error line.
pub fn error_line(config: &OutputConfig, msg: &str) -> String {
    format!("{} {}", style(emoji(config, "✗", "[ERROR]")).red().bold(), style(msg).red())
}

/// Format a warning line.
pub fn warning_line(config: &OutputConfig, msg: &str) -> String {
    format!("{} {}", style(emoji(config, "⚠", "[WARN]")).yellow().bold(), msg)
}

/// Format an informational line.
pub fn info_line(config: &OutputConfig, msg: &str) -> String {
    format!("{} {}", style(emoji(config, "📦", "[INFO]")).blue().bold(), msg)
}
