//! CLI argument parsing using clap.
//!
//! Defines the command-line interfaces of both binaries.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{SourcePaths, defaults};

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

/// Addon helper: MQTT broker configuration for Home Assistant add-ons
///
/// Resolves the broker from /data/options.json, MQTT_* environment
/// variables, or ~/.config/mqtt_config.py (first match wins).
#[derive(Debug, Parser)]
#[command(name = "addon-helper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run (default: demo)
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the platform options file
    #[arg(long = "options-file", global = true, default_value = defaults::OPTIONS_PATH)]
    pub options_file: PathBuf,

    /// Path to the user config file (default: ~/.config/mqtt_config.py)
    #[arg(long = "user-config", global = true)]
    pub user_config: Option<PathBuf>,

    /// Enable debug logging after loading
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for addon-helper
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Resolve the configuration and log it at every level
    Demo,

    /// Print one attribute
    Get {
        /// Attribute name (e.g. host, port, raw_options)
        name: String,
    },

    /// List attribute names before and after loading
    Attributes,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the subcommand, defaulting to [`Command::Demo`].
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Demo)
    }

    /// Builds the source locations from the arguments.
    ///
    /// Without `--user-config` the home-relative default is used.
    #[must_use]
    pub fn source_paths(&self) -> SourcePaths {
        let paths = SourcePaths::default().with_options(&self.options_file);
        match &self.user_config {
            Some(path) => paths.with_user_config(path),
            None => paths,
        }
    }
}

/// Print MQTT settings from ~/.config/mqtt_config.py as shell exports
///
/// Usage: eval "$(parse-mqtt-config)"
#[derive(Debug, Parser)]
#[command(name = "parse-mqtt-config")]
#[command(version, about, long_about = None)]
pub struct ExportCli {
    /// User config file to read (default: ~/.config/mqtt_config.py)
    #[arg(long, short)]
    pub file: Option<PathBuf>,
}

impl ExportCli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }

    /// Returns the file to read, or `None` when no home directory is known.
    #[must_use]
    pub fn path(&self) -> Option<PathBuf> {
        self.file.clone().or_else(defaults::user_config_path)
    }
}
