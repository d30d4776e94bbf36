//! Bashio-style logging.
//!
//! Produces lines like `[2025-01-01 18:29:31] INFO: service starting ...`
//! on stdout through a process-wide [`Logger`] named [`LOGGER_NAME`].
//!
//! The logger is configured once from the environment:
//!
//! - `BASHIO_LOG_FORMAT`: line format (default [`format::DEFAULT_FORMAT`])
//! - `BASHIO_LOG_DATEFMT`: strftime date format (default [`format::DEFAULT_DATEFMT`])
//! - `BASHIO_LOG_LEVEL`: initial level (default `INFO`)
//!
//! After creation the level only changes through [`Logger::set_level`].

pub mod format;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU8, Ordering};

use crate::config::{EnvSource, ProcessEnv};

pub use format::BashioFormat;

/// Name of the process-wide logger, used as the tracing target.
pub const LOGGER_NAME: &str = "hass-addon";

/// Log severity, numerically compatible with the conventional logging levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    /// Diagnostic detail.
    Debug = 10,
    /// Normal operation.
    Info = 20,
    /// Something unexpected but recoverable.
    Warning = 30,
    /// An operation failed.
    Error = 40,
    /// The service cannot continue.
    Critical = 50,
}

/// Level constants, so callers can write `log.set_level(DEBUG)`.
pub const DEBUG: Level = Level::Debug;
/// See [`Level::Info`].
pub const INFO: Level = Level::Info;
/// See [`Level::Warning`].
pub const WARNING: Level = Level::Warning;
/// See [`Level::Error`].
pub const ERROR: Level = Level::Error;
/// See [`Level::Critical`].
pub const CRITICAL: Level = Level::Critical;

impl Level {
    /// All levels in ascending order.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the numeric value (10, 20, 30, 40, 50).
    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Returns the upper-case level name used in log lines.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }

    /// Converts a numeric value back to a level.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            10 => Some(Self::Debug),
            20 => Some(Self::Info),
            30 => Some(Self::Warning),
            40 => Some(Self::Error),
            50 => Some(Self::Critical),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for Level {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "CRITICAL" | "FATAL" => Ok(Self::Critical),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

/// Process-wide leveled logger.
///
/// Obtain it with [`Logger::global`]. Messages below the current level are
/// dropped; the rest are emitted as `tracing` events with target
/// [`LOGGER_NAME`] and rendered by [`BashioFormat`]. The event carries the
/// logger's own name in a `logger` field, which `%(name)s` prints.
#[derive(Debug)]
pub struct Logger {
    name: &'static str,
    level: AtomicU8,
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

impl Logger {
    /// Returns the process-wide logger, creating it on first use.
    ///
    /// Creation reads the `BASHIO_LOG_*` variables and installs a stdout
    /// subscriber unless another global subscriber is already set.
    pub fn global() -> &'static Self {
        LOGGER.get_or_init(|| {
            let env = ProcessEnv;
            install_subscriber(BashioFormat::from_env(&env));
            Self::new(LOGGER_NAME, level_from_env(&env))
        })
    }

    /// Creates a standalone logger. Only the global one is wired to stdout by default.
    #[must_use]
    pub const fn new(name: &'static str, level: Level) -> Self {
        Self {
            name,
            level: AtomicU8::new(level as u8),
        }
    }

    /// Returns the logger name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the current level.
    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_value(self.level.load(Ordering::Relaxed)).unwrap_or(Level::Info)
    }

    /// Changes the level.
    pub fn set_level(&self, level: Level) {
        self.level.store(level.value(), Ordering::Relaxed);
    }

    /// Returns `true` if messages at `level` would be emitted.
    #[must_use]
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level()
    }

    /// Logs `message` at `level`.
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if !self.enabled(level) {
            return;
        }

        let (logger, levelname) = (self.name, level.name());
        match level {
            Level::Debug => {
                tracing::debug!(target: LOGGER_NAME, logger, levelname, "{message}");
            }
            Level::Info => tracing::info!(target: LOGGER_NAME, logger, levelname, "{message}"),
            Level::Warning => tracing::warn!(target: LOGGER_NAME, logger, levelname, "{message}"),
            Level::Error | Level::Critical => {
                tracing::error!(target: LOGGER_NAME, logger, levelname, "{message}");
            }
        }
    }

    /// Logs at `DEBUG`.
    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    /// Logs at `INFO`.
    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    /// Logs at `WARNING`.
    pub fn warning(&self, message: impl fmt::Display) {
        self.log(Level::Warning, message);
    }

    /// Logs at `ERROR`.
    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    /// Logs at `CRITICAL`.
    pub fn critical(&self, message: impl fmt::Display) {
        self.log(Level::Critical, message);
    }
}

/// Reads the initial level from `BASHIO_LOG_LEVEL`, falling back to `INFO`.
pub fn level_from_env(env: &impl EnvSource) -> Level {
    env.var("BASHIO_LOG_LEVEL")
        .and_then(|s| s.parse().ok())
        .unwrap_or(Level::Info)
}

/// Sets up the tracing subscriber for logging.
///
/// Level filtering happens in [`Logger`], so the subscriber passes everything.
fn install_subscriber(format: BashioFormat) {
    let result = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(std::io::stdout)
        .event_format(format)
        .try_init();

    if result.is_err() {
        tracing::debug!("Global subscriber already set; keeping it");
    }
}
