//! Error types for MQTT configuration resolution.

use std::path::PathBuf;

use thiserror::Error;

/// Unrecoverable misconfiguration.
///
/// These end the process when raised by [`SystemResolver`](super::SystemResolver)
/// (see [`terminate`](super::fatal::terminate)); callers never get a chance to recover.
#[derive(Debug, Error)]
pub enum FatalError {
    /// The options file exists but names neither an external nor an internal broker.
    #[error("No MQTT broker configured in '{}' and no internal MQTT service available", path.display())]
    NoBrokerConfigured {
        /// Path to the options file
        path: PathBuf,
    },

    /// Last-resort user config file is missing or cannot be read.
    #[error("Could not load {location} to get MQTT broker configuration: {reason}")]
    UserConfigUnavailable {
        /// Path (or placeholder when no home directory is known)
        location: String,
        /// Why the file could not be used
        reason: String,
    },
}

/// Error type for configuration resolution.
///
/// Everything except [`ResolveError::Fatal`] is recoverable: the facade
/// captures it and reports it as unavailable.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Unrecoverable misconfiguration.
    #[error(transparent)]
    Fatal(#[from] FatalError),

    /// Failed to read the platform options file.
    #[error("Failed to read options file '{}': {source}", path.display())]
    OptionsRead {
        /// Path to the options file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Options file is not valid JSON.
    #[error("Failed to parse options file '{}': {source}", path.display())]
    OptionsParse {
        /// Path to the options file
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// Options file is valid JSON but not an object.
    #[error("Options file '{}' must contain a JSON object", path.display())]
    OptionsNotObject {
        /// Path to the options file
        path: PathBuf,
    },

    /// Port value is not an integer in range.
    #[error("Invalid MQTT port '{value}' from {origin}")]
    InvalidPort {
        /// Where the value came from (variable, key or file)
        origin: &'static str,
        /// The rejected value, as text
        value: String,
    },

    /// Failed to read the user config file after it was found.
    #[error("Failed to read user config file '{}': {source}", path.display())]
    UserConfigRead {
        /// Path to the user config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// User config file contains something other than literal assignments.
    #[error("{}:{line}: {reason}", path.display())]
    UserConfigParse {
        /// Path to the user config file
        path: PathBuf,
        /// 1-based line number
        line: usize,
        /// What went wrong
        reason: String,
    },

    /// A required key is missing from the user config file.
    #[error("Missing required key '{key}' in '{}'", path.display())]
    MissingKey {
        /// Path to the user config file
        path: PathBuf,
        /// Name of the missing key
        key: &'static str,
    },

    /// A key holds a literal of the wrong type.
    #[error("Invalid value for '{key}': expected {expected}, got {found}")]
    InvalidValue {
        /// Name of the key
        key: &'static str,
        /// Expected literal kind
        expected: &'static str,
        /// The literal actually found
        found: String,
    },
}

impl ResolveError {
    /// Returns `true` for errors that must end the process.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Creates an `InvalidPort` error.
    #[must_use]
    pub fn invalid_port(origin: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidPort {
            origin,
            value: value.into(),
        }
    }
}

/// Well-known origins for `InvalidPort` errors.
pub mod origin {
    /// The `MQTT_PORT` environment variable.
    pub const ENV: &str = "MQTT_PORT";
    /// The `mqtt_port` key of the options file.
    pub const OPTIONS: &str = "options file 'mqtt_port'";
    /// The `port` key of the options file's `mqtt` section.
    pub const INTERNAL: &str = "options file 'mqtt.port'";
    /// The `port` key of the user config file.
    pub const USER_FILE: &str = "user config 'port'";
}
