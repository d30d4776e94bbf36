//! Configuration sources and where to find them.

use std::fmt;
use std::path::{Path, PathBuf};

use super::defaults;

/// The source that supplied the resolved configuration.
///
/// Sources are tried in declaration order; exactly one wins and
/// sources are never merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigSource {
    /// Platform options file (`/data/options.json`).
    PlatformOptions,
    /// `MQTT_*` environment variables.
    Environment,
    /// User config file (`~/.config/mqtt_config.py`).
    UserConfigFile,
}

impl ConfigSource {
    /// Returns a stable lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PlatformOptions => "platform-options",
            Self::Environment => "environment",
            Self::UserConfigFile => "user-config",
        }
    }
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File locations consulted during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    /// Platform options file.
    pub options: PathBuf,

    /// User config file. `None` when no home directory is known.
    pub user_config: Option<PathBuf>,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            options: PathBuf::from(defaults::OPTIONS_PATH),
            user_config: defaults::user_config_path(),
        }
    }
}

impl SourcePaths {
    /// Creates paths from explicit locations.
    #[must_use]
    pub fn new(options: impl Into<PathBuf>, user_config: Option<PathBuf>) -> Self {
        Self {
            options: options.into(),
            user_config,
        }
    }

    /// Overrides the options file location.
    #[must_use]
    pub fn with_options(mut self, path: impl Into<PathBuf>) -> Self {
        self.options = path.into();
        self
    }

    /// Overrides the user config location.
    #[must_use]
    pub fn with_user_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_config = Some(path.into());
        self
    }

    /// Returns the user config path for display in messages.
    #[must_use]
    pub fn user_config_display(&self) -> String {
        self.user_config.as_deref().map_or_else(
            || defaults::USER_CONFIG_DISPLAY.to_string(),
            |p: &Path| p.display().to_string(),
        )
    }
}

/// Abstraction over environment variable lookup for testability.
///
/// Mirrors how the clock is abstracted elsewhere: production code reads
/// the process environment, tests inject a fixed map.
pub trait EnvSource {
    /// Returns the value of `key`, or `None` if unset or not valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns the value of `key`, or `default` if unset.
    fn var_or(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.to_string())
    }
}

/// Production environment backed by [`std::env::var`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// Fixed in-memory environment.
///
/// Used by tests; setting real process variables is unsafe under edition 2024.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: std::collections::HashMap<String, String>,
}

impl MapEnv {
    /// Creates an empty environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a variable.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}
