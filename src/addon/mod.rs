//! Lazy facade over the MQTT configuration.
//!
//! Creating an [`Addon`] does no I/O: the resolver runs on the first
//! [`Addon::get`] (or any other accessor that needs values), exactly once,
//! and its outcome is memoized for the life of the facade.
//!
//! ```no_run
//! use addon_helper::addon;
//!
//! let addon = addon::global();
//! let log = addon.log()?;
//! log.info(format!("MQTT host: {}", addon.get("host")?));
//! # Ok::<(), addon_helper::addon::AddonError>(())
//! ```
//!
//! # Process termination
//!
//! With [`SystemResolver`], the first access ends the whole process when no
//! broker configuration exists at all (see [`crate::config::fatal`]). The
//! facade cannot intercept that; every other resolution failure is captured
//! and reported as [`AddonError::Unavailable`].

mod error;
mod value;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

pub use error::{AddonError, Phase};
pub use value::Value;

use std::collections::BTreeSet;
use std::sync::{Arc, LazyLock, OnceLock};

use crate::config::{ResolveError, ResolvedConfig, Resolver, SystemResolver};
use crate::log::{Level, Logger};

/// Names every facade exposes, loaded or not.
pub const PUBLIC_ATTRIBUTES: [&str; 12] = [
    "log",
    "DEBUG",
    "INFO",
    "WARNING",
    "ERROR",
    "CRITICAL",
    "host",
    "port",
    "user",
    "password",
    "ca_certs",
    "raw_options",
];

/// Resolved values plus the logger, as seen through the facade.
#[derive(Debug)]
pub struct Namespace {
    config: ResolvedConfig,
    log: &'static Logger,
}

impl Namespace {
    /// Names this namespace answers to.
    pub const NAMES: [&'static str; 13] = [
        "log",
        "DEBUG",
        "INFO",
        "WARNING",
        "ERROR",
        "CRITICAL",
        "host",
        "port",
        "user",
        "password",
        "ca_certs",
        "raw_options",
        "source",
    ];

    /// Wraps a resolved configuration.
    #[must_use]
    pub fn new(config: ResolvedConfig) -> Self {
        Self {
            config,
            log: Logger::global(),
        }
    }

    /// Returns the resolved configuration.
    #[must_use]
    pub const fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    /// Returns the logger.
    #[must_use]
    pub const fn log(&self) -> &'static Logger {
        self.log
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value<'_>> {
        let config = &self.config;
        let value = match name {
            "log" => Value::Logger(self.log),
            "DEBUG" => Value::Level(Level::Debug),
            "INFO" => Value::Level(Level::Info),
            "WARNING" => Value::Level(Level::Warning),
            "ERROR" => Value::Level(Level::Error),
            "CRITICAL" => Value::Level(Level::Critical),
            "host" => config.host.as_deref().map_or(Value::Null, Value::Str),
            "port" => config
                .port
                .map_or(Value::Null, |port| Value::Int(i64::from(port))),
            "user" => Value::Str(&config.user),
            "password" => Value::Str(&config.password),
            "ca_certs" => Value::Str(&config.ca_certs),
            "raw_options" => Value::Map(&config.raw_options),
            "source" => Value::Source(config.source),
            _ => return None,
        };
        Some(value)
    }
}

/// Observable load status of a facade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Resolver has not run.
    Unloaded,
    /// Resolver succeeded.
    Loaded,
    /// Resolver failed; accessors report [`AddonError::Unavailable`].
    Failed,
}

#[derive(Debug)]
enum LoadState {
    Loaded(Namespace),
    Failed(Arc<ResolveError>),
}

/// Lazy, memoizing facade over a [`Resolver`].
///
/// The state moves from unloaded to loaded or failed exactly once, even
/// under concurrent first access, and never changes afterwards.
///
/// A resolver that panics does not count as an outcome: the panic propagates
/// to the caller, the facade stays unloaded, and the next access runs the
/// resolver again.
#[derive(Debug)]
pub struct Addon<R = SystemResolver> {
    resolver: R,
    state: OnceLock<LoadState>,
}

impl Addon<SystemResolver> {
    /// Creates a facade over the production resolver with default paths.
    #[must_use]
    pub fn system() -> Self {
        Self::new(SystemResolver::default())
    }
}

impl<R: Resolver> Addon<R> {
    /// Creates a facade. Does not run the resolver.
    #[must_use]
    pub const fn new(resolver: R) -> Self {
        Self {
            resolver,
            state: OnceLock::new(),
        }
    }

    /// Returns the value named `name`, resolving on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Unavailable`] if resolution failed (now or on an
    /// earlier call), or [`AddonError::AttributeNotFound`] for unknown names.
    pub fn get(&self, name: &str) -> Result<Value<'_>, AddonError> {
        self.namespace()?
            .get(name)
            .ok_or_else(|| AddonError::AttributeNotFound {
                name: name.to_string(),
            })
    }

    /// Returns the resolved namespace, resolving on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Unavailable`] if resolution failed.
    pub fn namespace(&self) -> Result<&Namespace, AddonError> {
        match self.load() {
            LoadState::Loaded(namespace) => Ok(namespace),
            LoadState::Failed(err) => Err(AddonError::Unavailable {
                source: Arc::clone(err),
            }),
        }
    }

    /// Returns the typed configuration, resolving on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Unavailable`] if resolution failed.
    pub fn config(&self) -> Result<&ResolvedConfig, AddonError> {
        self.namespace().map(Namespace::config)
    }

    /// Returns the logger, resolving on first use.
    ///
    /// # Errors
    ///
    /// Returns [`AddonError::Unavailable`] if resolution failed.
    pub fn log(&self) -> Result<&'static Logger, AddonError> {
        self.namespace().map(Namespace::log)
    }

    /// Returns the declared public names, plus the namespace's names once loaded.
    ///
    /// Never triggers resolution.
    #[must_use]
    pub fn list_attributes(&self) -> BTreeSet<&'static str> {
        let mut names: BTreeSet<&'static str> = PUBLIC_ATTRIBUTES.into_iter().collect();
        if let Some(LoadState::Loaded(_)) = self.state.get() {
            names.extend(Namespace::NAMES);
        }
        names
    }

    /// Returns the current load status without triggering resolution.
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        match self.state.get() {
            None => LoadStatus::Unloaded,
            Some(LoadState::Loaded(_)) => LoadStatus::Loaded,
            Some(LoadState::Failed(_)) => LoadStatus::Failed,
        }
    }

    /// Returns `true` once resolution has succeeded.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.status() == LoadStatus::Loaded
    }

    /// Returns the wrapped resolver.
    #[must_use]
    pub const fn resolver(&self) -> &R {
        &self.resolver
    }

    fn load(&self) -> &LoadState {
        self.state.get_or_init(|| match self.resolver.resolve() {
            Ok(config) => LoadState::Loaded(Namespace::new(config)),
            Err(err) => LoadState::Failed(Arc::new(err)),
        })
    }
}

static GLOBAL: LazyLock<Addon> = LazyLock::new(Addon::system);

/// Returns the process-wide facade over the production resolver.
///
/// Only constructs the facade; resolution waits for the first access.
pub fn global() -> &'static Addon {
    &GLOBAL
}
