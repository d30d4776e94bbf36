//! Layered MQTT configuration resolution.
//!
//! Exactly one source supplies the configuration, tried in this order:
//!
//! 1. **Platform options file**: external broker keys, else the internal
//!    `mqtt` section, else fatal.
//! 2. **Environment variables**: used when `MQTT_HOST` is non-empty.
//! 3. **User config file**: last resort; missing or unreadable is fatal.

use std::fmt;

use serde_json::{Map, Value};

use crate::log::Logger;

use super::defaults;
use super::error::{FatalError, ResolveError, origin};
use super::fatal;
use super::options::{BrokerOptions, BrokerSettings, PlatformOptions, parse_port};
use super::source::{ConfigSource, EnvSource, ProcessEnv, SourcePaths};
use super::user_file::{Literal, UserConfig};

/// Immutable MQTT connection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// Source that supplied these values
    pub source: ConfigSource,

    /// Broker host. `None` only if the internal broker section omits it.
    pub host: Option<String>,

    /// Broker port. `None` only if the internal broker section omits it.
    pub port: Option<u16>,

    /// User name (may be empty)
    pub user: String,

    /// Password (may be empty)
    pub password: String,

    /// CA certificate path (may be empty)
    pub ca_certs: String,

    /// Complete options object when the options file was used, empty otherwise
    pub raw_options: Map<String, Value>,
}

impl fmt::Display for ResolvedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MqttConfig {{ source: {}, host: {}, port: {}, user: {}, password: {}, ca_certs: {} }}",
            self.source,
            self.host.as_deref().unwrap_or("none"),
            self.port.map_or_else(|| "none".to_string(), |p| p.to_string()),
            if self.user.is_empty() { "none" } else { self.user.as_str() },
            if self.password.is_empty() { "none" } else { "***" },
            if self.ca_certs.is_empty() { "none" } else { self.ca_certs.as_str() },
        )
    }
}

impl ResolvedConfig {
    fn from_broker(settings: BrokerSettings, raw_options: Map<String, Value>) -> Self {
        Self {
            source: ConfigSource::PlatformOptions,
            host: settings.host,
            port: settings.port,
            user: settings.user,
            password: settings.password,
            ca_certs: settings.ca_certs,
            raw_options,
        }
    }

    /// Returns `host:port` for log messages.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "{}:{}",
            self.host.as_deref().unwrap_or("None"),
            self.port.map_or_else(|| "None".to_string(), |p| p.to_string())
        )
    }
}

/// Something that can produce a [`ResolvedConfig`].
///
/// The facade holds one of these and calls it at most once.
pub trait Resolver {
    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns a recoverable error if resolution fails. Implementations may
    /// end the process instead of returning a [`FatalError`].
    fn resolve(&self) -> Result<ResolvedConfig, ResolveError>;
}

/// Production resolver: process environment, real files, fatal errors end the process.
#[derive(Debug, Clone, Default)]
pub struct SystemResolver {
    paths: SourcePaths,
}

impl SystemResolver {
    /// Creates a resolver reading from `paths`.
    #[must_use]
    pub const fn new(paths: SourcePaths) -> Self {
        Self { paths }
    }

    /// Returns the file locations this resolver reads.
    #[must_use]
    pub const fn paths(&self) -> &SourcePaths {
        &self.paths
    }
}

impl Resolver for SystemResolver {
    /// Initializes the logger and resolves from the real environment.
    ///
    /// Calls [`fatal::terminate`] on unrecoverable misconfiguration, so this
    /// never returns [`ResolveError::Fatal`].
    fn resolve(&self) -> Result<ResolvedConfig, ResolveError> {
        let log = Logger::global();
        match resolve_config(&self.paths, &ProcessEnv, log) {
            Err(ResolveError::Fatal(err)) => fatal::terminate(&err),
            other => other,
        }
    }
}

/// Runs the layered resolution against `paths` and `env`.
///
/// Fatal conditions are returned as [`ResolveError::Fatal`] without being
/// logged. Reporting them and deciding to terminate is left to the caller.
///
/// # Errors
///
/// Returns a fatal error if no broker can be found, or a recoverable error if
/// a source is present but malformed.
pub fn resolve_config(
    paths: &SourcePaths,
    env: &impl EnvSource,
    log: &Logger,
) -> Result<ResolvedConfig, ResolveError> {
    let config = if paths.options.exists() {
        from_options(paths, log)?
    } else {
        log.warning(format!(
            "Home Assistant configuration file not found: {}",
            paths.options.display()
        ));

        match from_env(env)? {
            Some(config) => {
                log.info(format!(
                    "Using environment configured MQTT host: {}",
                    config.endpoint()
                ));
                config
            }
            None => {
                log.warning(format!(
                    "No environment variables found: {}, {}, {}, {}",
                    defaults::env::HOST,
                    defaults::env::PORT,
                    defaults::env::USER,
                    defaults::env::PASSWORD
                ));
                from_user_file(paths, log)?
            }
        }
    };

    check_ca_certs(&config, log);
    Ok(config)
}

fn from_options(paths: &SourcePaths, log: &Logger) -> Result<ResolvedConfig, ResolveError> {
    let options = PlatformOptions::load(&paths.options)?;

    match options.broker()? {
        Some(BrokerOptions::External(settings)) => {
            let config = ResolvedConfig::from_broker(settings, options.into_raw());
            log.info(format!("Using configured MQTT host: {}", config.endpoint()));
            Ok(config)
        }
        Some(BrokerOptions::Internal(settings)) => {
            let config = ResolvedConfig::from_broker(settings, options.into_raw());
            log.info(format!("Using internal MQTT host: {}", config.endpoint()));
            Ok(config)
        }
        None => Err(FatalError::NoBrokerConfigured {
            path: paths.options.clone(),
        }
        .into()),
    }
}

/// Reads the `MQTT_*` variables. Returns `Ok(None)` if the host is empty.
fn from_env(env: &impl EnvSource) -> Result<Option<ResolvedConfig>, ResolveError> {
    let host = env.var_or(defaults::env::HOST, "");
    let port_text = env.var_or(defaults::env::PORT, defaults::MQTT_PORT_ENV);
    let port = port_text
        .trim()
        .parse::<u16>()
        .map_err(|_| ResolveError::invalid_port(origin::ENV, &port_text))?;

    if host.is_empty() {
        return Ok(None);
    }

    Ok(Some(ResolvedConfig {
        source: ConfigSource::Environment,
        host: Some(host),
        port: Some(port),
        user: env.var_or(defaults::env::USER, ""),
        password: env.var_or(defaults::env::PASSWORD, ""),
        ca_certs: env.var_or(defaults::env::CA_CERTS, ""),
        raw_options: Map::new(),
    }))
}

fn from_user_file(paths: &SourcePaths, log: &Logger) -> Result<ResolvedConfig, ResolveError> {
    let unavailable = |reason: String| FatalError::UserConfigUnavailable {
        location: paths.user_config_display(),
        reason,
    };

    let Some(path) = paths.user_config.as_deref() else {
        return Err(unavailable("home directory is unknown".to_string()).into());
    };
    if !path.is_file() {
        return Err(unavailable("file not found".to_string()).into());
    }

    let user_config = match UserConfig::load(path) {
        Ok(user_config) => user_config,
        Err(ResolveError::UserConfigRead { source, .. }) => {
            return Err(unavailable(source.to_string()).into());
        }
        Err(err) => return Err(err),
    };

    let config = ResolvedConfig {
        source: ConfigSource::UserConfigFile,
        host: Some(user_config.required_string("host")?.to_string()),
        port: Some(user_port(&user_config)?),
        user: user_config.string("user")?.unwrap_or_default().to_string(),
        password: user_config.string("pwd")?.unwrap_or_default().to_string(),
        ca_certs: user_config
            .string("ca_certs")?
            .unwrap_or_default()
            .to_string(),
        raw_options: Map::new(),
    };

    log.info(format!(
        "Using mqtt_config.py configured MQTT host: {}",
        config.endpoint()
    ));
    Ok(config)
}

fn user_port(user_config: &UserConfig) -> Result<u16, ResolveError> {
    let value = match user_config.get("port") {
        None => {
            return Err(ResolveError::MissingKey {
                path: user_config.path().to_path_buf(),
                key: "port",
            });
        }
        Some(Literal::Int(i)) => Value::from(*i),
        Some(Literal::Str(s)) => Value::from(s.as_str()),
        Some(other) => return Err(ResolveError::invalid_port(origin::USER_FILE, other.to_string())),
    };

    parse_port(&value, origin::USER_FILE)
}

/// CA certificates on the plain-text port are kept but flagged.
fn check_ca_certs(config: &ResolvedConfig, log: &Logger) {
    if !config.ca_certs.is_empty() && config.port == Some(defaults::MQTT_PORT) {
        log.warning(format!(
            "CA certificates '{}' configured for plain-text port {}; TLS brokers usually listen on 8883",
            config.ca_certs,
            defaults::MQTT_PORT
        ));
    }
}
