//! Platform options file parsing.
//!
//! The supervisor writes the add-on options as a JSON object. Two shapes
//! describe a broker:
//!
//! - an external broker: `{"mqtt_host": ..., "mqtt_port": ..., "mqtt_user": ..., ...}`
//! - the internal broker service: `{"mqtt": {"host": ..., "port": ..., "username": ..., ...}}`

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ResolveError;
use super::defaults;
use super::error::origin;

/// Raw options object as read from disk.
#[derive(Debug, Clone)]
pub struct PlatformOptions {
    path: PathBuf,
    raw: Map<String, Value>,
}

/// Broker settings found in the options file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerOptions {
    /// `mqtt_host`/`mqtt_port` keys at the top level.
    External(BrokerSettings),
    /// Nested `mqtt` object provided by the internal broker service.
    Internal(BrokerSettings),
}

/// Connection settings extracted from either options shape.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrokerSettings {
    /// Broker host (`None` if the internal service omits it)
    pub host: Option<String>,
    /// Broker port (`None` if the internal service omits it)
    pub port: Option<u16>,
    /// User name
    pub user: String,
    /// Password
    pub password: String,
    /// CA certificate path (always empty for the internal broker)
    pub ca_certs: String,
}

/// Nested `mqtt` section of the options file.
#[derive(Debug, Default, Deserialize)]
struct InternalSection {
    #[serde(default)]
    host: Option<Value>,

    #[serde(default)]
    port: Option<Value>,

    #[serde(default)]
    username: Option<String>,

    #[serde(default)]
    password: Option<String>,
}

impl PlatformOptions {
    /// Loads the options file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON,
    /// or does not contain a JSON object.
    pub fn load(path: &Path) -> Result<Self, ResolveError> {
        let content = std::fs::read_to_string(path).map_err(|e| ResolveError::OptionsRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::parse(&content, path)
    }

    /// Parses options content. `path` is only used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a JSON object.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ResolveError> {
        let value: Value =
            serde_json::from_str(content).map_err(|e| ResolveError::OptionsParse {
                path: path.to_path_buf(),
                source: e,
            })?;

        match value {
            Value::Object(raw) => Ok(Self {
                path: path.to_path_buf(),
                raw,
            }),
            _ => Err(ResolveError::OptionsNotObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// Returns the path this file was read from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the full options object.
    #[must_use]
    pub const fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Consumes self, returning the full options object.
    #[must_use]
    pub fn into_raw(self) -> Map<String, Value> {
        self.raw
    }

    /// Extracts broker settings.
    ///
    /// Returns `Ok(None)` when neither shape is present.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPort` if a port is present but not a valid port number,
    /// or `InvalidValue` if the `mqtt` section is malformed.
    pub fn broker(&self) -> Result<Option<BrokerOptions>, ResolveError> {
        if self.raw.contains_key("mqtt_host") && self.raw.contains_key("mqtt_port") {
            return self.external().map(|s| Some(BrokerOptions::External(s)));
        }

        if let Some(section) = self.raw.get("mqtt") {
            return internal(section).map(|s| Some(BrokerOptions::Internal(s)));
        }

        Ok(None)
    }

    fn external(&self) -> Result<BrokerSettings, ResolveError> {
        let port = match self.raw.get("mqtt_port") {
            None | Some(Value::Null) => defaults::MQTT_PORT,
            Some(value) => parse_port(value, origin::OPTIONS)?,
        };

        Ok(BrokerSettings {
            host: self.raw.get("mqtt_host").and_then(text),
            port: Some(port),
            user: self.text_or_empty("mqtt_user"),
            password: self.text_or_empty("mqtt_password"),
            ca_certs: self.text_or_empty("mqtt_ca_certs"),
        })
    }

    fn text_or_empty(&self, key: &str) -> String {
        self.raw.get(key).and_then(text).unwrap_or_default()
    }
}

fn internal(section: &Value) -> Result<BrokerSettings, ResolveError> {
    let section =
        InternalSection::deserialize(section).map_err(|e| ResolveError::InvalidValue {
            key: "mqtt",
            expected: "an object with host, port, username and password",
            found: e.to_string(),
        })?;

    let port = match section.port {
        None | Some(Value::Null) => None,
        Some(ref value) => Some(parse_port(value, origin::INTERNAL)?),
    };

    Ok(BrokerSettings {
        host: section.host.as_ref().and_then(text),
        port,
        user: section.username.unwrap_or_default(),
        password: section.password.unwrap_or_default(),
        ca_certs: String::new(),
    })
}

/// Converts a JSON scalar to text. `null` yields `None`.
fn text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Accepts an integer in port range or a string holding one.
pub(crate) fn parse_port(value: &Value, origin: &'static str) -> Result<u16, ResolveError> {
    let parsed = match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u16>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| ResolveError::invalid_port(origin, value.to_string()))
}
