//! Attribute values handed out by the facade.

use std::fmt;

use serde_json::{Map, Value as JsonValue};

use crate::config::ConfigSource;
use crate::log::{Level, Logger};

/// A named value borrowed from the resolved namespace.
#[derive(Debug, Clone, Copy)]
pub enum Value<'a> {
    /// Absent value (e.g. host omitted by the internal broker).
    Null,
    /// Text value.
    Str(&'a str),
    /// Integer value.
    Int(i64),
    /// Log level constant.
    Level(Level),
    /// Raw options object.
    Map(&'a Map<String, JsonValue>),
    /// The process-wide logger.
    Logger(&'a Logger),
    /// Which source supplied the configuration.
    Source(ConfigSource),
}

impl<'a> Value<'a> {
    /// Returns the text, if this is a string.
    #[must_use]
    pub const fn as_str(&self) -> Option<&'a str> {
        match *self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer, if this is an integer or a level.
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match *self {
            Self::Int(i) => Some(i),
            Self::Level(level) => Some(i64::from(level.value())),
            _ => None,
        }
    }

    /// Returns the level, if this is a level constant.
    #[must_use]
    pub const fn as_level(&self) -> Option<Level> {
        match *self {
            Self::Level(level) => Some(level),
            _ => None,
        }
    }

    /// Returns the options map, if this is a map.
    #[must_use]
    pub const fn as_map(&self) -> Option<&'a Map<String, JsonValue>> {
        match *self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Returns the logger, if this is the logger.
    #[must_use]
    pub const fn as_logger(&self) -> Option<&'a Logger> {
        match *self {
            Self::Logger(logger) => Some(logger),
            _ => None,
        }
    }

    /// Returns `true` for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("None"),
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Level(level) => write!(f, "{}", level.value()),
            Self::Map(map) => write!(f, "{}", JsonValue::Object((*map).clone())),
            Self::Logger(logger) => write!(f, "<Logger {} ({})>", logger.name(), logger.level()),
            Self::Source(source) => write!(f, "{source}"),
        }
    }
}
