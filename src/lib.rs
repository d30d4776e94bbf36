//! Addon helper: bashio-style logging and MQTT broker configuration
//! for Home Assistant add-ons.
//!
//! The broker settings come from exactly one source: the platform options
//! file, `MQTT_*` environment variables, or `~/.config/mqtt_config.py`.
//! They are reached through the lazy [`addon`] facade.

pub mod addon;
pub mod cli;
pub mod config;
pub mod log;

pub use addon::{Addon, AddonError, Value, global};
pub use config::{ConfigSource, ResolvedConfig};
pub use log::{CRITICAL, DEBUG, ERROR, INFO, Level, Logger, WARNING};
