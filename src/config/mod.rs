//! MQTT broker configuration layer.
//!
//! This module provides:
//! - Configuration sources and their locations ([`ConfigSource`], [`SourcePaths`])
//! - Environment abstraction ([`EnvSource`], [`ProcessEnv`], [`MapEnv`])
//! - Platform options file parsing ([`PlatformOptions`])
//! - Literal-only user config parsing ([`UserConfig`])
//! - Layered resolution ([`resolve_config`], [`Resolver`], [`SystemResolver`])
//! - Shell export conversion ([`export`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Exactly one source is used, checked in this order:
//!
//! 1. **Platform options file** (`/data/options.json`) - if it exists it is
//!    authoritative; an options file without broker settings is fatal.
//! 2. **Environment variables** (`MQTT_HOST`, `MQTT_PORT`, ...) - used when
//!    `MQTT_HOST` is non-empty.
//! 3. **User config file** (`~/.config/mqtt_config.py`) - last resort; if
//!    it is missing the process terminates.
//!
//! Values are never merged across sources.
//!
//! # Fatal errors
//!
//! [`FatalError`] marks misconfiguration that cannot be recovered from.
//! [`resolve_config`] returns it so it can be tested; [`SystemResolver`]
//! hands it to [`fatal::terminate`], which exits the process.

pub mod defaults;
mod error;
pub mod export;
pub mod fatal;
mod options;
mod resolver;
mod source;
mod user_file;

#[cfg(test)]
mod export_tests;
#[cfg(test)]
mod options_tests;
#[cfg(test)]
mod user_file_tests;

pub use error::{FatalError, ResolveError, origin};
pub use options::{BrokerOptions, BrokerSettings, PlatformOptions};
pub use resolver::{ResolvedConfig, Resolver, SystemResolver, resolve_config};
pub use source::{ConfigSource, EnvSource, MapEnv, ProcessEnv, SourcePaths};
pub use user_file::{Literal, UserConfig};
