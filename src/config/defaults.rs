//! Default values and fixed locations for configuration sources.
//!
//! Centralized constants to avoid magic strings scattered across the codebase.

/// Platform options file written by the Home Assistant supervisor.
pub const OPTIONS_PATH: &str = "/data/options.json";

/// User config file, relative to the home directory.
pub const USER_CONFIG_RELATIVE: &str = ".config/mqtt_config.py";

/// Display form of the user config location, used in messages.
pub const USER_CONFIG_DISPLAY: &str = "~/.config/mqtt_config.py";

/// Default (plain-text) MQTT port.
pub const MQTT_PORT: u16 = 1883;

/// Default value of the `MQTT_PORT` variable before integer parsing.
pub const MQTT_PORT_ENV: &str = "1883";

/// Environment variable names.
pub mod env {
    /// Broker host name.
    pub const HOST: &str = "MQTT_HOST";
    /// Broker port.
    pub const PORT: &str = "MQTT_PORT";
    /// Broker user name.
    pub const USER: &str = "MQTT_USER";
    /// Broker password.
    pub const PASSWORD: &str = "MQTT_PASSWORD";
    /// Path to CA certificates.
    pub const CA_CERTS: &str = "MQTT_CA_CERTS";
}

/// Returns the default user config path, or `None` without a home directory.
#[must_use]
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_CONFIG_RELATIVE))
}
