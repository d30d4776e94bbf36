//! Conversion of the user config file into shell `export` lines.
//!
//! Backs the `parse-mqtt-config` binary:
//!
//! ```text
//! $ eval "$(parse-mqtt-config)"
//! ```

use std::path::Path;

use super::ResolveError;
use super::user_file::UserConfig;

/// User config keys and the variables they are exported as, in output order.
pub const EXPORTS: [(&str, &str); 4] = [
    ("host", "MQTT_HOST"),
    ("port", "MQTT_PORT"),
    ("user", "MQTT_USER"),
    ("pwd", "MQTT_PASSWORD"),
];

/// Builds the lines to print for the user config file at `path`.
///
/// A missing file yields a single comment line rather than an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn export_lines(path: &Path) -> Result<Vec<String>, ResolveError> {
    match UserConfig::load(path) {
        Ok(config) => Ok(render(&config)),
        Err(ResolveError::UserConfigRead { source, .. })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            Ok(vec![format!("# Config file {} not found.", path.display())])
        }
        Err(err) => Err(err),
    }
}

/// Renders `export` lines for every exported key present in `config`.
#[must_use]
pub fn render(config: &UserConfig) -> Vec<String> {
    EXPORTS
        .iter()
        .filter_map(|(key, var)| {
            config
                .get(key)
                .map(|value| format!("export {var}=\"{value}\""))
        })
        .collect()
}
