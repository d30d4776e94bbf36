//! Application startup and utilities.
//!
//! This module contains exit codes and error hints that support the
//! main entry point.

use std::error::Error as _;

use addon_helper::addon::{AddonError, PUBLIC_ATTRIBUTES};
use addon_helper::config::ResolveError;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - unavailable configuration, unknown attribute, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;
}

/// Prints the cause chain and a hint for common facade errors.
pub fn print_error(error: &AddonError) {
    eprintln!("Error: {error}");

    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }

    match error {
        AddonError::AttributeNotFound { .. } => {
            eprintln!("\nAvailable attributes: {}", PUBLIC_ATTRIBUTES.join(", "));
        }
        AddonError::Unavailable { source } => {
            if matches!(
                source.as_ref(),
                ResolveError::UserConfigParse { .. }
                    | ResolveError::MissingKey { .. }
                    | ResolveError::InvalidValue { .. }
            ) {
                eprintln!("\nRun 'parse-mqtt-config' to check the user config file.");
            }
        }
    }
}
