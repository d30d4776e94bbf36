//! Addon helper demo.
//!
//! Entry point for the addon-helper application: shows that the facade
//! resolves lazily, then reads values and logs at every level.

use addon_helper::addon::{Addon, AddonError, LoadStatus};
use addon_helper::cli::{Cli, Command};
use addon_helper::config::SystemResolver;
use addon_helper::log::{CRITICAL, DEBUG, ERROR, INFO, WARNING};
use std::process::ExitCode;

mod app;

use app::{exit_code, print_error};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let addon = Addon::new(SystemResolver::new(cli.source_paths()));

    let result = match cli.command() {
        Command::Demo => run_demo(&addon, cli.verbose),
        Command::Get { name } => print_attribute(&addon, &name),
        Command::Attributes => print_attributes(&addon),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            print_error(&e);
            exit_code::CONFIG_ERROR
        }
    }
}

/// Walks through lazy loading, value access and every log level.
fn run_demo(addon: &Addon, verbose: bool) -> Result<(), AddonError> {
    println!("Loaded before access: {}", addon.status() == LoadStatus::Loaded);

    let log = addon.log()?;
    println!("Loaded after access: {}", addon.is_loaded());

    log.info("This is a test info message from addon-helper");
    log.info(format!("MQTT source: {}", addon.get("source")?));
    log.info(format!("MQTT host: {}", addon.get("host")?));
    log.info(format!("MQTT port: {}", addon.get("port")?));

    log.debug("Debug level reached before setting level to DEBUG.");
    if verbose {
        log.set_level(DEBUG);
        log.debug("Debug level reached after setting level to DEBUG.");
    }
    log.warning(format!("Warning level ({}) reached.", WARNING.value()));
    log.error(format!("Error level ({}) reached.", ERROR.value()));
    log.critical(format!("Critical level ({}) reached.", CRITICAL.value()));
    log.info(format!("Back to info level ({}).", INFO.value()));

    Ok(())
}

fn print_attribute(addon: &Addon, name: &str) -> Result<(), AddonError> {
    let value = addon.get(name)?;
    println!("{value}");
    Ok(())
}

fn print_attributes(addon: &Addon) -> Result<(), AddonError> {
    let before = addon.list_attributes();
    addon.namespace()?;
    let after = addon.list_attributes();

    println!("Declared: {}", join(&before));
    println!("Loaded:   {}", join(&after));
    Ok(())
}

fn join(names: &std::collections::BTreeSet<&str>) -> String {
    names.iter().copied().collect::<Vec<_>>().join(", ")
}
