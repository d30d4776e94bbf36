//! Prints MQTT settings from the user config file as shell `export` lines.
//!
//! A missing file is reported as a comment and is not an error.

use std::process::ExitCode;

use addon_helper::cli::ExportCli;
use addon_helper::config::defaults;
use addon_helper::config::export::export_lines;

#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = ExportCli::parse_args();

    let Some(path) = cli.path() else {
        println!(
            "# Config file {} not found.",
            defaults::USER_CONFIG_DISPLAY
        );
        return ExitCode::SUCCESS;
    };

    match export_lines(&path) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
