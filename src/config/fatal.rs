//! Process termination for unrecoverable misconfiguration.

use crate::log::Logger;

use super::FatalError;

/// Exit status used when no broker configuration can be found.
pub const EXIT_STATUS: i32 = 1;

/// Logs `error` at `ERROR` and ends the process with [`EXIT_STATUS`].
///
/// The resolver returns fatal errors unlogged, so this is the single line
/// reporting them. Destructors of live values do not run. This is the only place in the
/// crate that exits the process.
pub fn terminate(error: &FatalError) -> ! {
    Logger::global().error(error);
    std::process::exit(EXIT_STATUS)
}
