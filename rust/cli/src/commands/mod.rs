//! Command handler modules for the chiptally CLI.
//!
//! Each subcommand is implemented in its own module file with a consistent
//! pattern:
//!
//! - Public handler function: `pub fn handle_COMMAND_command(...) -> Result<(), CliError>`
//! - Module-private helpers specific to that command
//! - Dependency injection: output streams (`&mut dyn Write`) passed as parameters
//! - Error propagation: all errors propagated via the `CliError` enum

mod cfg;
mod reset;
mod stats;
mod table;

pub use cfg::handle_cfg_command;
pub use reset::handle_reset_command;
pub use stats::handle_stats_command;
pub use table::handle_table_command;
