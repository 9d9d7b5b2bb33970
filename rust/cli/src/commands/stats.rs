//! Stats command handler.
//!
//! Prints the persisted lifetime table statistics as pretty JSON.

use std::io::Write;

use crate::config;
use crate::error::CliError;
use crate::store::Store;

/// Handle the stats command.
///
/// Loads lifetime statistics from the store (an empty record when nothing
/// has been persisted yet) and prints them as formatted JSON.
pub fn handle_stats_command(
    db: Option<String>,
    out: &mut dyn Write,
    _err: &mut dyn Write,
) -> Result<(), CliError> {
    let db_path = match db {
        Some(path) => path,
        None => {
            config::load_with_sources()
                .map_err(|e| CliError::Config(e.to_string()))?
                .config
                .db_path
        }
    };

    let store = Store::open(&db_path)?;
    let stats = store.load_stats()?.unwrap_or_default();
    let json_str = serde_json::to_string_pretty(&stats).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}
