//! Configuration command handler.
//!
//! Implements the `cfg` command, which displays the current chiptally
//! configuration settings with their sources (default, environment, or
//! configuration file).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "db_path": {
//!     "value": "chiptally.db",
//!     "source": "default"
//!   },
//!   ...
//! }
//! ```

use crate::config;
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// Loads the current configuration with source tracking and displays it
/// as formatted JSON to the output stream.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };

    let config::ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "db_path": {
            "value": config.db_path,
            "source": sources.db_path,
        },
        "small_blind": {
            "value": config.small_blind,
            "source": sources.small_blind,
        },
        "big_blind": {
            "value": config.big_blind,
            "source": sources.big_blind,
        },
        "advance_delay_ms": {
            "value": config.advance_delay_ms,
            "source": sources.advance_delay_ms,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_cfg_displays_json_output() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_cfg_command(&mut out, &mut err);
        assert!(result.is_ok(), "cfg command should succeed");

        let output = String::from_utf8(out).unwrap();
        let _json: serde_json::Value =
            serde_json::from_str(&output).expect("cfg output should be valid JSON");

        assert!(output.contains("db_path"));
        assert!(output.contains("small_blind"));
        assert!(output.contains("big_blind"));
        assert!(output.contains("advance_delay_ms"));
        assert!(output.contains("value"));
        assert!(output.contains("source"));
    }

    #[test]
    #[serial]
    fn test_cfg_no_error_output_on_success() {
        let mut out = Vec::new();
        let mut err = Vec::new();

        let result = handle_cfg_command(&mut out, &mut err);
        if result.is_ok() {
            let error_output = String::from_utf8(err).unwrap();
            assert!(error_output.is_empty());
        }
    }
}
