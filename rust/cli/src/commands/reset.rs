//! Reset command handler.
//!
//! Clears the persisted table state from the store. Lifetime statistics
//! survive, matching the in-session `reset` behavior. Destructive, so it
//! asks for confirmation unless `--yes` was given.

use std::io::{BufRead, Write};

use crate::config;
use crate::error::CliError;
use crate::io_utils::read_stdin_line;
use crate::store::Store;

/// Handle the reset command.
///
/// Without `--yes`, prompts on stdout and requires the literal answer
/// `yes`; anything else aborts with the state intact.
pub fn handle_reset_command(
    db: Option<String>,
    yes: bool,
    out: &mut dyn Write,
    _err: &mut dyn Write,
    stdin: &mut dyn BufRead,
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

    if !yes {
        write!(
            out,
            "This clears the saved table state in {}. Type 'yes' to confirm: ",
            db_path
        )?;
        out.flush()?;
        match read_stdin_line(stdin) {
            Some(answer) if answer.eq_ignore_ascii_case("yes") => {}
            _ => {
                writeln!(out, "Reset aborted.")?;
                return Ok(());
            }
        }
    }

    let store = Store::open(&db_path)?;
    store.clear_state()?;
    writeln!(out, "Table state cleared.")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chiptally_engine::game::GameState;
    use std::io::Cursor;

    fn seeded_db(dir: &tempfile::TempDir) -> String {
        let db = dir.path().join("table.db");
        Store::open(&db).unwrap().save_state(&GameState::new()).unwrap();
        db.to_string_lossy().into_owned()
    }

    #[test]
    fn test_reset_with_yes_flag_skips_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"".to_vec());
        handle_reset_command(Some(db.clone()), true, &mut out, &mut err, &mut stdin).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("cleared"));
        assert!(Store::open(&db).unwrap().load_state().unwrap().is_none());
    }

    #[test]
    fn test_reset_prompt_aborts_on_anything_but_yes() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"nope\n".to_vec());
        handle_reset_command(Some(db.clone()), false, &mut out, &mut err, &mut stdin).unwrap();

        assert!(String::from_utf8(out).unwrap().contains("aborted"));
        assert!(Store::open(&db).unwrap().load_state().unwrap().is_some());
    }

    #[test]
    fn test_reset_prompt_accepts_yes() {
        let dir = tempfile::tempdir().unwrap();
        let db = seeded_db(&dir);

        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(b"yes\n".to_vec());
        handle_reset_command(Some(db.clone()), false, &mut out, &mut err, &mut stdin).unwrap();

        assert!(Store::open(&db).unwrap().load_state().unwrap().is_none());
    }
}
