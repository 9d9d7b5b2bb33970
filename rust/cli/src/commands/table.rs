//! # Table Command
//!
//! The interactive dealer session: the presentation layer in front of the
//! chip-tracking engine.
//!
//! The dealer types one command per line (`seat`, `start`, `bet`, `fold`,
//! `award`, ...); each command maps to exactly one engine action. After
//! every applied action the session renders the table snapshot, persists
//! state and statistics to the store, and appends completed hands to the
//! hand journal. Due auto-advances are fired between commands, so a closed
//! betting round moves to the next street without dealer input.
//!
//! Rejected actions (betting out of turn, checking while a call is owed)
//! print an error and leave the table untouched.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use chiptally_engine::engine::HandEngine;
use chiptally_engine::journal::Journal;

use crate::config;
use crate::error::CliError;
use crate::formatters::{render_pots, render_state};
use crate::io_utils::read_stdin_line;
use crate::store::Store;
use crate::ui;
use crate::validation::{ParseResult, TableCommand, parse_table_command};

const HELP: &str = "\
Commands:
  seat <name> <buy-in> [seat]   seat a player (lowest free seat by default)
  remove <id>                   remove a player (setup only)
  move <id> <seat>              move a player, swapping with any occupant
  blinds <small> <big>          set the blinds for the next hand
  chips <id> <amount>           correct a player's stack
  start                         start the first hand
  next                          rotate the button and deal the next hand
  bet <amount>                  bet/call/raise for the player to act
  allin                         commit the acting player's whole stack
  fold | check                  fold or check for the player to act
  advance                       advance to the next street manually
  award <id> [id ...]           award the pot(s); several ids chop
  show | pots                   print the table / the pot breakdown
  reset                         clear the table (asks for confirmation)
  quit                          save and exit";

/// Handle the table command: the interactive dealer session.
///
/// # Arguments
///
/// * `db` - Database path override (falls back to configuration)
/// * `delay_ms` - Auto-advance delay override in milliseconds
/// * `out` - Output stream for the table display
/// * `err` - Error stream for warnings and rejected input
/// * `stdin` - Input stream for dealer commands
///
/// # Returns
///
/// * `Ok(())` when the session ends (quit or EOF)
/// * `Err(CliError)` on configuration, store, or I/O failure
pub fn handle_table_command(
    db: Option<String>,
    delay_ms: Option<u64>,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let cfg = config::load_with_sources()
        .map_err(|e| CliError::Config(e.to_string()))?
        .config;
    let db_path = db.unwrap_or(cfg.db_path);
    let delay = Duration::from_millis(delay_ms.unwrap_or(cfg.advance_delay_ms));

    let store = Store::open(&db_path)?;
    let mut journal = Journal::open(journal_path(&db_path))?;

    let stats = store.load_stats()?.unwrap_or_default();
    let mut engine = match store.load_state()? {
        Some(state) => {
            let resumed = HandEngine::resume(state, stats, delay);
            if resumed.state().stage().is_betting() {
                ui::display_warning(err, "resuming a hand in progress")?;
            }
            resumed
        }
        None => {
            let mut fresh = HandEngine::new(delay);
            fresh.update_blinds(cfg.small_blind, cfg.big_blind);
            fresh
        }
    };

    writeln!(out, "chiptally table session (db: {})", db_path)?;
    writeln!(out, "Type 'help' for commands, 'quit' to save and exit.")?;
    writeln!(out, "{}", render_state(engine.state()))?;

    loop {
        pump(&mut engine, &store, out)?;

        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = read_stdin_line(stdin) else {
            break;
        };
        if line.is_empty() {
            continue;
        }

        match parse_table_command(&line) {
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
            ParseResult::Command(cmd) => {
                dispatch(cmd, &mut engine, &store, &mut journal, out, err, stdin)?;
            }
        }
    }

    persist(&store, &engine)?;
    writeln!(out, "Session saved.")?;
    Ok(())
}

/// Journal file sits next to the database: `table.db` -> `table.hands.jsonl`.
fn journal_path(db_path: &str) -> PathBuf {
    PathBuf::from(db_path).with_extension("hands.jsonl")
}

/// Fires any due street advance, persisting and re-rendering when one fired.
fn pump(engine: &mut HandEngine, store: &Store, out: &mut dyn Write) -> Result<(), CliError> {
    if engine.poll(Instant::now()) {
        persist(store, engine)?;
        writeln!(out, "{}", render_state(engine.state()))?;
    }
    Ok(())
}

fn persist(store: &Store, engine: &HandEngine) -> Result<(), CliError> {
    store.save_state(engine.state())?;
    store.save_stats(engine.stats())?;
    Ok(())
}

fn dispatch(
    cmd: TableCommand,
    engine: &mut HandEngine,
    store: &Store,
    journal: &mut Journal,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    let applied = match cmd {
        TableCommand::Help => {
            writeln!(out, "{}", HELP)?;
            return Ok(());
        }
        TableCommand::Show => {
            writeln!(out, "{}", render_state(engine.state()))?;
            return Ok(());
        }
        TableCommand::Pots => {
            writeln!(out, "{}", render_pots(engine.state()))?;
            return Ok(());
        }
        TableCommand::Reset => {
            write!(out, "This clears the table. Type 'yes' to confirm: ")?;
            out.flush()?;
            match read_stdin_line(stdin) {
                Some(answer) if answer.eq_ignore_ascii_case("yes") => {
                    engine.reset();
                    true
                }
                _ => {
                    writeln!(out, "Reset aborted.")?;
                    return Ok(());
                }
            }
        }
        TableCommand::Blinds { small, big } => {
            if small == 0 || big == 0 || small > big {
                ui::write_error(err, "blinds must be >=1 with small <= big")?;
                return Ok(());
            }
            engine.update_blinds(small, big)
        }
        TableCommand::Seat { name, buy_in, seat } => engine.add_player(&name, buy_in, seat),
        TableCommand::Remove { id } => engine.remove_player(id),
        TableCommand::Move { id, seat } => engine.move_player_to_seat(id, seat),
        TableCommand::Chips { id, amount } => engine.update_player_chips(id, amount),
        TableCommand::Start => engine.start_game(None, None),
        TableCommand::Next => engine.next_hand(),
        TableCommand::Bet { amount } => engine.place_bet(amount),
        TableCommand::AllIn => engine.go_all_in(),
        TableCommand::Fold => engine.fold(),
        TableCommand::Check => engine.check(),
        TableCommand::Advance => engine.next_stage(),
        TableCommand::Award { ids } => engine.award_pot(&ids),
    };

    if !applied {
        ui::write_error(err, "not allowed right now")?;
        return Ok(());
    }

    if let Some(summary) = engine.take_completed_hand() {
        journal.append(&summary)?;
        let winners: Vec<String> = summary.winners.iter().map(|id| id.to_string()).collect();
        writeln!(
            out,
            "Hand {} complete: pot {} won by [{}]",
            summary.hand_no,
            summary.pot,
            winners.join(", ")
        )?;
    }

    persist(store, engine)?;
    writeln!(out, "{}", render_state(engine.state()))?;
    Ok(())
}
