//! Input parsing for the interactive table session.
//!
//! Dealer input is a single line per action. Parsing never panics:
//! unrecognized keywords and unparseable numbers come back as
//! `ParseResult::Invalid` with a message the dealer can act on.

use chiptally_engine::player::{Chips, PlayerId};

/// One parsed dealer command for the table session.
#[derive(Debug, PartialEq)]
pub enum TableCommand {
    Seat {
        name: String,
        buy_in: Chips,
        seat: Option<usize>,
    },
    Remove {
        id: PlayerId,
    },
    Move {
        id: PlayerId,
        seat: usize,
    },
    Blinds {
        small: Chips,
        big: Chips,
    },
    Chips {
        id: PlayerId,
        amount: Chips,
    },
    Start,
    Next,
    Bet {
        amount: Chips,
    },
    AllIn,
    Fold,
    Check,
    Advance,
    Award {
        ids: Vec<PlayerId>,
    },
    Show,
    Pots,
    Reset,
    Help,
}

/// Result type for parsing dealer input.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    /// Valid table command parsed from input
    Command(TableCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

fn parse_num<T: std::str::FromStr>(s: &str, what: &str) -> Result<T, String> {
    s.parse::<T>().map_err(|_| format!("Invalid {}: '{}'", what, s))
}

/// Parse one line of dealer input into a `TableCommand`.
///
/// Accepted forms (keywords are case-insensitive; names keep their case):
/// - `seat <name> <buy-in> [seat]`
/// - `remove <id>` / `move <id> <seat>` / `chips <id> <amount>`
/// - `blinds <small> <big>`
/// - `start` / `next`
/// - `bet <amount>` / `allin` / `fold` / `check`
/// - `advance` (manual street advance)
/// - `award <id> [id ...]` (several ids chop the pot)
/// - `show` / `pots` / `reset` / `help`
/// - `q` or `quit`
pub fn parse_table_command(input: &str) -> ParseResult {
    let parts: Vec<&str> = input.split_whitespace().collect();
    if parts.is_empty() {
        return ParseResult::Invalid("Empty input".to_string());
    }
    let keyword = parts[0].to_lowercase();
    let args = &parts[1..];

    if keyword == "q" || keyword == "quit" {
        return ParseResult::Quit;
    }

    let parsed: Result<TableCommand, String> = match keyword.as_str() {
        "seat" => match args {
            [name, buy_in] => parse_num(buy_in, "buy-in").map(|buy_in| TableCommand::Seat {
                name: name.to_string(),
                buy_in,
                seat: None,
            }),
            [name, buy_in, seat] => parse_num(buy_in, "buy-in").and_then(|buy_in| {
                parse_num(seat, "seat").map(|seat| TableCommand::Seat {
                    name: name.to_string(),
                    buy_in,
                    seat: Some(seat),
                })
            }),
            _ => Err("Usage: seat <name> <buy-in> [seat]".to_string()),
        },
        "remove" => match args {
            [id] => parse_num(id, "player id").map(|id| TableCommand::Remove { id }),
            _ => Err("Usage: remove <id>".to_string()),
        },
        "move" => match args {
            [id, seat] => parse_num(id, "player id").and_then(|id| {
                parse_num(seat, "seat").map(|seat| TableCommand::Move { id, seat })
            }),
            _ => Err("Usage: move <id> <seat>".to_string()),
        },
        "blinds" => match args {
            [small, big] => parse_num(small, "small blind").and_then(|small| {
                parse_num(big, "big blind").map(|big| TableCommand::Blinds { small, big })
            }),
            _ => Err("Usage: blinds <small> <big>".to_string()),
        },
        "chips" => match args {
            [id, amount] => parse_num(id, "player id").and_then(|id| {
                parse_num(amount, "chip amount").map(|amount| TableCommand::Chips { id, amount })
            }),
            _ => Err("Usage: chips <id> <amount>".to_string()),
        },
        "start" => Ok(TableCommand::Start),
        "next" => Ok(TableCommand::Next),
        "bet" | "raise" | "call" => match args {
            [amount] => parse_num(amount, "bet amount").map(|amount| TableCommand::Bet { amount }),
            _ => Err(format!("Usage: {} <amount>", keyword)),
        },
        "allin" | "all-in" => Ok(TableCommand::AllIn),
        "fold" | "f" => Ok(TableCommand::Fold),
        "check" | "c" => Ok(TableCommand::Check),
        "advance" => Ok(TableCommand::Advance),
        "award" => {
            if args.is_empty() {
                Err("Usage: award <id> [id ...]".to_string())
            } else {
                args.iter()
                    .map(|a| parse_num(a, "player id"))
                    .collect::<Result<Vec<PlayerId>, String>>()
                    .map(|ids| TableCommand::Award { ids })
            }
        }
        "show" => Ok(TableCommand::Show),
        "pots" => Ok(TableCommand::Pots),
        "reset" => Ok(TableCommand::Reset),
        "help" | "h" | "?" => Ok(TableCommand::Help),
        _ => Err(format!(
            "Unrecognized command '{}'. Type 'help' for the command list",
            parts[0]
        )),
    };

    match parsed {
        Ok(cmd) => ParseResult::Command(cmd),
        Err(msg) => ParseResult::Invalid(msg),
    }
}
