//! Turn-order and betting-round predicates.
//!
//! These are pure functions over the player list; the engine consults them
//! after every action to move the turn marker and to decide when a street
//! is finished.

use crate::player::{Chips, Player};

/// Finds the next player who can act, scanning forward circularly from
/// `from + 1` and skipping folded, busted, and all-in players.
///
/// Returns `None` when no active player exists within one full loop, which
/// callers must treat as the betting round being closed. The scan is
/// bounded by the player count, so it terminates even when every remaining
/// player is all-in.
pub fn next_active_player(players: &[Player], from: usize) -> Option<usize> {
    if players.is_empty() {
        return None;
    }
    let n = players.len();
    let mut idx = (from + 1) % n;
    for _ in 0..n {
        if players[idx].can_act() {
            return Some(idx);
        }
        idx = (idx + 1) % n;
    }
    None
}

/// A betting round is closed when every active player has acted and matched
/// the table bet, or when nobody can act anymore while at least one player
/// still contests the pot (everyone else folded or all-in).
pub fn betting_round_closed(players: &[Player], table_bet: Chips) -> bool {
    let mut active = 0usize;
    let mut all_acted = true;
    let mut all_matched = true;
    let mut contesting = 0usize;

    for p in players {
        if p.in_hand() {
            contesting += 1;
        }
        if p.can_act() {
            active += 1;
            all_acted &= p.has_acted;
            all_matched &= p.current_bet == table_bet;
        }
    }

    (active > 0 && all_acted && all_matched) || (active == 0 && contesting > 0)
}

/// True when the remaining streets cannot see any betting: more than one
/// player contests the pot but at most one of them can still act. The
/// engine fast-forwards streets automatically in this situation.
pub fn only_all_ins_remain(players: &[Player]) -> bool {
    let active = players.iter().filter(|p| p.can_act()).count();
    let contesting = players.iter().filter(|p| p.in_hand()).count();
    contesting > 1 && active <= 1
}
