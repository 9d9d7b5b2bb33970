//! Rendering helpers for the table session display.

use chiptally_engine::game::{GameState, Stage};
use chiptally_engine::player::PlayerStatus;

pub fn format_stage(stage: Stage) -> &'static str {
    match stage {
        Stage::Setup => "setup",
        Stage::Preflop => "preflop",
        Stage::Flop => "flop",
        Stage::Turn => "turn",
        Stage::River => "river",
        Stage::Showdown => "showdown",
    }
}

pub fn format_status(status: PlayerStatus) -> &'static str {
    match status {
        PlayerStatus::Active => "active",
        PlayerStatus::Folded => "folded",
        PlayerStatus::AllIn => "all-in",
        PlayerStatus::Out => "out",
    }
}

/// Renders the full table snapshot: header line plus one row per player.
/// The dealer button is marked `D`, the player to act with `*`.
pub fn render_state(state: &GameState) -> String {
    let mut lines = Vec::new();

    lines.push(format!(
        "[{}] pot {}  to match {}  blinds {}/{}",
        format_stage(state.stage()),
        state.pot(),
        state.current_bet(),
        state.small_blind(),
        state.big_blind(),
    ));

    if state.players().is_empty() {
        lines.push("  (no players seated)".to_string());
        return lines.join("\n");
    }

    let in_hand = state.stage().is_betting();
    for (i, p) in state.players().iter().enumerate() {
        let to_act = in_hand && !state.is_transitioning() && i == state.active_player_index();
        let button = in_hand || state.stage() == Stage::Showdown;
        lines.push(format!(
            "{} id {:<3} seat {:<2} {:<12} chips {:<8} bet {:<6} {}{}",
            if to_act { "*" } else { " " },
            p.id,
            p.seat_index,
            p.name,
            p.chips,
            p.current_bet,
            format_status(p.status),
            if button && i == state.dealer_index() {
                "  D"
            } else {
                ""
            },
        ));
    }
    lines.join("\n")
}

/// Renders the live pot breakdown, one line per pot with its eligible ids.
pub fn render_pots(state: &GameState) -> String {
    if state.pots().is_empty() {
        return format!("pot {} (no breakdown yet)", state.pot());
    }
    let mut lines = Vec::new();
    for (i, pot) in state.pots().iter().enumerate() {
        let label = if i == 0 { "main" } else { "side" };
        let ids: Vec<String> = pot.eligible.iter().map(|id| id.to_string()).collect();
        lines.push(format!(
            "{} pot {}: eligible [{}]",
            label,
            pot.amount,
            ids.join(", ")
        ));
    }
    lines.join("\n")
}
