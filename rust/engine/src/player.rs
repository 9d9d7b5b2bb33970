use serde::{Deserialize, Serialize};

/// Chip amounts are whole chips. The tracker never deals in fractional
/// denominations; splits round down and remainders go to the first winner.
pub type Chips = u64;

/// Stable identifier assigned by the engine when a player is seated.
/// Survives seat moves and hand rotation for the player's lifetime.
pub type PlayerId = u32;

/// Number of seats at the table (seat indexes 0..=9).
pub const MAX_SEATS: usize = 10;

/// Where a player stands in the current hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlayerStatus {
    /// Still able to act this hand
    Active,
    /// Surrendered the hand; chips already contributed stay in the pot
    Folded,
    /// Entire stack committed; stays in the hand but never acts again
    AllIn,
    /// Busted (zero chips at hand start); never acts and never posts blinds
    Out,
}

/// A seated player and their chip position within the current hand.
///
/// `current_bet` is the amount committed during the current street only and
/// resets to zero on every street change; cumulative per-hand totals live in
/// the game state's contribution ledger.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Engine-assigned stable id
    pub id: PlayerId,
    /// Display name used by the presentation layer
    pub name: String,
    /// Current stack
    pub chips: Chips,
    /// Chips committed on the current street
    pub current_bet: Chips,
    /// Hand status
    pub status: PlayerStatus,
    /// Seat at the table, unique among seated players
    pub seat_index: usize,
    /// Whether the player has acted during the current street
    pub has_acted: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: &str, buy_in: Chips, seat_index: usize) -> Self {
        Self {
            id,
            name: name.to_string(),
            chips: buy_in,
            current_bet: 0,
            status: PlayerStatus::Active,
            seat_index,
            has_acted: false,
        }
    }

    /// Can this player still put chips in on the current street?
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Is this player still contesting the pot (not folded, not busted)?
    pub fn in_hand(&self) -> bool {
        !matches!(self.status, PlayerStatus::Folded | PlayerStatus::Out)
    }
}
