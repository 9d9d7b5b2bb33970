use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::player::{Chips, Player, PlayerId};

/// Stage of a hand. Progression is strictly forward; the engine never
/// regresses a stage within a hand.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Seating and buy-ins; no hand in progress
    Setup,
    Preflop,
    Flop,
    Turn,
    River,
    /// Betting is over; pots are finalized and wait to be awarded
    Showdown,
}

impl Stage {
    /// The following stage, or `None` from showdown.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::Setup => Some(Stage::Preflop),
            Stage::Preflop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::Showdown),
            Stage::Showdown => None,
        }
    }

    /// Stages during which betting actions are accepted.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Stage::Preflop | Stage::Flop | Stage::Turn | Stage::River
        )
    }
}

/// One pot (main or side) and the players who may win it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: Chips,
    /// Non-folded contributors whose hand total reached this pot's level
    pub eligible: Vec<PlayerId>,
}

/// Lifetime table statistics, persisted separately from the game state so
/// they survive hand rotation.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LifetimeStats {
    pub hands_played: u64,
    pub biggest_pot: Chips,
}

/// The authoritative table state. Created once at setup, mutated only
/// through the engine's action API, and serialized in full after every
/// transition by the persistence adapter.
///
/// Money conservation invariant: `pot` plus every player's stack plus
/// already-awarded amounts always equals the sum of all buy-ins.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seated players, sorted by seat index at hand start; array order is
    /// turn order for the duration of a hand
    pub(crate) players: Vec<Player>,
    /// Total unresolved chips for the current hand
    pub(crate) pot: Chips,
    /// Main pot first, then side pots in ascending level order
    pub(crate) pots: Vec<Pot>,
    /// Cumulative chips each player has put in this hand, across all
    /// streets. Never decremented within a hand; sole input to side-pot
    /// computation.
    pub(crate) hand_contributions: BTreeMap<PlayerId, Chips>,
    /// Highest per-street commitment among players this street
    pub(crate) current_bet: Chips,
    pub(crate) small_blind: Chips,
    pub(crate) big_blind: Chips,
    /// Button position as an index into `players`
    pub(crate) dealer_index: usize,
    /// Whose turn it is, as an index into `players`
    pub(crate) active_player_index: usize,
    pub(crate) stage: Stage,
    /// Lock held while a delayed street advance is pending
    pub(crate) is_transitioning: bool,
    /// State version; bumped on every applied action
    pub(crate) generation: u64,
    /// Timer epoch; moves only when a pending street advance is superseded
    /// (transition, new hand, reset), never on bookkeeping actions. The
    /// advance timer is keyed to this so a stale timer can never advance
    /// a hand it no longer belongs to.
    #[serde(default)]
    pub(crate) epoch: u64,
    pub(crate) next_player_id: PlayerId,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            pot: 0,
            pots: Vec::new(),
            hand_contributions: BTreeMap::new(),
            current_bet: 0,
            small_blind: 5,
            big_blind: 10,
            dealer_index: 0,
            active_player_index: 0,
            stage: Stage::Setup,
            is_transitioning: false,
            generation: 0,
            epoch: 0,
            next_player_id: 1,
        }
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn pot(&self) -> Chips {
        self.pot
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn contributions(&self) -> &BTreeMap<PlayerId, Chips> {
        &self.hand_contributions
    }

    pub fn current_bet(&self) -> Chips {
        self.current_bet
    }

    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    pub fn dealer_index(&self) -> usize {
        self.dealer_index
    }

    pub fn active_player_index(&self) -> usize {
        self.active_player_index
    }

    /// The player whose turn it is, if a hand is in progress.
    pub fn active_player(&self) -> Option<&Player> {
        if self.stage.is_betting() {
            self.players.get(self.active_player_index)
        } else {
            None
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn is_transitioning(&self) -> bool {
        self.is_transitioning
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
