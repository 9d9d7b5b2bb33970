//! The hand engine: the authoritative state machine behind the chip
//! tracker.
//!
//! Every public method is one atomic state transition. Actions that are
//! illegal against the current state leave it untouched and return
//! `false`; the caller is a single trusted dealer, not a remote party,
//! so bad input is ignored rather than raised.
//! Every applied action bumps the state generation. The auto-advance
//! timer is keyed to a separate hand epoch that moves only when a pending
//! street is superseded (see [`crate::timer`]), so bookkeeping actions
//! taken while an advance is pending never stall the hand.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::game::{GameState, LifetimeStats, Stage};
use crate::journal::HandSummary;
use crate::player::{Chips, Player, PlayerId, PlayerStatus, MAX_SEATS};
use crate::pot::{compute_side_pots, split_award};
use crate::rules;
use crate::timer::AdvanceTimer;

/// Owns the game state, lifetime statistics, and the street-advance timer,
/// and exposes the full action API used by the presentation layer.
///
/// # Examples
///
/// ```
/// use chiptally_engine::engine::HandEngine;
/// use std::time::Duration;
///
/// let mut engine = HandEngine::new(Duration::ZERO);
/// engine.add_player("Ana", 1_000, None);
/// engine.add_player("Bo", 1_000, None);
/// engine.start_game(Some(5), Some(10));
///
/// // Heads-up: the dealer posts the small blind.
/// assert_eq!(engine.state().pot(), 15);
/// assert_eq!(engine.state().current_bet(), 10);
/// ```
pub struct HandEngine {
    state: GameState,
    stats: LifetimeStats,
    timer: AdvanceTimer,
    /// Set when a hand fully resolves; taken by the driver for journaling
    completed: Option<HandSummary>,
}

impl HandEngine {
    pub fn new(advance_delay: Duration) -> Self {
        Self {
            state: GameState::new(),
            stats: LifetimeStats::default(),
            timer: AdvanceTimer::new(advance_delay),
            completed: None,
        }
    }

    /// Rebuilds an engine around previously persisted state and stats.
    /// The generation and timer epoch travel with the state; the timer
    /// itself starts empty, so nothing pending survives a restart.
    pub fn resume(state: GameState, stats: LifetimeStats, advance_delay: Duration) -> Self {
        Self {
            state,
            stats,
            timer: AdvanceTimer::new(advance_delay),
            completed: None,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn stats(&self) -> &LifetimeStats {
        &self.stats
    }

    /// Whether a delayed street advance is currently scheduled.
    pub fn advance_pending(&self) -> bool {
        self.timer.is_armed()
    }

    /// Takes the summary of the most recently completed hand, if any.
    pub fn take_completed_hand(&mut self) -> Option<HandSummary> {
        self.completed.take()
    }

    // ---- seating -------------------------------------------------------

    /// Seats a new player. Takes the requested seat when it is free,
    /// otherwise the lowest free seat; silently does nothing when the
    /// table is full.
    pub fn add_player(&mut self, name: &str, buy_in: Chips, seat: Option<usize>) -> bool {
        let taken: Vec<usize> = self.state.players.iter().map(|p| p.seat_index).collect();

        let seat_index = match seat {
            Some(s) if s < MAX_SEATS && !taken.contains(&s) => s,
            _ => match (0..MAX_SEATS).find(|s| !taken.contains(s)) {
                Some(s) => s,
                None => return false,
            },
        };

        let id = self.state.next_player_id;
        self.state.next_player_id += 1;
        self.state
            .players
            .push(Player::new(id, name, buy_in, seat_index));
        self.state.players.sort_by_key(|p| p.seat_index);
        self.bump();
        true
    }

    /// Removes a player. Only allowed during setup; mid-hand removal would
    /// break the pot ledger, so it is ignored.
    pub fn remove_player(&mut self, id: PlayerId) -> bool {
        if self.state.stage != Stage::Setup {
            return false;
        }
        let before = self.state.players.len();
        self.state.players.retain(|p| p.id != id);
        if self.state.players.len() == before {
            return false;
        }
        self.bump();
        true
    }

    /// Moves a player to a target seat during setup. When the seat is
    /// occupied the two players swap, so no seat ever holds two players.
    pub fn move_player_to_seat(&mut self, id: PlayerId, target_seat: usize) -> bool {
        if self.state.stage != Stage::Setup || target_seat >= MAX_SEATS {
            return false;
        }
        let Some(mover) = self.state.players.iter().position(|p| p.id == id) else {
            return false;
        };
        let old_seat = self.state.players[mover].seat_index;
        if old_seat == target_seat {
            return false;
        }
        if let Some(occupant) = self
            .state
            .players
            .iter()
            .position(|p| p.seat_index == target_seat)
        {
            self.state.players[occupant].seat_index = old_seat;
        }
        self.state.players[mover].seat_index = target_seat;
        self.bump();
        true
    }

    pub fn update_blinds(&mut self, small_blind: Chips, big_blind: Chips) -> bool {
        self.state.small_blind = small_blind;
        self.state.big_blind = big_blind;
        self.bump();
        true
    }

    /// Dealer correction of a stack (rebuy, miscount). Applies as-is.
    pub fn update_player_chips(&mut self, id: PlayerId, chips: Chips) -> bool {
        let Some(p) = self.state.players.iter_mut().find(|p| p.id == id) else {
            return false;
        };
        p.chips = chips;
        self.bump();
        true
    }

    // ---- hand start ----------------------------------------------------

    /// Starts the first hand: re-derives turn order from seat indexes,
    /// puts the button at the first seat, posts blinds, and enters
    /// preflop. Blind amounts default to the current table blinds.
    pub fn start_game(&mut self, small_blind: Option<Chips>, big_blind: Option<Chips>) -> bool {
        if self.state.players.len() < 2 {
            return false;
        }
        if let Some(sb) = small_blind {
            self.state.small_blind = sb;
        }
        if let Some(bb) = big_blind {
            self.state.big_blind = bb;
        }
        self.state.players.sort_by_key(|p| p.seat_index);
        self.begin_hand(0);
        true
    }

    /// Rotates the button and starts the next hand. Only legal from
    /// showdown. The rotation modulus counts busted players too, so the
    /// button track stays stable as players bust.
    pub fn next_hand(&mut self) -> bool {
        if self.state.stage != Stage::Showdown || self.state.players.len() < 2 {
            return false;
        }
        let dealer = (self.state.dealer_index + 1) % self.state.players.len();
        self.begin_hand(dealer);
        true
    }

    fn begin_hand(&mut self, dealer_index: usize) {
        let n = self.state.players.len();

        for p in &mut self.state.players {
            p.status = if p.chips > 0 {
                PlayerStatus::Active
            } else {
                PlayerStatus::Out
            };
            p.current_bet = 0;
            p.has_acted = false;
        }

        // Heads-up: the button posts the small blind and acts first.
        let (sb_index, bb_index, first_to_act) = if n == 2 {
            (dealer_index, (dealer_index + 1) % n, dealer_index)
        } else {
            (
                (dealer_index + 1) % n,
                (dealer_index + 2) % n,
                (dealer_index + 3) % n,
            )
        };

        let mut contributions: BTreeMap<PlayerId, Chips> =
            self.state.players.iter().map(|p| (p.id, 0)).collect();
        let mut pot: Chips = 0;

        let sb = self.state.small_blind;
        let bb = self.state.big_blind;
        Self::post_blind(&mut self.state.players[sb_index], sb, &mut pot, &mut contributions);
        Self::post_blind(&mut self.state.players[bb_index], bb, &mut pot, &mut contributions);

        self.state.dealer_index = dealer_index;
        self.state.active_player_index = first_to_act;
        self.state.pot = pot;
        self.state.pots.clear();
        self.state.hand_contributions = contributions;
        // The table bet is the full big blind even when the poster was
        // short: callers still owe the nominal amount.
        self.state.current_bet = bb;
        self.state.stage = Stage::Preflop;
        self.state.is_transitioning = false;
        self.supersede_advance();
        self.bump();
    }

    /// Posts `min(amount, stack)`. A short blind is legal and puts the
    /// poster all-in on the spot. Busted players skip their blind entirely
    /// rather than passing it along.
    fn post_blind(
        player: &mut Player,
        amount: Chips,
        pot: &mut Chips,
        contributions: &mut BTreeMap<PlayerId, Chips>,
    ) {
        if player.status == PlayerStatus::Out {
            return;
        }
        let paid = amount.min(player.chips);
        player.chips -= paid;
        player.current_bet = paid;
        if player.chips == 0 {
            player.status = PlayerStatus::AllIn;
        }
        *pot += paid;
        *contributions.entry(player.id).or_insert(0) += paid;
    }

    // ---- betting actions -----------------------------------------------

    /// Index of the player allowed to act right now, or `None` when no
    /// betting action is acceptable (no hand, transition lock, bad index).
    fn acting_index(&self) -> Option<usize> {
        if !self.state.stage.is_betting() || self.state.is_transitioning {
            return None;
        }
        let idx = self.state.active_player_index;
        if idx < self.state.players.len() {
            Some(idx)
        } else {
            None
        }
    }

    /// Adds chips from the acting player's stack to the pot: a call when
    /// the new street total matches the table bet, a raise when it exceeds
    /// it. The amount is capped at the stack; betting the whole stack goes
    /// all-in. Use [`Self::go_all_in`] for a stack-capped shove.
    pub fn place_bet(&mut self, amount: Chips) -> bool {
        let Some(idx) = self.acting_index() else {
            return false;
        };
        let amount = amount.min(self.state.players[idx].chips);
        if amount == 0 {
            return false;
        }
        self.commit_chips(idx, amount);
        self.advance_turn();
        self.bump();
        self.check_round_closure();
        true
    }

    /// Commits the acting player's entire remaining stack, regardless of
    /// the amount needed to call. Always legal with a non-empty stack.
    pub fn go_all_in(&mut self) -> bool {
        let Some(idx) = self.acting_index() else {
            return false;
        };
        let amount = self.state.players[idx].chips;
        if amount == 0 {
            return false;
        }
        self.commit_chips(idx, amount);
        self.advance_turn();
        self.bump();
        self.check_round_closure();
        true
    }

    fn commit_chips(&mut self, idx: usize, amount: Chips) {
        let p = &mut self.state.players[idx];
        p.chips -= amount;
        p.current_bet += amount;
        p.status = if p.chips == 0 {
            PlayerStatus::AllIn
        } else {
            PlayerStatus::Active
        };
        p.has_acted = true;
        let id = p.id;
        let street_total = p.current_bet;

        self.state.pot += amount;
        self.state.current_bet = self.state.current_bet.max(street_total);
        *self.state.hand_contributions.entry(id).or_insert(0) += amount;
    }

    /// Folds the acting player. If exactly one contestant remains, the
    /// whole pot goes to them immediately and the hand jumps straight to
    /// showdown without waiting for a winner call.
    pub fn fold(&mut self) -> bool {
        let Some(idx) = self.acting_index() else {
            return false;
        };
        self.state.players[idx].status = PlayerStatus::Folded;
        self.state.players[idx].has_acted = true;

        let contesting: Vec<usize> = self
            .state
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.in_hand())
            .map(|(i, _)| i)
            .collect();

        if contesting.len() == 1 {
            let winner = contesting[0];
            let amount = self.state.pot;
            self.state.players[winner].chips += amount;
            let winner_id = self.state.players[winner].id;

            self.state.pot = 0;
            self.state.pots.clear();
            self.state.stage = Stage::Showdown;
            self.state.is_transitioning = false;
            self.supersede_advance();

            self.stats.hands_played += 1;
            self.stats.biggest_pot = self.stats.biggest_pot.max(amount);
            self.completed = Some(HandSummary {
                hand_no: self.stats.hands_played,
                pot: amount,
                winners: vec![winner_id],
                stage: Stage::Showdown,
                ts: None,
            });
            self.bump();
            return true;
        }

        self.advance_turn();
        self.bump();
        self.check_round_closure();
        true
    }

    /// Checks. Legal only when the acting player has already matched the
    /// table bet; checking while a call is owed is ignored.
    pub fn check(&mut self) -> bool {
        let Some(idx) = self.acting_index() else {
            return false;
        };
        if self.state.players[idx].current_bet != self.state.current_bet {
            return false;
        }
        self.state.players[idx].has_acted = true;
        self.advance_turn();
        self.bump();
        self.check_round_closure();
        true
    }

    fn advance_turn(&mut self) {
        if let Some(next) =
            rules::next_active_player(&self.state.players, self.state.active_player_index)
        {
            self.state.active_player_index = next;
        }
    }

    /// Arms the delayed street advance when the betting round just closed.
    /// The single-slot timer makes repeated closure checks harmless.
    fn check_round_closure(&mut self) {
        if rules::betting_round_closed(&self.state.players, self.state.current_bet) {
            self.state.is_transitioning = true;
            self.timer.arm(self.state.epoch, Instant::now());
        }
    }

    // ---- street advancement --------------------------------------------

    /// Advances to the next street. Resets per-street bets, recomputes the
    /// live side-pot breakdown from the contribution ledger, and hands the
    /// action to the first active player past the button. When at most one
    /// player can still act, the next advance is re-armed immediately so
    /// remaining streets fast-forward to showdown.
    ///
    /// Used both by the timer and by a manual advance; the semantics are
    /// identical either way.
    pub fn next_stage(&mut self) -> bool {
        // Any pending advance is superseded by this transition.
        self.supersede_advance();

        if self.state.stage == Stage::Showdown {
            // Already at showdown; just release the transition lock.
            if self.state.is_transitioning {
                self.state.is_transitioning = false;
                self.bump();
                return true;
            }
            return false;
        }
        // Setup has no street to advance from.
        if !self.state.stage.is_betting() || self.state.players.is_empty() {
            return false;
        }
        let Some(next) = self.state.stage.next() else {
            return false;
        };

        for p in &mut self.state.players {
            p.current_bet = 0;
            p.has_acted = !p.can_act();
        }
        self.state.current_bet = 0;
        self.state.pots =
            compute_side_pots(&self.state.players, &self.state.hand_contributions);
        self.state.stage = next;

        if next == Stage::Showdown {
            self.state.is_transitioning = false;
            self.bump();
            return true;
        }

        if let Some(first) =
            rules::next_active_player(&self.state.players, self.state.dealer_index)
        {
            self.state.active_player_index = first;
        }

        let fast_forward = rules::only_all_ins_remain(&self.state.players);
        self.state.is_transitioning = fast_forward;
        self.bump();
        if fast_forward {
            self.timer.arm(self.state.epoch, Instant::now());
        }
        true
    }

    /// Fires any due auto-advance. Drivers call this between user inputs;
    /// a zero delay makes streets advance on the next poll. Returns
    /// whether any transition fired.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut now = now;
        let mut fired = false;
        // Fast-forwarded streets re-arm during next_stage; refresh the
        // clock so a zero-delay chain drains within one poll.
        while self.timer.fire(self.state.epoch, now) {
            self.next_stage();
            now = Instant::now();
            fired = true;
        }
        fired
    }

    // ---- pot award -------------------------------------------------------

    /// Awards pots to the given winners (several ids for a split pot).
    /// Each pot goes only to requested winners eligible for it, split by
    /// integer division with the remainder to the first listed winner.
    /// Pots with no eligible requested winner stay unresolved for a later
    /// call. Returns `false` when nothing could be awarded.
    pub fn award_pot(&mut self, winners: &[PlayerId]) -> bool {
        if winners.is_empty() {
            return false;
        }
        let pots = if !self.state.pots.is_empty() {
            self.state.pots.clone()
        } else {
            compute_side_pots(&self.state.players, &self.state.hand_contributions)
        };

        let pot_before = self.state.pot;
        let mut remaining = Vec::new();
        let mut awarded: Chips = 0;

        for pot in pots {
            let eligible_winners: Vec<PlayerId> = winners
                .iter()
                .copied()
                .filter(|w| pot.eligible.contains(w))
                .collect();
            if eligible_winners.is_empty() {
                remaining.push(pot);
                continue;
            }
            for (id, share) in split_award(pot.amount, &eligible_winners) {
                if let Some(p) = self.state.players.iter_mut().find(|p| p.id == id) {
                    p.chips += share;
                }
            }
            awarded += pot.amount;
        }

        if awarded == 0 {
            return false;
        }

        self.state.pot = remaining.iter().map(|p| p.amount).sum();
        let resolved = remaining.is_empty();
        self.state.pots = remaining;
        self.state.stage = Stage::Showdown;
        self.state.is_transitioning = false;
        self.supersede_advance();

        if resolved {
            // The summary records the whole hand, not just the pots this
            // call resolved; partial awards may have paid out earlier.
            let hand_total: Chips = self.state.hand_contributions.values().sum();
            self.stats.hands_played += 1;
            self.completed = Some(HandSummary {
                hand_no: self.stats.hands_played,
                pot: hand_total,
                winners: winners.to_vec(),
                stage: Stage::Showdown,
                ts: None,
            });
        }
        self.stats.biggest_pot = self.stats.biggest_pot.max(pot_before);
        self.bump();
        true
    }

    // ---- reset -----------------------------------------------------------

    /// Clears the table back to the initial empty state. Lifetime
    /// statistics survive a reset. The generation and epoch keep counting
    /// so a timer from before the reset can never fire afterwards.
    pub fn reset(&mut self) {
        let generation = self.state.generation;
        let epoch = self.state.epoch;
        self.state = GameState::new();
        self.state.generation = generation;
        self.state.epoch = epoch;
        self.supersede_advance();
        self.completed = None;
        self.bump();
    }

    fn bump(&mut self) {
        self.state.generation += 1;
    }

    /// Drops any pending advance and moves to a new timer epoch. Called
    /// exactly where the street a pending advance belongs to ends: a
    /// transition, a hand boundary, or a reset. Bookkeeping actions bump
    /// only the generation and leave a pending advance live.
    fn supersede_advance(&mut self) {
        self.state.epoch += 1;
        self.timer.cancel();
    }
}
