//! Side-pot computation and pot splitting.
//!
//! Side pots are rebuilt from the per-hand contribution ledger at every
//! street transition, not only at showdown, so the table can always show a
//! live breakdown of who is playing for what.

use std::collections::BTreeMap;

use crate::game::Pot;
use crate::player::{Chips, Player, PlayerId};

/// Builds the ordered pot list (main pot first) from cumulative hand
/// contributions.
///
/// The distinct contribution totals of non-folded players form the pot
/// levels, walked from lowest to highest. Every contributor who is still at
/// the table (folded players included, busted players excluded) pays into
/// each level up to their own total; only non-folded players whose total
/// reached a level are eligible to win that level's pot. Chips from folded
/// players above the highest eligible level are merged into the top pot;
/// folded overbets are never returned.
///
/// Returns a single empty pot when no eligible players exist.
pub fn compute_side_pots(
    players: &[Player],
    contributions: &BTreeMap<PlayerId, Chips>,
) -> Vec<Pot> {
    let contributed =
        |p: &Player| contributions.get(&p.id).copied().unwrap_or(0);

    // Contributors still at the table; folded ones pay in but cannot win.
    let all: Vec<(PlayerId, Chips, bool)> = players
        .iter()
        .filter(|p| p.status != crate::player::PlayerStatus::Out)
        .map(|p| (p.id, contributed(p), p.status == crate::player::PlayerStatus::Folded))
        .collect();

    let mut eligible_totals: Vec<Chips> = all
        .iter()
        .filter(|&&(_, _, folded)| !folded)
        .map(|&(_, c, _)| c)
        .collect();
    eligible_totals.sort_unstable();

    if eligible_totals.is_empty() {
        return vec![Pot {
            amount: 0,
            eligible: Vec::new(),
        }];
    }

    let mut levels = eligible_totals.clone();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::new();
    let mut processed: Chips = 0;

    for &level in &levels {
        let slice = level.saturating_sub(processed);
        if slice == 0 {
            continue;
        }

        let mut amount: Chips = 0;
        let mut eligible: Vec<PlayerId> = Vec::new();
        for &(id, total, folded) in &all {
            amount += total.saturating_sub(processed).min(slice);
            if !folded && total >= level {
                eligible.push(id);
            }
        }

        if amount > 0 {
            pots.push(Pot { amount, eligible });
        }
        processed = level;
    }

    // Folded contributions above the highest eligible level enlarge the top
    // pot without adding winners.
    let max_eligible = *eligible_totals.last().unwrap_or(&0);
    let overage: Chips = all
        .iter()
        .filter(|&&(_, total, _)| total > max_eligible)
        .map(|&(_, total, _)| total - max_eligible)
        .sum();
    if overage > 0 {
        if let Some(top) = pots.last_mut() {
            top.amount += overage;
        }
    }

    if pots.is_empty() {
        vec![Pot {
            amount: 0,
            eligible: Vec::new(),
        }]
    } else {
        pots
    }
}

/// Splits one pot among winners by integer division, giving the remainder
/// to the first winner in the given order. Deterministic: awarding 101 to
/// two winners yields 51 and 50, never a lost chip.
pub fn split_award(amount: Chips, winners: &[PlayerId]) -> Vec<(PlayerId, Chips)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as Chips;
    let share = amount / n;
    let remainder = amount % n;
    winners
        .iter()
        .enumerate()
        .map(|(i, &id)| (id, if i == 0 { share + remainder } else { share }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_is_exact() {
        let shares = split_award(101, &[7, 9]);
        assert_eq!(shares, vec![(7, 51), (9, 50)]);
        assert_eq!(shares.iter().map(|&(_, c)| c).sum::<Chips>(), 101);
    }

    #[test]
    fn split_single_winner_takes_all() {
        assert_eq!(split_award(250, &[3]), vec![(3, 250)]);
    }

    #[test]
    fn split_no_winners_is_empty() {
        assert!(split_award(100, &[]).is_empty());
    }
}
