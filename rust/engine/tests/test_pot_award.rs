use std::time::{Duration, Instant};

use chiptally_engine::engine::HandEngine;
use chiptally_engine::game::Stage;
use chiptally_engine::player::Chips;

fn engine_with(stacks: &[Chips]) -> HandEngine {
    let mut e = HandEngine::new(Duration::ZERO);
    for (i, &s) in stacks.iter().enumerate() {
        e.add_player(&format!("p{i}"), s, None);
    }
    e
}

/// Everyone shoves preflop; streets fast-forward to showdown.
fn all_in_showdown(stacks: &[Chips]) -> HandEngine {
    let mut e = engine_with(stacks);
    e.start_game(Some(5), Some(10));
    for _ in 0..stacks.len() {
        e.go_all_in();
    }
    e.poll(Instant::now());
    assert_eq!(e.state().stage(), Stage::Showdown);
    e
}

#[test]
fn single_winner_takes_the_whole_pot() {
    let mut e = all_in_showdown(&[100, 100]);
    assert_eq!(e.state().pot(), 200);

    assert!(e.award_pot(&[2]));
    let s = e.state();
    assert_eq!(s.pot(), 0);
    assert!(s.pots().is_empty());
    assert_eq!(s.player(2).unwrap().chips, 200);
    assert_eq!(s.player(1).unwrap().chips, 0);

    assert_eq!(e.stats().hands_played, 1);
    assert_eq!(e.stats().biggest_pot, 200);
    let summary = e.take_completed_hand().expect("hand resolved");
    assert_eq!(summary.pot, 200);
    assert_eq!(summary.winners, vec![2]);
}

#[test]
fn split_pot_gives_the_remainder_to_the_first_listed_winner() {
    let mut e = engine_with(&[100, 100, 100]);
    e.start_game(Some(11), Some(11));
    e.place_bet(11); // first to act calls
    e.fold(); // small blind folds, pot is 33
    e.check(); // big blind checks the option
    e.poll(Instant::now());
    assert_eq!(e.state().pot(), 33);

    // Chopped between ids 3 and 1; the odd chip goes to 3.
    assert!(e.award_pot(&[3, 1]));
    assert_eq!(e.state().player(3).unwrap().chips, 89 + 17);
    assert_eq!(e.state().player(1).unwrap().chips, 89 + 16);
    assert_eq!(e.state().pot(), 0);
}

#[test]
fn side_pots_resolve_per_winner_eligibility() {
    // Short stack shoves 50; the covers shove 100.
    let mut e = all_in_showdown(&[50, 100, 100]);
    let s = e.state();
    assert_eq!(s.pot(), 250);
    assert_eq!(s.pots().len(), 2);

    // The short stack wins the main pot; the side pot stays unresolved.
    assert!(e.award_pot(&[1]));
    let s = e.state();
    assert_eq!(s.player(1).unwrap().chips, 150);
    assert_eq!(s.pot(), 100);
    assert_eq!(s.pots().len(), 1);
    assert_eq!(s.pots()[0].eligible, vec![2, 3]);
    assert_eq!(e.stats().hands_played, 0);
    assert!(e.take_completed_hand().is_none());

    // Second call settles the side pot and closes out the hand.
    assert!(e.award_pot(&[2]));
    let s = e.state();
    assert_eq!(s.player(2).unwrap().chips, 100);
    assert_eq!(s.pot(), 0);
    assert!(s.pots().is_empty());
    assert_eq!(e.stats().hands_played, 1);
    assert_eq!(e.stats().biggest_pot, 250);
    // The summary covers the whole hand, not just the final call's pot.
    let summary = e.take_completed_hand().expect("hand resolved");
    assert_eq!(summary.pot, 250);
}

#[test]
fn ineligible_winner_changes_nothing() {
    let mut e = all_in_showdown(&[50, 100, 100]);
    let before = e.state().clone();

    // Id 99 never sat down; nothing can be awarded.
    assert!(!e.award_pot(&[99]));
    assert_eq!(e.state(), &before);
    assert_eq!(e.stats().hands_played, 0);
}

#[test]
fn folded_player_cannot_be_awarded() {
    let mut e = engine_with(&[100, 100, 100]);
    e.start_game(Some(5), Some(10));
    e.place_bet(10);
    e.fold(); // small blind (id 2) is out of the hand
    e.check();
    e.poll(Instant::now());

    let before = e.state().clone();
    assert!(!e.award_pot(&[2]));
    assert_eq!(e.state(), &before);
}

#[test]
fn empty_winner_list_is_rejected() {
    let mut e = all_in_showdown(&[100, 100]);
    assert!(!e.award_pot(&[]));
    assert_eq!(e.state().pot(), 200);
}

#[test]
fn biggest_pot_only_grows() {
    let mut e = all_in_showdown(&[100, 100]);
    e.award_pot(&[1]);
    assert_eq!(e.stats().biggest_pot, 200);

    // A smaller follow-up hand leaves the record untouched.
    e.update_player_chips(1, 50); // rebuy
    e.next_hand();
    e.fold();
    assert_eq!(e.stats().hands_played, 2);
    assert_eq!(e.stats().biggest_pot, 200);
}
