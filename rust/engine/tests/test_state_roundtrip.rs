use std::time::{Duration, Instant};

use chiptally_engine::engine::HandEngine;
use chiptally_engine::game::{GameState, LifetimeStats, Stage};
use chiptally_engine::player::Chips;

fn engine_with(stacks: &[Chips]) -> HandEngine {
    let mut e = HandEngine::new(Duration::ZERO);
    for (i, &s) in stacks.iter().enumerate() {
        e.add_player(&format!("p{i}"), s, None);
    }
    e
}

#[test]
fn mid_hand_state_survives_a_round_trip() {
    let mut e = engine_with(&[100, 100, 100]);
    e.start_game(Some(5), Some(10));
    e.place_bet(30);
    e.fold();

    let json = serde_json::to_string(e.state()).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(&restored, e.state());
}

#[test]
fn stats_survive_a_round_trip() {
    let stats = LifetimeStats {
        hands_played: 42,
        biggest_pot: 1_337,
    };
    let json = serde_json::to_string(&stats).unwrap();
    let restored: LifetimeStats = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, stats);
}

#[test]
fn enums_serialize_as_lowercase_tags() {
    let mut e = engine_with(&[10, 100]);
    e.start_game(Some(5), Some(10));
    e.go_all_in(); // short dealer shoves the rest

    let json = serde_json::to_string(e.state()).unwrap();
    assert!(json.contains("\"stage\":\"preflop\""));
    assert!(json.contains("\"all-in\""));
    assert!(json.contains("\"active\""));
}

#[test]
fn resumed_engine_plays_on_identically() {
    let mut live = engine_with(&[100, 100, 100]);
    live.start_game(Some(5), Some(10));
    live.place_bet(10);

    let json = serde_json::to_string(live.state()).unwrap();
    let snapshot: GameState = serde_json::from_str(&json).unwrap();
    let mut resumed = HandEngine::resume(snapshot, live.stats().clone(), Duration::ZERO);

    // Both engines finish the round the same way.
    for e in [&mut live, &mut resumed] {
        assert!(e.place_bet(5));
        assert!(e.check());
        assert!(e.poll(Instant::now()));
        assert_eq!(e.state().stage(), Stage::Flop);
    }
    assert_eq!(resumed.state(), live.state());
}

#[test]
fn resume_keeps_prior_stats() {
    let stats = LifetimeStats {
        hands_played: 7,
        biggest_pot: 900,
    };
    let e = HandEngine::resume(GameState::new(), stats, Duration::ZERO);
    assert_eq!(e.stats().hands_played, 7);
    assert_eq!(e.stats().biggest_pot, 900);
}

#[test]
fn generation_and_epoch_travel_with_the_state() {
    let mut e = engine_with(&[100, 100]);
    e.start_game(Some(5), Some(10));
    let gen = e.state().generation();
    let epoch = e.state().epoch();
    assert!(gen > 0);
    assert!(epoch > 0);

    let json = serde_json::to_string(e.state()).unwrap();
    let restored: GameState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.generation(), gen);
    assert_eq!(restored.epoch(), epoch);
}
