use std::fs;

use chiptally_engine::game::Stage;
use chiptally_engine::journal::{HandSummary, Journal};

fn summary(hand_no: u64) -> HandSummary {
    HandSummary {
        hand_no,
        pot: 150,
        winners: vec![2],
        stage: Stage::Showdown,
        ts: None,
    }
}

#[test]
fn append_writes_one_json_line_per_hand() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");

    let mut journal = Journal::open(&path).unwrap();
    journal.append(&summary(1)).unwrap();
    journal.append(&summary(2)).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);

    let first: HandSummary = serde_json::from_str(lines[0]).unwrap();
    assert_eq!(first.hand_no, 1);
    assert_eq!(first.pot, 150);
    assert_eq!(first.winners, vec![2]);
    let second: HandSummary = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(second.hand_no, 2);
}

#[test]
fn timestamp_is_injected_on_write() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");

    let mut journal = Journal::open(&path).unwrap();
    journal.append(&summary(1)).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let record: HandSummary = serde_json::from_str(contents.trim()).unwrap();
    let ts = record.ts.expect("timestamp injected");
    // RFC3339 with a trailing Z, e.g. 2026-08-23T18:04:05Z.
    assert!(ts.ends_with('Z'));
    assert!(ts.contains('T'));
}

#[test]
fn provided_timestamp_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");

    let mut s = summary(1);
    s.ts = Some("2026-01-02T03:04:05Z".to_string());
    let mut journal = Journal::open(&path).unwrap();
    journal.append(&s).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let record: HandSummary = serde_json::from_str(contents.trim()).unwrap();
    assert_eq!(record.ts.as_deref(), Some("2026-01-02T03:04:05Z"));
}

#[test]
fn reopening_appends_instead_of_truncating() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hands.jsonl");

    Journal::open(&path).unwrap().append(&summary(1)).unwrap();
    Journal::open(&path).unwrap().append(&summary(2)).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents.lines().count(), 2);
}

#[test]
fn open_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/deeper/hands.jsonl");

    let mut journal = Journal::open(&path).unwrap();
    journal.append(&summary(1)).unwrap();
    assert!(path.exists());
}
