//! # chiptally-engine: Chip-Tracking Engine Core
//!
//! A deterministic state machine for tracking chip movement in a live,
//! in-person Texas Hold'em game: seating, blinds, betting rounds, all-ins,
//! side-pot formation, and pot awarding. The engine never deals cards and
//! never ranks hands. The human dealer decides the winner; the engine
//! keeps turn order and money honest.
//!
//! ## Core Modules
//!
//! - [`player`] - Player state, statuses, and seat constants
//! - [`game`] - The authoritative `GameState` container and stage machine
//! - [`rules`] - Turn-order scanning and betting-round closure predicates
//! - [`pot`] - Side-pot computation and deterministic pot splitting
//! - [`engine`] - The `HandEngine` action API (one atomic transition per call)
//! - [`timer`] - Generation-keyed delayed street advancement
//! - [`journal`] - JSONL record of completed hands
//! - [`errors`] - Error types for the journal
//!
//! ## Quick Start
//!
//! ```rust
//! use chiptally_engine::engine::HandEngine;
//! use chiptally_engine::game::Stage;
//! use std::time::Duration;
//!
//! let mut engine = HandEngine::new(Duration::ZERO);
//! engine.add_player("Ana", 1_000, None);
//! engine.add_player("Bo", 1_000, None);
//! engine.add_player("Cy", 1_000, None);
//!
//! engine.start_game(Some(5), Some(10));
//! assert_eq!(engine.state().stage(), Stage::Preflop);
//! assert_eq!(engine.state().pot(), 15); // both blinds posted
//! ```
//!
//! ## Silent No-op Policy
//!
//! Illegal actions (checking while a call is owed, removing a player
//! mid-hand, betting with nobody seated) leave the state untouched and
//! return `false`. The engine serves a single trusted operator, the
//! dealer, so bad input is ignored rather than raised.
//!
//! ## Persistence Contract
//!
//! `GameState` and `LifetimeStats` serialize in full with serde;
//! deserializing a snapshot reproduces an identical state. The driver is
//! expected to persist after every transition and resume via
//! [`engine::HandEngine::resume`].

pub mod engine;
pub mod errors;
pub mod game;
pub mod journal;
pub mod player;
pub mod pot;
pub mod rules;
pub mod timer;
