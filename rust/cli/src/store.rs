//! SQLite-backed persistence for the table state and lifetime statistics.
//!
//! The store is a plain key-value table holding serde_json documents. The
//! table session saves after every applied action, so killing the process
//! mid-session loses at most the action currently being typed.

use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

use chiptally_engine::game::{GameState, LifetimeStats};

use crate::error::CliError;

const KEY_STATE: &str = "game_state";
const KEY_STATS: &str = "lifetime_stats";

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens (or creates) the database at `path` and ensures the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CliError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )?;
        Ok(Self { conn })
    }

    pub fn load_state(&self) -> Result<Option<GameState>, CliError> {
        match self.get(KEY_STATE)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save_state(&self, state: &GameState) -> Result<(), CliError> {
        self.put(KEY_STATE, &serde_json::to_string(state)?)
    }

    pub fn load_stats(&self) -> Result<Option<LifetimeStats>, CliError> {
        match self.get(KEY_STATS)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub fn save_stats(&self, stats: &LifetimeStats) -> Result<(), CliError> {
        self.put(KEY_STATS, &serde_json::to_string(stats)?)
    }

    /// Deletes the saved game state. Lifetime statistics are kept.
    pub fn clear_state(&self) -> Result<(), CliError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![KEY_STATE])?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, CliError> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), CliError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }
}
