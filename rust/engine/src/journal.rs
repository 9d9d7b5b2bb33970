//! Hand journal: one JSON line per completed hand.
//!
//! The engine reports a [`HandSummary`] whenever a hand fully resolves
//! (single-survivor fold or final pot award); the driver may append it here
//! for a durable table history. The journal is an optional collaborator;
//! the engine runs fine without one.

use std::fs::{create_dir_all, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::JournalError;
use crate::game::Stage;
use crate::player::{Chips, PlayerId};

/// Outcome record for one completed hand.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandSummary {
    /// Sequence number; matches the lifetime hands-played counter
    pub hand_no: u64,
    /// Total chips awarded this hand
    pub pot: Chips,
    /// Winner ids as reported by the dealer (or the lone survivor)
    pub winners: Vec<PlayerId>,
    /// Stage the hand ended at
    pub stage: Stage,
    /// RFC3339 timestamp, injected on write when absent
    #[serde(default)]
    pub ts: Option<String>,
}

pub struct Journal {
    writer: BufWriter<File>,
}

impl Journal {
    /// Opens the journal for appending, creating the file and any missing
    /// parent directories.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, JournalError> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }

    /// Appends one summary as a JSON line, flushing immediately so a crash
    /// cannot lose a completed hand.
    pub fn append(&mut self, summary: &HandSummary) -> Result<(), JournalError> {
        let mut record = summary.clone();
        if record.ts.is_none() {
            record.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&record)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
