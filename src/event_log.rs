//! JSON-lines event log.
//!
//! When `MATRIS_LOG_PATH` is set, every [`GameEvent`] is appended to that
//! file as one JSON object per line:
//!
//! ```text
//! {"seq":1,"episode_id":0,"event":{"type":"CellsChanged"}}
//! {"seq":2,"episode_id":0,"event":{"type":"ScoreChanged","score":100,"rows_cleared":1,"level":1}}
//! ```

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::types::GameEvent;

pub const LOG_PATH_ENV: &str = "MATRIS_LOG_PATH";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventRecord {
    pub seq: u64,
    pub episode_id: u32,
    pub event: GameEvent,
}

/// Appends event records to a writer, one JSON object per line.
pub struct EventLog<W: Write> {
    out: W,
    seq: u64,
    buf: Vec<u8>,
}

impl EventLog<BufWriter<File>> {
    /// Open (or create) `path` in append mode.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("opening event log {}", path.display()))?;
        Ok(Self::new(BufWriter::new(file)))
    }

    /// Open the file named by `MATRIS_LOG_PATH`, if set and non-empty.
    pub fn from_env() -> Result<Option<Self>> {
        match log_path_from(std::env::var(LOG_PATH_ENV).ok().as_deref()) {
            Some(path) => Self::open(path).map(Some),
            None => Ok(None),
        }
    }
}

impl<W: Write> EventLog<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            seq: 0,
            buf: Vec::with_capacity(256),
        }
    }

    /// Number of records written so far
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn record(&mut self, episode_id: u32, event: GameEvent) -> Result<()> {
        self.seq += 1;
        let record = EventRecord {
            seq: self.seq,
            episode_id,
            event,
        };

        self.buf.clear();
        serde_json::to_writer(&mut self.buf, &record)?;
        self.buf.push(b'\n');
        self.out.write_all(&self.buf)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Trimmed, non-empty path value.
fn log_path_from(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
