//! Log access: the `LogSource` trait and a JSON-lines backed implementation.
//!
//! The slicer never parses raw logs itself. It reads records through
//! `LogSource`, which only promises a known record count and random access by
//! record id. `RecordLog` is the in-memory implementation used by the CLI and
//! by tests.

use std::fs;
use std::io::BufRead;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{LogRecord, RecordId};

#[derive(Debug, Error)]
pub enum LogError {
    #[error("Failed to read log at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed log record on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("Record {id} is out of range for a log of {len} records")]
    OutOfRange { id: RecordId, len: u32 },
    #[error("Log has more records than fit in a record id")]
    TooLarge,
}

/// Ordered, randomly addressable sequence of log records.
pub trait LogSource {
    /// Total number of records.
    fn len(&self) -> u32;

    /// Record at position `id` (0-based).
    fn record(&self, id: RecordId) -> Result<LogRecord, LogError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordLog {
    records: Vec<LogRecord>,
}

impl RecordLog {
    pub fn new(records: Vec<LogRecord>) -> Result<Self, LogError> {
        if u32::try_from(records.len()).is_err() {
            return Err(LogError::TooLarge);
        }
        Ok(Self { records })
    }

    /// Parse JSON lines, one record per line. Blank lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LogError> {
        let mut records = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|source| LogError::Io { path: PathBuf::from("<reader>"), source })?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let record: LogRecord = serde_json::from_str(trimmed)
                .map_err(|source| LogError::Parse { line: idx + 1, source })?;
            records.push(record);
        }
        Self::new(records)
    }

    pub fn from_jsonl_str(body: &str) -> Result<Self, LogError> {
        Self::from_reader(body.as_bytes())
    }

    /// Load a JSON-lines log from disk.
    pub fn load(path: &Path) -> Result<Self, LogError> {
        let body = fs::read_to_string(path)
            .map_err(|source| LogError::Io { path: path.to_path_buf(), source })?;
        Self::from_jsonl_str(&body)
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    /// Records paired with their ids, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (RecordId, &LogRecord)> {
        // `new` guarantees every index fits in a RecordId.
        self.records.iter().enumerate().map(|(idx, record)| (idx as RecordId, record))
    }
}

impl LogSource for RecordLog {
    fn len(&self) -> u32 {
        self.records.len() as u32
    }

    fn record(&self, id: RecordId) -> Result<LogRecord, LogError> {
        self.records
            .get(id as usize)
            .copied()
            .ok_or(LogError::OutOfRange { id, len: self.len() })
    }
}
