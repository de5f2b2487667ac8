//! Append-only event log shown to the player.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;

/// `strftime` pattern for entry timestamps.
pub const TIMESTAMP_FORMAT: &str = "%H:%M:%S";

/// Number of entries returned by state queries.
pub const DISPLAY_LIMIT: usize = 20;

/// Category of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    /// The result of a dispatched player action.
    Action,
    /// A level gained through the progression manager.
    LevelUp,
    /// A quest reached its target.
    Quest,
}

/// A single timestamped line in the event log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Wall-clock time of the entry, formatted `HH:MM:SS`.
    pub timestamp: String,
    /// Human-readable message.
    pub message: String,
    /// Entry category.
    #[serde(rename = "type")]
    pub kind: LogKind,
}

impl LogEntry {
    /// Builds an entry stamped with the given instant.
    pub fn at(now: DateTime<Utc>, kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            timestamp: now.format(TIMESTAMP_FORMAT).to_string(),
            message: message.into(),
            kind,
        }
    }
}

/// Time-ordered record of game events. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// Appends an entry stamped with the clock's current time.
    pub fn record(&mut self, clock: &dyn Clock, kind: LogKind, message: impl Into<String>) {
        self.append(LogEntry {
            timestamp: clock.log_timestamp(),
            message: message.into(),
            kind,
        });
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The last `limit` entries, oldest first.
    #[must_use]
    pub fn recent(&self, limit: usize) -> &[LogEntry] {
        let start = self.entries.len().saturating_sub(limit);
        &self.entries[start..]
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
