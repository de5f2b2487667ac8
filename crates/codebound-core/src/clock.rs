//! Wall-clock abstraction so timestamps in logs and saves are testable.

use chrono::{DateTime, Utc};

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// Current time formatted the way log entries display it (`HH:MM:SS`).
    fn log_timestamp(&self) -> String {
        self.now().format(crate::log::TIMESTAMP_FORMAT).to_string()
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
