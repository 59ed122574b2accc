//! Job status as reported by the execution engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured job state.
///
/// The execution engine owns the meaning of the counters and flags; the
/// interchange layer copies them verbatim. Only `errors` is size-managed
/// (see `TruncationPolicy`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStatus {
    pub id: String,
    pub owner: String,
    pub completed: bool,
    pub in_progress: bool,
    pub modification_time: Option<DateTime<Utc>>,
    pub modification_count: u64,

    /// Number of errors ever attached, including any dropped by truncation.
    pub error_count: u64,

    /// Error messages, oldest first.
    pub errors: Vec<String>,
}

impl JobStatus {
    /// Attach an error message.
    pub fn add_error(&mut self, err: impl fmt::Display) {
        self.errors.push(err.to_string());
        self.error_count += 1;
    }
}
