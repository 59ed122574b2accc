//! Retry metadata and its all-optional projection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry state of a job.
///
/// The execution engine decides what to do with these values; the interchange
/// layer only carries them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRetryInfo {
    pub retryable: bool,
    pub needs_retry: bool,

    /// 0-indexed attempt currently running (or last run).
    pub current_attempt: u32,
    pub max_attempts: u32,

    /// How long after the previous attempt a retry may still be dispatched.
    pub dispatch_by: Option<Duration>,

    /// Delay before a retry may be dispatched.
    pub wait_until: Option<Duration>,

    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// Partial update for `JobRetryInfo`. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobRetryOptions {
    pub retryable: Option<bool>,
    pub needs_retry: Option<bool>,
    pub current_attempt: Option<u32>,
    pub max_attempts: Option<u32>,
    pub dispatch_by: Option<Duration>,
    pub wait_until: Option<Duration>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl JobRetryInfo {
    /// Project the current values into an update that reproduces them.
    pub fn options(&self) -> JobRetryOptions {
        JobRetryOptions {
            retryable: Some(self.retryable),
            needs_retry: Some(self.needs_retry),
            current_attempt: Some(self.current_attempt),
            max_attempts: Some(self.max_attempts),
            dispatch_by: self.dispatch_by,
            wait_until: self.wait_until,
            start: self.start,
            end: self.end,
        }
    }

    /// Apply the fields set in `opts`.
    pub fn update(&mut self, opts: JobRetryOptions) {
        if let Some(retryable) = opts.retryable {
            self.retryable = retryable;
        }
        if let Some(needs_retry) = opts.needs_retry {
            self.needs_retry = needs_retry;
        }
        if let Some(attempt) = opts.current_attempt {
            self.current_attempt = attempt;
        }
        if let Some(max) = opts.max_attempts {
            self.max_attempts = max;
        }
        if opts.dispatch_by.is_some() {
            self.dispatch_by = opts.dispatch_by;
        }
        if opts.wait_until.is_some() {
            self.wait_until = opts.wait_until;
        }
        if opts.start.is_some() {
            self.start = opts.start;
        }
        if opts.end.is_some() {
            self.end = opts.end;
        }
    }
}
