//! Job timing metadata.
//!
//! The converters copy it as a whole value. `merge` is for callers that apply
//! partial updates to a live job.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobTimeInfo {
    pub created: Option<DateTime<Utc>>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,

    /// The job must not be dispatched before this time.
    pub wait_until: Option<DateTime<Utc>>,

    /// The job should not be dispatched after this time.
    pub dispatch_by: Option<DateTime<Utc>>,

    /// Maximum runtime once started.
    pub max_time: Option<Duration>,
}

impl JobTimeInfo {
    /// Merge the fields that are set in `other` into `self`.
    ///
    /// Unset fields in `other` leave the current values untouched.
    pub fn merge(&mut self, other: JobTimeInfo) {
        if other.created.is_some() {
            self.created = other.created;
        }
        if other.start.is_some() {
            self.start = other.start;
        }
        if other.end.is_some() {
            self.end = other.end;
        }
        if other.wait_until.is_some() {
            self.wait_until = other.wait_until;
        }
        if other.dispatch_by.is_some() {
            self.dispatch_by = other.dispatch_by;
        }
        if other.max_time.is_some() {
            self.max_time = other.max_time;
        }
    }
}
