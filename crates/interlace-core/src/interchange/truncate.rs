//! Error-truncation policy applied when a job is converted to an envelope.

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_MAX_ERRORS: usize = 100;
pub const DEFAULT_MAX_ERROR_BYTES: usize = 1024 * 1024;

/// Bounds on the error list carried by an envelope.
///
/// A list within both bounds is kept as is. Otherwise the oldest errors are
/// kept up to half of each bound, the newest errors fill the rest, and the
/// middle is dropped. Order is preserved. A message that does not fit the
/// remaining byte budget ends the scan on its side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TruncationPolicy {
    pub max_errors: usize,
    pub max_bytes: usize,
}

impl Default for TruncationPolicy {
    fn default() -> Self {
        Self {
            max_errors: DEFAULT_MAX_ERRORS,
            max_bytes: DEFAULT_MAX_ERROR_BYTES,
        }
    }
}

impl TruncationPolicy {
    pub fn fits(&self, errors: &[String]) -> bool {
        errors.len() <= self.max_errors
            && errors.iter().map(String::len).sum::<usize>() <= self.max_bytes
    }

    pub fn apply(&self, mut errors: Vec<String>) -> Vec<String> {
        if self.fits(&errors) {
            return errors;
        }

        let total = errors.len();
        let mut used = 0;

        let mut head_end = 0;
        while head_end < total && head_end < self.max_errors / 2 {
            let len = errors[head_end].len();
            if used + len > self.max_bytes / 2 {
                break;
            }
            used += len;
            head_end += 1;
        }

        let mut tail_start = total;
        while tail_start > head_end && head_end + (total - tail_start) < self.max_errors {
            let len = errors[tail_start - 1].len();
            if used + len > self.max_bytes {
                break;
            }
            used += len;
            tail_start -= 1;
        }

        errors.drain(head_end..tail_start);
        debug!(
            kept = errors.len(),
            dropped = total - errors.len(),
            bytes = used,
            "truncated job errors"
        );
        errors
    }
}
