//! Job identifiers.
//!
//! Job ids are plain strings on the wire. Generated ids are `{prefix}-{ulid}`
//! so that ids minted by one producer sort by creation time.

use ulid::Ulid;

/// Generate a new job id with the given prefix.
pub fn job_id(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}
