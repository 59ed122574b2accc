//! JobType - identity of a job or dependency-manager implementation.
//!
//! The `(name, version)` pair is what an envelope records and what the
//! registry-supplied instance must report back at resolve time.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Immutable identity of an implementation.
///
/// Two `JobType`s are equal iff both `name` and `version` are equal; there is
/// no notion of compatible versions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobType {
    pub name: String,
    pub version: u32,
}

impl JobType {
    pub fn new(name: impl Into<String>, version: u32) -> Self {
        Self {
            name: name.into(),
            version,
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@v{}", self.name, self.version)
    }
}
