//! Errors - interchange failure taxonomy.
//!
//! Every converter returns one of these and, on failure, no instance. There is
//! no local recovery: retries and fallback formats are the caller's concern.

use std::fmt;

use super::JobType;
use crate::typed::codec::{CodecError, Format};

/// Which registry a type name was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Job,
    Dependency,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKind::Job => f.write_str("job"),
            TypeKind::Dependency => f.write_str("dependency"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterchangeError {
    #[error("could not encode {format} payload: {message}")]
    EncodeFailure { format: Format, message: String },

    #[error("could not decode {format} payload: {message}")]
    DecodeFailure { format: Format, message: String },

    #[error("{kind} type '{name}' is not registered")]
    UnregisteredType { kind: TypeKind, name: String },

    /// The registered implementation does not report the identity recorded in
    /// the envelope.
    #[error("{kind} type mismatch: registered {registered}, envelope {envelope}")]
    VersionMismatch {
        kind: TypeKind,
        registered: JobType,
        envelope: JobType,
    },
}

impl From<CodecError> for InterchangeError {
    fn from(err: CodecError) -> Self {
        match err {
            CodecError::Encode { format, message } => {
                InterchangeError::EncodeFailure { format, message }
            }
            CodecError::Decode { format, message } => {
                InterchangeError::DecodeFailure { format, message }
            }
        }
    }
}
