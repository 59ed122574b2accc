//! Interchange configuration: wire format and truncation bounds.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::interchange::TruncationPolicy;
use crate::typed::Format;

pub const FORMAT_VAR: &str = "INTERLACE_FORMAT";
pub const MAX_ERRORS_VAR: &str = "INTERLACE_MAX_ERRORS";
pub const MAX_ERROR_BYTES_VAR: &str = "INTERLACE_MAX_ERROR_BYTES";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterchangeConfig {
    /// Format used for job and dependency bodies and for envelope bytes.
    pub format: Format,
    pub truncation: TruncationPolicy,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}

impl InterchangeConfig {
    /// Load configuration from environment variables.
    ///
    /// Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(format) = parse_var(&lookup, FORMAT_VAR)? {
            config.format = format;
        }
        if let Some(max_errors) = parse_var(&lookup, MAX_ERRORS_VAR)? {
            config.truncation.max_errors = max_errors;
        }
        if let Some(max_bytes) = parse_var(&lookup, MAX_ERROR_BYTES_VAR)? {
            config.truncation.max_bytes = max_bytes;
        }
        Ok(config)
    }
}

fn parse_var<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        return Ok(None);
    };
    value
        .trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::InvalidValue {
            key,
            reason: e.to_string(),
            value,
        })
}
