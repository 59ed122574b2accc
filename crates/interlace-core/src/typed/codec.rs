//! Format codec adapter.
//!
//! Every payload (job body, dependency body, and the envelopes themselves)
//! goes through `Format::encode` / `Format::decode_into`, so the converters
//! never see a format-specific API.
//!
//! # Formats
//! - `textual`: JSON via serde_json.
//! - `binary-current`: bincode `config::standard()` (varint). Trailing bytes
//!   after the value are rejected.
//! - `binary-legacy`: bincode `config::legacy()` (fixed-width integers, the
//!   bincode 1.x layout). Trailing bytes are ignored, as older producers
//!   padded their buffers.
//!
//! Fields an implementation marks `#[serde(skip)]` are not carried by any
//! format; implementations re-derive them in their `decode_body`.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wire format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    #[default]
    Textual,
    BinaryLegacy,
    BinaryCurrent,
}

/// Codec failure. Never retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("{format} encode failed: {message}")]
    Encode { format: Format, message: String },

    #[error("{format} decode failed: {message}")]
    Decode { format: Format, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format '{0}', expected one of: textual, binary-legacy, binary-current")]
pub struct ParseFormatError(String);

impl Format {
    pub const ALL: [Format; 3] = [Format::Textual, Format::BinaryLegacy, Format::BinaryCurrent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Textual => "textual",
            Format::BinaryLegacy => "binary-legacy",
            Format::BinaryCurrent => "binary-current",
        }
    }

    pub fn encode<T: Serialize + ?Sized>(self, value: &T) -> Result<Vec<u8>, CodecError> {
        let encoded = match self {
            Format::Textual => serde_json::to_vec(value).map_err(|e| e.to_string()),
            Format::BinaryLegacy => {
                bincode::serde::encode_to_vec(value, bincode::config::legacy())
                    .map_err(|e| e.to_string())
            }
            Format::BinaryCurrent => {
                bincode::serde::encode_to_vec(value, bincode::config::standard())
                    .map_err(|e| e.to_string())
            }
        };
        encoded.map_err(|message| CodecError::Encode {
            format: self,
            message,
        })
    }

    pub fn decode<T: DeserializeOwned>(self, bytes: &[u8]) -> Result<T, CodecError> {
        let decode_err = |message: String| CodecError::Decode {
            format: self,
            message,
        };
        match self {
            Format::Textual => serde_json::from_slice(bytes).map_err(|e| decode_err(e.to_string())),
            Format::BinaryLegacy => {
                let (value, _) =
                    bincode::serde::decode_from_slice(bytes, bincode::config::legacy())
                        .map_err(|e| decode_err(e.to_string()))?;
                Ok(value)
            }
            Format::BinaryCurrent => {
                let (value, read) =
                    bincode::serde::decode_from_slice(bytes, bincode::config::standard())
                        .map_err(|e| decode_err(e.to_string()))?;
                if read != bytes.len() {
                    return Err(decode_err(format!(
                        "{} trailing bytes after value",
                        bytes.len() - read
                    )));
                }
                Ok(value)
            }
        }
    }

    /// Decode `bytes` and replace `target` with the result.
    ///
    /// `target` is untouched when decoding fails.
    pub fn decode_into<T: DeserializeOwned>(
        self,
        bytes: &[u8],
        target: &mut T,
    ) -> Result<(), CodecError> {
        *target = self.decode(bytes)?;
        Ok(())
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Format::ALL
            .into_iter()
            .find(|format| format.as_str() == s)
            .ok_or_else(|| ParseFormatError(s.to_string()))
    }
}
