//! Envelopes - the serializable stand-ins for jobs and dependency managers.
//!
//! Field names are the wire/storage contract. Envelopes are built for one
//! transmission or storage event and discarded after resolution. Building and
//! resolving them lives in `crate::interchange`.

use serde::{Deserialize, Serialize};

use super::{JobRetryInfo, JobStatus, JobTimeInfo};
use crate::typed::codec::{CodecError, Format};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyInterchange {
    #[serde(rename = "type")]
    pub dependency_type: String,
    pub version: u32,
    pub edges: Vec<String>,

    /// Format-specific encoding of the manager's private fields.
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobInterchange {
    /// Job id. Unique per job instance, independent of `job_type`.
    pub name: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub version: u32,
    pub status: JobStatus,
    pub time_info: JobTimeInfo,
    pub retry_info: JobRetryInfo,
    pub dependency: DependencyInterchange,
    pub scopes: Vec<String>,
    pub enqueue_scopes: Vec<String>,
    pub enqueue_all_scopes: bool,

    /// Format-specific encoding of the job's private fields.
    pub body: Vec<u8>,
}

impl DependencyInterchange {
    /// Encode the envelope itself for storage or transport.
    pub fn to_bytes(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        format.encode(self)
    }

    pub fn from_bytes(format: Format, bytes: &[u8]) -> Result<Self, CodecError> {
        format.decode(bytes)
    }
}

impl JobInterchange {
    /// Encode the envelope itself for storage or transport.
    pub fn to_bytes(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        format.encode(self)
    }

    pub fn from_bytes(format: Format, bytes: &[u8]) -> Result<Self, CodecError> {
        format.decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dependency() -> DependencyInterchange {
        DependencyInterchange {
            dependency_type: "always".to_string(),
            version: 1,
            edges: vec!["upstream".to_string()],
            body: vec![1, 2, 3],
        }
    }

    #[test]
    fn textual_envelope_uses_contract_field_names() {
        let bytes = dependency().to_bytes(Format::Textual).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["type"], "always");
        assert_eq!(value["version"], 1);
        assert_eq!(value["edges"][0], "upstream");
        assert!(value.get("body").is_some());
    }

    #[test]
    fn job_envelope_survives_binary_storage() {
        let envelope = JobInterchange {
            name: "job-1".to_string(),
            job_type: "test".to_string(),
            version: 1,
            status: JobStatus::default(),
            time_info: JobTimeInfo::default(),
            retry_info: JobRetryInfo::default(),
            dependency: dependency(),
            scopes: vec!["foo".to_string()],
            enqueue_scopes: Vec::new(),
            enqueue_all_scopes: true,
            body: b"{}".to_vec(),
        };

        for format in Format::ALL {
            let bytes = envelope.to_bytes(format).unwrap();
            assert_eq!(JobInterchange::from_bytes(format, &bytes).unwrap(), envelope);
        }
    }
}
