//! Job trait - the capability set every job implementation exposes.
//!
//! The converters only go through these getters and setters; they never
//! inspect an implementation's private fields. Shared metadata lives in
//! `JobBase`, which implementations embed and hand out via `base()` /
//! `base_mut()`. Every accessor has a default built on the base, and an
//! implementation may override any of them.
//!
//! # Example
//! ```ignore
//! #[derive(Debug, Clone, Default, Serialize, Deserialize)]
//! struct GreetPayload {
//!     recipient: String,
//! }
//!
//! #[derive(Debug, Clone)]
//! struct GreetJob {
//!     base: JobBase,
//!     payload: GreetPayload,
//! }
//!
//! impl Job for GreetJob {
//!     fn base(&self) -> &JobBase { &self.base }
//!     fn base_mut(&mut self) -> &mut JobBase { &mut self.base }
//!
//!     fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError> {
//!         format.encode(&self.payload)
//!     }
//!
//!     fn decode_body(&mut self, format: Format, body: &[u8]) -> Result<(), CodecError> {
//!         format.decode_into(body, &mut self.payload)
//!     }
//!
//!     fn as_any(&self) -> &dyn Any { self }
//! }
//! ```

use std::any::Any;
use std::fmt;

use super::codec::{CodecError, Format};
use super::dependency::{Always, DependencyManager};
use crate::domain::{JobRetryInfo, JobRetryOptions, JobStatus, JobTimeInfo, JobType};

/// Metadata shared by every job.
#[derive(Debug, Clone)]
pub struct JobBase {
    pub id: String,
    pub job_type: JobType,
    pub status: JobStatus,
    pub time_info: JobTimeInfo,
    pub retry_info: JobRetryInfo,
    pub dependency: Box<dyn DependencyManager>,

    /// Mutual-exclusion resources held while the job runs.
    pub scopes: Vec<String>,

    /// Subset of `scopes` also held while the job is enqueued.
    pub enqueue_scopes: Vec<String>,

    /// Hold every scope while enqueued, not just `enqueue_scopes`.
    pub enqueue_all_scopes: bool,
}

impl JobBase {
    /// Zero-value metadata for `job_type` with an `Always` dependency.
    pub fn new(job_type: JobType) -> Self {
        Self {
            id: String::new(),
            job_type,
            status: JobStatus::default(),
            time_info: JobTimeInfo::default(),
            retry_info: JobRetryInfo::default(),
            dependency: Box::new(Always::new()),
            scopes: Vec::new(),
            enqueue_scopes: Vec::new(),
            enqueue_all_scopes: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }
}

impl PartialEq for JobBase {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.job_type == other.job_type
            && self.status == other.status
            && self.time_info == other.time_info
            && self.retry_info == other.retry_info
            && *self.dependency == *other.dependency
            && self.scopes == other.scopes
            && self.enqueue_scopes == other.enqueue_scopes
            && self.enqueue_all_scopes == other.enqueue_all_scopes
    }
}

pub trait Job: Send + Sync + fmt::Debug + Any {
    fn base(&self) -> &JobBase;

    fn base_mut(&mut self) -> &mut JobBase;

    /// Encode the job's private payload.
    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError>;

    /// Replace the job's private payload with the decoded `body`.
    fn decode_body(&mut self, format: Format, body: &[u8]) -> Result<(), CodecError>;

    fn as_any(&self) -> &dyn Any;

    fn id(&self) -> &str {
        &self.base().id
    }

    fn set_id(&mut self, id: String) {
        self.base_mut().id = id;
    }

    fn job_type(&self) -> JobType {
        self.base().job_type.clone()
    }

    fn status(&self) -> JobStatus {
        self.base().status.clone()
    }

    fn set_status(&mut self, status: JobStatus) {
        self.base_mut().status = status;
    }

    fn add_error(&mut self, err: &dyn fmt::Display) {
        self.base_mut().status.add_error(err);
    }

    fn time_info(&self) -> JobTimeInfo {
        self.base().time_info.clone()
    }

    fn set_time_info(&mut self, info: JobTimeInfo) {
        self.base_mut().time_info = info;
    }

    /// Merge the fields set in `info`; unset fields keep their values.
    fn update_time_info(&mut self, info: JobTimeInfo) {
        self.base_mut().time_info.merge(info);
    }

    fn retry_info(&self) -> JobRetryInfo {
        self.base().retry_info.clone()
    }

    fn set_retry_info(&mut self, info: JobRetryInfo) {
        self.base_mut().retry_info = info;
    }

    /// Apply the fields set in `opts`; unset fields keep their values.
    fn update_retry_info(&mut self, opts: JobRetryOptions) {
        self.base_mut().retry_info.update(opts);
    }

    fn dependency(&self) -> &dyn DependencyManager {
        self.base().dependency.as_ref()
    }

    fn set_dependency(&mut self, dependency: Box<dyn DependencyManager>) {
        self.base_mut().dependency = dependency;
    }

    fn scopes(&self) -> &[String] {
        &self.base().scopes
    }

    fn set_scopes(&mut self, scopes: Vec<String>) {
        self.base_mut().scopes = scopes;
    }

    fn enqueue_scopes(&self) -> &[String] {
        &self.base().enqueue_scopes
    }

    fn set_enqueue_scopes(&mut self, scopes: Vec<String>) {
        self.base_mut().enqueue_scopes = scopes;
    }

    fn enqueue_all_scopes(&self) -> bool {
        self.base().enqueue_all_scopes
    }

    fn set_enqueue_all_scopes(&mut self, all: bool) {
        self.base_mut().enqueue_all_scopes = all;
    }
}

impl dyn Job {
    pub fn downcast_ref<T: Job>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}
