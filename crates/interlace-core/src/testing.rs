//! Test fixtures shared across modules.

use serde::{Deserialize, Serialize};
use std::any::Any;

use crate::domain::JobType;
use crate::typed::codec::{CodecError, Format};
use crate::typed::dependency::DependencyManager;
use crate::typed::job::{Job, JobBase};
use crate::typed::registry::Registry;

pub(crate) const TEST_JOB_TYPE: &str = "test";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct TestPayload {
    pub content: String,
    pub should_fail: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct TestJob {
    pub base: JobBase,
    pub payload: TestPayload,
}

impl TestJob {
    pub fn new(id: &str) -> Self {
        let mut job = Self::default();
        job.base.id = id.to_string();
        job
    }

    pub fn with_type(job_type: JobType) -> Self {
        Self {
            base: JobBase::new(job_type),
            payload: TestPayload::default(),
        }
    }
}

impl Default for TestJob {
    fn default() -> Self {
        Self::with_type(JobType::new(TEST_JOB_TYPE, 1))
    }
}

impl Job for TestJob {
    fn base(&self) -> &JobBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut JobBase {
        &mut self.base
    }

    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        format.encode(&self.payload)
    }

    fn decode_body(&mut self, format: Format, body: &[u8]) -> Result<(), CodecError> {
        format.decode_into(body, &mut self.payload)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

fn refuse(format: Format) -> CodecError {
    CodecError::Encode {
        format,
        message: "payload refused".to_string(),
    }
}

/// Job whose body never encodes.
#[derive(Debug, Clone)]
pub(crate) struct UnencodableJob {
    pub base: JobBase,
}

impl Default for UnencodableJob {
    fn default() -> Self {
        Self {
            base: JobBase::new(JobType::new("unencodable", 1)),
        }
    }
}

impl Job for UnencodableJob {
    fn base(&self) -> &JobBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut JobBase {
        &mut self.base
    }

    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        Err(refuse(format))
    }

    fn decode_body(&mut self, _format: Format, _body: &[u8]) -> Result<(), CodecError> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Dependency manager whose body never encodes.
#[derive(Debug, Clone, Default)]
pub(crate) struct UnencodableDependency;

impl DependencyManager for UnencodableDependency {
    fn dependency_type(&self) -> JobType {
        JobType::new("unencodable", 1)
    }

    fn edges(&self) -> Vec<String> {
        Vec::new()
    }

    fn add_edge(&mut self, _id: &str) -> bool {
        false
    }

    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        Err(refuse(format))
    }

    fn decode_body(&mut self, _format: Format, _body: &[u8]) -> Result<(), CodecError> {
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn DependencyManager> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A registry holding `TestJob` and the built-in dependency managers.
pub(crate) fn registry() -> Registry {
    let registry = Registry::new();
    registry.register_job::<TestJob>();
    registry.register_builtin_dependencies();
    registry
}
