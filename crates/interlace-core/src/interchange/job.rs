//! Job <-> `JobInterchange`.
//!
//! Resolve order matters: the registry miss is checked before the version,
//! the job body is decoded before the nested dependency is resolved, and the
//! shared metadata is installed last. Any failure returns no job.

use tracing::{debug, warn};

use super::dependency::{make_dependency_interchange, resolve_dependency_with};
use super::truncate::TruncationPolicy;
use crate::domain::{InterchangeError, JobInterchange, JobType, TypeKind};
use crate::typed::codec::Format;
use crate::typed::job::Job;
use crate::typed::registry::Registry;

/// Convert `job` to an envelope using the default truncation policy.
pub fn make_job_interchange(
    job: &dyn Job,
    format: Format,
) -> Result<JobInterchange, InterchangeError> {
    make_job_interchange_with(job, format, &TruncationPolicy::default())
}

pub fn make_job_interchange_with(
    job: &dyn Job,
    format: Format,
    policy: &TruncationPolicy,
) -> Result<JobInterchange, InterchangeError> {
    let job_type = job.job_type();

    let mut status = job.status();
    status.errors = policy.apply(status.errors);

    let dependency = make_dependency_interchange(format, job.dependency())?;
    let body = job.encode_body(format)?;

    debug!(
        job = %job.id(),
        %job_type,
        %format,
        body_len = body.len(),
        "built job interchange"
    );

    Ok(JobInterchange {
        name: job.id().to_string(),
        job_type: job_type.name,
        version: job_type.version,
        status,
        time_info: job.time_info(),
        retry_info: job.retry_info(),
        dependency,
        scopes: job.scopes().to_vec(),
        enqueue_scopes: job.enqueue_scopes().to_vec(),
        enqueue_all_scopes: job.enqueue_all_scopes(),
        body,
    })
}

impl JobInterchange {
    /// Reconstruct the job using the process-wide registry.
    pub fn resolve(&self, format: Format) -> Result<Box<dyn Job>, InterchangeError> {
        self.resolve_with(format, Registry::global())
    }

    pub fn resolve_with(
        &self,
        format: Format,
        registry: &Registry,
    ) -> Result<Box<dyn Job>, InterchangeError> {
        let Some(factory) = registry.jobs().lookup(&self.job_type) else {
            warn!(job = %self.name, job_type = %self.job_type, "job type is not registered");
            return Err(InterchangeError::UnregisteredType {
                kind: TypeKind::Job,
                name: self.job_type.clone(),
            });
        };

        let mut job = factory();
        let registered = job.job_type();
        if registered.name != self.job_type || registered.version != self.version {
            warn!(
                job = %self.name,
                %registered,
                envelope_version = self.version,
                "job type mismatch"
            );
            return Err(InterchangeError::VersionMismatch {
                kind: TypeKind::Job,
                registered,
                envelope: JobType::new(self.job_type.clone(), self.version),
            });
        }

        job.decode_body(format, &self.body)?;
        let dependency = resolve_dependency_with(format, &self.dependency, registry)?;

        job.set_id(self.name.clone());
        job.set_dependency(dependency);
        job.set_status(self.status.clone());
        job.set_time_info(self.time_info.clone());
        job.set_retry_info(self.retry_info.clone());
        job.set_scopes(self.scopes.clone());
        job.set_enqueue_scopes(self.enqueue_scopes.clone());
        job.set_enqueue_all_scopes(self.enqueue_all_scopes);

        debug!(job = %self.name, %registered, %format, "resolved job");
        Ok(job)
    }
}
