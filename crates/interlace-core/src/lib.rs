//! interlace-core
//!
//! Interchange layer of a distributed job queue: converts polymorphic jobs and
//! dependency managers into versioned envelopes and back.
//!
//! # Modules
//! - **domain**: data model (JobType, JobStatus, JobTimeInfo, JobRetryInfo,
//!   envelopes, InterchangeError)
//! - **typed**: plugin seams (Job, DependencyManager, Registry, Format)
//! - **interchange**: converters and the error-truncation policy
//! - **app**: startup wiring (RegistryBuilder) and configuration

pub mod app;
pub mod domain;
pub mod interchange;
pub mod typed;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{BuildError, ConfigError, InterchangeConfig, RegistryBuilder};
pub use domain::{
    DependencyInterchange, InterchangeError, JobInterchange, JobRetryInfo, JobRetryOptions,
    JobStatus, JobTimeInfo, JobType, TypeKind,
};
pub use interchange::{
    TruncationPolicy, make_dependency_interchange, make_job_interchange,
    make_job_interchange_with, resolve_dependency, resolve_dependency_with,
};
pub use typed::{
    Always, CodecError, DependencyManager, Format, Job, JobBase, JobEdges, LocalFile, Registry,
};
