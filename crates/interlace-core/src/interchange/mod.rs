//! Converters between live jobs / dependency managers and their envelopes.

pub mod dependency;
pub mod job;
pub mod truncate;

pub use self::dependency::{
    make_dependency_interchange, resolve_dependency, resolve_dependency_with,
};
pub use self::job::{make_job_interchange, make_job_interchange_with};
pub use self::truncate::TruncationPolicy;
