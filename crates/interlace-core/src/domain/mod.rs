//! Domain model: identities, status/timing/retry metadata, envelopes, errors.

pub mod envelope;
pub mod errors;
pub mod ids;
pub mod job_type;
pub mod retry;
pub mod status;
pub mod timing;

pub use self::envelope::{DependencyInterchange, JobInterchange};
pub use self::errors::{InterchangeError, TypeKind};
pub use self::ids::job_id;
pub use self::job_type::JobType;
pub use self::retry::{JobRetryInfo, JobRetryOptions};
pub use self::status::JobStatus;
pub use self::timing::JobTimeInfo;
