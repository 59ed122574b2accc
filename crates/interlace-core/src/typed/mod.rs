//! Typed - plugin seams for job and dependency-manager implementations.
//!
//! # Layers
//! - **Traits**: `Job`, `DependencyManager` - the capability sets the
//!   converters rely on.
//! - **Registry**: `TypeRegistry` / `Registry` - name -> zero-value
//!   constructor, shared across threads.
//! - **Codec**: `Format` - one encode/decode surface over every wire format.

pub mod codec;
pub mod dependency;
pub mod job;
pub mod registry;

pub use self::codec::{CodecError, Format, ParseFormatError};
pub use self::dependency::{Always, DependencyManager, JobEdges, LocalFile};
pub use self::job::{Job, JobBase};
pub use self::registry::{
    DependencyFactory, Factory, JobFactory, Registry, TypeRegistry, get_dependency_factory,
    get_job_factory, register_dependency_type, register_job_type,
};
