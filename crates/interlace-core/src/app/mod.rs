//! App - startup wiring and configuration.

pub mod builder;
pub mod config;

pub use self::builder::{BuildError, RegistryBuilder};
pub use self::config::{ConfigError, InterchangeConfig};
