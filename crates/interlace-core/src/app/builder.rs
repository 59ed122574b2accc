//! RegistryBuilder - startup wiring for job and dependency types.
//!
//! # Fail-fast
//! - `expect_jobs()` / `expect_dependencies()` declare the types this process
//!   must be able to resolve.
//! - `build()` / `install()` check "expected ⊆ registered" and return
//!   `BuildError::MissingTypes` otherwise, so a missing registration shows up
//!   at startup instead of as `UnregisteredType` on the first envelope.

use tracing::info;

use crate::domain::TypeKind;
use crate::typed::{DependencyManager, Job, Registry};

/// Collects registrations, validates them, then yields a `Registry` or
/// installs into the process-wide one.
///
/// # Example
/// ```ignore
/// RegistryBuilder::new()
///     .builtin_dependencies()
///     .job::<GreetJob>()
///     .expect_jobs(&["greet"])
///     .install()?;
/// ```
pub struct RegistryBuilder {
    registry: Registry,
    expected: Vec<(TypeKind, String)>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing types: {0:?}. These types were expected but not registered.")]
    MissingTypes(Vec<String>),
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: Registry::new(),
            expected: Vec::new(),
        }
    }

    /// Register `J` under the name its zero value reports.
    pub fn job<J: Job + Default>(self) -> Self {
        self.registry.register_job::<J>();
        self
    }

    pub fn job_factory<F>(self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn Job> + Send + Sync + 'static,
    {
        self.registry.jobs().register(name, factory);
        self
    }

    /// Register `D` under the name its zero value reports.
    pub fn dependency<D: DependencyManager + Default>(self) -> Self {
        self.registry.register_dependency::<D>();
        self
    }

    pub fn dependency_factory<F>(self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn DependencyManager> + Send + Sync + 'static,
    {
        self.registry.dependencies().register(name, factory);
        self
    }

    /// Register `always` and `local-file`.
    pub fn builtin_dependencies(self) -> Self {
        self.registry.register_builtin_dependencies();
        self
    }

    pub fn expect_jobs(mut self, names: &[&str]) -> Self {
        self.expected
            .extend(names.iter().map(|name| (TypeKind::Job, name.to_string())));
        self
    }

    pub fn expect_dependencies(mut self, names: &[&str]) -> Self {
        self.expected
            .extend(names.iter().map(|name| (TypeKind::Dependency, name.to_string())));
        self
    }

    fn validate(&self) -> Result<(), BuildError> {
        let missing: Vec<String> = self
            .expected
            .iter()
            .filter(|(kind, name)| match kind {
                TypeKind::Job => !self.registry.jobs().contains(name),
                TypeKind::Dependency => !self.registry.dependencies().contains(name),
            })
            .map(|(kind, name)| format!("{kind}:{name}"))
            .collect();
        if !missing.is_empty() {
            return Err(BuildError::MissingTypes(missing));
        }
        Ok(())
    }

    /// Validate and return a standalone registry.
    pub fn build(self) -> Result<Registry, BuildError> {
        self.validate()?;
        Ok(self.registry)
    }

    /// Validate and copy every registration into `Registry::global()`.
    pub fn install(self) -> Result<&'static Registry, BuildError> {
        self.validate()?;
        let global = Registry::global();
        global.extend_from(&self.registry);
        info!(
            jobs = ?self.registry.jobs().registered_types(),
            dependencies = ?self.registry.dependencies().registered_types(),
            "installed interchange types"
        );
        Ok(global)
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
