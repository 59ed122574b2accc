//! TypeRegistry - name -> zero-value constructor.
//!
//! One registry holds job constructors, another holds dependency-manager
//! constructors; `Registry` bundles the pair. A process-wide instance is
//! available via `Registry::global()` and is populated by an explicit wiring
//! step (see `app::RegistryBuilder`); nothing registers itself.
//!
//! Lookups take a read lock and clone the constructor `Arc`, so a resolve never
//! holds the lock while constructing or decoding. Registration takes the write
//! lock; readers see either the old or the new entry, never a partial one.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use super::dependency::{Always, DependencyManager, LocalFile};
use super::job::Job;

/// Constructor producing a fresh zero-value instance.
pub type Factory<T> = Arc<dyn Fn() -> Box<T> + Send + Sync>;

pub type JobFactory = Factory<dyn Job>;
pub type DependencyFactory = Factory<dyn DependencyManager>;

pub struct TypeRegistry<T: ?Sized> {
    factories: RwLock<HashMap<String, Factory<T>>>,
}

impl<T: ?Sized> TypeRegistry<T> {
    pub fn new() -> Self {
        Self {
            factories: RwLock::new(HashMap::new()),
        }
    }

    /// Store the constructor for `name`, replacing any previous one.
    ///
    /// Returns the replaced constructor, if any.
    pub fn register<F>(&self, name: impl Into<String>, factory: F) -> Option<Factory<T>>
    where
        F: Fn() -> Box<T> + Send + Sync + 'static,
    {
        self.register_factory(name, Arc::new(factory))
    }

    pub fn register_factory(
        &self,
        name: impl Into<String>,
        factory: Factory<T>,
    ) -> Option<Factory<T>> {
        self.factories.write().insert(name.into(), factory)
    }

    pub fn lookup(&self, name: &str) -> Option<Factory<T>> {
        self.factories.read().get(name).cloned()
    }

    /// Look up `name` and construct a fresh instance.
    pub fn construct(&self, name: &str) -> Option<Box<T>> {
        self.lookup(name).map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.read().contains_key(name)
    }

    /// Registered names, sorted.
    pub fn registered_types(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Copy every entry of `other` into `self` (entries in `other` win).
    pub fn extend_from(&self, other: &TypeRegistry<T>) {
        let entries: Vec<(String, Factory<T>)> = other
            .factories
            .read()
            .iter()
            .map(|(name, factory)| (name.clone(), factory.clone()))
            .collect();
        self.factories.write().extend(entries);
    }

    pub fn len(&self) -> usize {
        self.factories.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.read().is_empty()
    }
}

impl<T: ?Sized> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Job and dependency-manager registries.
#[derive(Default)]
pub struct Registry {
    jobs: TypeRegistry<dyn Job>,
    dependencies: TypeRegistry<dyn DependencyManager>,
}

static GLOBAL: OnceLock<Registry> = OnceLock::new();

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry. Starts empty.
    pub fn global() -> &'static Registry {
        GLOBAL.get_or_init(Registry::new)
    }

    pub fn jobs(&self) -> &TypeRegistry<dyn Job> {
        &self.jobs
    }

    pub fn dependencies(&self) -> &TypeRegistry<dyn DependencyManager> {
        &self.dependencies
    }

    /// Register `J` under the name its zero value reports.
    pub fn register_job<J: Job + Default>(&self) {
        let name = J::default().job_type().name;
        self.jobs
            .register(name, || Box::new(J::default()) as Box<dyn Job>);
    }

    /// Register `D` under the name its zero value reports.
    pub fn register_dependency<D: DependencyManager + Default>(&self) {
        let name = D::default().dependency_type().name;
        self.dependencies
            .register(name, || Box::new(D::default()) as Box<dyn DependencyManager>);
    }

    /// Register `Always` and `LocalFile`.
    pub fn register_builtin_dependencies(&self) {
        self.register_dependency::<Always>();
        self.register_dependency::<LocalFile>();
    }

    /// Copy every entry of `other` into `self`.
    pub fn extend_from(&self, other: &Registry) {
        self.jobs.extend_from(&other.jobs);
        self.dependencies.extend_from(&other.dependencies);
    }
}

/// Register a job constructor in the process-wide registry.
pub fn register_job_type<F>(name: impl Into<String>, factory: F)
where
    F: Fn() -> Box<dyn Job> + Send + Sync + 'static,
{
    Registry::global().jobs().register(name, factory);
}

pub fn get_job_factory(name: &str) -> Option<JobFactory> {
    Registry::global().jobs().lookup(name)
}

/// Register a dependency-manager constructor in the process-wide registry.
pub fn register_dependency_type<F>(name: impl Into<String>, factory: F)
where
    F: Fn() -> Box<dyn DependencyManager> + Send + Sync + 'static,
{
    Registry::global().dependencies().register(name, factory);
}

pub fn get_dependency_factory(name: &str) -> Option<DependencyFactory> {
    Registry::global().dependencies().lookup(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::JobType;
    use crate::testing::TestJob;
    use std::thread;

    #[test]
    fn register_and_lookup() {
        let registry = Registry::new();
        registry.register_job::<TestJob>();

        let job = registry.jobs().construct("test").unwrap();
        assert_eq!(job.job_type(), JobType::new("test", 1));
        assert!(registry.jobs().lookup("missing").is_none());
    }

    #[test]
    fn last_registration_wins() {
        let registry = Registry::new();
        registry.register_job::<TestJob>();
        let previous = registry.jobs().register("test", || {
            Box::new(TestJob::with_type(JobType::new("test", 2))) as Box<dyn Job>
        });

        assert!(previous.is_some());
        assert_eq!(registry.jobs().len(), 1);
        let job = registry.jobs().construct("test").unwrap();
        assert_eq!(job.job_type().version, 2);
    }

    #[test]
    fn each_construct_returns_a_fresh_instance() {
        let registry = Registry::new();
        registry.register_job::<TestJob>();

        let mut first = registry.jobs().construct("test").unwrap();
        first.set_id("mutated".to_string());
        let second = registry.jobs().construct("test").unwrap();

        assert_eq!(second.id(), "");
    }

    #[test]
    fn builtin_dependencies_are_explicit() {
        let registry = Registry::new();
        assert!(registry.dependencies().is_empty());

        registry.register_builtin_dependencies();
        assert_eq!(
            registry.dependencies().registered_types(),
            vec!["always".to_string(), "local-file".to_string()]
        );
    }

    #[test]
    fn extend_copies_entries() {
        let source = Registry::new();
        source.register_job::<TestJob>();
        source.register_builtin_dependencies();

        let target = Registry::new();
        target.extend_from(&source);

        assert!(target.jobs().contains("test"));
        assert!(target.dependencies().contains("always"));
    }

    #[test]
    fn lookups_stay_consistent_during_registration() {
        let registry = Arc::new(Registry::new());
        registry.register_job::<TestJob>();

        let writer = {
            let registry = registry.clone();
            thread::spawn(move || {
                for version in 1..200 {
                    registry.jobs().register("test", move || {
                        Box::new(TestJob::with_type(JobType::new("test", version))) as Box<dyn Job>
                    });
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let registry = registry.clone();
                thread::spawn(move || {
                    for _ in 0..500 {
                        let job = registry.jobs().construct("test").unwrap();
                        assert_eq!(job.job_type().name, "test");
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(registry.jobs().construct("test").unwrap().job_type().version, 199);
    }

    #[test]
    fn global_helpers_share_one_registry() {
        register_dependency_type("global-helpers-always", || {
            Box::new(Always::new()) as Box<dyn DependencyManager>
        });

        let factory = get_dependency_factory("global-helpers-always").unwrap();
        assert_eq!(factory().dependency_type().name, "always");
        assert!(Registry::global().dependencies().contains("global-helpers-always"));
        assert!(get_job_factory("global-helpers-missing").is_none());
    }
}
