//! DependencyManager trait and the built-in managers.
//!
//! A dependency manager declares which jobs a job waits for (its edges) plus
//! whatever private state its readiness check needs. How edges are evaluated
//! belongs to the execution engine; this module only describes the data.

use serde::{Deserialize, Serialize};
use std::any::Any;
use std::collections::HashSet;
use std::fmt;

use super::codec::{CodecError, Format};
use crate::domain::JobType;

pub const ALWAYS_TYPE: &str = "always";
pub const ALWAYS_VERSION: u32 = 1;

pub const LOCAL_FILE_TYPE: &str = "local-file";
pub const LOCAL_FILE_VERSION: u32 = 1;

/// Polymorphic dependency manager.
///
/// Implementations are registered by name in the dependency registry and
/// constructed as zero values before their body is decoded into them.
///
/// # Example
/// ```ignore
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// struct Sometimes {
///     edges: JobEdges,
/// }
///
/// impl DependencyManager for Sometimes {
///     fn dependency_type(&self) -> JobType {
///         JobType::new("sometimes", 1)
///     }
///     // ...
/// }
/// ```
pub trait DependencyManager: Send + Sync + fmt::Debug + Any {
    fn dependency_type(&self) -> JobType;

    /// Ids of the jobs this manager depends on.
    fn edges(&self) -> Vec<String>;

    /// Add an edge. Returns `false` if it was already present.
    fn add_edge(&mut self, id: &str) -> bool;

    /// Encode the manager's private state.
    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError>;

    /// Replace the manager's private state with the decoded `body`.
    fn decode_body(&mut self, format: Format, body: &[u8]) -> Result<(), CodecError>;

    fn clone_box(&self) -> Box<dyn DependencyManager>;

    fn as_any(&self) -> &dyn Any;
}

impl dyn DependencyManager {
    pub fn downcast_ref<T: DependencyManager>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl Clone for Box<dyn DependencyManager> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Managers compare by declared type and edges; private state is not
/// observable through the trait.
impl PartialEq for dyn DependencyManager {
    fn eq(&self, other: &Self) -> bool {
        self.dependency_type() == other.dependency_type() && self.edges() == other.edges()
    }
}

/// Ordered edge list with a derived lookup index.
///
/// Only `edges` is serialized. The index is rebuilt by `rebuild_index` after
/// decoding.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobEdges {
    edges: Vec<String>,
    #[serde(skip)]
    index: HashSet<String>,
}

impl JobEdges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: &str) -> bool {
        if !self.index.insert(id.to_string()) {
            return false;
        }
        self.edges.push(id.to_string());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn rebuild_index(&mut self) {
        self.index = self.edges.iter().cloned().collect();
    }
}

impl PartialEq for JobEdges {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}

impl Eq for JobEdges {}

impl FromIterator<String> for JobEdges {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut edges = JobEdges::new();
        for id in iter {
            edges.add(&id);
        }
        edges
    }
}

/// Manager that is always ready. Edges are informational.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Always {
    edges: JobEdges,
}

impl Always {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DependencyManager for Always {
    fn dependency_type(&self) -> JobType {
        JobType::new(ALWAYS_TYPE, ALWAYS_VERSION)
    }

    fn edges(&self) -> Vec<String> {
        self.edges.as_slice().to_vec()
    }

    fn add_edge(&mut self, id: &str) -> bool {
        self.edges.add(id)
    }

    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        format.encode(self)
    }

    fn decode_body(&mut self, format: Format, body: &[u8]) -> Result<(), CodecError> {
        let mut decoded: Always = format.decode(body)?;
        decoded.edges.rebuild_index();
        *self = decoded;
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn DependencyManager> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Manager that ties a job to files on the local filesystem: the job produces
/// `targets` from `dependencies`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    pub targets: Vec<String>,
    pub dependencies: Vec<String>,
    edges: JobEdges,
}

impl LocalFile {
    pub fn new(targets: Vec<String>, dependencies: Vec<String>) -> Self {
        Self {
            targets,
            dependencies,
            edges: JobEdges::new(),
        }
    }
}

impl DependencyManager for LocalFile {
    fn dependency_type(&self) -> JobType {
        JobType::new(LOCAL_FILE_TYPE, LOCAL_FILE_VERSION)
    }

    fn edges(&self) -> Vec<String> {
        self.edges.as_slice().to_vec()
    }

    fn add_edge(&mut self, id: &str) -> bool {
        self.edges.add(id)
    }

    fn encode_body(&self, format: Format) -> Result<Vec<u8>, CodecError> {
        format.encode(self)
    }

    fn decode_body(&mut self, format: Format, body: &[u8]) -> Result<(), CodecError> {
        let mut decoded: LocalFile = format.decode(body)?;
        decoded.edges.rebuild_index();
        *self = decoded;
        Ok(())
    }

    fn clone_box(&self) -> Box<dyn DependencyManager> {
        Box::new(self.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
