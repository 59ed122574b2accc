//! Dependency manager <-> `DependencyInterchange`.

use tracing::{debug, warn};

use crate::domain::{DependencyInterchange, InterchangeError, JobType, TypeKind};
use crate::typed::codec::Format;
use crate::typed::dependency::DependencyManager;
use crate::typed::registry::Registry;

/// Capture a dependency manager's declared type, edges, and private state.
pub fn make_dependency_interchange(
    format: Format,
    dep: &dyn DependencyManager,
) -> Result<DependencyInterchange, InterchangeError> {
    let dependency_type = dep.dependency_type();
    let body = dep.encode_body(format)?;

    Ok(DependencyInterchange {
        dependency_type: dependency_type.name,
        version: dependency_type.version,
        edges: dep.edges(),
        body,
    })
}

/// Resolve against the process-wide registry.
pub fn resolve_dependency(
    format: Format,
    interchange: &DependencyInterchange,
) -> Result<Box<dyn DependencyManager>, InterchangeError> {
    resolve_dependency_with(format, interchange, Registry::global())
}

pub fn resolve_dependency_with(
    format: Format,
    interchange: &DependencyInterchange,
    registry: &Registry,
) -> Result<Box<dyn DependencyManager>, InterchangeError> {
    let Some(factory) = registry.dependencies().lookup(&interchange.dependency_type) else {
        warn!(
            dependency_type = %interchange.dependency_type,
            "dependency type is not registered"
        );
        return Err(InterchangeError::UnregisteredType {
            kind: TypeKind::Dependency,
            name: interchange.dependency_type.clone(),
        });
    };

    let mut dep = factory();
    let registered = dep.dependency_type();
    if registered.name != interchange.dependency_type || registered.version != interchange.version
    {
        warn!(
            %registered,
            envelope_version = interchange.version,
            "dependency type mismatch"
        );
        return Err(InterchangeError::VersionMismatch {
            kind: TypeKind::Dependency,
            registered,
            envelope: JobType::new(interchange.dependency_type.clone(), interchange.version),
        });
    }

    dep.decode_body(format, &interchange.body)?;

    let decoded_edges = dep.edges().len();
    if decoded_edges != interchange.edges.len() {
        return Err(InterchangeError::DecodeFailure {
            format,
            message: format!(
                "decoded {decoded_edges} edges, envelope declares {}",
                interchange.edges.len()
            ),
        });
    }

    debug!(%registered, %format, edges = decoded_edges, "resolved dependency");
    Ok(dep)
}

impl DependencyInterchange {
    pub fn resolve(&self, format: Format) -> Result<Box<dyn DependencyManager>, InterchangeError> {
        resolve_dependency(format, self)
    }

    pub fn resolve_with(
        &self,
        format: Format,
        registry: &Registry,
    ) -> Result<Box<dyn DependencyManager>, InterchangeError> {
        resolve_dependency_with(format, self, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;
    use crate::typed::dependency::{ALWAYS_TYPE, Always, LocalFile};
    use rstest::rstest;

    fn dependency() -> Always {
        let dep = Always::new();
        assert_eq!(dep.dependency_type().name, ALWAYS_TYPE);
        dep
    }

    #[rstest]
    #[case::textual(Format::Textual)]
    #[case::binary_legacy(Format::BinaryLegacy)]
    #[case::binary_current(Format::BinaryCurrent)]
    fn interchange_stores_type_and_version(#[case] format: Format) {
        let dep = dependency();
        let interchange = make_dependency_interchange(format, &dep).unwrap();

        assert_eq!(interchange.dependency_type, dep.dependency_type().name);
        assert_eq!(interchange.version, dep.dependency_type().version);
        assert!(interchange.edges.is_empty());
    }

    #[rstest]
    #[case::textual(Format::Textual)]
    #[case::binary_legacy(Format::BinaryLegacy)]
    #[case::binary_current(Format::BinaryCurrent)]
    fn conversion_maintains_fidelity(#[case] format: Format) {
        let registry = testing::registry();
        let old = dependency();
        let interchange = make_dependency_interchange(format, &old).unwrap();

        let new = resolve_dependency_with(format, &interchange, &registry).unwrap();
        assert!(new.downcast_ref::<Always>().is_some());
        assert_eq!(old.dependency_type(), new.dependency_type());
        assert_eq!(old.edges().len(), new.edges().len());
    }

    #[rstest]
    #[case::textual(Format::Textual)]
    #[case::binary_legacy(Format::BinaryLegacy)]
    #[case::binary_current(Format::BinaryCurrent)]
    fn edges_are_copied(#[case] format: Format) {
        let registry = testing::registry();
        let mut dep = LocalFile::new(vec!["out".to_string()], Vec::new());
        dep.add_edge("a");
        dep.add_edge("b");

        let interchange = make_dependency_interchange(format, &dep).unwrap();
        assert_eq!(interchange.edges, vec!["a", "b"]);

        let resolved = interchange.resolve_with(format, &registry).unwrap();
        assert_eq!(resolved.edges(), dep.edges());
        assert_eq!(resolved.downcast_ref::<LocalFile>(), Some(&dep));
    }

    #[test]
    fn version_inconsistency_causes_conversion_to_error() {
        let registry = testing::registry();
        let mut interchange =
            make_dependency_interchange(Format::BinaryLegacy, &dependency()).unwrap();
        interchange.version += 100;

        let result = resolve_dependency_with(Format::BinaryLegacy, &interchange, &registry);
        assert!(matches!(
            result,
            Err(InterchangeError::VersionMismatch {
                kind: TypeKind::Dependency,
                ..
            })
        ));
    }

    #[test]
    fn name_inconsistency_causes_conversion_to_error() {
        let registry = testing::registry();
        let mut interchange =
            make_dependency_interchange(Format::BinaryLegacy, &dependency()).unwrap();
        interchange.dependency_type = "sometimes".to_string();

        let result = resolve_dependency_with(Format::BinaryLegacy, &interchange, &registry);
        assert!(matches!(
            result,
            Err(InterchangeError::UnregisteredType { ref name, .. }) if name == "sometimes"
        ));
    }

    #[test]
    fn misregistered_constructor_is_rejected() {
        let registry = testing::registry();
        registry
            .dependencies()
            .register("local-file", || Box::new(Always::new()) as Box<dyn DependencyManager>);
        let interchange =
            make_dependency_interchange(Format::Textual, &LocalFile::default()).unwrap();

        let result = interchange.resolve_with(Format::Textual, &registry);
        assert!(matches!(result, Err(InterchangeError::VersionMismatch { .. })));
    }

    #[test]
    fn edge_count_disagreement_is_a_decode_failure() {
        let registry = testing::registry();
        let mut interchange = make_dependency_interchange(Format::Textual, &dependency()).unwrap();
        interchange.edges.push("phantom".to_string());

        let result = interchange.resolve_with(Format::Textual, &registry);
        assert!(matches!(result, Err(InterchangeError::DecodeFailure { .. })));
    }

    #[rstest]
    #[case::textual(Format::Textual)]
    #[case::binary_legacy(Format::BinaryLegacy)]
    #[case::binary_current(Format::BinaryCurrent)]
    fn corrupt_body_is_a_decode_failure(#[case] format: Format) {
        let registry = testing::registry();
        let mut interchange = make_dependency_interchange(format, &dependency()).unwrap();
        interchange.body = Vec::new();

        let result = interchange.resolve_with(format, &registry);
        assert!(matches!(
            result,
            Err(InterchangeError::DecodeFailure { format: f, .. }) if f == format
        ));
    }

    #[rstest]
    #[case::textual(Format::Textual)]
    #[case::binary_legacy(Format::BinaryLegacy)]
    #[case::binary_current(Format::BinaryCurrent)]
    fn body_encode_failure_returns_no_envelope(#[case] format: Format) {
        let result = make_dependency_interchange(format, &testing::UnencodableDependency);
        assert!(matches!(
            result,
            Err(InterchangeError::EncodeFailure { format: f, .. }) if f == format
        ));
    }
}
