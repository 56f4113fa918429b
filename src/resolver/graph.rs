//! Dependency graph construction from a feature registry.

use std::collections::BTreeMap;

use crate::error::ResolveError;
use crate::registry::FeatureRegistry;

/// Mapping of feature id to the ids it directly depends on.
///
/// Every key and every dependency value is guaranteed to exist in the
/// registry the graph was built from.
pub type DependencyGraph = BTreeMap<String, Vec<String>>;

/// Expand `requested` into its full transitive dependency graph.
///
/// Each reachable feature appears exactly once as a key, mapped to its
/// declared dependency list (empty for features without one). Dependency
/// lists are derived solely from the registry, so reaching the same id via
/// multiple paths is harmless: the expansion is idempotent and re-visits
/// are skipped.
///
/// The requested ids are validated up front and each feature's dependency
/// list is validated before it is expanded; all unresolvable ids of the
/// failing list are reported together. Any failure aborts construction
/// without returning a partial graph, since topological ordering over one
/// would be meaningless.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use ptc_cli::registry::{Feature, FeatureRegistry};
/// use ptc_cli::resolver::build_graph;
///
/// let mut features = BTreeMap::new();
/// features.insert("a".to_string(), Feature::default());
/// features.insert(
///     "b".to_string(),
///     Feature { dependencies: vec!["a".to_string()], content: vec![] },
/// );
/// let registry = FeatureRegistry::from_features(features);
///
/// let graph = build_graph(&["b".to_string()], &registry)?;
/// assert_eq!(graph.get("b"), Some(&vec!["a".to_string()]));
/// assert_eq!(graph.get("a"), Some(&vec![]));
/// # Ok::<(), ptc_cli::error::ResolveError>(())
/// ```
///
/// # Errors
///
/// Returns [`ResolveError::UnknownFeatures`] when a requested or
/// depended-upon id is not defined, and [`ResolveError::CycleDetected`]
/// when a feature transitively depends on itself.
pub fn build_graph(
    requested: &[String],
    registry: &FeatureRegistry,
) -> Result<DependencyGraph, ResolveError> {
    registry.validate(requested)?;

    let mut graph = DependencyGraph::new();
    let mut path = Vec::new();
    for id in requested {
        visit(id, registry, &mut graph, &mut path)?;
    }
    Ok(graph)
}

/// Record `id` and, recursively, everything it depends on.
///
/// `path` tracks the ids currently being expanded; re-entering one of them
/// means the registry contains a dependency cycle, which is reported with
/// the offending path instead of recursing forever. Recursion depth is
/// thereby bounded by the registry size.
fn visit(
    id: &str,
    registry: &FeatureRegistry,
    graph: &mut DependencyGraph,
    path: &mut Vec<String>,
) -> Result<(), ResolveError> {
    if graph.contains_key(id) {
        return Ok(());
    }
    if let Some(start) = path.iter().position(|p| p == id) {
        let mut cycle: Vec<String> = path.iter().skip(start).cloned().collect();
        cycle.push(id.to_string());
        return Err(ResolveError::CycleDetected(cycle));
    }

    let deps = registry.dependencies_of(id).to_vec();
    registry.validate(&deps)?;

    path.push(id.to_string());
    for dep in &deps {
        visit(dep, registry, graph, path)?;
    }
    path.pop();

    graph.insert(id.to_string(), deps);
    Ok(())
}
