//! Feature dependency resolution: graph construction and level-order
//! topological sorting.
//!
//! The resolver is the pure core of the tool. It consumes an injected
//! [`FeatureRegistry`](crate::registry::FeatureRegistry) and a requested
//! feature list, and produces an [`InstallPlan`]: a sequence of levels in
//! which every dependency of a feature sits in an earlier level. It
//! performs no I/O, holds no global state, and never terminates the
//! process; errors are returned as [`ResolveError`] values for the CLI
//! layer to act on.

mod graph;
mod levels;

pub use graph::{DependencyGraph, build_graph};
pub use levels::sort_topologically;

use std::collections::BTreeSet;

use crate::error::ResolveError;
use crate::registry::FeatureRegistry;

/// Level-ordered installation plan.
///
/// Levels are ordered by increasing dependency depth; the features within a
/// level are unordered, since none of them can depend on each other. The
/// plan is computed once per invocation, handed to the installer, and then
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    levels: Vec<BTreeSet<String>>,
}

impl InstallPlan {
    /// The levels in installation order.
    #[must_use]
    pub fn levels(&self) -> &[BTreeSet<String>] {
        &self.levels
    }

    /// Total number of features across all levels.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.levels.iter().map(BTreeSet::len).sum()
    }

    /// Whether the plan contains no features at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Iterate every feature id in a valid installation order
    /// (level by level).
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.levels
            .iter()
            .flat_map(|level| level.iter().map(String::as_str))
    }
}

/// Resolve `requested` against `registry` into an installation plan.
///
/// Equivalent to [`build_graph`] followed by [`sort_topologically`].
///
/// # Examples
///
/// ```
/// use ptc_cli::registry::FeatureRegistry;
/// use ptc_cli::resolver::resolve;
///
/// let registry = FeatureRegistry::builtin();
/// let plan = resolve(&["windows".to_string()], &registry)?;
///
/// let order: Vec<&str> = plan.features().collect();
/// assert_eq!(plan.levels().len(), 3);
/// assert!(order.contains(&"base"));
/// assert_eq!(order.last(), Some(&"windows"));
/// # Ok::<(), ptc_cli::error::ResolveError>(())
/// ```
///
/// # Errors
///
/// Returns [`ResolveError::UnknownFeatures`] for undefined ids and
/// [`ResolveError::CycleDetected`] for cyclic registries; either way no
/// plan is produced and nothing is installed.
pub fn resolve(
    requested: &[String],
    registry: &FeatureRegistry,
) -> Result<InstallPlan, ResolveError> {
    let graph = build_graph(requested, registry)?;
    let levels = sort_topologically(&graph)?;
    Ok(InstallPlan { levels })
}
