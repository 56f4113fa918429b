//! Level-order topological sorting of a dependency graph.

use std::collections::{BTreeMap, BTreeSet};

use super::graph::DependencyGraph;
use crate::error::ResolveError;

/// Group every feature in `graph` into levels by dependency depth.
///
/// A feature's level is `0` when it has no dependencies, otherwise one more
/// than the deepest of its direct dependencies. For every edge
/// `f depends on d` this yields `level(d) < level(f)`, so installing the
/// levels in order always installs dependencies before dependents. Levels
/// are contiguous from `0`: a feature at level `k > 0` always has a
/// dependency at exactly `k - 1`.
///
/// Within a level no ordering is guaranteed or required: same-level
/// features cannot depend on one another, or their levels would differ.
/// Level assignment is a pure function of the graph, so repeated sorts of
/// the same graph always agree.
///
/// A dependency id that appears only as a value, never as a key, is treated
/// as having no dependencies (level `0`) rather than failing the lookup:
/// leaf features added to a graph purely as dependency targets are still
/// placed.
///
/// # Errors
///
/// Returns [`ResolveError::CycleDetected`] when the graph is cyclic. Graphs
/// produced by [`build_graph`](super::build_graph) are always acyclic; the
/// check protects hand-constructed input.
pub fn sort_topologically(
    graph: &DependencyGraph,
) -> Result<Vec<BTreeSet<String>>, ResolveError> {
    let mut level_by_id: BTreeMap<&str, usize> = BTreeMap::new();

    for id in graph.keys() {
        walk(id, graph, &mut level_by_id, &mut Vec::new())?;
    }

    let depth = level_by_id.values().max().map_or(0, |deepest| deepest + 1);
    let mut levels = vec![BTreeSet::new(); depth];
    for (id, level) in level_by_id {
        if let Some(group) = levels.get_mut(level) {
            group.insert(id.to_string());
        }
    }
    Ok(levels)
}

/// Memoized depth-first level computation.
///
/// Each id is computed at most once; `path` tracks the ids currently being
/// walked so cyclic input fails fast instead of recursing without bound.
fn walk<'graph>(
    id: &'graph str,
    graph: &'graph DependencyGraph,
    level_by_id: &mut BTreeMap<&'graph str, usize>,
    path: &mut Vec<String>,
) -> Result<usize, ResolveError> {
    if let Some(&level) = level_by_id.get(id) {
        return Ok(level);
    }
    if let Some(start) = path.iter().position(|p| p == id) {
        let mut cycle: Vec<String> = path.iter().skip(start).cloned().collect();
        cycle.push(id.to_string());
        return Err(ResolveError::CycleDetected(cycle));
    }

    let level = match graph.get(id) {
        // Referenced only as a dependency target: a leaf with no entry of
        // its own, so nothing can sit below it.
        None => 0,
        Some(deps) if deps.is_empty() => 0,
        Some(deps) => {
            path.push(id.to_string());
            let mut deepest = 0;
            for dep in deps {
                deepest = deepest.max(walk(dep, graph, level_by_id, path)?);
            }
            path.pop();
            deepest + 1
        }
    };

    level_by_id.insert(id, level);
    Ok(level)
}
