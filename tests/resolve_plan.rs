#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for dependency resolution against the built-in
//! registry: the worked examples from the tool's original feature table.

use std::collections::BTreeSet;

use ptc_cli::error::ResolveError;
use ptc_cli::registry::FeatureRegistry;
use ptc_cli::resolver::{build_graph, resolve};

fn ids(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|id| (*id).to_string()).collect()
}

fn level(ids: &[&str]) -> BTreeSet<String> {
    ids.iter().map(|id| (*id).to_string()).collect()
}

/// `windows` pulls in both build tooling and the Visual Studio generator;
/// `base` and `visual-studio` share level 0 despite having no shared
/// ancestry, simply because neither has dependencies.
#[test]
fn windows_package_resolves_in_three_levels() {
    let registry = FeatureRegistry::builtin();
    let plan = resolve(&ids(&["windows"]), &registry).unwrap();

    assert_eq!(
        plan.levels(),
        &[
            level(&["base", "visual-studio"]),
            level(&["windows-build-script"]),
            level(&["windows"]),
        ]
    );
}

/// The expanded graph records the dependency lists exactly as declared.
#[test]
fn windows_graph_matches_registry_declarations() {
    let registry = FeatureRegistry::builtin();
    let graph = build_graph(&ids(&["windows"]), &registry).unwrap();

    assert_eq!(graph.len(), 4);
    assert_eq!(
        graph["windows"],
        ids(&["windows-build-script", "visual-studio"])
    );
    assert_eq!(graph["windows-build-script"], ids(&["base"]));
    assert!(graph["visual-studio"].is_empty());
    assert!(graph["base"].is_empty());
}

/// Requesting independent features keeps their closures side by side.
#[test]
fn independent_features_resolve_together() {
    let registry = FeatureRegistry::builtin();
    let plan = resolve(&ids(&["linux", "sonar", "coverage"]), &registry).unwrap();

    assert_eq!(
        plan.levels(),
        &[
            level(&["base", "coverage", "sonar"]),
            level(&["linux-build-script"]),
            level(&["linux"]),
        ]
    );
}

/// Unknown ids are reported together, and nothing else is resolved.
#[test]
fn unknown_ids_are_reported_exactly() {
    let registry = FeatureRegistry::builtin();
    let err = resolve(&ids(&["nope", "linux", "nada"]), &registry).unwrap_err();
    assert_eq!(err, ResolveError::UnknownFeatures(ids(&["nope", "nada"])));
}

/// Resolution is deterministic across repeated runs.
#[test]
fn resolution_is_deterministic() {
    let registry = FeatureRegistry::builtin();
    let requested = ids(&["windows", "linux", "doxygen"]);
    let first = resolve(&requested, &registry).unwrap();
    let second = resolve(&requested, &registry).unwrap();
    assert_eq!(first, second);
}
