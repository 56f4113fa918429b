#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the `--list-features` command and the shape of the
//! built-in registry it exposes.

mod common;

use ptc_cli::commands::list;
use ptc_cli::registry::FeatureRegistry;

use common::TemplateRepoBuilder;

// ---------------------------------------------------------------------------
// Snapshot: built-in feature listing
// ---------------------------------------------------------------------------

/// Snapshot of the built-in listing in its printed order.
///
/// This test serves as a regression guard: any addition, removal, or rename
/// of a built-in feature will cause it to fail, prompting a deliberate
/// snapshot update.
#[test]
fn builtin_feature_listing() {
    let registry = FeatureRegistry::builtin();
    insta::assert_snapshot!(list::render(&registry).join("\n"), @r"
    Features:
    - base
    - coverage
    - doxygen
    - linux
    - linux-build-script
    - sonar
    - visual-studio
    - windows
    - windows-build-script
    ");
}

// ---------------------------------------------------------------------------
// Structural invariants
// ---------------------------------------------------------------------------

/// The built-in registry must contain exactly the expected number of
/// features.
#[test]
fn builtin_feature_count() {
    assert_eq!(FeatureRegistry::builtin().len(), 9);
}

/// Listing output is sorted and duplicate-free by construction.
#[test]
fn listing_is_sorted_and_unique() {
    let registry = FeatureRegistry::builtin();
    let ids: Vec<&str> = registry.ids().collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(ids, sorted);
}

/// Every dependency of every built-in feature is itself listed.
#[test]
fn builtin_dependencies_are_all_listed() {
    let registry = FeatureRegistry::builtin();
    for id in registry.ids() {
        for dep in registry.dependencies_of(id) {
            assert!(
                registry.contains(dep),
                "feature '{id}' depends on unlisted '{dep}'"
            );
        }
    }
}

// ---------------------------------------------------------------------------
// Registry file override
// ---------------------------------------------------------------------------

/// A template's own `features.toml` replaces the built-in table in the
/// listing.
#[test]
fn listing_prefers_template_registry() {
    let repo = TemplateRepoBuilder::new()
        .with_registry("[custom]\ncontent = [\"file.txt\"]\n")
        .build();
    let registry = ptc_cli::registry::load(repo.root_path()).unwrap();
    assert_eq!(
        list::render(&registry),
        vec!["Features:".to_string(), "- custom".to_string()]
    );
}
