//! Feature registry: named, installable units and their prerequisites.
//!
//! A *feature* bundles an optional list of dependency ids with an ordered
//! list of content items (paths to copy, actions to invoke). The registry is
//! an immutable id → feature mapping, fully known before resolution starts,
//! and is always passed into the resolver as an explicit parameter so the
//! resolver stays pure and testable.
//!
//! The registry for a template root comes from [`load`]: a `features.toml`
//! next to the template files when present, the [`FeatureRegistry::builtin`]
//! table otherwise.

mod loader;

pub use loader::{REGISTRY_FILE, load, load_file};

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{RegistryError, ResolveError};

/// A named action a feature can invoke during installation.
///
/// Actions are the non-path half of [`ContentItem`]: zero-argument
/// side-effecting operations resolved by kebab-case name in `features.toml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    /// Prepare the project for SonarQube analysis.
    SonarSetup,
}

impl ActionKind {
    /// Kebab-case name, as written in `features.toml` and in log output.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SonarSetup => "sonar-setup",
        }
    }
}

/// A single item of feature content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentItem {
    /// A file or directory name, copied from the template root into the
    /// destination.
    Path(String),
    /// A side-effecting operation invoked with no arguments.
    Action(ActionKind),
}

/// A named, installable unit: optional prerequisites plus content items.
///
/// A feature with dependencies and no content acts as a *meta-feature*
/// (package), existing purely to bundle other features.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Feature {
    /// Ids of features that must be installed before this one.
    pub dependencies: Vec<String>,
    /// Ordered content items applied when the feature is installed.
    pub content: Vec<ContentItem>,
}

/// Immutable mapping of feature id to [`Feature`].
///
/// Backed by a [`BTreeMap`] so listings and graph construction iterate in a
/// stable order.
#[derive(Debug, Clone, Default)]
pub struct FeatureRegistry {
    features: BTreeMap<String, Feature>,
}

impl FeatureRegistry {
    /// Build a registry from an id → feature mapping.
    #[must_use]
    pub const fn from_features(features: BTreeMap<String, Feature>) -> Self {
        Self { features }
    }

    /// Whether `id` is defined.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.features.contains_key(id)
    }

    /// Look up a feature by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    /// All defined feature ids, in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Number of defined features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the registry defines no features at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Declared dependencies of `id`; empty for undefined ids and for
    /// features without a dependency list.
    #[must_use]
    pub fn dependencies_of(&self, id: &str) -> &[String] {
        self.features
            .get(id)
            .map_or(&[], |f| f.dependencies.as_slice())
    }

    /// Collect every id in `ids` that is not defined in the registry.
    ///
    /// Checks the whole input rather than short-circuiting on the first
    /// failure, so callers can report all unknown ids together. The result
    /// preserves first-occurrence order and contains no duplicates.
    #[must_use]
    pub fn unknown(&self, ids: &[String]) -> Vec<String> {
        let mut missing = Vec::new();
        for id in ids {
            if !self.contains(id) && !missing.contains(id) {
                missing.push(id.clone());
            }
        }
        missing
    }

    /// Check that every id in `ids` is defined.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnknownFeatures`] carrying every absent id,
    /// so the caller can report them together.
    pub fn validate(&self, ids: &[String]) -> Result<(), ResolveError> {
        let unknown = self.unknown(ids);
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(ResolveError::UnknownFeatures(unknown))
        }
    }

    /// Verify that every declared dependency resolves to a defined feature.
    ///
    /// Run after loading an externally authored registry, where a dangling
    /// dependency is an authoring mistake worth rejecting up front.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DanglingDependency`] naming the first
    /// feature whose dependency list references an undefined id.
    pub fn validate_closed(&self) -> Result<(), RegistryError> {
        for (id, feature) in &self.features {
            for dep in &feature.dependencies {
                if !self.contains(dep) {
                    return Err(RegistryError::DanglingDependency {
                        feature: id.clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// The built-in feature table shipped with the tool.
    ///
    /// Used whenever the template root carries no `features.toml` of its
    /// own. `linux` and `windows` are meta-features bundling the per-OS
    /// build scripts.
    #[must_use]
    pub fn builtin() -> Self {
        let mut features = BTreeMap::new();

        features.insert(
            "base".to_string(),
            Feature {
                dependencies: vec![],
                content: paths(&["CMakeLists.txt", "LICENSE", "README.md"]),
            },
        );
        features.insert(
            "doxygen".to_string(),
            Feature {
                dependencies: vec![],
                content: paths(&["doxygen"]),
            },
        );
        features.insert(
            "linux-build-script".to_string(),
            Feature {
                dependencies: vec!["base".to_string()],
                content: paths(&["build.sh", "configure.sh"]),
            },
        );
        features.insert(
            "windows-build-script".to_string(),
            Feature {
                dependencies: vec!["base".to_string()],
                content: paths(&["build.bat", "setup-environment.bat"]),
            },
        );
        features.insert(
            "visual-studio".to_string(),
            Feature {
                dependencies: vec![],
                content: paths(&["create_VS_solution.bat.bat"]),
            },
        );
        features.insert(
            "sonar".to_string(),
            Feature {
                dependencies: vec![],
                content: vec![
                    ContentItem::Path("sonar-project.properties".to_string()),
                    ContentItem::Action(ActionKind::SonarSetup),
                ],
            },
        );
        features.insert(
            "coverage".to_string(),
            Feature {
                dependencies: vec![],
                content: paths(&["coverage.ignore", "cmake/modules/CodeCoverage.cmake"]),
            },
        );

        // packages
        features.insert(
            "linux".to_string(),
            Feature {
                dependencies: vec!["linux-build-script".to_string()],
                content: vec![],
            },
        );
        features.insert(
            "windows".to_string(),
            Feature {
                dependencies: vec![
                    "windows-build-script".to_string(),
                    "visual-studio".to_string(),
                ],
                content: vec![],
            },
        );

        Self { features }
    }
}

fn paths(names: &[&str]) -> Vec<ContentItem> {
    names
        .iter()
        .map(|n| ContentItem::Path((*n).to_string()))
        .collect()
}
