//! TOML registry parsing (`features.toml` at the template root).

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{ContentItem, Feature, FeatureRegistry};
use crate::error::RegistryError;

/// Registry file name probed for at the template root.
pub const REGISTRY_FILE: &str = "features.toml";

/// Raw per-feature table as authored in `features.toml`.
///
/// `content` and `actions` are kept as separate TOML keys for authoring
/// convenience; they are merged into one ordered [`ContentItem`] list with
/// paths first, matching the built-in table's layout.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFeature {
    #[serde(default)]
    dependencies: Vec<String>,
    #[serde(default)]
    content: Vec<String>,
    #[serde(default)]
    actions: Vec<super::ActionKind>,
}

/// Load the registry for a template root.
///
/// Reads `<root>/features.toml` when it exists; otherwise falls back to the
/// built-in table, mirroring the original tool whose table lived next to
/// the template files.
///
/// # Errors
///
/// Returns an error if `features.toml` exists but cannot be read, fails to
/// parse, or declares a dangling dependency.
pub fn load(root: &Path) -> Result<FeatureRegistry, RegistryError> {
    let path = root.join(REGISTRY_FILE);
    if path.exists() {
        load_file(&path)
    } else {
        Ok(FeatureRegistry::builtin())
    }
}

/// Parse a registry file, validating that every dependency resolves.
///
/// # Errors
///
/// Returns [`RegistryError::Io`] if the file cannot be read,
/// [`RegistryError::InvalidSyntax`] on malformed TOML or unknown keys, and
/// [`RegistryError::DanglingDependency`] when a dependency id is undefined.
pub fn load_file(path: &Path) -> Result<FeatureRegistry, RegistryError> {
    let text = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let raw: BTreeMap<String, RawFeature> =
        toml::from_str(&text).map_err(|e| RegistryError::InvalidSyntax {
            file: path.display().to_string(),
            message: e.to_string(),
        })?;

    let features = raw
        .into_iter()
        .map(|(id, raw)| {
            let mut content: Vec<ContentItem> =
                raw.content.into_iter().map(ContentItem::Path).collect();
            content.extend(raw.actions.into_iter().map(ContentItem::Action));
            (
                id,
                Feature {
                    dependencies: raw.dependencies,
                    content,
                },
            )
        })
        .collect();

    let registry = FeatureRegistry::from_features(features);
    registry.validate_closed()?;
    Ok(registry)
}
