//! The `--list-features` command: print every registry identifier.

use std::sync::Arc;

use anyhow::Result;

use super::{Outcome, resolve_root};
use crate::cli::GlobalOpts;
use crate::logging::Logger;
use crate::registry::{self, FeatureRegistry};

/// Run the list command.
///
/// Falls back to the built-in registry when no template root can be found,
/// so listing works even for a bare binary.
///
/// # Errors
///
/// Returns an error if a template root was found but its `features.toml`
/// fails to load.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<Outcome> {
    let registry = match resolve_root(global) {
        Ok(root) => registry::load(&root)?,
        Err(e) => {
            log.debug(&format!("{e:#}; listing the built-in registry"));
            FeatureRegistry::builtin()
        }
    };

    for line in render(&registry) {
        println!("{line}");
    }
    Ok(Outcome::Clean)
}

/// The lines printed by the list command.
#[must_use]
pub fn render(registry: &FeatureRegistry) -> Vec<String> {
    std::iter::once("Features:".to_string())
        .chain(registry.ids().map(|id| format!("- {id}")))
        .collect()
}
