//! The `--add` command: resolve the requested features and install them.

use std::sync::Arc;

use anyhow::Result;

use super::{Outcome, ensure_not_template_root, resolve_dest, resolve_root};
use crate::cli::GlobalOpts;
use crate::installer::Installer;
use crate::installer::actions::SystemActionRunner;
use crate::logging::Logger;
use crate::registry;
use crate::resolver;

/// Run the add command.
///
/// Resolution failures abort before any installation side effect;
/// installation-time item failures do not error, they yield
/// [`Outcome::Warnings`] so the exit code still distinguishes a clean run.
///
/// # Errors
///
/// Returns an error if the template root cannot be resolved, the
/// destination is the template root itself, the registry fails to load, or
/// dependency resolution fails.
pub fn run(global: &GlobalOpts, requested: &[String], log: &Arc<Logger>) -> Result<Outcome> {
    let root = resolve_root(global)?;
    let dest = resolve_dest(global)?;
    ensure_not_template_root(&root, &dest)?;

    log.stage("Resolving features");
    let registry = registry::load(&root)?;
    let plan = resolver::resolve(requested, &registry)?;
    log.info(&format!(
        "{} features across {} levels",
        plan.feature_count(),
        plan.levels().len()
    ));

    log.stage("Installing features");
    let actions = Arc::new(SystemActionRunner::new(Arc::clone(log)));
    let installer = Installer::new(
        root,
        dest,
        global.dry_run,
        global.parallel,
        Arc::clone(log),
        actions,
    );
    let stats = installer.install(&plan, &registry);
    log.info(&stats.summary(global.dry_run));

    log.print_summary();

    if stats.failed > 0 {
        return Ok(Outcome::Warnings);
    }
    Ok(Outcome::Clean)
}
