//! The `--remove` command: accepted by the CLI but intentionally
//! unimplemented.

use anyhow::Result;

use super::{Outcome, ensure_not_template_root, resolve_dest, resolve_root};
use crate::cli::GlobalOpts;

/// Run the remove command.
///
/// Feature removal is not supported. The command still performs the same
/// dangerous-directory check as `--add` (matching the reference tool's
/// ordering) and then fails with a clear error, so scripts never mistake it
/// for a silent no-op.
///
/// # Errors
///
/// Always returns an error: either the dangerous-directory refusal or the
/// "not implemented" failure.
pub fn run(global: &GlobalOpts, requested: &[String]) -> Result<Outcome> {
    let root = resolve_root(global)?;
    let dest = resolve_dest(global)?;
    ensure_not_template_root(&root, &dest)?;

    anyhow::bail!(
        "removing features ({}) is not implemented",
        requested.join(", ")
    )
}
