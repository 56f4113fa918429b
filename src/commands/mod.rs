//! Top-level command orchestration (`list`, `add`, `remove`).
//!
//! Commands resolve the template root and destination, load the registry,
//! and drive the resolver and installer. They return structured results;
//! only `main` turns those into process exit codes.

pub mod add;
pub mod list;
pub mod remove;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::cli::GlobalOpts;
use crate::registry::REGISTRY_FILE;

/// Final result of a command, mapped to the process exit code in `main`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Everything succeeded.
    Clean,
    /// The plan executed, but one or more items failed to install.
    Warnings,
}

/// Resolve the template root directory from CLI arguments or auto-detection.
///
/// Order: `--root`, the `PTC_ROOT` environment variable, then the directory
/// holding the running binary (and its parent, for a `bin/` layout) when it
/// contains a `features.toml`.
///
/// # Errors
///
/// Returns an error if no candidate looks like a template root.
pub fn resolve_root(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(ref root) = global.root {
        return Ok(root.clone());
    }

    if let Ok(root) = std::env::var("PTC_ROOT") {
        return Ok(PathBuf::from(root));
    }

    // The installed binary normally lives in the template repository itself.
    if let Ok(exe) = std::env::current_exe()
        && let Some(parent) = exe.parent()
    {
        let candidates = [parent.to_path_buf(), parent.join("..")];
        for candidate in &candidates {
            if candidate.join(REGISTRY_FILE).exists() {
                return Ok(dunce::canonicalize(candidate)?);
            }
        }
    }

    anyhow::bail!("cannot determine the template root. Use --root or set PTC_ROOT")
}

/// Resolve the destination directory: `--dest` or the current directory.
///
/// # Errors
///
/// Returns an error if the current directory cannot be determined.
pub fn resolve_dest(global: &GlobalOpts) -> Result<PathBuf> {
    match global.dest {
        Some(ref dest) => Ok(dest.clone()),
        None => Ok(std::env::current_dir()?),
    }
}

/// Refuse to operate when the destination is the template root itself.
///
/// Installing into the template repository would overwrite the template
/// source, so the refusal from the reference tool is kept, usage example
/// included.
///
/// # Errors
///
/// Returns an error when `root` and `dest` name the same directory.
pub fn ensure_not_template_root(root: &Path, dest: &Path) -> Result<()> {
    let root_canon = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let dest_canon = dunce::canonicalize(dest).unwrap_or_else(|_| dest.to_path_buf());
    if root_canon == dest_canon {
        anyhow::bail!(
            "not allowed to operate in the template root directory; \
             run from the destination directory instead, e.g.\n\
             \n  $ mkdir project\n  $ cd project\n  $ ptc --add linux sonar"
        );
    }
    Ok(())
}

/// Emit shell completions for `shell` on stdout.
pub fn completions(shell: clap_complete::Shell) {
    let mut cmd = <crate::cli::Cli as clap::CommandFactory>::command();
    clap_complete::generate(shell, &mut cmd, "ptc", &mut std::io::stdout());
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    fn opts(root: Option<PathBuf>, dest: Option<PathBuf>) -> GlobalOpts {
        GlobalOpts {
            verbose: false,
            dry_run: false,
            root,
            dest,
            parallel: false,
        }
    }

    #[test]
    fn resolve_root_uses_explicit_root() {
        let global = opts(Some(PathBuf::from("/explicit/path")), None);
        assert_eq!(
            resolve_root(&global).unwrap(),
            PathBuf::from("/explicit/path")
        );
    }

    #[test]
    fn resolve_dest_uses_explicit_dest() {
        let global = opts(None, Some(PathBuf::from("/project")));
        assert_eq!(resolve_dest(&global).unwrap(), PathBuf::from("/project"));
    }

    #[test]
    fn resolve_dest_defaults_to_current_dir() {
        let global = opts(None, None);
        assert_eq!(
            resolve_dest(&global).unwrap(),
            std::env::current_dir().unwrap()
        );
    }

    #[test]
    fn same_directory_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let err = ensure_not_template_root(dir.path(), dir.path()).unwrap_err();
        assert!(err.to_string().contains("template root"));
    }

    #[test]
    fn same_directory_via_different_spellings_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let alias = dir.path().join(".");
        assert!(ensure_not_template_root(dir.path(), &alias).is_err());
    }

    #[test]
    fn distinct_directories_are_allowed() {
        let root = tempfile::tempdir().unwrap();
        let dest = tempfile::tempdir().unwrap();
        assert!(ensure_not_template_root(root.path(), dest.path()).is_ok());
    }
}
