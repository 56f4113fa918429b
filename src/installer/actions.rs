//! Feature actions: side-effecting operations invoked during installation.

use std::sync::Arc;

use anyhow::Result;

use crate::logging::Logger;
use crate::registry::ActionKind;

/// Capability seam for invoking feature actions.
///
/// The installer only talks to actions through this trait, so tests can
/// observe (or fail) invocations without real side effects.
#[cfg_attr(test, mockall::automock)]
pub trait ActionRunner: Send + Sync {
    /// Invoke `action` with no arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the action's side effect fails; the installer
    /// records it against the owning feature and carries on.
    fn invoke(&self, action: ActionKind) -> Result<()>;
}

/// Production [`ActionRunner`] backed by the host system.
#[derive(Debug)]
pub struct SystemActionRunner {
    log: Arc<Logger>,
}

impl SystemActionRunner {
    /// Create a runner that reports through `log`.
    #[must_use]
    pub const fn new(log: Arc<Logger>) -> Self {
        Self { log }
    }

    /// Project-side SonarQube preparation.
    ///
    /// The `sonar-project.properties` file is shipped as a path item of the
    /// same feature; the action itself only probes for the scanner binary
    /// and tells the user what is still missing.
    fn sonar_setup(&self) -> Result<()> {
        if which::which("sonar-scanner").is_ok() {
            self.log.info("sonar-scanner found on PATH");
        } else {
            self.log.warn(
                "sonar-scanner not found on PATH; install it before running an analysis",
            );
        }
        Ok(())
    }
}

impl ActionRunner for SystemActionRunner {
    fn invoke(&self, action: ActionKind) -> Result<()> {
        match action {
            ActionKind::SonarSetup => self.sonar_setup(),
        }
    }
}
