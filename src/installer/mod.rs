//! Installation plan executor.
//!
//! Walks an [`InstallPlan`] level by level and applies each feature's
//! content items: path items are copied from the template root into the
//! destination directory, action items are invoked through the
//! [`ActionRunner`] seam. Execution is best-effort: a failing item is
//! logged and recorded, and the remaining plan continues; the installer
//! never asks the resolver to re-plan or roll back.
//!
//! Features within one level have no ordering dependency on each other and
//! may be processed in parallel; a level always completes before the next
//! level starts.

pub mod actions;
mod fs;

pub use fs::copy_dir_recursive;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::Context as _;
use rayon::prelude::*;

use crate::error::InstallError;
use crate::logging::{FeatureStatus, Logger};
use crate::registry::{ActionKind, ContentItem, FeatureRegistry};
use crate::resolver::InstallPlan;
use actions::ActionRunner;

/// Counters for processed content items.
#[derive(Debug, Default)]
pub struct InstallStats {
    /// Items copied or actions invoked (or previewed, in dry-run mode).
    pub installed: u32,
    /// Items skipped because the destination exists or the source is
    /// missing.
    pub skipped: u32,
    /// Items that failed to install.
    pub failed: u32,
}

impl InstallStats {
    /// Create a new empty stats counter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Format the summary line (e.g. `"3 installed, 1 skipped"`).
    ///
    /// # Examples
    ///
    /// ```
    /// use ptc_cli::installer::InstallStats;
    ///
    /// let stats = InstallStats { installed: 3, skipped: 1, failed: 0 };
    /// assert_eq!(stats.summary(false), "3 installed, 1 skipped");
    /// assert_eq!(stats.summary(true), "3 would install, 1 skipped");
    /// ```
    #[must_use]
    pub fn summary(&self, dry_run: bool) -> String {
        let verb = if dry_run { "would install" } else { "installed" };
        let mut parts = vec![format!("{} {verb}", self.installed)];
        if self.skipped > 0 {
            parts.push(format!("{} skipped", self.skipped));
        }
        if self.failed > 0 {
            parts.push(format!("{} failed", self.failed));
        }
        parts.join(", ")
    }
}

impl std::ops::AddAssign for InstallStats {
    fn add_assign(&mut self, other: Self) {
        self.installed += other.installed;
        self.skipped += other.skipped;
        self.failed += other.failed;
    }
}

/// Outcome of a single content item.
enum ItemOutcome {
    Applied,
    Skipped,
}

/// Executes an [`InstallPlan`] against a destination directory.
pub struct Installer {
    source_root: PathBuf,
    dest: PathBuf,
    dry_run: bool,
    parallel: bool,
    log: Arc<Logger>,
    actions: Arc<dyn ActionRunner>,
}

impl std::fmt::Debug for Installer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Installer")
            .field("source_root", &self.source_root)
            .field("dest", &self.dest)
            .field("dry_run", &self.dry_run)
            .field("parallel", &self.parallel)
            .field("log", &"<Logger>")
            .field("actions", &"<dyn ActionRunner>")
            .finish()
    }
}

impl Installer {
    /// Create an installer copying from `source_root` into `dest`.
    #[must_use]
    pub const fn new(
        source_root: PathBuf,
        dest: PathBuf,
        dry_run: bool,
        parallel: bool,
        log: Arc<Logger>,
        actions: Arc<dyn ActionRunner>,
    ) -> Self {
        Self {
            source_root,
            dest,
            dry_run,
            parallel,
            log,
            actions,
        }
    }

    /// Install every feature in `plan`, level by level.
    ///
    /// Each feature's result is recorded in the logger summary; the
    /// returned stats aggregate all content items across all levels.
    pub fn install(&self, plan: &InstallPlan, registry: &FeatureRegistry) -> InstallStats {
        let mut total = InstallStats::new();
        for level in plan.levels() {
            total += self.install_level(level, registry);
        }
        total
    }

    /// Install one level, completing it before returning.
    ///
    /// Same-level features have no ordering dependency on each other, so
    /// they are processed in parallel unless disabled.
    fn install_level(&self, level: &BTreeSet<String>, registry: &FeatureRegistry) -> InstallStats {
        if self.parallel && level.len() > 1 {
            let stats = Mutex::new(InstallStats::new());
            level.par_iter().for_each(|id| {
                let delta = self.install_feature(id, registry);
                *stats
                    .lock()
                    .unwrap_or_else(std::sync::PoisonError::into_inner) += delta;
            });
            stats
                .into_inner()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
        } else {
            let mut stats = InstallStats::new();
            for id in level {
                stats += self.install_feature(id, registry);
            }
            stats
        }
    }

    /// Apply all content items of one feature and record its result.
    fn install_feature(&self, id: &str, registry: &FeatureRegistry) -> InstallStats {
        let mut stats = InstallStats::new();
        let Some(feature) = registry.get(id) else {
            // Plan ids always come from the registry; a miss here means the
            // caller mixed plans and registries.
            self.log.error(&format!("feature '{id}' is not in the registry"));
            self.log
                .record_feature(id, FeatureStatus::Failed, Some("not in the registry"));
            stats.failed += 1;
            return stats;
        };

        self.log.info(&format!("adding {id}"));
        let mut first_error: Option<String> = None;
        for item in &feature.content {
            match self.apply_item(item) {
                Ok(ItemOutcome::Applied) => stats.installed += 1,
                Ok(ItemOutcome::Skipped) => stats.skipped += 1,
                Err(e) => {
                    stats.failed += 1;
                    self.log.error(&e.to_string());
                    if first_error.is_none() {
                        first_error = Some(e.to_string());
                    }
                }
            }
        }

        self.record_feature(id, &stats, first_error.as_deref());
        stats
    }

    /// Record the feature's summary entry from its item stats.
    ///
    /// Meta-features fall through to `Ok`: no content items means nothing
    /// could fail.
    fn record_feature(&self, id: &str, stats: &InstallStats, first_error: Option<&str>) {
        if stats.failed > 0 {
            self.log
                .record_feature(id, FeatureStatus::Failed, first_error);
        } else if self.dry_run {
            self.log.record_feature(id, FeatureStatus::DryRun, None);
        } else if stats.installed == 0 && stats.skipped > 0 {
            self.log
                .record_feature(id, FeatureStatus::Skipped, Some("nothing to do"));
        } else {
            self.log.record_feature(id, FeatureStatus::Ok, None);
        }
    }

    fn apply_item(&self, item: &ContentItem) -> Result<ItemOutcome, InstallError> {
        match item {
            ContentItem::Path(name) => self.install_path(name),
            ContentItem::Action(kind) => self.invoke_action(*kind),
        }
    }

    /// Copy one path item from the template root into the destination.
    ///
    /// A missing source and an existing destination are warnings, not
    /// errors: the reference tool treats both as normal skip conditions.
    fn install_path(&self, name: &str) -> Result<ItemOutcome, InstallError> {
        let src = self.source_root.join(name);
        let dst = self.dest.join(name);

        if !src.exists() {
            self.log
                .warn(&format!("source does not exist: {}", src.display()));
            return Ok(ItemOutcome::Skipped);
        }
        if dst.exists() {
            self.log.warn(&format!("{name} already exists, skipping"));
            return Ok(ItemOutcome::Skipped);
        }
        if self.dry_run {
            self.log.dry_run(&format!("install {name}"));
            return Ok(ItemOutcome::Applied);
        }

        self.copy_path(&src, &dst)
            .map_err(|cause| InstallError::Copy {
                item: name.to_string(),
                cause,
            })?;
        self.log.info(&format!("installing {name}"));
        Ok(ItemOutcome::Applied)
    }

    fn copy_path(&self, src: &Path, dst: &Path) -> anyhow::Result<()> {
        if let Some(parent) = dst.parent()
            && !parent.exists()
        {
            self.log
                .debug(&format!("creating directory {}", parent.display()));
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating directory {}", parent.display()))?;
        }
        if src.is_dir() {
            copy_dir_recursive(src, dst)?;
        } else {
            std::fs::copy(src, dst)
                .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
        }
        Ok(())
    }

    /// Invoke one action item through the runner.
    fn invoke_action(&self, kind: ActionKind) -> Result<ItemOutcome, InstallError> {
        if self.dry_run {
            self.log.dry_run(&format!("invoke {}", kind.name()));
            return Ok(ItemOutcome::Applied);
        }
        self.log.info(&format!("calling {}", kind.name()));
        self.actions
            .invoke(kind)
            .map_err(|cause| InstallError::Action {
                action: kind.name(),
                cause,
            })?;
        Ok(ItemOutcome::Applied)
    }
}
