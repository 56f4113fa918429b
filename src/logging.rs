//! Logging infrastructure: structured console output and run summary.
//!
//! All output flows through [`tracing`]; [`init_subscriber`] installs a
//! console formatter that renders stage headers, dry-run previews, and
//! warnings/errors in the engine's house style. The [`Logger`] additionally
//! records a [`FeatureEntry`] per installed feature so the `add` command can
//! print a closing summary table.

use std::sync::Mutex;

/// Final status of a feature, recorded for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureStatus {
    /// All content items applied successfully.
    Ok,
    /// Every applicable item was skipped (already present or source missing).
    Skipped,
    /// The feature ran in dry-run mode; no changes were applied.
    DryRun,
    /// At least one content item failed to install.
    Failed,
}

/// Per-feature result for summary reporting.
#[derive(Debug, Clone)]
pub struct FeatureEntry {
    /// Feature id.
    pub name: String,
    /// Final status of the feature.
    pub status: FeatureStatus,
    /// Optional detail message (e.g., skip reason or error description).
    pub message: Option<String>,
}

/// Structured logger with dry-run awareness and summary collection.
///
/// Display methods delegate to [`tracing`] macros, so console formatting is
/// controlled entirely by the subscriber installed via [`init_subscriber`].
/// Recording methods are internally synchronized and may be called from
/// parallel installer threads.
#[derive(Debug, Default)]
pub struct Logger {
    features: Mutex<Vec<FeatureEntry>>,
}

impl Logger {
    /// Create a new logger with an empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: "ptc::stage", "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed unless verbose).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: "ptc::dry_run", "{msg}");
    }

    /// Record a feature result for the summary.
    pub fn record_feature(&self, name: &str, status: FeatureStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.features.lock() {
            guard.push(FeatureEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return a clone of all recorded feature entries (test-only).
    #[cfg(test)]
    pub(crate) fn feature_entries(&self) -> Vec<FeatureEntry> {
        self.features.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Return `true` if any recorded feature has failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the number of failed features.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.features.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|f| f.status == FeatureStatus::Failed)
                .count()
        })
    }

    /// Print the summary of all recorded features.
    pub fn print_summary(&self) {
        let features = match self.features.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        if features.is_empty() {
            return;
        }

        println!();
        self.stage("Summary");

        let mut ok = 0u32;
        let mut skipped = 0u32;
        let mut dry_run = 0u32;
        let mut failed = 0u32;

        for feature in &features {
            let (icon, color) = match feature.status {
                FeatureStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                FeatureStatus::Skipped => {
                    skipped += 1;
                    ("○", "\x1b[33m")
                }
                FeatureStatus::DryRun => {
                    dry_run += 1;
                    ("~", "\x1b[37m")
                }
                FeatureStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
            };

            let suffix = feature
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", feature.name));
        }

        println!();
        let total = ok + skipped + dry_run + failed;
        self.info(&format!(
            "{total} features: \x1b[32m{ok} ok\x1b[0m, \x1b[33m{skipped} skipped\x1b[0m, \x1b[37m{dry_run} dry-run\x1b[0m, \x1b[31m{failed} failed\x1b[0m"
        ));
    }
}

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits ptc-style console
/// output: bold arrow stage headers, yellow dry-run prefixes, indented info.
struct PtcFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for PtcFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let level = *metadata.level();
        let target = metadata.target();

        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let msg = &extractor.message;

        match level {
            tracing::Level::ERROR => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            tracing::Level::WARN => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            tracing::Level::INFO if target == "ptc::stage" => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            tracing::Level::INFO if target == "ptc::dry_run" => {
                writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}")
            }
            tracing::Level::INFO => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Installs a console subscriber that formats events in the ptc output
/// style, sending warnings and errors to stderr and everything else to
/// stdout. The level defaults to `info` (`debug` with `verbose`) and can be
/// overridden through the `PTC_LOG` environment variable. Must be called
/// once at program startup, before any logging.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env("PTC_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(PtcFormatter)
        .with_writer(make_writer)
        .with_filter(filter);

    tracing_subscriber::registry().with(console_layer).init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn logger_new_has_no_entries() {
        let log = Logger::new();
        assert!(log.feature_entries().is_empty(), "expected empty summary");
    }

    #[test]
    fn record_feature_ok() {
        let log = Logger::new();
        log.record_feature("base", FeatureStatus::Ok, None);
        let features = log.feature_entries();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0].name, "base");
        assert_eq!(features[0].status, FeatureStatus::Ok);
    }

    #[test]
    fn record_feature_with_message() {
        let log = Logger::new();
        log.record_feature("sonar", FeatureStatus::Skipped, Some("already present"));
        assert_eq!(
            log.feature_entries()[0].message,
            Some("already present".to_string())
        );
    }

    #[test]
    fn record_multiple_features() {
        let log = Logger::new();
        log.record_feature("a", FeatureStatus::Ok, None);
        log.record_feature("b", FeatureStatus::Failed, Some("error"));
        log.record_feature("c", FeatureStatus::DryRun, None);
        assert_eq!(log.feature_entries().len(), 3);
    }

    #[test]
    fn has_failures_detects_failed_feature() {
        let log = Logger::new();
        assert!(!log.has_failures());
        log.record_feature("a", FeatureStatus::Ok, None);
        assert!(!log.has_failures());
        log.record_feature("b", FeatureStatus::Failed, Some("error"));
        assert!(log.has_failures());
    }

    #[test]
    fn failure_count_returns_correct_count() {
        let log = Logger::new();
        assert_eq!(log.failure_count(), 0);
        log.record_feature("a", FeatureStatus::Ok, None);
        log.record_feature("b", FeatureStatus::Failed, Some("error 1"));
        log.record_feature("c", FeatureStatus::Failed, Some("error 2"));
        log.record_feature("d", FeatureStatus::Skipped, None);
        assert_eq!(log.failure_count(), 2);
    }

    #[test]
    fn feature_status_equality() {
        assert_eq!(FeatureStatus::Ok, FeatureStatus::Ok);
        assert_ne!(FeatureStatus::Ok, FeatureStatus::Failed);
        assert_ne!(FeatureStatus::Skipped, FeatureStatus::DryRun);
    }

    #[test]
    fn feature_entry_clone() {
        let entry = FeatureEntry {
            name: "coverage".to_string(),
            status: FeatureStatus::Ok,
            message: Some("all good".to_string()),
        };
        let cloned = entry.clone();
        assert_eq!(cloned.name, entry.name);
        assert_eq!(cloned.status, entry.status);
        assert_eq!(cloned.message, entry.message);
    }
}
