//! Domain-specific error types for the scaffolding engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Library modules return typed errors ([`RegistryError`], [`ResolveError`],
//! [`InstallError`]) while command handlers at the CLI boundary convert them
//! to [`anyhow::Error`] via the standard `?` operator.
//!
//! Resolver errors are fatal to the current invocation: no partial graph is
//! produced and no installation side effects occur. Installation errors are
//! local: one failing item never blocks the others.

use thiserror::Error;

/// Errors that arise while loading or validating a feature registry.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// An I/O error occurred while reading the registry file.
    #[error("IO error reading registry file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The registry file contains invalid TOML.
    #[error("Invalid registry file {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser diagnostic.
        message: String,
    },

    /// A feature declares a dependency on an id that is not defined.
    #[error("Feature '{feature}' depends on undefined feature '{dependency}'")]
    DanglingDependency {
        /// Feature declaring the dependency.
        feature: String,
        /// The undefined dependency id.
        dependency: String,
    },
}

/// Errors that arise during dependency resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// One or more requested or depended-upon feature ids are not defined
    /// in the registry. Carries every absent id, not just the first.
    #[error("unknown features: {}", .0.join(", "))]
    UnknownFeatures(Vec<String>),

    /// A feature transitively depends on itself. Carries the offending
    /// dependency path, ending at the repeated id.
    #[error("dependency cycle detected: {}", .0.join(" -> "))]
    CycleDetected(Vec<String>),
}

/// A single content item failed to install.
///
/// Installation is best-effort: these errors are reported per item and do
/// not abort the remaining plan.
#[derive(Error, Debug)]
pub enum InstallError {
    /// Copying a path item into the destination failed.
    #[error("installing '{item}': {cause:#}")]
    Copy {
        /// Name of the content item as declared in the registry.
        item: String,
        /// Underlying copy failure.
        cause: anyhow::Error,
    },

    /// Invoking an action item failed.
    #[error("action '{action}' failed: {cause:#}")]
    Action {
        /// Kebab-case action name.
        action: &'static str,
        /// Underlying action failure.
        cause: anyhow::Error,
    },
}
