//! Project template scaffolding engine.
//!
//! `ptc` installs named *features* (files, directories, or side-effect
//! actions) from a template repository into a destination directory,
//! resolving feature dependencies and applying them in dependency order.
//!
//! The public API is organised into four layers:
//!
//! - **[`registry`]** — feature definitions: ids, dependencies, content
//! - **[`resolver`]** — dependency graph and level-order installation plan
//! - **[`installer`]** — plan execution: copies and actions, best-effort
//! - **[`commands`]** — top-level mode orchestration (`list`, `add`, `remove`)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod installer;
pub mod logging;
pub mod registry;
pub mod resolver;
