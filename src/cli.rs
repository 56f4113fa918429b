//! Command-line argument definitions and parsing for the `ptc` binary.

use std::path::PathBuf;

use clap::{ArgGroup, Parser};

/// Top-level CLI entry point for the project template creator.
///
/// The tool is flag-driven rather than subcommand-driven: exactly one of
/// `--list-features`, `--add`, `--remove`, or `--completions` selects the
/// operation.
#[derive(Parser, Debug)]
#[command(
    name = "ptc",
    about = "Project Template Creator: install template features into a project directory",
    version = option_env!("PTC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION")),
    group = ArgGroup::new("mode")
        .required(true)
        .args(["list_features", "add", "remove", "completions"]),
)]
pub struct Cli {
    /// List every feature known to the registry
    #[arg(short = 'l', long)]
    pub list_features: bool,

    /// Install the given features and their dependencies
    #[arg(short = 'a', long, value_name = "FEATURE", num_args = 1..)]
    pub add: Vec<String>,

    /// Remove the given features (not implemented)
    #[arg(short = 'r', long, value_name = "FEATURE", num_args = 1..)]
    pub remove: Vec<String>,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL", value_enum)]
    pub completions: Option<clap_complete::Shell>,

    /// Options shared across all modes.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all modes.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Preview changes without applying
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Override the template root directory
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Destination directory (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    pub dest: Option<PathBuf>,

    /// Disable parallel installation within a level (parallel is enabled by default)
    #[arg(long = "no-parallel", action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}
