//! Binary entry point for the `ptc` project template creator.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use ptc_cli::cli;
use ptc_cli::commands::{self, Outcome};
use ptc_cli::logging::{self, Logger};

/// Exit code for "plan executed, but some items failed to install".
const EXIT_WARNINGS: u8 = 2;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.global.verbose);
    let log = Arc::new(Logger::new());

    match run(&args, &log) {
        Ok(Outcome::Clean) => ExitCode::SUCCESS,
        Ok(Outcome::Warnings) => ExitCode::from(EXIT_WARNINGS),
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &cli::Cli, log: &Arc<Logger>) -> anyhow::Result<Outcome> {
    if let Some(shell) = args.completions {
        commands::completions(shell);
        return Ok(Outcome::Clean);
    }
    if args.list_features {
        return commands::list::run(&args.global, log);
    }
    if !args.add.is_empty() {
        return commands::add::run(&args.global, &args.add, log);
    }
    if !args.remove.is_empty() {
        return commands::remove::run(&args.global, &args.remove);
    }
    // clap's required mode group guarantees one of the branches above ran
    anyhow::bail!("no operation requested")
}
