//! exprbench CLI - compare expression evaluators on one string formula.

mod cli;
mod commands;
mod common;

use std::process::ExitCode;

use clap::Parser;
use cli::{Cli, Command};

fn main() -> ExitCode {
    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Command::List) => {
            commands::list::run();
            ExitCode::SUCCESS
        }
        Some(Command::Completions(args)) => {
            commands::completions::run(args);
            ExitCode::SUCCESS
        }
        None => commands::run::run(cli.run, cli.no_color),
    }
}
