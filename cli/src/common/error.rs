//! Error handling utilities for the CLI.

use exprbench::{Error, HelperError, RenderConfig, render_error_to};
use nu_ansi_term::Color;

/// Errors that stop a run before a report can be produced.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Bench(#[from] Error),
    #[error("invalid input: {0}")]
    Input(#[from] HelperError),
    #[error("cannot write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;

/// Render an error to stderr and exit with code 1.
pub fn render_and_exit(error: CliError, no_color: bool) -> ! {
    let config = RenderConfig {
        color: !no_color,
        ..Default::default()
    };
    let mut stderr = std::io::stderr();
    match &error {
        CliError::Bench(error) => {
            render_error_to(error, &mut stderr, &config).ok();
        }
        other => {
            let label = if no_color {
                "error:".to_string()
            } else {
                Color::Red.bold().paint("error:").to_string()
            };
            eprintln!("{} {}", label, other);
        }
    }
    std::process::exit(1);
}
