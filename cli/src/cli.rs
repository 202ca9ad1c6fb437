//! Command-line interface definitions.
//!
//! This module contains only clap struct definitions - no business logic.
//! All command implementations are in the `commands` module.

use clap::builder::PossibleValuesParser;
use clap::{Args, Parser, Subcommand, ValueEnum};
use exprbench::EvalMode;
use exprbench::backends::BACKEND_NAMES;

/// exprbench - compare expression evaluators on one fixed string formula
///
/// Without a subcommand, every backend is run in a fixed order. The exit
/// status is 1 when any backend fails its check, 0 otherwise.
#[derive(Parser, Debug)]
#[command(name = "exprbench", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub run: RunArgs,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the backends and what they can check
    List,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for a benchmark run.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Number of timed evaluations per backend [default: 100000]
    #[arg(long, value_name = "N")]
    pub iterations: Option<usize>,

    /// Value bound to IDENTITY_DOC_ID [default: 123456789012345]
    #[arg(long, value_name = "STRING")]
    pub input: Option<String>,

    /// Run only this backend (repeatable)
    #[arg(
        long = "backend",
        value_name = "NAME",
        value_parser = PossibleValuesParser::new(BACKEND_NAMES)
    )]
    pub backends: Vec<String>,

    /// Evaluation mode for backends that have one
    #[arg(long, value_enum)]
    pub mode: Option<Mode>,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    pub format: Format,
}

/// Arguments for the `completions` command.
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

/// Evaluation mode.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    /// No optimization passes
    Interpreted,
    /// Optimize the compiled expression
    Compiled,
}

impl From<Mode> for EvalMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Interpreted => EvalMode::Interpreted,
            Mode::Compiled => EvalMode::Compiled,
        }
    }
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Human-readable blocks, one per backend
    #[default]
    Text,
    /// A single JSON document
    Json,
}
