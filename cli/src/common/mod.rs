//! Shared utilities for CLI commands.

pub mod error;

pub use error::{CliError, CliResult};
