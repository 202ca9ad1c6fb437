//! Command implementations.
//!
//! Each submodule handles a specific CLI command.

pub mod completions;
pub mod list;
pub mod run;
