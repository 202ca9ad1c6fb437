//! Public API of the benchmark harness.
//!
//! The pieces fit together like this:
//!
//! 1. A [`Registry`] holds the helper functions (`substr`, `greatest`,
//!    `length`) and is handed to every [`Backend`] explicitly.
//! 2. A [`Fixture`] names the expression, the variable binding and the
//!    expected value.
//! 3. The [`Harness`] registers, compiles, checks and times each backend and
//!    collects a [`Report`].

pub mod backend;
pub mod error;
pub mod fixture;
pub mod harness;
pub mod options;
pub mod registry;
pub mod report;
pub mod value;

pub use backend::{Backend, Capabilities, CompiledExpression, References};
pub use error::{Error, HelperError};
pub use fixture::Fixture;
pub use harness::{Harness, time_evaluations};
pub use options::{DEFAULT_ITERATIONS, EvalMode, HarnessOptions, HarnessOptionsOverride};
pub use registry::{Helper, HelperFn, Registration, Registry, RegistryBuilder};
pub use report::{BackendReport, CheckKind, Outcome, Report, Run, Timing};
pub use value::Value;
