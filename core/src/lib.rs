//! Core of exprbench.
//!
//! Runs one fixed string expression through several third-party expression
//! evaluators ("backends") and measures how long repeated evaluation of the
//! already-compiled expression takes.
//!
//! # Example
//!
//! ```
//! use exprbench_core::api::{Fixture, Harness, HarnessOptions};
//! use exprbench_core::backends::EvalexprBackend;
//! use exprbench_core::stdlib::helper_registry;
//!
//! let options = HarnessOptions { iterations: 10, ..Default::default() };
//! let harness = Harness::new(options, helper_registry().unwrap(), Fixture::standard());
//!
//! let report = harness.run_backend(&mut EvalexprBackend::new());
//! assert!(report.succeeded());
//! ```

pub mod api;
pub mod backends;
pub mod stdlib;

pub use api::{Error, Value};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
