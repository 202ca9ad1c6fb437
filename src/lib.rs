//! exprbench - compare expression-evaluation libraries on one string formula
//!
//! # Overview
//!
//! The benchmark evaluates
//!
//! ```text
//! substr(IDENTITY_DOC_ID, greatest(length(IDENTITY_DOC_ID) - 5, 1))
//! ```
//!
//! with several third-party evaluators ("backends"). For each backend it
//! registers the helper functions, compiles the expression once, checks the
//! result of one evaluation and times repeated evaluations of the compiled
//! expression.
//!
//! # Quick Start
//!
//! ```
//! use exprbench::{Fixture, Harness, HarnessOptions, RenderConfig, render_report_to};
//! use exprbench::backends::default_backends;
//! use exprbench::stdlib::helper_registry;
//!
//! let options = HarnessOptions { iterations: 100, ..Default::default() };
//! let mut backends = default_backends(&options);
//! let harness = Harness::new(options, helper_registry().unwrap(), Fixture::standard());
//!
//! let report = harness.run(&mut backends);
//! assert!(report.all_succeeded());
//!
//! let mut out = Vec::new();
//! let config = RenderConfig { color: false, ..Default::default() };
//! render_report_to(&report, &mut out, &config).unwrap();
//! assert!(String::from_utf8(out).unwrap().contains("Result: 012345"));
//! ```

// Report rendering utilities
pub mod report_renderer;
pub use report_renderer::{
    CharSet, RenderConfig, render_error_to, render_report_json_to, render_report_to,
};

// Re-export public API from exprbench_core
pub use exprbench_core::api::{
    Backend, BackendReport, Capabilities, CheckKind, CompiledExpression, DEFAULT_ITERATIONS,
    Error, EvalMode, Fixture, Harness, HarnessOptions, HarnessOptionsOverride, HelperError,
    HelperFn, Outcome, References, Registration, Registry, Report, Run, Timing, Value,
};
pub use exprbench_core::{backends, stdlib};
