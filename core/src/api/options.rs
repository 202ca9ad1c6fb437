//! Harness configuration.
//!
//! [`HarnessOptions`] holds the effective settings. Callers that only want
//! to change some of them fill a [`HarnessOptionsOverride`] and merge it with
//! [`HarnessOptions::override_with`].

use serde::Serialize;

/// Number of timed evaluations per backend.
pub const DEFAULT_ITERATIONS: usize = 100_000;

/// How a backend that supports both should run the compiled expression.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvalMode {
    /// Walk the expression as parsed, without optimization passes.
    Interpreted,
    /// Optimize the compiled expression before evaluating it.
    #[default]
    Compiled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessOptions {
    /// Size of the timing loop.
    pub iterations: usize,
    /// Evaluation mode for backends constructed by the harness.
    pub mode: EvalMode,
}

impl Default for HarnessOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            mode: EvalMode::default(),
        }
    }
}

impl HarnessOptions {
    /// Replace every setting that `overrides` provides.
    pub fn override_with(&mut self, overrides: &HarnessOptionsOverride) {
        if let Some(iterations) = overrides.iterations {
            self.iterations = iterations;
        }
        if let Some(mode) = overrides.mode {
            self.mode = mode;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HarnessOptionsOverride {
    pub iterations: Option<usize>,
    pub mode: Option<EvalMode>,
}
