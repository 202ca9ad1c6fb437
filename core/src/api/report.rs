//! Results of a benchmark run.

use core::time::Duration;
use serde::Serialize;

use super::{Error, References, Registration, Value};

/// Which check a backend ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// The full string expression.
    Full,
    /// The numeric-only substitute, for backends without strings.
    Reduced,
}

/// Wall-clock time of the timing loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Timing {
    pub iterations: usize,
    pub total_ns: u64,
}

impl Timing {
    pub fn new(iterations: usize, elapsed: Duration) -> Self {
        Self {
            iterations,
            total_ns: u64::try_from(elapsed.as_nanos()).unwrap_or(u64::MAX),
        }
    }

    /// Average nanoseconds per evaluation; zero for an empty loop.
    pub fn avg_ns(&self) -> f64 {
        if self.iterations == 0 {
            0.0
        } else {
            self.total_ns as f64 / self.iterations as f64
        }
    }
}

/// A backend run that got through compilation, evaluation and timing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Run {
    pub references: References,
    pub result: Value,
    pub expected: Value,
    pub timing: Timing,
}

impl Run {
    pub fn passed(&self) -> bool {
        self.result == self.expected
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Completed(Run),
    Failed(Error),
}

/// Everything the harness learned about one backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackendReport {
    pub backend: &'static str,
    pub check: CheckKind,
    pub expression: &'static str,
    pub registration: Registration,
    /// Limitations worth pointing out next to the result.
    pub notes: Vec<String>,
    pub outcome: Outcome,
}

impl BackendReport {
    /// The run completed and its result matched the expectation.
    pub fn succeeded(&self) -> bool {
        matches!(&self.outcome, Outcome::Completed(run) if run.passed())
    }

    pub fn run(&self) -> Option<&Run> {
        match &self.outcome {
            Outcome::Completed(run) => Some(run),
            Outcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            Outcome::Completed(_) => None,
        }
    }
}

/// Report for a whole run, one entry per backend in run order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub expression: &'static str,
    pub input: Value,
    pub expected: Value,
    pub iterations: usize,
    pub backends: Vec<BackendReport>,
}

impl Report {
    pub fn all_succeeded(&self) -> bool {
        self.backends.iter().all(BackendReport::succeeded)
    }

    pub fn passed(&self) -> usize {
        self.backends.iter().filter(|b| b.succeeded()).count()
    }

    pub fn failed(&self) -> usize {
        self.backends.len() - self.passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_time() {
        let timing = Timing::new(4, Duration::from_nanos(10));
        assert_eq!(timing.total_ns, 10);
        assert_eq!(timing.avg_ns(), 2.5);
        assert_eq!(Timing::new(0, Duration::ZERO).avg_ns(), 0.0);
    }

    #[test]
    fn mismatch_is_not_success() {
        let run = Run {
            references: References::default(),
            result: Value::str("12345"),
            expected: Value::str("012345"),
            timing: Timing::new(1, Duration::from_nanos(1)),
        };
        let report = BackendReport {
            backend: "test",
            check: CheckKind::Full,
            expression: "x",
            registration: Registration::default(),
            notes: vec![],
            outcome: Outcome::Completed(run),
        };
        assert!(!report.succeeded());
        assert!(report.run().is_some());
        assert!(report.error().is_none());
    }
}
