//! The benchmark driver.

use std::time::Instant;
use tracing::{debug, info, warn};

use super::{
    Backend, BackendReport, CheckKind, CompiledExpression, Error, Fixture, HarnessOptions, Outcome,
    Registry, Report, Run, Timing, Value,
};

/// Runs the fixture through backends, one at a time.
///
/// For every backend the harness registers the helpers, picks the full or
/// the numeric check, compiles once, evaluates once against the expectation
/// and then times `options.iterations` further evaluations of the same
/// compiled handle. A failing backend is recorded in its report and never
/// stops the run.
#[derive(Debug, Clone)]
pub struct Harness {
    options: HarnessOptions,
    registry: Registry,
    fixture: Fixture,
}

impl Harness {
    pub fn new(options: HarnessOptions, registry: Registry, fixture: Fixture) -> Self {
        Self {
            options,
            registry,
            fixture,
        }
    }

    /// Run every backend in order.
    pub fn run(&self, backends: &mut [Box<dyn Backend>]) -> Report {
        let backends = backends
            .iter_mut()
            .map(|backend| self.run_backend(backend.as_mut()))
            .collect();

        Report {
            expression: self.fixture.expression,
            input: self.fixture.input.clone(),
            expected: self.fixture.expected.clone(),
            iterations: self.options.iterations,
            backends,
        }
    }

    /// Run a single backend.
    pub fn run_backend(&self, backend: &mut dyn Backend) -> BackendReport {
        let name = backend.name();
        let registration = backend.register(&self.registry);
        debug!(backend = name, registered = ?registration.registered, "registered helpers");

        let mut notes = Vec::new();
        if !registration.is_complete() {
            warn!(backend = name, skipped = ?registration.unsupported, "helpers not supported");
            notes.push(format!(
                "helpers not supported: {}",
                registration.unsupported.join(", ")
            ));
        }

        let (check, fixture) = if backend.capabilities().strings {
            (CheckKind::Full, self.fixture.clone())
        } else {
            let numeric = self.fixture.numeric();
            notes.push(format!(
                "{name} evaluates numbers only; ran the reduced check `{}` instead",
                numeric.expression
            ));
            (CheckKind::Reduced, numeric)
        };

        let outcome = match self.measure(backend, &fixture) {
            Ok(run) => {
                if run.passed() {
                    info!(backend = name, result = %run.result, "check passed");
                } else {
                    warn!(
                        backend = name,
                        result = %run.result,
                        expected = %run.expected,
                        "check failed"
                    );
                }
                Outcome::Completed(run)
            }
            Err(err) => {
                warn!(backend = name, error = %err, "backend failed");
                Outcome::Failed(err)
            }
        };

        BackendReport {
            backend: name,
            check,
            expression: fixture.expression,
            registration,
            notes,
            outcome,
        }
    }

    fn measure(&self, backend: &dyn Backend, fixture: &Fixture) -> Result<Run, Error> {
        let mut compiled = backend.compile(fixture.expression)?;
        debug!(backend = backend.name(), expression = fixture.expression, "compiled");

        compiled.bind(fixture.variable, &fixture.input)?;
        let references = compiled
            .references()
            .unwrap_or_else(|| fixture.references());

        let result = compiled.evaluate()?;
        let timing = time_evaluations(
            compiled.as_mut(),
            &result,
            self.options.iterations,
            backend.name(),
        )?;
        debug!(
            backend = backend.name(),
            total_ns = timing.total_ns,
            "timed {} evaluations",
            timing.iterations
        );

        Ok(Run {
            references,
            result,
            expected: fixture.expected.clone(),
            timing,
        })
    }
}

/// Evaluate `compiled` `iterations` times and measure the elapsed time.
///
/// Every evaluation must return `first`; the first one that does not ends the
/// loop with an evaluation failure.
pub fn time_evaluations(
    compiled: &mut dyn CompiledExpression,
    first: &Value,
    iterations: usize,
    backend: &'static str,
) -> Result<Timing, Error> {
    let start = Instant::now();
    for i in 0..iterations {
        let value = compiled.evaluate()?;
        if &value != first {
            return Err(Error::evaluation(
                backend,
                format!("iteration {i} returned {value}, the first evaluation returned {first}"),
            ));
        }
    }
    Ok(Timing::new(iterations, start.elapsed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Capabilities, Registration};
    use crate::stdlib::helper_registry;
    use pretty_assertions::assert_eq;

    /// Counts up on every evaluation.
    struct Counter(i64);

    impl CompiledExpression for Counter {
        fn bind(&mut self, _name: &str, _value: &Value) -> Result<(), Error> {
            Ok(())
        }

        fn evaluate(&mut self) -> Result<Value, Error> {
            self.0 += 1;
            Ok(Value::Int(self.0.min(3)))
        }
    }

    /// Never compiles anything.
    struct Broken;

    impl Backend for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn capabilities(&self) -> Capabilities {
            Capabilities { strings: true }
        }

        fn register(&mut self, _registry: &Registry) -> Registration {
            Registration::default()
        }

        fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression + '_>, Error> {
            Err(Error::Parse {
                backend: "broken",
                message: "no parser".to_string(),
                expression: source.to_string(),
                span: None,
            })
        }
    }

    fn harness(iterations: usize) -> Harness {
        let options = HarnessOptions {
            iterations,
            ..Default::default()
        };
        Harness::new(options, helper_registry().unwrap(), Fixture::standard())
    }

    #[test]
    fn divergent_results_fail_the_loop() {
        let mut counter = Counter(1);
        let err = time_evaluations(&mut counter, &Value::Int(2), 5, "counter").unwrap_err();
        assert_eq!(
            err,
            Error::evaluation(
                "counter",
                "iteration 1 returned 3, the first evaluation returned 2"
            )
        );
    }

    #[test]
    fn stable_results_are_timed() {
        let mut counter = Counter(3);
        let timing = time_evaluations(&mut counter, &Value::Int(3), 7, "counter").unwrap();
        assert_eq!(timing.iterations, 7);
        assert_eq!(counter.0, 10);
    }

    #[test]
    fn parse_failure_is_reported_not_raised() {
        crate::test_utils::init_test_logging();
        let report = harness(1).run_backend(&mut Broken);
        assert!(!report.succeeded());
        assert_eq!(report.check, CheckKind::Full);
        assert_eq!(report.error().map(Error::kind), Some("parse failure"));
    }

    #[test]
    fn failing_backend_does_not_stop_the_run() {
        let mut backends: Vec<Box<dyn Backend>> = vec![
            Box::new(Broken),
            Box::new(crate::backends::EvalexprBackend::new()),
        ];
        let report = harness(3).run(&mut backends);

        assert_eq!(report.backends.len(), 2);
        assert!(!report.backends[0].succeeded());
        assert!(report.backends[1].succeeded());
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.all_succeeded());
    }
}
