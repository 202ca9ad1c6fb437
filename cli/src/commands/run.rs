//! The default command - run the benchmark and print the report.

use std::io::Write;
use std::process::ExitCode;

use exprbench::backends::{BACKEND_NAMES, backend_by_name, default_backends};
use exprbench::stdlib::helper_registry;
use exprbench::{
    Backend, Fixture, Harness, HarnessOptions, HarnessOptionsOverride, RenderConfig,
    render_report_json_to, render_report_to,
};

use crate::cli::{Format, RunArgs};
use crate::common::error::render_and_exit;
use crate::common::CliResult;

/// Run the benchmark. Exits with 1 if any backend failed.
pub fn run(args: RunArgs, no_color: bool) -> ExitCode {
    match execute(args, no_color) {
        Ok(code) => code,
        Err(e) => render_and_exit(e, no_color),
    }
}

fn execute(args: RunArgs, no_color: bool) -> CliResult<ExitCode> {
    let mut options = HarnessOptions::default();
    options.override_with(&HarnessOptionsOverride {
        iterations: args.iterations,
        mode: args.mode.map(Into::into),
    });

    let fixture = match &args.input {
        Some(input) => Fixture::with_input(input)?,
        None => Fixture::standard(),
    };

    let mut backends = select_backends(&args.backends, &options);
    tracing::info!(
        backends = backends.len(),
        iterations = options.iterations,
        "starting run"
    );

    let harness = Harness::new(options, helper_registry()?, fixture);
    let report = harness.run(&mut backends);

    let mut stdout = std::io::stdout().lock();
    match args.format {
        Format::Text => {
            let config = RenderConfig {
                color: !no_color,
                ..Default::default()
            };
            render_report_to(&report, &mut stdout, &config)?;
        }
        Format::Json => render_report_json_to(&report, &mut stdout)?,
    }
    stdout.flush()?;

    Ok(if report.all_succeeded() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Backends named on the command line, always in run order.
fn select_backends(names: &[String], options: &HarnessOptions) -> Vec<Box<dyn Backend>> {
    if names.is_empty() {
        return default_backends(options);
    }
    BACKEND_NAMES
        .iter()
        .filter(|name| names.iter().any(|selected| selected == *name))
        .filter_map(|name| backend_by_name(name, options.mode))
        .collect()
}
