//! Report rendering
//!
//! Text reports follow a fixed per-backend block layout. Parse failures that
//! carry a source position are rendered with ariadne, pointing into the
//! expression text.

use crate::{BackendReport, CheckKind, Error, Outcome, Report, Run};
use ariadne::{Label, ReportKind, Source};
use nu_ansi_term::{Color, Style};
use std::io::Write;

/// Character set for rendering source snippets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    /// Use Unicode characters for rich visual output.
    #[default]
    Unicode,
    /// Use ASCII-only characters for compatibility.
    Ascii,
}

/// Configuration for report rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig<'a> {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Name shown for the expression in source snippets.
    /// Defaults to "<expression>" if not provided.
    pub filename: Option<&'a str>,
    /// The character set to use for source snippets.
    pub charset: CharSet,
}

impl Default for RenderConfig<'_> {
    fn default() -> Self {
        Self {
            color: true,
            filename: None,
            charset: CharSet::Unicode,
        }
    }
}

/// Render a report as text.
pub fn render_report_to(
    report: &Report,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    writeln!(writer, "Expression: {}", report.expression)?;
    writeln!(writer, "Test Value: {}", report.input)?;
    writeln!(writer, "Expected Result: {}", report.expected)?;
    writeln!(writer)?;

    for backend in &report.backends {
        render_backend(backend, writer, config)?;
        writeln!(writer)?;
    }

    writeln!(
        writer,
        "Summary: {} passed, {} failed",
        report.passed(),
        report.failed()
    )
}

/// Render a report as a pretty-printed JSON document.
pub fn render_report_json_to(report: &Report, writer: &mut dyn Write) -> std::io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report).map_err(std::io::Error::other)?;
    writeln!(writer)
}

fn render_backend(
    backend: &BackendReport,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    let header = format!("=== {} ===", backend.backend);
    writeln!(writer, "{}", paint(config, Style::new().bold(), &header))?;

    match &backend.outcome {
        Outcome::Completed(run) => {
            writeln!(writer, "Variables: [{}]", run.references.variables.join(", "))?;
            writeln!(writer, "Functions: [{}]", run.references.functions.join(", "))?;
            writeln!(writer, "Result: {}", run.result)?;
            writeln!(writer, "Check: {}", check_line(backend, run, config))?;
            render_notes(backend, writer)?;
            writeln!(
                writer,
                "Time for {} evaluations: {} ns",
                group_digits(run.timing.iterations),
                run.timing.total_ns
            )?;
            writeln!(writer, "Avg time: {:.2} ns", run.timing.avg_ns())
        }
        Outcome::Failed(err) => {
            render_error_to(err, writer, config)?;
            render_notes(backend, writer)
        }
    }
}

fn render_notes(backend: &BackendReport, writer: &mut dyn Write) -> std::io::Result<()> {
    for note in &backend.notes {
        writeln!(writer, "Note: {}", note)?;
    }
    Ok(())
}

fn check_line(backend: &BackendReport, run: &Run, config: &RenderConfig) -> String {
    let status = if run.passed() {
        paint(config, Color::Green.into(), "PASS")
    } else {
        paint(config, Color::Red.bold(), "FAIL")
    };

    let mut details = Vec::new();
    if backend.check == CheckKind::Reduced {
        details.push(format!("reduced check: {}", backend.expression));
    }
    if !run.passed() {
        details.push(format!("expected {}", run.expected));
    }

    if details.is_empty() {
        status
    } else {
        format!("{} ({})", status, details.join(", "))
    }
}

fn paint(config: &RenderConfig, style: Style, text: &str) -> String {
    if config.color {
        style.paint(text).to_string()
    } else {
        text.to_string()
    }
}

/// Format a count with `,` between groups of three digits.
fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a single backend error.
///
/// Parse failures with a known position get a source snippet; everything
/// else is a single `Error:` line.
pub fn render_error_to(
    error: &Error,
    writer: &mut dyn Write,
    config: &RenderConfig,
) -> std::io::Result<()> {
    match error {
        Error::Parse {
            message,
            expression,
            span: Some(span),
            ..
        } => {
            let filename = config.filename.unwrap_or("<expression>");
            let charset = match config.charset {
                CharSet::Unicode => ariadne::CharSet::Unicode,
                CharSet::Ascii => ariadne::CharSet::Ascii,
            };
            let ariadne_config = ariadne::Config::default()
                .with_color(config.color)
                .with_char_set(charset);

            ariadne::Report::build(ReportKind::Error, (filename, span.clone()))
                .with_config(ariadne_config)
                .with_message(error.to_string())
                .with_label(Label::new((filename, span.clone())).with_message(message))
                .finish()
                .write((filename, Source::from(expression.as_str())), &mut *writer)
        }
        _ => writeln!(writer, "Error: {}", error),
    }
}
