//! Integration tests for the default run command.

mod common;

use common::{exprbench, run_quick};
use predicates::prelude::*;

#[test]
fn test_run_without_arguments() {
    exprbench()
        .arg("--no-color")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Expression: substr(IDENTITY_DOC_ID, greatest(length(IDENTITY_DOC_ID) - 5, 1))",
        ))
        .stdout(predicate::str::contains("Test Value: 123456789012345"))
        .stdout(predicate::str::contains("Expected Result: 012345"))
        .stdout(predicate::str::contains("Time for 100,000 evaluations:"))
        .stdout(predicate::str::contains("Summary: 4 passed, 0 failed"));
}

#[test]
fn test_backends_run_in_order() {
    let stdout = run_quick(&[]);
    let positions: Vec<usize> = ["=== meval ===", "=== evalexpr ===", "=== rhai ===", "=== cel ==="]
        .iter()
        .map(|header| stdout.find(header).expect(header))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{stdout}");
}

#[test]
fn test_string_backends_return_expected() {
    let stdout = run_quick(&[]);
    let results = stdout.lines().filter(|line| *line == "Result: 012345").count();
    assert_eq!(results, 3, "{stdout}");
    assert!(stdout.lines().any(|line| line == "Result: 10"), "{stdout}");
    assert!(stdout.contains("Time for 10 evaluations:"));
}

#[test]
fn test_reduced_backend_is_flagged() {
    let stdout = run_quick(&["--backend", "meval"]);
    assert!(stdout.contains("meval evaluates numbers only"), "{stdout}");
    assert!(stdout.contains("helpers not supported: substr, length"), "{stdout}");
    assert!(stdout.contains("Check: PASS"));
}

#[test]
fn test_short_input_returns_whole_string() {
    let stdout = run_quick(&["--input", "AB"]);
    assert!(stdout.contains("Test Value: AB"));
    assert!(stdout.contains("Expected Result: AB"));
    assert!(stdout.contains("Summary: 4 passed, 0 failed"), "{stdout}");
}

#[test]
fn test_selected_backends_only() {
    let stdout = run_quick(&["--backend", "cel", "--backend", "evalexpr"]);
    assert!(!stdout.contains("=== rhai ==="));
    assert!(!stdout.contains("=== meval ==="));
    let evalexpr = stdout.find("=== evalexpr ===").unwrap();
    let cel = stdout.find("=== cel ===").unwrap();
    assert!(evalexpr < cel);
    assert!(stdout.contains("Summary: 2 passed, 0 failed"));
}

#[test]
fn test_interpreted_mode() {
    let stdout = run_quick(&["--backend", "rhai", "--mode", "interpreted"]);
    assert!(stdout.contains("Result: 012345"), "{stdout}");
}

#[test]
fn test_zero_iterations() {
    exprbench()
        .args(["--iterations", "0", "--backend", "evalexpr", "--no-color"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Time for 0 evaluations:"))
        .stdout(predicate::str::contains("Avg time: 0.00 ns"));
}

#[test]
fn test_json_report() {
    let stdout = run_quick(&["--format", "json"]);
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["expected"], "012345");
    assert_eq!(report["iterations"], 10);

    let backends = report["backends"].as_array().unwrap();
    let names: Vec<&str> = backends
        .iter()
        .map(|b| b["backend"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["meval", "evalexpr", "rhai", "cel"]);
    assert!(backends.iter().all(|b| b["outcome"]["status"] == "completed"));
}

#[test]
fn test_unknown_backend_is_usage_error() {
    exprbench()
        .args(["--backend", "jexl"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("invalid value 'jexl'"));
}

#[test]
fn test_invalid_iterations_is_usage_error() {
    exprbench()
        .args(["--iterations", "many"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_list_backends() {
    exprbench()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("meval     reduced numeric check"))
        .stdout(predicate::str::contains("evalexpr  full check"))
        .stdout(predicate::str::contains("rhai      full check"))
        .stdout(predicate::str::contains("cel       full check"));
}

#[test]
fn test_completions() {
    exprbench()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exprbench"));
}
