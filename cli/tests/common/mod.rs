//! Shared test utilities for CLI integration tests.

#![allow(dead_code)]

use assert_cmd::Command;

/// Create a new command for the exprbench binary.
pub fn exprbench() -> Command {
    Command::new(env!("CARGO_BIN_EXE_exprbench"))
}

/// Run with a short timing loop and no colors, returning stdout.
pub fn run_quick(args: &[&str]) -> String {
    let output = exprbench()
        .args(["--iterations", "10", "--no-color"])
        .args(args)
        .output()
        .expect("failed to execute command");
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}
