//! The `list` command - show the backends in run order.

use exprbench::HarnessOptions;
use exprbench::backends::default_backends;

/// Run the list command.
pub fn run() {
    for backend in default_backends(&HarnessOptions::default()) {
        let check = if backend.capabilities().strings {
            "full check"
        } else {
            "reduced numeric check"
        };
        println!("{:<10}{}", backend.name(), check);
    }
}
