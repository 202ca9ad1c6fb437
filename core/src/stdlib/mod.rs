//! Helper functions exposed to the expression under test.
//!
//! - `substr(s, start)`: 1-based substring (String package)
//! - `length(s)`: length in Unicode scalar values (String package)
//! - `greatest(a, b)`: integer maximum (Int package)
//!
//! All helpers are pure. They are collected into a [`Registry`] by
//! [`register_helpers`], which every backend receives explicitly.

use crate::api::{Error, HelperError, Registry, RegistryBuilder};

pub mod int;
pub mod string;

pub use int::{greatest, register_int_helpers};
pub use string::{length, register_string_helpers, substr};

/// Register all helpers in the builder.
///
/// Order matters only for reporting: `substr`, `greatest`, `length`, as they
/// appear in the expression.
pub fn register_helpers(builder: RegistryBuilder) -> RegistryBuilder {
    let builder = string::register_substr(builder);
    let builder = register_int_helpers(builder);
    string::register_length(builder)
}

/// A registry with every helper.
pub fn helper_registry() -> Result<Registry, Error> {
    register_helpers(Registry::builder()).build()
}

/// Evaluate `substr(x, greatest(length(x) - 5, 1))` directly in Rust.
///
/// Used to compute the expected value for arbitrary inputs.
pub fn reference_eval(input: &str) -> Result<String, HelperError> {
    substr(input, greatest(length(input) - 5, 1))
}
