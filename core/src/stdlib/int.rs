//! Int helpers
//!
//! Functions:
//! - `greatest(a, b)`: the larger of two integers

use crate::api::{HelperFn, RegistryBuilder};

/// Returns `a` when `a >= b`, otherwise `b`.
///
/// Ties go to the first argument.
pub fn greatest(a: i64, b: i64) -> i64 {
    if a >= b { a } else { b }
}

/// Register `greatest`.
pub fn register_int_helpers(builder: RegistryBuilder) -> RegistryBuilder {
    builder.bind("greatest", HelperFn::IntInt(greatest))
}

#[cfg(test)]
#[path = "int_test.rs"]
mod int_test;
