//! String helpers
//!
//! Design notes:
//! - Lengths and positions count Unicode scalar values (chars), not bytes
//! - `substr` is 1-based and takes the rest of the string

use crate::api::{HelperError, HelperFn, RegistryBuilder};

/// Substring starting at the 1-based position `start`.
///
/// `substr(s, 1)` is the whole string and `substr(s, length(s) + 1)` is the
/// empty string. Anything outside `1..=length(s) + 1` is an error.
pub fn substr(s: &str, start: i64) -> Result<String, HelperError> {
    let len = s.chars().count();
    let out_of_range = HelperError::StartOutOfRange { start, len };

    let skip = start
        .checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .ok_or(out_of_range.clone())?;
    if skip > len {
        return Err(out_of_range);
    }

    Ok(s.chars().skip(skip).collect())
}

/// Number of chars in `s`.
pub fn length(s: &str) -> i64 {
    s.chars().count() as i64
}

pub(crate) fn register_substr(builder: RegistryBuilder) -> RegistryBuilder {
    builder.bind("substr", HelperFn::StrInt(substr))
}

pub(crate) fn register_length(builder: RegistryBuilder) -> RegistryBuilder {
    builder.bind("length", HelperFn::Str(length))
}

/// Register `substr` and `length`.
pub fn register_string_helpers(builder: RegistryBuilder) -> RegistryBuilder {
    register_length(register_substr(builder))
}

#[cfg(test)]
#[path = "string_test.rs"]
mod string_test;
