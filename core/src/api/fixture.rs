//! The expression under test and its expected outcome.

use serde::Serialize;

use super::{HelperError, References, Value};
use crate::stdlib;

/// The formula every string-capable backend evaluates.
pub const EXPRESSION: &str = "substr(IDENTITY_DOC_ID, greatest(length(IDENTITY_DOC_ID) - 5, 1))";

/// Name of the single input variable of [`EXPRESSION`].
pub const VARIABLE: &str = "IDENTITY_DOC_ID";

/// Default input. Length 15, so `greatest(10, 1) = 10` and `substr(_, 10)`
/// keeps the last six characters.
pub const TEST_VALUE: &str = "123456789012345";

pub const EXPECTED: &str = "012345";

/// Reduced check for backends that only handle numbers.
pub const NUMERIC_EXPRESSION: &str = "greatest(LENGTH - 5, 1)";

/// Input variable of [`NUMERIC_EXPRESSION`]: the length of the string input.
pub const NUMERIC_VARIABLE: &str = "LENGTH";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Fixture {
    pub expression: &'static str,
    pub variable: &'static str,
    pub input: Value,
    pub expected: Value,
    /// Functions the expression calls, reported for backends that cannot
    /// list them from a compiled expression.
    pub functions: &'static [&'static str],
}

impl Fixture {
    /// [`EXPRESSION`] over [`TEST_VALUE`], expecting [`EXPECTED`].
    pub fn standard() -> Self {
        Self {
            expression: EXPRESSION,
            variable: VARIABLE,
            input: Value::str(TEST_VALUE),
            expected: Value::str(EXPECTED),
            functions: &["substr", "greatest", "length"],
        }
    }

    /// [`EXPRESSION`] over `input`, with the expected value computed by the
    /// helper functions themselves.
    pub fn with_input(input: &str) -> Result<Self, HelperError> {
        Ok(Self {
            input: Value::str(input),
            expected: Value::Str(stdlib::reference_eval(input)?),
            ..Self::standard()
        })
    }

    /// The numeric-only counterpart of this fixture: [`NUMERIC_EXPRESSION`]
    /// with `LENGTH` bound to the length of the string input.
    pub fn numeric(&self) -> Self {
        let length = match &self.input {
            Value::Str(s) => stdlib::length(s),
            other => other.as_int().unwrap_or(0),
        };
        Self {
            expression: NUMERIC_EXPRESSION,
            variable: NUMERIC_VARIABLE,
            input: Value::Int(length),
            expected: Value::Int(stdlib::greatest(length - 5, 1)),
            functions: &["greatest"],
        }
    }

    /// Variables and functions as declared by the fixture.
    pub fn references(&self) -> References {
        References {
            variables: vec![self.variable.to_string()],
            functions: self.functions.iter().map(|f| f.to_string()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn standard_matches_computed_expectation() {
        assert_eq!(Fixture::with_input(TEST_VALUE).unwrap(), Fixture::standard());
    }

    #[test]
    fn short_input_keeps_whole_string() {
        let fixture = Fixture::with_input("AB").unwrap();
        assert_eq!(fixture.expected, Value::str("AB"));
    }

    #[test]
    fn numeric_check_for_standard_input() {
        let numeric = Fixture::standard().numeric();
        assert_eq!(numeric.expression, "greatest(LENGTH - 5, 1)");
        assert_eq!(numeric.input, Value::Int(15));
        assert_eq!(numeric.expected, Value::Int(10));
    }

    #[test]
    fn numeric_check_for_short_input() {
        let numeric = Fixture::with_input("AB").unwrap().numeric();
        assert_eq!(numeric.input, Value::Int(2));
        assert_eq!(numeric.expected, Value::Int(1));
    }

    #[test]
    fn declared_references() {
        let refs = Fixture::standard().references();
        assert_eq!(refs.variables, vec!["IDENTITY_DOC_ID"]);
        assert_eq!(refs.functions, vec!["substr", "greatest", "length"]);
    }
}
