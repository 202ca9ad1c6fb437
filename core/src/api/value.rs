//! Backend-neutral values.
//!
//! Every backend converts its own result type into [`Value`] so results can
//! be compared against the fixture and printed the same way.

use core::fmt;
use serde::Serialize;

/// A value crossing the boundary between the harness and a backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Convert a float coming from a numeric-only backend.
    ///
    /// Finite floats without a fractional part become [`Value::Int`], so the
    /// numeric check can be compared against integer expectations.
    pub fn from_f64(f: f64) -> Self {
        if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
            Value::Int(f as i64)
        } else {
            Value::Float(f)
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_become_ints() {
        assert_eq!(Value::from_f64(10.0), Value::Int(10));
        assert_eq!(Value::from_f64(-3.0), Value::Int(-3));
        assert_eq!(Value::from_f64(2.5), Value::Float(2.5));
        assert!(matches!(Value::from_f64(f64::INFINITY), Value::Float(_)));
    }

    #[test]
    fn strings_display_without_quotes() {
        assert_eq!(Value::str("012345").to_string(), "012345");
        assert_eq!(Value::Int(10).to_string(), "10");
    }
}
