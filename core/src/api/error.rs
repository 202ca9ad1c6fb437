//! Error types of the harness.
//!
//! [`Error`] is what a backend run fails with. None of its variants abort a
//! benchmark run: the harness stores them in the backend's report and moves
//! on to the next backend.

use core::ops::Range;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Error {
    /// The backend could not compile the expression text.
    #[error("{backend}: parse failure: {message}")]
    Parse {
        backend: &'static str,
        message: String,
        /// The expression that failed to compile.
        expression: String,
        /// Byte range of the offending text, when the library reports one.
        span: Option<Range<usize>>,
    },

    /// A compiled expression failed while binding or evaluating.
    #[error("{backend}: evaluation failure: {message}")]
    Evaluation {
        backend: &'static str,
        message: String,
    },

    /// The backend lacks a capability the request needs.
    #[error("{backend}: unsupported feature: {feature}")]
    Unsupported {
        backend: &'static str,
        feature: String,
    },

    /// The same helper name was registered more than once.
    #[error("duplicate helper registration: {}", names.join(", "))]
    DuplicateHelper { names: Vec<String> },
}

impl Error {
    pub fn evaluation(backend: &'static str, message: impl ToString) -> Self {
        Error::Evaluation {
            backend,
            message: message.to_string(),
        }
    }

    /// The backend this error came from, if any.
    pub fn backend(&self) -> Option<&'static str> {
        match self {
            Error::Parse { backend, .. }
            | Error::Evaluation { backend, .. }
            | Error::Unsupported { backend, .. } => Some(*backend),
            Error::DuplicateHelper { .. } => None,
        }
    }

    /// Short label for the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Parse { .. } => "parse failure",
            Error::Evaluation { .. } => "evaluation failure",
            Error::Unsupported { .. } => "unsupported feature",
            Error::DuplicateHelper { .. } => "registry error",
        }
    }
}

/// Failure raised by a helper function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HelperError {
    /// `substr` was asked to start before the first or past the last character.
    #[error("substr start {start} is out of range for a string of length {len}")]
    StartOutOfRange { start: i64, len: usize },
}
