//! Registry of helper functions exposed to expressions.
//!
//! The registry is an ordinary value: it is built once, then passed by
//! reference to each backend's [`Backend::register`](super::Backend::register).
//! Backends copy what they can express into their own function tables, so
//! no backend ever reads or writes a process-wide table.

use core::fmt;
use serde::Serialize;

use super::{Error, HelperError};

/// A helper function together with its signature.
///
/// Backends dispatch on the variant to wrap the function in their own native
/// calling convention.
#[derive(Clone, Copy)]
pub enum HelperFn {
    /// `(str, int) -> str`
    StrInt(fn(&str, i64) -> Result<String, HelperError>),
    /// `(int, int) -> int`
    IntInt(fn(i64, i64) -> i64),
    /// `(str) -> int`
    Str(fn(&str) -> i64),
}

impl HelperFn {
    pub fn arity(&self) -> usize {
        match self {
            HelperFn::StrInt(_) | HelperFn::IntInt(_) => 2,
            HelperFn::Str(_) => 1,
        }
    }

    /// Whether any parameter or the result is a string.
    pub fn uses_strings(&self) -> bool {
        matches!(self, HelperFn::StrInt(_) | HelperFn::Str(_))
    }

    pub fn signature(&self) -> &'static str {
        match self {
            HelperFn::StrInt(_) => "(str, int) -> str",
            HelperFn::IntInt(_) => "(int, int) -> int",
            HelperFn::Str(_) => "(str) -> int",
        }
    }
}

impl fmt::Debug for HelperFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HelperFn{}", self.signature())
    }
}

/// A named helper function.
#[derive(Debug, Clone, Copy)]
pub struct Helper {
    pub name: &'static str,
    pub func: HelperFn,
}

/// Builder for a [`Registry`].
///
/// Registration order is kept, and duplicate names are collected and
/// reported when [`build`](RegistryBuilder::build) is called.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    helpers: Vec<Helper>,
    duplicates: Vec<String>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a helper under `name`. Returns the builder for chaining.
    pub fn bind(mut self, name: &'static str, func: HelperFn) -> Self {
        if self.helpers.iter().any(|h| h.name == name) {
            self.duplicates.push(name.to_string());
            return self;
        }
        self.helpers.push(Helper { name, func });
        self
    }

    pub fn build(self) -> Result<Registry, Error> {
        if !self.duplicates.is_empty() {
            return Err(Error::DuplicateHelper {
                names: self.duplicates,
            });
        }
        Ok(Registry {
            helpers: self.helpers,
        })
    }
}

/// An immutable, ordered set of helper functions.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    helpers: Vec<Helper>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Helper> {
        self.helpers.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Helper> {
        self.helpers.iter().find(|h| h.name == name)
    }

    /// Helper names in registration order.
    pub fn names(&self) -> Vec<&'static str> {
        self.helpers.iter().map(|h| h.name).collect()
    }

    pub fn len(&self) -> usize {
        self.helpers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helpers.is_empty()
    }
}

/// What a backend did with the registry it was given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    /// Helpers now callable from the backend's expressions.
    pub registered: Vec<&'static str>,
    /// Helpers the backend cannot express and skipped.
    pub unsupported: Vec<&'static str>,
}

impl Registration {
    pub fn is_complete(&self) -> bool {
        self.unsupported.is_empty()
    }
}
