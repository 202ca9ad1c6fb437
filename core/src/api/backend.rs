//! The seam between the harness and an expression library.

use serde::Serialize;

use super::{Error, Registration, Registry, Value};

/// What a backend can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Whether string values and string helpers are available.
    pub strings: bool,
}

/// An expression-evaluation library under comparison.
pub trait Backend {
    /// Stable lowercase name, used in reports and on the command line.
    fn name(&self) -> &'static str;

    fn capabilities(&self) -> Capabilities;

    /// Install every helper of `registry` this backend can express.
    ///
    /// Helpers that cannot be expressed are skipped and listed in
    /// [`Registration::unsupported`]; this is never an error.
    fn register(&mut self, registry: &Registry) -> Registration;

    /// Compile `source` once. The returned handle is evaluated repeatedly.
    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression + '_>, Error>;
}

/// A compiled expression with its own variable bindings.
pub trait CompiledExpression {
    /// Bind (or rebind) a variable for subsequent evaluations.
    fn bind(&mut self, name: &str, value: &Value) -> Result<(), Error>;

    fn evaluate(&mut self) -> Result<Value, Error>;

    /// Variables and functions the expression refers to, when the library can
    /// tell.
    fn references(&self) -> Option<References> {
        None
    }
}

/// Names referenced by an expression.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct References {
    pub variables: Vec<String>,
    pub functions: Vec<String>,
}

impl References {
    /// Collect names, keeping the first occurrence of each.
    pub fn collect<'a>(
        variables: impl IntoIterator<Item = &'a str>,
        functions: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        fn dedup<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
            let mut out: Vec<String> = Vec::new();
            for name in names {
                if !out.iter().any(|n| n == name) {
                    out.push(name.to_string());
                }
            }
            out
        }

        Self {
            variables: dedup(variables),
            functions: dedup(functions),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_dedups_in_order() {
        let refs = References::collect(
            ["ID", "ID"],
            ["substr", "greatest", "length", "greatest"],
        );
        assert_eq!(refs.variables, vec!["ID"]);
        assert_eq!(refs.functions, vec!["substr", "greatest", "length"]);
    }
}
