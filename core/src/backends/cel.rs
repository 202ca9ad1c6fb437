//! `cel-interpreter`: Common Expression Language programs.
//!
//! Helpers are added to the evaluation context as functions. A compiled
//! `Program` can list the variables and functions it references.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use ::cel_interpreter::{Context, ExecutionError, Program, Value as CelValue};
use tracing::warn;

use crate::api::{
    Backend, Capabilities, CompiledExpression, Error, HelperFn, References, Registration,
    Registry, Value,
};

const NAME: &str = "cel";

#[derive(Debug, Default)]
pub struct CelBackend {
    helpers: Vec<(&'static str, HelperFn)>,
}

impl CelBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context with the builtins plus the registered helpers.
    fn context(&self) -> Context<'static> {
        let mut context = Context::default();
        for &(name, func) in &self.helpers {
            match func {
                HelperFn::StrInt(f) => context.add_function(
                    name,
                    move |s: Arc<String>, start: i64| -> Result<CelValue, ExecutionError> {
                        f(&s, start)
                            .map(|out| CelValue::String(Arc::new(out)))
                            .map_err(|e| ExecutionError::function_error(name, e))
                    },
                ),
                HelperFn::IntInt(f) => context.add_function(name, move |a: i64, b: i64| f(a, b)),
                HelperFn::Str(f) => context.add_function(name, move |s: Arc<String>| f(&s)),
            }
        }
        context
    }
}

impl Backend for CelBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { strings: true }
    }

    fn register(&mut self, registry: &Registry) -> Registration {
        let mut registration = Registration::default();
        for helper in registry.iter() {
            self.helpers.push((helper.name, helper.func));
            registration.registered.push(helper.name);
        }
        registration
    }

    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression + '_>, Error> {
        let parse_error = |message: String| Error::Parse {
            backend: NAME,
            message,
            expression: source.to_string(),
            span: None,
        };
        // The parser panics on some malformed input instead of returning an error.
        let program = match catch_unwind(AssertUnwindSafe(|| Program::compile(source))) {
            Ok(compiled) => compiled.map_err(|e| parse_error(e.to_string()))?,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                warn!(backend = NAME, %message, "parser panicked");
                return Err(parse_error(message));
            }
        };

        Ok(Box::new(CelExpression {
            program,
            context: self.context(),
        }))
    }
}

struct CelExpression {
    program: Program,
    context: Context<'static>,
}

impl CompiledExpression for CelExpression {
    fn bind(&mut self, name: &str, value: &Value) -> Result<(), Error> {
        self.context.add_variable_from_value(name, to_cel(value));
        Ok(())
    }

    fn evaluate(&mut self) -> Result<Value, Error> {
        let result = self
            .program
            .execute(&self.context)
            .map_err(|e| Error::evaluation(NAME, e))?;
        from_cel(result)
    }

    fn references(&self) -> Option<References> {
        let refs = self.program.references();
        let mut variables = refs.variables();
        // Operators such as `_-_` are listed as functions too.
        let mut functions: Vec<_> = refs
            .functions()
            .into_iter()
            .filter(|name| is_identifier(name))
            .collect();
        // Collected from sets; sort for stable output.
        variables.sort_unstable();
        functions.sort_unstable();
        Some(References::collect(variables, functions))
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("invalid expression: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("invalid expression: {message}")
    } else {
        "invalid expression".to_string()
    }
}

fn to_cel(value: &Value) -> CelValue {
    match value {
        Value::Int(n) => CelValue::Int(*n),
        Value::Float(x) => CelValue::Float(*x),
        Value::Bool(b) => CelValue::Bool(*b),
        Value::Str(s) => CelValue::String(Arc::new(s.clone())),
    }
}

fn from_cel(value: CelValue) -> Result<Value, Error> {
    match value {
        CelValue::Int(n) => Ok(Value::Int(n)),
        CelValue::UInt(n) => i64::try_from(n)
            .map(Value::Int)
            .map_err(|e| Error::evaluation(NAME, e)),
        CelValue::Float(x) => Ok(Value::Float(x)),
        CelValue::Bool(b) => Ok(Value::Bool(b)),
        CelValue::String(s) => Ok(Value::Str(s.as_ref().clone())),
        other => Err(Error::evaluation(
            NAME,
            format!("unsupported result value {other:?}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixture::{EXPRESSION, TEST_VALUE, VARIABLE};
    use crate::stdlib::helper_registry;
    use pretty_assertions::assert_eq;

    fn backend() -> CelBackend {
        let mut backend = CelBackend::new();
        backend.register(&helper_registry().unwrap());
        backend
    }

    #[test]
    fn full_expression() {
        let backend = backend();
        let mut expr = backend.compile(EXPRESSION).unwrap();
        expr.bind(VARIABLE, &Value::str(TEST_VALUE)).unwrap();
        assert_eq!(expr.evaluate().unwrap(), Value::str("012345"));
    }

    #[test]
    fn short_input() {
        let backend = backend();
        let mut expr = backend.compile(EXPRESSION).unwrap();
        expr.bind(VARIABLE, &Value::str("AB")).unwrap();
        assert_eq!(expr.evaluate().unwrap(), Value::str("AB"));
    }

    #[test]
    fn references_from_program() {
        let backend = backend();
        let expr = backend.compile(EXPRESSION).unwrap();
        let refs = expr.references().unwrap();
        assert_eq!(refs.variables, vec!["IDENTITY_DOC_ID"]);
        assert_eq!(refs.functions, vec!["greatest", "length", "substr"]);
    }

    #[test]
    fn operators_are_not_functions() {
        assert!(is_identifier("substr"));
        assert!(is_identifier("_private"));
        assert!(!is_identifier("_-_"));
        assert!(!is_identifier("_[_]"));
        assert!(!is_identifier("!_"));
        assert!(!is_identifier(""));
    }

    #[test]
    fn malformed_expression_is_a_parse_failure() {
        let err = backend().compile("substr(IDENTITY_DOC_ID,").err().unwrap();
        assert_eq!(err.kind(), "parse failure");
        assert_eq!(err.backend(), Some(NAME));
    }

    #[test]
    fn helper_error_is_an_evaluation_failure() {
        let backend = backend();
        let mut expr = backend.compile("substr(s, 0)").unwrap();
        expr.bind("s", &Value::str("AB")).unwrap();
        let err = expr.evaluate().unwrap_err();
        assert_eq!(err.kind(), "evaluation failure");
    }

    #[test]
    fn unbound_variable() {
        let backend = backend();
        let mut expr = backend.compile(EXPRESSION).unwrap();
        assert!(expr.evaluate().is_err());
    }
}
