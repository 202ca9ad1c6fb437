//! `evalexpr`: operator trees evaluated against a mutable context.
//!
//! Helpers become context functions. Each compiled expression gets its own
//! copy of the context so variable bindings stay local to it.

use ::evalexpr::{
    ContextWithMutableFunctions, ContextWithMutableVariables, EvalexprError, Function,
    HashMapContext, Node, Value as NativeValue, build_operator_tree,
};
use tracing::warn;

use crate::api::{
    Backend, Capabilities, CompiledExpression, Error, HelperFn, References, Registration,
    Registry, Value,
};

const NAME: &str = "evalexpr";

#[derive(Debug, Default)]
pub struct EvalexprBackend {
    context: HashMapContext,
}

impl EvalexprBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

fn native_function(func: HelperFn) -> Function {
    match func {
        HelperFn::StrInt(f) => Function::new(move |argument| {
            let args = argument.as_fixed_len_tuple(2)?;
            let s = args[0].as_string()?;
            let start = args[1].as_int()?;
            f(&s, start)
                .map(NativeValue::String)
                .map_err(|e| EvalexprError::CustomMessage(e.to_string()))
        }),
        HelperFn::IntInt(f) => Function::new(move |argument| {
            let args = argument.as_fixed_len_tuple(2)?;
            Ok(NativeValue::Int(f(args[0].as_int()?, args[1].as_int()?)))
        }),
        HelperFn::Str(f) => Function::new(move |argument| {
            Ok(NativeValue::Int(f(&argument.as_string()?)))
        }),
    }
}

impl Backend for EvalexprBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { strings: true }
    }

    fn register(&mut self, registry: &Registry) -> Registration {
        let mut registration = Registration::default();
        for helper in registry.iter() {
            match self
                .context
                .set_function(helper.name.to_string(), native_function(helper.func))
            {
                Ok(()) => registration.registered.push(helper.name),
                Err(e) => {
                    warn!(backend = NAME, helper = helper.name, error = %e, "cannot register");
                    registration.unsupported.push(helper.name);
                }
            }
        }
        registration
    }

    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression + '_>, Error> {
        let node = build_operator_tree(source).map_err(|e| Error::Parse {
            backend: NAME,
            message: e.to_string(),
            expression: source.to_string(),
            span: None,
        })?;

        Ok(Box::new(EvalexprExpression {
            node,
            context: self.context.clone(),
        }))
    }
}

struct EvalexprExpression {
    node: Node,
    context: HashMapContext,
}

impl CompiledExpression for EvalexprExpression {
    fn bind(&mut self, name: &str, value: &Value) -> Result<(), Error> {
        self.context
            .set_value(name.to_string(), to_native(value))
            .map_err(|e| Error::evaluation(NAME, e))
    }

    fn evaluate(&mut self) -> Result<Value, Error> {
        let result = self
            .node
            .eval_with_context(&self.context)
            .map_err(|e| Error::evaluation(NAME, e))?;
        from_native(result)
    }

    fn references(&self) -> Option<References> {
        Some(References::collect(
            self.node.iter_variable_identifiers(),
            self.node.iter_function_identifiers(),
        ))
    }
}

fn to_native(value: &Value) -> NativeValue {
    match value {
        Value::Int(n) => NativeValue::Int(*n),
        Value::Float(x) => NativeValue::Float(*x),
        Value::Bool(b) => NativeValue::Boolean(*b),
        Value::Str(s) => NativeValue::String(s.clone()),
    }
}

fn from_native(value: NativeValue) -> Result<Value, Error> {
    match value {
        NativeValue::Int(n) => Ok(Value::Int(n)),
        NativeValue::Float(x) => Ok(Value::Float(x)),
        NativeValue::Boolean(b) => Ok(Value::Bool(b)),
        NativeValue::String(s) => Ok(Value::Str(s)),
        other => Err(Error::evaluation(
            NAME,
            format!("unsupported result value {other}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fixture::{EXPRESSION, TEST_VALUE, VARIABLE};
    use crate::stdlib::helper_registry;
    use pretty_assertions::assert_eq;

    fn backend() -> EvalexprBackend {
        let mut backend = EvalexprBackend::new();
        let registration = backend.register(&helper_registry().unwrap());
        assert!(registration.is_complete());
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
    fn references_from_operator_tree() {
        let backend = backend();
        let expr = backend.compile(EXPRESSION).unwrap();
        let refs = expr.references().unwrap();
        assert_eq!(refs.variables, vec!["IDENTITY_DOC_ID"]);
        let mut functions = refs.functions.clone();
        functions.sort();
        assert_eq!(functions, vec!["greatest", "length", "substr"]);
    }

    #[test]
    fn helper_errors_surface_as_evaluation_failures() {
        let backend = backend();
        let mut expr = backend.compile("substr(s, 0)").unwrap();
        expr.bind("s", &Value::str("AB")).unwrap();
        let err = expr.evaluate().unwrap_err();
        assert_eq!(err.kind(), "evaluation failure");
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn unbalanced_parenthesis() {
        let err = backend().compile("substr(s, 1").err().unwrap();
        assert_eq!(err.kind(), "parse failure");
    }
}
