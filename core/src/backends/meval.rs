//! `meval`: a math-expression evaluator over `f64`.
//!
//! It has no string values, so only the integer helpers can be registered
//! and the harness runs the reduced numeric check on it.

use ::meval::{Context, Expr};
use tracing::debug;

use crate::api::{
    Backend, Capabilities, CompiledExpression, Error, HelperFn, Registration, Registry, Value,
};

const NAME: &str = "meval";

#[derive(Debug, Default)]
pub struct MevalBackend {
    binary: Vec<(&'static str, fn(i64, i64) -> i64)>,
}

impl MevalBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh context with the builtins plus the registered helpers.
    fn context(&self) -> Context<'static> {
        let mut ctx = Context::new();
        for &(name, func) in &self.binary {
            ctx.func2(name, move |a: f64, b: f64| func(a as i64, b as i64) as f64);
        }
        ctx
    }
}

impl Backend for MevalBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { strings: false }
    }

    fn register(&mut self, registry: &Registry) -> Registration {
        let mut registration = Registration::default();
        for helper in registry.iter() {
            match helper.func {
                HelperFn::IntInt(func) => {
                    self.binary.push((helper.name, func));
                    registration.registered.push(helper.name);
                }
                HelperFn::StrInt(_) | HelperFn::Str(_) => {
                    debug!(backend = NAME, helper = helper.name, "no string support");
                    registration.unsupported.push(helper.name);
                }
            }
        }
        registration
    }

    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression + '_>, Error> {
        let expr: Expr = source.parse().map_err(|e: ::meval::Error| Error::Parse {
            backend: NAME,
            message: e.to_string(),
            expression: source.to_string(),
            span: None,
        })?;

        Ok(Box::new(MevalExpression {
            backend: self,
            expr,
            bound: None,
            argument: 0.0,
        }))
    }
}

/// meval binds one variable by turning the expression into a closure.
struct MevalExpression<'a> {
    backend: &'a MevalBackend,
    expr: Expr,
    bound: Option<(String, Box<dyn Fn(f64) -> f64>)>,
    argument: f64,
}

impl CompiledExpression for MevalExpression<'_> {
    fn bind(&mut self, name: &str, value: &Value) -> Result<(), Error> {
        let argument = match value {
            Value::Int(n) => *n as f64,
            Value::Float(x) => *x,
            other => {
                return Err(Error::Unsupported {
                    backend: NAME,
                    feature: format!("{} variables", other.type_name()),
                });
            }
        };

        let rebind = !matches!(&self.bound, Some((bound, _)) if bound == name);
        if rebind {
            let func = self
                .expr
                .clone()
                .bind_with_context(self.backend.context(), name)
                .map_err(|e| Error::evaluation(NAME, e))?;
            self.bound = Some((name.to_string(), Box::new(func)));
        }
        self.argument = argument;
        Ok(())
    }

    fn evaluate(&mut self) -> Result<Value, Error> {
        let (_, func) = self
            .bound
            .as_ref()
            .ok_or_else(|| Error::evaluation(NAME, "no variable bound"))?;

        let result = func(self.argument);
        if result.is_nan() {
            return Err(Error::evaluation(NAME, "expression evaluated to NaN"));
        }
        Ok(Value::from_f64(result))
    }
}
