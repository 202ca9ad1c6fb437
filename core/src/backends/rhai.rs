//! `rhai`: an embedded scripting engine with native function registration.
//!
//! The expression is compiled into an `AST` once and evaluated against a
//! `Scope` holding the variable binding. [`EvalMode`] picks the optimizer
//! level used at compile time.

use std::ops::Range;

use ::rhai::{AST, Dynamic, Engine, EvalAltResult, OptimizationLevel, ParseError, Scope};
use tracing::debug;

use super::offset_of;
use crate::api::{
    Backend, Capabilities, CompiledExpression, Error, EvalMode, HelperFn, Registration, Registry,
    Value,
};

const NAME: &str = "rhai";

pub struct RhaiBackend {
    engine: Engine,
    mode: EvalMode,
}

impl RhaiBackend {
    pub fn new(mode: EvalMode) -> Self {
        let mut engine = Engine::new();
        engine.set_optimization_level(match mode {
            EvalMode::Interpreted => OptimizationLevel::None,
            EvalMode::Compiled => OptimizationLevel::Full,
        });
        Self { engine, mode }
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }
}

impl Default for RhaiBackend {
    fn default() -> Self {
        Self::new(EvalMode::default())
    }
}

impl Backend for RhaiBackend {
    fn name(&self) -> &'static str {
        NAME
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities { strings: true }
    }

    fn register(&mut self, registry: &Registry) -> Registration {
        let mut registration = Registration::default();
        for helper in registry.iter() {
            match helper.func {
                HelperFn::StrInt(f) => {
                    self.engine.register_fn(
                        helper.name,
                        move |s: &str, start: i64| -> Result<String, Box<EvalAltResult>> {
                            f(s, start).map_err(|e| e.to_string().into())
                        },
                    );
                }
                HelperFn::IntInt(f) => {
                    self.engine
                        .register_fn(helper.name, move |a: i64, b: i64| f(a, b));
                }
                HelperFn::Str(f) => {
                    self.engine.register_fn(helper.name, move |s: &str| f(s));
                }
            }
            registration.registered.push(helper.name);
        }
        registration
    }

    fn compile(&self, source: &str) -> Result<Box<dyn CompiledExpression + '_>, Error> {
        let ast = self
            .engine
            .compile_expression(source)
            .map_err(|e| parse_error(source, e))?;
        debug!(backend = NAME, mode = ?self.mode, "compiled AST");

        Ok(Box::new(RhaiExpression {
            engine: &self.engine,
            ast,
            scope: Scope::new(),
        }))
    }
}

fn parse_error(source: &str, err: ParseError) -> Error {
    let ParseError(kind, position) = &err;
    let span = match (position.line(), position.position()) {
        (Some(line), Some(column)) => {
            offset_of(source, line, column).and_then(|at| char_span(source, at))
        }
        _ => None,
    };
    Error::Parse {
        backend: NAME,
        message: kind.to_string(),
        expression: source.to_string(),
        span,
    }
}

/// One-character span at `at`. At end of input it covers the last character.
fn char_span(source: &str, at: usize) -> Option<Range<usize>> {
    let start = if at < source.len() {
        at
    } else {
        source.char_indices().last()?.0
    };
    let end = source[start..]
        .chars()
        .next()
        .map_or(start, |c| start + c.len_utf8());
    Some(start..end)
}

struct RhaiExpression<'a> {
    engine: &'a Engine,
    ast: AST,
    scope: Scope<'static>,
}

impl CompiledExpression for RhaiExpression<'_> {
    fn bind(&mut self, name: &str, value: &Value) -> Result<(), Error> {
        self.scope.set_value(name.to_string(), to_dynamic(value));
        Ok(())
    }

    fn evaluate(&mut self) -> Result<Value, Error> {
        let result = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut self.scope, &self.ast)
            .map_err(|e| Error::evaluation(NAME, e))?;
        from_dynamic(result)
    }
}

fn to_dynamic(value: &Value) -> Dynamic {
    match value {
        Value::Int(n) => Dynamic::from(*n),
        Value::Float(x) => Dynamic::from(*x),
        Value::Bool(b) => Dynamic::from(*b),
        Value::Str(s) => Dynamic::from(s.clone()),
    }
}

fn from_dynamic(value: Dynamic) -> Result<Value, Error> {
    let type_name = value.type_name();
    let converted = if value.is_string() {
        value.into_string().map(Value::Str)
    } else if value.is_int() {
        value.as_int().map(Value::Int)
    } else if value.is_float() {
        value.as_float().map(Value::Float)
    } else if value.is_bool() {
        value.as_bool().map(Value::Bool)
    } else {
        Err(type_name)
    };
    converted.map_err(|t| Error::evaluation(NAME, format!("unsupported result type {t}")))
}
