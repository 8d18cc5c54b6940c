//! Embedded script evaluator for function values.
//!
//! Decoding a tagged function means running its text as code. The crate
//! embeds a [Rhai](https://rhai.rs) engine for that: the arrow text is split
//! into its parameter names and body, and the body is compiled as a script.
//!
//! # Script dialect
//!
//! Bodies are Rhai, not JavaScript. Simple arithmetic, `return` and blocks
//! read the same, but some things differ:
//!
//! - Integer operands use integer arithmetic, so `1 / 2` is `0`. Write
//!   `1.0 / 2` for a float result.
//! - Locals are declared with `let`; `var` is a reserved word and fails to
//!   compile.
//! - There is no `===`. Use `==`, which never coerces between types.
//! - Missing arguments are `()`, not `undefined`.
//!
//! # Security
//!
//! Compiling and calling decoded functions executes whatever the text says,
//! with every capability the engine exposes. Nothing is sandboxed or
//! allow-listed. Only decode input you trust, or configure
//! [`FunctionPolicy::Reject`](crate::FunctionPolicy::Reject).
//!
//! ```rust
//! use serde_jsonx::{Evaluator, Value};
//!
//! let evaluator = Evaluator::new();
//! let f = evaluator.compile("(a, b) => { return a + b + 3; }").unwrap();
//! assert_eq!(f.call(&[Value::from(1), Value::from(2)]).unwrap(), Value::from(6));
//! ```

use crate::{Error, Function, Number, ObjectMap, Result, Value};
use rhai::{Dynamic, Engine, Scope, AST};
use std::fmt;
use std::sync::Arc;

/// Compiles arrow text into callable [`Function`]s.
///
/// Cloning is cheap; clones share one engine.
#[derive(Clone)]
pub struct Evaluator {
    engine: Arc<Engine>,
}

impl Evaluator {
    /// Creates an evaluator with no operation budget.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_operations(0)
    }

    /// Creates an evaluator that aborts a call after `max_operations`
    /// script operations. `0` means unlimited.
    #[must_use]
    pub fn with_max_operations(max_operations: u64) -> Self {
        let mut engine = Engine::new();
        engine.set_max_operations(max_operations);
        Evaluator {
            engine: Arc::new(engine),
        }
    }

    /// Compiles arrow text, `(a, b) => body`, into a callable function.
    ///
    /// # Errors
    ///
    /// [`Error::Eval`] if the text is not arrow-shaped, a parameter is not a
    /// plain identifier, or the body does not compile.
    pub fn compile(&self, text: &str) -> Result<Function> {
        let (params, body) = split_arrow(text)?;
        let ast = self.engine.compile(body).map_err(Error::eval)?;

        tracing::debug!(params = params.len(), "compiled function body");

        Ok(Function::compiled(
            text.to_string(),
            Program {
                params,
                ast,
                engine: Arc::clone(&self.engine),
            },
        ))
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluator").finish_non_exhaustive()
    }
}

/// A compiled function body and the engine that runs it.
pub(crate) struct Program {
    params: Vec<String>,
    ast: AST,
    engine: Arc<Engine>,
}

impl Program {
    pub(crate) fn run(&self, args: &[Value]) -> Result<Value> {
        let mut scope = Scope::new();
        for (index, name) in self.params.iter().enumerate() {
            let arg = match args.get(index) {
                Some(value) => to_dynamic(value)?,
                None => Dynamic::UNIT,
            };
            scope.push_dynamic(name.as_str(), arg);
        }

        let result = self
            .engine
            .eval_ast_with_scope::<Dynamic>(&mut scope, &self.ast)
            .map_err(Error::eval)?;
        from_dynamic(result)
    }
}

fn split_arrow(text: &str) -> Result<(Vec<String>, &str)> {
    let rest = text
        .trim_start()
        .strip_prefix('(')
        .ok_or_else(|| Error::eval("function text must start with a parameter list"))?;
    let close = rest
        .find(')')
        .ok_or_else(|| Error::eval("unterminated parameter list"))?;
    let body = rest[close + 1..]
        .trim_start()
        .strip_prefix("=>")
        .ok_or_else(|| Error::eval("expected `=>` after the parameter list"))?
        .trim();
    if body.is_empty() {
        return Err(Error::eval("function body is empty"));
    }

    let params = rest[..close]
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            if is_identifier(p) {
                Ok(p.to_string())
            } else {
                Err(Error::eval(format!("unsupported parameter `{}`", p)))
            }
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((params, body))
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn to_dynamic(value: &Value) -> Result<Dynamic> {
    Ok(match value {
        Value::Null => Dynamic::UNIT,
        Value::Bool(b) => Dynamic::from_bool(*b),
        Value::Number(Number::Integer(i)) => Dynamic::from_int(*i),
        Value::Number(Number::Float(f)) => Dynamic::from_float(*f),
        Value::String(s) => Dynamic::from(s.clone()),
        Value::Array(items) => Dynamic::from_array(
            items
                .iter()
                .map(to_dynamic)
                .collect::<Result<rhai::Array>>()?,
        ),
        Value::Set(set) => {
            Dynamic::from_array(set.iter().map(to_dynamic).collect::<Result<rhai::Array>>()?)
        }
        Value::Object(obj) => {
            let mut map = rhai::Map::new();
            for (key, value) in obj.iter() {
                map.insert(key.as_str().into(), to_dynamic(value)?);
            }
            Dynamic::from_map(map)
        }
        Value::Map(_) | Value::Function(_) => {
            return Err(Error::unsupported_type(&format!(
                "{} cannot be passed to a script function",
                value.kind()
            )))
        }
    })
}

fn from_dynamic(value: Dynamic) -> Result<Value> {
    if value.is_unit() {
        return Ok(Value::Null);
    }
    if let Ok(b) = value.as_bool() {
        return Ok(Value::Bool(b));
    }
    if let Ok(i) = value.as_int() {
        return Ok(Value::from(i));
    }
    if let Ok(f) = value.as_float() {
        return Ok(Value::from(f));
    }
    if let Ok(c) = value.as_char() {
        return Ok(Value::String(c.to_string()));
    }

    let type_name = value.type_name();
    if value.is_string() {
        return value.into_string().map(Value::String).map_err(Error::eval);
    }
    if value.is_array() {
        let items = value.into_array().map_err(Error::eval)?;
        return items
            .into_iter()
            .map(from_dynamic)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array);
    }
    if let Some(map) = value.try_cast::<rhai::Map>() {
        let mut obj = ObjectMap::with_capacity(map.len());
        for (key, value) in map {
            obj.insert(key.to_string(), from_dynamic(value)?);
        }
        return Ok(Value::Object(obj));
    }

    Err(Error::unsupported_type(&format!(
        "script returned a value of type `{}`",
        type_name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_arrow() {
        let (params, body) = split_arrow("(a, b) => a + b").unwrap();
        assert_eq!(params, vec!["a", "b"]);
        assert_eq!(body, "a + b");

        let (params, body) = split_arrow("() => { 1 }").unwrap();
        assert!(params.is_empty());
        assert_eq!(body, "{ 1 }");
    }

    #[test]
    fn test_split_arrow_rejects_non_arrow() {
        assert!(matches!(split_arrow("a + b"), Err(Error::Eval(_))));
        assert!(matches!(split_arrow("(a, b) { a }"), Err(Error::Eval(_))));
        assert!(matches!(split_arrow("(a = 1) => a"), Err(Error::Eval(_))));
        assert!(matches!(split_arrow("(a) =>   "), Err(Error::Eval(_))));
    }

    #[test]
    fn test_compile_error_is_eval_error() {
        let err = Evaluator::new().compile("(a) => a +* ").unwrap_err();
        assert!(matches!(err, Error::Eval(_)));
    }

    #[test]
    fn test_missing_argument_is_null() {
        let f = Evaluator::new().compile(r#"(a, b) => type_of(b) == "()""#).unwrap();
        assert_eq!(f.call(&[Value::from(1)]).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_structured_arguments_and_results() {
        let f = Evaluator::new()
            .compile("(list, obj) => [list.len(), obj.name]")
            .unwrap();
        let mut obj = ObjectMap::new();
        obj.insert("name".to_string(), Value::from("Alice"));
        let result = f
            .call(&[
                Value::Array(vec![Value::from(1), Value::from(2)]),
                Value::Object(obj),
            ])
            .unwrap();
        assert_eq!(
            result,
            Value::Array(vec![Value::from(2), Value::from("Alice")])
        );
    }

    #[test]
    fn test_float_arithmetic() {
        let f = Evaluator::new().compile("(a) => a * 2.0").unwrap();
        assert_eq!(f.call(&[Value::from(1.25)]).unwrap(), Value::from(2.5));
    }

    #[test]
    fn test_integer_division_truncates() {
        let f = Evaluator::new().compile("(a, b) => a / b").unwrap();
        assert_eq!(f.call(&[Value::from(1), Value::from(2)]).unwrap(), Value::from(0));
        assert_eq!(
            f.call(&[Value::from(1.0), Value::from(2.0)]).unwrap(),
            Value::from(0.5)
        );
    }

    #[test]
    fn test_javascript_only_syntax_fails_to_compile() {
        let evaluator = Evaluator::new();
        assert!(matches!(
            evaluator.compile("(a) => { var x = a; return x; }"),
            Err(Error::Eval(_))
        ));
        assert!(matches!(evaluator.compile("(a) => a === 1"), Err(Error::Eval(_))));
    }

    #[test]
    fn test_map_argument_is_rejected() {
        let f = Evaluator::new().compile("(m) => m").unwrap();
        let err = f
            .call(&[Value::Map(crate::ValueMap::new())])
            .unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }

    #[test]
    fn test_operation_budget() {
        let f = Evaluator::with_max_operations(1_000)
            .compile("(n) => { let x = 0; loop { x += 1; } }")
            .unwrap();
        assert!(matches!(f.call(&[Value::Null]), Err(Error::Eval(_))));
    }
}
