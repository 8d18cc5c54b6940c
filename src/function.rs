//! Function values.
//!
//! A [`Function`] carries the textual form of a function. It can be built
//! from any of the usual shapes:
//!
//! - `function add(a, b) { return a + b; }`
//! - `add(a, b) { return a + b; }` (method shorthand)
//! - `(a, b) => a + b`
//! - `(a, b) => { return a + b; }`
//!
//! On the wire every shape is rewritten to arrow text, `(params) => body`.
//! Decoding compiles that text with the embedded [`Evaluator`], producing a
//! callable function. Closures over enclosing scopes are not captured: the
//! body only sees its own parameters.
//!
//! ```rust
//! use serde_jsonx::{Function, Value};
//!
//! let add = Function::new("function add(a, b) { return a + b + 1; }");
//! assert_eq!(add.to_arrow_source().unwrap(), "(a, b) => { return a + b + 1; }");
//! assert_eq!(add.call(&[Value::from(1), Value::from(2)]).unwrap(), Value::from(4));
//! ```

use crate::eval::{Evaluator, Program};
use crate::{Error, Result, Value};
use regex::Regex;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

/// A function value: source text plus, once compiled, a runnable program.
///
/// Two functions are equal when their arrow forms match, so
/// `function f(a) { return a; }` and `(a) => { return a; }` are the same
/// value before and after a round trip. Text without a parameter list
/// compares on its raw source.
#[derive(Clone)]
pub struct Function {
    source: String,
    canonical: String,
    program: Option<Arc<Program>>,
}

fn parameter_list() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\(.+").expect("valid regex"))
}

fn arrow_head() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\([^)]*\) *=>").expect("valid regex"))
}

fn closing_paren() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\) ?").expect("valid regex"))
}

fn arrow_form(source: &str) -> Option<String> {
    let from_params = parameter_list().find(source)?.as_str();
    if arrow_head().is_match(from_params) {
        Some(from_params.to_string())
    } else {
        Some(closing_paren().replacen(from_params, 1, ") => ").into_owned())
    }
}

impl Function {
    /// Wraps function text. Nothing is parsed or compiled yet.
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        Function {
            canonical: arrow_form(&source).unwrap_or_else(|| source.clone()),
            source,
            program: None,
        }
    }

    pub(crate) fn compiled(source: String, program: Program) -> Self {
        Function {
            canonical: arrow_form(&source).unwrap_or_else(|| source.clone()),
            source,
            program: Some(Arc::new(program)),
        }
    }

    /// The text this function was created from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns `true` once the function has been compiled by an evaluator.
    #[must_use]
    pub fn is_compiled(&self) -> bool {
        self.program.is_some()
    }

    /// Rewrites the source as arrow text.
    ///
    /// Everything before the parameter list (keyword, name) is dropped. Text
    /// already in arrow form is kept as is; otherwise `=>` is inserted after
    /// the closing parenthesis of the parameter list.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFunctionSource`] if the text has no parameter list.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::Function;
    ///
    /// let method = Function::new("fn4(a, b) { return a + b + 4; }");
    /// assert_eq!(method.to_arrow_source().unwrap(), "(a, b) => { return a + b + 4; }");
    ///
    /// let arrow = Function::new("(a, b) => a + b + 2");
    /// assert_eq!(arrow.to_arrow_source().unwrap(), "(a, b) => a + b + 2");
    ///
    /// assert!(Function::new("nothing here").to_arrow_source().is_err());
    /// ```
    pub fn to_arrow_source(&self) -> Result<String> {
        arrow_form(&self.source).ok_or_else(|| Error::invalid_function_source(&self.source))
    }

    /// Calls the function with positional arguments.
    ///
    /// Missing arguments are bound as `null`; extra arguments are ignored.
    /// A function that was never compiled is compiled first with a default
    /// [`Evaluator`].
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be reconstructed or compiled,
    /// if an argument cannot be passed to the script, or if evaluation fails.
    pub fn call(&self, args: &[Value]) -> Result<Value> {
        match &self.program {
            Some(program) => program.run(args),
            None => {
                let compiled = Evaluator::new().compile(&self.to_arrow_source()?)?;
                compiled.call(args)
            }
        }
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for Function {}

impl Hash for Function {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("source", &self.source)
            .field("compiled", &self.is_compiled())
            .finish()
    }
}
