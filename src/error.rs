//! Error types for extended JSON encoding and decoding.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: Invalid JSON text, with line/column information
//! - **Function Errors**: Function text without a parameter list (encode time)
//!   or script text that fails to compile or run (decode/call time)
//! - **Malformed Tags**: A tagged object whose payload field is missing or mistyped
//! - **Unsupported Types**: Values a configuration or the evaluator cannot accept
//! - **I/O Errors**: Reader/writer failures
//!
//! ## Examples
//!
//! ```rust
//! use serde_jsonx::{Codec, Error};
//!
//! let codec = Codec::new();
//! let result = codec.parse("{\"open\": [1, 2");
//! assert!(matches!(result, Err(Error::Syntax { .. })));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while encoding or decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// JSON syntax error
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// Function text that has no parameter list to reconstruct from
    #[error("Invalid function source: {0}")]
    InvalidFunctionSource(String),

    /// Script compilation or evaluation failure
    #[error("Evaluation error: {0}")]
    Eval(String),

    /// Tagged object with a missing or mistyped payload field
    #[error("Malformed serialized {kind}: {msg}")]
    MalformedTag { kind: &'static str, msg: String },

    /// Value kind rejected by configuration or unsupported by the target
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error with line and column information.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::Error;
    ///
    /// let err = Error::syntax(10, 5, "expected value");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates an error for function text that cannot be reconstructed.
    pub fn invalid_function_source(source: &str) -> Self {
        Error::InvalidFunctionSource(format!("no parameter list in `{}`", source))
    }

    /// Creates an evaluation error.
    pub fn eval<T: fmt::Display>(msg: T) -> Self {
        Error::Eval(msg.to_string())
    }

    /// Creates an error for a tagged object whose payload is malformed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::Error;
    ///
    /// let err = Error::malformed_tag("map", "`entries` is not an array");
    /// assert!(err.to_string().contains("serialized map"));
    /// ```
    pub fn malformed_tag(kind: &'static str, msg: &str) -> Self {
        Error::MalformedTag {
            kind,
            msg: msg.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;

        match err.classify() {
            Category::Io => Error::io(&err.to_string()),
            Category::Syntax | Category::Eof => {
                Error::syntax(err.line(), err.column(), &err.to_string())
            }
            Category::Data => Error::custom(err),
        }
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
