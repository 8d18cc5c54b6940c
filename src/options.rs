//! Configuration options for a [`Codec`](crate::Codec).
//!
//! - [`CodecOptions`]: indentation, function policy and evaluation budget
//! - [`FunctionPolicy`]: whether function values are encoded and evaluated
//!
//! ## Examples
//!
//! ```rust
//! use serde_jsonx::{Codec, CodecOptions, FunctionPolicy};
//!
//! // Pretty output, and refuse to evaluate functions found in input
//! let options = CodecOptions::pretty().with_function_policy(FunctionPolicy::Reject);
//! let codec = Codec::with_options(options);
//! ```

/// What to do with function values.
///
/// - **Evaluate**: encode functions as arrow text and compile them on decode
/// - **Reject**: fail with [`Error::UnsupportedType`](crate::Error::UnsupportedType)
///   whenever a function is encoded or a tagged function is decoded
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FunctionPolicy {
    #[default]
    Evaluate,
    Reject,
}

/// Indentation cap, matching the host serializer.
pub const MAX_INDENT: usize = 10;

/// Configuration options for encoding and decoding.
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{CodecOptions, FunctionPolicy};
///
/// let options = CodecOptions::new()
///     .with_indent(4)
///     .with_max_operations(10_000);
/// assert_eq!(options.indent, 4);
/// assert_eq!(options.functions, FunctionPolicy::Evaluate);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CodecOptions {
    /// Spaces per nesting level; `0` writes compact output.
    pub indent: usize,
    pub functions: FunctionPolicy,
    /// Script operation budget per function call; `0` is unlimited.
    pub max_operations: u64,
}

impl CodecOptions {
    /// Creates default options (compact output, functions evaluated, no budget).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for 2-space indented output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::CodecOptions;
    ///
    /// assert_eq!(CodecOptions::pretty().indent, 2);
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        CodecOptions {
            indent: 2,
            ..Default::default()
        }
    }

    /// Sets the indentation size. Values above 10 are capped at 10.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent.min(MAX_INDENT);
        self
    }

    #[must_use]
    pub fn with_function_policy(mut self, functions: FunctionPolicy) -> Self {
        self.functions = functions;
        self
    }

    /// Bounds the script operations a decoded function may perform per call.
    #[must_use]
    pub fn with_max_operations(mut self, max_operations: u64) -> Self {
        self.max_operations = max_operations;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_is_capped() {
        assert_eq!(CodecOptions::new().with_indent(25).indent, MAX_INDENT);
    }

    #[test]
    fn test_defaults() {
        let options = CodecOptions::default();
        assert_eq!(options.indent, 0);
        assert_eq!(options.functions, FunctionPolicy::Evaluate);
        assert_eq!(options.max_operations, 0);
    }
}
