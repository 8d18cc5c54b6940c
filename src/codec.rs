//! The stringify/parse facade.
//!
//! A [`Codec`] owns a [`TagScheme`], a set of [`CodecOptions`] and an
//! [`Evaluator`], and pre-wires the [`Encoder`] and [`Decoder`] hooks into
//! the tree walker. It is the entry point most callers need.
//!
//! ```rust
//! use serde_jsonx::{jsonx, Codec, Value};
//!
//! let codec = Codec::new();
//! let original = jsonx!({
//!     "scores": (map { 1 => "gold", 2 => "silver" }),
//!     "seen": (set ["a", "b", "a"])
//! });
//!
//! let text = codec.stringify(&original, None).unwrap();
//! let restored = codec.parse(&text).unwrap();
//! assert_eq!(restored, original);
//! assert_eq!(restored.get("seen").and_then(Value::as_set).map(|s| s.len()), Some(2));
//! ```

use crate::de::{from_str_with, parse_json};
use crate::decode::Decoder;
use crate::encode::Encoder;
use crate::eval::Evaluator;
use crate::options::{CodecOptions, FunctionPolicy};
use crate::ser::{to_string_with, write_json};
use crate::tags::TagScheme;
use crate::walk::{walk, Key};
use crate::{Result, Value};
use std::io;

/// Encoder and decoder wired to one tag scheme.
///
/// Two codecs only understand each other's output if they share a token;
/// see [`TagScheme::with_token`].
#[derive(Clone, Debug)]
pub struct Codec {
    tags: TagScheme,
    options: CodecOptions,
    evaluator: Evaluator,
}

impl Codec {
    /// Creates a codec with a fresh random tag scheme and default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_options(CodecOptions::default())
    }

    #[must_use]
    pub fn with_options(options: CodecOptions) -> Self {
        Self::with_tags(TagScheme::new(), options)
    }

    /// Creates a codec around an existing tag scheme.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::{jsonx, Codec, CodecOptions, TagScheme};
    ///
    /// let writer = Codec::with_tags(TagScheme::with_token("shared").unwrap(), CodecOptions::new());
    /// let reader = Codec::with_tags(TagScheme::with_token("shared").unwrap(), CodecOptions::new());
    ///
    /// let value = jsonx!((set [1, 2]));
    /// let text = writer.stringify(&value, None).unwrap();
    /// assert_eq!(reader.parse(&text).unwrap(), value);
    /// ```
    #[must_use]
    pub fn with_tags(tags: TagScheme, options: CodecOptions) -> Self {
        let evaluator = Evaluator::with_max_operations(options.max_operations);
        Codec {
            tags,
            options,
            evaluator,
        }
    }

    #[must_use]
    pub fn tags(&self) -> &TagScheme {
        &self.tags
    }

    #[must_use]
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    /// The replacer hook, for use with [`to_string_with`].
    #[must_use]
    pub fn encoder(&self) -> Encoder<'_> {
        Encoder::new(&self.tags).with_function_policy(self.options.functions)
    }

    /// The reviver hook, for use with [`from_str_with`].
    #[must_use]
    pub fn decoder(&self) -> Decoder<'_> {
        match self.options.functions {
            FunctionPolicy::Evaluate => Decoder::new(&self.tags, &self.evaluator),
            FunctionPolicy::Reject => Decoder::without_functions(&self.tags),
        }
    }

    /// Encodes `value` to JSON text.
    ///
    /// `indent` overrides the configured indentation for this call; `Some(0)`
    /// is compact and anything above 10 is capped at 10.
    ///
    /// # Errors
    ///
    /// Returns an error if a function cannot be encoded.
    pub fn stringify(&self, value: &Value, indent: Option<usize>) -> Result<String> {
        let encoder = self.encoder();
        to_string_with(
            value,
            |key: Key<'_>, value: Value| encoder.encode(key, value),
            indent.unwrap_or(self.options.indent),
        )
    }

    /// Decodes JSON text, reconstructing maps, sets and functions.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON, malformed tagged payloads, or
    /// function text that does not compile.
    pub fn parse(&self, text: &str) -> Result<Value> {
        let decoder = self.decoder();
        from_str_with(text, |key: Key<'_>, value: Value| decoder.decode(key, value))
    }

    /// Encodes `value` into `writer` with the configured indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails or the writer does.
    pub fn to_writer<W: io::Write>(&self, mut writer: W, value: &Value) -> Result<()> {
        let text = self.stringify(value, None)?;
        writer
            .write_all(text.as_bytes())
            .map_err(|e| crate::Error::io(&e.to_string()))
    }

    /// Reads JSON from `reader` and decodes it.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or decoding fails.
    pub fn from_reader<R: io::Read>(&self, reader: R) -> Result<Value> {
        let parsed = parse_json(serde_json::de::IoRead::new(reader))?;
        let decoder = self.decoder();
        walk(Key::Root, parsed, &|key: Key<'_>, value: Value| {
            decoder.decode(key, value)
        })
    }

    /// Writes `value` as JSON without encoding anything. Maps and sets come
    /// out as `{}` and functions as `null`, the way a plain JSON writer
    /// treats them.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn stringify_plain(&self, value: &Value) -> Result<String> {
        write_json(value, self.options.indent)
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}
