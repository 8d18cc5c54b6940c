//! The replacer hook: maps, sets and functions to tagged objects.
//!
//! Run through [`to_string_with`](crate::to_string_with) (or simply
//! [`Codec::stringify`](crate::Codec::stringify)), the [`Encoder`] rewrites
//! every value JSON cannot carry into a plain object flagged with a marker:
//!
//! ```text
//! Map      {"isSerializedMap<token>": true, "entries": [[k, v], ...]}
//! Set      {"isSerializedSet<token>": true, "values": [v, ...]}
//! Function {"isSerializedFunction<token>": true, "value": "(a, b) => ..."}
//! ```
//!
//! The tree walker treats maps and sets as leaves, so the encoder walks each
//! key, value and member itself before wrapping them. Special values nested
//! at any depth are therefore encoded too.

use crate::options::FunctionPolicy;
use crate::tags::{TagKind, TagScheme};
use crate::walk::{walk, Key};
use crate::{Error, Function, ObjectMap, Result, Value, ValueMap, ValueSet};

/// Replacer hook bound to a tag scheme.
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{to_string_with, Encoder, Key, TagScheme, Value, ValueMap};
///
/// let tags = TagScheme::with_token("t").unwrap();
/// let encoder = Encoder::new(&tags);
///
/// let mut map = ValueMap::new();
/// map.insert(Value::from(1), Value::from("one"));
///
/// let text = to_string_with(&Value::Map(map), |k: Key<'_>, v: Value| encoder.encode(k, v), 0).unwrap();
/// assert_eq!(text, r#"{"isSerializedMapt":true,"entries":[[1,"one"]]}"#);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Encoder<'a> {
    tags: &'a TagScheme,
    functions: FunctionPolicy,
}

impl<'a> Encoder<'a> {
    /// Creates an encoder that encodes functions.
    #[must_use]
    pub fn new(tags: &'a TagScheme) -> Self {
        Encoder {
            tags,
            functions: FunctionPolicy::Evaluate,
        }
    }

    #[must_use]
    pub fn with_function_policy(mut self, functions: FunctionPolicy) -> Self {
        self.functions = functions;
        self
    }

    #[must_use]
    pub fn tags(&self) -> &'a TagScheme {
        self.tags
    }

    /// Encodes one node. Maps, then sets, then functions are rewritten;
    /// everything else comes back unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFunctionSource`] for function text with no
    ///   parameter list
    /// - [`Error::UnsupportedType`] for any function under
    ///   [`FunctionPolicy::Reject`]
    pub fn encode(&self, _key: Key<'_>, value: Value) -> Result<Value> {
        match value {
            Value::Map(map) => self.encode_map(map),
            Value::Set(set) => self.encode_set(set),
            Value::Function(function) => self.encode_function(&function),
            other => Ok(other),
        }
    }

    fn encode_map(&self, map: ValueMap) -> Result<Value> {
        tracing::trace!(entries = map.len(), "encoding map");

        let entries = map
            .into_iter()
            .map(|(key, value)| {
                let key = self.encode_member(Key::Index(0), key)?;
                let value = self.encode_member(Key::Index(1), value)?;
                Ok(Value::Array(vec![key, value]))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(self.tagged(TagKind::Map, "entries", Value::Array(entries)))
    }

    fn encode_set(&self, set: ValueSet) -> Result<Value> {
        tracing::trace!(values = set.len(), "encoding set");

        let values = set
            .into_iter()
            .enumerate()
            .map(|(index, member)| self.encode_member(Key::Index(index), member))
            .collect::<Result<Vec<_>>>()?;

        Ok(self.tagged(TagKind::Set, "values", Value::Array(values)))
    }

    fn encode_function(&self, function: &Function) -> Result<Value> {
        if self.functions == FunctionPolicy::Reject {
            tracing::debug!("rejected function value during encode");
            return Err(Error::unsupported_type(
                "function values are rejected by the codec configuration",
            ));
        }

        let arrow = function.to_arrow_source()?;
        tracing::debug!(source = %arrow, "encoding function");
        Ok(self.tagged(TagKind::Function, "value", Value::String(arrow)))
    }

    fn encode_member(&self, key: Key<'_>, value: Value) -> Result<Value> {
        walk(key, value, &|k: Key<'_>, v: Value| self.encode(k, v))
    }

    fn tagged(&self, kind: TagKind, field: &str, payload: Value) -> Value {
        let mut object = ObjectMap::with_capacity(2);
        object.insert(self.tags.marker(kind).to_string(), Value::Bool(true));
        object.insert(field.to_string(), payload);
        Value::Object(object)
    }
}
