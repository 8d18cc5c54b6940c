//! The reviver hook: tagged objects back to maps, sets and functions.
//!
//! The [`Decoder`] checks each object for a truthy marker, function first,
//! then map, then set. Because the walk is leaf-first, the payload of a
//! tagged object has already been decoded by the time its parent is seen,
//! so nested maps inside `entries` arrive as [`Value::Map`] already.
//!
//! Decoding a function compiles and can run its text. See the
//! [`eval`](crate::eval) module for the security contract.

use crate::eval::Evaluator;
use crate::tags::{TagKind, TagScheme};
use crate::walk::Key;
use crate::{Error, ObjectMap, Result, Value, ValueMap, ValueSet};

/// Reviver hook bound to a tag scheme and, optionally, an evaluator.
#[derive(Clone, Copy, Debug)]
pub struct Decoder<'a> {
    tags: &'a TagScheme,
    evaluator: Option<&'a Evaluator>,
}

impl<'a> Decoder<'a> {
    /// Creates a decoder that compiles tagged functions with `evaluator`.
    #[must_use]
    pub fn new(tags: &'a TagScheme, evaluator: &'a Evaluator) -> Self {
        Decoder {
            tags,
            evaluator: Some(evaluator),
        }
    }

    /// Creates a decoder that rejects tagged functions with
    /// [`Error::UnsupportedType`].
    #[must_use]
    pub fn without_functions(tags: &'a TagScheme) -> Self {
        Decoder {
            tags,
            evaluator: None,
        }
    }

    #[must_use]
    pub fn tags(&self) -> &'a TagScheme {
        self.tags
    }

    /// Decodes one node. Objects with a truthy marker become the matching
    /// special value; everything else comes back unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::{from_str_with, Decoder, Evaluator, Key, TagScheme, Value};
    ///
    /// let tags = TagScheme::with_token("t").unwrap();
    /// let evaluator = Evaluator::new();
    /// let decoder = Decoder::new(&tags, &evaluator);
    ///
    /// let text = r#"{"isSerializedMapt": true, "entries": [[1, "one"], [2, "two"]]}"#;
    /// let value = from_str_with(text, |k: Key<'_>, v: Value| decoder.decode(k, v)).unwrap();
    /// assert_eq!(value.as_map().unwrap().get(&Value::from(2)), Some(&Value::from("two")));
    /// ```
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedTag`] when the payload field is missing or mistyped
    /// - [`Error::Eval`] when function text does not compile
    /// - [`Error::UnsupportedType`] for a function when no evaluator is set
    pub fn decode(&self, _key: Key<'_>, value: Value) -> Result<Value> {
        let object = match value {
            Value::Object(object) => object,
            other => return Ok(other),
        };

        match self.tags.detect(&object) {
            Some(TagKind::Function) => self.decode_function(object),
            Some(TagKind::Map) => decode_map(object),
            Some(TagKind::Set) => decode_set(object),
            None => Ok(Value::Object(object)),
        }
    }

    fn decode_function(&self, mut object: ObjectMap) -> Result<Value> {
        let evaluator = self.evaluator.ok_or_else(|| {
            tracing::debug!("rejected tagged function during decode");
            Error::unsupported_type("function values are rejected by the codec configuration")
        })?;

        let text = match object.remove("value") {
            Some(Value::String(text)) => text,
            Some(other) => {
                return Err(Error::malformed_tag(
                    TagKind::Function.name(),
                    &format!("`value` must be a string, found {}", other.kind()),
                ))
            }
            None => {
                return Err(Error::malformed_tag(
                    TagKind::Function.name(),
                    "missing `value`",
                ))
            }
        };

        tracing::debug!(source = %text, "evaluating tagged function");
        evaluator.compile(&text).map(Value::Function)
    }
}

fn payload_array(object: &mut ObjectMap, kind: TagKind, field: &str) -> Result<Vec<Value>> {
    match object.remove(field) {
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Error::malformed_tag(
            kind.name(),
            &format!("`{}` must be an array, found {}", field, other.kind()),
        )),
        None => Err(Error::malformed_tag(
            kind.name(),
            &format!("missing `{}`", field),
        )),
    }
}

fn decode_map(mut object: ObjectMap) -> Result<Value> {
    let entries = payload_array(&mut object, TagKind::Map, "entries")?;
    tracing::trace!(entries = entries.len(), "decoding map");

    let mut map = ValueMap::with_capacity(entries.len());
    for entry in entries {
        let pair = match entry {
            Value::Array(pair) => pair,
            other => {
                return Err(Error::malformed_tag(
                    TagKind::Map.name(),
                    &format!("entry must be an array, found {}", other.kind()),
                ))
            }
        };
        let mut pair = pair.into_iter();
        let key = pair.next().unwrap_or_default();
        let value = pair.next().unwrap_or_default();
        map.insert(key, value);
    }
    Ok(Value::Map(map))
}

fn decode_set(mut object: ObjectMap) -> Result<Value> {
    let values = payload_array(&mut object, TagKind::Set, "values")?;
    tracing::trace!(values = values.len(), "decoding set");
    Ok(Value::Set(values.into_iter().collect::<ValueSet>()))
}
