//! Deserialization: JSON text to values, and values to Rust types.
//!
//! - [`from_str_with`] is the parse-with-reviver primitive: it parses JSON
//!   into a [`Value`] tree, then walks it leaf-first through a reviver hook.
//! - [`from_value`] drives any `T: Deserialize` from a [`Value`]. Maps with
//!   arbitrary keys feed `BTreeMap<i32, _>`-style targets, and sets feed
//!   sequence targets such as `HashSet<T>` or `Vec<T>`.
//!
//! ## Usage
//!
//! ```rust
//! use serde_jsonx::{from_str_with, Codec, Key, Value};
//!
//! let codec = Codec::new();
//! let decoder = codec.decoder();
//! let text = format!(r#"{{"{}": true, "values": [1, 2]}}"#, codec.tags().set_key());
//!
//! let value = from_str_with(&text, |k: Key<'_>, v: Value| decoder.decode(k, v)).unwrap();
//! assert_eq!(value.as_set().map(|s| s.len()), Some(2));
//! ```

use crate::walk::{walk, Key};
use crate::{Error, Number, ObjectMap, Result, Value};
use serde::de::{self, DeserializeOwned};
use serde::{forward_to_deserialize_any, Deserialize};

/// Parses `text` as JSON and runs `reviver` over the result leaf-first.
///
/// # Errors
///
/// [`Error::Syntax`] for malformed JSON, or the first error the reviver
/// returns.
pub fn from_str_with<F>(text: &str, reviver: F) -> Result<Value>
where
    F: Fn(Key<'_>, Value) -> Result<Value>,
{
    let parsed = parse_json(serde_json::de::StrRead::new(text))?;
    walk(Key::Root, parsed, &reviver)
}

/// Parses one JSON document with no nesting limit. Every encoded map or set
/// adds two levels, so serde_json's default limit of 128 would cap special
/// values at 64 deep.
pub(crate) fn parse_json<'de, R>(read: R) -> Result<Value>
where
    R: serde_json::de::Read<'de>,
{
    let mut deserializer = serde_json::Deserializer::new(read);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(value)
}

/// Deserializes an instance of `T` from a [`Value`].
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{from_value, jsonx};
/// use std::collections::BTreeMap;
///
/// let value = jsonx!((map { 1 => "one", 2 => "two" }));
/// let map: BTreeMap<i32, String> = from_value(value).unwrap();
/// assert_eq!(map[&2], "two");
/// ```
///
/// # Errors
///
/// Returns an error if the value does not fit `T`, or if it contains a
/// function, which has no serde data model equivalent.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T> {
    T::deserialize(ValueDeserializer::new(value))
}

struct ValueDeserializer {
    value: Value,
}

impl ValueDeserializer {
    fn new(value: Value) -> Self {
        ValueDeserializer { value }
    }
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_unit(),
            Value::Bool(b) => visitor.visit_bool(b),
            Value::Number(Number::Integer(i)) => visitor.visit_i64(i),
            Value::Number(Number::Float(f)) => visitor.visit_f64(f),
            Value::String(s) => visitor.visit_string(s),
            Value::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            Value::Set(set) => visitor.visit_seq(SeqDeserializer::new(set.into_iter().collect())),
            Value::Object(obj) => visitor.visit_map(MapDeserializer::from_object(obj)),
            Value::Map(map) => visitor.visit_map(MapDeserializer::new(map.into_iter().collect())),
            Value::Function(f) => Err(Error::unsupported_type(&format!(
                "function `{}` cannot be deserialized into a Rust type",
                f.source()
            ))),
        }
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Value::String(variant) => visitor.visit_enum(EnumDeserializer::new(variant, None)),
            Value::Object(obj) if obj.len() == 1 => {
                let (variant, payload) = obj
                    .into_iter()
                    .next()
                    .ok_or_else(|| Error::custom("expected a single-key object for an enum"))?;
                visitor.visit_enum(EnumDeserializer::new(variant, Some(payload)))
            }
            other => Err(Error::custom(format!(
                "expected a string or single-key object for an enum, found {}",
                other.kind()
            ))),
        }
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct identifier ignored_any
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<Value>,
}

impl SeqDeserializer {
    fn new(vec: Vec<Value>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

/// Feeds object fields and map entries alike; object keys become strings.
struct MapDeserializer {
    iter: std::vec::IntoIter<(Value, Value)>,
    value: Option<Value>,
}

impl MapDeserializer {
    fn new(entries: Vec<(Value, Value)>) -> Self {
        MapDeserializer {
            iter: entries.into_iter(),
            value: None,
        }
    }

    fn from_object(obj: ObjectMap) -> Self {
        Self::new(
            obj.into_iter()
                .map(|(key, value)| (Value::String(key), value))
                .collect(),
        )
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(ValueDeserializer::new(key)).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<Value>,
}

impl EnumDeserializer {
    fn new(variant: String, value: Option<Value>) -> Self {
        EnumDeserializer { variant, value }
    }
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(ValueDeserializer::new(Value::String(self.variant)))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<Value>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(Value::Null) | None => Ok(()),
            _ => Err(Error::custom("expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(Value::Object(obj)) => visitor.visit_map(MapDeserializer::from_object(obj)),
            _ => Err(Error::custom("expected struct variant")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Function, ValueMap, ValueSet};
    use serde::Deserialize;
    use std::collections::{BTreeMap, HashSet};

    #[derive(Deserialize, Debug, PartialEq)]
    struct Player {
        name: String,
        level: u8,
        nickname: Option<String>,
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Move {
        Stay,
        Step(i32),
        Jump { height: u32 },
    }

    #[test]
    fn test_parse_has_no_depth_limit() {
        let text = format!("{}{}", "[".repeat(300), "]".repeat(300));
        let mut value = from_str_with(&text, |_: Key<'_>, v: Value| Ok(v)).unwrap();
        let mut depth = 1;
        while let Value::Array(mut items) = value {
            match items.pop() {
                Some(inner) => {
                    value = inner;
                    depth += 1;
                }
                None => break,
            }
        }
        assert_eq!(depth, 300);
    }

    #[test]
    fn test_trailing_text_is_rejected() {
        assert!(from_str_with("[1] [2]", |_: Key<'_>, v: Value| Ok(v)).is_err());
    }

    #[test]
    fn test_from_str_with_parses_plain_json() {
        let value = from_str_with(r#"{"a": [1, 2.5, null]}"#, |_k: Key<'_>, v: Value| Ok(v)).unwrap();
        let list = value.get("a").and_then(Value::as_array).unwrap();
        assert_eq!(list[1], Value::from(2.5));
        assert!(list[2].is_null());
    }

    #[test]
    fn test_from_str_with_reports_syntax_error() {
        let err = from_str_with("[1, 2", |_k: Key<'_>, v: Value| Ok(v)).unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
    }

    #[test]
    fn test_struct_from_object() {
        let mut obj = ObjectMap::new();
        obj.insert("name".to_string(), Value::from("Ada"));
        obj.insert("level".to_string(), Value::from(7));
        obj.insert("nickname".to_string(), Value::Null);
        let player: Player = from_value(Value::Object(obj)).unwrap();
        assert_eq!(
            player,
            Player {
                name: "Ada".to_string(),
                level: 7,
                nickname: None
            }
        );
    }

    #[test]
    fn test_integer_keyed_map() {
        let map: ValueMap = [(Value::from(3), Value::from(true))].into_iter().collect();
        let out: BTreeMap<i64, bool> = from_value(Value::Map(map)).unwrap();
        assert_eq!(out.get(&3), Some(&true));
    }

    #[test]
    fn test_set_into_hash_set() {
        let set: ValueSet = ["x", "y"].into_iter().map(Value::from).collect();
        let out: HashSet<String> = from_value(Value::Set(set)).unwrap();
        assert!(out.contains("x") && out.contains("y"));
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(from_value::<Move>(Value::from("Stay")).unwrap(), Move::Stay);

        let mut step = ObjectMap::new();
        step.insert("Step".to_string(), Value::from(-2));
        assert_eq!(from_value::<Move>(Value::Object(step)).unwrap(), Move::Step(-2));

        let mut fields = ObjectMap::new();
        fields.insert("height".to_string(), Value::from(3));
        let mut jump = ObjectMap::new();
        jump.insert("Jump".to_string(), Value::Object(fields));
        assert_eq!(
            from_value::<Move>(Value::Object(jump)).unwrap(),
            Move::Jump { height: 3 }
        );
    }

    #[test]
    fn test_function_is_unsupported() {
        let err = from_value::<String>(Value::Function(Function::new("(a) => a"))).unwrap_err();
        assert!(matches!(err, Error::UnsupportedType(_)));
    }
}
