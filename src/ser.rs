//! Serialization: values to JSON text, and Rust types to values.
//!
//! - [`to_string_with`] is the stringify-with-replacer primitive: it walks a
//!   [`Value`] leaf-first through a replacer hook, then writes JSON.
//! - [`ValueSerializer`] is a `serde::Serializer` that builds a [`Value`]
//!   from any `T: Serialize` (see [`to_value`](crate::to_value)). Maps whose
//!   keys are not all strings become [`Value::Map`] instead of objects.
//!
//! ## Usage
//!
//! ```rust
//! use serde_jsonx::{to_string_with, Codec, Key, Value, ValueSet};
//!
//! let codec = Codec::new();
//! let encoder = codec.encoder();
//!
//! let set: ValueSet = [1, 2, 1].into_iter().map(Value::from).collect();
//! let text = to_string_with(&Value::Set(set), |k: Key<'_>, v: Value| encoder.encode(k, v), 0).unwrap();
//! assert!(text.contains("\"values\":[1,2]"));
//! ```

use crate::options::MAX_INDENT;
use crate::walk::{walk, Key};
use crate::{Error, Number, ObjectMap, Result, Value, ValueMap};
use serde::{ser, Serialize};
use serde_json::ser::PrettyFormatter;

/// Runs `replacer` over `value` leaf-first and writes the result as JSON.
///
/// `indent` is the number of spaces per nesting level; `0` writes compact
/// output and values above 10 are capped at 10.
///
/// # Errors
///
/// Returns the first error raised by the replacer, or a serialization error.
pub fn to_string_with<F>(value: &Value, replacer: F, indent: usize) -> Result<String>
where
    F: Fn(Key<'_>, Value) -> Result<Value>,
{
    let plain = walk(Key::Root, value.clone(), &replacer)?;
    write_json(&plain, indent)
}

pub(crate) fn write_json(value: &Value, indent: usize) -> Result<String> {
    if indent == 0 {
        return Ok(serde_json::to_string(value)?);
    }

    let spaces = " ".repeat(indent.min(MAX_INDENT));
    let mut output = Vec::with_capacity(256);
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut output, PrettyFormatter::with_indent(spaces.as_bytes()));
    value.serialize(&mut serializer)?;
    String::from_utf8(output).map_err(Error::custom)
}

/// A `serde::Serializer` that produces [`Value`]s.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeTupleVariant {
    variant: &'static str,
    vec: Vec<Value>,
}

/// Collects entries and decides at the end between an object and a map.
pub struct SerializeMap {
    entries: Vec<(Value, Value)>,
    current_key: Option<Value>,
}

pub struct SerializeStruct {
    map: ObjectMap,
}

pub struct SerializeStructVariant {
    variant: &'static str,
    map: ObjectMap,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeTupleVariant;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeStruct;
    type SerializeStructVariant = SerializeStructVariant;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        if v <= i64::MAX as u64 {
            Ok(Value::Number(Number::Integer(v as i64)))
        } else {
            Ok(Value::Number(Number::Float(v as f64)))
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().map(|&b| Value::from(b)).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged_variant(variant, to_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0)))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeTupleVariant> {
        Ok(SerializeTupleVariant {
            variant,
            vec: Vec::with_capacity(len),
        })
    }

    fn serialize_map(self, len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap {
            entries: Vec::with_capacity(len.unwrap_or(0)),
            current_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<SerializeStruct> {
        Ok(SerializeStruct {
            map: ObjectMap::with_capacity(len),
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeStructVariant> {
        Ok(SerializeStructVariant {
            variant,
            map: ObjectMap::with_capacity(len),
        })
    }
}

impl SerializeVec {
    fn new(capacity: usize) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        ser::SerializeSeq::serialize_element(self, value)
    }

    fn end(self) -> Result<Value> {
        ser::SerializeSeq::end(self)
    }
}

impl ser::SerializeTupleVariant for SerializeTupleVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged_variant(self.variant, Value::Array(self.vec)))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(to_value(key)?);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.entries.push((key, to_value(value)?));
        Ok(())
    }

    fn end(self) -> Result<Value> {
        if self.entries.iter().all(|(key, _)| key.is_string()) {
            let object = self
                .entries
                .into_iter()
                .filter_map(|(key, value)| match key {
                    Value::String(key) => Some((key, value)),
                    _ => None,
                })
                .collect::<ObjectMap>();
            Ok(Value::Object(object))
        } else {
            Ok(Value::Map(self.entries.into_iter().collect::<ValueMap>()))
        }
    }
}

impl ser::SerializeStruct for SerializeStruct {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeStructVariant {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(tagged_variant(self.variant, Value::Object(self.map)))
    }
}

fn tagged_variant(variant: &str, payload: Value) -> Value {
    let mut object = ObjectMap::with_capacity(1);
    object.insert(variant.to_string(), payload);
    Value::Object(object)
}

/// Converts any `T: Serialize` into a [`Value`].
///
/// Maps keep their entry order. A map with any non-string key becomes
/// [`Value::Map`], so `BTreeMap<i32, _>` survives a codec round trip with
/// integer keys intact. Enums are externally tagged.
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{to_value, Value};
/// use std::collections::BTreeMap;
///
/// let scores: BTreeMap<i32, &str> = [(1, "gold"), (2, "silver")].into_iter().collect();
/// let value = to_value(&scores).unwrap();
/// assert_eq!(value.as_map().unwrap().get(&Value::from(1)), Some(&Value::from("gold")));
/// ```
///
/// # Errors
///
/// Propagates custom errors raised by `T`'s `Serialize` impl.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    enum Shape {
        Unit,
        Circle(f64),
        Rect(u32, u32),
        Named { label: String },
    }

    #[test]
    fn test_string_keyed_map_becomes_object() {
        let mut map = BTreeMap::new();
        map.insert("a", 1);
        let value = to_value(&map).unwrap();
        assert_eq!(value.get("a"), Some(&Value::from(1)));
    }

    #[test]
    fn test_integer_keyed_map_becomes_value_map() {
        let mut map = BTreeMap::new();
        map.insert(2, "two");
        map.insert(1, "one");
        let value = to_value(&map).unwrap();
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec![Value::from(1), Value::from(2)]);
    }

    #[test]
    fn test_enum_variants_are_externally_tagged() {
        assert_eq!(to_value(&Shape::Unit).unwrap(), Value::from("Unit"));
        assert_eq!(
            to_value(&Shape::Circle(1.5)).unwrap().get("Circle"),
            Some(&Value::from(1.5))
        );
        assert_eq!(
            to_value(&Shape::Rect(2, 3)).unwrap().get("Rect"),
            Some(&Value::Array(vec![Value::from(2), Value::from(3)]))
        );
        assert_eq!(
            to_value(&Shape::Named {
                label: "x".to_string()
            })
            .unwrap()
            .get("Named")
            .and_then(|v| v.get("label")),
            Some(&Value::from("x"))
        );
    }

    #[test]
    fn test_write_json_indent() {
        let value = Value::Array(vec![Value::from(1)]);
        assert_eq!(write_json(&value, 0).unwrap(), "[1]");
        assert_eq!(write_json(&value, 2).unwrap(), "[\n  1\n]");
        assert_eq!(write_json(&value, 40).unwrap(), format!("[\n{}1\n]", " ".repeat(10)));
    }

    #[test]
    fn test_to_string_with_identity_replacer() {
        let value = Value::Array(vec![Value::from("a"), Value::Null]);
        let text = to_string_with(&value, |_k: Key<'_>, v: Value| Ok(v), 0).unwrap();
        assert_eq!(text, r#"["a",null]"#);
    }
}
