//! Dynamic value representation.
//!
//! This module provides the [`Value`] enum: plain JSON data extended with the
//! three kinds JSON cannot carry on its own (maps with arbitrary keys, sets,
//! and functions).
//!
//! ## Creating Values
//!
//! ```rust
//! use serde_jsonx::{jsonx, Value, ValueSet};
//!
//! let number = Value::from(42);
//! let text = Value::from("hello");
//! let set: ValueSet = [1, 2, 1].into_iter().map(Value::from).collect();
//!
//! let obj = jsonx!({
//!     "name": "Alice",
//!     "tags": (set ["a", "b"])
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ## Equality and Hashing
//!
//! Values are `Eq + Hash` so they can key a [`ValueMap`] or be members of a
//! [`ValueSet`]. Numbers compare numerically (`1 == 1.0`) and `NaN` equals
//! itself. Objects, maps and sets compare as unordered collections.
//!
//! ```rust
//! use serde_jsonx::Value;
//!
//! assert_eq!(Value::from(1), Value::from(1.0));
//! assert_eq!(Value::from(f64::NAN), Value::from(f64::NAN));
//! ```

use crate::{Function, ObjectMap, ValueMap, ValueSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A dynamically-typed value: JSON data plus maps, sets and functions.
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{Value, Number};
///
/// let null = Value::Null;
/// let num = Value::Number(Number::Integer(42));
/// let text = Value::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(ObjectMap),
    Map(ValueMap),
    Set(ValueSet),
    Function(Function),
}

/// A numeric value, either an integer or a float.
///
/// Integers and floats with the same numeric value are equal and hash alike,
/// so `Value::from(1)` and `Value::from(1.0)` are the same map key.
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::Number;
///
/// let integer = Number::Integer(42);
/// let float = Number::Float(3.5);
///
/// assert!(integer.is_integer());
/// assert_eq!(integer.as_i64(), Some(42));
/// assert_eq!(float.as_f64(), 3.5);
/// assert_eq!(Number::Float(42.0), integer);
/// ```
#[derive(Clone, Copy, Debug)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

impl Number {
    /// Returns `true` if this is an integer value.
    #[inline]
    #[must_use]
    pub const fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Returns `true` if this is a floating-point value.
    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, Number::Float(_))
    }

    /// Converts this number to an `i64` if it has no fractional part and
    /// fits in range.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::Number;
    ///
    /// assert_eq!(Number::Integer(42).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.0).as_i64(), Some(42));
    /// assert_eq!(Number::Float(42.5).as_i64(), None);
    /// assert_eq!(Number::Float(f64::INFINITY).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Number::Integer(i) => Some(*i),
            Number::Float(f) => exact_i64(*f),
        }
    }

    /// Converts this number to an `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => *i as f64,
            Number::Float(f) => *f,
        }
    }

    /// Returns `true` for `0`, `-0` and `NaN`.
    #[inline]
    #[must_use]
    pub fn is_falsy(&self) -> bool {
        match self {
            Number::Integer(i) => *i == 0,
            Number::Float(f) => *f == 0.0 || f.is_nan(),
        }
    }
}

// Floats in [-2^63, 2^63) with no fractional part.
fn exact_i64(f: f64) -> Option<i64> {
    if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Number::Integer(a), Number::Integer(b)) => a == b,
            (Number::Float(a), Number::Float(b)) => a == b || (a.is_nan() && b.is_nan()),
            (Number::Integer(i), Number::Float(f)) | (Number::Float(f), Number::Integer(i)) => {
                exact_i64(*f) == Some(*i)
            }
        }
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.as_i64() {
            Some(i) => {
                0u8.hash(state);
                i.hash(state);
            }
            None => {
                1u8.hash(state);
                let f = self.as_f64();
                let bits = if f.is_nan() {
                    f64::NAN.to_bits()
                } else {
                    f.to_bits()
                };
                bits.hash(state);
            }
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(fl) if fl.is_nan() => write!(f, "NaN"),
            Number::Float(fl) if fl.is_infinite() => {
                write!(f, "{}", if *fl > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Number::Float(fl) => write!(f, "{}", fl),
        }
    }
}

impl From<i32> for Number {
    fn from(value: i32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        Number::Integer(value)
    }
}

impl From<u32> for Number {
    fn from(value: u32) -> Self {
        Number::Integer(value as i64)
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Number::Float(value)
    }
}

impl Value {
    /// Returns `true` if the value is null.
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is a boolean.
    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns `true` if the value is a number.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is a plain object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` if the value is a map-like container.
    #[inline]
    #[must_use]
    pub const fn is_map(&self) -> bool {
        matches!(self, Value::Map(_))
    }

    /// Returns `true` if the value is a set-like container.
    #[inline]
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Value::Set(_))
    }

    /// Returns `true` if the value is a function.
    #[inline]
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    /// Truthiness as the host scripting language defines it.
    ///
    /// `null`, `false`, `0`, `-0`, `NaN` and `""` are falsy. Every container
    /// and function is truthy, even when empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::Value;
    ///
    /// assert!(Value::Bool(true).is_truthy());
    /// assert!(Value::from(1).is_truthy());
    /// assert!(Value::Array(vec![]).is_truthy());
    /// assert!(!Value::from(0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(!Value::Null.is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => !n.is_falsy(),
            Value::String(s) => !s.is_empty(),
            Value::Array(_)
            | Value::Object(_)
            | Value::Map(_)
            | Value::Set(_)
            | Value::Function(_) => true,
        }
    }

    /// A short name for the value's kind, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Map(_) => "map",
            Value::Set(_) => "set",
            Value::Function(_) => "function",
        }
    }

    /// If the value is a boolean, returns it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it. Otherwise returns `None`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer or a whole-number float, returns it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::Value;
    ///
    /// assert_eq!(Value::from(42).as_i64(), Some(42));
    /// assert_eq!(Value::from(42.0).as_i64(), Some(42));
    /// assert_eq!(Value::from(42.5).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// If the value is a number, returns it as `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_set(&self) -> Option<&ValueSet> {
        match self {
            Value::Set(set) => Some(set),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_function(&self) -> Option<&Function> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    /// Looks up a field of a plain object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => n.hash(state),
            Value::String(s) => s.hash(state),
            Value::Array(items) => items.hash(state),
            Value::Object(obj) => unordered_hash(obj.iter()).hash(state),
            Value::Map(map) => unordered_hash(map.iter()).hash(state),
            Value::Set(set) => unordered_hash(set.iter()).hash(state),
            Value::Function(f) => f.hash(state),
        }
    }
}

/// Combines per-entry hashes with a wrapping sum so insertion order does not
/// change the result.
fn unordered_hash<T: Hash>(entries: impl Iterator<Item = T>) -> u64 {
    entries
        .map(|entry| {
            let mut hasher = DefaultHasher::new();
            entry.hash(&mut hasher);
            hasher.finish()
        })
        .fold(0u64, u64::wrapping_add)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Object(obj) => {
                write!(
                    f,
                    "{{{}}}",
                    obj.iter()
                        .map(|(k, v)| format!("{:?}:{}", k, v))
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Map(map) => {
                write!(
                    f,
                    "Map({}) {{{}}}",
                    map.len(),
                    map.iter()
                        .map(|(k, v)| format!("{} => {}", k, v))
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Set(set) => {
                write!(
                    f,
                    "Set({}) {{{}}}",
                    set.len(),
                    set.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                )
            }
            Value::Function(func) => write!(f, "{}", func.source()),
        }
    }
}

/// Emits plain JSON data.
///
/// Maps, sets and functions that reach this point have not been encoded;
/// they are written the way the host serializer writes them: maps and sets
/// as `{}`, functions as `null`, and function-valued object fields are
/// omitted. Non-finite floats become `null`.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Null | Value::Function(_) => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(f)) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Number(Number::Float(_)) => serializer.serialize_unit(),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                let mut map = serializer.serialize_map(None)?;
                for (k, v) in obj.iter().filter(|(_, v)| !v.is_function()) {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
            Value::Map(_) | Value::Set(_) => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid JSON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(Value::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Integer(value)))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                if value <= i64::MAX as u64 {
                    Ok(Value::Number(Number::Integer(value as i64)))
                } else {
                    Ok(Value::Number(Number::Float(value as f64)))
                }
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(Value::Number(Number::Float(value)))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(Value::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ObjectMap::new();
                while let Some((key, value)) = map.next_entry::<String, Value>()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<Value> for i64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => n.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("cannot convert {} to i64", n))
            }),
            _ => Err(crate::Error::custom(format!(
                "expected integer, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Number(n) => Ok(n.as_f64()),
            _ => Err(crate::Error::custom(format!(
                "expected number, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {}",
                value.kind()
            ))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {}",
                value.kind()
            ))),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Number(Number::Integer(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Number(Number::Integer(value as i64))
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Number(Number::Float(value as f64))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::Float(value))
    }
}

impl From<Number> for Value {
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ObjectMap> for Value {
    fn from(value: ObjectMap) -> Self {
        Value::Object(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Map(value)
    }
}

impl From<ValueSet> for Value {
    fn from(value: ValueSet) -> Self {
        Value::Set(value)
    }
}

impl From<Function> for Value {
    fn from(value: Function) -> Self {
        Value::Function(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hash_of(value: &Value) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_tryfrom_i64() {
        let result: i64 = i64::try_from(Value::from(42)).unwrap();
        assert_eq!(result, 42);

        let result: i64 = i64::try_from(Value::from(42.0)).unwrap();
        assert_eq!(result, 42);

        assert!(i64::try_from(Value::from("test")).is_err());
        assert!(i64::try_from(Value::from(0.5)).is_err());
    }

    #[test]
    fn test_tryfrom_string_and_bool() {
        assert_eq!(String::try_from(Value::from("hello")).unwrap(), "hello");
        assert!(String::try_from(Value::from(42)).is_err());
        assert!(bool::try_from(Value::Bool(true)).unwrap());
        assert!(bool::try_from(Value::from(1)).is_err());
    }

    #[test]
    fn test_numeric_equality_and_hash() {
        let int = Value::from(7);
        let float = Value::from(7.0);
        assert_eq!(int, float);
        assert_eq!(hash_of(&int), hash_of(&float));

        assert_ne!(Value::from(7), Value::from(7.5));
        assert_eq!(Value::from(0.0), Value::from(-0.0));
        assert_eq!(hash_of(&Value::from(0.0)), hash_of(&Value::from(-0.0)));
    }

    #[test]
    fn test_collection_hash_ignores_order() {
        let mut forward = ObjectMap::new();
        forward.insert("a".to_string(), Value::from(1));
        forward.insert("b".to_string(), Value::from(2));
        let mut backward = ObjectMap::new();
        backward.insert("b".to_string(), Value::from(2));
        backward.insert("a".to_string(), Value::from(1));
        assert_eq!(Value::Object(forward.clone()), Value::Object(backward.clone()));
        assert_eq!(hash_of(&Value::Object(forward)), hash_of(&Value::Object(backward)));

        let left: ValueSet = [1, 2, 3].into_iter().map(Value::from).collect();
        let right: ValueSet = [3, 1, 2].into_iter().map(Value::from).collect();
        assert_eq!(hash_of(&Value::Set(left)), hash_of(&Value::Set(right)));

        let mut first = ValueMap::new();
        first.insert(Value::from(1), Value::from("x"));
        first.insert(Value::Null, Value::from("y"));
        let mut second = ValueMap::new();
        second.insert(Value::Null, Value::from("y"));
        second.insert(Value::from(1), Value::from("x"));
        assert_eq!(hash_of(&Value::Map(first)), hash_of(&Value::Map(second)));
    }

    #[test]
    fn test_same_size_collections_hash_apart() {
        let ones: ValueSet = [1, 2].into_iter().map(Value::from).collect();
        let others: ValueSet = [3, 4].into_iter().map(Value::from).collect();
        assert_ne!(hash_of(&Value::Set(ones)), hash_of(&Value::Set(others)));

        let mut first = ObjectMap::new();
        first.insert("k".to_string(), Value::from(1));
        let mut second = ObjectMap::new();
        second.insert("k".to_string(), Value::from(2));
        assert_ne!(hash_of(&Value::Object(first)), hash_of(&Value::Object(second)));
    }

    #[test]
    fn test_nan_is_reflexive() {
        let nan = Value::from(f64::NAN);
        assert_eq!(nan, nan.clone());
        assert_eq!(hash_of(&nan), hash_of(&Value::from(-f64::NAN)));
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::from(0).is_truthy());
        assert!(!Value::from(-0.0).is_truthy());
        assert!(!Value::from(f64::NAN).is_truthy());
        assert!(!Value::from("").is_truthy());

        assert!(Value::from("false").is_truthy());
        assert!(Value::from(-1).is_truthy());
        assert!(Value::Object(ObjectMap::new()).is_truthy());
        assert!(Value::Map(ValueMap::new()).is_truthy());
        assert!(Value::Set(ValueSet::new()).is_truthy());
    }

    #[test]
    fn test_unencoded_special_values_serialize_like_the_host() {
        let mut obj = ObjectMap::new();
        obj.insert("f".to_string(), Value::Function(Function::new("(a) => a")));
        obj.insert("m".to_string(), Value::Map(ValueMap::new()));
        obj.insert("n".to_string(), Value::from(f64::INFINITY));
        let value = Value::Array(vec![
            Value::Object(obj),
            Value::Function(Function::new("(a) => a")),
            Value::Set(ValueSet::new()),
        ]);

        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"[{"m":{},"n":null},null,{}]"#);
    }

    #[test]
    fn test_deserialize_preserves_field_order() {
        let value: Value = serde_json::from_str(r#"{"z":1,"a":2,"m":3}"#).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_large_unsigned_becomes_float() {
        let value: Value = serde_json::from_str("18446744073709551615").unwrap();
        assert!(matches!(value, Value::Number(Number::Float(_))));
    }

    #[test]
    fn test_display() {
        let set: ValueSet = [1, 2].into_iter().map(Value::from).collect();
        assert_eq!(Value::Set(set).to_string(), "Set(2) {1, 2}");
        assert_eq!(Value::from(f64::NAN).to_string(), "NaN");
    }
}
