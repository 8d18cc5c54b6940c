//! Ordered container types.
//!
//! - [`ObjectMap`]: string-keyed plain objects, as JSON objects carry them.
//! - [`ValueMap`]: map-like containers whose keys may be any [`Value`].
//! - [`ValueSet`]: set-like containers of unique [`Value`]s.
//!
//! All three wrap [`indexmap`] collections so iteration follows insertion
//! order, which is what an encoded `entries`/`values` sequence records.
//!
//! ## Examples
//!
//! ```rust
//! use serde_jsonx::{ValueMap, ValueSet, Value};
//!
//! let mut map = ValueMap::new();
//! map.insert(Value::from(1), Value::from("one"));
//! map.insert(Value::from("two"), Value::from(2));
//! assert_eq!(map.get(&Value::from(1)).and_then(|v| v.as_str()), Some("one"));
//!
//! let set: ValueSet = [1, 2, 1, 4].into_iter().map(Value::from).collect();
//! assert_eq!(set.len(), 3);
//! ```

use crate::Value;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;

/// An ordered map of string keys to values (a plain JSON object).
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{ObjectMap, Value};
///
/// let mut map = ObjectMap::new();
/// map.insert("first".to_string(), Value::from(1));
/// map.insert("second".to_string(), Value::from(2));
///
/// // Iteration maintains insertion order
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectMap(IndexMap<String, Value>);

impl ObjectMap {
    /// Creates an empty `ObjectMap`.
    #[must_use]
    pub fn new() -> Self {
        ObjectMap(IndexMap::new())
    }

    /// Creates an empty `ObjectMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ObjectMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already contained this key, the old value is returned and
    /// the key keeps its original position.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jsonx::{ObjectMap, Value};
    ///
    /// let mut map = ObjectMap::new();
    /// assert!(map.insert("key".to_string(), Value::from(42)).is_none());
    /// assert!(map.insert("key".to_string(), Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.0.get_mut(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys of the map, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.0.keys()
    }

    /// Returns an iterator over the values of the map, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs of the map, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }
}

impl From<HashMap<String, Value>> for ObjectMap {
    fn from(map: HashMap<String, Value>) -> Self {
        ObjectMap(map.into_iter().collect())
    }
}

impl IntoIterator for ObjectMap {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ObjectMap {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for ObjectMap {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        ObjectMap(IndexMap::from_iter(iter))
    }
}

/// An ordered map whose keys can be any value.
///
/// Keys are unique under [`Value`] equality. Re-inserting an existing key
/// replaces its value in place.
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{ValueMap, Value};
///
/// let mut map = ValueMap::new();
/// map.insert(Value::from("a"), Value::from(1));
/// map.insert(Value::from(2), Value::from(2));
/// map.insert(Value::from("a"), Value::from(3));
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec![Value::from("a"), Value::from(2)]);
/// assert_eq!(map.get(&Value::from("a")).and_then(|v| v.as_i64()), Some(3));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueMap(IndexMap<Value, Value>);

impl ValueMap {
    #[must_use]
    pub fn new() -> Self {
        ValueMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ValueMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts an entry, returning the previous value for an existing key.
    pub fn insert(&mut self, key: Value, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    #[must_use]
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.contains_key(key)
    }

    /// Removes a key, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &Value) -> Option<Value> {
        self.0.shift_remove(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, Value, Value> {
        self.0.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, Value, Value> {
        self.0.values()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, Value, Value> {
        self.0.iter()
    }
}

impl IntoIterator for ValueMap {
    type Item = (Value, Value);
    type IntoIter = indexmap::map::IntoIter<Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueMap {
    type Item = (&'a Value, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, Value, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(Value, Value)> for ValueMap {
    fn from_iter<T: IntoIterator<Item = (Value, Value)>>(iter: T) -> Self {
        ValueMap(IndexMap::from_iter(iter))
    }
}

/// An ordered collection of unique values.
///
/// Inserting a member that is already present leaves the set unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValueSet(IndexSet<Value>);

impl ValueSet {
    #[must_use]
    pub fn new() -> Self {
        ValueSet(IndexSet::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ValueSet(IndexSet::with_capacity(capacity))
    }

    /// Adds a member. Returns `false` if it was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        self.0.insert(value)
    }

    #[must_use]
    pub fn contains(&self, value: &Value) -> bool {
        self.0.contains(value)
    }

    /// Removes a member, preserving the order of the rest.
    pub fn remove(&mut self, value: &Value) -> bool {
        self.0.shift_remove(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> indexmap::set::Iter<'_, Value> {
        self.0.iter()
    }
}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = indexmap::set::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = indexmap::set::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<T: IntoIterator<Item = Value>>(iter: T) -> Self {
        ValueSet(IndexSet::from_iter(iter))
    }
}
