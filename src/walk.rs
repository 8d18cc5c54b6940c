//! Leaf-first traversal that drives replacer and reviver hooks.
//!
//! [`walk`] rebuilds a value tree bottom-up: the children of every array and
//! object are transformed before the hook sees their parent. Maps, sets and
//! functions are opaque leaves here; a hook that wants to reach inside them
//! has to recurse itself, which is what the [`Encoder`](crate::Encoder) does.

use crate::{Result, Value};
use std::fmt;

/// Where a node sits within its parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key<'a> {
    /// The top-level value.
    Root,
    /// A field of a plain object.
    Field(&'a str),
    /// An element of an array.
    Index(usize),
}

impl fmt::Display for Key<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Root => Ok(()),
            Key::Field(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Applies `hook` to every node of `value`, children first.
///
/// # Examples
///
/// ```rust
/// use serde_jsonx::{jsonx, walk, Key, Value};
///
/// // Double every integer, wherever it sits.
/// let doubled = walk(Key::Root, jsonx!({"a": [1, 2], "b": 3}), &|_key: Key<'_>, value: Value| {
///     Ok(match value.as_i64() {
///         Some(i) => Value::from(i * 2),
///         None => value,
///     })
/// })
/// .unwrap();
/// assert_eq!(doubled, jsonx!({"a": [2, 4], "b": 6}));
/// ```
///
/// # Errors
///
/// Stops at the first error the hook returns.
pub fn walk<F>(key: Key<'_>, value: Value, hook: &F) -> Result<Value>
where
    F: Fn(Key<'_>, Value) -> Result<Value>,
{
    let value = match value {
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(index, item)| walk(Key::Index(index), item, hook))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(fields) => Value::Object(
            fields
                .into_iter()
                .map(|(name, field)| {
                    let field = walk(Key::Field(&name), field, hook)?;
                    Ok((name, field))
                })
                .collect::<Result<_>>()?,
        ),
        other => other,
    };
    hook(key, value)
}
