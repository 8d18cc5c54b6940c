//! Marker keys that flag encoded maps, sets and functions.
//!
//! Each marker is a fixed prefix followed by one random token shared by all
//! three kinds, e.g. `isSerializedMap5f0c...`. Ordinary data is astronomically
//! unlikely to contain such a key, so the decoder can tell encoded values
//! apart from user objects without any escaping.
//!
//! A [`TagScheme`] is built once and handed by reference to the
//! [`Encoder`](crate::Encoder) and [`Decoder`](crate::Decoder). Text written
//! with one scheme only decodes into special values under a scheme with the
//! same token.
//!
//! ```rust
//! use serde_jsonx::TagScheme;
//!
//! let tags = TagScheme::with_token("0b9e").unwrap();
//! assert_eq!(tags.map_key(), "isSerializedMap0b9e");
//! assert_eq!(tags.set_key(), "isSerializedSet0b9e");
//! assert_eq!(tags.function_key(), "isSerializedFunction0b9e");
//! ```

use crate::{Error, ObjectMap, Result, Value};
use uuid::Uuid;

pub const FUNCTION_PREFIX: &str = "isSerializedFunction";
pub const MAP_PREFIX: &str = "isSerializedMap";
pub const SET_PREFIX: &str = "isSerializedSet";

/// The special value kinds a tagged object can stand for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TagKind {
    Function,
    Map,
    Set,
}

impl TagKind {
    /// Detection order: a node matching several markers is the first of these.
    pub const PRIORITY: [TagKind; 3] = [TagKind::Function, TagKind::Map, TagKind::Set];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            TagKind::Function => "function",
            TagKind::Map => "map",
            TagKind::Set => "set",
        }
    }

    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            TagKind::Function => FUNCTION_PREFIX,
            TagKind::Map => MAP_PREFIX,
            TagKind::Set => SET_PREFIX,
        }
    }
}

/// The three marker keys, derived from one token. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagScheme {
    token: String,
    function_key: String,
    map_key: String,
    set_key: String,
}

impl TagScheme {
    /// Builds a scheme around a fresh random (UUID v4) token.
    #[must_use]
    pub fn new() -> Self {
        Self::from_token(Uuid::new_v4().to_string())
    }

    /// Builds a scheme around a caller-supplied token, so separate processes
    /// can read each other's output.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty token, which would reduce every marker
    /// to its bare prefix.
    pub fn with_token(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::custom("tag token must not be empty"));
        }
        Ok(Self::from_token(token))
    }

    fn from_token(token: String) -> Self {
        TagScheme {
            function_key: format!("{}{}", FUNCTION_PREFIX, token),
            map_key: format!("{}{}", MAP_PREFIX, token),
            set_key: format!("{}{}", SET_PREFIX, token),
            token,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn function_key(&self) -> &str {
        &self.function_key
    }

    #[must_use]
    pub fn map_key(&self) -> &str {
        &self.map_key
    }

    #[must_use]
    pub fn set_key(&self) -> &str {
        &self.set_key
    }

    /// The marker key for `kind`.
    #[must_use]
    pub fn marker(&self, kind: TagKind) -> &str {
        match kind {
            TagKind::Function => &self.function_key,
            TagKind::Map => &self.map_key,
            TagKind::Set => &self.set_key,
        }
    }

    /// Finds the first marker (function, then map, then set) that is present
    /// on `object` with a truthy value.
    #[must_use]
    pub fn detect(&self, object: &ObjectMap) -> Option<TagKind> {
        TagKind::PRIORITY.into_iter().find(|kind| {
            object
                .get(self.marker(*kind))
                .is_some_and(Value::is_truthy)
        })
    }
}

impl Default for TagScheme {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn object(entries: &[(&str, Value)]) -> ObjectMap {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_markers_share_token_and_differ() {
        let tags = TagScheme::new();
        assert!(tags.map_key().ends_with(tags.token()));
        assert!(tags.set_key().ends_with(tags.token()));
        assert!(tags.function_key().ends_with(tags.token()));
        assert_ne!(tags.map_key(), tags.set_key());
        assert_ne!(tags.map_key(), tags.function_key());
    }

    #[test]
    fn test_fresh_schemes_use_distinct_tokens() {
        assert_ne!(TagScheme::new().token(), TagScheme::new().token());
    }

    #[test]
    fn test_empty_token_rejected() {
        assert!(TagScheme::with_token("").is_err());
    }

    #[test]
    fn test_detect_requires_truthy_flag() {
        let tags = TagScheme::with_token("t").unwrap();
        assert_eq!(
            tags.detect(&object(&[("isSerializedMapt", Value::Bool(true))])),
            Some(TagKind::Map)
        );
        assert_eq!(
            tags.detect(&object(&[("isSerializedSett", Value::from(1))])),
            Some(TagKind::Set)
        );
        assert_eq!(
            tags.detect(&object(&[("isSerializedMapt", Value::Bool(false))])),
            None
        );
        assert_eq!(
            tags.detect(&object(&[("isSerializedMapt", Value::from(""))])),
            None
        );
    }

    #[test]
    fn test_detect_ignores_bare_prefix() {
        let tags = TagScheme::new();
        let lookalike = object(&[
            (FUNCTION_PREFIX, Value::Bool(true)),
            ("value", Value::from("(a) => a")),
        ]);
        assert_eq!(tags.detect(&lookalike), None);
    }

    #[test]
    fn test_detect_priority() {
        let tags = TagScheme::with_token("t").unwrap();
        let both = object(&[
            ("isSerializedSett", Value::Bool(true)),
            ("isSerializedFunctiont", Value::Bool(true)),
        ]);
        assert_eq!(tags.detect(&both), Some(TagKind::Function));
    }
}
