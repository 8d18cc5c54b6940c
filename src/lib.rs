//! # serde_jsonx
//!
//! JSON that round-trips maps with non-string keys, sets and functions.
//!
//! ## How it works
//!
//! Plain JSON has no way to write a map keyed by numbers, a set, or a
//! function. `serde_jsonx` rewrites each of those into an ordinary JSON
//! object flagged with a marker key, and turns the flagged objects back on
//! the way in:
//!
//! ```text
//! {"isSerializedMap<token>": true, "entries": [[1, "gold"], [2, "silver"]]}
//! {"isSerializedSet<token>": true, "values": ["a", "b"]}
//! {"isSerializedFunction<token>": true, "value": "(a, b) => a + b"}
//! ```
//!
//! The token is random (UUID v4) per [`TagScheme`], so ordinary data will
//! not collide with a marker by accident. The output is still plain JSON and
//! any JSON parser can read it.
//!
//! ## Key Features
//!
//! - **Arbitrary map keys**: numbers, booleans, arrays or objects as keys
//! - **Sets**: insertion-ordered, deduplicated on construction
//! - **Functions**: carried as arrow text and compiled back into callable
//!   values by an embedded [Rhai](https://rhai.rs) engine
//! - **Deep nesting**: special values inside special values, at any depth
//! - **Serde bridge**: [`to_value`] and [`from_value`] for your own types
//!
//! ## Quick Start
//!
//! ```rust
//! use serde_jsonx::{jsonx, Codec, Value};
//!
//! let codec = Codec::new();
//! let value = jsonx!({
//!     "medals": (map { 1 => "gold", 2 => "silver" }),
//!     "tags": (set ["rust", "json", "rust"])
//! });
//!
//! let text = codec.stringify(&value, None).unwrap();
//! let back = codec.parse(&text).unwrap();
//!
//! assert_eq!(back, value);
//! let medals = back.get("medals").and_then(Value::as_map).unwrap();
//! assert_eq!(medals.get(&Value::from(1)), Some(&Value::from("gold")));
//! ```
//!
//! ### Functions
//!
//! ```rust
//! use serde_jsonx::{Codec, Function, Value};
//!
//! let codec = Codec::new();
//! let add = Value::Function(Function::new("function add(a, b) { return a + b; }"));
//!
//! let text = codec.stringify(&add, None).unwrap();
//! let back = codec.parse(&text).unwrap();
//!
//! let f = back.as_function().unwrap();
//! assert_eq!(f.call(&[Value::from(2), Value::from(3)]).unwrap(), Value::from(5));
//! ```
//!
//! Decoding a function runs its text. Only parse input you trust, or use
//! [`FunctionPolicy::Reject`].
//!
//! ### Your own hooks
//!
//! [`Codec::encoder`] and [`Codec::decoder`] expose the replacer and reviver
//! hooks, which compose with [`to_string_with`] and [`from_str_with`]:
//!
//! ```rust
//! use serde_jsonx::{from_str_with, jsonx, to_string_with, Codec, Key, Value};
//!
//! let codec = Codec::new();
//! let encoder = codec.encoder();
//! let decoder = codec.decoder();
//!
//! let value = jsonx!([(set [1, 2]), "secret"]);
//! let text = to_string_with(
//!     &value,
//!     |k: Key<'_>, v: Value| match v.as_str() {
//!         Some("secret") => Ok(Value::from("***")),
//!         _ => encoder.encode(k, v),
//!     },
//!     0,
//! )
//! .unwrap();
//!
//! let back = from_str_with(&text, |k: Key<'_>, v: Value| decoder.decode(k, v)).unwrap();
//! assert_eq!(back, jsonx!([(set [1, 2]), "***"]));
//! ```
//!
//! ## Logging
//!
//! Encoding, decoding and function evaluation emit `tracing` events at
//! `debug` and `trace` level. Install a subscriber to see them.

pub mod codec;
pub mod de;
pub mod decode;
pub mod encode;
pub mod error;
pub mod eval;
pub mod function;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod tags;
pub mod value;
pub mod walk;

pub use codec::Codec;
pub use de::{from_str_with, from_value};
pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{Error, Result};
pub use eval::Evaluator;
pub use function::Function;
pub use map::{ObjectMap, ValueMap, ValueSet};
pub use options::{CodecOptions, FunctionPolicy};
pub use ser::{to_string_with, to_value, ValueSerializer};
pub use tags::{TagKind, TagScheme};
pub use value::{Number, Value};
pub use walk::{walk, Key};
