//! Property-based tests for the codec round trip.
//!
//! Generated trees mix plain containers with maps and sets at any depth.
//! Floats are left out: `1.0` and `1` are the same value but not the same
//! text, which makes textual comparisons below noisy without adding cover.

use proptest::prelude::*;
use serde_jsonx::{Codec, CodecOptions, TagScheme, Value, ValueMap, ValueSet};

fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,6}".prop_map(Value::from),
    ]
}

fn tree() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z]{1,4}", inner.clone()), 0..6)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
            prop::collection::vec((inner.clone(), inner.clone()), 0..6)
                .prop_map(|entries| Value::Map(entries.into_iter().collect::<ValueMap>())),
            prop::collection::vec(inner, 0..6)
                .prop_map(|members| Value::Set(members.into_iter().collect::<ValueSet>())),
        ]
    })
}

proptest! {
    #[test]
    fn prop_round_trip(value in tree()) {
        let codec = Codec::new();
        let text = codec.stringify(&value, None).unwrap();
        prop_assert_eq!(codec.parse(&text).unwrap(), value);
    }

    #[test]
    fn prop_round_trip_pretty(value in tree(), indent in 0usize..16) {
        let codec = Codec::with_options(CodecOptions::new().with_indent(indent));
        let text = codec.stringify(&value, None).unwrap();
        prop_assert_eq!(codec.parse(&text).unwrap(), value);
    }

    #[test]
    fn prop_insertion_order_survives(value in tree()) {
        // Equality ignores order in objects, maps and sets; the rendering does not.
        let codec = Codec::new();
        let back = codec.parse(&codec.stringify(&value, None).unwrap()).unwrap();
        prop_assert_eq!(back.to_string(), value.to_string());
    }

    #[test]
    fn prop_output_is_plain_json(value in tree()) {
        let text = Codec::new().stringify(&value, None).unwrap();
        prop_assert!(serde_json::from_str::<serde_json::Value>(&text).is_ok());
    }

    #[test]
    fn prop_shared_token_round_trip(value in tree(), token in "[a-f0-9]{8}") {
        let writer = Codec::with_tags(TagScheme::with_token(token.clone()).unwrap(), CodecOptions::new());
        let reader = Codec::with_tags(TagScheme::with_token(token).unwrap(), CodecOptions::new());
        let text = writer.stringify(&value, None).unwrap();
        prop_assert_eq!(reader.parse(&text).unwrap(), value);
    }

    #[test]
    fn prop_set_members_unique(members in prop::collection::vec(any::<i8>(), 0..20)) {
        let set: ValueSet = members.iter().copied().map(Value::from).collect();
        let codec = Codec::new();
        let back = codec.parse(&codec.stringify(&Value::Set(set.clone()), None).unwrap()).unwrap();
        let back = back.as_set().unwrap();
        prop_assert_eq!(back.len(), set.len());
        for member in set.iter() {
            prop_assert!(back.contains(member));
        }
    }
}
