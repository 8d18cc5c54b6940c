use serde_jsonx::{jsonx, Number, ObjectMap, Value, ValueMap, ValueSet};

#[test]
fn test_jsonx_macro_null() {
    assert_eq!(jsonx!(null), Value::Null);
}

#[test]
fn test_jsonx_macro_booleans() {
    assert_eq!(jsonx!(true), Value::Bool(true));
    assert_eq!(jsonx!(false), Value::Bool(false));
}

#[test]
fn test_jsonx_macro_numbers() {
    assert_eq!(jsonx!(42), Value::Number(Number::Integer(42)));
    assert_eq!(jsonx!(3.5), Value::Number(Number::Float(3.5)));
    assert_eq!(jsonx!(-123), Value::Number(Number::Integer(-123)));
}

#[test]
fn test_jsonx_macro_strings() {
    assert_eq!(jsonx!("hello"), Value::String("hello".to_string()));
    assert_eq!(jsonx!(""), Value::String(String::new()));
}

#[test]
fn test_jsonx_macro_expressions() {
    let name = "Ada";
    let level = 3 * 7;
    let value = jsonx!({ "name": name, "level": level, "tags": (vec!["a", "b"]) });
    assert_eq!(value.get("name"), Some(&Value::from("Ada")));
    assert_eq!(value.get("level"), Some(&Value::from(21)));
    assert_eq!(
        value.get("tags"),
        Some(&Value::Array(vec![Value::from("a"), Value::from("b")]))
    );
}

#[test]
fn test_jsonx_macro_nested_objects() {
    let value = jsonx!({
        "user": {
            "name": "Alice",
            "roles": ["admin", "dev"]
        },
        "empty": {}
    });

    let user = value.get("user").and_then(Value::as_object).unwrap();
    assert_eq!(user.get("name"), Some(&Value::from("Alice")));
    assert_eq!(value.get("empty"), Some(&Value::Object(ObjectMap::new())));
}

#[test]
fn test_jsonx_macro_maps() {
    let value = jsonx!((map {
        1 => "one",
        "two" => 2,
        [3] => (map { null => false }),
    }));

    let map = value.as_map().unwrap();
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&Value::from(1)), Some(&Value::from("one")));
    assert_eq!(map.get(&Value::from("two")), Some(&Value::from(2)));

    let mut inner = ValueMap::new();
    inner.insert(Value::Null, Value::Bool(false));
    assert_eq!(
        map.get(&Value::Array(vec![Value::from(3)])),
        Some(&Value::Map(inner))
    );
}

#[test]
fn test_jsonx_macro_sets_deduplicate() {
    let value = jsonx!((set [1, 1.0, "1", [1], [1]]));
    let set = value.as_set().unwrap();
    assert_eq!(set.len(), 3);
    assert!(set.contains(&Value::from("1")));

    assert_eq!(jsonx!((set [])), Value::Set(ValueSet::new()));
}

#[test]
fn test_jsonx_macro_functions() {
    let value = jsonx!([(fn "(a, b) => a - b")]);
    let f = value.as_array().unwrap()[0].as_function().unwrap();
    assert_eq!(
        f.call(&[Value::from(5), Value::from(3)]).unwrap(),
        Value::from(2)
    );
}
