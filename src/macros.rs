/// Builds a [`Value`](crate::Value) from a JSON-like literal.
///
/// Beyond plain JSON, `(map { k => v, ... })` builds a map with arbitrary
/// keys, `(set [ ... ])` builds a set and `(fn "text")` builds a function.
/// Any other parenthesized tokens are evaluated as a `Serialize` expression,
/// which is how negative numbers and computed values go inside arrays and
/// objects. Expressions are converted with [`to_value`](crate::to_value), so
/// an existing `Value` holding maps, sets or functions should be inserted
/// directly rather than through the macro.
///
/// ```rust
/// use serde_jsonx::{jsonx, Value};
///
/// let value = jsonx!({
///     "ids": (set [1, 2, 2]),
///     "names": (map { 1 => "one", (-1) => "minus one" }),
///     "add": (fn "(a, b) => a + b"),
///     "nested": [null, true, {"x": (map { [1, 2] => (set []) })}]
/// });
/// assert_eq!(value.get("ids").and_then(Value::as_set).map(|s| s.len()), Some(2));
/// ```
#[macro_export]
macro_rules! jsonx {
    (null) => {
        $crate::Value::Null
    };

    (true) => {
        $crate::Value::Bool(true)
    };

    (false) => {
        $crate::Value::Bool(false)
    };

    ([]) => {
        $crate::Value::Array(vec![])
    };

    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::Array(vec![$($crate::jsonx!($elem)),*])
    };

    ({}) => {
        $crate::Value::Object($crate::ObjectMap::new())
    };

    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::ObjectMap::new();
        $(
            object.insert($key.to_string(), $crate::jsonx!($value));
        )*
        $crate::Value::Object(object)
    }};

    (map { $($key:tt => $value:tt),* $(,)? }) => {{
        #[allow(unused_mut)]
        let mut map = $crate::ValueMap::new();
        $(
            map.insert($crate::jsonx!($key), $crate::jsonx!($value));
        )*
        $crate::Value::Map(map)
    }};

    (set [ $($member:tt),* $(,)? ]) => {{
        #[allow(unused_mut)]
        let mut set = $crate::ValueSet::new();
        $(
            set.insert($crate::jsonx!($member));
        )*
        $crate::Value::Set(set)
    }};

    (fn $source:expr) => {
        $crate::Value::Function($crate::Function::new($source))
    };

    (( $($inner:tt)+ )) => {
        $crate::jsonx!($($inner)+)
    };

    // Fallback for any serializable expression
    ($s:expr) => {
        $crate::to_value(&$s).unwrap_or($crate::Value::Null)
    };
}

#[cfg(test)]
mod tests {
    use crate::{Number, ObjectMap, Value, ValueMap, ValueSet};

    #[test]
    fn test_jsonx_macro_primitives() {
        assert_eq!(jsonx!(null), Value::Null);
        assert_eq!(jsonx!(true), Value::Bool(true));
        assert_eq!(jsonx!(false), Value::Bool(false));
        assert_eq!(jsonx!(42), Value::Number(Number::Integer(42)));
        assert_eq!(jsonx!(3.5), Value::Number(Number::Float(3.5)));
        assert_eq!(jsonx!("hello"), Value::String("hello".to_string()));
        assert_eq!(jsonx!((-7)), Value::from(-7));
    }

    #[test]
    fn test_jsonx_macro_objects() {
        assert_eq!(jsonx!({}), Value::Object(ObjectMap::new()));

        let obj = jsonx!({
            "name": "Alice",
            "scores": [1, 2]
        });
        let map = obj.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get("name"), Some(&Value::from("Alice")));
        assert_eq!(
            map.get("scores"),
            Some(&Value::Array(vec![Value::from(1), Value::from(2)]))
        );
    }

    #[test]
    fn test_jsonx_macro_map_and_set() {
        let mut expected = ValueMap::new();
        expected.insert(Value::from(1), Value::from("one"));
        expected.insert(Value::Bool(true), Value::Null);
        assert_eq!(jsonx!(map { 1 => "one", true => null }), Value::Map(expected));

        let set = jsonx!((set ["a", "b", "a"]));
        assert_eq!(set.as_set().map(ValueSet::len), Some(2));

        assert_eq!(jsonx!(set []), Value::Set(ValueSet::new()));
        assert_eq!(jsonx!(map {}), Value::Map(ValueMap::new()));
    }

    #[test]
    fn test_jsonx_macro_functions() {
        let value = jsonx!({ "f": (fn "(a) => a * 2") });
        let f = value.get("f").and_then(Value::as_function).unwrap();
        assert_eq!(f.source(), "(a) => a * 2");
    }

    #[test]
    fn test_jsonx_macro_nesting() {
        let value = jsonx!([(map { [1] => (set [{}]) })]);
        let map = value.as_array().unwrap()[0].as_map().unwrap();
        let member = map.get(&Value::Array(vec![Value::from(1)])).unwrap();
        assert!(member.as_set().unwrap().contains(&Value::Object(ObjectMap::new())));
    }
}
