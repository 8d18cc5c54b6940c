//! Round-trip maps, sets and functions through JSON text.
//!
//! Run with: cargo run --example roundtrip

use serde_jsonx::{jsonx, Codec, CodecOptions, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let codec = Codec::with_options(CodecOptions::pretty());

    let state = jsonx!({
        "podium": (map { 1 => "Alice", 2 => "Bob", 3 => "Carol" }),
        "visited": (set ["home", "about", "home"]),
        "score": (fn "function score(base, bonus) { return base * 2 + bonus; }")
    });

    let text = codec.stringify(&state, None)?;
    println!("Encoded:\n{}\n", text);

    let back = codec.parse(&text)?;

    let podium = back.get("podium").and_then(Value::as_map).ok_or("podium is not a map")?;
    println!("First place: {}", podium.get(&Value::from(1)).unwrap_or(&Value::Null));

    let visited = back.get("visited").and_then(Value::as_set).ok_or("visited is not a set")?;
    println!("Distinct pages visited: {}", visited.len());

    let score = back.get("score").and_then(Value::as_function).ok_or("score is not a function")?;
    println!("score(10, 3) = {}", score.call(&[Value::from(10), Value::from(3)])?);

    Ok(())
}
