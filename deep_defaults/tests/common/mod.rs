//! Shared fixtures for the integration tests.
//!
//! The values mirror the documents the merge is typically exercised with: a
//! small mixed object, a blog post with nested content, and a list of
//! records.

use rstest::fixture;
use serde_json::{Value, json};

/// Mixed object with a scalar, a nested object and an array.
#[fixture]
pub fn sample() -> Value {
    json!({
        "foo": 13,
        "bar": {"quz": false, "qux": "yes"},
        "baz": [1, 2, 3],
    })
}

/// Blog post with nested content used by replacer tests.
#[fixture]
pub fn post() -> Value {
    json!({
        "id": 192_345,
        "type": "post",
        "content": {"title": "Bloggg", "body": "A sample blog post."},
    })
}

/// Array of records used by positional replacer tests.
#[fixture]
pub fn records() -> Value {
    json!([{"foo": 7}, {"foo": 42}])
}

/// Read an integer field from a replacer's default or target entry.
pub fn foo_of(default: Option<&Value>, target: &deep_defaults::Patch) -> i64 {
    target
        .get("foo")
        .and_then(deep_defaults::Patch::as_scalar)
        .and_then(Value::as_i64)
        .or_else(|| default.and_then(|value| value.get("foo")).and_then(Value::as_i64))
        .unwrap_or_default()
}
