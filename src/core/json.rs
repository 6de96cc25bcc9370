// src/core/json.rs
//
// JSON record helpers: flattening nested objects into dotted columns,
// and the one string coercion every filter comparison goes through.

use serde_json::{Map, Value};

/// Flatten `obj` into `out` as ("a.b.c", value) pairs, depth first.
/// Keys keep their literal text; only nesting adds dots. Arrays and
/// scalars stop the recursion and land as-is.
pub fn flatten_into(prefix: &str, obj: &Map<String, Value>, out: &mut Vec<(String, Value)>) {
    for (key, value) in obj {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(&path, inner, out),
            other => out.push((path, other.clone())),
        }
    }
}

/// Canonical string form of a cell, used as the comparison key for
/// categorical filters and as the option text shown for them.
///
/// Strings pass through unquoted; everything else takes its compact
/// JSON rendering. Missing and null both read as empty.
pub fn display_string(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => s!(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
