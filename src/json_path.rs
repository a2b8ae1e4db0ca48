//! Dot-path navigation over parsed JSON
//!
//! `offers.0.price` walks object keys, numeric segments index arrays.

use serde_json::Value;

/// Walk `path` from `value`. An empty path returns `value` itself.
pub fn navigate<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;

    for segment in path.split('.').map(str::trim).filter(|s| !s.is_empty()) {
        current = match current {
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            Value::Object(map) => map.get(segment)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Render a JSON value as field text: strings unquoted, null as absent
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        _ => Some(value.to_string()),
    }
}

/// `navigate` followed by `value_to_text`
pub fn resolve(value: &Value, path: &str) -> Option<String> {
    navigate(value, path).and_then(value_to_text)
}
