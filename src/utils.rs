//! Small free-function helpers shared by the provider implementations.

use serde_json::Value;

use crate::error::{FeedError, Result};

/// Percent-encode a string for use as a URL path segment or query value.
pub fn encode(s: &str) -> String {
    urlencoding::encode(s).into_owned()
}

/// Walk a fixed key path into a JSON document.
///
/// Fails with [`FeedError::Parse`] naming the first missing key, so a
/// structure change on the source side shows up in the error message.
pub fn dig<'a>(value: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut current = value;
    for key in path {
        current = current
            .get(key)
            .ok_or_else(|| FeedError::Parse(format!("missing key `{key}` in source document")))?;
    }
    Ok(current)
}

/// Coerce a JSON id field to a string. Sources disagree on whether ids are
/// numbers or strings.
pub fn json_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
