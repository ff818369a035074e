//! Shape normalisation for downloader responses.
//!
//! The downloader wraps its real payload as a JSON-encoded string in the
//! `message` field of an outer object. These functions are transport-free.

use serde_json::Value;

/// Maximum number of characters of a non-JSON body echoed back to callers.
pub const PREVIEW_CHARS: usize = 500;

/// Unwraps a double-encoded `message` field.
///
/// Returns the decoded inner value when `message` is a string holding a JSON
/// object or array; otherwise returns `outer` unchanged.
pub fn normalize(outer: Value) -> Value {
    let inner = outer
        .get("message")
        .and_then(Value::as_str)
        .and_then(|message| serde_json::from_str::<Value>(message).ok())
        .filter(|inner| inner.is_object() || inner.is_array());

    inner.unwrap_or(outer)
}

/// First `max_chars` characters of `text`, never splitting a code point.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_string(),
        None => text.to_string(),
    }
}
