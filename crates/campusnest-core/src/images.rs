//! Image field decoding and URL resolution.
//!
//! ## Observed wire shapes for `images`
//!
//! The backend stores property images as a JSON column and, depending on the
//! endpoint, returns it either as a real array or as the column's raw text:
//!
//! - `["/uploads/a.jpg", "/uploads/b.jpg"]`
//! - `"[\"/uploads/a.jpg\",\"/uploads/b.jpg\"]"`
//! - the same string encoded a second time (seen on multipart update echoes)
//! - `null`, `""`, or the key missing entirely for listings without photos
//!
//! Everything is materialized as an ordered `Vec<String>` at deserialization
//! time so renderers never see the string form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// How many layers of string encoding are unwrapped before giving up.
const MAX_ENCODING_DEPTH: usize = 2;

/// Serde adapter for image-list fields. Use with
/// `#[serde(default, deserialize_with = "images::deserialize")]`.
///
/// # Errors
///
/// Fails when the value is neither a list of strings nor a string holding a
/// JSON-encoded list of strings.
pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    decode_value(raw.unwrap_or(Value::Null), 0).map_err(serde::de::Error::custom)
}

/// Decodes an images field that arrived as raw text.
///
/// # Errors
///
/// Returns a description of the problem when `raw` is not a JSON-encoded list
/// of strings.
pub fn decode_images(raw: &str) -> Result<Vec<String>, String> {
    decode_value(Value::String(raw.to_owned()), 0)
}

fn decode_value(value: Value, depth: usize) -> Result<Vec<String>, String> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::String(path) => Ok(path),
                other => Err(format!("image entry is not a string: {other}")),
            })
            .collect(),
        Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(Vec::new());
            }
            if depth >= MAX_ENCODING_DEPTH {
                return Err(format!("images nested more than {MAX_ENCODING_DEPTH} encodings deep"));
            }
            let inner: Value = serde_json::from_str(trimmed)
                .map_err(|e| format!("images string is not valid JSON: {e}"))?;
            decode_value(inner, depth + 1)
        }
        other => Err(format!("unexpected images value: {other}")),
    }
}

/// Rewrites a backend-relative image path into an absolute URL.
///
/// Absolute `http(s)` URLs and `data:` URIs are returned unchanged. Returns
/// `None` for an empty path.
#[must_use]
pub fn resolve_image_url(backend_base: &str, path: &str) -> Option<String> {
    let path = path.trim();
    if path.is_empty() {
        return None;
    }
    let lower = path.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") || lower.starts_with("data:") {
        return Some(path.to_owned());
    }
    Some(format!(
        "{}/{}",
        backend_base.trim_end_matches('/'),
        path.trim_start_matches('/')
    ))
}
