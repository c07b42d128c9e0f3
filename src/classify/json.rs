//! JSON structure analysis
//!
//! Extracts a bounded, safe summary of a JSON response body. Never fails:
//! a body that does not parse yields `is_json = false` and default fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys whose presence at the object root indicates media metadata.
pub const MEDIA_KEYS: &[&str] = &[
    "thumbnail_url",
    "video_url",
    "display_url",
    "graphql",
    "items",
    "html",
    "author_name",
];

/// Keys whose presence at the object root indicates an error body.
pub const ERROR_KEYS: &[&str] = &["error", "error_message", "error_type", "errorSummary"];

/// Maximum number of root keys captured per response.
pub const MAX_KEYS: usize = 20;

/// Summary of a JSON response body
///
/// Invariant: when `is_json` is false every other field holds its default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonMeta {
    /// Whether the body parsed as JSON at all
    pub is_json: bool,

    /// Root object keys in encounter order, capped at [`MAX_KEYS`]
    pub keys: Vec<String>,

    /// Any media-indicating key present at the root
    pub has_media_fields: bool,

    /// Any error-indicating key present at the root
    pub error_like: bool,
}

/// Analyze a response body as JSON.
///
/// Only plain-object roots are inspected; arrays and scalars count as JSON
/// but produce no keys or flags. The media and error checks are independent
/// and may both be true; verdict rules decide priority.
pub fn analyze_json(text: &str) -> JsonMeta {
    let mut meta = JsonMeta::default();

    let Ok(value) = serde_json::from_str::<Value>(text) else {
        return meta;
    };
    meta.is_json = true;

    if let Some(object) = value.as_object() {
        meta.keys = object.keys().take(MAX_KEYS).cloned().collect();
        meta.has_media_fields = MEDIA_KEYS.iter().any(|k| object.contains_key(*k));
        meta.error_like = ERROR_KEYS.iter().any(|k| object.contains_key(*k));
    }

    meta
}
