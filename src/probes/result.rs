//! Probe results and verdicts

use serde::{Deserialize, Serialize};

use crate::classify::JsonMeta;

/// Maximum characters kept in a stored body preview.
pub const PREVIEW_MAX_CHARS: usize = 800;

/// Marker appended when a preview was cut short.
pub const TRUNCATION_MARKER: &str = "... [truncated]";

/// Marker recorded for a batch identifier that failed charset validation.
pub const INVALID_SHORTCODE: &str = "invalid_shortcode";

/// Severity verdict for a single-target probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    /// Expected behavior, no leak signal
    Ok,
    /// Anomaly worth a manual look
    Review,
    /// Metadata or media retrievable without authentication
    High,
}

impl Verdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Review => "REVIEW",
            Verdict::High => "HIGH",
        }
    }
}

/// Per-identifier verdict for the batch existence oracle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OracleVerdict {
    /// Media fields returned without error markers
    LeakyMeta,
    /// Endpoint reported the identifier as nonexistent
    NotFound,
    /// 200 without any leak signal
    OkJsonOrEmpty,
    /// Anything else
    Other,
}

impl OracleVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            OracleVerdict::LeakyMeta => "LEAKY_META",
            OracleVerdict::NotFound => "NOT_FOUND",
            OracleVerdict::OkJsonOrEmpty => "OK_JSON_OR_EMPTY",
            OracleVerdict::Other => "OTHER",
        }
    }
}

/// Outcome of one probe execution
///
/// Immutable once constructed; emitted exactly once per probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Probe identity
    pub name: String,

    /// URL actually requested
    pub url: String,

    /// HTTP status of the response
    pub status: u16,

    /// Content-Type of the response
    pub content_type: String,

    /// Trimmed body preview, capped at [`PREVIEW_MAX_CHARS`]
    pub body_preview: String,

    /// JSON summary, present only for JSON-oriented probes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_meta: Option<JsonMeta>,

    /// Severity verdict
    pub verdict: Verdict,

    /// Human-readable rationale
    pub detail: String,
}

/// One entry of an existence-oracle sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleItem {
    /// The content identifier that was probed
    pub shortcode: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verdict: Option<OracleVerdict>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_preview: Option<String>,

    /// Error marker when the item never produced a verdict
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl OracleItem {
    /// Item for an identifier that failed charset validation (no network call)
    pub fn invalid(shortcode: &str) -> Self {
        Self {
            shortcode: shortcode.to_string(),
            status: None,
            verdict: None,
            body_preview: None,
            error: Some(INVALID_SHORTCODE.to_string()),
        }
    }

    /// Item for an identifier whose fetch failed
    pub fn failed(shortcode: &str, error: impl std::fmt::Display) -> Self {
        Self {
            shortcode: shortcode.to_string(),
            status: None,
            verdict: None,
            body_preview: None,
            error: Some(error.to_string()),
        }
    }
}

/// Ordered results of one batch existence-oracle run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleSweep {
    pub name: String,
    pub results: Vec<OracleItem>,
}

/// Build the stored preview of a response body.
///
/// The body is trimmed first; when longer than [`PREVIEW_MAX_CHARS`]
/// characters the preview is exactly that many characters followed by the
/// truncation marker. Cuts on character boundaries, never mid-codepoint.
pub fn preview_body(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(PREVIEW_MAX_CHARS) {
        Some((cut, _)) => format!("{}{}", &trimmed[..cut], TRUNCATION_MARKER),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_unchanged() {
        assert_eq!(preview_body("hello"), "hello");
        assert_eq!(preview_body("  padded  "), "padded");
        assert_eq!(preview_body(""), "");
    }

    #[test]
    fn exactly_limit_is_not_truncated() {
        let body = "a".repeat(PREVIEW_MAX_CHARS);
        assert_eq!(preview_body(&body), body);
    }

    #[test]
    fn long_body_is_cut_with_marker() {
        let body = "a".repeat(PREVIEW_MAX_CHARS + 1);
        let preview = preview_body(&body);
        assert_eq!(
            preview.chars().count(),
            PREVIEW_MAX_CHARS + TRUNCATION_MARKER.chars().count()
        );
        assert!(preview.ends_with(TRUNCATION_MARKER));
        assert_eq!(&preview[..PREVIEW_MAX_CHARS], "a".repeat(PREVIEW_MAX_CHARS));
    }

    #[test]
    fn multibyte_body_cuts_on_char_boundary() {
        let body = "\u{00e9}".repeat(PREVIEW_MAX_CHARS + 50);
        let preview = preview_body(&body);
        assert!(preview.ends_with(TRUNCATION_MARKER));
        let kept = preview.trim_end_matches(TRUNCATION_MARKER);
        assert_eq!(kept.chars().count(), PREVIEW_MAX_CHARS);
    }

    #[test]
    fn verdict_wire_names() {
        assert_eq!(serde_json::to_string(&Verdict::High).unwrap(), "\"HIGH\"");
        assert_eq!(
            serde_json::to_string(&OracleVerdict::LeakyMeta).unwrap(),
            "\"LEAKY_META\""
        );
        assert_eq!(
            serde_json::to_string(&OracleVerdict::OkJsonOrEmpty).unwrap(),
            "\"OK_JSON_OR_EMPTY\""
        );
    }

    #[test]
    fn oracle_item_serializes_sparsely() {
        let item = OracleItem::invalid("bad code!");
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["error"], INVALID_SHORTCODE);
        assert!(json.get("status").is_none());
        assert!(json.get("verdict").is_none());
    }
}
