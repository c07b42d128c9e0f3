//! Probe response types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response to a single probe request
///
/// The body is empty when the content type was non-textual: binary payloads
/// are never buffered, callers rely on status and content type alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status: u16,

    /// Content-Type header value, empty string when absent
    pub content_type: String,

    /// Response headers
    pub headers: HashMap<String, String>,

    /// Response body (textual/JSON content types only)
    pub body: String,
}

impl ProbeResponse {
    /// Check if the response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether this content type gets its body buffered
    pub fn is_textual(content_type: &str) -> bool {
        content_type.starts_with("text/") || content_type.contains("json")
    }

    /// Whether the content type names a media payload
    pub fn is_media(&self) -> bool {
        self.content_type.starts_with("video/") || self.content_type.starts_with("image/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn textual_content_types() {
        assert!(ProbeResponse::is_textual("text/html; charset=utf-8"));
        assert!(ProbeResponse::is_textual("application/json"));
        assert!(ProbeResponse::is_textual("application/ld+json"));
        assert!(!ProbeResponse::is_textual("video/mp4"));
        assert!(!ProbeResponse::is_textual("image/jpeg"));
        assert!(!ProbeResponse::is_textual("application/octet-stream"));
    }

    #[test]
    fn media_content_types() {
        let mut response = ProbeResponse {
            content_type: "video/mp4".to_string(),
            ..Default::default()
        };
        assert!(response.is_media());
        response.content_type = "image/jpeg".to_string();
        assert!(response.is_media());
        response.content_type = "text/html".to_string();
        assert!(!response.is_media());
    }
}
