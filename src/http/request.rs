//! Probe request types

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single probe request
///
/// Constructed fresh per probe invocation and never reused. Headers set here
/// merge on top of the transport's fixed browser-identity defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeRequest {
    /// HTTP method
    pub method: String,

    /// Request URL
    pub url: String,

    /// Header overrides for this request
    pub headers: HashMap<String, String>,
}

impl ProbeRequest {
    /// Create a new request
    pub fn new(method: &str, url: &str) -> Self {
        Self {
            method: method.to_uppercase(),
            url: url.to_string(),
            headers: HashMap::new(),
        }
    }

    /// GET request for a URL
    pub fn get(url: &str) -> Self {
        Self::new("GET", url)
    }

    /// HEAD request for a URL
    pub fn head(url: &str) -> Self {
        Self::new("HEAD", url)
    }

    /// Add a header override
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Request a JSON response
    pub fn accept_json(self) -> Self {
        self.header("Accept", "application/json")
    }

    /// Request only the leading bytes of the resource
    pub fn range(self, from: u64, to: u64) -> Self {
        self.header("Range", &format!("bytes={}-{}", from, to))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_uppercased() {
        let req = ProbeRequest::new("head", "https://www.instagram.com/");
        assert_eq!(req.method, "HEAD");
    }

    #[test]
    fn header_helpers() {
        let req = ProbeRequest::get("https://www.instagram.com/")
            .accept_json()
            .range(0, 2047);
        assert_eq!(req.headers.get("Accept").unwrap(), "application/json");
        assert_eq!(req.headers.get("Range").unwrap(), "bytes=0-2047");
    }
}
