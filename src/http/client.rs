//! HTTP transport implementation

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT_LANGUAGE};
use std::str::FromStr;
use std::time::Duration;

use super::request::ProbeRequest;
use super::response::ProbeResponse;
use crate::config::AuditConfig;
use crate::error::TransportError;

/// Transport seam for probe execution
///
/// Probes go through this trait so tests can substitute a call-counting
/// stub and verify that rejected inputs never reach the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one request and return the response. No retries.
    async fn fetch(&self, request: &ProbeRequest) -> Result<ProbeResponse, TransportError>;
}

/// Live HTTP transport backed by reqwest
///
/// Presents a fixed desktop-browser identity (user agent plus language
/// preference) and follows redirects transparently.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport from audit configuration
    pub fn new(config: &AuditConfig) -> Result<Self, TransportError> {
        let mut default_headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&config.accept_language) {
            default_headers.insert(ACCEPT_LANGUAGE, value);
        }

        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .default_headers(default_headers)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .timeout(Duration::from_secs(config.request_timeout))
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &ProbeRequest) -> Result<ProbeResponse, TransportError> {
        let method = reqwest::Method::from_str(&request.method)
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let mut builder = self.client.request(method, &request.url);

        // Caller headers merge on top of the client's fixed defaults.
        let mut headers = HeaderMap::new();
        for (key, value) in &request.headers {
            if let (Ok(name), Ok(val)) = (HeaderName::from_str(key), HeaderValue::from_str(value)) {
                headers.insert(name, val);
            }
        }
        builder = builder.headers(headers);

        tracing::debug!(method = %request.method, url = %request.url, "issuing probe request");

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let mut headers = std::collections::HashMap::new();
        for (key, value) in response.headers() {
            if let Ok(v) = value.to_str() {
                headers.insert(key.as_str().to_string(), v.to_string());
            }
        }

        // Buffer the body only for textual/JSON content; a video or image
        // payload stays on the wire and the body remains empty.
        let body = if ProbeResponse::is_textual(&content_type) {
            response.text().await?
        } else {
            String::new()
        };

        Ok(ProbeResponse {
            status,
            content_type,
            headers,
            body,
        })
    }
}
