//! Error types for anonaudit
//!
//! Two propagated kinds: input validation failures (rejected before any
//! network I/O) and transport failures (caught at the probe boundary).
//! JSON classification never fails; a parse error degrades to an empty
//! `JsonMeta` instead of an error.

use thiserror::Error;

/// Main error type for audit operations
#[derive(Error, Debug)]
pub enum AuditError {
    /// Input rejected before any network call
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Network-level failure while executing a probe
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Client-input failures, never reported as a probe verdict
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("URL host is not on the target allowlist: {0}")]
    DisallowedHost(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid shortcode: {0}")]
    InvalidShortcode(String),

    #[error("Missing required input: {0}")]
    MissingInput(&'static str),
}

/// Transport failures (connection, DNS, body read)
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Request timed out")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}
