//! Report generation
//!
//! Renders a finished audit session as Markdown (documentation-friendly) or
//! JSON (machine-readable). Strictly a consumer of probe results; nothing
//! here influences verdict computation.

pub mod json;
pub mod markdown;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::audit::AuditSession;

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report title
    pub title: String,
    /// Audited target
    pub target: String,
    /// Report generation time
    pub generated_at: DateTime<Utc>,
    /// Tool version
    pub tool_version: String,
}

impl ReportMetadata {
    pub fn new(target: &str) -> Self {
        Self {
            title: "Anonymous Access Audit Report".to_string(),
            target: target.to_string(),
            generated_at: Utc::now(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Complete report: metadata plus the session it describes
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport<'a> {
    pub metadata: ReportMetadata,
    #[serde(flatten)]
    pub session: &'a AuditSession,
}

impl<'a> AuditReport<'a> {
    pub fn new(session: &'a AuditSession, metadata: ReportMetadata) -> Self {
        Self { metadata, session }
    }
}
