//! JSON report generator

use anyhow::Result;

use super::AuditReport;

/// Generate a pretty-printed JSON report
pub fn generate(report: &AuditReport<'_>) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
