//! Audit orchestration
//!
//! Runs the fixed probe sequence against one target with mandatory
//! inter-probe pacing, and appends every result to a caller-owned session.
//! The session is an explicit object rather than ambient state so multiple
//! concurrent audits can never interfere.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AuditError, ValidationError};
use crate::pace::Pacer;
use crate::probes::{OracleSweep, ProbeCatalog, ProbeResult};

/// Failure-shaped record for a sweep probe whose transport call failed
///
/// Distinct from [`ProbeResult`]: a probe that never resolved produces no
/// verdict, only the error it hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbeFailure {
    /// Probe identity
    pub name: String,

    /// The sweep target the probe was running against
    pub url: String,

    /// What went wrong
    pub error: String,
}

/// Ordered, append-only record of one audit session
///
/// Cleared only by explicit caller action; the core never resets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditSession {
    /// Single-target probe results, in execution order
    pub results: Vec<ProbeResult>,

    /// Sweep probes that failed at the transport level
    #[serde(default)]
    pub failures: Vec<ProbeFailure>,

    /// Batch existence-oracle sweeps, in execution order
    pub oracle_sweeps: Vec<OracleSweep>,

    /// When the session was opened
    pub started_at: DateTime<Utc>,
}

impl Default for AuditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AuditSession {
    pub fn new() -> Self {
        Self {
            results: Vec::new(),
            failures: Vec::new(),
            oracle_sweeps: Vec::new(),
            started_at: Utc::now(),
        }
    }

    pub fn push(&mut self, result: ProbeResult) {
        self.results.push(result);
    }

    pub fn push_failure(&mut self, failure: ProbeFailure) {
        self.failures.push(failure);
    }

    pub fn push_sweep(&mut self, sweep: OracleSweep) {
        self.oracle_sweeps.push(sweep);
    }

    pub fn clear(&mut self) {
        self.results.clear();
        self.failures.clear();
        self.oracle_sweeps.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty() && self.failures.is_empty() && self.oracle_sweeps.is_empty()
    }
}

/// Runs the default probe sweep with pacing
pub struct Auditor {
    catalog: ProbeCatalog,
    pacer: Arc<dyn Pacer>,
    shortcode_path: Regex,
}

impl Auditor {
    pub fn new(catalog: ProbeCatalog, pacer: Arc<dyn Pacer>) -> Self {
        Self {
            catalog,
            pacer,
            // Reel and post URLs carry the content identifier in the path.
            shortcode_path: Regex::new(r"/(reel|p)/([A-Za-z0-9_-]+)/")
                .expect("shortcode path pattern is valid"),
        }
    }

    /// The underlying probe catalog, for one-off probes outside the sweep
    pub fn catalog(&self) -> &ProbeCatalog {
        &self.catalog
    }

    /// Normalize a raw target URL for the sweep.
    ///
    /// Requires one of the primary platform hostnames, forces a trailing
    /// slash and strips any query string or fragment.
    pub fn normalize_target(&self, raw: &str) -> Result<String, ValidationError> {
        let mut url = Url::parse(raw).map_err(|e| ValidationError::InvalidUrl(e.to_string()))?;

        let host = url.host_str().unwrap_or("").to_lowercase();
        if host != "instagram.com" && host != "www.instagram.com" {
            return Err(ValidationError::DisallowedHost(raw.to_string()));
        }

        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        url.set_query(None);
        url.set_fragment(None);

        Ok(url.to_string())
    }

    /// Extract the content identifier from a normalized target URL.
    pub fn extract_shortcode(&self, target: &str) -> Option<String> {
        self.shortcode_path
            .captures(target)
            .map(|caps| caps[2].to_string())
    }

    /// Run the default multi-probe sweep against one target.
    ///
    /// Sequence: public page, `__a=1`, `__a=1&__d=dis`, then oEmbed when the
    /// target path carries a content identifier; without one the sweep issues
    /// three probes instead of four. Results append to the session in order.
    /// A probe that fails at the transport level leaves a failure entry and
    /// the sweep moves on to the next probe; only input validation aborts.
    pub async fn run_sweep(
        &self,
        session: &mut AuditSession,
        raw_target: &str,
    ) -> Result<(), AuditError> {
        let target = self.normalize_target(raw_target)?;
        tracing::info!(%target, "starting audit sweep");

        let outcome = self.catalog.public_page(&target).await;
        Self::record(session, "Public Page (login-wall)", &target, outcome)?;
        self.pacer.pause().await;

        let outcome = self.catalog.a1_query(&target, false).await;
        Self::record(session, "?__a=1", &target, outcome)?;
        self.pacer.pause().await;

        let outcome = self.catalog.a1_query(&target, true).await;
        Self::record(session, "?__a=1&__d=dis", &target, outcome)?;

        if let Some(shortcode) = self.extract_shortcode(&target) {
            self.pacer.pause().await;
            let outcome = self.catalog.oembed(&shortcode).await;
            Self::record(session, "oEmbed", &target, outcome)?;
        } else {
            tracing::debug!(%target, "no content identifier in path; skipping oEmbed probe");
        }

        tracing::info!(
            probes = session.results.len(),
            failed = session.failures.len(),
            "sweep complete"
        );
        Ok(())
    }

    /// Record one sweep step: a result on success, a failure entry on a
    /// transport error. Validation errors still propagate.
    fn record(
        session: &mut AuditSession,
        name: &str,
        url: &str,
        outcome: Result<ProbeResult, AuditError>,
    ) -> Result<(), AuditError> {
        match outcome {
            Ok(result) => session.push(result),
            Err(AuditError::Transport(err)) => {
                tracing::warn!(probe = name, error = %err, "probe failed; continuing sweep");
                session.push_failure(ProbeFailure {
                    name: name.to_string(),
                    url: url.to_string(),
                    error: err.to_string(),
                });
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }

    /// Run the batch existence oracle and append the sweep to the session.
    pub async fn run_oracle(
        &self,
        session: &mut AuditSession,
        shortcodes: &[String],
    ) -> Result<(), AuditError> {
        let sweep = self
            .catalog
            .existence_oracle(shortcodes, self.pacer.as_ref())
            .await?;
        session.push_sweep(sweep);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::mock::{html, json, MockTransport};
    use crate::pace::NoopPacer;
    use crate::probes::Verdict;

    fn auditor(mock: Arc<MockTransport>) -> Auditor {
        Auditor::new(ProbeCatalog::new(mock), Arc::new(NoopPacer))
    }

    #[test]
    fn normalize_adds_slash_and_strips_query() {
        let auditor = auditor(Arc::new(MockTransport::new()));
        let target = auditor
            .normalize_target("https://www.instagram.com/reel/abc123?igsh=tracking#frag")
            .unwrap();
        assert_eq!(target, "https://www.instagram.com/reel/abc123/");
    }

    #[test]
    fn normalize_rejects_foreign_host() {
        let auditor = auditor(Arc::new(MockTransport::new()));
        let err = auditor.normalize_target("https://example.com/reel/abc/").unwrap_err();
        assert!(matches!(err, ValidationError::DisallowedHost(_)));
        // CDN hosts serve assets, not pages; they are not sweep targets.
        assert!(auditor
            .normalize_target("https://scontent.cdninstagram.com/v/x.mp4")
            .is_err());
    }

    #[test]
    fn shortcode_extraction() {
        let auditor = auditor(Arc::new(MockTransport::new()));
        assert_eq!(
            auditor.extract_shortcode("https://www.instagram.com/reel/Cxy-12_ab/"),
            Some("Cxy-12_ab".to_string())
        );
        assert_eq!(
            auditor.extract_shortcode("https://www.instagram.com/p/Abc123/"),
            Some("Abc123".to_string())
        );
        assert_eq!(
            auditor.extract_shortcode("https://www.instagram.com/someuser/"),
            None
        );
    }

    #[tokio::test]
    async fn sweep_with_shortcode_issues_four_probes() {
        let mock = Arc::new(MockTransport::new());
        mock.push(html(200, "Log in"));
        mock.push(json(200, r#"{"error":"login required"}"#));
        mock.push(json(200, r#"{"error":"login required"}"#));
        mock.push(json(404, "{}"));
        let auditor = auditor(mock.clone());

        let mut session = AuditSession::new();
        auditor
            .run_sweep(&mut session, "https://www.instagram.com/reel/abc123/")
            .await
            .unwrap();

        assert_eq!(session.results.len(), 4);
        assert_eq!(mock.calls(), 4);
        assert_eq!(session.results[0].name, "Public Page (login-wall)");
        assert_eq!(session.results[3].name, "oEmbed");
        assert!(session.results.iter().all(|r| r.verdict == Verdict::Ok));
    }

    #[tokio::test]
    async fn sweep_without_shortcode_issues_three_probes() {
        let mock = Arc::new(MockTransport::new());
        mock.push(html(200, "Log in"));
        mock.push(json(200, r#"{"error":"login required"}"#));
        mock.push(json(200, r#"{"error":"login required"}"#));
        let auditor = auditor(mock.clone());

        let mut session = AuditSession::new();
        auditor
            .run_sweep(&mut session, "https://www.instagram.com/someuser/")
            .await
            .unwrap();

        assert_eq!(session.results.len(), 3);
        assert_eq!(mock.calls(), 3);
    }

    #[tokio::test]
    async fn sweep_continues_after_probe_failure() {
        let mock = Arc::new(MockTransport::new());
        mock.push(html(200, "Log in"));
        mock.push_error(TransportError::Timeout);
        mock.push(json(200, r#"{"error":"login required"}"#));
        mock.push(json(404, "{}"));
        let auditor = auditor(mock.clone());

        let mut session = AuditSession::new();
        auditor
            .run_sweep(&mut session, "https://www.instagram.com/reel/abc123/")
            .await
            .unwrap();

        // All four probes still ran; the failed one left a failure entry.
        assert_eq!(mock.calls(), 4);
        assert_eq!(session.results.len(), 3);
        assert_eq!(session.failures.len(), 1);
        assert_eq!(session.failures[0].name, "?__a=1");
        assert!(session.failures[0].error.contains("timed out"));
        assert_eq!(session.results[2].name, "oEmbed");
    }

    #[tokio::test]
    async fn sweep_rejects_bad_target_without_network() {
        let mock = Arc::new(MockTransport::new());
        let auditor = auditor(mock.clone());

        let mut session = AuditSession::new();
        let err = auditor
            .run_sweep(&mut session, "https://attacker.net/reel/abc/")
            .await
            .unwrap_err();

        assert!(matches!(err, AuditError::Validation(_)));
        assert_eq!(mock.calls(), 0);
        assert!(session.is_empty());
    }

    #[test]
    fn session_clear_is_explicit() {
        let mut session = AuditSession::new();
        session.push_sweep(OracleSweep {
            name: "Existence Oracle via oEmbed".to_string(),
            results: vec![],
        });
        assert!(!session.is_empty());
        session.clear();
        assert!(session.is_empty());
    }
}
