//! anonaudit - Anonymous-access leak auditor
//!
//! Audits whether unauthenticated HTTP requests against a social platform's
//! public surfaces (page HTML, undocumented query parameters, the oEmbed
//! endpoint, CDN asset URLs) leak metadata or media that should require
//! authentication. Defensive tool: use only against content you control or
//! are authorized to test.

pub mod allowlist;
pub mod audit;
pub mod classify;
pub mod config;
pub mod error;
pub mod http;
pub mod pace;
pub mod probes;
pub mod report;

pub use allowlist::HostAllowlist;
pub use audit::{AuditSession, Auditor, ProbeFailure};
pub use config::AuditConfig;
pub use error::{AuditError, TransportError, ValidationError};
pub use probes::{OracleVerdict, ProbeCatalog, ProbeResult, Verdict};
