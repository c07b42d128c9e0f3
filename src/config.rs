//! Audit configuration management

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for an audit run
///
/// All fields have defaults matching a realistic anonymous desktop browser;
/// a TOML file can override any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// User agent sent with every probe
    pub user_agent: String,

    /// Accept-Language sent with every probe
    pub accept_language: String,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Minimum delay between probes in milliseconds
    pub probe_delay_ms: u64,

    /// Maximum redirect depth
    pub max_redirects: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/124 Safari/537.36"
                .to_string(),
            accept_language: "de-DE,de;q=0.9,en;q=0.8,tr;q=0.7".to_string(),
            request_timeout: 10,
            probe_delay_ms: 600,
            max_redirects: 10,
        }
    }
}

impl AuditConfig {
    /// Load configuration from a TOML file, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read configuration: {}", path.display()))?;
                let config: Self = toml::from_str(&raw)
                    .with_context(|| format!("Failed to parse configuration: {}", path.display()))?;
                config.validate()?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.user_agent.is_empty() {
            anyhow::bail!("user_agent must not be empty");
        }
        if self.request_timeout == 0 {
            anyhow::bail!("request_timeout must be greater than 0");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = AuditConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.probe_delay_ms, 600);
        assert_eq!(config.request_timeout, 10);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: AuditConfig = toml::from_str("probe_delay_ms = 1200").unwrap();
        assert_eq!(config.probe_delay_ms, 1200);
        assert_eq!(config.max_redirects, 10);
        assert!(config.user_agent.contains("Chrome"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let config: AuditConfig = toml::from_str("request_timeout = 0").unwrap();
        assert!(config.validate().is_err());
    }
}
