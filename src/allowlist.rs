//! Target host allowlist
//!
//! Restricts every outbound probe to the platform's own domains. This is the
//! tool's only protection against being abused as an open-ended fetch relay,
//! so every probe must pass a candidate URL through here before any network
//! I/O happens.

use url::Url;

use crate::error::ValidationError;

/// Primary platform hostnames, matched exactly.
pub const PRIMARY_HOSTS: &[&str] = &["instagram.com", "www.instagram.com"];

/// Asset-CDN domain suffixes, matched against the end of the hostname.
pub const CDN_SUFFIXES: &[&str] = &[".cdninstagram.com", ".fbcdn.net"];

/// Allowlist of hosts probes may contact
#[derive(Debug, Clone)]
pub struct HostAllowlist {
    primary: &'static [&'static str],
    cdn_suffixes: &'static [&'static str],
}

impl Default for HostAllowlist {
    fn default() -> Self {
        Self {
            primary: PRIMARY_HOSTS,
            cdn_suffixes: CDN_SUFFIXES,
        }
    }
}

impl HostAllowlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a URL's hostname is an allowed probe target.
    ///
    /// A URL that fails to parse is simply not allowed; this never errors.
    pub fn is_allowed(&self, url: &str) -> bool {
        let Ok(parsed) = Url::parse(url) else {
            return false;
        };
        let Some(host) = parsed.host_str() else {
            return false;
        };
        let host = host.to_lowercase();

        if self.primary.contains(&host.as_str()) {
            return true;
        }
        self.cdn_suffixes.iter().any(|suffix| host.ends_with(suffix))
    }

    /// Reject a URL that is not on the allowlist
    pub fn ensure(&self, url: &str) -> Result<(), ValidationError> {
        if self.is_allowed(url) {
            Ok(())
        } else {
            Err(ValidationError::DisallowedHost(url.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hosts_allowed() {
        let allowlist = HostAllowlist::new();
        assert!(allowlist.is_allowed("https://www.instagram.com/reel/abc123/"));
        assert!(allowlist.is_allowed("https://instagram.com/p/xyz/"));
    }

    #[test]
    fn cdn_suffixes_allowed() {
        let allowlist = HostAllowlist::new();
        assert!(allowlist.is_allowed("https://scontent.cdninstagram.com/v/t51/clip.mp4"));
        assert!(allowlist.is_allowed("https://scontent-fra3-1.fbcdn.net/v/media.jpg"));
    }

    #[test]
    fn subdomains_of_primary_rejected() {
        let allowlist = HostAllowlist::new();
        // Only the two exact primary variants are valid page hosts.
        assert!(!allowlist.is_allowed("https://api.instagram.com/"));
        assert!(!allowlist.is_allowed("https://evil.instagram.com.attacker.net/"));
    }

    #[test]
    fn arbitrary_hosts_rejected() {
        let allowlist = HostAllowlist::new();
        assert!(!allowlist.is_allowed("https://example.com/"));
        assert!(!allowlist.is_allowed("https://fbcdn.net.evil.com/media.mp4"));
        assert!(!allowlist.is_allowed("http://169.254.169.254/latest/meta-data/"));
    }

    #[test]
    fn unparseable_url_rejected() {
        let allowlist = HostAllowlist::new();
        assert!(!allowlist.is_allowed("not a url"));
        assert!(!allowlist.is_allowed(""));
    }

    #[test]
    fn ensure_reports_disallowed_host() {
        let allowlist = HostAllowlist::new();
        let err = allowlist.ensure("https://example.com/").unwrap_err();
        assert!(matches!(err, ValidationError::DisallowedHost(_)));
    }
}
