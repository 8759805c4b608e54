//! Check-in API client configuration.
//!
//! Configures the backend base URL and the per-club scanner key. There are no
//! production defaults: a scanner that does not know its venue's backend and
//! key must not post anywhere. Override via environment variables or explicit
//! construction for staging/testing.

use url::Url;
use zeroize::Zeroizing;

/// Configuration for connecting to the check-in endpoint.
///
/// Custom `Debug` implementation redacts the `scanner_key` field to prevent
/// credential leakage in log output; the key itself is zeroized on drop.
#[derive(Clone)]
pub struct CheckinApiConfig {
    /// Base URL of the platform backend (the check-in endpoint lives at
    /// `{backend_url}api/checkin`).
    pub backend_url: Url,
    /// Per-club scanner key, sent as the `x-scanner-key` header.
    pub scanner_key: Zeroizing<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for CheckinApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckinApiConfig")
            .field("backend_url", &self.backend_url)
            .field("scanner_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl CheckinApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `NV_BACKEND_URL` (required)
    /// - `NV_SCANNER_KEY` (required)
    /// - `NV_TIMEOUT_SECS` (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw_url =
            std::env::var("NV_BACKEND_URL").map_err(|_| ConfigError::MissingBackendUrl)?;
        let backend_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidUrl("NV_BACKEND_URL".to_string(), e.to_string()))?;
        let scanner_key = Zeroizing::new(
            std::env::var("NV_SCANNER_KEY").map_err(|_| ConfigError::MissingScannerKey)?,
        );

        Ok(Self {
            backend_url,
            scanner_key,
            timeout_secs: std::env::var("NV_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        })
    }

    /// Create a configuration pointing at a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `uri` cannot be parsed.
    pub fn local_mock(uri: &str, key: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            backend_url: Url::parse(uri)
                .map_err(|e| ConfigError::InvalidUrl("local_mock".to_string(), e.to_string()))?,
            scanner_key: Zeroizing::new(key.to_string()),
            timeout_secs: 5,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `NV_BACKEND_URL` was not set and no backend URL was supplied.
    #[error("NV_BACKEND_URL environment variable is required")]
    MissingBackendUrl,
    /// `NV_SCANNER_KEY` was not set and no scanner key was supplied.
    #[error("NV_SCANNER_KEY environment variable is required")]
    MissingScannerKey,
    /// The scanner key contains bytes that cannot travel in an HTTP header.
    #[error("scanner key is not a valid header value")]
    InvalidScannerKey,
    /// A URL failed to parse.
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_mock_builds_valid_config() {
        let cfg = CheckinApiConfig::local_mock("http://127.0.0.1:9000", "test-key").unwrap();
        assert_eq!(cfg.scanner_key.as_str(), "test-key");
        assert_eq!(cfg.timeout_secs, 5);
        assert_eq!(cfg.backend_url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn local_mock_rejects_invalid_url() {
        assert!(CheckinApiConfig::local_mock("not a url", "k").is_err());
    }

    #[test]
    fn debug_redacts_scanner_key() {
        let cfg = CheckinApiConfig::local_mock("http://127.0.0.1:9000", "super-secret").unwrap();
        let rendered = format!("{cfg:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("super-secret"));
    }
}
