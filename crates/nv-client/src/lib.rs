//! # nv-client — Typed client for the Nightvenue check-in endpoint
//!
//! Posts scanned [`ScanToken`] triples to `POST {backend}/api/checkin` and
//! returns the backend's verdict as a typed [`CheckinResponse`].
//!
//! ## Architecture
//!
//! This crate is the only path from the scanner stack to the platform
//! backend. It knows nothing about scan sessions or display states — mapping
//! verdicts onto the session state machine is `nv-scan`'s job. Authentication
//! is the per-club scanner key, installed once as the `x-scanner-key` default
//! header when the client is built.
//!
//! ## No retries
//!
//! Verification requests are deliberately fire-once. A failed request
//! surfaces as an error verdict at the door and the operator resumes
//! scanning; retrying behind the operator's back could double-post a
//! check-in.

pub mod config;
pub mod error;
pub mod types;

pub use config::CheckinApiConfig;
pub use error::CheckinApiError;
pub use types::{CheckinResponse, DenyReason};

use std::time::Duration;

use nv_core::ScanToken;
use url::Url;

/// Path of the check-in endpoint, relative to the backend base URL.
const CHECKIN_PATH: &str = "api/checkin";

/// Client for the check-in endpoint. Cheap to clone; holds a pooled
/// `reqwest::Client` internally.
#[derive(Debug, Clone)]
pub struct CheckinClient {
    http: reqwest::Client,
    base_url: Url,
}

impl CheckinClient {
    /// Create a new check-in client from configuration.
    ///
    /// Installs the `x-scanner-key` header and the request timeout on the
    /// inner HTTP client.
    pub fn new(config: CheckinApiConfig) -> Result<Self, CheckinApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers({
                let mut headers = reqwest::header::HeaderMap::new();
                let mut key = reqwest::header::HeaderValue::from_str(config.scanner_key.as_str())
                    .map_err(|_| CheckinApiError::Config(config::ConfigError::InvalidScannerKey))?;
                key.set_sensitive(true);
                headers.insert("x-scanner-key", key);
                headers
            })
            .build()
            .map_err(|e| CheckinApiError::Http {
                endpoint: "client_init".into(),
                source: e,
            })?;

        Ok(Self {
            http,
            base_url: config.backend_url,
        })
    }

    /// Verify a scanned triple against the backend.
    ///
    /// Calls `POST {backend_url}api/checkin` with the JSON triple body.
    ///
    /// # Errors
    ///
    /// - [`CheckinApiError::Unauthorized`] on HTTP 401, whatever the body.
    /// - [`CheckinApiError::Api`] on any other non-success status.
    /// - [`CheckinApiError::Http`] on transport failure.
    /// - [`CheckinApiError::Deserialization`] if the body is not a verdict.
    pub async fn check_in(&self, token: &ScanToken) -> Result<CheckinResponse, CheckinApiError> {
        let endpoint = "POST /api/checkin";
        let url = format!("{}{}", self.base_url, CHECKIN_PATH);

        tracing::debug!(event_id = %token.event_id, "posting check-in");

        let resp = self
            .http
            .post(&url)
            .json(token)
            .send()
            .await
            .map_err(|e| CheckinApiError::Http {
                endpoint: endpoint.into(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CheckinApiError::Unauthorized {
                endpoint: endpoint.into(),
            });
        }

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(CheckinApiError::Api {
                endpoint: endpoint.into(),
                status,
                body,
            });
        }

        resp.json().await.map_err(|e| CheckinApiError::Deserialization {
            endpoint: endpoint.into(),
            source: e,
        })
    }
}
