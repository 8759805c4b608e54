//! Error types for the check-in client.
//!
//! Every variant carries the endpoint it occurred against so operator-facing
//! logs can be read without a debugger. There is no retry machinery behind
//! these errors: a failed verification surfaces to the scan session as an
//! error verdict and the operator resumes scanning by hand.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors produced by [`crate::CheckinClient`].
#[derive(Debug, Error)]
pub enum CheckinApiError {
    /// Client configuration was unusable.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The backend rejected the scanner key (HTTP 401), regardless of what
    /// the response body said.
    #[error("scanner key rejected (HTTP 401) at {endpoint}")]
    Unauthorized {
        /// The endpoint that rejected the request.
        endpoint: String,
    },

    /// Transport-level failure (connection refused, timeout, TLS, ...).
    #[error("HTTP transport error at {endpoint}: {source}")]
    Http {
        /// The endpoint the request was headed for.
        endpoint: String,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// The backend answered with a non-success status other than 401.
    #[error("check-in API returned {status} at {endpoint}: {body}")]
    Api {
        /// The endpoint that answered.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// The response body, verbatim.
        body: String,
    },

    /// The response body could not be decoded as a check-in verdict.
    #[error("failed to decode response from {endpoint}: {source}")]
    Deserialization {
        /// The endpoint that answered.
        endpoint: String,
        /// The underlying reqwest/serde error.
        #[source]
        source: reqwest::Error,
    },
}
