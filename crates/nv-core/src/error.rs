//! # Validation Errors
//!
//! Construction-time errors for the domain primitive newtypes. Each variant
//! names the field that was rejected so that a misconfigured integration can
//! be diagnosed from the error alone.

use thiserror::Error;

/// Validation errors for domain primitive newtypes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Ticket token was empty or whitespace-only.
    #[error("ticket token must be non-empty")]
    EmptyTicketToken,

    /// Event identifier was empty or whitespace-only.
    #[error("event id must be non-empty")]
    EmptyEventId,

    /// HMAC tag was empty or whitespace-only.
    #[error("hmac tag must be non-empty")]
    EmptyHmacTag,
}
