//! # Ticket Newtypes and the Scanned Triple
//!
//! Domain-primitive newtypes for the values carried by an NV1 code, plus the
//! [`ScanToken`] triple that one scan produces. Each value is a distinct type
//! — you cannot pass an [`EventId`] where a [`TicketToken`] is expected.
//!
//! ## Validation
//!
//! The wire values are opaque strings minted by the platform backend, so
//! validation is intentionally lenient: non-empty after trimming. The HMAC
//! tag in particular is never inspected here — signature verification happens
//! server-side and this stack only carries the tag through.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

// ---------------------------------------------------------------------------
// String-based wire values (validated at construction)
// ---------------------------------------------------------------------------

/// An opaque per-ticket token as carried in a scanned NV1 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TicketToken(String);

impl TicketToken {
    /// Create a ticket token from a string, rejecting empty values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyTicketToken`] if the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyTicketToken);
        }
        Ok(Self(s))
    }

    /// Access the token string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TicketToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An opaque event identifier as carried in a scanned NV1 code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(String);

impl EventId {
    /// Create an event identifier from a string, rejecting empty values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyEventId`] if the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyEventId);
        }
        Ok(Self(s))
    }

    /// Access the event identifier string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The server-verified signature tag from a scanned NV1 code.
///
/// Opaque in this stack: the backend checks it, the scanner only carries it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HmacTag(String);

impl HmacTag {
    /// Create an HMAC tag from a string, rejecting empty values.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::EmptyHmacTag`] if the value is empty or
    /// whitespace-only.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.trim().is_empty() {
            return Err(ValidationError::EmptyHmacTag);
        }
        Ok(Self(s))
    }

    /// Access the tag string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HmacTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// The scanned triple
// ---------------------------------------------------------------------------

/// The `(token, eventId, hmac)` triple extracted from one scanned code.
///
/// One triple is created per successful decode, consumed by exactly one
/// verification request, and discarded once the scan session reaches a
/// terminal display state. Serializes to the check-in wire body:
/// `{"token": ..., "eventId": ..., "hmac": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanToken {
    /// The per-ticket token.
    pub token: TicketToken,
    /// The event the ticket belongs to.
    pub event_id: EventId,
    /// The signature tag the backend will verify.
    pub hmac: HmacTag,
}

impl ScanToken {
    /// Build a triple from raw string values, validating each field.
    ///
    /// # Errors
    ///
    /// Returns the [`ValidationError`] of the first empty field.
    pub fn new(
        token: impl Into<String>,
        event_id: impl Into<String>,
        hmac: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            token: TicketToken::new(token)?,
            event_id: EventId::new(event_id)?,
            hmac: HmacTag::new(hmac)?,
        })
    }
}

// ---------------------------------------------------------------------------
// UUID-based identifiers (always valid by construction)
// ---------------------------------------------------------------------------

/// A unique identifier for one scanner session — one operator, one device,
/// one run of the console.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Create a new random session identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create a session identifier from an existing UUID.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
