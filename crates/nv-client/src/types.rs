//! Wire types for the check-in endpoint.
//!
//! The request body is the [`ScanToken`](nv_core::ScanToken) triple itself
//! (it serializes to `{"token", "eventId", "hmac"}`), so only the response
//! shapes live here.
//!
//! Fields use `#[serde(default)]` for resilience against schema evolution in
//! the live backend. The backend may return additional fields not modeled
//! here — `serde(deny_unknown_fields)` is intentionally NOT used.

use serde::Deserialize;

use nv_core::Timestamp;

/// Why the backend refused a check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    /// The ticket was already checked in.
    Duplicate,
    /// The signature tag did not verify.
    BadSignature,
    /// The token/event pair is not a known ticket.
    Invalid,
    /// Forward-compatible catch-all for reasons the backend introduces after
    /// this client version is deployed.
    #[serde(other)]
    Unknown,
}

/// Verdict returned by `POST /api/checkin`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckinResponse {
    /// Whether the ticket was admitted.
    pub ok: bool,
    /// Ticket serial number, on success.
    #[serde(default)]
    pub serial: Option<String>,
    /// Ticket status string, on success.
    #[serde(default)]
    pub status: Option<String>,
    /// When the ticket was (first) checked in. On a duplicate refusal this is
    /// the prior check-in time.
    #[serde(default)]
    pub checked_in_at: Option<Timestamp>,
    /// Refusal reason, when `ok` is false.
    #[serde(default)]
    pub reason: Option<DenyReason>,
}
