//! # Terminal Scan Outcomes
//!
//! The closed set of results a scan can land on. Each result is a tagged
//! variant carrying exactly the data that outcome surfaces to the operator —
//! there are no string-typed status checks anywhere in the session flow.

use serde::{Deserialize, Serialize};

use nv_core::Timestamp;

/// The terminal result of one scan attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanOutcome {
    /// The ticket was admitted.
    Success {
        /// Ticket serial number, as reported by the backend.
        serial: Option<String>,
        /// Ticket status string, as reported by the backend.
        status: Option<String>,
        /// When the check-in was recorded.
        checked_in_at: Option<Timestamp>,
    },
    /// The ticket was already checked in.
    Duplicate {
        /// The prior check-in time, surfaced unchanged.
        checked_in_at: Option<Timestamp>,
    },
    /// The token/event pair is not a known ticket.
    Invalid,
    /// The signature tag did not verify.
    BadSignature,
    /// Verification could not complete: unreadable code, transport failure,
    /// rejected scanner key, or an answer the scanner does not understand.
    Error {
        /// Operator-facing description.
        message: String,
    },
}

impl ScanOutcome {
    /// The display-state name of this outcome.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Success { .. } => "SUCCESS",
            Self::Duplicate { .. } => "DUPLICATE",
            Self::Invalid => "INVALID",
            Self::BadSignature => "BAD_SIGNATURE",
            Self::Error { .. } => "ERROR",
        }
    }

    /// Whether this outcome admits the attendee.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl std::fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
