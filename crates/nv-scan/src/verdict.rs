//! # Verdict Mapping
//!
//! Maps the check-in client's results onto terminal [`ScanOutcome`]s:
//!
//! | Condition | Outcome |
//! |-----------|---------|
//! | HTTP 401 | `ERROR` ("unauthorized") |
//! | `ok: true` | `SUCCESS` (serial/status/timestamp recorded) |
//! | `ok: false`, reason `duplicate` | `DUPLICATE` (prior check-in time) |
//! | `ok: false`, reason `bad_signature` | `BAD_SIGNATURE` |
//! | `ok: false`, reason `invalid` | `INVALID` |
//! | `ok: false`, reason absent/unrecognized | `ERROR` |
//! | transport / decode failure | `ERROR` |

use nv_client::{CheckinApiError, CheckinResponse, DenyReason};

use crate::outcome::ScanOutcome;

/// Map a completed verification call onto a terminal outcome.
pub fn outcome_for(result: Result<CheckinResponse, CheckinApiError>) -> ScanOutcome {
    match result {
        Ok(resp) => outcome_from_response(resp),
        Err(err) => outcome_from_error(&err),
    }
}

/// Map a backend verdict body onto a terminal outcome.
pub fn outcome_from_response(resp: CheckinResponse) -> ScanOutcome {
    if resp.ok {
        return ScanOutcome::Success {
            serial: resp.serial,
            status: resp.status,
            checked_in_at: resp.checked_in_at,
        };
    }
    match resp.reason {
        Some(DenyReason::Duplicate) => ScanOutcome::Duplicate {
            checked_in_at: resp.checked_in_at,
        },
        Some(DenyReason::BadSignature) => ScanOutcome::BadSignature,
        Some(DenyReason::Invalid) => ScanOutcome::Invalid,
        Some(DenyReason::Unknown) | None => ScanOutcome::Error {
            message: "check-in refused for an unrecognized reason".to_string(),
        },
    }
}

/// Map a verification failure onto a terminal outcome.
pub fn outcome_from_error(err: &CheckinApiError) -> ScanOutcome {
    match err {
        CheckinApiError::Unauthorized { .. } => ScanOutcome::Error {
            message: "unauthorized".to_string(),
        },
        other => ScanOutcome::Error {
            message: other.to_string(),
        },
    }
}
