//! # Scan Session State Machine
//!
//! Drives the door scanner's display states for one operator session.
//!
//! ## States
//!
//! ```text
//!                    decode + valid parse
//!   SCANNING ────────────────────────────────▶ POSTING
//!      │                                          │
//!      │ decode + parse failure                   │ server verdict
//!      ▼                                          ▼
//!    ERROR ◀───────────────┐   SUCCESS / DUPLICATE / INVALID /
//!      │                   │   BAD_SIGNATURE / ERROR
//!      │                   │                      │
//!      └───────── operator: "scan next" ◀─────────┘
//!                        (back to SCANNING)
//! ```
//!
//! Exactly one phase is active at a time. There is no automatic timeout
//! anywhere; the operator is the sole driver of recovery.
//!
//! ## Design Decision
//!
//! The phases are an enum with validated transitions rather than typestate
//! types: the terminal phases all share one shape (a [`ScanOutcome`] being
//! displayed), every terminal phase resumes the same way, and the driver
//! holds the session in a loop where a single type must represent "whatever
//! phase we are in". Invalid transitions are rejected at runtime with
//! structured errors.
//!
//! ## Stale verdicts
//!
//! Every verification attempt gets a sequence number from
//! [`ScanSession::begin_verification`]. [`ScanSession::complete`] applies a
//! verdict only while that exact attempt is in flight; anything else is
//! reported as [`SessionError::StaleVerdict`] and leaves the session
//! untouched. A verdict that arrives after the operator has already resumed
//! scanning can therefore never clobber the next scan.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nv_core::{ScanToken, SessionId, Timestamp};

use crate::outcome::ScanOutcome;

// ─── Phases ──────────────────────────────────────────────────────────

/// The active phase of a scan session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanPhase {
    /// Waiting for the next decoded code.
    Scanning,
    /// A triple has been handed to the verification client; its verdict is
    /// outstanding.
    Posting {
        /// Sequence number of the in-flight attempt.
        seq: u64,
        /// The triple being verified. Dropped when the verdict lands.
        token: ScanToken,
    },
    /// A terminal result is on display, awaiting operator acknowledgement.
    Complete(ScanOutcome),
}

impl ScanPhase {
    /// The display-state name of this phase.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Scanning => "SCANNING",
            Self::Posting { .. } => "POSTING",
            Self::Complete(outcome) => outcome.name(),
        }
    }

    /// Whether a terminal result is on display.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

impl std::fmt::Display for ScanPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Errors that can occur during scan session transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Attempted transition is not valid from the current phase.
    #[error("invalid scan transition: {from} -> {to}")]
    InvalidTransition {
        /// Current phase name.
        from: String,
        /// Attempted target phase name.
        to: String,
    },

    /// A verdict arrived for an attempt that is no longer in flight.
    #[error("stale verdict for attempt {got} (current attempt: {expected})")]
    StaleVerdict {
        /// The in-flight attempt, or the next attempt number when nothing is
        /// in flight.
        expected: u64,
        /// The attempt the verdict belongs to.
        got: u64,
    },
}

// ─── Transition records & tally ──────────────────────────────────────

/// Record of one display-state transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanTransitionRecord {
    /// Phase name before the transition.
    pub from_state: String,
    /// Phase name after the transition.
    pub to_state: String,
    /// When the transition occurred.
    pub timestamp: Timestamp,
}

/// Running outcome counts for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanTally {
    /// Codes decoded (valid or not).
    pub decoded: u32,
    /// Tickets admitted.
    pub success: u32,
    /// Tickets refused as already checked in.
    pub duplicate: u32,
    /// Codes refused as unknown tickets.
    pub invalid: u32,
    /// Codes refused for signature failure.
    pub bad_signature: u32,
    /// Scans that ended in an error display.
    pub error: u32,
}

impl ScanTally {
    fn record(&mut self, outcome: &ScanOutcome) {
        match outcome {
            ScanOutcome::Success { .. } => self.success += 1,
            ScanOutcome::Duplicate { .. } => self.duplicate += 1,
            ScanOutcome::Invalid => self.invalid += 1,
            ScanOutcome::BadSignature => self.bad_signature += 1,
            ScanOutcome::Error { .. } => self.error += 1,
        }
    }

    /// Total scans that reached a terminal display.
    pub fn completed(&self) -> u32 {
        self.success + self.duplicate + self.invalid + self.bad_signature + self.error
    }
}

// ─── Session ─────────────────────────────────────────────────────────

/// One operator's scan session: the active phase, the attempt counter, the
/// ordered transition log, and the running tally.
///
/// Enforces valid phase transitions. Invalid transitions are rejected with
/// structured errors naming the current phase and the attempted target.
#[derive(Debug, Clone)]
pub struct ScanSession {
    id: SessionId,
    phase: ScanPhase,
    next_seq: u64,
    transitions: Vec<ScanTransitionRecord>,
    tally: ScanTally,
}

impl ScanSession {
    /// Create a new session in the `SCANNING` phase.
    ///
    /// The decode source is acquired by the driver before the session starts;
    /// a session that exists is a session whose scanner is live.
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            phase: ScanPhase::Scanning,
            next_seq: 0,
            transitions: Vec::new(),
            tally: ScanTally::default(),
        }
    }

    /// The session identifier.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// The active phase.
    pub fn phase(&self) -> &ScanPhase {
        &self.phase
    }

    /// The outcome currently on display, if a terminal phase is active.
    ///
    /// Cleared by [`ScanSession::resume`].
    pub fn last_outcome(&self) -> Option<&ScanOutcome> {
        match &self.phase {
            ScanPhase::Complete(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// The running outcome tally.
    pub fn tally(&self) -> &ScanTally {
        &self.tally
    }

    /// The ordered log of all display-state transitions.
    pub fn transitions(&self) -> &[ScanTransitionRecord] {
        &self.transitions
    }

    /// Hand a decoded triple to verification (`SCANNING` → `POSTING`).
    ///
    /// Returns the attempt sequence number to pass back to
    /// [`ScanSession::complete`]. Only one attempt can be in flight: a decode
    /// cannot start verification until the previous terminal display has been
    /// acknowledged.
    pub fn begin_verification(&mut self, token: ScanToken) -> Result<u64, SessionError> {
        self.require_scanning("POSTING")?;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tally.decoded += 1;
        self.set_phase(ScanPhase::Posting { seq, token });
        Ok(seq)
    }

    /// Apply a verification verdict (`POSTING` → terminal display).
    ///
    /// The verdict is applied only if attempt `seq` is still in flight.
    /// In every other phase the verdict is stale — the operator has already
    /// moved on — and the session is left untouched. The applied outcome is
    /// readable through [`ScanSession::last_outcome`].
    pub fn complete(&mut self, seq: u64, outcome: ScanOutcome) -> Result<(), SessionError> {
        match &self.phase {
            ScanPhase::Posting { seq: current, .. } if *current == seq => {
                self.tally.record(&outcome);
                self.set_phase(ScanPhase::Complete(outcome));
                Ok(())
            }
            ScanPhase::Posting { seq: current, .. } => Err(SessionError::StaleVerdict {
                expected: *current,
                got: seq,
            }),
            _ => Err(SessionError::StaleVerdict {
                expected: self.next_seq,
                got: seq,
            }),
        }
    }

    /// Record a decode whose payload did not parse (`SCANNING` → `ERROR`).
    ///
    /// The session shows an error display until the operator resumes, exactly
    /// as for a verification failure.
    pub fn fail_parse(&mut self, message: impl Into<String>) -> Result<(), SessionError> {
        self.require_scanning("ERROR")?;
        self.tally.decoded += 1;
        let outcome = ScanOutcome::Error {
            message: message.into(),
        };
        self.tally.record(&outcome);
        self.set_phase(ScanPhase::Complete(outcome));
        Ok(())
    }

    /// Operator acknowledgement: "scan next" (terminal display → `SCANNING`).
    ///
    /// Clears the displayed outcome. Invalid while scanning or while a
    /// verdict is outstanding.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        if !self.phase.is_terminal() {
            return Err(SessionError::InvalidTransition {
                from: self.phase.name().to_string(),
                to: "SCANNING".to_string(),
            });
        }
        self.set_phase(ScanPhase::Scanning);
        Ok(())
    }

    /// Validate that the session is idle in `SCANNING`.
    fn require_scanning(&self, target: &str) -> Result<(), SessionError> {
        match self.phase {
            ScanPhase::Scanning => Ok(()),
            _ => Err(SessionError::InvalidTransition {
                from: self.phase.name().to_string(),
                to: target.to_string(),
            }),
        }
    }

    /// Record a phase transition.
    fn set_phase(&mut self, to: ScanPhase) {
        self.transitions.push(ScanTransitionRecord {
            from_state: self.phase.name().to_string(),
            to_state: to.name().to_string(),
            timestamp: Timestamp::now(),
        });
        self.phase = to;
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn token() -> ScanToken {
        ScanToken::new("tok", "evt", "sig").unwrap()
    }

    fn success(serial: &str) -> ScanOutcome {
        ScanOutcome::Success {
            serial: Some(serial.to_string()),
            status: Some("valid".to_string()),
            checked_in_at: None,
        }
    }

    fn posting_session() -> (ScanSession, u64) {
        let mut s = ScanSession::new();
        let seq = s.begin_verification(token()).unwrap();
        (s, seq)
    }

    // ── Basic lifecycle ──────────────────────────────────────────────

    #[test]
    fn new_session_is_scanning() {
        let s = ScanSession::new();
        assert_eq!(*s.phase(), ScanPhase::Scanning);
        assert!(s.last_outcome().is_none());
        assert_eq!(s.tally().decoded, 0);
    }

    #[test]
    fn begin_verification_enters_posting() {
        let (s, seq) = posting_session();
        assert_eq!(seq, 0);
        assert_eq!(s.phase().name(), "POSTING");
        assert_eq!(s.tally().decoded, 1);
    }

    #[test]
    fn success_verdict_retains_serial() {
        let (mut s, seq) = posting_session();
        s.complete(seq, success("ABC123")).unwrap();
        match s.last_outcome().unwrap() {
            ScanOutcome::Success { serial, .. } => {
                assert_eq!(serial.as_deref(), Some("ABC123"));
            }
            other => panic!("expected Success, got: {other:?}"),
        }
        assert_eq!(s.phase().name(), "SUCCESS");
    }

    #[test]
    fn duplicate_verdict_surfaces_prior_time_unchanged() {
        let (mut s, seq) = posting_session();
        let prior: Timestamp = serde_json::from_str(r#""2024-01-01T00:00:00Z""#).unwrap();
        s.complete(
            seq,
            ScanOutcome::Duplicate {
                checked_in_at: Some(prior),
            },
        )
        .unwrap();
        assert_eq!(s.phase().name(), "DUPLICATE");
        match s.last_outcome().unwrap() {
            ScanOutcome::Duplicate { checked_in_at } => {
                assert_eq!(
                    checked_in_at.unwrap().to_canonical_string(),
                    "2024-01-01T00:00:00Z"
                );
            }
            other => panic!("expected Duplicate, got: {other:?}"),
        }
    }

    #[test]
    fn resume_returns_to_scanning_and_clears_outcome() {
        let (mut s, seq) = posting_session();
        s.complete(seq, success("ABC123")).unwrap();
        s.resume().unwrap();
        assert_eq!(*s.phase(), ScanPhase::Scanning);
        assert!(s.last_outcome().is_none());
    }

    #[test]
    fn resume_works_from_every_terminal_outcome() {
        for outcome in [
            success("S"),
            ScanOutcome::Duplicate {
                checked_in_at: None,
            },
            ScanOutcome::Invalid,
            ScanOutcome::BadSignature,
            ScanOutcome::Error {
                message: "network".into(),
            },
        ] {
            let (mut s, seq) = posting_session();
            s.complete(seq, outcome).unwrap();
            assert!(s.phase().is_terminal());
            s.resume().unwrap();
            assert_eq!(*s.phase(), ScanPhase::Scanning);
        }
    }

    // ── Invalid transitions ──────────────────────────────────────────

    #[test]
    fn cannot_resume_while_scanning() {
        let mut s = ScanSession::new();
        assert_eq!(
            s.resume(),
            Err(SessionError::InvalidTransition {
                from: "SCANNING".into(),
                to: "SCANNING".into()
            })
        );
    }

    #[test]
    fn cannot_resume_while_posting() {
        let (mut s, _) = posting_session();
        assert!(s.resume().is_err());
    }

    #[test]
    fn cannot_begin_while_posting() {
        let (mut s, _) = posting_session();
        let result = s.begin_verification(token());
        assert_eq!(
            result,
            Err(SessionError::InvalidTransition {
                from: "POSTING".into(),
                to: "POSTING".into()
            })
        );
    }

    #[test]
    fn cannot_begin_while_terminal() {
        let (mut s, seq) = posting_session();
        s.complete(seq, ScanOutcome::Invalid).unwrap();
        assert!(s.begin_verification(token()).is_err());
    }

    // ── Parse failures ───────────────────────────────────────────────

    #[test]
    fn parse_failure_shows_error_until_resume() {
        let mut s = ScanSession::new();
        s.fail_parse("invalid code").unwrap();
        assert_eq!(s.phase().name(), "ERROR");
        match s.last_outcome().unwrap() {
            ScanOutcome::Error { message } => assert_eq!(message, "invalid code"),
            other => panic!("expected Error, got: {other:?}"),
        }
        s.resume().unwrap();
        assert_eq!(*s.phase(), ScanPhase::Scanning);
    }

    #[test]
    fn parse_failure_requires_scanning_phase() {
        let (mut s, _) = posting_session();
        assert!(s.fail_parse("invalid code").is_err());
    }

    // ── Stale verdicts ───────────────────────────────────────────────

    #[test]
    fn verdict_with_wrong_seq_is_stale() {
        let (mut s, seq) = posting_session();
        let result = s.complete(seq + 1, success("X"));
        assert_eq!(
            result.unwrap_err(),
            SessionError::StaleVerdict {
                expected: seq,
                got: seq + 1
            }
        );
        // Session untouched: still posting, nothing tallied.
        assert_eq!(s.phase().name(), "POSTING");
        assert_eq!(s.tally().completed(), 0);
    }

    #[test]
    fn verdict_after_resume_is_stale_and_ignored() {
        let (mut s, seq) = posting_session();
        s.complete(seq, ScanOutcome::Error {
            message: "timeout".into(),
        })
        .unwrap();
        s.resume().unwrap();

        // The late answer to attempt `seq` finally lands.
        let result = s.complete(seq, success("LATE"));
        assert!(matches!(result, Err(SessionError::StaleVerdict { .. })));
        assert_eq!(*s.phase(), ScanPhase::Scanning);
        assert_eq!(s.tally().success, 0);
    }

    #[test]
    fn sequence_numbers_are_monotonic() {
        let mut s = ScanSession::new();
        let a = s.begin_verification(token()).unwrap();
        s.complete(a, ScanOutcome::Invalid).unwrap();
        s.resume().unwrap();
        let b = s.begin_verification(token()).unwrap();
        assert!(b > a);
    }

    // ── Tally & transition log ───────────────────────────────────────

    #[test]
    fn tally_counts_outcomes_by_kind() {
        let mut s = ScanSession::new();
        for outcome in [
            success("A"),
            ScanOutcome::Duplicate {
                checked_in_at: None,
            },
            ScanOutcome::Invalid,
            ScanOutcome::BadSignature,
        ] {
            let seq = s.begin_verification(token()).unwrap();
            s.complete(seq, outcome).unwrap();
            s.resume().unwrap();
        }
        s.fail_parse("invalid code").unwrap();

        let tally = s.tally();
        assert_eq!(tally.decoded, 5);
        assert_eq!(tally.success, 1);
        assert_eq!(tally.duplicate, 1);
        assert_eq!(tally.invalid, 1);
        assert_eq!(tally.bad_signature, 1);
        assert_eq!(tally.error, 1);
        assert_eq!(tally.completed(), 5);
    }

    #[test]
    fn transition_log_records_all_changes() {
        let (mut s, seq) = posting_session();
        s.complete(seq, success("A")).unwrap();
        s.resume().unwrap();

        let log = s.transitions();
        assert_eq!(log.len(), 3);
        assert_eq!(log[0].from_state, "SCANNING");
        assert_eq!(log[0].to_state, "POSTING");
        assert_eq!(log[1].from_state, "POSTING");
        assert_eq!(log[1].to_state, "SUCCESS");
        assert_eq!(log[2].from_state, "SUCCESS");
        assert_eq!(log[2].to_state, "SCANNING");
    }

    // ── Display ──────────────────────────────────────────────────────

    #[test]
    fn phase_display_names() {
        assert_eq!(ScanPhase::Scanning.to_string(), "SCANNING");
        let (s, _) = posting_session();
        assert_eq!(s.phase().to_string(), "POSTING");
        assert_eq!(
            ScanPhase::Complete(ScanOutcome::BadSignature).to_string(),
            "BAD_SIGNATURE"
        );
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn transition_records_serialize() {
        let (mut s, seq) = posting_session();
        s.complete(seq, ScanOutcome::Invalid).unwrap();
        let json = serde_json::to_string(s.transitions()).unwrap();
        let parsed: Vec<ScanTransitionRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].to_state, "INVALID");
    }
}
