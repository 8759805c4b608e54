#![deny(missing_docs)]

//! # nv-scan — Scan Session Control Flow
//!
//! The stateful core of the door scanner: the display-state machine, the
//! verdict mapping from the check-in client, per-outcome feedback patterns,
//! and the decode source seam.
//!
//! ## Control Flow
//!
//! ```text
//! SCANNING ──(decode + valid parse)──▶ POSTING ──(server verdict)──▶
//!     {SUCCESS, DUPLICATE, INVALID, BAD_SIGNATURE, ERROR}
//!     ──(operator: "scan next")──▶ SCANNING
//!
//! SCANNING ──(decode + parse failure)──▶ ERROR, awaiting manual resume
//! ```
//!
//! ## Design
//!
//! The display state is a closed tagged enum ([`ScanPhase`] over
//! [`ScanOutcome`]) — no string-typed status checks. Each verification
//! attempt carries a sequence number, and a verdict only lands while its
//! attempt is in flight: late answers to an attempt the operator already
//! acknowledged are reported as stale and dropped. One scan token is in
//! flight at a time; drivers act on decodes only while the session is in
//! `SCANNING`.

pub mod feedback;
pub mod outcome;
pub mod session;
pub mod source;
pub mod verdict;

// ─── Outcome re-exports ─────────────────────────────────────────────

pub use outcome::ScanOutcome;

// ─── Session re-exports ─────────────────────────────────────────────

pub use session::{ScanPhase, ScanSession, ScanTally, ScanTransitionRecord, SessionError};

// ─── Verdict re-exports ─────────────────────────────────────────────

pub use verdict::{outcome_for, outcome_from_error, outcome_from_response};

// ─── Feedback re-exports ────────────────────────────────────────────

pub use feedback::{pattern_for, Feedback, SilentFeedback};

// ─── Source re-exports ──────────────────────────────────────────────

pub use source::{DecodeSource, StdinSource};
