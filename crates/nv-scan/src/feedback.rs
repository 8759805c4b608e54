//! # Operator Feedback
//!
//! Haptic patterns per outcome, so an operator working a loud door can tell
//! verdicts apart without reading the display. Patterns are millisecond
//! on/off sequences in the convention of `navigator.vibrate` — paired
//! devices pulse them, the console maps them to terminal bells.

use crate::outcome::ScanOutcome;

/// One short pulse: admitted.
pub const SUCCESS_PATTERN: &[u64] = &[60];
/// Two quick pulses: already checked in.
pub const DUPLICATE_PATTERN: &[u64] = &[40, 60, 40];
/// One long pulse: unknown ticket.
pub const INVALID_PATTERN: &[u64] = &[160];
/// Two long pulses: signature refused.
pub const BAD_SIGNATURE_PATTERN: &[u64] = &[160, 80, 160];
/// One heavy pulse: verification did not complete.
pub const ERROR_PATTERN: &[u64] = &[240];

/// The vibration pattern for an outcome.
pub fn pattern_for(outcome: &ScanOutcome) -> &'static [u64] {
    match outcome {
        ScanOutcome::Success { .. } => SUCCESS_PATTERN,
        ScanOutcome::Duplicate { .. } => DUPLICATE_PATTERN,
        ScanOutcome::Invalid => INVALID_PATTERN,
        ScanOutcome::BadSignature => BAD_SIGNATURE_PATTERN,
        ScanOutcome::Error { .. } => ERROR_PATTERN,
    }
}

/// A sink for outcome feedback.
pub trait Feedback {
    /// Signal an outcome to the operator.
    fn emit(&mut self, outcome: &ScanOutcome);
}

/// Feedback sink that does nothing. Used by non-interactive drivers.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentFeedback;

impl Feedback for SilentFeedback {
    fn emit(&mut self, _outcome: &ScanOutcome) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_outcomes() -> Vec<ScanOutcome> {
        vec![
            ScanOutcome::Success {
                serial: None,
                status: None,
                checked_in_at: None,
            },
            ScanOutcome::Duplicate {
                checked_in_at: None,
            },
            ScanOutcome::Invalid,
            ScanOutcome::BadSignature,
            ScanOutcome::Error {
                message: "x".into(),
            },
        ]
    }

    #[test]
    fn every_outcome_has_a_distinct_pattern() {
        let patterns: Vec<&[u64]> = all_outcomes().iter().map(pattern_for).collect();
        for (i, a) in patterns.iter().enumerate() {
            for b in patterns.iter().skip(i + 1) {
                assert_ne!(a, b, "patterns must be distinguishable by feel");
            }
        }
    }

    #[test]
    fn patterns_start_with_a_pulse() {
        for outcome in all_outcomes() {
            assert!(pattern_for(&outcome)[0] > 0);
        }
    }

    #[test]
    fn silent_feedback_accepts_every_outcome() {
        let mut sink = SilentFeedback;
        for outcome in all_outcomes() {
            sink.emit(&outcome);
        }
    }
}
