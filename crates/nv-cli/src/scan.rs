//! # Scan Subcommand
//!
//! The interactive scanner console. A hardware wedge scanner types each
//! decoded code as a line on stdin; the console verifies it and shows the
//! verdict until the operator advances.
//!
//! ## Console protocol
//!
//! - While scanning: a non-empty line is a decoded code; blank lines are
//!   ignored.
//! - While a verdict is displayed: any line (the Enter key suffices)
//!   acknowledges it and resumes scanning. The line is never treated as a
//!   decode — scans are not queued behind an unacknowledged verdict.
//! - `/restart` re-acquires the input device without touching the session.
//! - EOF or Ctrl-C ends the session and prints the tally summary.

use std::io::Write;

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use nv_client::CheckinClient;
use nv_payload::parse_nv1;
use nv_scan::{
    outcome_for, pattern_for, DecodeSource, Feedback, ScanOutcome, ScanSession, SessionError,
    StdinSource,
};

use crate::resolve_config;

/// Console command that re-acquires the decode device.
const RESTART_COMMAND: &str = "/restart";

/// Arguments for the `nv scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Backend base URL (overrides NV_BACKEND_URL).
    #[arg(long)]
    pub backend: Option<Url>,

    /// Per-club scanner key (overrides NV_SCANNER_KEY).
    #[arg(long)]
    pub scanner_key: Option<String>,
}

/// Execute the scan subcommand.
pub async fn run_scan(args: &ScanArgs) -> Result<u8> {
    let config = resolve_config(args.backend.clone(), args.scanner_key.clone())?;
    let client = CheckinClient::new(config).context("failed to build check-in client")?;
    let mut source = StdinSource::acquire();
    let mut feedback = TerminalFeedback;
    let mut session = ScanSession::new();

    println!("Scanner console ready — session {}", session.id());
    println!(
        "Scan a code to check in. Press Enter to advance past a verdict, \
         type {RESTART_COMMAND} to re-acquire the scanner, Ctrl-C or EOF to finish."
    );

    loop {
        let line = tokio::select! {
            next = source.next_decode() => match next {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    // Decode hiccups while scanning are not fatal; poll again.
                    tracing::warn!("decode source error: {e}");
                    continue;
                }
            },
            _ = tokio::signal::ctrl_c() => break,
        };

        if line.trim() == RESTART_COMMAND {
            match source.restart().await {
                Ok(()) => println!("-- scanner re-acquired"),
                Err(e) => tracing::warn!("failed to re-acquire scanner: {e}"),
            }
            continue;
        }

        if session.phase().is_terminal() {
            // Any input acknowledges the displayed verdict.
            session.resume().context("failed to resume scanning")?;
            println!("-- ready for next scan");
            continue;
        }

        if line.trim().is_empty() {
            continue;
        }

        match parse_nv1(&line) {
            Some(token) => {
                let seq = session
                    .begin_verification(token.clone())
                    .context("scan arrived in an unexpected phase")?;
                tracing::debug!(seq, event_id = %token.event_id, "verifying");
                let verdict = outcome_for(client.check_in(&token).await);
                match session.complete(seq, verdict) {
                    Ok(()) => {}
                    Err(SessionError::StaleVerdict { got, .. }) => {
                        tracing::debug!(got, "dropping stale verdict");
                        continue;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            None => {
                session
                    .fail_parse("invalid code")
                    .context("decode arrived in an unexpected phase")?;
            }
        }

        if let Some(outcome) = session.last_outcome() {
            feedback.emit(outcome);
            print_verdict(outcome);
        }
    }

    print_summary(&session);
    Ok(0)
}

/// Render one verdict line for the operator.
fn print_verdict(outcome: &ScanOutcome) {
    match outcome {
        ScanOutcome::Success {
            serial,
            status,
            checked_in_at,
        } => {
            let serial = serial.as_deref().unwrap_or("-");
            let status = status.as_deref().unwrap_or("-");
            match checked_in_at {
                Some(at) => println!("OK: admitted — serial {serial}, status {status}, at {at}"),
                None => println!("OK: admitted — serial {serial}, status {status}"),
            }
        }
        ScanOutcome::Duplicate { checked_in_at } => match checked_in_at {
            Some(at) => println!("DUPLICATE: already checked in at {at}"),
            None => println!("DUPLICATE: already checked in"),
        },
        ScanOutcome::Invalid => println!("INVALID: not a known ticket for this event"),
        ScanOutcome::BadSignature => println!("BAD SIGNATURE: code failed verification"),
        ScanOutcome::Error { message } => println!("ERROR: {message}"),
    }
    println!("   (press Enter to scan the next code)");
}

/// Print the end-of-session tally.
fn print_summary(session: &ScanSession) {
    let tally = session.tally();
    println!("Session {} summary:", session.id());
    println!("  decoded:       {}", tally.decoded);
    println!("  admitted:      {}", tally.success);
    println!("  duplicates:    {}", tally.duplicate);
    println!("  invalid:       {}", tally.invalid);
    println!("  bad signature: {}", tally.bad_signature);
    println!("  errors:        {}", tally.error);
}

/// Maps vibration patterns onto terminal bells: one bell per "on" pulse.
struct TerminalFeedback;

impl Feedback for TerminalFeedback {
    fn emit(&mut self, outcome: &ScanOutcome) {
        let pulses = pattern_for(outcome).iter().step_by(2).count();
        let mut out = std::io::stdout();
        let _ = write!(out, "{}", "\u{0007}".repeat(pulses));
        let _ = out.flush();
    }
}
