//! # Verify Subcommand
//!
//! One-shot verification for ops debugging: parse one NV1 payload, post it,
//! print the mapped verdict as JSON. Exit code 0 only when the ticket is
//! admitted — so the command composes into shell checks.

use anyhow::{Context, Result};
use clap::Args;
use url::Url;

use nv_client::CheckinClient;
use nv_payload::parse_nv1;
use nv_scan::outcome_for;

use crate::resolve_config;

/// Arguments for the `nv verify` subcommand.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Raw scanned payload (e.g. "NV1:t=...&e=...&s=...").
    pub payload: String,

    /// Backend base URL (overrides NV_BACKEND_URL).
    #[arg(long)]
    pub backend: Option<Url>,

    /// Per-club scanner key (overrides NV_SCANNER_KEY).
    #[arg(long)]
    pub scanner_key: Option<String>,
}

/// Execute the verify subcommand.
pub async fn run_verify(args: &VerifyArgs) -> Result<u8> {
    let Some(token) = parse_nv1(&args.payload) else {
        println!("ERROR: invalid code");
        return Ok(1);
    };

    let config = resolve_config(args.backend.clone(), args.scanner_key.clone())?;
    let client = CheckinClient::new(config).context("failed to build check-in client")?;

    let verdict = outcome_for(client.check_in(&token).await);
    println!("{}", serde_json::to_string_pretty(&verdict)?);

    Ok(if verdict.is_admitted() { 0 } else { 1 })
}
