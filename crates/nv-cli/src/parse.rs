//! # Parse Subcommand
//!
//! Offline NV1 payload inspection: decode a payload and print the triple as
//! JSON, without touching the network. Useful when checking what a code
//! generator actually emitted.

use anyhow::Result;
use clap::Args;

use nv_payload::parse_nv1;

/// Arguments for the `nv parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// Raw scanned payload (e.g. "NV1:t=...&e=...&s=...").
    pub payload: String,
}

/// Execute the parse subcommand.
pub fn run_parse(args: &ParseArgs) -> Result<u8> {
    match parse_nv1(&args.payload) {
        Some(token) => {
            println!("{}", serde_json::to_string_pretty(&token)?);
            Ok(0)
        }
        None => {
            println!("invalid code");
            Ok(1)
        }
    }
}
