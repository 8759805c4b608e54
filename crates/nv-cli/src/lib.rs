//! # nv-cli — Operator CLI for the Nightvenue Scanner Stack
//!
//! Provides the `nv` command-line interface for door staff and venue ops.
//!
//! ## Subcommands
//!
//! - `nv scan` — Interactive scanner console: reads decoded codes from a
//!   wedge scanner on stdin, verifies each against the backend, and walks the
//!   operator through the verdict display states.
//! - `nv verify` — One-shot verification of a single payload.
//! - `nv parse` — Offline payload inspection; no network.
//!
//! ## Configuration
//!
//! The backend base URL and per-club scanner key come from `--backend` /
//! `--scanner-key` flags, falling back to the `NV_BACKEND_URL` and
//! `NV_SCANNER_KEY` environment variables.

pub mod parse;
pub mod scan;
pub mod verify;

use anyhow::{Context, Result};
use url::Url;
use zeroize::Zeroizing;

use nv_client::CheckinApiConfig;

/// Resolve client configuration from flags, falling back to the environment.
///
/// Flags win over environment variables field by field, so `--backend` can be
/// combined with a key from `NV_SCANNER_KEY`.
pub fn resolve_config(
    backend: Option<Url>,
    scanner_key: Option<String>,
) -> Result<CheckinApiConfig> {
    let backend_url = match backend {
        Some(url) => url,
        None => std::env::var("NV_BACKEND_URL")
            .context("backend URL required: pass --backend or set NV_BACKEND_URL")?
            .parse()
            .context("NV_BACKEND_URL is not a valid URL")?,
    };

    let scanner_key = Zeroizing::new(match scanner_key {
        Some(key) => key,
        None => std::env::var("NV_SCANNER_KEY")
            .context("scanner key required: pass --scanner-key or set NV_SCANNER_KEY")?,
    });

    let timeout_secs = std::env::var("NV_TIMEOUT_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(10);

    Ok(CheckinApiConfig {
        backend_url,
        scanner_key,
        timeout_secs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_win_over_environment() {
        let cfg = resolve_config(
            Some("http://flag.example:9000".parse().unwrap()),
            Some("flag-key".to_string()),
        )
        .unwrap();
        assert_eq!(cfg.backend_url.as_str(), "http://flag.example:9000/");
        assert_eq!(cfg.scanner_key.as_str(), "flag-key");
        assert_eq!(cfg.timeout_secs, 10);
    }
}
