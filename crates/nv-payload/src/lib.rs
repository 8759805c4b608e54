#![deny(missing_docs)]

//! # nv-payload — NV1 Payload Parser
//!
//! Decodes the text carried by a scanned Nightvenue entry code into a
//! [`ScanToken`] triple. The NV1 format is a query string, optionally
//! prefixed with `NV1:` or `NV1?`, encoding the ticket token, the event
//! identifier, and the signature tag:
//!
//! ```text
//! NV1:t=tok_9f8e7d6c&e=evt_42&s=a3f1b2c4
//! ```
//!
//! ## Contract
//!
//! - The `NV1:` / `NV1?` prefix is optional and matched exactly.
//! - The remainder is `application/x-www-form-urlencoded`: percent-escapes
//!   and `+` are decoded, a leading `?` is ignored.
//! - Field aliases, in lookup order: `t`/`token`, `e`/`event`/`eventId`,
//!   `s`/`sig`/`signature`. For each alias the first occurrence of that key
//!   counts; a present-but-empty value falls through to the next alias.
//! - Parsing yields a triple only when all three fields resolve non-empty.
//!   Anything else is simply not a valid code — there is no structured parse
//!   error, because the scanner treats every malformed payload the same way.

pub use nv_core::ScanToken;

/// Recognized payload prefixes. Matched exactly, case-sensitive.
const NV1_PREFIXES: [&str; 2] = ["NV1:", "NV1?"];

/// Aliases for the ticket token field, in lookup order.
const TOKEN_KEYS: [&str; 2] = ["t", "token"];
/// Aliases for the event identifier field, in lookup order.
const EVENT_KEYS: [&str; 3] = ["e", "event", "eventId"];
/// Aliases for the signature tag field, in lookup order.
const HMAC_KEYS: [&str; 3] = ["s", "sig", "signature"];

/// Parse raw scanned text as an NV1 payload.
///
/// Returns `Some` only if the token, event id, and signature tag all resolve
/// to non-empty values. Surrounding whitespace (including a trailing `\r`
/// from CRLF line sources) is ignored.
pub fn parse_nv1(raw: &str) -> Option<ScanToken> {
    let trimmed = raw.trim();
    let query = strip_nv1_prefix(trimmed);
    // A leading `?` on the query remainder is ignored, so `NV1:?t=...`
    // parses the same as `NV1?t=...`.
    let query = query.strip_prefix('?').unwrap_or(query);

    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let token = lookup(&pairs, &TOKEN_KEYS)?;
    let event_id = lookup(&pairs, &EVENT_KEYS)?;
    let hmac = lookup(&pairs, &HMAC_KEYS)?;

    ScanToken::new(token, event_id, hmac).ok()
}

/// Strip one recognized NV1 prefix, if present.
fn strip_nv1_prefix(raw: &str) -> &str {
    for prefix in NV1_PREFIXES {
        if let Some(rest) = raw.strip_prefix(prefix) {
            return rest;
        }
    }
    raw
}

/// Resolve a field through its alias chain.
///
/// For each alias in order, the first occurrence of that key in the pair list
/// is consulted; an empty value falls through to the next alias.
fn lookup(pairs: &[(String, String)], aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        let first = pairs.iter().find(|(k, _)| k == alias).map(|(_, v)| v);
        if let Some(v) = first {
            if !v.is_empty() {
                return Some(v.clone());
            }
        }
    }
    None
}
