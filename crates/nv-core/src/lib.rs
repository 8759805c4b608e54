#![deny(missing_docs)]

//! # nv-core — Foundational Types for the Nightvenue Scanner Stack
//!
//! This crate defines the foundational types that every other crate in the
//! workspace depends on. It has no internal crate dependencies — only `serde`,
//! `thiserror`, `chrono`, and `uuid` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** Every identifier is a
//!    distinct type. You cannot pass an [`EventId`] where a [`TicketToken`]
//!    is expected.
//!
//! 2. **Validation at construction.** A [`ScanToken`] triple that exists is a
//!    triple whose three fields are non-empty. Downstream code never
//!    re-checks.
//!
//! 3. **UTC-only time.** All timestamps flow through [`Timestamp`], which
//!    serializes to ISO 8601 with a `Z` suffix. Server-supplied check-in
//!    times are surfaced exactly as received.
//!
//! 4. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod error;
pub mod temporal;
pub mod token;

// Re-export primary types at crate root for ergonomic imports.
pub use error::ValidationError;
pub use temporal::Timestamp;
pub use token::{EventId, HmacTag, ScanToken, SessionId, TicketToken};
