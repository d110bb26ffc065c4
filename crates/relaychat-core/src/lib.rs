//! relaychat core: transport-agnostic envelope contracts and the error surface.
//!
//! This crate defines the wire-level envelope, its codec, and the error types
//! shared by the client runtime and any tooling that speaks the relay protocol.
//! It carries no transport or runtime dependencies.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Malformed relay traffic surfaces as `DecodeError`, never as a crash.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{DecodeError, ErrorCode, RelayChatError, Result};
pub use protocol::{decode, encode, Envelope, Kind};
