//! relaychat client library entry.
//!
//! This crate wires the session state machine, the envelope dispatcher, the
//! session manager, and the WebSocket transport into one client runtime. It is
//! consumed by the terminal binary (`main.rs`) and by integration tests.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod app;
pub mod config;
pub mod dispatch;
pub mod session;
pub mod transport;
pub mod ui;

#[cfg(test)]
pub(crate) mod test_support;
