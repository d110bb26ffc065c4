//! Dispatcher module exports.
//!
//! Re-exports the dispatcher, the handler trait, and the effect type so
//! session code can depend on this module directly.

pub mod dispatcher;

pub use dispatcher::{ChatHandler, Dispatcher, EnvelopeHandler, StatusHandler, UiEffect};
