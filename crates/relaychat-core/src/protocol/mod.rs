//! Protocol modules (envelope model + JSON codec).
//!
//! Every frame on the relay connection is a JSON text frame of the form
//! `{"type": "<kind>", "body": {...}}`. The codec is panic-free: bad input is
//! reported as `DecodeError` so a hostile or buggy relay cannot take down a
//! session.

pub mod codec;
pub mod envelope;

pub use codec::{decode, encode};
pub use envelope::{ChatBody, Envelope, Kind, NoticeBody, RegisterBody};
