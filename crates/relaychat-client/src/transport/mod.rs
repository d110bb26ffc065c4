//! Transport layer.
//!
//! A session talks to its connection through [`Transport`] and learns about
//! the connection's lifecycle through [`SessionEvent`]s. Every connection
//! reports into one shared event channel, which keeps each session's events
//! in arrival order.

pub mod ws;

use relaychat_core::Result;

pub use ws::{WsConnector, WsTransport};

/// Outbound half of one session's connection. Exclusively owned by the session.
pub trait Transport: Send {
    /// Hand one text frame to the connection. Never blocks.
    fn send_text(&mut self, text: String) -> Result<()>;

    /// Close the connection. Idempotent.
    fn close(&mut self);
}

/// Creates connections. The connection is still in progress when this
/// returns; its outcome arrives later as `Opened` or `Closed`.
pub trait Connector: Send {
    fn connect(&self, session_id: &str, address: &str) -> Box<dyn Transport>;
}

/// Lifecycle callbacks of one connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportEvent {
    Opened,
    Text(String),
    /// `reason` is set when the connection failed rather than closed cleanly.
    Closed { reason: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    pub session_id: String,
    pub event: TransportEvent,
}

impl SessionEvent {
    pub fn new(session_id: impl Into<String>, event: TransportEvent) -> Self {
        Self {
            session_id: session_id.into(),
            event,
        }
    }
}
