use std::fmt;

use relaychat_core::error::{RelayChatError, Result};
use relaychat_core::protocol::{decode, encode, Envelope};

use crate::dispatch::{Dispatcher, UiEffect};
use crate::transport::{Connector, Transport};

pub const STATUS_CONNECTING: &str = "Connecting";
pub const STATUS_CONNECTED: &str = "Connected";
pub const STATUS_DISCONNECTED: &str = "Disconnected";

/// `Connecting -> Open -> Closed`. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl ConnectionState {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
        }
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One chat log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEntry {
    pub user: String,
    pub message: String,
}

/// One logical user's connection plus its view state.
///
/// Status and chat log are written only by this session's own event path and
/// read by the UI.
pub struct SessionState {
    id: String,
    state: ConnectionState,
    transport: Option<Box<dyn Transport>>,
    status: String,
    chat_log: Vec<ChatEntry>,
}

impl SessionState {
    /// Start connecting to `address`.
    pub fn open(id: impl Into<String>, address: impl Into<String>, connector: &dyn Connector) -> Self {
        let id = id.into();
        let address = address.into();
        let transport = connector.connect(&id, &address);
        tracing::info!(session = %id, %address, "session connecting");

        Self {
            id,
            state: ConnectionState::Connecting,
            transport: Some(transport),
            status: STATUS_CONNECTING.to_owned(),
            chat_log: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn chat_log(&self) -> &[ChatEntry] {
        &self.chat_log
    }

    /// Transport opened: go `Open` and register before anything else goes out.
    pub fn on_connected(&mut self) -> Option<UiEffect> {
        if self.state != ConnectionState::Connecting {
            tracing::warn!(session = %self.id, state = %self.state, "open event ignored");
            return None;
        }
        self.state = ConnectionState::Open;

        let register = encode(&Envelope::register(self.id.clone()));
        if let Err(e) = self.transmit(register) {
            tracing::warn!(session = %self.id, error = %e, "register failed");
            return self.on_closed();
        }

        tracing::info!(session = %self.id, "session open, registered");
        Some(self.apply(UiEffect::StatusChanged(STATUS_CONNECTED.to_owned())))
    }

    /// Transport closed (or failed). Idempotent.
    pub fn on_closed(&mut self) -> Option<UiEffect> {
        if self.state == ConnectionState::Closed {
            return None;
        }
        self.state = ConnectionState::Closed;
        if let Some(mut transport) = self.transport.take() {
            transport.close();
        }

        tracing::info!(session = %self.id, "session closed");
        Some(self.apply(UiEffect::StatusChanged(STATUS_DISCONNECTED.to_owned())))
    }

    /// Send one chat line as this session's user. Nothing is transmitted on error.
    ///
    /// A transport failure closes the session before the error is returned.
    pub fn send(&mut self, message: &str, recipient: &str) -> Result<()> {
        match self.state {
            ConnectionState::Connecting => {
                return Err(RelayChatError::SessionNotOpen(self.id.clone()))
            }
            ConnectionState::Closed => return Err(RelayChatError::SessionClosed(self.id.clone())),
            ConnectionState::Open => {}
        }

        let frame = encode(&Envelope::chat(self.id.as_str(), recipient, message));
        if let Err(e) = self.transmit(frame) {
            tracing::warn!(session = %self.id, error = %e, "send failed, closing session");
            self.on_closed();
            return Err(e);
        }
        tracing::debug!(session = %self.id, %recipient, "chat sent");
        Ok(())
    }

    /// Decode one inbound frame, route it, and apply the resulting effect.
    pub fn on_inbound_text(&mut self, text: &str, dispatcher: &Dispatcher) -> UiEffect {
        if self.state != ConnectionState::Open {
            return UiEffect::Diagnostic(format!("frame received while {}", self.state));
        }

        let effect = match decode(text) {
            Ok(env) => dispatcher.route(&self.id, env),
            Err(e) => dispatcher.route_decode_error(&self.id, &e),
        };
        self.apply(effect)
    }

    fn transmit(&mut self, frame: String) -> Result<()> {
        let transport = self
            .transport
            .as_mut()
            .ok_or_else(|| RelayChatError::SessionClosed(self.id.clone()))?;
        transport.send_text(frame)
    }

    fn apply(&mut self, effect: UiEffect) -> UiEffect {
        match &effect {
            UiEffect::StatusChanged(text) => self.status.clone_from(text),
            UiEffect::ChatAppended { user, message } => self.chat_log.push(ChatEntry {
                user: user.clone(),
                message: message.clone(),
            }),
            UiEffect::Diagnostic(_) => {}
        }
        effect
    }
}
