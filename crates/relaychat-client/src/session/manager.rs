use std::collections::HashMap;
use std::sync::Arc;

use relaychat_core::error::{RelayChatError, Result};

use crate::config::ClientConfig;
use crate::dispatch::{Dispatcher, UiEffect};
use crate::session::state::{ChatEntry, ConnectionState, SessionState};
use crate::transport::{Connector, SessionEvent, TransportEvent};
use crate::ui::{UiCommand, UiSink};

/// Owns one [`SessionState`] per session id and forwards their effects to the UI.
///
/// Sessions never share state: an event for one id only ever touches that
/// session.
pub struct SessionManager {
    sessions: HashMap<String, SessionState>,
    peers: HashMap<String, String>,
    connector: Box<dyn Connector>,
    dispatcher: Dispatcher,
    sink: Arc<dyn UiSink>,
}

impl SessionManager {
    pub fn new(connector: Box<dyn Connector>, sink: Arc<dyn UiSink>) -> Self {
        Self::with_dispatcher(connector, sink, Dispatcher::with_defaults())
    }

    pub fn with_dispatcher(
        connector: Box<dyn Connector>,
        sink: Arc<dyn UiSink>,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            sessions: HashMap::new(),
            peers: HashMap::new(),
            connector,
            dispatcher,
            sink,
        }
    }

    /// Open every configured session and pair it with its peer.
    pub fn from_config(
        cfg: &ClientConfig,
        connector: Box<dyn Connector>,
        sink: Arc<dyn UiSink>,
    ) -> Result<Self> {
        let mut manager = Self::new(connector, sink);
        for s in &cfg.sessions {
            manager.create(&s.id, &s.address)?;
            if let Some(peer) = &s.peer {
                manager.pair(&s.id, peer)?;
            }
        }
        Ok(manager)
    }

    pub fn create(&mut self, id: &str, address: &str) -> Result<()> {
        if self.sessions.contains_key(id) {
            return Err(RelayChatError::DuplicateSessionId(id.to_owned()));
        }
        let session = SessionState::open(id, address, self.connector.as_ref());
        self.sink.on_status_changed(id, session.status());
        self.sessions.insert(id.to_owned(), session);
        Ok(())
    }

    /// Record the default recipient used by [`trigger_send`](Self::trigger_send).
    pub fn pair(&mut self, id: &str, peer: &str) -> Result<()> {
        if !self.sessions.contains_key(id) {
            return Err(RelayChatError::UnknownSessionId(id.to_owned()));
        }
        self.peers.insert(id.to_owned(), peer.to_owned());
        Ok(())
    }

    pub fn send(&mut self, id: &str, message: &str, recipient: &str) -> Result<()> {
        let session = self
            .sessions
            .get_mut(id)
            .ok_or_else(|| RelayChatError::UnknownSessionId(id.to_owned()))?;

        let before = session.state();
        let result = session.send(message, recipient);
        if before != ConnectionState::Closed && session.state() == ConnectionState::Closed {
            let effect = UiEffect::StatusChanged(session.status().to_owned());
            notify(self.sink.as_ref(), id, &effect);
        }
        result
    }

    pub fn trigger_send(&mut self, id: &str, text: &str) -> Result<()> {
        if !self.sessions.contains_key(id) {
            return Err(RelayChatError::UnknownSessionId(id.to_owned()));
        }
        let peer = self
            .peers
            .get(id)
            .cloned()
            .ok_or_else(|| RelayChatError::NoRecipient(id.to_owned()))?;
        self.send(id, text, &peer)
    }

    pub fn trigger_connect(&mut self, id: &str, address: &str) -> Result<()> {
        self.create(id, address)
    }

    /// Apply one UI command. `Quit` is handled by the event loop.
    pub fn execute(&mut self, cmd: UiCommand) -> Result<()> {
        match cmd {
            UiCommand::Send { session_id, text } => self.trigger_send(&session_id, &text),
            UiCommand::Connect {
                session_id,
                address,
            } => self.trigger_connect(&session_id, &address),
            UiCommand::Quit => Ok(()),
        }
    }

    /// Route one transport callback to the session that owns the connection.
    pub fn handle_event(&mut self, ev: SessionEvent) {
        let SessionEvent { session_id, event } = ev;
        let Some(session) = self.sessions.get_mut(&session_id) else {
            tracing::debug!(session = %session_id, "event for unknown session dropped");
            return;
        };

        let effect = match event {
            TransportEvent::Opened => session.on_connected(),
            TransportEvent::Text(text) => Some(session.on_inbound_text(&text, &self.dispatcher)),
            TransportEvent::Closed { reason } => {
                if let Some(reason) = reason {
                    tracing::warn!(session = %session_id, %reason, "transport failed");
                }
                session.on_closed()
            }
        };

        if let Some(effect) = effect {
            notify(self.sink.as_ref(), &session_id, &effect);
        }
    }

    /// Surface a failed command to the UI.
    pub fn report(&self, session_id: &str, err: &RelayChatError) {
        tracing::warn!(session = %session_id, code = err.code().as_str(), error = %err, "command failed");
        self.sink.on_diagnostic(session_id, &err.to_string());
    }

    pub fn status_of(&self, id: &str) -> Result<&str> {
        Ok(self.session(id)?.status())
    }

    pub fn chat_log_of(&self, id: &str) -> Result<&[ChatEntry]> {
        Ok(self.session(id)?.chat_log())
    }

    pub fn state_of(&self, id: &str) -> Result<ConnectionState> {
        Ok(self.session(id)?.state())
    }

    pub fn session_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.sessions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Close every transport and drop all sessions.
    pub fn shutdown(&mut self) {
        for (id, mut session) in self.sessions.drain() {
            if let Some(effect) = session.on_closed() {
                notify(self.sink.as_ref(), &id, &effect);
            }
        }
        self.peers.clear();
    }

    fn session(&self, id: &str) -> Result<&SessionState> {
        self.sessions
            .get(id)
            .ok_or_else(|| RelayChatError::UnknownSessionId(id.to_owned()))
    }
}

fn notify(sink: &dyn UiSink, session_id: &str, effect: &UiEffect) {
    match effect {
        UiEffect::StatusChanged(text) => sink.on_status_changed(session_id, text),
        UiEffect::ChatAppended { user, message } => sink.on_chat_appended(session_id, user, message),
        UiEffect::Diagnostic(text) => sink.on_diagnostic(session_id, text),
    }
}
