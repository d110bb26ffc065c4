//! In-memory collaborators for unit tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use relaychat_core::error::{RelayChatError, Result};

use crate::transport::{Connector, Transport};
use crate::ui::UiSink;

/// Records every frame each session transmits.
#[derive(Clone, Default)]
pub struct MemoryConnector {
    frames: Arc<Mutex<HashMap<String, Vec<String>>>>,
    closed: Arc<Mutex<HashSet<String>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl MemoryConnector {
    pub fn frames(&self, session_id: &str) -> Vec<String> {
        self.frames
            .lock()
            .unwrap()
            .get(session_id)
            .cloned()
            .unwrap_or_default()
    }

    pub fn is_closed(&self, session_id: &str) -> bool {
        self.closed.lock().unwrap().contains(session_id)
    }

    /// Make every later send on this session fail.
    pub fn fail_sends(&self, session_id: &str) {
        self.failing.lock().unwrap().insert(session_id.to_owned());
    }
}

impl Connector for MemoryConnector {
    fn connect(&self, session_id: &str, _address: &str) -> Box<dyn Transport> {
        Box::new(MemoryTransport {
            session_id: session_id.to_owned(),
            wire: self.clone(),
        })
    }
}

struct MemoryTransport {
    session_id: String,
    wire: MemoryConnector,
}

impl Transport for MemoryTransport {
    fn send_text(&mut self, text: String) -> Result<()> {
        if self.wire.failing.lock().unwrap().contains(&self.session_id) {
            return Err(RelayChatError::Transport("outbound queue full".into()));
        }
        self.wire
            .frames
            .lock()
            .unwrap()
            .entry(self.session_id.clone())
            .or_default()
            .push(text);
        Ok(())
    }

    fn close(&mut self) {
        self.wire.closed.lock().unwrap().insert(self.session_id.clone());
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkEvent {
    Status(String, String),
    Chat(String, String, String),
    Diagnostic(String, String),
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<SinkEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn events_for(&self, session_id: &str) -> Vec<SinkEvent> {
        self.events()
            .into_iter()
            .filter(|e| match e {
                SinkEvent::Status(id, _) | SinkEvent::Chat(id, _, _) | SinkEvent::Diagnostic(id, _) => {
                    id == session_id
                }
            })
            .collect()
    }
}

impl UiSink for RecordingSink {
    fn on_status_changed(&self, session_id: &str, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Status(session_id.into(), text.into()));
    }

    fn on_chat_appended(&self, session_id: &str, user: &str, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Chat(session_id.into(), user.into(), text.into()));
    }

    fn on_diagnostic(&self, session_id: &str, text: &str) {
        self.events
            .lock()
            .unwrap()
            .push(SinkEvent::Diagnostic(session_id.into(), text.into()));
    }
}
