//! UI collaborator seam.
//!
//! The core never touches a view directly: it reports effects to an injected
//! [`UiSink`], and the view drives the core through [`UiCommand`]s.

use relaychat_core::{RelayChatError, Result};

/// Receives the effects of inbound traffic and lifecycle transitions.
pub trait UiSink: Send + Sync {
    fn on_status_changed(&self, session_id: &str, text: &str);

    fn on_chat_appended(&self, session_id: &str, user: &str, text: &str);

    /// Decode failures, unroutable kinds, and rejected commands.
    fn on_diagnostic(&self, session_id: &str, text: &str) {
        tracing::warn!(session = %session_id, "{text}");
    }
}

/// Terminal view: stdout is the chat window, logs go to stderr.
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl UiSink for ConsoleSink {
    fn on_status_changed(&self, session_id: &str, text: &str) {
        println!("[{session_id}] status: {text}");
    }

    fn on_chat_appended(&self, session_id: &str, user: &str, text: &str) {
        println!("[{session_id}] {user}: {text}");
    }
}

/// Commands the view issues against the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// `triggerSend`: chat to the session's paired peer.
    Send { session_id: String, text: String },
    /// `triggerConnect`: open a new session.
    Connect { session_id: String, address: String },
    Quit,
}

impl UiCommand {
    /// Parse one input line.
    ///
    /// - `<session_id> <text...>` sends
    /// - `/connect <session_id> <address>` connects
    /// - `/quit` quits
    ///
    /// Blank lines yield `Ok(None)`.
    pub fn parse(line: &str) -> Result<Option<UiCommand>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        if let Some(rest) = line.strip_prefix('/') {
            let mut parts = rest.split_whitespace();
            return match (parts.next(), parts.next(), parts.next(), parts.next()) {
                (Some("quit"), None, _, _) => Ok(Some(UiCommand::Quit)),
                (Some("connect"), Some(id), Some(address), None) => Ok(Some(UiCommand::Connect {
                    session_id: id.to_owned(),
                    address: address.to_owned(),
                })),
                (Some("connect"), ..) => Err(RelayChatError::BadRequest(
                    "usage: /connect <session_id> <address>".into(),
                )),
                _ => Err(RelayChatError::BadRequest(format!("unknown command: /{rest}"))),
            };
        }

        match line.split_once(char::is_whitespace) {
            Some((id, text)) if !text.trim().is_empty() => Ok(Some(UiCommand::Send {
                session_id: id.to_owned(),
                text: text.trim().to_owned(),
            })),
            _ => Err(RelayChatError::BadRequest(
                "usage: <session_id> <message>".into(),
            )),
        }
    }

    /// Session the command targets, if any.
    pub fn session_id(&self) -> Option<&str> {
        match self {
            UiCommand::Send { session_id, .. } | UiCommand::Connect { session_id, .. } => {
                Some(session_id.as_str())
            }
            UiCommand::Quit => None,
        }
    }
}
