use std::collections::HashMap;
use std::sync::Arc;

use relaychat_core::{DecodeError, Envelope, Kind};

/// What an inbound envelope does to a session's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// Replace the session's status text.
    StatusChanged(String),
    /// Append one line to the session's chat log.
    ChatAppended { user: String, message: String },
    /// Report only; status and chat log stay untouched.
    Diagnostic(String),
}

/// Maps envelopes of the kinds it claims to a UI effect.
pub trait EnvelopeHandler: Send + Sync {
    fn kinds(&self) -> &'static [Kind];
    fn handle(&self, session_id: &str, env: Envelope) -> UiEffect;
}

/// `server_response` and `server_error` both replace the status text.
#[derive(Debug, Default)]
pub struct StatusHandler;

impl EnvelopeHandler for StatusHandler {
    fn kinds(&self) -> &'static [Kind] {
        &[Kind::ServerAck, Kind::ServerError]
    }

    fn handle(&self, _session_id: &str, env: Envelope) -> UiEffect {
        match env {
            Envelope::ServerAck(body) | Envelope::ServerError(body) => {
                UiEffect::StatusChanged(body.message)
            }
            other => UiEffect::Diagnostic(format!(
                "status handler cannot take {}",
                other.kind().as_str()
            )),
        }
    }
}

#[derive(Debug, Default)]
pub struct ChatHandler;

impl EnvelopeHandler for ChatHandler {
    fn kinds(&self) -> &'static [Kind] {
        &[Kind::Chat]
    }

    fn handle(&self, _session_id: &str, env: Envelope) -> UiEffect {
        match env {
            Envelope::Chat(body) => UiEffect::ChatAppended {
                user: body.sender,
                message: body.message,
            },
            other => UiEffect::Diagnostic(format!(
                "chat handler cannot take {}",
                other.kind().as_str()
            )),
        }
    }
}

/// Registry of envelope handlers keyed by kind.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<Kind, Arc<dyn EnvelopeHandler>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Dispatcher with the built-in status and chat handlers.
    pub fn with_defaults() -> Self {
        let mut d = Self::new();
        d.register(Arc::new(StatusHandler));
        d.register(Arc::new(ChatHandler));
        d
    }

    /// Register a handler for every kind it claims. Later registrations win.
    pub fn register(&mut self, handler: Arc<dyn EnvelopeHandler>) {
        for kind in handler.kinds() {
            self.handlers.insert(*kind, Arc::clone(&handler));
        }
    }

    pub fn registered_kinds(&self) -> Vec<Kind> {
        Kind::ALL
            .into_iter()
            .filter(|k| self.handlers.contains_key(k))
            .collect()
    }

    pub fn route(&self, session_id: &str, env: Envelope) -> UiEffect {
        let kind = env.kind();
        match self.handlers.get(&kind) {
            Some(handler) => handler.handle(session_id, env),
            None => {
                tracing::debug!(session = %session_id, kind = kind.as_str(), "no handler for inbound kind");
                UiEffect::Diagnostic(format!("unexpected inbound {}", kind.as_str()))
            }
        }
    }

    pub fn route_decode_error(&self, session_id: &str, err: &DecodeError) -> UiEffect {
        tracing::warn!(session = %session_id, code = err.code().as_str(), %err, "inbound frame dropped");
        UiEffect::Diagnostic(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_by_kind() {
        let d = Dispatcher::with_defaults();

        assert_eq!(
            d.route("client1", Envelope::server_ack("User registered")),
            UiEffect::StatusChanged("User registered".into())
        );
        assert_eq!(
            d.route("client1", Envelope::server_error("Message cannot be empty")),
            UiEffect::StatusChanged("Message cannot be empty".into())
        );
        assert_eq!(
            d.route("client1", Envelope::chat("client2", "client1", "hi")),
            UiEffect::ChatAppended {
                user: "client2".into(),
                message: "hi".into()
            }
        );
    }

    #[test]
    fn unhandled_kind_is_a_diagnostic() {
        let d = Dispatcher::with_defaults();
        assert!(matches!(
            d.route("client1", Envelope::register("client9")),
            UiEffect::Diagnostic(_)
        ));
        assert_eq!(
            d.registered_kinds(),
            vec![Kind::Chat, Kind::ServerAck, Kind::ServerError]
        );
    }

    #[test]
    fn decode_errors_are_diagnostics() {
        let d = Dispatcher::with_defaults();
        let effect = d.route_decode_error("client1", &DecodeError::UnknownKind("typing".into()));
        assert_eq!(
            effect,
            UiEffect::Diagnostic("unknown envelope kind: \"typing\"".into())
        );
    }

    #[test]
    fn empty_dispatcher_routes_nothing() {
        let d = Dispatcher::new();
        assert!(matches!(
            d.route("client1", Envelope::chat("a", "b", "c")),
            UiEffect::Diagnostic(_)
        ));
    }
}
