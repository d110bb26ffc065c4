//! Envelope model.
//!
//! Body structs ignore unknown fields: the relay decorates frames (for example
//! `user` on acks) and the client only reads what its kind requires.

use serde::Deserialize;

/// Envelope kind (field name is `type` in JSON).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Register,
    Chat,
    ServerAck,
    ServerError,
}

impl Kind {
    pub const ALL: [Kind; 4] = [Kind::Register, Kind::Chat, Kind::ServerAck, Kind::ServerError];

    /// Wire label.
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Register => "user_register",
            Kind::Chat => "chat",
            Kind::ServerAck => "server_response",
            Kind::ServerError => "server_error",
        }
    }

    /// Resolve a wire label, ignoring ASCII case.
    pub fn from_wire(label: &str) -> Option<Kind> {
        Kind::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(label))
    }
}

/// `user_register` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterBody {
    pub user: String,
}

/// `chat` body. Inbound chat frames carry no recipient.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChatBody {
    #[serde(rename = "user")]
    pub sender: String,
    #[serde(default)]
    pub recipient: Option<String>,
    pub message: String,
}

/// `server_response` / `server_error` body.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NoticeBody {
    pub message: String,
}

/// One structured message unit exchanged with the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Envelope {
    Register(RegisterBody),
    Chat(ChatBody),
    ServerAck(NoticeBody),
    ServerError(NoticeBody),
}

impl Envelope {
    pub fn kind(&self) -> Kind {
        match self {
            Envelope::Register(_) => Kind::Register,
            Envelope::Chat(_) => Kind::Chat,
            Envelope::ServerAck(_) => Kind::ServerAck,
            Envelope::ServerError(_) => Kind::ServerError,
        }
    }

    pub fn register(user: impl Into<String>) -> Self {
        Envelope::Register(RegisterBody { user: user.into() })
    }

    pub fn chat(
        sender: impl Into<String>,
        recipient: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Envelope::Chat(ChatBody {
            sender: sender.into(),
            recipient: Some(recipient.into()),
            message: message.into(),
        })
    }

    pub fn server_ack(message: impl Into<String>) -> Self {
        Envelope::ServerAck(NoticeBody { message: message.into() })
    }

    pub fn server_error(message: impl Into<String>) -> Self {
        Envelope::ServerError(NoticeBody { message: message.into() })
    }
}
