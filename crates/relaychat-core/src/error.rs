//! Shared error types across relaychat crates.

use thiserror::Error;

/// Stable error codes surfaced to UI collaborators and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Inbound text is not a JSON object.
    Malformed,
    /// `type` is absent or not a known envelope kind.
    UnknownKind,
    /// Body fields required by the kind are missing or mistyped.
    PayloadMismatch,
    /// Send attempted before the connection opened.
    SessionNotOpen,
    /// Send attempted after the connection closed.
    SessionClosed,
    /// No session with that id.
    UnknownSessionId,
    /// A session with that id already exists.
    DuplicateSessionId,
    /// No default recipient paired with the session.
    NoRecipient,
    /// Connection-level failure.
    Transport,
    /// Invalid input (config, commands).
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ErrorCode {
    /// String representation used in logs and diagnostics.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::Malformed => "MALFORMED",
            ErrorCode::UnknownKind => "UNKNOWN_KIND",
            ErrorCode::PayloadMismatch => "PAYLOAD_MISMATCH",
            ErrorCode::SessionNotOpen => "SESSION_NOT_OPEN",
            ErrorCode::SessionClosed => "SESSION_CLOSED",
            ErrorCode::UnknownSessionId => "UNKNOWN_SESSION_ID",
            ErrorCode::DuplicateSessionId => "DUPLICATE_SESSION_ID",
            ErrorCode::NoRecipient => "NO_RECIPIENT",
            ErrorCode::Transport => "TRANSPORT",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

/// Failure to turn an inbound text frame into an [`Envelope`](crate::Envelope).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("malformed envelope: {0}")]
    Malformed(String),
    /// Carries the offending `type` value; empty when the field is absent.
    #[error("unknown envelope kind: {0:?}")]
    UnknownKind(String),
    #[error("payload mismatch for {kind}: {detail}")]
    PayloadMismatch { kind: &'static str, detail: String },
}

impl DecodeError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DecodeError::Malformed(_) => ErrorCode::Malformed,
            DecodeError::UnknownKind(_) => ErrorCode::UnknownKind,
            DecodeError::PayloadMismatch { .. } => ErrorCode::PayloadMismatch,
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, RelayChatError>;

/// Unified error type used by core and client.
#[derive(Debug, Error)]
pub enum RelayChatError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("session {0} is not open yet")]
    SessionNotOpen(String),
    #[error("session {0} is closed")]
    SessionClosed(String),
    #[error("unknown session id: {0}")]
    UnknownSessionId(String),
    #[error("duplicate session id: {0}")]
    DuplicateSessionId(String),
    #[error("session {0} has no paired recipient")]
    NoRecipient(String),
    #[error("transport: {0}")]
    Transport(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

impl RelayChatError {
    /// Map to a stable code.
    pub fn code(&self) -> ErrorCode {
        match self {
            RelayChatError::Decode(e) => e.code(),
            RelayChatError::SessionNotOpen(_) => ErrorCode::SessionNotOpen,
            RelayChatError::SessionClosed(_) => ErrorCode::SessionClosed,
            RelayChatError::UnknownSessionId(_) => ErrorCode::UnknownSessionId,
            RelayChatError::DuplicateSessionId(_) => ErrorCode::DuplicateSessionId,
            RelayChatError::NoRecipient(_) => ErrorCode::NoRecipient,
            RelayChatError::Transport(_) => ErrorCode::Transport,
            RelayChatError::BadRequest(_) => ErrorCode::BadRequest,
            RelayChatError::UnsupportedVersion => ErrorCode::UnsupportedVersion,
            RelayChatError::Internal(_) => ErrorCode::Internal,
        }
    }
}
