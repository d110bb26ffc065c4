//! Envelope codec (JSON text frames).
//!
//! Decode is two-phase: the frame is parsed as a JSON object first, then the
//! body is parsed against the shape its kind requires. This is what lets the
//! codec tell a malformed frame apart from an unknown kind or a payload
//! mismatch. Unknown top-level fields (the relay adds `headers`) are ignored.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use crate::error::DecodeError;
use crate::protocol::envelope::{Envelope, Kind};

/// Serialize an envelope to its canonical JSON text.
pub fn encode(env: &Envelope) -> String {
    let body = match env {
        Envelope::Register(b) => json!({ "user": b.user }),
        Envelope::Chat(b) => {
            let mut body = json!({ "user": b.sender, "message": b.message });
            if let (Some(recipient), Some(map)) = (&b.recipient, body.as_object_mut()) {
                map.insert("recipient".into(), Value::String(recipient.clone()));
            }
            body
        }
        Envelope::ServerAck(b) | Envelope::ServerError(b) => json!({ "message": b.message }),
    };

    json!({
        "type": env.kind().as_str(),
        "body": body
    })
    .to_string()
}

/// Parse an inbound text frame.
pub fn decode(text: &str) -> Result<Envelope, DecodeError> {
    let frame: Map<String, Value> =
        serde_json::from_str(text).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let kind = match frame.get("type") {
        Some(Value::String(label)) => {
            Kind::from_wire(label).ok_or_else(|| DecodeError::UnknownKind(label.clone()))?
        }
        Some(other) => return Err(DecodeError::UnknownKind(other.to_string())),
        None => return Err(DecodeError::UnknownKind(String::new())),
    };

    let body = frame.get("body").filter(|b| !b.is_null());
    let env = match kind {
        Kind::Register => Envelope::Register(parse_body(kind, body)?),
        Kind::Chat => Envelope::Chat(parse_body(kind, body)?),
        Kind::ServerAck => Envelope::ServerAck(parse_body(kind, body)?),
        Kind::ServerError => Envelope::ServerError(parse_body(kind, body)?),
    };
    Ok(env)
}

fn parse_body<T: DeserializeOwned>(kind: Kind, body: Option<&Value>) -> Result<T, DecodeError> {
    let body = body.ok_or_else(|| DecodeError::PayloadMismatch {
        kind: kind.as_str(),
        detail: "missing body".into(),
    })?;
    T::deserialize(body).map_err(|e| DecodeError::PayloadMismatch {
        kind: kind.as_str(),
        detail: e.to_string(),
    })
}
