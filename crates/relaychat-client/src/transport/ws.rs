//! WebSocket transport.
//!
//! Responsibilities:
//! - Connect to the relay (bounded by `client.connect_timeout_ms`)
//! - Own the socket in one driver task per session
//! - Forward text frames and lifecycle changes as `SessionEvent`s
//! - Drain the bounded outbound queue; closing the queue closes the socket

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio::time::Duration;
use tokio_tungstenite::tungstenite::Message;
use tracing::Instrument;

use relaychat_core::error::{RelayChatError, Result};

use crate::config::ClientSection;
use crate::transport::{Connector, SessionEvent, Transport, TransportEvent};

/// Spawns one driver task per connection on the current tokio runtime.
pub struct WsConnector {
    events: mpsc::UnboundedSender<SessionEvent>,
    outbound_queue: usize,
    connect_timeout: Duration,
}

impl WsConnector {
    pub fn new(events: mpsc::UnboundedSender<SessionEvent>, client: &ClientSection) -> Self {
        Self::with_limits(events, client.outbound_queue, client.connect_timeout())
    }

    pub fn with_limits(
        events: mpsc::UnboundedSender<SessionEvent>,
        outbound_queue: usize,
        connect_timeout: Duration,
    ) -> Self {
        // wss:// handshakes need a process-wide rustls provider; a second install is a no-op
        let _ = rustls::crypto::ring::default_provider().install_default();
        Self {
            events,
            outbound_queue: outbound_queue.max(1),
            connect_timeout,
        }
    }
}

impl Connector for WsConnector {
    fn connect(&self, session_id: &str, address: &str) -> Box<dyn Transport> {
        let (out_tx, out_rx) = mpsc::channel::<Message>(self.outbound_queue);
        let span = tracing::info_span!("session", id = %session_id);

        tokio::spawn(
            drive(
                session_id.to_owned(),
                address.to_owned(),
                out_rx,
                self.events.clone(),
                self.connect_timeout,
            )
            .instrument(span),
        );

        Box::new(WsTransport { tx: Some(out_tx) })
    }
}

/// Sender side of a driver task's outbound queue.
pub struct WsTransport {
    tx: Option<mpsc::Sender<Message>>,
}

impl Transport for WsTransport {
    fn send_text(&mut self, text: String) -> Result<()> {
        let tx = self
            .tx
            .as_ref()
            .ok_or_else(|| RelayChatError::Transport("connection closed".into()))?;

        tx.try_send(Message::Text(text.into())).map_err(|e| match e {
            TrySendError::Full(_) => RelayChatError::Transport("outbound queue full".into()),
            TrySendError::Closed(_) => RelayChatError::Transport("connection closed".into()),
        })
    }

    fn close(&mut self) {
        // dropping the sender ends the driver's writer arm
        self.tx = None;
    }
}

async fn drive(
    session_id: String,
    address: String,
    mut out_rx: mpsc::Receiver<Message>,
    events: mpsc::UnboundedSender<SessionEvent>,
    connect_timeout: Duration,
) {
    let emit = |event: TransportEvent| {
        // receiver gone means the manager is shutting down
        let _ = events.send(SessionEvent::new(session_id.clone(), event));
    };

    let connected = tokio::time::timeout(connect_timeout, tokio_tungstenite::connect_async(address.as_str())).await;
    let socket = match connected {
        Ok(Ok((socket, _resp))) => socket,
        Ok(Err(e)) => {
            tracing::warn!(%address, error = %e, "connect failed");
            emit(TransportEvent::Closed {
                reason: Some(format!("connect failed: {e}")),
            });
            return;
        }
        Err(_) => {
            tracing::warn!(%address, timeout_ms = connect_timeout.as_millis() as u64, "connect timed out");
            emit(TransportEvent::Closed {
                reason: Some("connect timed out".into()),
            });
            return;
        }
    };

    tracing::info!(%address, "connected");
    emit(TransportEvent::Opened);

    let (mut ws_tx, mut ws_rx) = socket.split();

    let reason = loop {
        tokio::select! {
            // outbound writer
            maybe_out = out_rx.recv() => {
                match maybe_out {
                    Some(m) => {
                        if let Err(e) = ws_tx.send(m).await {
                            break Some(format!("write failed: {e}"));
                        }
                    }
                    None => {
                        let _ = ws_tx.send(Message::Close(None)).await;
                        break None;
                    }
                }
            }

            // inbound reader
            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        tracing::debug!(bytes = text.len(), "inbound frame");
                        emit(TransportEvent::Text(text.as_str().to_owned()));
                    }
                    Some(Ok(Message::Binary(b))) => {
                        tracing::debug!(bytes = b.len(), "binary frame ignored");
                    }
                    Some(Ok(Message::Close(_))) | None => break Some("closed by relay".to_owned()),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Some(format!("read failed: {e}")),
                }
            }
        }
    };

    match &reason {
        Some(r) => tracing::info!(reason = %r, "connection ended"),
        None => tracing::info!("connection closed locally"),
    }
    emit(TransportEvent::Closed { reason });
}
