//! Event loop.
//!
//! The loop is the single owner of the [`SessionManager`]: transport events and
//! UI commands are applied one at a time, each running to completion, so the
//! sessions need no locking.

use tokio::sync::mpsc;

use crate::session::SessionManager;
use crate::transport::SessionEvent;
use crate::ui::UiCommand;

/// Run until `Quit` arrives or either channel closes, then shut every session
/// down. Returns the manager so callers can inspect the final state.
pub async fn run(
    mut manager: SessionManager,
    mut events: mpsc::UnboundedReceiver<SessionEvent>,
    mut commands: mpsc::Receiver<UiCommand>,
) -> SessionManager {
    loop {
        tokio::select! {
            maybe_ev = events.recv() => {
                match maybe_ev {
                    Some(ev) => manager.handle_event(ev),
                    None => break,
                }
            }

            maybe_cmd = commands.recv() => {
                match maybe_cmd {
                    Some(UiCommand::Quit) | None => break,
                    Some(cmd) => {
                        let target = cmd.session_id().unwrap_or_default().to_owned();
                        if let Err(e) = manager.execute(cmd) {
                            manager.report(&target, &e);
                        }
                    }
                }
            }
        }
    }

    tracing::info!("event loop stopped, closing sessions");
    manager.shutdown();
    manager
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::Arc;

    use super::*;
    use crate::test_support::{MemoryConnector, RecordingSink, SinkEvent};
    use crate::transport::TransportEvent;

    #[tokio::test]
    async fn loop_applies_events_and_commands_in_order() {
        let wire = MemoryConnector::default();
        let sink = Arc::new(RecordingSink::default());
        let mut manager = SessionManager::new(Box::new(wire.clone()), sink.clone());
        manager.create("client1", "ws://localhost:8081").unwrap();
        manager.pair("client1", "client2").unwrap();

        let (ev_tx, ev_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::channel(8);

        // events are queued before the loop starts, so they are already
        // applied by the time the commands below are read
        ev_tx
            .send(SessionEvent::new("client1", TransportEvent::Opened))
            .unwrap();
        ev_tx
            .send(SessionEvent::new(
                "client1",
                TransportEvent::Text(r#"{"type":"chat","body":{"user":"client2","message":"hi"}}"#.into()),
            ))
            .unwrap();

        let handle = tokio::spawn(run(manager, ev_rx, cmd_rx));

        // wait until both events have been consumed before issuing commands
        while !sink.events().iter().any(|e| matches!(e, SinkEvent::Chat(..))) {
            tokio::task::yield_now().await;
        }
        cmd_tx
            .send(UiCommand::Send {
                session_id: "client1".into(),
                text: "hello".into(),
            })
            .await
            .unwrap();
        cmd_tx
            .send(UiCommand::Send {
                session_id: "ghost".into(),
                text: "boo".into(),
            })
            .await
            .unwrap();
        cmd_tx.send(UiCommand::Quit).await.unwrap();

        let manager = handle.await.unwrap();

        assert_eq!(wire.frames("client1").len(), 2);
        assert!(wire.is_closed("client1"));
        assert!(manager.state_of("client1").is_err());
        assert!(sink
            .events()
            .contains(&SinkEvent::Diagnostic("ghost".into(), "unknown session id: ghost".into())));
    }
}
