// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event relay pumping gateway events into the shared conversation store.
//!
//! Gateway handlers are synchronous; they forward events into an unbounded
//! channel, and a single task drains the channel into the store. This keeps
//! per-gateway FIFO order: events are applied in the order they were
//! dispatched, one mutation at a time.

use omnidesk_core::GatewayEvent;
use omnidesk_gateway::TransportGateway;
use omnidesk_gateway::registry::HandlerGuard;
use tokio::sync::mpsc;
use tracing::debug;

use crate::store::SharedConversationStore;

/// Connects a gateway's event stream to a conversation store.
///
/// Construction registers the handlers and spawns the pump task; call
/// [`EventRelay::shutdown`] to unregister and drain.
pub struct EventRelay {
    guards: Vec<HandlerGuard>,
    task: tokio::task::JoinHandle<()>,
}

impl EventRelay {
    /// Registers on all three gateway registries and spawns the pump.
    pub fn spawn(gateway: &TransportGateway, store: SharedConversationStore) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<GatewayEvent>();

        let sender = tx.clone();
        let on_message = gateway.on_message(move |ev| {
            // Receiver dropped means the relay is shutting down.
            let _ = sender.send(GatewayEvent::Message(ev.clone()));
        });

        let sender = tx.clone();
        let on_status = gateway.on_status(move |ev| {
            let _ = sender.send(GatewayEvent::Status(ev.clone()));
        });

        let sender = tx;
        let on_typing = gateway.on_typing(move |ev| {
            let _ = sender.send(GatewayEvent::Typing(ev.clone()));
        });

        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                store.lock().await.apply_event(event);
            }
            debug!("event relay drained, stopping");
        });

        Self {
            guards: vec![on_message, on_status, on_typing],
            task,
        }
    }

    /// Unregisters the gateway handlers and waits for queued events to be
    /// applied.
    pub async fn shutdown(self) {
        for guard in self.guards {
            guard.unregister();
        }
        // Unregistering dropped the last senders; the pump ends once the
        // queue is empty.
        let _ = self.task.await;
    }
}
