// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event capture sink for asserting on gateway dispatches.
//!
//! `CaptureSink` registers on all three gateway registries and records every
//! dispatched event in arrival order.

use std::sync::{Arc, Mutex};

use omnidesk_core::{GatewayEvent, InboundMessageEvent, StatusUpdateEvent, TypingEvent};
use omnidesk_gateway::TransportGateway;
use omnidesk_gateway::registry::HandlerGuard;

/// Records every event a gateway dispatches, for test assertions.
///
/// Keeps its handler registrations alive for its own lifetime; call
/// [`CaptureSink::detach`] to unregister early.
pub struct CaptureSink {
    events: Arc<Mutex<Vec<GatewayEvent>>>,
    guards: Vec<HandlerGuard>,
}

impl CaptureSink {
    /// Registers capture handlers on all three event kinds.
    pub fn attach(gateway: &TransportGateway) -> Self {
        let events = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&events);
        let on_message = gateway.on_message(move |ev: &InboundMessageEvent| {
            sink.lock().unwrap().push(GatewayEvent::Message(ev.clone()));
        });

        let sink = Arc::clone(&events);
        let on_status = gateway.on_status(move |ev: &StatusUpdateEvent| {
            sink.lock().unwrap().push(GatewayEvent::Status(ev.clone()));
        });

        let sink = Arc::clone(&events);
        let on_typing = gateway.on_typing(move |ev: &TypingEvent| {
            sink.lock().unwrap().push(GatewayEvent::Typing(ev.clone()));
        });

        Self {
            events,
            guards: vec![on_message, on_status, on_typing],
        }
    }

    /// All captured events in arrival order.
    pub fn events(&self) -> Vec<GatewayEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Only the captured inbound message events.
    pub fn messages(&self) -> Vec<InboundMessageEvent> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                GatewayEvent::Message(ev) => Some(ev),
                _ => None,
            })
            .collect()
    }

    /// Only the captured status updates.
    pub fn statuses(&self) -> Vec<StatusUpdateEvent> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                GatewayEvent::Status(ev) => Some(ev),
                _ => None,
            })
            .collect()
    }

    /// Only the captured typing indicators.
    pub fn typing_events(&self) -> Vec<TypingEvent> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                GatewayEvent::Typing(ev) => Some(ev),
                _ => None,
            })
            .collect()
    }

    /// Total number of captured events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all captured events.
    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }

    /// Unregisters the capture handlers.
    pub fn detach(self) {
        for guard in self.guards {
            guard.unregister();
        }
    }
}
