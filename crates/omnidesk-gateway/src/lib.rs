// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transport gateway for the Omnidesk inbox core.
//!
//! Owns a single real-time connection to the messaging backend and exposes
//! subscribe/publish operations. When no backend is reachable the gateway
//! falls back to a simulation mode that synthesizes inbound traffic, so the
//! consuming UI always has a live-feeling channel. Connection failures are
//! logged, never surfaced to callers.

pub mod registry;

mod link;
mod simulation;

use chrono::Utc;
use omnidesk_config::model::GatewayConfig;
use omnidesk_core::{
    GatewayFrame, InboundMessageEvent, OutboundMessage, PresenceAnnouncement, Sender,
    StatusKind, StatusUpdateEvent, TypingEvent,
};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::link::WsLink;
use crate::registry::{EventDispatcher, HandlerGuard};
use crate::simulation::{Simulation, schedule_delivery_updates};

/// Which kind of channel the gateway currently runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayMode {
    /// Not connected; no traffic flows.
    Inactive,
    /// Live WebSocket connection to the backend.
    Connected,
    /// Synthesizing traffic locally.
    Simulated,
}

impl std::fmt::Display for GatewayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayMode::Inactive => write!(f, "inactive"),
            GatewayMode::Connected => write!(f, "connected"),
            GatewayMode::Simulated => write!(f, "simulated"),
        }
    }
}

enum LinkState {
    Inactive,
    Connected(WsLink),
    Simulated(Simulation),
}

/// Uniform event-based channel for message traffic, real or simulated.
///
/// Handlers registered through `on_message`/`on_status`/`on_typing` receive
/// events identical in shape regardless of the underlying mode. The gateway
/// holds no domain state; the conversation store owns all of that.
pub struct TransportGateway {
    config: GatewayConfig,
    identity: String,
    dispatcher: EventDispatcher,
    state: tokio::sync::Mutex<LinkState>,
}

impl TransportGateway {
    /// Creates a disconnected gateway. `identity` is announced to the
    /// backend on connect.
    pub fn new(config: GatewayConfig, identity: impl Into<String>) -> Self {
        Self {
            config,
            identity: identity.into(),
            dispatcher: EventDispatcher::default(),
            state: tokio::sync::Mutex::new(LinkState::Inactive),
        }
    }

    /// Establishes the channel.
    ///
    /// With an endpoint configured, attempts the WebSocket connection within
    /// the configured timeout and announces presence. On failure -- or when
    /// no endpoint is configured -- falls back to simulation mode. Never
    /// returns an error; from here on registered handlers receive events
    /// either way. There is no reconnection policy: once simulated, the
    /// gateway stays simulated until `disconnect`.
    pub async fn connect(&self) {
        let mut state = self.state.lock().await;
        if !matches!(*state, LinkState::Inactive) {
            warn!("connect called on an active gateway, ignoring");
            return;
        }

        if let Some(endpoint) = self.config.endpoint.clone() {
            let timeout = Duration::from_secs(self.config.connect_timeout_secs);
            let announce = PresenceAnnouncement {
                id: self.identity.clone(),
                role: Sender::Agent,
            };
            match WsLink::connect(&endpoint, timeout, announce, self.dispatcher.clone()).await
            {
                Ok(link) => {
                    *state = LinkState::Connected(link);
                    return;
                }
                Err(e) => {
                    warn!(
                        endpoint = %endpoint,
                        error = %e,
                        "backend unreachable, falling back to simulation mode"
                    );
                }
            }
        } else {
            info!("no gateway endpoint configured, starting in simulation mode");
        }

        *state = LinkState::Simulated(Simulation::start(
            self.config.simulation.clone(),
            self.dispatcher.clone(),
        ));
    }

    /// Tears down the channel and marks it inactive. Idempotent.
    ///
    /// Cancels the simulation interval tasks; in-flight per-message delivery
    /// timers are left to fire (they degrade to no-ops downstream).
    pub async fn disconnect(&self) {
        let mut state = self.state.lock().await;
        match std::mem::replace(&mut *state, LinkState::Inactive) {
            LinkState::Connected(link) => {
                link.close().await;
                info!("gateway disconnected");
            }
            LinkState::Simulated(sim) => {
                sim.stop();
                info!("simulation stopped, gateway disconnected");
            }
            LinkState::Inactive => {
                debug!("disconnect called on an inactive gateway");
            }
        }
    }

    /// Registers a handler for inbound messages.
    pub fn on_message(
        &self,
        handler: impl Fn(&InboundMessageEvent) + Send + Sync + 'static,
    ) -> HandlerGuard {
        self.dispatcher.messages.register(handler)
    }

    /// Registers a handler for delivery status updates.
    pub fn on_status(
        &self,
        handler: impl Fn(&StatusUpdateEvent) + Send + Sync + 'static,
    ) -> HandlerGuard {
        self.dispatcher.statuses.register(handler)
    }

    /// Registers a handler for typing indicators.
    pub fn on_typing(
        &self,
        handler: impl Fn(&TypingEvent) + Send + Sync + 'static,
    ) -> HandlerGuard {
        self.dispatcher.typing.register(handler)
    }

    /// Publishes an agent message.
    ///
    /// Connected: forwards the message to the backend. Simulated: schedules
    /// the delivered/read status callbacks after the configured delays.
    /// Failures are logged, never propagated.
    pub async fn send(&self, message: OutboundMessage) {
        let state = self.state.lock().await;
        match &*state {
            LinkState::Connected(ws) => {
                let id = message.id.clone();
                if let Err(e) = ws.send_frame(&GatewayFrame::Send(message)).await {
                    warn!(message_id = %id, error = %e, "failed to publish message");
                }
            }
            LinkState::Simulated(_) => {
                debug!(message_id = %message.id, "simulating delivery for sent message");
                schedule_delivery_updates(
                    self.dispatcher.clone(),
                    message.id,
                    &self.config.simulation,
                );
            }
            LinkState::Inactive => {
                warn!(message_id = %message.id, "send on inactive gateway, dropping");
            }
        }
    }

    /// Forwards a typing indicator. No-op unless connected.
    pub async fn send_typing_indicator(&self, conversation_id: &str, is_typing: bool) {
        self.forward(GatewayFrame::Typing(TypingEvent {
            conversation_id: conversation_id.to_string(),
            is_typing,
            sender_name: Some(self.identity.clone()),
        }))
        .await;
    }

    /// Reports a delivery status for a message (e.g. the agent read it).
    /// No-op unless connected.
    pub async fn update_message_status(&self, message_id: &str, status: StatusKind) {
        self.forward(GatewayFrame::Status(StatusUpdateEvent {
            message_id: message_id.to_string(),
            status,
            timestamp: Utc::now(),
        }))
        .await;
    }

    /// Subscribes to a conversation's events. No-op unless connected.
    pub async fn join_conversation(&self, conversation_id: &str) {
        self.forward(GatewayFrame::Join {
            conversation_id: conversation_id.to_string(),
        })
        .await;
    }

    /// Unsubscribes from a conversation's events. No-op unless connected.
    pub async fn leave_conversation(&self, conversation_id: &str) {
        self.forward(GatewayFrame::Leave {
            conversation_id: conversation_id.to_string(),
        })
        .await;
    }

    /// The current channel mode.
    pub async fn mode(&self) -> GatewayMode {
        match &*self.state.lock().await {
            LinkState::Inactive => GatewayMode::Inactive,
            LinkState::Connected(_) => GatewayMode::Connected,
            LinkState::Simulated(_) => GatewayMode::Simulated,
        }
    }

    /// True when a channel (real or simulated) is active.
    pub async fn is_active(&self) -> bool {
        self.mode().await != GatewayMode::Inactive
    }

    /// Thin pass-through to the backend; silently dropped in simulation
    /// mode, where status traffic is produced internally by `send`.
    async fn forward(&self, frame: GatewayFrame) {
        let state = self.state.lock().await;
        if let LinkState::Connected(ws) = &*state {
            if let Err(e) = ws.send_frame(&frame).await {
                warn!(error = %e, "failed to forward frame");
            }
        } else {
            debug!("frame not forwarded (gateway not connected to a backend)");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simulated_config() -> GatewayConfig {
        GatewayConfig::default()
    }

    #[tokio::test]
    async fn new_gateway_is_inactive() {
        let gateway = TransportGateway::new(simulated_config(), "test-agent");
        assert_eq!(gateway.mode().await, GatewayMode::Inactive);
        assert!(!gateway.is_active().await);
    }

    #[tokio::test]
    async fn connect_without_endpoint_enters_simulation() {
        let gateway = TransportGateway::new(simulated_config(), "test-agent");
        gateway.connect().await;
        assert_eq!(gateway.mode().await, GatewayMode::Simulated);
        gateway.disconnect().await;
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn unreachable_endpoint_falls_back_to_simulation() {
        let mut config = simulated_config();
        // Discard port: connection refused immediately.
        config.endpoint = Some("ws://127.0.0.1:9".to_string());
        config.connect_timeout_secs = 1;

        let gateway = TransportGateway::new(config, "test-agent");
        gateway.connect().await;
        assert_eq!(gateway.mode().await, GatewayMode::Simulated);
        gateway.disconnect().await;
    }

    #[tokio::test]
    async fn disconnect_is_idempotent() {
        let gateway = TransportGateway::new(simulated_config(), "test-agent");
        gateway.connect().await;

        gateway.disconnect().await;
        assert_eq!(gateway.mode().await, GatewayMode::Inactive);

        // Second disconnect observes the same state, no panic, no error.
        gateway.disconnect().await;
        assert_eq!(gateway.mode().await, GatewayMode::Inactive);
    }

    #[tokio::test]
    async fn connect_while_active_is_ignored() {
        let gateway = TransportGateway::new(simulated_config(), "test-agent");
        gateway.connect().await;
        gateway.connect().await;
        assert_eq!(gateway.mode().await, GatewayMode::Simulated);
        gateway.disconnect().await;
    }

    #[test]
    fn gateway_mode_display() {
        assert_eq!(GatewayMode::Inactive.to_string(), "inactive");
        assert_eq!(GatewayMode::Connected.to_string(), "connected");
        assert_eq!(GatewayMode::Simulated.to_string(), "simulated");
    }
}
