// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Simulation mode: synthesized inbound traffic when no backend is reachable.
//!
//! Two interval tasks produce events shaped exactly like real ones -- one
//! synthesizes inbound customer messages from a fixed pool, the other rolls
//! a probabilistic typing start/stop pair. Both stop when the gateway
//! disconnects. Per-send delivery timers are scheduled separately by
//! [`schedule_delivery_updates`] and deliberately outlive disconnect; a
//! status update for a conversation that no longer exists degrades to a
//! no-op downstream.

use std::time::Duration;

use chrono::Utc;
use omnidesk_config::model::SimulationConfig;
use omnidesk_core::{
    ContactSummary, GatewayEvent, InboundMessageEvent, Platform, Sender, StatusKind,
    StatusUpdateEvent, TypingEvent,
};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::registry::EventDispatcher;

/// How long a simulated contact "types" before the stop indicator.
const TYPING_BURST: Duration = Duration::from_secs(3);

/// Fixed pool of simulated correspondents. Conversation ids line up with the
/// bootstrap dataset so most traffic lands in existing conversations; the
/// last entry is unseeded and exercises conversation creation on first
/// contact.
const CONTACT_POOL: &[(&str, Platform, &str)] = &[
    ("conv-whatsapp-ana", Platform::Whatsapp, "Ana Flores"),
    ("conv-instagram-marco", Platform::Instagram, "Marco Jensen"),
    ("conv-email-lena", Platform::Email, "Lena Petrova"),
    ("conv-telegram-priya", Platform::Telegram, "Priya Nair"),
    ("conv-sms-jordan", Platform::Sms, "Jordan Reyes"),
    ("conv-facebook-tomas", Platform::Facebook, "Tomas Lindqvist"),
];

const SAMPLE_TEXTS: &[&str] = &[
    "Hi! Is my order on the way yet?",
    "Thanks for the quick reply earlier.",
    "Can I change the delivery address?",
    "Do you have this in a larger size?",
    "I'd like to book a call this week.",
    "The invoice you sent looks wrong.",
    "Perfect, that works for me.",
    "Any update on my support ticket?",
];

/// Handle to the running simulation interval tasks.
pub(crate) struct Simulation {
    cancel: CancellationToken,
}

impl Simulation {
    /// Starts the inbound-message and typing-indicator loops.
    pub fn start(config: SimulationConfig, dispatcher: EventDispatcher) -> Self {
        let cancel = CancellationToken::new();

        let message_interval = Duration::from_secs(config.message_interval_secs);
        let message_cancel = cancel.clone();
        let message_dispatcher = dispatcher.clone();
        tokio::spawn(async move {
            let mut cursor = 0usize;
            loop {
                tokio::select! {
                    _ = message_cancel.cancelled() => break,
                    _ = tokio::time::sleep(message_interval) => {
                        let event = synthesize_message(cursor);
                        debug!(
                            conversation_id = %event.conversation_id,
                            platform = %event.platform,
                            "simulation synthesized inbound message"
                        );
                        message_dispatcher.dispatch(GatewayEvent::Message(event));
                        cursor += 1;
                    }
                }
            }
        });

        let typing_interval = Duration::from_secs(config.typing_interval_secs);
        let typing_probability = config.typing_probability;
        let typing_cancel = cancel.clone();
        let typing_dispatcher = dispatcher;
        tokio::spawn(async move {
            let mut cursor = 0usize;
            loop {
                tokio::select! {
                    _ = typing_cancel.cancelled() => break,
                    _ = tokio::time::sleep(typing_interval) => {
                        cursor += 1;
                        if rand::random::<f64>() >= typing_probability {
                            continue;
                        }
                        let (conversation_id, _, name) =
                            CONTACT_POOL[cursor % CONTACT_POOL.len()];
                        typing_dispatcher.dispatch(GatewayEvent::Typing(TypingEvent {
                            conversation_id: conversation_id.to_string(),
                            is_typing: true,
                            sender_name: Some(name.to_string()),
                        }));

                        // Emit the paired stop unless disconnected mid-burst.
                        tokio::select! {
                            _ = typing_cancel.cancelled() => break,
                            _ = tokio::time::sleep(TYPING_BURST) => {
                                typing_dispatcher.dispatch(GatewayEvent::Typing(TypingEvent {
                                    conversation_id: conversation_id.to_string(),
                                    is_typing: false,
                                    sender_name: Some(name.to_string()),
                                }));
                            }
                        }
                    }
                }
            }
        });

        Self { cancel }
    }

    /// Stops both interval loops. Safe to call more than once.
    pub fn stop(&self) {
        self.cancel.cancel();
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

fn synthesize_message(cursor: usize) -> InboundMessageEvent {
    let (conversation_id, platform, name) = CONTACT_POOL[cursor % CONTACT_POOL.len()];
    let content = SAMPLE_TEXTS[cursor % SAMPLE_TEXTS.len()];
    InboundMessageEvent {
        id: format!("sim-{}", uuid::Uuid::new_v4()),
        platform,
        conversation_id: conversation_id.to_string(),
        content: content.to_string(),
        sender: Sender::Customer,
        timestamp: Utc::now(),
        contact: ContactSummary {
            name: name.to_string(),
            avatar: None,
            is_online: true,
        },
    }
}

/// Schedules the delivered/read status callbacks for a locally sent message.
///
/// The two updates fire after the configured delays measured from the send.
/// The spawned task is intentionally not cancelled on disconnect.
pub(crate) fn schedule_delivery_updates(
    dispatcher: EventDispatcher,
    message_id: String,
    config: &SimulationConfig,
) {
    let delivered_delay = Duration::from_millis(config.delivered_delay_ms);
    let read_delay = Duration::from_millis(config.read_delay_ms);

    tokio::spawn(async move {
        tokio::time::sleep(delivered_delay).await;
        dispatcher.dispatch(GatewayEvent::Status(StatusUpdateEvent {
            message_id: message_id.clone(),
            status: StatusKind::Delivered,
            timestamp: Utc::now(),
        }));

        tokio::time::sleep(read_delay.saturating_sub(delivered_delay)).await;
        dispatcher.dispatch(GatewayEvent::Status(StatusUpdateEvent {
            message_id,
            status: StatusKind::Read,
            timestamp: Utc::now(),
        }));
    });
}
