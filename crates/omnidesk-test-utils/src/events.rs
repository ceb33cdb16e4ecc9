// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for wire events with sensible test defaults.

use chrono::Utc;
use omnidesk_core::{
    ContactSummary, InboundMessageEvent, OutboundMessage, Platform, Sender, StatusKind,
    StatusUpdateEvent, TypingEvent,
};

/// An inbound customer message for `conversation_id` with the given text.
pub fn inbound_message(conversation_id: &str, content: &str) -> InboundMessageEvent {
    InboundMessageEvent {
        id: format!("test-{}", uuid::Uuid::new_v4()),
        platform: Platform::Whatsapp,
        conversation_id: conversation_id.to_string(),
        content: content.to_string(),
        sender: Sender::Customer,
        timestamp: Utc::now(),
        contact: ContactSummary {
            name: "Test Contact".to_string(),
            avatar: None,
            is_online: true,
        },
    }
}

/// Same as [`inbound_message`] but on a specific platform.
pub fn inbound_message_on(
    conversation_id: &str,
    content: &str,
    platform: Platform,
) -> InboundMessageEvent {
    InboundMessageEvent {
        platform,
        ..inbound_message(conversation_id, content)
    }
}

/// A delivery status update for `message_id`.
pub fn status_update(message_id: &str, status: StatusKind) -> StatusUpdateEvent {
    StatusUpdateEvent {
        message_id: message_id.to_string(),
        status,
        timestamp: Utc::now(),
    }
}

/// A typing indicator for `conversation_id`.
pub fn typing(conversation_id: &str, is_typing: bool) -> TypingEvent {
    TypingEvent {
        conversation_id: conversation_id.to_string(),
        is_typing,
        sender_name: Some("Test Contact".to_string()),
    }
}

/// An agent-composed outbound message with a fixed id.
pub fn outbound_message(id: &str, content: &str) -> OutboundMessage {
    OutboundMessage {
        id: id.to_string(),
        content: content.to_string(),
        timestamp: Utc::now(),
        sender: Sender::Agent,
        attachments: Vec::new(),
    }
}
