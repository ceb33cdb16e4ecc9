// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire events exchanged with the messaging backend.
//!
//! Each event kind is an explicit struct so malformed inbound traffic is a
//! deserialization failure (dropped with a diagnostic log at the gateway),
//! never an ad hoc field probe. Field names follow the backend's camelCase
//! JSON contract; timestamps are RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::types::{Attachment, DeliveryStage, Platform, Sender};

/// Minimal contact information carried on an inbound message event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSummary {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub is_online: bool,
}

/// A message received from the backend (or synthesized in simulation mode).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundMessageEvent {
    pub id: String,
    pub platform: Platform,
    pub conversation_id: String,
    pub content: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub contact: ContactSummary,
}

/// Delivery status reported for a previously sent message.
///
/// The backend never reports `sent` -- the optimistic local append covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StatusKind {
    Delivered,
    Read,
}

impl StatusKind {
    /// The delivery stage this status advances a message to.
    pub fn stage(self) -> DeliveryStage {
        match self {
            StatusKind::Delivered => DeliveryStage::Delivered,
            StatusKind::Read => DeliveryStage::Read,
        }
    }
}

/// Delivery status update for a sent message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateEvent {
    pub message_id: String,
    pub status: StatusKind,
    pub timestamp: DateTime<Utc>,
}

/// Typing indicator start/stop for a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypingEvent {
    pub conversation_id: String,
    pub is_typing: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender_name: Option<String>,
}

/// An agent-composed message published to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub sender: Sender,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Identity announcement sent once after a successful connect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceAnnouncement {
    pub id: String,
    pub role: Sender,
}

/// Envelope for every frame on the gateway link, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum GatewayFrame {
    /// Inbound customer/agent message.
    Message(InboundMessageEvent),
    /// Delivery status update.
    Status(StatusUpdateEvent),
    /// Typing indicator.
    Typing(TypingEvent),
    /// Outbound agent message.
    Send(OutboundMessage),
    /// Identity announcement after connect.
    Presence(PresenceAnnouncement),
    /// Subscribe to a conversation's events.
    Join {
        #[serde(rename = "conversationId")]
        conversation_id: String,
    },
    /// Unsubscribe from a conversation's events.
    Leave {
        #[serde(rename = "conversationId")]
        conversation_id: String,
    },
}

/// An event the gateway delivers to registered handlers.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayEvent {
    Message(InboundMessageEvent),
    Status(StatusUpdateEvent),
    Typing(TypingEvent),
}

impl GatewayFrame {
    /// Converts an inbound frame into a dispatchable event.
    ///
    /// Returns `None` for frame kinds that only flow outward
    /// (send, presence, join, leave).
    pub fn into_event(self) -> Option<GatewayEvent> {
        match self {
            GatewayFrame::Message(ev) => Some(GatewayEvent::Message(ev)),
            GatewayFrame::Status(ev) => Some(GatewayEvent::Status(ev)),
            GatewayFrame::Typing(ev) => Some(GatewayEvent::Typing(ev)),
            GatewayFrame::Send(_)
            | GatewayFrame::Presence(_)
            | GatewayFrame::Join { .. }
            | GatewayFrame::Leave { .. } => None,
        }
    }
}
