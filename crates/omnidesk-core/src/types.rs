// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model for the Omnidesk inbox core: contacts, messages,
//! conversations, and the delivery-state progression.
//!
//! All mutation helpers on these types preserve the store invariants:
//! delivery flags are monotonic (`read` implies `delivered` implies `sent`),
//! `last_message` always mirrors the final element of the message sequence,
//! and messages are append-only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Messaging platform a conversation lives on.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Whatsapp,
    Telegram,
    Instagram,
    Facebook,
    Twitter,
    Linkedin,
    Email,
    Sms,
    Youtube,
}

impl Platform {
    /// All platforms in a fixed order, for iteration and seed data.
    pub const ALL: [Platform; 9] = [
        Platform::Whatsapp,
        Platform::Telegram,
        Platform::Instagram,
        Platform::Facebook,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Email,
        Platform::Sms,
        Platform::Youtube,
    ];
}

/// Who authored a message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    Agent,
    Customer,
}

/// Contact presence as reported by the channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Presence {
    Online,
    Offline,
    Typing,
}

/// A stage in the delivery progression of an outgoing message.
///
/// Stages are strictly ordered: `Sent < Delivered < Read`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumString, Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DeliveryStage {
    Sent,
    Delivered,
    Read,
}

/// Delivery flags for a single message.
///
/// Each flag is independent on the wire, but the set is kept consistent by
/// [`DeliveryState::advance`]: once a flag is true it never reverts, and
/// `read` implies `delivered` implies `sent`. A backend may report a direct
/// sent-to-read jump; advancing to `Read` forces `delivered` as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryState {
    pub sent: bool,
    pub delivered: bool,
    pub read: bool,
}

impl DeliveryState {
    /// State for a freshly composed outgoing message.
    pub fn sent() -> Self {
        Self {
            sent: true,
            delivered: false,
            read: false,
        }
    }

    /// Advances the flags to at least `stage`.
    ///
    /// Returns `true` if any flag changed. Never clears a flag, so the
    /// progression is monotonic across any call sequence.
    pub fn advance(&mut self, stage: DeliveryStage) -> bool {
        let before = *self;
        match stage {
            DeliveryStage::Sent => {
                self.sent = true;
            }
            DeliveryStage::Delivered => {
                self.sent = true;
                self.delivered = true;
            }
            DeliveryStage::Read => {
                self.sent = true;
                self.delivered = true;
                self.read = true;
            }
        }
        *self != before
    }

    /// The highest stage reached, if any flag is set.
    pub fn stage(&self) -> Option<DeliveryStage> {
        if self.read {
            Some(DeliveryStage::Read)
        } else if self.delivered {
            Some(DeliveryStage::Delivered)
        } else if self.sent {
            Some(DeliveryStage::Sent)
        } else {
            None
        }
    }
}

/// Descriptor for a file attached to a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// MIME type, e.g. `image/png`.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Content locator (URL or data reference).
    pub url: String,
}

/// One unit of communication within a conversation.
///
/// Content is immutable after creation; the only permitted mutation is
/// advancing the delivery state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique within the owning conversation.
    pub id: String,
    /// May be empty when attachments are present.
    pub content: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
    pub delivery: DeliveryState,
}

impl Message {
    /// A locally composed outgoing message, optimistically marked sent.
    pub fn outgoing(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            attachments: Vec::new(),
            sender: Sender::Agent,
            timestamp: Utc::now(),
            delivery: DeliveryState::sent(),
        }
    }

    /// A message received from the channel.
    pub fn incoming(
        id: impl Into<String>,
        content: impl Into<String>,
        sender: Sender,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            attachments: Vec::new(),
            sender,
            timestamp,
            delivery: DeliveryState::default(),
        }
    }

    /// Attaches files to the message (builder-style, used before append).
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// A person the business communicates with.
///
/// Created when a conversation first references them; never hard-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    pub presence: Presence,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: String,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            avatar: None,
            phone: None,
            email: None,
            location: None,
            presence: Presence::Offline,
            last_seen: None,
            notes: String::new(),
        }
    }
}

/// Conversation priority tag.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Priority {
    Normal,
    High,
}

/// Conversation workflow status.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ConversationStatus {
    Active,
    Pending,
    Resolved,
    Archived,
}

/// Cached summary of a conversation's most recent message.
///
/// Always derivable from the final element of the message sequence;
/// [`Conversation::push_message`] keeps it consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastMessage {
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// True when the agent sent it (used for the "you:" prefix in lists).
    pub from_agent: bool,
    pub has_attachment: bool,
}

impl LastMessage {
    /// Builds the summary for a message.
    pub fn of(message: &Message) -> Self {
        Self {
            content: message.content.clone(),
            timestamp: message.timestamp,
            from_agent: message.sender == Sender::Agent,
            has_attachment: !message.attachments.is_empty(),
        }
    }
}

/// The aggregate of messages with one contact on one platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub platform: Platform,
    pub contact: Contact,
    /// Insertion order is chronological order; append-only.
    pub messages: Vec<Message>,
    pub last_message: Option<LastMessage>,
    pub unread_count: u32,
    pub starred: bool,
    pub priority: Priority,
    pub status: ConversationStatus,
    pub tags: Vec<String>,
}

impl Conversation {
    /// An empty conversation for a (contact, platform) pair.
    pub fn new(id: impl Into<String>, platform: Platform, contact: Contact) -> Self {
        Self {
            id: id.into(),
            platform,
            contact,
            messages: Vec::new(),
            last_message: None,
            unread_count: 0,
            starred: false,
            priority: Priority::Normal,
            status: ConversationStatus::Active,
            tags: Vec::new(),
        }
    }

    /// Appends a message, refreshes the cached summary, and bumps the
    /// unread counter when the sender is the customer.
    pub fn push_message(&mut self, message: Message) {
        self.last_message = Some(LastMessage::of(&message));
        if message.sender == Sender::Customer {
            self.unread_count += 1;
        }
        self.messages.push(message);
    }

    /// Looks up a message by id.
    pub fn message_mut(&mut self, message_id: &str) -> Option<&mut Message> {
        self.messages.iter_mut().find(|m| m.id == message_id)
    }

    /// Clears the unread counter; a pending conversation becomes active.
    pub fn mark_read(&mut self) {
        self.unread_count = 0;
        if self.status == ConversationStatus::Pending {
            self.status = ConversationStatus::Active;
        }
    }
}
