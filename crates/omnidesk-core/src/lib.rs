// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Omnidesk inbox core.
//!
//! Provides the domain model (contacts, messages, conversations), the typed
//! wire events exchanged with the messaging backend, and the shared error
//! type used throughout the workspace.

pub mod error;
pub mod events;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::OmnideskError;
pub use events::{
    ContactSummary, GatewayEvent, GatewayFrame, InboundMessageEvent, OutboundMessage,
    PresenceAnnouncement, StatusKind, StatusUpdateEvent, TypingEvent,
};
pub use types::{
    Attachment, Contact, Conversation, ConversationStatus, DeliveryStage, DeliveryState,
    LastMessage, Message, Platform, Presence, Priority, Sender,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn omnidesk_error_has_all_variants() {
        let _config = OmnideskError::Config("test".into());
        let _transport = OmnideskError::Transport {
            message: "test".into(),
            source: None,
        };
        let _codec = OmnideskError::Codec {
            source: Box::new(std::io::Error::other("test")),
        };
        let _timeout = OmnideskError::Timeout {
            duration: std::time::Duration::from_secs(10),
        };
        let _internal = OmnideskError::Internal("test".into());
    }

    #[test]
    fn platform_serialization_round_trips() {
        for platform in Platform::ALL {
            let json = serde_json::to_string(&platform).unwrap();
            let parsed: Platform = serde_json::from_str(&json).unwrap();
            assert_eq!(platform, parsed);
        }
    }

    #[test]
    fn sender_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sender::Agent).unwrap(), r#""agent""#);
        assert_eq!(
            serde_json::to_string(&Sender::Customer).unwrap(),
            r#""customer""#
        );
    }
}
