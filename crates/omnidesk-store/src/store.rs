// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The shared conversation store: single authoritative collection of
//! conversations for the application session.
//!
//! All domain mutations go through the operations here; no other component
//! mutates a conversation or message in place. Operations referencing an
//! unknown conversation or message id are silent no-ops, which keeps the
//! store resilient against stale references such as a delivery timer firing
//! after the conversation was removed.

use omnidesk_core::{
    Contact, Conversation, ConversationStatus, DeliveryStage, GatewayEvent, Message, Platform,
    Presence, Sender,
};
use tracing::{debug, info};

use crate::bootstrap;
use crate::filters::{ConversationFilters, FilterUpdate};

/// Derived counters over the active conversation set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    pub total: usize,
    /// Conversations with at least one unread message.
    pub unread: usize,
    pub starred: usize,
    pub archived: usize,
    pub pending: usize,
}

/// Process-wide source of truth for conversations and their messages.
///
/// Order of the collection is stable insertion order. Derived views
/// ([`filtered`](Self::filtered), [`stats`](Self::stats)) are recomputed on
/// demand and never cached, so they are always consistent with the latest
/// mutation.
#[derive(Debug, Default)]
pub struct ConversationStore {
    conversations: Vec<Conversation>,
    loading: bool,
    filters: ConversationFilters,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps the store in the shared handle handed to the relay and the UI.
    pub fn into_shared(self) -> SharedConversationStore {
        std::sync::Arc::new(tokio::sync::Mutex::new(self))
    }

    /// Populates the store from the bootstrap dataset.
    ///
    /// Re-invocation repopulates from scratch (full replace, not merge).
    pub fn initialize(&mut self) {
        self.loading = true;
        self.conversations = bootstrap::seed_conversations();
        self.loading = false;
        info!(count = self.conversations.len(), "conversation store initialized");
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    /// All conversations in stable insertion order.
    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn get(&self, conversation_id: &str) -> Option<&Conversation> {
        self.conversations.iter().find(|c| c.id == conversation_id)
    }

    /// Appends a message to a conversation.
    ///
    /// The sole mutation path for message state, used for both locally
    /// composed outgoing messages and inbound events from the gateway.
    /// Recomputes the last-message cache; increments the unread counter only
    /// for customer messages. Unknown conversation id: silent no-op.
    pub fn append_message(&mut self, conversation_id: &str, message: Message) {
        let Some(conv) = self.get_mut(conversation_id) else {
            debug!(conversation_id, "append to unknown conversation, ignoring");
            return;
        };
        conv.push_message(message);
    }

    /// Advances a message's delivery flags to at least `stage`.
    ///
    /// Monotonic: already at or past the stage, or unknown ids, are no-ops.
    /// Advancing to `Read` forces `delivered` as well, so a backend that
    /// reports a direct sent-to-read jump still leaves a consistent state.
    pub fn advance_delivery_state(
        &mut self,
        conversation_id: &str,
        message_id: &str,
        stage: DeliveryStage,
    ) {
        let Some(conv) = self.get_mut(conversation_id) else {
            debug!(conversation_id, "delivery update for unknown conversation, ignoring");
            return;
        };
        let Some(message) = conv.message_mut(message_id) else {
            debug!(message_id, "delivery update for unknown message, ignoring");
            return;
        };
        message.delivery.advance(stage);
    }

    /// Zeroes the unread counter; a pending conversation becomes active.
    pub fn mark_read(&mut self, conversation_id: &str) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.mark_read();
        }
    }

    pub fn toggle_star(&mut self, conversation_id: &str) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.starred = !conv.starred;
        }
    }

    pub fn set_status(&mut self, conversation_id: &str, status: ConversationStatus) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.status = status;
        }
    }

    /// Adds a tag unless already present.
    pub fn add_tag(&mut self, conversation_id: &str, tag: &str) {
        if let Some(conv) = self.get_mut(conversation_id) {
            if !conv.tags.iter().any(|t| t == tag) {
                conv.tags.push(tag.to_string());
            }
        }
    }

    pub fn remove_tag(&mut self, conversation_id: &str, tag: &str) {
        if let Some(conv) = self.get_mut(conversation_id) {
            conv.tags.retain(|t| t != tag);
        }
    }

    /// Removes a conversation from the active set for the session.
    pub fn remove(&mut self, conversation_id: &str) {
        self.conversations.retain(|c| c.id != conversation_id);
    }

    /// Shallow-merges a filter update into the current configuration.
    pub fn set_filters(&mut self, update: FilterUpdate) {
        self.filters.apply(update);
    }

    pub fn filters(&self) -> ConversationFilters {
        self.filters
    }

    /// The ordered subsequence of conversations matching all three filter
    /// dimensions. Recomputed on every call.
    pub fn filtered(&self) -> Vec<&Conversation> {
        self.conversations
            .iter()
            .filter(|c| {
                self.filters.platform.admits(&c.platform)
                    && self.filters.status.admits(&c.status)
                    && self.filters.priority.admits(&c.priority)
            })
            .collect()
    }

    /// Derived counters over the active set. Recomputed on every call.
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            total: self.conversations.len(),
            unread: self.conversations.iter().filter(|c| c.unread_count > 0).count(),
            starred: self.conversations.iter().filter(|c| c.starred).count(),
            archived: self
                .conversations
                .iter()
                .filter(|c| c.status == ConversationStatus::Archived)
                .count(),
            pending: self
                .conversations
                .iter()
                .filter(|c| c.status == ConversationStatus::Pending)
                .count(),
        }
    }

    /// Applies a gateway event to the store.
    ///
    /// Inbound messages for an unknown conversation create it (first contact
    /// for a (contact, platform) pair); status updates and typing indicators
    /// for unknown ids are dropped.
    pub fn apply_event(&mut self, event: GatewayEvent) {
        match event {
            GatewayEvent::Message(ev) => {
                if self.get(&ev.conversation_id).is_none() {
                    let mut contact =
                        Contact::new(format!("ct-{}", ev.conversation_id), ev.contact.name.clone());
                    contact.avatar = ev.contact.avatar.clone();
                    contact.presence = if ev.contact.is_online {
                        Presence::Online
                    } else {
                        Presence::Offline
                    };
                    let mut conv =
                        Conversation::new(ev.conversation_id.clone(), ev.platform, contact);
                    // A brand-new inbound conversation awaits first handling.
                    conv.status = ConversationStatus::Pending;
                    info!(
                        conversation_id = %conv.id,
                        platform = %conv.platform,
                        "created conversation on first contact"
                    );
                    self.conversations.push(conv);
                }

                let message =
                    Message::incoming(ev.id.clone(), ev.content.clone(), ev.sender, ev.timestamp);
                let conversation_id = ev.conversation_id.clone();
                if let Some(conv) = self.get_mut(&conversation_id) {
                    conv.contact.presence = if ev.contact.is_online {
                        Presence::Online
                    } else {
                        Presence::Offline
                    };
                    conv.contact.last_seen = Some(ev.timestamp);
                }
                self.append_message(&conversation_id, message);
            }
            GatewayEvent::Status(ev) => {
                // The gateway reports message ids without a conversation;
                // search the active set.
                let stage = ev.status.stage();
                let found = self.conversations.iter().find_map(|c| {
                    c.messages
                        .iter()
                        .any(|m| m.id == ev.message_id)
                        .then(|| c.id.clone())
                });
                match found {
                    Some(conversation_id) => {
                        self.advance_delivery_state(&conversation_id, &ev.message_id, stage);
                    }
                    None => {
                        debug!(message_id = %ev.message_id, "status for unknown message, ignoring");
                    }
                }
            }
            GatewayEvent::Typing(ev) => {
                if let Some(conv) = self.get_mut(&ev.conversation_id) {
                    conv.contact.presence = if ev.is_typing {
                        Presence::Typing
                    } else {
                        Presence::Online
                    };
                }
            }
        }
    }

    fn get_mut(&mut self, conversation_id: &str) -> Option<&mut Conversation> {
        self.conversations
            .iter_mut()
            .find(|c| c.id == conversation_id)
    }
}

/// Shared handle to the store: one owner, explicitly injected into the
/// relay and the UI layer.
pub type SharedConversationStore = std::sync::Arc<tokio::sync::Mutex<ConversationStore>>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::Selection;
    use chrono::Utc;
    use omnidesk_core::{Platform, Priority};

    fn store_with(conversations: Vec<Conversation>) -> ConversationStore {
        let mut store = ConversationStore::new();
        store.conversations = conversations;
        store
    }

    fn conversation(id: &str, platform: Platform) -> Conversation {
        Conversation::new(id, platform, Contact::new(format!("ct-{id}"), "Test"))
    }

    #[test]
    fn initialize_replaces_existing_contents() {
        let mut store = store_with(vec![conversation("stale", Platform::Youtube)]);
        store.initialize();
        assert!(store.get("stale").is_none());
        assert!(!store.conversations().is_empty());
        assert!(!store.loading());

        // Second initialize: full replace, same seed count.
        let count = store.conversations().len();
        store.initialize();
        assert_eq!(store.conversations().len(), count);
    }

    #[test]
    fn append_message_updates_cache_and_unread() {
        let mut store = store_with(vec![conversation("c1", Platform::Whatsapp)]);

        store.append_message("c1", Message::incoming("m1", "hi", Sender::Customer, Utc::now()));
        let conv = store.get("c1").unwrap();
        assert_eq!(conv.unread_count, 1);
        assert_eq!(conv.last_message.as_ref().unwrap().content, "hi");

        store.append_message("c1", Message::outgoing("m2", "hello!"));
        let conv = store.get("c1").unwrap();
        assert_eq!(conv.unread_count, 1, "agent messages do not bump unread");
        assert_eq!(conv.last_message.as_ref().unwrap().content, "hello!");
    }

    #[test]
    fn append_to_unknown_conversation_changes_nothing() {
        let mut store = store_with(vec![conversation("c1", Platform::Whatsapp)]);
        let before = store.get("c1").unwrap().clone();

        store.append_message(
            "nonexistent-id",
            Message::incoming("m1", "hi", Sender::Customer, Utc::now()),
        );

        assert_eq!(store.conversations().len(), 1);
        assert_eq!(*store.get("c1").unwrap(), before);
    }

    #[test]
    fn advance_delivery_state_is_monotonic() {
        let mut store = store_with(vec![conversation("c1", Platform::Whatsapp)]);
        store.append_message("c1", Message::outgoing("m1", "ping"));

        store.advance_delivery_state("c1", "m1", DeliveryStage::Read);
        let msg = &store.get("c1").unwrap().messages[0];
        assert!(msg.delivery.read);
        assert!(msg.delivery.delivered, "direct sent-to-read forces delivered");

        // Lower stage afterwards: no-op.
        store.advance_delivery_state("c1", "m1", DeliveryStage::Delivered);
        let msg = &store.get("c1").unwrap().messages[0];
        assert!(msg.delivery.read);
    }

    #[test]
    fn advance_delivery_state_unknown_ids_are_noops() {
        let mut store = store_with(vec![conversation("c1", Platform::Whatsapp)]);
        store.append_message("c1", Message::outgoing("m1", "ping"));

        store.advance_delivery_state("c1", "m404", DeliveryStage::Read);
        store.advance_delivery_state("c404", "m1", DeliveryStage::Read);
        assert!(!store.get("c1").unwrap().messages[0].delivery.read);
    }

    #[test]
    fn mark_read_then_pending_filter_excludes_conversation() {
        let mut conv = conversation("c1", Platform::Whatsapp);
        conv.status = ConversationStatus::Pending;
        conv.push_message(Message::incoming("m1", "hi", Sender::Customer, Utc::now()));
        let mut store = store_with(vec![conv]);

        store.set_filters(FilterUpdate::status(ConversationStatus::Pending));
        assert_eq!(store.filtered().len(), 1);

        store.mark_read("c1");
        assert_eq!(store.get("c1").unwrap().unread_count, 0);
        assert!(store.filtered().is_empty(), "now active, no longer pending");
    }

    #[test]
    fn filtered_preserves_relative_order() {
        let mut store = store_with(vec![
            conversation("wa-1", Platform::Whatsapp),
            conversation("ig-1", Platform::Instagram),
            conversation("wa-2", Platform::Whatsapp),
        ]);
        store.set_filters(FilterUpdate::platform(Platform::Whatsapp));

        let ids: Vec<&str> = store.filtered().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["wa-1", "wa-2"]);
    }

    #[test]
    fn filters_combine_across_dimensions() {
        let mut high = conversation("c1", Platform::Whatsapp);
        high.priority = Priority::High;
        let normal = conversation("c2", Platform::Whatsapp);
        let mut store = store_with(vec![high, normal]);

        store.set_filters(FilterUpdate::platform(Platform::Whatsapp));
        store.set_filters(FilterUpdate::priority(Priority::High));
        let ids: Vec<&str> = store.filtered().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["c1"]);

        // Back to all priorities; platform selection is retained.
        store.set_filters(FilterUpdate {
            priority: Some(Selection::All),
            ..FilterUpdate::default()
        });
        assert_eq!(store.filtered().len(), 2);
    }

    #[test]
    fn tag_star_status_and_remove() {
        let mut store = store_with(vec![conversation("c1", Platform::Email)]);

        store.add_tag("c1", "billing");
        store.add_tag("c1", "billing");
        assert_eq!(store.get("c1").unwrap().tags, vec!["billing"]);

        store.remove_tag("c1", "billing");
        assert!(store.get("c1").unwrap().tags.is_empty());

        store.toggle_star("c1");
        assert!(store.get("c1").unwrap().starred);
        store.toggle_star("c1");
        assert!(!store.get("c1").unwrap().starred);

        store.set_status("c1", ConversationStatus::Archived);
        assert_eq!(store.get("c1").unwrap().status, ConversationStatus::Archived);

        store.remove("c1");
        assert!(store.get("c1").is_none());

        // All of these are silent no-ops now.
        store.add_tag("c1", "x");
        store.toggle_star("c1");
        store.set_status("c1", ConversationStatus::Active);
        store.mark_read("c1");
        assert!(store.conversations().is_empty());
    }

    #[test]
    fn stats_reflect_current_state() {
        let mut pending = conversation("c1", Platform::Whatsapp);
        pending.status = ConversationStatus::Pending;
        pending.push_message(Message::incoming("m1", "hi", Sender::Customer, Utc::now()));
        let mut starred = conversation("c2", Platform::Email);
        starred.starred = true;
        let mut archived = conversation("c3", Platform::Sms);
        archived.status = ConversationStatus::Archived;

        let store = store_with(vec![pending, starred, archived]);
        let stats = store.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.unread, 1);
        assert_eq!(stats.starred, 1);
        assert_eq!(stats.archived, 1);
        assert_eq!(stats.pending, 1);
    }
}
