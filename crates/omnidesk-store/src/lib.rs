// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation store for the Omnidesk inbox core.
//!
//! Holds the authoritative in-memory collection of conversations, the
//! mutation operations that preserve its invariants, derived views for the
//! UI (filtered lists, stats), and the relay that feeds gateway events into
//! the store.

pub mod bootstrap;
pub mod filters;
pub mod relay;
pub mod store;

pub use filters::{ConversationFilters, FilterUpdate, Selection};
pub use relay::EventRelay;
pub use store::{ConversationStore, SharedConversationStore, StoreStats};
