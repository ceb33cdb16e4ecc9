// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed bootstrap dataset standing in for a backend fetch.
//!
//! Conversation ids line up with the gateway's simulation pool so synthetic
//! traffic lands in these conversations. All seeds are built through the
//! same mutation paths the store uses, so the invariants (unread counter,
//! last-message cache) hold by construction.

use chrono::{DateTime, Duration, Utc};
use omnidesk_core::{
    Contact, Conversation, ConversationStatus, Message, Platform, Presence, Priority, Sender,
};

fn minutes_ago(minutes: i64) -> DateTime<Utc> {
    Utc::now() - Duration::minutes(minutes)
}

fn incoming(id: &str, content: &str, minutes: i64) -> Message {
    Message::incoming(id, content, Sender::Customer, minutes_ago(minutes))
}

fn outgoing(id: &str, content: &str, minutes: i64) -> Message {
    let mut msg = Message::outgoing(id, content);
    msg.timestamp = minutes_ago(minutes);
    msg.delivery.advance(omnidesk_core::DeliveryStage::Read);
    msg
}

/// The initial conversation set loaded by `ConversationStore::initialize`.
pub fn seed_conversations() -> Vec<Conversation> {
    let mut seeds = Vec::new();

    // Active WhatsApp thread with an unanswered customer question.
    let mut contact = Contact::new("ct-ana", "Ana Flores");
    contact.phone = Some("+34 612 334 455".to_string());
    contact.location = Some("Madrid, ES".to_string());
    contact.presence = Presence::Online;
    contact.notes = "Repeat buyer, prefers morning replies.".to_string();
    let mut conv = Conversation::new("conv-whatsapp-ana", Platform::Whatsapp, contact);
    conv.push_message(incoming("wa-1", "Hola! Do you ship to the Canary Islands?", 95));
    conv.push_message(outgoing("wa-2", "We do! Delivery takes 4-6 business days.", 90));
    conv.push_message(incoming("wa-3", "Great, and what about returns?", 12));
    conv.tags = vec!["shipping".to_string(), "vip".to_string()];
    conv.starred = true;
    seeds.push(conv);

    // New Instagram lead, not yet handled.
    let mut contact = Contact::new("ct-marco", "Marco Jensen");
    contact.avatar = Some("https://avatars.example.com/marco.png".to_string());
    contact.presence = Presence::Offline;
    contact.last_seen = Some(minutes_ago(45));
    let mut conv = Conversation::new("conv-instagram-marco", Platform::Instagram, contact);
    conv.push_message(incoming("ig-1", "Saw your spring campaign, love the tote bags", 50));
    conv.push_message(incoming("ig-2", "Is the canvas one still in stock?", 48));
    conv.status = ConversationStatus::Pending;
    conv.tags = vec!["lead".to_string()];
    seeds.push(conv);

    // High-priority email thread about a billing problem.
    let mut contact = Contact::new("ct-lena", "Lena Petrova");
    contact.email = Some("lena.petrova@example.com".to_string());
    contact.location = Some("Berlin, DE".to_string());
    let mut conv = Conversation::new("conv-email-lena", Platform::Email, contact);
    conv.push_message(incoming("em-1", "I was charged twice for order #4417.", 260));
    conv.push_message(outgoing("em-2", "Sorry about that -- refund issued, 3-5 days.", 240));
    conv.mark_read();
    conv.priority = Priority::High;
    conv.tags = vec!["billing".to_string()];
    seeds.push(conv);

    // Resolved Telegram support question.
    let mut contact = Contact::new("ct-priya", "Priya Nair");
    contact.presence = Presence::Offline;
    contact.last_seen = Some(minutes_ago(600));
    let mut conv = Conversation::new("conv-telegram-priya", Platform::Telegram, contact);
    conv.push_message(incoming("tg-1", "The tracking link in my email 404s", 700));
    conv.push_message(outgoing("tg-2", "Fixed -- here is the working link.", 690));
    conv.push_message(incoming("tg-3", "Works now, thanks!", 680));
    conv.mark_read();
    conv.status = ConversationStatus::Resolved;
    seeds.push(conv);

    // Archived SMS thread from a closed campaign.
    let mut contact = Contact::new("ct-jordan", "Jordan Reyes");
    contact.phone = Some("+1 415 555 0188".to_string());
    let mut conv = Conversation::new("conv-sms-jordan", Platform::Sms, contact);
    conv.push_message(outgoing("sms-1", "Your 20% launch-week code: LAUNCH20", 10_080));
    conv.push_message(incoming("sms-2", "STOP", 10_075));
    conv.mark_read();
    conv.status = ConversationStatus::Archived;
    conv.tags = vec!["campaign".to_string()];
    seeds.push(conv);

    seeds
}
