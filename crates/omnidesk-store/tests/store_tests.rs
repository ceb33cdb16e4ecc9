// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests: conversation store fed by the gateway through the
//! event relay, under virtual time.

use std::time::Duration;

use omnidesk_config::model::GatewayConfig;
use omnidesk_core::{ConversationStatus, Message, Platform, Presence, Sender};
use omnidesk_gateway::TransportGateway;
use omnidesk_store::{ConversationStore, EventRelay, FilterUpdate};
use omnidesk_test_utils::events::outbound_message;
use proptest::prelude::*;

/// Let the relay pump apply everything queued so far.
async fn settle() {
    for _ in 0..10 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn optimistic_send_reaches_read_via_relay() {
    let gateway = TransportGateway::new(GatewayConfig::default(), "test-agent");
    gateway.connect().await;

    let mut store = ConversationStore::new();
    store.initialize();
    let shared = store.into_shared();
    let relay = EventRelay::spawn(&gateway, shared.clone());

    // UI action: optimistic local append, then publish.
    shared
        .lock()
        .await
        .append_message("conv-whatsapp-ana", Message::outgoing("m1", "refund sent"));
    gateway.send(outbound_message("m1", "refund sent")).await;

    tokio::time::sleep(Duration::from_millis(1100)).await;
    settle().await;
    {
        let store = shared.lock().await;
        let msg = store
            .get("conv-whatsapp-ana")
            .unwrap()
            .messages
            .iter()
            .find(|m| m.id == "m1")
            .unwrap();
        assert!(msg.delivery.delivered);
        assert!(!msg.delivery.read);
    }

    tokio::time::sleep(Duration::from_millis(2000)).await;
    settle().await;
    {
        let store = shared.lock().await;
        let msg = store
            .get("conv-whatsapp-ana")
            .unwrap()
            .messages
            .iter()
            .find(|m| m.id == "m1")
            .unwrap();
        assert!(msg.delivery.read);
        assert!(msg.delivery.delivered, "read keeps delivered set");
    }

    gateway.disconnect().await;
    relay.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn delivery_timer_after_remove_is_a_noop() {
    let gateway = TransportGateway::new(GatewayConfig::default(), "test-agent");
    gateway.connect().await;

    let mut store = ConversationStore::new();
    store.initialize();
    let shared = store.into_shared();
    let relay = EventRelay::spawn(&gateway, shared.clone());

    shared
        .lock()
        .await
        .append_message("conv-email-lena", Message::outgoing("m7", "one moment"));
    gateway.send(outbound_message("m7", "one moment")).await;

    // Remove the conversation before the delivered timer fires.
    shared.lock().await.remove("conv-email-lena");
    let total_before = shared.lock().await.stats().total;

    tokio::time::sleep(Duration::from_millis(3100)).await;
    settle().await;

    // The stale status updates were dropped; nothing crashed, nothing grew.
    let store = shared.lock().await;
    assert_eq!(store.stats().total, total_before);
    assert!(store.get("conv-email-lena").is_none());
    drop(store);

    gateway.disconnect().await;
    relay.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn simulated_traffic_lands_in_store_and_creates_conversations() {
    let gateway = TransportGateway::new(GatewayConfig::default(), "test-agent");
    gateway.connect().await;

    let mut store = ConversationStore::new();
    store.initialize();
    let seeded = store.stats().total;
    let shared = store.into_shared();
    let relay = EventRelay::spawn(&gateway, shared.clone());

    // Six message intervals: the whole pool cycles once, including the
    // unseeded facebook contact.
    tokio::time::sleep(Duration::from_secs(6 * 30 + 1)).await;
    settle().await;

    let store = shared.lock().await;
    let created = store.get("conv-facebook-tomas").expect("created on first contact");
    assert_eq!(created.platform, Platform::Facebook);
    assert_eq!(created.status, ConversationStatus::Pending);
    assert!(created.unread_count >= 1);
    assert_eq!(store.stats().total, seeded + 1);

    // Seeded conversations accumulated unread customer traffic.
    let ana = store.get("conv-whatsapp-ana").unwrap();
    assert!(ana.unread_count >= 3, "two seeded unread plus simulation");
    drop(store);

    gateway.disconnect().await;
    relay.shutdown().await;
}

#[tokio::test]
async fn seeded_scenario_append_then_mark_read() {
    let mut store = ConversationStore::new();
    store.initialize();
    store.mark_read("conv-whatsapp-ana");
    assert_eq!(store.get("conv-whatsapp-ana").unwrap().unread_count, 0);

    store.append_message(
        "conv-whatsapp-ana",
        Message::incoming("m-x", "hi", Sender::Customer, chrono::Utc::now()),
    );
    let conv = store.get("conv-whatsapp-ana").unwrap();
    assert_eq!(conv.unread_count, 1);
    assert_eq!(conv.last_message.as_ref().unwrap().content, "hi");

    store.mark_read("conv-whatsapp-ana");
    assert_eq!(store.get("conv-whatsapp-ana").unwrap().unread_count, 0);
}

#[tokio::test(start_paused = true)]
async fn typing_events_update_presence() {
    let gateway = TransportGateway::new(GatewayConfig::default(), "test-agent");
    gateway.connect().await;

    let mut store = ConversationStore::new();
    store.initialize();
    let shared = store.into_shared();
    let relay = EventRelay::spawn(&gateway, shared.clone());

    // Force-feed a typing event through the store's event path directly;
    // the simulation's typing roll is probabilistic.
    shared.lock().await.apply_event(omnidesk_core::GatewayEvent::Typing(
        omnidesk_test_utils::events::typing("conv-whatsapp-ana", true),
    ));
    assert_eq!(
        shared.lock().await.get("conv-whatsapp-ana").unwrap().contact.presence,
        Presence::Typing
    );

    shared.lock().await.apply_event(omnidesk_core::GatewayEvent::Typing(
        omnidesk_test_utils::events::typing("conv-whatsapp-ana", false),
    ));
    assert_eq!(
        shared.lock().await.get("conv-whatsapp-ana").unwrap().contact.presence,
        Presence::Online
    );

    gateway.disconnect().await;
    relay.shutdown().await;
}

#[test]
fn platform_filter_on_seeds_preserves_order() {
    let mut store = ConversationStore::new();
    store.initialize();
    store.set_filters(FilterUpdate::platform(Platform::Whatsapp));

    let filtered = store.filtered();
    assert!(!filtered.is_empty());
    assert!(filtered.iter().all(|c| c.platform == Platform::Whatsapp));

    // Relative order matches the unfiltered sequence.
    let all_ids: Vec<&str> = store
        .conversations()
        .iter()
        .filter(|c| c.platform == Platform::Whatsapp)
        .map(|c| c.id.as_str())
        .collect();
    let filtered_ids: Vec<&str> = store.filtered().iter().map(|c| c.id.as_str()).collect();
    assert_eq!(all_ids, filtered_ids);
}

proptest! {
    /// After any append sequence, the cached summary equals the tail of the
    /// message sequence and unread equals the number of customer messages.
    #[test]
    fn last_message_mirrors_tail_for_any_append_sequence(
        appends in proptest::collection::vec(("[a-z ]{1,12}", any::<bool>()), 1..25)
    ) {
        let mut store = ConversationStore::new();
        store.initialize();
        store.mark_read("conv-telegram-priya");

        let mut customer_count = 0u32;
        for (i, (content, from_customer)) in appends.iter().enumerate() {
            let message = if *from_customer {
                customer_count += 1;
                Message::incoming(format!("pm-{i}"), content.clone(), Sender::Customer, chrono::Utc::now())
            } else {
                Message::outgoing(format!("pm-{i}"), content.clone())
            };
            store.append_message("conv-telegram-priya", message);
        }

        let conv = store.get("conv-telegram-priya").unwrap();
        let tail = conv.messages.last().unwrap();
        let last = conv.last_message.as_ref().unwrap();
        prop_assert_eq!(&last.content, &tail.content);
        prop_assert_eq!(last.timestamp, tail.timestamp);
        prop_assert_eq!(conv.unread_count, customer_count);
    }
}
