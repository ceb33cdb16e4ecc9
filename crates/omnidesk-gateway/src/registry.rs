// SPDX-FileCopyrightText: 2026 Omnidesk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Snapshot-on-dispatch handler registries for gateway events.
//!
//! Handlers registered during a dispatch never affect that dispatch: the
//! handler list is copied before iteration, so every handler present at
//! dispatch start is invoked exactly once, in registration order.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use omnidesk_core::{GatewayEvent, InboundMessageEvent, StatusUpdateEvent, TypingEvent};

type Handler<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A registry of event handlers for one event kind.
///
/// Cloning shares the underlying handler list.
pub struct HandlerRegistry<E> {
    handlers: Arc<Mutex<Vec<(u64, Handler<E>)>>>,
    next_id: Arc<AtomicU64>,
}

impl<E> Clone for HandlerRegistry<E> {
    fn clone(&self) -> Self {
        Self {
            handlers: Arc::clone(&self.handlers),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<E> Default for HandlerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> HandlerRegistry<E> {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Registers a handler, returning a guard that can unregister it.
    ///
    /// Discarding the guard leaves the handler registered for the lifetime
    /// of the registry.
    pub fn register(&self, handler: impl Fn(&E) + Send + Sync + 'static) -> HandlerGuard
    where
        E: 'static,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push((id, Arc::new(handler)));

        let handlers = Arc::clone(&self.handlers);
        HandlerGuard {
            unregister: Box::new(move || {
                let mut guard = match handlers.lock() {
                    Ok(g) => g,
                    Err(poisoned) => poisoned.into_inner(),
                };
                guard.retain(|(hid, _)| *hid != id);
            }),
        }
    }

    /// Invokes every handler registered at the time of the call, in
    /// registration order. Mutations to the registry made by handlers take
    /// effect only for subsequent dispatches.
    pub fn dispatch(&self, event: &E) {
        let snapshot: Vec<Handler<E>> = self
            .lock()
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in snapshot {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(u64, Handler<E>)>> {
        match self.handlers.lock() {
            Ok(guard) => guard,
            // A panicking handler must not wedge the registry.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Removes a registered handler when [`HandlerGuard::unregister`] is called.
#[must_use = "discarding the guard leaves the handler registered forever"]
pub struct HandlerGuard {
    unregister: Box<dyn FnOnce() + Send>,
}

impl HandlerGuard {
    /// Removes the handler from its registry.
    pub fn unregister(self) {
        (self.unregister)();
    }
}

/// The three per-kind registries the gateway dispatches into.
#[derive(Clone, Default)]
pub(crate) struct EventDispatcher {
    pub messages: HandlerRegistry<InboundMessageEvent>,
    pub statuses: HandlerRegistry<StatusUpdateEvent>,
    pub typing: HandlerRegistry<TypingEvent>,
}

impl EventDispatcher {
    /// Routes an event to the registry for its kind.
    pub fn dispatch(&self, event: GatewayEvent) {
        match event {
            GatewayEvent::Message(ev) => self.messages.dispatch(&ev),
            GatewayEvent::Status(ev) => self.statuses.dispatch(&ev),
            GatewayEvent::Typing(ev) => self.typing.dispatch(&ev),
        }
    }
}
