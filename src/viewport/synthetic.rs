//! In-memory viewport driven by explicit resize calls.
//!
//! Used by headless hosts and tests: `resize` stamps a new sequence number, updates the
//! current width and delivers the event synchronously. `stamp` + `deliver` split those
//! steps so tests can reproduce out-of-order delivery.

use std::cell::Cell;
use std::rc::Rc;

use super::source::{Listener, Listeners, SubscriptionId, ViewportSource, WidthEvent};

#[derive(Debug)]
struct Inner {
    width: Cell<u32>,
    sequence: Cell<u64>,
    delivered: Cell<u64>,
    listeners: Listeners,
}

/// A cloneable handle to a synthetic viewport.
#[derive(Debug, Clone)]
pub struct SyntheticViewport {
    inner: Rc<Inner>,
}

impl SyntheticViewport {
    pub fn new(width: u32) -> Self {
        Self {
            inner: Rc::new(Inner {
                width: Cell::new(width),
                sequence: Cell::new(0),
                delivered: Cell::new(0),
                listeners: Listeners::default(),
            }),
        }
    }

    /// Change the width and notify listeners.
    pub fn resize(&self, width: u32) -> WidthEvent {
        let event = self.stamp(width);
        self.deliver(event);
        event
    }

    /// Produce the next sequenced event without delivering it.
    pub fn stamp(&self, width: u32) -> WidthEvent {
        let sequence = self.inner.sequence.get() + 1;
        self.inner.sequence.set(sequence);
        WidthEvent { width, sequence }
    }

    /// Deliver a previously stamped event.
    ///
    /// The reported current width follows the newest sequence delivered so far.
    pub fn deliver(&self, event: WidthEvent) {
        if event.sequence > self.inner.delivered.get() {
            self.inner.delivered.set(event.sequence);
            self.inner.width.set(event.width);
        }
        self.inner.listeners.dispatch(event);
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.len()
    }
}

impl ViewportSource for SyntheticViewport {
    fn current(&self) -> WidthEvent {
        WidthEvent {
            width: self.inner.width.get(),
            sequence: self.inner.delivered.get(),
        }
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.inner.listeners.insert(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.listeners.remove(id)
    }
}
