//! Channel viewport: widths produced anywhere, delivered on the UI thread.
//!
//! [`WidthSender`] is `Send + Clone` and stamps each width with a sequence number from a
//! shared atomic counter before sending it over a tokio mpsc channel. Senders on different
//! threads can therefore race and arrive out of order; consumers use the sequence to keep
//! the newest width. [`ChannelViewport`] stays on the UI thread and delivers received
//! events to its listeners, either by draining with [`pump`](ChannelViewport::pump) or by
//! awaiting [`next`](ChannelViewport::next).

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;

use super::source::{Listener, Listeners, SubscriptionId, ViewportSource, WidthEvent};

/// Create a connected sender / viewport pair.
pub fn channel(initial_width: u32) -> (WidthSender, ChannelViewport) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sender = WidthSender {
        tx,
        sequence: Arc::new(AtomicU64::new(0)),
    };
    let viewport = ChannelViewport {
        inner: Rc::new(Inner {
            rx: RefCell::new(Some(rx)),
            width: Cell::new(initial_width),
            newest: Cell::new(0),
            listeners: Listeners::default(),
        }),
    };
    (sender, viewport)
}

// ---------------------------------------------------------------------------
// WidthSender
// ---------------------------------------------------------------------------

/// Producer half. Cheap to clone; safe to move to other threads.
#[derive(Debug, Clone)]
pub struct WidthSender {
    tx: mpsc::UnboundedSender<WidthEvent>,
    sequence: Arc<AtomicU64>,
}

impl WidthSender {
    /// Stamp and send a width. Returns `None` once the viewport has been dropped.
    pub fn send(&self, width: u32) -> Option<WidthEvent> {
        let event = WidthEvent {
            width,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
        };
        self.tx.send(event).ok().map(|()| event)
    }

    /// Send an already-stamped event as is.
    pub fn send_event(&self, event: WidthEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    /// Whether the receiving viewport still exists.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

// ---------------------------------------------------------------------------
// ChannelViewport
// ---------------------------------------------------------------------------

#[derive(Debug)]
struct Inner {
    /// Taken out while awaiting so no `RefCell` borrow is held across `.await`.
    rx: RefCell<Option<mpsc::UnboundedReceiver<WidthEvent>>>,
    width: Cell<u32>,
    newest: Cell<u64>,
    listeners: Listeners,
}

/// Consumer half; a [`ViewportSource`] like any other.
#[derive(Debug, Clone)]
pub struct ChannelViewport {
    inner: Rc<Inner>,
}

impl ChannelViewport {
    /// Deliver every event already in the channel. Returns how many were delivered.
    pub fn pump(&self) -> usize {
        let mut delivered = 0;
        loop {
            let next = match self.inner.rx.borrow_mut().as_mut() {
                Some(rx) => rx.try_recv().ok(),
                None => None,
            };
            let Some(event) = next else {
                return delivered;
            };
            self.deliver(event);
            delivered += 1;
        }
    }

    /// Wait for the next event and deliver it. Returns `None` when all senders are gone
    /// (or another `next` call currently owns the receiver).
    pub async fn next(&self) -> Option<WidthEvent> {
        let mut rx = self.inner.rx.borrow_mut().take()?;
        let event = rx.recv().await;
        *self.inner.rx.borrow_mut() = Some(rx);
        let event = event?;
        self.deliver(event);
        Some(event)
    }

    fn deliver(&self, event: WidthEvent) {
        if event.sequence > self.inner.newest.get() {
            self.inner.newest.set(event.sequence);
            self.inner.width.set(event.width);
        }
        tracing::trace!(
            target: "masonry_columns::viewport",
            width = event.width,
            sequence = event.sequence,
            "channel width received"
        );
        self.inner.listeners.dispatch(event);
    }
}

impl ViewportSource for ChannelViewport {
    fn current(&self) -> WidthEvent {
        WidthEvent {
            width: self.inner.width.get(),
            sequence: self.inner.newest.get(),
        }
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.inner.listeners.insert(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.listeners.remove(id)
    }
}
