//! The viewport signal source seam.
//!
//! A [`ViewportSource`] reports the current width and pushes [`WidthEvent`]s to
//! subscribed listeners. Sources are cheap cloneable handles with interior mutability,
//! so an adapter and the host can hold the same source.

use std::cell::RefCell;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`ViewportSource::subscribe`].
    pub struct SubscriptionId;
}

/// A width change, stamped with a per-source sequence number.
///
/// Sequence numbers increase in the order widths were produced. A consumer that has
/// applied sequence `n` ignores any later-arriving event with sequence `<= n`. Sequence
/// `0` is the width a source started with, before any event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidthEvent {
    pub width: u32,
    pub sequence: u64,
}

/// Callback invoked for each delivered width event.
pub type Listener = Box<dyn FnMut(WidthEvent)>;

/// A provider of viewport width.
pub trait ViewportSource {
    /// The newest width this source has delivered, with the sequence it was stamped with.
    fn current(&self) -> WidthEvent;

    /// The width right now, read synchronously.
    fn current_width(&self) -> u32 {
        self.current().width
    }

    /// Register a listener for subsequent width changes.
    fn subscribe(&self, listener: Listener) -> SubscriptionId;

    /// Remove a listener. Returns `false` if it was not (or no longer) registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

// ---------------------------------------------------------------------------
// Listeners
// ---------------------------------------------------------------------------

/// Slotmap-backed listener registry shared by the built-in sources.
///
/// Listeners are taken out of their slot while running, so a listener may subscribe or
/// unsubscribe (itself included) without a re-entrant borrow.
#[derive(Default)]
pub(crate) struct Listeners {
    slots: RefCell<SlotMap<SubscriptionId, Option<Listener>>>,
}

impl Listeners {
    pub(crate) fn insert(&self, listener: Listener) -> SubscriptionId {
        self.slots.borrow_mut().insert(Some(listener))
    }

    pub(crate) fn remove(&self, id: SubscriptionId) -> bool {
        self.slots.borrow_mut().remove(id).is_some()
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Deliver `event` to every listener registered when dispatch starts.
    pub(crate) fn dispatch(&self, event: WidthEvent) {
        let ids: Vec<SubscriptionId> = self.slots.borrow().keys().collect();
        for id in ids {
            let taken = self
                .slots
                .borrow_mut()
                .get_mut(id)
                .and_then(Option::take);
            let Some(mut listener) = taken else {
                continue;
            };
            listener(event);
            if let Some(slot) = self.slots.borrow_mut().get_mut(id) {
                *slot = Some(listener);
            }
        }
    }
}

impl std::fmt::Debug for Listeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Listeners").field("count", &self.len()).finish()
    }
}
