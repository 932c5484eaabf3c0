//! Effect ownership.
//!
//! Re-exports the effect and memo APIs from [`super::signal`] and adds [`EffectScope`],
//! a guard that disposes a group of effects and signals together. Anything that wires
//! effects to an external object (a masonry controller, a viewport adapter) holds a scope
//! so that dropping or re-wiring it never leaves stale effects subscribed or runtime
//! slots behind.

pub use super::signal::{
    batch, create_effect, create_effect_with_id, create_memo, create_memo_with_id,
    dispose_effect, dispose_signal, EffectId,
};

use super::signal::{create_signal, ReadSignal, SignalId, WriteSignal};

/// Effects and signals disposed together, at the latest when the scope drops.
#[derive(Debug, Default)]
pub struct EffectScope {
    effects: Vec<EffectId>,
    signals: Vec<SignalId>,
}

impl EffectScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an effect owned by this scope.
    pub fn effect(&mut self, f: impl FnMut() + 'static) -> EffectId {
        let eid = create_effect_with_id(f);
        self.effects.push(eid);
        eid
    }

    /// Create a signal owned by this scope.
    pub fn signal<T: 'static>(&mut self, initial: T) -> (ReadSignal<T>, WriteSignal<T>) {
        let (read, write) = create_signal(initial);
        self.signals.push(read.id());
        (read, write)
    }

    /// Create a memo whose signal and effect are owned by this scope.
    pub fn memo<T: Clone + PartialEq + 'static>(
        &mut self,
        f: impl FnMut() -> T + 'static,
    ) -> ReadSignal<T> {
        let (read, eid) = create_memo_with_id(f);
        self.effects.push(eid);
        self.signals.push(read.id());
        read
    }

    /// Number of effects and signals owned by the scope.
    pub fn len(&self) -> usize {
        self.effects.len() + self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty() && self.signals.is_empty()
    }

    /// Dispose every owned effect, then every owned signal. Safe to call repeatedly.
    pub fn dispose(&mut self) {
        for eid in self.effects.drain(..) {
            dispose_effect(eid);
        }
        for sid in self.signals.drain(..) {
            dispose_signal(sid);
        }
    }
}

impl Drop for EffectScope {
    fn drop(&mut self) {
        self.dispose();
    }
}
