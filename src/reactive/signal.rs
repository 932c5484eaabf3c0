//! Signals, effects, memos and batching on a thread-local runtime.
//!
//! Fine-grained, synchronous, single-threaded reactivity in the style of Leptos: a signal
//! read inside a running effect subscribes that effect; writing the signal re-runs its
//! subscribers. [`batch`] defers effects until the outermost batch closes, which is how a
//! viewport update publishes width and breakpoints as one consistent step.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;

use slotmap::{new_key_type, SlotMap};

// ---------------------------------------------------------------------------
// IDs
// ---------------------------------------------------------------------------

new_key_type! {
    /// Identifies a signal slot inside the runtime.
    pub struct SignalId;

    /// Identifies an effect slot inside the runtime.
    pub struct EffectId;
}

// ---------------------------------------------------------------------------
// Runtime internals
// ---------------------------------------------------------------------------

struct SignalSlot {
    value: Box<dyn Any>,
    subscribers: HashSet<EffectId>,
}

struct EffectSlot {
    /// Taken out while the effect runs so no runtime borrow is held across user code.
    callback: Option<Box<dyn FnMut()>>,
    dependencies: HashSet<SignalId>,
}

/// Disposed signals and effects are removed from their slotmap, so slots are reused and
/// stale ids never alias a newer entry.
#[derive(Default)]
struct Runtime {
    signals: SlotMap<SignalId, SignalSlot>,
    effects: SlotMap<EffectId, EffectSlot>,
    /// The effect currently executing, for dependency tracking.
    tracking: Option<EffectId>,
    batch_depth: usize,
    pending: Vec<EffectId>,
    /// Set while the notification loop drains; nested writes enqueue instead of recursing.
    flushing: bool,
}

impl Runtime {
    fn is_live(&self, eid: EffectId) -> bool {
        self.effects.contains_key(eid)
    }

    fn unlink(&mut self, eid: EffectId) {
        let Some(effect) = self.effects.get_mut(eid) else {
            return;
        };
        for sid in effect.dependencies.drain() {
            if let Some(signal) = self.signals.get_mut(sid) {
                signal.subscribers.remove(&eid);
            }
        }
    }

    fn subscribers(&self, sid: SignalId) -> Vec<EffectId> {
        self.signals
            .get(sid)
            .map(|signal| signal.subscribers.iter().copied().collect())
            .unwrap_or_default()
    }
}

thread_local! {
    static RUNTIME: RefCell<Runtime> = RefCell::new(Runtime::default());
}

fn with_runtime<R>(f: impl FnOnce(&mut Runtime) -> R) -> R {
    RUNTIME.with(|rt| f(&mut rt.borrow_mut()))
}

// ---------------------------------------------------------------------------
// Signal creation
// ---------------------------------------------------------------------------

/// Create a reactive signal with the given initial value.
///
/// Returns a `(ReadSignal<T>, WriteSignal<T>)` pair. Both halves are `Copy` handles.
pub fn create_signal<T: 'static>(initial: T) -> (ReadSignal<T>, WriteSignal<T>) {
    let id = with_runtime(|rt| {
        rt.signals.insert(SignalSlot {
            value: Box::new(initial),
            subscribers: HashSet::new(),
        })
    });
    (
        ReadSignal {
            id,
            _marker: PhantomData,
        },
        WriteSignal {
            id,
            _marker: PhantomData,
        },
    )
}

// ---------------------------------------------------------------------------
// ReadSignal
// ---------------------------------------------------------------------------

/// Read half of a signal.
pub struct ReadSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for ReadSignal<T> {}
impl<T: 'static> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> ReadSignal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Whether the signal has been removed with [`dispose_signal`].
    pub fn is_disposed(&self) -> bool {
        RUNTIME.with(|rt| !rt.borrow().signals.contains_key(self.id))
    }

    /// Read the current value, subscribing the running effect.
    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.with(T::clone)
    }

    /// Read by reference, subscribing the running effect.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        with_runtime(|rt| {
            if let Some(eid) = rt.tracking {
                if let Some(signal) = rt.signals.get_mut(self.id) {
                    signal.subscribers.insert(eid);
                }
                if let Some(effect) = rt.effects.get_mut(eid) {
                    effect.dependencies.insert(self.id);
                }
            }
        });
        self.with_untracked(f)
    }

    /// Read without subscribing anything.
    pub fn get_untracked(&self) -> T
    where
        T: Clone,
    {
        self.with_untracked(T::clone)
    }

    /// Read by reference without subscribing anything.
    ///
    /// # Panics
    ///
    /// If the signal has been disposed.
    pub fn with_untracked<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        RUNTIME.with(|rt| {
            let rt = rt.borrow();
            let value = rt
                .signals
                .get(self.id)
                .expect("read of a disposed signal")
                .value
                .downcast_ref::<T>()
                .expect("signal type mismatch");
            f(value)
        })
    }
}

// ---------------------------------------------------------------------------
// WriteSignal
// ---------------------------------------------------------------------------

/// Write half of a signal.
pub struct WriteSignal<T: 'static> {
    id: SignalId,
    _marker: PhantomData<T>,
}

impl<T: 'static> Copy for WriteSignal<T> {}
impl<T: 'static> Clone for WriteSignal<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: 'static> fmt::Debug for WriteSignal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriteSignal").field("id", &self.id).finish()
    }
}

impl<T: 'static> WriteSignal<T> {
    pub fn id(&self) -> SignalId {
        self.id
    }

    /// Overwrite the value and notify subscribers, even if the value is unchanged.
    pub fn set(&self, value: T) {
        self.update(|slot| *slot = value);
    }

    /// Mutate the value in place and notify subscribers. Writes to a disposed signal are
    /// ignored.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let subs = with_runtime(|rt| {
            let value = rt
                .signals
                .get_mut(self.id)?
                .value
                .downcast_mut::<T>()
                .expect("signal type mismatch");
            f(value);
            Some(rt.subscribers(self.id))
        });
        notify(subs.unwrap_or_default());
    }

    /// Write only if the new value differs. Returns whether a write happened.
    pub fn set_if_changed(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        let changed = RUNTIME.with(|rt| {
            let rt = rt.borrow();
            rt.signals
                .get(self.id)
                .and_then(|signal| signal.value.downcast_ref::<T>())
                .is_some_and(|old| *old != value)
        });
        if changed {
            self.set(value);
        }
        changed
    }
}

/// Remove a signal and free its slot. Disposing twice is a no-op.
///
/// Effects that read it simply stop being notified. Reading the signal afterwards panics.
pub fn dispose_signal(sid: SignalId) {
    let slot = with_runtime(|rt| {
        let slot = rt.signals.remove(sid)?;
        for eid in &slot.subscribers {
            if let Some(effect) = rt.effects.get_mut(*eid) {
                effect.dependencies.remove(&sid);
            }
        }
        Some(slot)
    });
    // The stored value is dropped outside the runtime borrow.
    drop(slot);
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

/// Create a side effect that re-runs whenever a signal it read changes.
///
/// The closure runs once immediately to establish its subscriptions.
pub fn create_effect(f: impl FnMut() + 'static) {
    create_effect_with_id(f);
}

/// Create an effect and return its [`EffectId`] so it can later be disposed.
pub fn create_effect_with_id(f: impl FnMut() + 'static) -> EffectId {
    let eid = with_runtime(|rt| {
        rt.effects.insert(EffectSlot {
            callback: Some(Box::new(f)),
            dependencies: HashSet::new(),
        })
    });
    run_effect(eid);
    eid
}

/// Remove an effect, its subscriptions and its slot. Disposing twice is a no-op.
pub fn dispose_effect(eid: EffectId) {
    let slot = with_runtime(|rt| {
        rt.unlink(eid);
        rt.effects.remove(eid)
    });
    // Dropped outside the runtime borrow: captured state may own other handles.
    drop(slot);
}

/// Create a cached derived value.
///
/// `f` re-runs when its dependencies change; downstream subscribers are notified only
/// when the result differs (by `PartialEq`) from the previous one.
pub fn create_memo<T: Clone + PartialEq + 'static>(
    f: impl FnMut() -> T + 'static,
) -> ReadSignal<T> {
    create_memo_with_id(f).0
}

/// Create a memo and return the effect that keeps it current, so both can be disposed.
pub fn create_memo_with_id<T: Clone + PartialEq + 'static>(
    mut f: impl FnMut() -> T + 'static,
) -> (ReadSignal<T>, EffectId) {
    // Evaluate once with tracking suspended so an enclosing effect does not subscribe.
    let first = {
        let outer = with_runtime(|rt| rt.tracking.take());
        let value = f();
        with_runtime(|rt| rt.tracking = outer);
        value
    };

    let (read, write) = create_signal(first);
    let eid = create_effect_with_id(move || {
        write.set_if_changed(f());
    });
    (read, eid)
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

/// Group signal writes so that each affected effect runs once, after `f` returns.
pub fn batch<R>(f: impl FnOnce() -> R) -> R {
    with_runtime(|rt| rt.batch_depth += 1);
    let result = f();

    let pending = with_runtime(|rt| {
        rt.batch_depth -= 1;
        if rt.batch_depth == 0 {
            let mut seen = HashSet::new();
            rt.pending
                .drain(..)
                .filter(|eid| seen.insert(*eid))
                .collect()
        } else {
            Vec::new()
        }
    });
    notify(pending);
    result
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn run_effect(eid: EffectId) {
    let callback = with_runtime(|rt| {
        if !rt.is_live(eid) {
            return None;
        }
        rt.unlink(eid);
        rt.effects.get_mut(eid).and_then(|effect| effect.callback.take())
    });
    let Some(mut callback) = callback else {
        return;
    };

    let outer = with_runtime(|rt| rt.tracking.replace(eid));
    callback();
    let disposed = with_runtime(|rt| {
        rt.tracking = outer;
        match rt.effects.get_mut(eid) {
            Some(effect) => {
                effect.callback = Some(callback);
                None
            }
            None => Some(callback),
        }
    });
    drop(disposed);
}

fn notify(subs: Vec<EffectId>) {
    if subs.is_empty() {
        return;
    }

    let deferred = with_runtime(|rt| {
        if rt.batch_depth > 0 || rt.flushing {
            rt.pending.extend(subs.iter().copied());
            true
        } else {
            rt.flushing = true;
            false
        }
    });
    if deferred {
        return;
    }

    let mut queue = subs;
    while !queue.is_empty() {
        let mut seen = HashSet::new();
        for eid in queue.drain(..).filter(|eid| seen.insert(*eid)) {
            run_effect(eid);
        }
        with_runtime(|rt| queue.append(&mut rt.pending));
    }

    with_runtime(|rt| rt.flushing = false);
}

#[cfg(test)]
pub(crate) fn reset_runtime() {
    with_runtime(|rt| *rt = Runtime::default());
}

/// Live `(signals, effects)` on this thread.
#[cfg(test)]
pub(crate) fn slot_counts() -> (usize, usize) {
    with_runtime(|rt| (rt.signals.len(), rt.effects.len()))
}
