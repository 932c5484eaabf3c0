//! Resize adapter: turns a [`ViewportSource`] into reactive width and breakpoint signals.
//!
//! Each accepted width event recomputes the active breakpoints and publishes both values
//! in one [`batch`]. The active list is only written when it differs from the previous
//! one, so effects that depend on it alone (column count, gap) skip widths that do not
//! cross a breakpoint. The raw width is written on every event.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::breakpoint::{ActiveBreakpoints, BreakpointSet, NormalizedBreakpoints};
use crate::reactive::{batch, EffectScope, ReadSignal, WriteSignal};

use super::source::{SubscriptionId, ViewportSource, WidthEvent};

/// The observed viewport as a pair of read signals, readable while its adapter lives.
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    /// Raw width, rewritten on every accepted event.
    pub width: ReadSignal<u32>,
    /// Breakpoints in effect, rewritten only on change.
    pub active: ReadSignal<ActiveBreakpoints>,
}

#[derive(Debug, Clone, Copy)]
struct Writers {
    width: WriteSignal<u32>,
    active: WriteSignal<ActiveBreakpoints>,
}

impl Writers {
    /// Publish one observation. Returns whether the active list changed.
    fn publish(self, active: ActiveBreakpoints, width: u32) -> bool {
        batch(|| {
            let changed = self.active.set_if_changed(active);
            self.width.set(width);
            changed
        })
    }
}

/// Owns a subscription on a viewport source and the signals it feeds.
#[derive(Debug)]
pub struct ResizeAdapter<S: ViewportSource> {
    source: S,
    breakpoints: Rc<RefCell<NormalizedBreakpoints>>,
    viewport: Viewport,
    writers: Writers,
    /// Owns both signals; they are released with the adapter.
    scope: EffectScope,
    subscription: Option<SubscriptionId>,
    /// Sequence of the newest observation published, from an event or from `attach`.
    last_sequence: Rc<Cell<u64>>,
}

impl<S: ViewportSource> ResizeAdapter<S> {
    /// Create the signals and attach to `source` immediately.
    pub fn new(source: S, breakpoints: &BreakpointSet) -> Self {
        Self::with_normalized(source, breakpoints.normalize())
    }

    /// Like [`new`](Self::new) for an already normalized set, such as
    /// [`Masonry::breakpoints`](crate::masonry::Masonry::breakpoints).
    pub fn with_normalized(source: S, breakpoints: NormalizedBreakpoints) -> Self {
        let width = source.current_width();
        let mut scope = EffectScope::new();
        let (width_r, width_w) = scope.signal(width);
        let (active_r, active_w) = scope.signal(breakpoints.active(width));

        let mut adapter = Self {
            source,
            breakpoints: Rc::new(RefCell::new(breakpoints)),
            viewport: Viewport {
                width: width_r,
                active: active_r,
            },
            writers: Writers {
                width: width_w,
                active: active_w,
            },
            scope,
            subscription: None,
            last_sequence: Rc::new(Cell::new(0)),
        };
        adapter.attach();
        adapter
    }

    /// Subscribe to the source, replacing any existing subscription.
    ///
    /// Publishes the source's current width synchronously before returning. Events older
    /// than that width are dropped when they arrive later.
    pub fn attach(&mut self) {
        self.detach();

        let current = self.source.current();
        let width = current.width;
        self.last_sequence.set(self.last_sequence.get().max(current.sequence));
        let active = self.breakpoints.borrow().active(width);
        self.writers.publish(active, width);

        let breakpoints = Rc::clone(&self.breakpoints);
        let last_sequence = Rc::clone(&self.last_sequence);
        let writers = self.writers;
        let id = self.source.subscribe(Box::new(move |event: WidthEvent| {
            if event.sequence <= last_sequence.get() {
                tracing::trace!(
                    target: "masonry_columns::viewport",
                    width = event.width,
                    sequence = event.sequence,
                    "dropping stale width event"
                );
                return;
            }
            last_sequence.set(event.sequence);
            let active = breakpoints.borrow().active(event.width);
            let changed = writers.publish(active, event.width);
            if changed {
                tracing::debug!(
                    target: "masonry_columns::viewport",
                    width = event.width,
                    "active breakpoints changed"
                );
            }
        }));
        self.subscription = Some(id);
        tracing::trace!(target: "masonry_columns::viewport", width, "adapter attached");
    }

    /// Drop the subscription. Detaching twice is a no-op.
    pub fn detach(&mut self) {
        if let Some(id) = self.subscription.take() {
            self.source.unsubscribe(id);
            tracing::trace!(target: "masonry_columns::viewport", "adapter detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    /// Replace the breakpoint set and re-attach.
    pub fn set_breakpoints(&mut self, breakpoints: &BreakpointSet) {
        self.set_normalized(breakpoints.normalize());
    }

    /// Replace the breakpoints with an already normalized set and re-attach.
    pub fn set_normalized(&mut self, breakpoints: NormalizedBreakpoints) {
        *self.breakpoints.borrow_mut() = breakpoints;
        self.attach();
    }

    /// The signals dependents should read.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Last published width.
    pub fn width(&self) -> u32 {
        self.viewport.width.get_untracked()
    }

    /// Last published active breakpoints.
    pub fn active(&self) -> ActiveBreakpoints {
        self.viewport.active.get_untracked()
    }

    pub fn breakpoints(&self) -> NormalizedBreakpoints {
        self.breakpoints.borrow().clone()
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<S: ViewportSource> Drop for ResizeAdapter<S> {
    fn drop(&mut self) {
        self.detach();
        self.scope.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::create_effect;
    use crate::viewport::SyntheticViewport;

    fn devices() -> BreakpointSet {
        BreakpointSet::from([("mobile", 0), ("tablet", 900), ("desktop", 1600)])
    }

    fn counters(vp: Viewport) -> (Rc<Cell<u32>>, Rc<Cell<u32>>) {
        let active_runs = Rc::new(Cell::new(0));
        let width_runs = Rc::new(Cell::new(0));
        let a = active_runs.clone();
        create_effect(move || {
            vp.active.with(|_| ());
            a.set(a.get() + 1);
        });
        let w = width_runs.clone();
        create_effect(move || {
            vp.width.get();
            w.set(w.get() + 1);
        });
        (active_runs, width_runs)
    }

    #[test]
    fn publishes_initial_observation() {
        let source = SyntheticViewport::new(1000);
        let adapter = ResizeAdapter::new(source, &devices());
        assert!(adapter.is_attached());
        assert_eq!(adapter.width(), 1000);
        assert_eq!(adapter.active().current(), Some("tablet"));
        assert_eq!(adapter.active().to_string(), "[tablet, mobile]");
    }

    #[test]
    fn same_breakpoints_skip_active_signal() {
        let source = SyntheticViewport::new(1000);
        let adapter = ResizeAdapter::new(source.clone(), &devices());
        let (active_runs, width_runs) = counters(adapter.viewport());

        source.resize(1100);
        assert_eq!(active_runs.get(), 1);
        assert_eq!(width_runs.get(), 2);

        source.resize(1700);
        assert_eq!(active_runs.get(), 2);
        assert_eq!(width_runs.get(), 3);
        assert_eq!(adapter.active().current(), Some("desktop"));
    }

    #[test]
    fn consistent_pair_in_effects() {
        let source = SyntheticViewport::new(500);
        let adapter = ResizeAdapter::new(source.clone(), &devices());
        let vp = adapter.viewport();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = seen.clone();
        create_effect(move || {
            let width = vp.width.get();
            let current = vp.active.with(|a| a.current().map(str::to_owned));
            seen_c.borrow_mut().push((width, current));
        });
        source.resize(2000);
        assert_eq!(
            *seen.borrow(),
            vec![
                (500, Some("mobile".to_owned())),
                (2000, Some("desktop".to_owned()))
            ]
        );
    }

    #[test]
    fn stale_events_dropped() {
        let source = SyntheticViewport::new(1000);
        let adapter = ResizeAdapter::new(source.clone(), &devices());
        let older = source.stamp(300);
        let newer = source.stamp(1800);
        source.deliver(newer);
        source.deliver(older);
        assert_eq!(adapter.width(), 1800);
        assert_eq!(adapter.active().current(), Some("desktop"));
    }

    #[test]
    fn stale_event_after_reattach_dropped() {
        let source = SyntheticViewport::new(1000);
        let mut adapter = ResizeAdapter::new(source.clone(), &devices());
        adapter.detach();
        let older = source.stamp(400);
        let newer = source.stamp(1700);
        source.deliver(newer);

        adapter.attach();
        assert_eq!(adapter.width(), 1700);
        source.deliver(older);
        assert_eq!(adapter.width(), 1700);
        assert_eq!(adapter.active().current(), Some("desktop"));
    }

    #[test]
    fn stale_event_before_creation_dropped() {
        let source = SyntheticViewport::new(1000);
        let older = source.stamp(400);
        let newer = source.stamp(1700);
        source.deliver(newer);

        let adapter = ResizeAdapter::new(source.clone(), &devices());
        source.deliver(older);
        assert_eq!(adapter.width(), 1700);
        assert_eq!(adapter.active().current(), Some("desktop"));

        source.resize(500);
        assert_eq!(adapter.width(), 500);
    }

    #[test]
    fn stale_event_after_set_breakpoints_dropped() {
        let source = SyntheticViewport::new(1000);
        let mut adapter = ResizeAdapter::new(source.clone(), &devices());
        let older = source.stamp(300);
        adapter.detach();
        source.resize(1300);

        adapter.set_breakpoints(&BreakpointSet::from([("narrow", 0), ("wide", 1200)]));
        source.deliver(older);
        assert_eq!(adapter.width(), 1300);
        assert_eq!(adapter.active().current(), Some("wide"));
    }

    #[test]
    fn reattach_does_not_leak() {
        let source = SyntheticViewport::new(1000);
        let mut adapter = ResizeAdapter::new(source.clone(), &devices());
        adapter.attach();
        adapter.attach();
        assert_eq!(source.subscriber_count(), 1);

        adapter.set_breakpoints(&BreakpointSet::from([("narrow", 0), ("wide", 1200)]));
        assert_eq!(source.subscriber_count(), 1);
        assert_eq!(adapter.active().current(), Some("narrow"));
    }

    #[test]
    fn detach_is_idempotent_and_drop_detaches() {
        let source = SyntheticViewport::new(1000);
        let mut adapter = ResizeAdapter::new(source.clone(), &devices());
        adapter.detach();
        adapter.detach();
        assert!(!adapter.is_attached());
        assert_eq!(source.subscriber_count(), 0);

        source.resize(1700);
        assert_eq!(adapter.width(), 1000);

        adapter.attach();
        assert_eq!(adapter.width(), 1700);
        drop(adapter);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn dropped_adapters_release_their_signals() {
        let source = SyntheticViewport::new(1000);
        let before = crate::reactive::signal::slot_counts();
        for width in [500, 1000, 1700] {
            let adapter = ResizeAdapter::new(source.clone(), &devices());
            source.resize(width);
            assert_eq!(adapter.width(), width);
        }
        assert_eq!(crate::reactive::signal::slot_counts(), before);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn no_breakpoints_means_empty_active() {
        let source = SyntheticViewport::new(1000);
        let adapter = ResizeAdapter::new(source, &BreakpointSet::new());
        assert!(adapter.active().is_empty());
        assert!(adapter.breakpoints().is_empty());
    }
}
