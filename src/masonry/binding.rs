//! Wiring a [`Masonry`] to a reactive [`Viewport`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::breakpoint::{ActiveBreakpoints, NormalizedBreakpoints};
use crate::reactive::{EffectScope, ReadSignal};
use crate::viewport::{ResizeAdapter, Viewport, ViewportSource};

use super::controller::Masonry;

/// Keeps a controller in sync with a viewport for as long as it lives.
///
/// Two effects: one follows the active-breakpoint signal, the other the raw width. The
/// [`changes`](Self::changes) counter ticks whenever either observation altered the
/// controller, which is what a host re-renders on.
///
/// The effects borrow the controller mutably, so the host must not hold a borrow of it
/// while feeding the viewport source.
///
/// Active breakpoint names are resolved against the controller's own configuration, so
/// the adapter must observe the same breakpoint set. [`follow`](Self::follow) builds the
/// adapter from the controller; a mismatch seen by [`new`](Self::new) is logged.
#[derive(Debug)]
pub struct MasonryBinding {
    scope: EffectScope,
    changes: ReadSignal<u64>,
    columns: ReadSignal<usize>,
}

impl MasonryBinding {
    /// Attach an adapter built from the controller's breakpoints and bind to it.
    pub fn follow<T: 'static, S: ViewportSource>(
        masonry: Rc<RefCell<Masonry<T>>>,
        source: S,
    ) -> (ResizeAdapter<S>, Self) {
        let breakpoints = masonry.borrow().breakpoints().clone();
        let adapter = ResizeAdapter::with_normalized(source, breakpoints);
        let binding = Self::new(masonry, adapter.viewport());
        (adapter, binding)
    }

    pub fn new<T: 'static>(masonry: Rc<RefCell<Masonry<T>>>, viewport: Viewport) -> Self {
        let mut scope = EffectScope::new();
        let (changes, bump) = scope.signal(0u64);

        let on_active = Rc::clone(&masonry);
        scope.effect(move || {
            let active = viewport.active.get();
            let mut controller = on_active.borrow_mut();
            if !knows_all(controller.breakpoints(), &active) {
                tracing::warn!(
                    target: "masonry_columns::masonry",
                    %active,
                    "active breakpoints not in the controller's configuration"
                );
            }
            let changed = controller.apply_active(active);
            drop(controller);
            if changed {
                bump.update(|n| *n += 1);
            }
        });

        let on_width = Rc::clone(&masonry);
        scope.effect(move || {
            let width = viewport.width.get();
            if on_width.borrow_mut().apply_width(width) {
                bump.update(|n| *n += 1);
            }
        });

        let columns = scope.memo(move || {
            changes.get();
            masonry.borrow().columns()
        });

        Self {
            scope,
            changes,
            columns,
        }
    }

    /// Counter bumped on every change applied to the controller.
    pub fn changes(&self) -> ReadSignal<u64> {
        self.changes
    }

    /// Resolved column count, notifying only when a viewport change alters it.
    pub fn columns(&self) -> ReadSignal<usize> {
        self.columns
    }

    pub fn is_bound(&self) -> bool {
        !self.scope.is_empty()
    }

    /// Stop following the viewport and release the binding's signals, after which
    /// [`changes`](Self::changes) and [`columns`](Self::columns) must not be read. Also
    /// happens on drop.
    pub fn unbind(&mut self) {
        self.scope.dispose();
    }
}

fn knows_all(breakpoints: &NormalizedBreakpoints, active: &ActiveBreakpoints) -> bool {
    active.iter().all(|name| breakpoints.iter().any(|bp| bp.name == name))
}
