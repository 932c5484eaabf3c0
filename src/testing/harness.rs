//! Harness: drive the whole masonry loop headlessly.
//!
//! Wires a [`SyntheticViewport`] through a [`ResizeAdapter`] into a bound [`Masonry`], and
//! renders with a [`ColumnLayout`] that feeds measured heights back. Tests resize the
//! viewport, render, and inspect columns without a real host.
//!
//! ```ignore
//! let mut harness = Harness::new(config, 1000, |h: &f32| ItemExtent::Fixed(*h));
//! harness.set_items(vec![10.0, 50.0, 10.0, 10.0]);
//! harness.settle(4)?;
//! assert_eq!(harness.snapshot(), "col 0: 0 2 3\ncol 1: 1");
//! ```

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::layout::{ColumnLayout, ItemExtent, LayoutError, RenderedLayout};
use crate::masonry::{Masonry, MasonryBinding, MasonryConfig};
use crate::viewport::{ResizeAdapter, SyntheticViewport, WidthEvent};

use super::snapshot::layout_to_string;

/// Headless masonry host.
pub struct Harness<T: 'static> {
    viewport: SyntheticViewport,
    adapter: ResizeAdapter<SyntheticViewport>,
    masonry: Rc<RefCell<Masonry<T>>>,
    binding: MasonryBinding,
    engine: ColumnLayout,
    extent: Box<dyn Fn(&T) -> ItemExtent>,
    last: Option<RenderedLayout>,
}

impl<T: 'static> Harness<T> {
    /// Create a harness with a viewport `width` pixels wide.
    pub fn new(
        config: MasonryConfig,
        width: u32,
        extent: impl Fn(&T) -> ItemExtent + 'static,
    ) -> Self {
        let viewport = SyntheticViewport::new(width);
        let masonry = Rc::new(RefCell::new(Masonry::new(config, width)));
        let (adapter, binding) = MasonryBinding::follow(Rc::clone(&masonry), viewport.clone());
        Self {
            viewport,
            adapter,
            masonry,
            binding,
            engine: ColumnLayout::new(),
            extent: Box::new(extent),
            last: None,
        }
    }

    pub fn set_items(&mut self, items: impl Into<Vec<T>>) {
        self.masonry.borrow_mut().set_items(items);
    }

    /// Resize the synthetic viewport, delivering the event synchronously.
    pub fn resize(&mut self, width: u32) -> WidthEvent {
        self.viewport.resize(width)
    }

    /// Replace the configuration and hand its breakpoints to the adapter.
    pub fn set_config(&mut self, config: MasonryConfig) {
        self.masonry.borrow_mut().set_config(config);
        let breakpoints = self.masonry.borrow().breakpoints().clone();
        self.adapter.set_normalized(breakpoints);
    }

    /// Run one layout pass, render it and record every measured height.
    pub fn render(&mut self) -> Result<&RenderedLayout, LayoutError> {
        let rendered = {
            let masonry = self.masonry.borrow();
            let layout = masonry.layout();
            let extent = &self.extent;
            self.engine.render(&layout, |item: &&T| extent(*item))?
        };

        {
            let mut masonry = self.masonry.borrow_mut();
            for (ticket, height) in rendered.measurements() {
                masonry.record_height(ticket, height);
            }
        }

        Ok(&*self.last.insert(rendered))
    }

    /// Render until balancing stops asking for another pass, at most `max_passes` times.
    /// Returns the number of passes run.
    pub fn settle(&mut self, max_passes: usize) -> Result<usize, LayoutError> {
        let mut passes = 0;
        while passes < max_passes {
            self.render()?;
            passes += 1;
            if !self.masonry.borrow().needs_rearrange() {
                break;
            }
        }
        Ok(passes)
    }

    /// Original indices per column for the current state.
    pub fn columns(&self) -> Vec<Vec<usize>> {
        self.masonry.borrow().layout().indices()
    }

    /// [`layout_to_string`] of the current state.
    pub fn snapshot(&self) -> String {
        layout_to_string(&self.masonry.borrow().layout())
    }

    /// The most recent render, if any.
    pub fn rendered(&self) -> Option<&RenderedLayout> {
        self.last.as_ref()
    }

    /// Number of viewport observations that changed the controller.
    pub fn changes(&self) -> u64 {
        self.binding.changes().get_untracked()
    }

    pub fn masonry(&self) -> Ref<'_, Masonry<T>> {
        self.masonry.borrow()
    }

    pub fn viewport(&self) -> &SyntheticViewport {
        &self.viewport
    }

    pub fn adapter(&self) -> &ResizeAdapter<SyntheticViewport> {
        &self.adapter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::{BreakpointSet, Param};
    use pretty_assertions::assert_eq;

    fn fixed(h: &f32) -> ItemExtent {
        ItemExtent::Fixed(*h)
    }

    #[test]
    fn balancing_settles_in_two_passes() {
        let config = MasonryConfig::new().with_columns(2).balanced();
        let mut harness = Harness::new(config, 400, fixed);
        harness.set_items(vec![10.0, 50.0, 10.0, 10.0]);
        assert_eq!(harness.columns(), vec![vec![0, 2], vec![1, 3]]);

        let passes = harness.settle(5).unwrap();
        assert_eq!(passes, 2);
        assert_eq!(harness.snapshot(), "col 0: 0 2 3\ncol 1: 1");
    }

    #[test]
    fn resize_changes_columns() {
        let config = MasonryConfig::new()
            .with_breakpoints(BreakpointSet::from([("narrow", 0), ("wide", 800)]))
            .with_columns(Param::per_breakpoint([("narrow", 1), ("wide", 2)]));
        let mut harness = Harness::new(config, 500, fixed);
        harness.set_items(vec![1.0, 2.0, 3.0]);
        assert_eq!(harness.columns().len(), 1);

        harness.resize(900);
        assert_eq!(harness.columns(), vec![vec![0, 2], vec![1]]);
        assert_eq!(harness.viewport().subscriber_count(), 1);
    }

    #[test]
    fn set_config_keeps_adapter_in_step() {
        let mut harness = Harness::new(MasonryConfig::new().with_columns(2), 1000, fixed);
        harness.set_config(
            MasonryConfig::new()
                .with_breakpoints([("narrow", 0), ("wide", 800)])
                .with_columns(Param::per_breakpoint([("narrow", 1), ("wide", 3)])),
        );
        assert_eq!(&harness.adapter().breakpoints(), harness.masonry().breakpoints());
        assert_eq!(harness.masonry().columns(), 3);
        harness.resize(500);
        assert_eq!(harness.masonry().columns(), 1);
    }

    #[test]
    fn render_records_heights() {
        let mut harness = Harness::new(MasonryConfig::new().with_columns(2), 200, fixed);
        harness.set_items(vec![4.0, 8.0]);
        let rendered = harness.render().unwrap();
        assert_eq!(rendered.items.len(), 2);
        assert_eq!(harness.masonry().heights().get(1), Some(8.0));
        assert!(harness.rendered().is_some());
    }
}
