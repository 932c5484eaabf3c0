//! Terminal viewport backed by crossterm.
//!
//! The initial width comes from `crossterm::terminal::size()`. The host forwards its
//! crossterm events to [`TerminalViewport::handle_event`]; `Event::Resize` becomes a width
//! event, everything else is ignored. Widths are terminal columns multiplied by a
//! configurable cell width so breakpoints can be expressed in either unit.

use std::cell::Cell;
use std::rc::Rc;

use crossterm::event::Event;

use super::source::{Listener, Listeners, SubscriptionId, ViewportSource, WidthEvent};

/// Errors from querying the terminal.
#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("failed to query terminal size: {0}")]
    TerminalSize(#[from] std::io::Error),
}

#[derive(Debug)]
struct Inner {
    columns: Cell<u16>,
    cell_width: u32,
    sequence: Cell<u64>,
    listeners: Listeners,
}

/// A cloneable handle to the terminal's width.
#[derive(Debug, Clone)]
pub struct TerminalViewport {
    inner: Rc<Inner>,
}

impl TerminalViewport {
    /// Query the real terminal for its current size.
    pub fn new() -> Result<Self, ViewportError> {
        let (columns, _rows) = crossterm::terminal::size()?;
        Ok(Self::with_columns(columns))
    }

    /// Start from a known column count without touching the terminal.
    pub fn with_columns(columns: u16) -> Self {
        Self::from_parts(columns, 1)
    }

    /// Report widths as `columns * cell_width` (builder, before sharing the handle).
    pub fn with_cell_width(self, cell_width: u32) -> Self {
        Self::from_parts(self.inner.columns.get(), cell_width.max(1))
    }

    fn from_parts(columns: u16, cell_width: u32) -> Self {
        Self {
            inner: Rc::new(Inner {
                columns: Cell::new(columns),
                cell_width,
                sequence: Cell::new(0),
                listeners: Listeners::default(),
            }),
        }
    }

    /// Current terminal column count.
    pub fn columns(&self) -> u16 {
        self.inner.columns.get()
    }

    /// Feed a crossterm event. Returns `true` if it was a resize.
    pub fn handle_event(&self, event: &Event) -> bool {
        match event {
            Event::Resize(columns, _rows) => {
                self.resize(*columns);
                true
            }
            _ => false,
        }
    }

    fn resize(&self, columns: u16) {
        self.inner.columns.set(columns);
        let sequence = self.inner.sequence.get() + 1;
        self.inner.sequence.set(sequence);
        tracing::trace!(target: "masonry_columns::viewport", columns, sequence, "terminal resized");
        self.inner.listeners.dispatch(WidthEvent {
            width: self.current_width(),
            sequence,
        });
    }
}

impl ViewportSource for TerminalViewport {
    fn current(&self) -> WidthEvent {
        WidthEvent {
            width: u32::from(self.inner.columns.get()) * self.inner.cell_width,
            sequence: self.inner.sequence.get(),
        }
    }

    fn subscribe(&self, listener: Listener) -> SubscriptionId {
        self.inner.listeners.insert(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.inner.listeners.remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::cell::RefCell;

    #[test]
    fn resize_event_becomes_width_event() {
        let vp = TerminalViewport::with_columns(80);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_c = seen.clone();
        vp.subscribe(Box::new(move |e| seen_c.borrow_mut().push(e)));

        assert!(vp.handle_event(&Event::Resize(120, 40)));
        assert_eq!(vp.current_width(), 120);
        assert_eq!(
            *seen.borrow(),
            vec![WidthEvent {
                width: 120,
                sequence: 1
            }]
        );
    }

    #[test]
    fn other_events_ignored() {
        let vp = TerminalViewport::with_columns(80);
        let key = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!vp.handle_event(&key));
        assert!(!vp.handle_event(&Event::FocusGained));
        assert_eq!(vp.current_width(), 80);
    }

    #[test]
    fn cell_width_scales() {
        let vp = TerminalViewport::with_columns(100).with_cell_width(8);
        assert_eq!(vp.current_width(), 800);
        vp.handle_event(&Event::Resize(150, 50));
        assert_eq!(vp.current_width(), 1200);
        assert_eq!(vp.columns(), 150);
    }

    #[test]
    fn error_display() {
        let err = ViewportError::from(std::io::Error::other("no tty"));
        assert_eq!(err.to_string(), "failed to query terminal size: no tty");
    }
}
