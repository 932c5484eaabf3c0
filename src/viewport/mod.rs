//! Viewport width sources and the adapter that publishes them as signals.
//!
//! - [`ViewportSource`]: current width plus subscribe/unsubscribe.
//! - [`SyntheticViewport`]: in-memory source for tests and headless hosts.
//! - [`TerminalViewport`]: crossterm-backed source.
//! - [`ChannelViewport`]: tokio channel source for widths produced on other threads.
//! - [`ResizeAdapter`]: subscribes to a source and publishes a [`Viewport`].

pub mod adapter;
pub mod channel;
pub mod source;
pub mod synthetic;
pub mod terminal;

pub use adapter::{ResizeAdapter, Viewport};
pub use channel::{channel, ChannelViewport, WidthSender};
pub use source::{Listener, SubscriptionId, ViewportSource, WidthEvent};
pub use synthetic::SyntheticViewport;
pub use terminal::{TerminalViewport, ViewportError};
