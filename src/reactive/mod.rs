//! Reactive state: signals, effects, memos.
//!
//! Leptos-style fine-grained reactivity used to propagate viewport changes.
//!
//! - [`create_signal`]: create a read/write signal pair.
//! - [`create_effect`]: auto-tracking side effect.
//! - [`create_memo`]: cached derived computation.
//! - [`batch`]: coalesce multiple writes into one notification pass.
//! - [`EffectScope`]: dispose a group of effects and signals together.

pub mod effect;
pub mod signal;

pub use effect::{
    batch, create_effect, create_effect_with_id, create_memo, create_memo_with_id,
    dispose_effect, dispose_signal, EffectId, EffectScope,
};
pub use signal::{create_signal, ReadSignal, SignalId, WriteSignal};
