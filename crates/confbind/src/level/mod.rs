//! The severity scale and the live-rebinding level switch.
//!
//! A [`LevelSwitch`] holds the current minimum severity gating log emission.
//! Binding one against a [`RawSource`](crate::source::RawSource) parses the
//! source's current value once, hard-failing on an invalid name; if the
//! source supports change notification, the switch then tracks the source
//! for the rest of its life (see [`bind`]).
//!
//! # States
//!
//! - **Bound** - a subscription is active; every notification re-reads and
//!   re-parses the raw value. A failed reparse keeps the previous minimum
//!   and emits a `tracing` warning; nothing propagates to any caller.
//! - **Unbound** - the source offered no subscription. Terminal: the switch
//!   keeps its bind-time value unless mutated directly.
//!
//! # Concurrency
//!
//! Notifications may fire on arbitrary threads while unrelated threads read
//! the switch to gate emission. The minimum level is a single atomic byte:
//! updates are last-writer-wins and no partial write is ever observable.

mod binder;
mod switch;

pub use binder::bind;
pub(crate) use binder::bind_expanded;
pub use switch::{Level, LevelSwitch, ParseLevelError};
