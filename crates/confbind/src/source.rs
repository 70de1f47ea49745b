//! Raw value sources and change-notification subscriptions.
//!
//! A [`RawSource`] is the capability pair the configuration reader hands to
//! the engine: `produce()` returns the current textual value, and sources
//! that can observe changes additionally offer `subscribe()`. The engine
//! never owns a source's lifecycle beyond holding a reference for the
//! duration of a binding.
//!
//! # Built-in Sources
//!
//! - [`StaticSource`] - A fixed string with no change notification
//! - [`SharedSource`] - A mutable shared string whose `set()` fires every
//!   registered callback, used by hosts that re-read configuration trees
//!
//! # Custom Sources
//!
//! Implement [`RawSource`] to bridge an external configuration reader:
//!
//! ```rust,ignore
//! use confbind::source::{ChangeCallback, RawSource, Subscription};
//!
//! struct SectionSource { /* ... */ }
//!
//! impl RawSource for SectionSource {
//!     fn produce(&self) -> String {
//!         // Read the section's current value...
//!         "Information".to_string()
//!     }
//!
//!     fn subscribe(&self, callback: ChangeCallback) -> Option<Subscription> {
//!         // Register with the reader's reload token...
//!         None
//!     }
//! }
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

/// Callback invoked when the underlying raw value may have changed.
///
/// Carries no payload: the consumer re-reads via [`RawSource::produce`].
pub type ChangeCallback = Arc<dyn Fn() + Send + Sync>;

/// A string-producing configuration value source.
///
/// `produce()` must be side-effect-free and idempotent within a single
/// resolution. `subscribe()` returns `None` when the source cannot observe
/// changes; consumers then bind once and never rebind.
pub trait RawSource: Send + Sync {
    /// Returns the current raw textual value.
    fn produce(&self) -> String;

    /// Registers a change callback, if this source supports notification.
    ///
    /// The returned [`Subscription`] is the unsubscribe capability. The
    /// engine stores it but never cancels it on its own; releasing it is
    /// the responsibility of whoever owns the configuration scope.
    fn subscribe(&self, callback: ChangeCallback) -> Option<Subscription> {
        let _ = callback;
        None
    }
}

/// An active change-notification registration.
///
/// Dropping a `Subscription` does NOT cancel it; the registration stays
/// live until [`cancel`](Subscription::cancel) is called explicitly. This
/// keeps teardown in the hands of the scope owner rather than tying it to
/// value lifetimes inside the engine.
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Wraps a cancellation action provided by a source implementation.
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Cancels the registration; the callback will not fire again.
    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("live", &self.cancel.is_some())
            .finish()
    }
}

// ============================================================================
// StaticSource
// ============================================================================

/// A source producing a fixed string, with no change notification.
#[derive(Clone, Debug)]
pub struct StaticSource {
    value: String,
}

impl StaticSource {
    /// Creates a source that always produces `value`.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl RawSource for StaticSource {
    fn produce(&self) -> String {
        self.value.clone()
    }
}

impl From<&str> for StaticSource {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SharedSource
// ============================================================================

struct SharedState {
    value: RwLock<String>,
    subscribers: RwLock<Vec<(u64, ChangeCallback)>>,
    next_id: AtomicU64,
}

/// A mutable shared source with change notification.
///
/// `set()` replaces the current value and invokes every live callback on the
/// calling thread, after the new value is visible to `produce()`. Clones
/// share the same underlying value and subscriber list, so a host can hand
/// one clone to the engine and keep another for updates.
#[derive(Clone)]
pub struct SharedSource {
    state: Arc<SharedState>,
}

impl SharedSource {
    /// Creates a shared source with the given initial value.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            state: Arc::new(SharedState {
                value: RwLock::new(initial.into()),
                subscribers: RwLock::new(Vec::new()),
                next_id: AtomicU64::new(0),
            }),
        }
    }

    /// Replaces the current value and fires all registered callbacks.
    pub fn set(&self, value: impl Into<String>) {
        *self.state.value.write() = value.into();

        // Snapshot outside the invocation so a callback cancelling its own
        // subscription cannot deadlock against the list lock.
        let live: Vec<ChangeCallback> = self
            .state
            .subscribers
            .read()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();

        for callback in live {
            callback();
        }
    }

    /// Returns the number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.state.subscribers.read().len()
    }
}

impl RawSource for SharedSource {
    fn produce(&self) -> String {
        self.state.value.read().clone()
    }

    fn subscribe(&self, callback: ChangeCallback) -> Option<Subscription> {
        let id = self.state.next_id.fetch_add(1, Ordering::Relaxed);
        self.state.subscribers.write().push((id, callback));

        let state = Arc::downgrade(&self.state);
        Some(Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.subscribers.write().retain(|(sub_id, _)| *sub_id != id);
            }
        }))
    }
}

impl std::fmt::Debug for SharedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSource")
            .field("value", &*self.state.value.read())
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[test]
    fn test_static_source_produces_fixed_value() {
        let source = StaticSource::new("Information");
        assert_eq!(source.produce(), "Information");
        assert!(source.subscribe(Arc::new(|| {})).is_none());
    }

    #[test]
    fn test_shared_source_set_and_produce() {
        let source = SharedSource::new("Debug");
        assert_eq!(source.produce(), "Debug");

        source.set("Warning");
        assert_eq!(source.produce(), "Warning");
    }

    #[test]
    fn test_shared_source_notifies_subscribers() {
        let source = SharedSource::new("a");
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = fired.clone();
        let sub = source
            .subscribe(Arc::new(move || {
                fired_clone.fetch_add(1, Ordering::SeqCst);
            }))
            .unwrap();

        source.set("b");
        source.set("c");
        assert_eq!(fired.load(Ordering::SeqCst), 2);

        sub.cancel();
        source.set("d");
        assert_eq!(fired.load(Ordering::SeqCst), 2);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_new_value_visible_inside_callback() {
        let source = SharedSource::new("old");
        let seen = Arc::new(RwLock::new(String::new()));

        let reader = source.clone();
        let seen_clone = seen.clone();
        let _sub = source.subscribe(Arc::new(move || {
            *seen_clone.write() = reader.produce();
        }));

        source.set("new");
        assert_eq!(*seen.read(), "new");
    }

    #[test]
    fn test_dropping_subscription_keeps_it_live() {
        let source = SharedSource::new("a");
        let fired = Arc::new(AtomicUsize::new(0));

        let fired_clone = fired.clone();
        let sub = source.subscribe(Arc::new(move || {
            fired_clone.fetch_add(1, Ordering::SeqCst);
        }));
        drop(sub);

        source.set("b");
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }
}
