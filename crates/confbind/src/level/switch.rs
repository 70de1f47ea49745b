//! Severity levels and the mutable threshold switch.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::Mutex;
use thiserror::Error as ThisError;

use crate::descriptor::EnumDescriptor;
use crate::source::Subscription;

/// The logging severity scale, least to most severe.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Level {
    /// Tracing-grade noise.
    Verbose = 0,

    /// Internal diagnostics.
    Debug = 1,

    /// Normal operational events.
    Information = 2,

    /// Possible problems.
    Warning = 3,

    /// Failures within an operation.
    Error = 4,

    /// Failures taking down the application.
    Fatal = 5,
}

impl Level {
    /// All members, in ascending severity order.
    pub const ALL: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Information,
        Level::Warning,
        Level::Error,
        Level::Fatal,
    ];

    /// The declared member name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Verbose => "Verbose",
            Level::Debug => "Debug",
            Level::Information => "Information",
            Level::Warning => "Warning",
            Level::Error => "Error",
            Level::Fatal => "Fatal",
        }
    }

    /// An [`EnumDescriptor`] for the severity scale, for hosts binding
    /// severity text as a plain enumeration target.
    #[must_use]
    pub fn enum_descriptor() -> EnumDescriptor {
        EnumDescriptor::new("Level", Level::ALL.map(Level::as_str))
    }

    // Values in the atomic only ever come from `as u8` on this enum.
    const fn from_repr(raw: u8) -> Level {
        match raw {
            0 => Level::Verbose,
            1 => Level::Debug,
            2 => Level::Information,
            3 => Level::Warning,
            4 => Level::Error,
            _ => Level::Fatal,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string was not a severity level name.
#[derive(Clone, Debug, ThisError)]
#[error("'{value}' is not a recognized severity level")]
pub struct ParseLevelError {
    /// The rejected input.
    pub value: String,
}

impl FromStr for Level {
    type Err = ParseLevelError;

    /// Case-insensitive match against the declared member names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseLevelError {
                value: s.to_string(),
            })
    }
}

/// A mutable holder of the current minimum logging severity.
///
/// Readers gate emission with [`is_enabled`](LevelSwitch::is_enabled) while
/// the binder may concurrently replace the minimum; both sides touch a
/// single atomic byte, so a reader sees either the old or the new level,
/// never anything between.
pub struct LevelSwitch {
    minimum: AtomicU8,
    subscription: Mutex<Option<Subscription>>,
}

impl LevelSwitch {
    /// Creates a switch with the given minimum level, unbound.
    #[must_use]
    pub fn new(minimum: Level) -> Self {
        Self {
            minimum: AtomicU8::new(minimum as u8),
            subscription: Mutex::new(None),
        }
    }

    /// The current minimum level.
    #[must_use]
    pub fn minimum(&self) -> Level {
        Level::from_repr(self.minimum.load(Ordering::Acquire))
    }

    /// Replaces the minimum level. A single atomic store.
    pub fn set_minimum(&self, level: Level) {
        self.minimum.store(level as u8, Ordering::Release);
    }

    /// Whether events at `level` pass the current threshold.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.minimum()
    }

    /// Whether a change-notification subscription is attached.
    #[must_use]
    pub fn is_bound(&self) -> bool {
        self.subscription.lock().is_some()
    }

    /// Detaches and returns the subscription without cancelling it.
    ///
    /// The switch never cancels its own subscription; the configuration
    /// scope's owner takes it from here and releases it at teardown.
    #[must_use]
    pub fn release_subscription(&self) -> Option<Subscription> {
        self.subscription.lock().take()
    }

    pub(crate) fn attach_subscription(&self, subscription: Subscription) {
        *self.subscription.lock() = Some(subscription);
    }
}

impl fmt::Debug for LevelSwitch {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("LevelSwitch")
            .field("minimum", &self.minimum())
            .field("bound", &self.is_bound())
            .finish()
    }
}
