//! Type-erased resolved values.
//!
//! The [`Value`] enum carries the result of a resolution request without the
//! caller knowing the concrete type at compile time. This enables:
//!
//! - A single `resolve()` entry point across scalar, enum, and indirect targets
//! - Registry parsers and factories that produce arbitrary host types
//! - Runtime inspection of what a directive resolved to
//!
//! # Example
//!
//! ```rust,ignore
//! use confbind::Value;
//!
//! let value = Value::UnsignedInteger(8080);
//! let port: u16 = value.to_u64().unwrap() as u16;
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use num_traits::ToPrimitive;

use crate::level::LevelSwitch;

// ============================================================================
// Macros for reducing boilerplate
// ============================================================================

/// Generates `From<T>` implementations for Value
macro_rules! impl_from_integer {
    ($($t:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::$variant(n as _)
                }
            }
        )+
    };
}

/// Generates `to_*` methods that use ToPrimitive
macro_rules! impl_to_primitive {
    ($($method:ident -> $t:ty),+ $(,)?) => {
        $(
            #[doc = concat!("Converts to `", stringify!($t), "` if possible.")]
            pub fn $method(&self) -> Option<$t> {
                match self {
                    Value::Integer(n) => n.$method(),

                    Value::UnsignedInteger(n) => n.$method(),

                    Value::Float(f) => f.$method(),

                    Value::Str(s) => s.parse().ok(),

                    Value::Bool(b) => Some(
                        if *b {
                            1 as $t
                        } else {
                            0 as $t
                        }
                    ),

                    _ => None,
                }
            }
        )+
    };
}

// ============================================================================
// Value Enum
// ============================================================================

/// A type-erased resolved value.
///
/// # Variants
///
/// | Variant | Produced By |
/// |---------|-------------|
/// | `None` | Nullable target with a blank raw string (typed absence) |
/// | `Bool` / `Integer` / `UnsignedInteger` / `Float` / `Str` | Generic scalar conversion |
/// | `Enum` | Enumeration targets (canonical declared member casing) |
/// | `Switch` | Level switch binding |
/// | `Instance` | Registry conversions, static member lookup, factory construction |
#[derive(Clone)]
pub enum Value {
    /// Typed absence from a nullable target; not an error.
    None,

    /// A boolean value.
    Bool(bool),

    /// A signed integer (stored as i64).
    Integer(i64),

    /// An unsigned integer (stored as u64).
    UnsignedInteger(u64),

    /// A floating-point value (stored as f64).
    Float(f64),

    /// A string value.
    Str(String),

    /// A matched enumeration member, with its canonical declared casing.
    Enum {
        /// The enumeration's type name.
        type_name: String,

        /// The matched member name, in declared casing.
        member: String,
    },

    /// A live severity threshold switch.
    Switch(Arc<LevelSwitch>),

    /// An opaque host-type instance from the type or conversion registry.
    Instance(Arc<dyn Any + Send + Sync>),
}

// ============================================================================
// Constructors
// ============================================================================

impl Value {
    /// Wraps an arbitrary host value as an opaque instance.
    pub fn instance<T: Any + Send + Sync>(value: T) -> Self {
        Value::Instance(Arc::new(value))
    }

    /// Returns `true` for the typed absence produced by nullable targets.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl Value {
    impl_to_primitive! {
        to_i64 -> i64,
        to_u64 -> u64,
        to_f64 -> f64,
    }

    /// Returns the boolean value, coercing `"true"`/`"false"` strings.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),

            Value::Str(s) => match s.to_ascii_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },

            _ => None,
        }
    }

    /// Returns the string value, if this is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),

            _ => None,
        }
    }

    /// Returns the matched member name for an `Enum` value.
    pub fn enum_member(&self) -> Option<&str> {
        match self {
            Value::Enum { member, .. } => Some(member),

            _ => None,
        }
    }

    /// Returns the level switch, if this value carries one.
    pub fn as_switch(&self) -> Option<&Arc<LevelSwitch>> {
        match self {
            Value::Switch(switch) => Some(switch),

            _ => None,
        }
    }

    /// Downcasts an `Instance` value to a concrete host type.
    pub fn downcast_ref<T: Any + Send + Sync>(&self) -> Option<&T> {
        match self {
            Value::Instance(any) => any.downcast_ref::<T>(),

            _ => None,
        }
    }
}

impl_from_integer! {
    i8 => Integer,
    i16 => Integer,
    i32 => Integer,
    i64 => Integer,
    u8 => UnsignedInteger,
    u16 => UnsignedInteger,
    u32 => UnsignedInteger,
    u64 => UnsignedInteger,
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Arc<LevelSwitch>> for Value {
    fn from(switch: Arc<LevelSwitch>) -> Self {
        Value::Switch(switch)
    }
}

// Manual Debug impl because Instance payloads are not Debug
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),

            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),

            Value::Integer(n) => f.debug_tuple("Integer").field(n).finish(),

            Value::UnsignedInteger(n) => f.debug_tuple("UnsignedInteger").field(n).finish(),

            Value::Float(x) => f.debug_tuple("Float").field(x).finish(),

            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),

            Value::Enum { type_name, member } => f
                .debug_struct("Enum")
                .field("type_name", type_name)
                .field("member", member)
                .finish(),

            Value::Switch(switch) => f.debug_tuple("Switch").field(switch).finish(),

            Value::Instance(_) => f.write_str("Instance(..)"),
        }
    }
}
