//! Error types for value resolution.
//!
//! This module contains the [`Error`] enum and the nested [`ResolutionError`]
//! detail enum, both integrated with [`miette`] for rich diagnostics.
//!
//! # Error Taxonomy
//!
//! | Variant | When It Occurs |
//! |---------|----------------|
//! | [`Error::Parse`] | The string does not match the lexical form its target requires (bad enum member name) |
//! | [`Error::Conversion`] | A registered or generic converter rejected the string |
//! | [`Error::Resolution`] | Indirect resolution failed, or a level switch bind saw an invalid level |
//!
//! # Not-Applicable vs. Failed
//!
//! The resolution engine distinguishes "this strategy does not apply, try the
//! next" from "this strategy applies and failed". Only the latter produces an
//! [`Error`]; the former is modeled as an `Option`/enum return and never
//! reaches this module. Collapsing the two would break the fallback-chain
//! semantics of [`Resolver::resolve`](crate::Resolver::resolve).
//!
//! # Diagnostic Codes
//!
//! | Code | Meaning |
//! |------|---------|
//! | `confbind::parse_error` | Enum member name did not match |
//! | `confbind::conversion_error` | Converter rejected the value |
//! | `confbind::resolution::type_not_found` | Accessor or type name referenced an unregistered type |
//! | `confbind::resolution::member_not_found` | Registered type has no such static member |
//! | `confbind::resolution::no_usable_constructor` | Registered type is not constructible |
//! | `confbind::resolution::construction` | The type's factory returned an error |
//! | `confbind::resolution::invalid_level` | Level switch bind saw an unrecognized severity name |

use std::error::Error as StdError;

use miette::Diagnostic;
use thiserror::Error as ThisError;

/// Boxed error type carried by converter and factory failures.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors produced by the value resolution engine.
///
/// All synchronous resolution failures (engine invocation, initial level
/// switch bind) propagate to the immediate caller as one of these variants.
/// The only non-propagating path is the level switch binder's
/// notification-driven reparse, which reports through `tracing` instead
/// (see [`crate::level`]).
#[derive(Debug, ThisError, Diagnostic)]
#[non_exhaustive]
pub enum Error {
    /// The string does not match the required lexical form for its target.
    #[error("failed to parse {value:?} as {type_name}")]
    #[diagnostic(code(confbind::parse_error))]
    Parse {
        /// The target type name (for diagnostic messages).
        type_name: String,

        /// The raw string value that failed to parse.
        value: String,

        /// Dynamic help text listing what would have been accepted.
        #[help]
        help: String,
    },

    /// A registered or generic converter rejected the string for the
    /// target's native representation.
    #[error("cannot convert {value:?} to {type_name}")]
    #[diagnostic(code(confbind::conversion_error))]
    Conversion {
        /// The target type name.
        type_name: String,

        /// The raw string value that was rejected.
        value: String,

        /// Dynamic help text.
        #[help]
        help: String,

        /// The underlying converter error, if one was produced.
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// Indirect resolution failed.
    ///
    /// Wraps [`ResolutionError`] with diagnostic transparency so miette
    /// displays the detail variant's code and help directly.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Resolution {
        /// The underlying resolution failure.
        #[from]
        #[diagnostic_source]
        source: ResolutionError,
    },
}

/// Detail of an indirect-resolution or level-bind failure.
///
/// These are fatal misconfigurations: once the engine has committed to the
/// indirect path (or the level switch bind), a failure here is terminal and
/// is never silently skipped in favor of a later strategy.
#[derive(Debug, ThisError, Diagnostic)]
#[non_exhaustive]
pub enum ResolutionError {
    /// An accessor directive or bare type name referenced a type the host
    /// never registered.
    #[error("type '{type_ref}' was not found in the type registry")]
    #[diagnostic(
        code(confbind::resolution::type_not_found),
        help("register the type with TypeRegistry before resolving values that reference it")
    )]
    TypeNotFound {
        /// The unresolvable type reference, as written in the directive.
        type_ref: String,
    },

    /// The referenced type exists but declares no static member with the
    /// requested name.
    #[error("type '{type_ref}' has no readable static member named '{member}'")]
    #[diagnostic(code(confbind::resolution::member_not_found))]
    MemberNotFound {
        /// The resolved type reference.
        type_ref: String,

        /// The member name from the accessor directive.
        member: String,
    },

    /// The referenced type exists but was registered without a factory.
    #[error("type '{type_ref}' has no zero-argument constructor")]
    #[diagnostic(
        code(confbind::resolution::no_usable_constructor),
        help("register a factory for the type, or reference one of its static members instead")
    )]
    NoUsableConstructor {
        /// The resolved type reference.
        type_ref: String,
    },

    /// The type's factory was invoked and returned an error.
    #[error("constructing '{type_ref}' failed: {message}")]
    #[diagnostic(code(confbind::resolution::construction))]
    Construction {
        /// The resolved type reference.
        type_ref: String,

        /// Human-readable failure message.
        message: String,

        /// The underlying factory error.
        #[source]
        source: Option<Box<dyn StdError + Send + Sync>>,
    },

    /// A level switch bind saw a string that is not a severity level name.
    #[error("'{value}' is not a recognized severity level")]
    #[diagnostic(
        code(confbind::resolution::invalid_level),
        help("expected one of: Verbose, Debug, Information, Warning, Error, Fatal")
    )]
    InvalidLevel {
        /// The rejected raw string.
        value: String,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// Constructor helpers for ergonomic error creation
// ─────────────────────────────────────────────────────────────────────────────

impl Error {
    /// Creates a Parse error with a standard help message.
    pub fn parse(
        type_name: impl Into<String>,
        value: impl Into<String>,
        help: impl Into<String>,
    ) -> Self {
        Error::Parse {
            type_name: type_name.into(),
            value: value.into(),
            help: help.into(),
        }
    }

    /// Creates a Conversion error without an underlying source.
    pub fn conversion(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let help = format!("expected a valid {type_name}");
        Error::Conversion {
            type_name,
            value: value.into(),
            help,
            source: None,
        }
    }

    /// Creates a Conversion error wrapping the converter's own error.
    pub fn conversion_with_source(
        type_name: impl Into<String>,
        value: impl Into<String>,
        source: Box<dyn StdError + Send + Sync>,
    ) -> Self {
        let type_name = type_name.into();
        let help = format!("expected a valid {type_name}");
        Error::Conversion {
            type_name,
            value: value.into(),
            help,
            source: Some(source),
        }
    }
}

impl ResolutionError {
    /// Creates a Construction error wrapping the factory's error.
    pub fn construction(
        type_ref: impl Into<String>,
        source: Box<dyn StdError + Send + Sync>,
    ) -> Self {
        ResolutionError::Construction {
            type_ref: type_ref.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }
}
