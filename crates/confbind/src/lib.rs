//! # confbind
//!
//! The conversion/resolution engine of a declarative configuration-binding
//! layer: callers hand it a string-producing source and a target type
//! descriptor, and the engine decides how to interpret the string — as a
//! primitive, an enumeration member, a live severity threshold, or as a
//! directive referencing some other value indirectly by name.
//!
//! ## What confbind Does
//!
//! - **Fixed-order strategy dispatch** - nullable unwrap, enum matching,
//!   registered conversions, indirect resolution, level switch binding, and
//!   generic scalar conversion, tried in a fixed order where the first
//!   applicable strategy is committed to
//! - **Accessor directives** - `MyApp.Levels::Default, MyApp` addresses a
//!   pre-existing static value by type and member name
//! - **Live-rebinding level switches** - a severity threshold that follows
//!   its configuration source across time without ever throwing across the
//!   notification boundary
//! - **Environment expansion** - `%VAR%` references are expanded before any
//!   other interpretation; unresolved references stay literal
//! - **Rich diagnostics** - every failure carries a [`miette`] code, help
//!   text, and the underlying cause
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use confbind::{
//!     ConversionRegistry, Resolver, ScalarKind, TypeDescriptor, TypeEntry, TypeRegistry, Value,
//! };
//!
//! // Wired once at process start, immutable afterwards.
//! let conversions = ConversionRegistry::with_defaults();
//! let types = TypeRegistry::new().register(
//!     "App.ConsoleSink",
//!     TypeEntry::new().with_factory(|| Ok(Value::instance(ConsoleSink::default()))),
//! );
//!
//! let resolver = Resolver::new(&conversions, &types);
//!
//! let port = resolver.resolve_str("8080", &TypeDescriptor::scalar(ScalarKind::UnsignedInteger))?;
//! let sink = resolver.resolve_str("App.ConsoleSink", &TypeDescriptor::interface("App.ISink"))?;
//! ```
//!
//! ## Live Level Switches
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use confbind::{Level, RawSource, SharedSource, level};
//!
//! let source = SharedSource::new("Information");
//! let erased: Arc<dyn RawSource> = Arc::new(source.clone());
//!
//! let switch = level::bind(&erased)?;
//! assert_eq!(switch.minimum(), Level::Information);
//!
//! // The host's configuration reader fires a change...
//! source.set("Warning");
//! assert_eq!(switch.minimum(), Level::Warning);
//!
//! // ...and an invalid value keeps the previous threshold instead of
//! // crashing the hosting process.
//! source.set("NotALevel");
//! assert_eq!(switch.minimum(), Level::Warning);
//! ```
//!
//! ## Scope
//!
//! The broader configuration tree reader, DI wiring, and sink registration
//! are external collaborators: they supply the [`RawSource`] and the
//! [`TypeDescriptor`], and consume the produced [`Value`] or error. This
//! crate performs no network or disk I/O of its own. It is not a general
//! reflection framework: indirect references are single-step (named-member
//! lookup or default construction through the [`TypeRegistry`]), never
//! arbitrary object graphs.

pub mod accessor;
pub mod descriptor;
pub mod error;
pub mod expand;
pub mod level;
pub mod registry;
mod resolve;
pub mod source;
mod value;

pub use accessor::AccessorExpression;
pub use descriptor::{EnumDescriptor, ScalarKind, TypeDescriptor, TypeKind};
pub use error::{BoxError, Error, ResolutionError};
pub use expand::expand_env_vars;
pub use level::{Level, LevelSwitch};
pub use registry::{ConversionRegistry, TypeEntry, TypeRegistry};
pub use resolve::Resolver;
pub use source::{RawSource, SharedSource, StaticSource, Subscription};
pub use value::Value;
