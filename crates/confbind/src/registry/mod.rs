//! Registries the host wires up before resolution begins.
//!
//! Both registries are built once at process start, are immutable
//! afterwards, and are passed by reference into the engine. There is no
//! hidden global state: sharing a single instance across bindings is the
//! host's choice, not the crate's.
//!
//! - [`ConversionRegistry`] - dedicated string parsers for types that need
//!   more than generic conversion (durations, URLs, ...)
//! - [`TypeRegistry`] - the type-and-member registry backing indirect
//!   resolution, standing in for runtime reflection

mod conversion;
mod types;

pub use conversion::ConversionRegistry;
pub use types::{TypeEntry, TypeRegistry};
