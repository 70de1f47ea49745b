//! The type-and-member registry backing indirect resolution.
//!
//! The original design resolved accessor directives through host-runtime
//! reflection. This crate has none, so the hosting environment pre-registers
//! every resolvable type reference as a [`TypeEntry`]: an optional
//! zero-argument factory plus the type's readable static members. The
//! registry maps reference strings verbatim; a host expecting both
//! `"App.Levels"` and `"App.Levels, App"` registers the entry under both
//! names.
//!
//! # Example
//!
//! ```rust,ignore
//! use confbind::{TypeEntry, TypeRegistry, Value};
//!
//! let registry = TypeRegistry::new()
//!     .register(
//!         "App.ConsoleSink",
//!         TypeEntry::new().with_factory(|| Ok(Value::instance(ConsoleSink::default()))),
//!     )
//!     .register(
//!         "App.Levels",
//!         TypeEntry::new().with_field("Default", Value::Str("Information".into())),
//!     );
//! ```

use std::collections::HashMap;

use crate::Value;
use crate::error::BoxError;

/// A registered zero-argument-equivalent constructor.
pub type FactoryFn = Box<dyn Fn() -> Result<Value, BoxError> + Send + Sync>;

/// A registered readable static property getter.
pub type PropertyFn = Box<dyn Fn() -> Value + Send + Sync>;

/// One resolvable type: its factory and static members.
///
/// Properties model computed getters and are searched before fields, which
/// hold stored values; the two-tier search order of the original member
/// lookup is preserved.
#[derive(Default)]
pub struct TypeEntry {
    factory: Option<FactoryFn>,
    properties: HashMap<String, PropertyFn>,
    fields: HashMap<String, Value>,
}

impl TypeEntry {
    /// Creates an entry with no factory and no members.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the type's constructor.
    ///
    /// The closure stands in for a constructor whose parameters are zero in
    /// number or all defaultable; defaults are captured at registration.
    /// A fallible factory maps construction failures into
    /// [`ResolutionError::Construction`](crate::ResolutionError::Construction).
    #[must_use]
    pub fn with_factory<F>(mut self, factory: F) -> Self
    where
        F: Fn() -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.factory = Some(Box::new(factory));
        self
    }

    /// Registers a readable static property.
    #[must_use]
    pub fn with_property<F>(mut self, name: impl Into<String>, getter: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.properties.insert(name.into(), Box::new(getter));
        self
    }

    /// Registers a static field holding a stored value.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Reads the member's current value: properties first, then fields.
    #[must_use]
    pub fn read_member(&self, name: &str) -> Option<Value> {
        if let Some(getter) = self.properties.get(name) {
            return Some(getter());
        }

        self.fields.get(name).cloned()
    }

    /// The registered factory, if the type is constructible.
    #[must_use]
    pub fn factory(&self) -> Option<&FactoryFn> {
        self.factory.as_ref()
    }
}

impl std::fmt::Debug for TypeEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeEntry")
            .field("constructible", &self.factory.is_some())
            .field("properties", &self.properties.keys().collect::<Vec<_>>())
            .field("fields", &self.fields.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Maps type-reference strings to registered entries.
///
/// Built once through the consuming `register` calls, then read-only and
/// shared by reference into the engine.
#[derive(Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeEntry>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entry` under the reference string `type_ref`.
    #[must_use]
    pub fn register(mut self, type_ref: impl Into<String>, entry: TypeEntry) -> Self {
        self.types.insert(type_ref.into(), entry);
        self
    }

    /// Looks up a type by its reference string, verbatim.
    #[must_use]
    pub fn lookup(&self, type_ref: &str) -> Option<&TypeEntry> {
        self.types.get(type_ref)
    }

    /// Whether `type_ref` is registered.
    #[must_use]
    pub fn contains(&self, type_ref: &str) -> bool {
        self.types.contains_key(type_ref)
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the registry holds no types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish()
    }
}
