//! The value resolution engine.
//!
//! [`Resolver`] orchestrates the conversion strategies in a fixed fallback
//! order to answer "convert this string to this type". The first strategy
//! whose classification matches the target is chosen; later strategies are
//! not attempted once one is chosen, so a failure at the chosen strategy is
//! terminal, never a cascade.
//!
//! # Strategy Order
//!
//! 1. Produce the raw string and expand `%VAR%` references in place
//! 2. Nullable targets: blank input is a typed absence; otherwise unwrap
//!    and continue against the inner type
//! 3. Enumeration targets: member-name match
//! 4. An assignable conversion registry entry
//! 5. Interface/abstract targets with non-blank input: indirect resolution
//!    (an input matching neither the accessor grammar nor a registered type
//!    name falls through rather than failing)
//! 6. The level switch target: delegate to the binder
//! 7. Generic scalar conversion
//!
//! Enum and registry checks precede indirect resolution deliberately: the
//! classifications stay mutually exclusive, so "string that looks like a
//! type name" never competes with "string that is the enum/duration/URL
//! text itself".
//!
//! # Example
//!
//! ```rust,ignore
//! use confbind::{ConversionRegistry, Resolver, ScalarKind, TypeDescriptor, TypeRegistry};
//!
//! let conversions = ConversionRegistry::with_defaults();
//! let types = TypeRegistry::new();
//! let resolver = Resolver::new(&conversions, &types);
//!
//! let port = resolver.resolve_str("8080", &TypeDescriptor::scalar(ScalarKind::UnsignedInteger))?;
//! assert_eq!(port.to_u64(), Some(8080));
//! ```

use std::sync::Arc;

use crate::accessor::AccessorExpression;
use crate::descriptor::{ScalarKind, TypeDescriptor, TypeKind};
use crate::error::{Error, ResolutionError};
use crate::expand::expand_env_vars;
use crate::level;
use crate::registry::{ConversionRegistry, TypeRegistry};
use crate::source::{RawSource, StaticSource};
use crate::value::Value;

/// Outcome of the indirect path: a value, or "this strategy does not apply".
///
/// The two cases must stay distinct from `Err`: an applicable-but-failed
/// indirect resolution is terminal, while a non-applicable one lets the
/// engine fall through to later strategies.
enum Indirect {
    Resolved(Value),
    NotApplicable,
}

/// The resolution engine.
///
/// Holds references to the process-wide registries; cheap to construct per
/// binding request. Resolution runs synchronously on the caller's thread
/// with no internal parallelism.
#[derive(Clone, Copy, Debug)]
pub struct Resolver<'a> {
    conversions: &'a ConversionRegistry,
    types: &'a TypeRegistry,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over the host's registries.
    #[must_use]
    pub fn new(conversions: &'a ConversionRegistry, types: &'a TypeRegistry) -> Self {
        Self { conversions, types }
    }

    /// Resolves the source's current value against `target`.
    ///
    /// # Errors
    ///
    /// Returns the chosen strategy's failure: [`Error::Parse`] for enum
    /// member mismatches, [`Error::Conversion`] for converter rejections,
    /// [`Error::Resolution`] for indirect and level-bind failures.
    pub fn resolve(
        &self,
        source: &Arc<dyn RawSource>,
        target: &TypeDescriptor,
    ) -> Result<Value, Error> {
        let expanded = expand_env_vars(&source.produce());
        self.resolve_expanded(source, &expanded, target)
    }

    /// Resolves a bare string against `target`.
    ///
    /// Convenience over [`resolve`](Resolver::resolve) wrapping the string
    /// in a [`StaticSource`]; a level switch bound this way stays Unbound.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`resolve`](Resolver::resolve).
    pub fn resolve_str(&self, raw: &str, target: &TypeDescriptor) -> Result<Value, Error> {
        let source: Arc<dyn RawSource> = Arc::new(StaticSource::new(raw));
        self.resolve(&source, target)
    }

    fn resolve_expanded(
        &self,
        source: &Arc<dyn RawSource>,
        raw: &str,
        target: &TypeDescriptor,
    ) -> Result<Value, Error> {
        if let TypeKind::Nullable(inner) = target.kind() {
            if raw.trim().is_empty() {
                return Ok(Value::None);
            }
            return self.resolve_expanded(source, raw, inner);
        }

        if let TypeKind::Enumeration(descriptor) = target.kind() {
            return match descriptor.match_member(raw.trim()) {
                Some(member) => Ok(Value::Enum {
                    type_name: descriptor.name().to_string(),
                    member: member.to_string(),
                }),

                None => Err(Error::parse(
                    descriptor.name(),
                    raw,
                    format!("expected one of: {}", descriptor.members().join(", ")),
                )),
            };
        }

        if let Some(parser) = self.conversions.lookup(target) {
            return parser(raw)
                .map_err(|cause| Error::conversion_with_source(target.name(), raw, cause));
        }

        if target.is_indirect_eligible() && !raw.trim().is_empty() {
            match self.resolve_indirect(raw)? {
                Indirect::Resolved(value) => return Ok(value),

                Indirect::NotApplicable => {}
            }
        }

        if matches!(target.kind(), TypeKind::LevelSwitch) {
            return level::bind_expanded(source, raw).map(Value::Switch);
        }

        convert_scalar(raw, target)
    }

    /// The indirect resolution path, for interface/abstract targets only.
    ///
    /// An accessor-grammar match commits to member lookup: an unresolvable
    /// type or missing member is a fatal misconfiguration, never a silent
    /// fallback to type-name resolution for the same input.
    fn resolve_indirect(&self, raw: &str) -> Result<Indirect, Error> {
        if let Some(expr) = AccessorExpression::parse(raw) {
            let entry =
                self.types
                    .lookup(&expr.type_ref)
                    .ok_or_else(|| ResolutionError::TypeNotFound {
                        type_ref: expr.type_ref.clone(),
                    })?;

            let value =
                entry
                    .read_member(&expr.member_name)
                    .ok_or(ResolutionError::MemberNotFound {
                        type_ref: expr.type_ref,
                        member: expr.member_name,
                    })?;

            return Ok(Indirect::Resolved(value));
        }

        let type_ref = raw.trim();
        if let Some(entry) = self.types.lookup(type_ref) {
            let factory = entry
                .factory()
                .ok_or_else(|| ResolutionError::NoUsableConstructor {
                    type_ref: type_ref.to_string(),
                })?;

            let value =
                factory().map_err(|cause| ResolutionError::construction(type_ref, cause))?;

            return Ok(Indirect::Resolved(value));
        }

        Ok(Indirect::NotApplicable)
    }
}

/// Generic primitive conversion: the last strategy in the chain.
fn convert_scalar(raw: &str, target: &TypeDescriptor) -> Result<Value, Error> {
    let TypeKind::Scalar(kind) = target.kind() else {
        // Opaque targets, and abstract targets the indirect path fell
        // through for, have no generic conversion path from a string.
        return Err(Error::conversion(target.name(), raw));
    };

    match kind {
        ScalarKind::Bool => match raw.trim().to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(Error::conversion("bool", raw)),
        },

        ScalarKind::Integer => raw
            .trim()
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| Error::conversion_with_source("i64", raw, Box::new(e))),

        ScalarKind::UnsignedInteger => raw
            .trim()
            .parse::<u64>()
            .map(Value::UnsignedInteger)
            .map_err(|e| Error::conversion_with_source("u64", raw, Box::new(e))),

        ScalarKind::Float => raw
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|e| Error::conversion_with_source("f64", raw, Box::new(e))),

        ScalarKind::Str => Ok(Value::Str(raw.to_string())),
    }
}
