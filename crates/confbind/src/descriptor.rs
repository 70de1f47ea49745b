//! Target type descriptors and classification.
//!
//! Rust has no runtime reflection, so the binding layer describes each target
//! type explicitly: a [`TypeDescriptor`] pairs a name with a [`TypeKind`]
//! classification that drives the engine's strategy dispatch. Descriptors are
//! immutable once built; each constructor is one classification.
//!
//! # Classifications
//!
//! | Kind | Meaning |
//! |------|---------|
//! | `Nullable` | Option-like wrapper; a blank raw string yields a typed absence |
//! | `Enumeration` | Closed set of declared member names |
//! | `Abstract` | Interface/trait-object target, eligible for indirect resolution |
//! | `Concrete` | Named constructible host type |
//! | `LevelSwitch` | The runtime-adjustable severity threshold |
//! | `Scalar` | Primitive with a generic string conversion path |
//! | `Opaque` | No structural information; generic conversion will reject it |

use std::fmt::{self, Display, Formatter};

/// Declared members of an enumeration target.
#[derive(Clone, Debug)]
pub struct EnumDescriptor {
    name: String,
    members: Vec<String>,
}

impl EnumDescriptor {
    /// Describes an enumeration by name and declared member names.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// The enumeration's type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared member names, in declaration order.
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Matches `text` against the declared members.
    ///
    /// Exact case-sensitive matches win; otherwise the first case-insensitive
    /// match is taken. The returned name carries the declared casing, so
    /// formatting a matched member and parsing it back round-trips.
    #[must_use]
    pub fn match_member(&self, text: &str) -> Option<&str> {
        self.members
            .iter()
            .find(|member| *member == text)
            .or_else(|| {
                self.members
                    .iter()
                    .find(|member| member.eq_ignore_ascii_case(text))
            })
            .map(String::as_str)
    }
}

/// Primitive scalar classification for generic conversion.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ScalarKind {
    /// `true` / `false`.
    Bool,

    /// Signed integer (i64 representation).
    Integer,

    /// Unsigned integer (u64 representation).
    UnsignedInteger,

    /// Floating point (f64 representation).
    Float,

    /// Pass-through string.
    Str,
}

impl ScalarKind {
    /// The conventional Rust name for this scalar kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Integer => "i64",
            ScalarKind::UnsignedInteger => "u64",
            ScalarKind::Float => "f64",
            ScalarKind::Str => "String",
        }
    }
}

/// Structural classification of a target type.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum TypeKind {
    /// Option-like wrapper around an inner target.
    Nullable(Box<TypeDescriptor>),

    /// Closed set of named members.
    Enumeration(EnumDescriptor),

    /// Interface/trait-object target; indirection-eligible.
    Abstract,

    /// Named constructible host type.
    Concrete,

    /// The runtime-adjustable severity threshold.
    LevelSwitch,

    /// Primitive with a generic conversion path from strings.
    Scalar(ScalarKind),

    /// No structural information; generic conversion has no path.
    Opaque,
}

/// Opaque handle to a target type plus its derived classification.
///
/// # Example
///
/// ```rust,ignore
/// use confbind::{EnumDescriptor, ScalarKind, TypeDescriptor};
///
/// let port = TypeDescriptor::scalar(ScalarKind::UnsignedInteger);
/// let theme = TypeDescriptor::enumeration(
///     EnumDescriptor::new("Theme", ["Light", "Dark"]),
/// );
/// let formatter = TypeDescriptor::interface("App.ITextFormatter");
/// let timeout = TypeDescriptor::concrete("Duration")
///     .assignable_to("core.FromStr");
/// ```
#[derive(Clone, Debug)]
pub struct TypeDescriptor {
    name: String,
    kind: TypeKind,
    supertypes: Vec<String>,
}

impl TypeDescriptor {
    fn with_kind(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertypes: Vec::new(),
        }
    }

    /// A primitive scalar target.
    #[must_use]
    pub fn scalar(kind: ScalarKind) -> Self {
        Self::with_kind(kind.name(), TypeKind::Scalar(kind))
    }

    /// An enumeration target.
    #[must_use]
    pub fn enumeration(descriptor: EnumDescriptor) -> Self {
        Self::with_kind(descriptor.name().to_string(), TypeKind::Enumeration(descriptor))
    }

    /// An interface/abstract target, eligible for indirect resolution.
    #[must_use]
    pub fn interface(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Abstract)
    }

    /// A concrete constructible target.
    #[must_use]
    pub fn concrete(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Concrete)
    }

    /// The level switch target.
    #[must_use]
    pub fn level_switch() -> Self {
        Self::with_kind("LevelSwitch", TypeKind::LevelSwitch)
    }

    /// A target with no structural information.
    #[must_use]
    pub fn opaque(name: impl Into<String>) -> Self {
        Self::with_kind(name, TypeKind::Opaque)
    }

    /// Wraps this descriptor as a nullable target.
    #[must_use]
    pub fn nullable(self) -> Self {
        let name = format!("Option<{}>", self.name);
        Self::with_kind(name, TypeKind::Nullable(Box::new(self)))
    }

    /// Records an abstract type name this target is assignable to.
    ///
    /// A conversion registered under a supertype name applies to every
    /// target that lists it here.
    #[must_use]
    pub fn assignable_to(mut self, supertype: impl Into<String>) -> Self {
        self.supertypes.push(supertype.into());
        self
    }

    /// The target's type name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The derived classification.
    #[must_use]
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Names of abstract types this target is assignable to.
    #[must_use]
    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    /// Whether the indirect resolution path applies to this target.
    #[must_use]
    pub const fn is_indirect_eligible(&self) -> bool {
        matches!(self.kind, TypeKind::Abstract)
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_member_matching() {
        let desc = EnumDescriptor::new("Theme", ["Light", "Dark"]);

        assert_eq!(desc.match_member("Dark"), Some("Dark"));
        assert_eq!(desc.match_member("dark"), Some("Dark"));
        assert_eq!(desc.match_member("DARK"), Some("Dark"));
        assert_eq!(desc.match_member("Dim"), None);
    }

    #[test]
    fn test_case_sensitive_match_wins() {
        // Pathological but legal: members differing only by case.
        let desc = EnumDescriptor::new("Weird", ["value", "Value"]);
        assert_eq!(desc.match_member("Value"), Some("Value"));
        assert_eq!(desc.match_member("value"), Some("value"));
    }

    #[test]
    fn test_nullable_wraps_inner() {
        let desc = TypeDescriptor::scalar(ScalarKind::UnsignedInteger).nullable();
        assert_eq!(desc.name(), "Option<u64>");
        match desc.kind() {
            TypeKind::Nullable(inner) => assert_eq!(inner.name(), "u64"),
            other => panic!("expected Nullable, got {other:?}"),
        }
    }

    #[test]
    fn test_indirect_eligibility() {
        assert!(TypeDescriptor::interface("App.ISink").is_indirect_eligible());
        assert!(!TypeDescriptor::concrete("App.Sink").is_indirect_eligible());
        assert!(!TypeDescriptor::level_switch().is_indirect_eligible());
        assert!(!TypeDescriptor::scalar(ScalarKind::Bool).is_indirect_eligible());
    }

    #[test]
    fn test_supertypes_recorded() {
        let desc = TypeDescriptor::concrete("App.JsonFormatter")
            .assignable_to("App.ITextFormatter");
        assert_eq!(desc.supertypes(), ["App.ITextFormatter"]);
    }
}
