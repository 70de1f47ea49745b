//! The static member accessor grammar.
//!
//! An accessor directive references a pre-existing static value by type and
//! member name instead of providing a literal value:
//!
//! ```text
//! MyApp.Levels::Default
//! MyApp.Levels::Default, MyApp
//! ```
//!
//! Grammar: `<typeRef> "::" <memberName> <extraQualifiers>` where `typeRef`
//! is any non-empty run of characters not containing `::`, `memberName` is a
//! letter followed by letters and digits only, and `extraQualifiers` is the
//! remainder of the input. Qualifier text trailing the member name (an
//! assembly-style suffix split across the `::`) is reattached to `typeRef`
//! so the resolver sees a single type-reference string.
//!
//! Parsing never fails hard: input that does not contain exactly one
//! `::`-delimited member segment matching the grammar yields no match, and
//! callers treat the whole string as a plain value or type name.

/// A parsed static member accessor directive.
///
/// Exists only transiently during resolution; never persisted.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessorExpression {
    /// The reconstructed type reference, trailing qualifiers reattached.
    pub type_ref: String,

    /// The member name, trimmed of surrounding whitespace.
    pub member_name: String,
}

impl AccessorExpression {
    /// Attempts to decompose `input` as a static member accessor.
    ///
    /// Returns `None` (not an error) when the grammar does not match.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let expr = AccessorExpression::parse("MyApp.Levels::Default, MyApp").unwrap();
    /// assert_eq!(expr.type_ref, "MyApp.Levels, MyApp");
    /// assert_eq!(expr.member_name, "Default");
    /// ```
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let (type_head, tail) = input.split_once("::")?;

        // Exactly one delimiter, and a non-empty type reference before it.
        if type_head.is_empty() || tail.contains("::") {
            return None;
        }

        if !tail.chars().next()?.is_ascii_alphabetic() {
            return None;
        }

        let member_end = tail
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphanumeric())
            .map_or(tail.len(), |(i, _)| i);

        let member_name = &tail[..member_end];
        let extra_qualifiers = &tail[member_end..];

        let mut type_ref = String::with_capacity(type_head.len() + extra_qualifiers.len());
        type_ref.push_str(type_head);
        type_ref.push_str(extra_qualifiers);

        Some(Self {
            type_ref: type_ref.trim_end().to_string(),
            member_name: member_name.trim().to_string(),
        })
    }
}
