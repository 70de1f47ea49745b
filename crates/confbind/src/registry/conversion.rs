//! Registered string-to-value conversions.
//!
//! A conversion entry maps a target type name to a dedicated parser, used
//! for types whose textual form needs custom parsing beyond the generic
//! scalar path. Lookup honors assignability: an entry registered under a
//! supertype name applies to any target that lists that name among its
//! [`supertypes`](crate::TypeDescriptor::supertypes), so an interface-wide
//! registration covers every subtype bound through it.

use std::time::Duration;

use url::Url;

use crate::Value;
use crate::descriptor::TypeDescriptor;
use crate::error::BoxError;

/// A registered conversion parser.
pub type ConversionFn = Box<dyn Fn(&str) -> Result<Value, BoxError> + Send + Sync>;

/// Extensible mapping from target type names to dedicated parsers.
///
/// Built once at initialization through the consuming `register` calls,
/// then read-only. Entries are consulted in registration order; the first
/// assignable entry wins.
///
/// # Example
///
/// ```rust,ignore
/// use confbind::{ConversionRegistry, Value};
///
/// let registry = ConversionRegistry::with_defaults()
///     .register("IpAddr", |text| {
///         let addr: std::net::IpAddr = text.trim().parse()?;
///         Ok(Value::instance(addr))
///     });
/// ```
pub struct ConversionRegistry {
    entries: Vec<(String, ConversionFn)>,
}

impl ConversionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Creates a registry pre-loaded with the stock conversions:
    /// `Duration` (suffix grammar `ms`/`s`/`m`/`h`, bare seconds) and
    /// `Url`.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new()
            .register("Duration", |text| {
                parse_duration(text).map(Value::instance)
            })
            .register("Url", |text| {
                let url = Url::parse(text.trim())?;
                Ok(Value::instance(url))
            })
    }

    /// Registers a parser for `type_name`.
    #[must_use]
    pub fn register<F>(mut self, type_name: impl Into<String>, parser: F) -> Self
    where
        F: Fn(&str) -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.entries.push((type_name.into(), Box::new(parser)));
        self
    }

    /// Finds the first entry assignable to `target`.
    ///
    /// An entry matches when its registered name equals the target's own
    /// name or one of the target's declared supertypes.
    #[must_use]
    pub fn lookup(&self, target: &TypeDescriptor) -> Option<&ConversionFn> {
        self.entries
            .iter()
            .find(|(name, _)| {
                name == target.name() || target.supertypes().iter().any(|s| s == name)
            })
            .map(|(_, parser)| parser)
    }

    /// Number of registered entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ConversionRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl std::fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("entries", &self.entries.iter().map(|(n, _)| n).collect::<Vec<_>>())
            .finish()
    }
}

/// Parses the duration grammar: an optional fractional number followed by
/// `ms`, `s`, `m`, or `h`; a bare number means seconds.
fn parse_duration(text: &str) -> Result<Duration, BoxError> {
    let text = text.trim();
    let split = text
        .char_indices()
        .find(|(_, c)| c.is_ascii_alphabetic())
        .map_or(text.len(), |(i, _)| i);

    let (number, unit) = text.split_at(split);
    let number: f64 = number.trim_end().parse()?;
    if number < 0.0 {
        return Err("durations cannot be negative".into());
    }

    let seconds = match unit {
        "ms" => number / 1000.0,
        "" | "s" => number,
        "m" => number * 60.0,
        "h" => number * 3600.0,
        other => return Err(format!("unknown duration unit '{other}'").into()),
    };

    Ok(Duration::from_secs_f64(seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ScalarKind;

    #[test]
    fn test_duration_grammar() {
        assert_eq!(parse_duration("10s").unwrap(), Duration::from_secs(10));
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("1.5").unwrap(), Duration::from_millis(1500));
        assert!(parse_duration("-3s").is_err());
        assert!(parse_duration("10 parsecs").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn test_lookup_by_exact_name() {
        let registry = ConversionRegistry::with_defaults();
        let target = TypeDescriptor::concrete("Duration");

        let parser = registry.lookup(&target).unwrap();
        let value = parser("30s").unwrap();
        assert_eq!(
            value.downcast_ref::<Duration>(),
            Some(&Duration::from_secs(30))
        );
    }

    #[test]
    fn test_lookup_by_supertype() {
        let registry = ConversionRegistry::new().register("App.ICredential", |text| {
            Ok(Value::Str(text.to_uppercase()))
        });

        let target = TypeDescriptor::concrete("App.TokenCredential")
            .assignable_to("App.ICredential");
        assert!(registry.lookup(&target).is_some());

        let unrelated = TypeDescriptor::concrete("App.TokenCredential");
        assert!(registry.lookup(&unrelated).is_none());
    }

    #[test]
    fn test_lookup_misses_unregistered_target() {
        let registry = ConversionRegistry::with_defaults();
        assert!(registry.lookup(&TypeDescriptor::scalar(ScalarKind::Bool)).is_none());
    }

    #[test]
    fn test_url_entry() {
        let registry = ConversionRegistry::with_defaults();
        let target = TypeDescriptor::concrete("Url");

        let parser = registry.lookup(&target).unwrap();
        let value = parser("https://example.org/metrics").unwrap();
        assert_eq!(
            value.downcast_ref::<Url>().map(Url::as_str),
            Some("https://example.org/metrics")
        );
        assert!(parser("not a url").is_err());
    }
}
