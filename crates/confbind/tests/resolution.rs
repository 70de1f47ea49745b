//! End-to-end tests for the resolution strategy chain.

use std::sync::Arc;
use std::time::Duration;

use serial_test::serial;

use confbind::{
    ConversionRegistry, EnumDescriptor, Error, Level, RawSource, ResolutionError, Resolver,
    ScalarKind, StaticSource, TypeDescriptor, TypeEntry, TypeRegistry, Value,
};

// ============================================================================
// Fixture: a host wiring comparable to a real binding layer
// ============================================================================

/// A console sink stand-in the type registry constructs.
#[derive(Debug, PartialEq)]
struct ConsoleSink {
    template: &'static str,
}

fn host_types() -> TypeRegistry {
    TypeRegistry::new()
        .register(
            "App.ConsoleSink",
            TypeEntry::new().with_factory(|| {
                Ok(Value::instance(ConsoleSink {
                    template: "[{level}] {message}",
                }))
            }),
        )
        .register(
            "App.Levels",
            TypeEntry::new()
                .with_property("Floor", || Value::Str(Level::Information.to_string()))
                .with_field("Default", Value::Str("Warning".into())),
        )
        // The same entry under its assembly-qualified spelling.
        .register(
            "App.Levels, App",
            TypeEntry::new().with_field("Default", Value::Str("Warning".into())),
        )
}

fn resolve(
    conversions: &ConversionRegistry,
    types: &TypeRegistry,
    raw: &str,
    target: &TypeDescriptor,
) -> Result<Value, Error> {
    Resolver::new(conversions, types).resolve_str(raw, target)
}

// ============================================================================
// Strategy chain
// ============================================================================

#[test]
fn resolves_registered_duration_conversion() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();

    let value = resolve(
        &conversions,
        &types,
        "90s",
        &TypeDescriptor::concrete("Duration"),
    )
    .unwrap();
    assert_eq!(
        value.downcast_ref::<Duration>(),
        Some(&Duration::from_secs(90))
    );
}

#[test]
fn registered_conversion_wins_over_indirect_resolution() {
    // The target is abstract and the input is a registered type name, but a
    // conversion entry registered for the interface is consulted first and wins.
    let conversions = ConversionRegistry::new()
        .register("App.ISink", |text| Ok(Value::Str(format!("parsed:{text}"))));
    let types = host_types();

    let target = TypeDescriptor::interface("App.ISink");
    let value = resolve(&conversions, &types, "App.ConsoleSink", &target).unwrap();
    assert_eq!(value.as_str(), Some("parsed:App.ConsoleSink"));
}

#[test]
fn accessor_directive_reads_static_property() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();

    let value = resolve(
        &conversions,
        &types,
        "App.Levels::Floor",
        &TypeDescriptor::interface("App.ILevelSource"),
    )
    .unwrap();
    assert_eq!(value.as_str(), Some("Information"));
}

#[test]
fn accessor_directive_with_assembly_qualifier() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();

    // "App.Levels::Default, App" reconstructs to type ref "App.Levels, App".
    let value = resolve(
        &conversions,
        &types,
        "App.Levels::Default, App",
        &TypeDescriptor::interface("App.ILevelSource"),
    )
    .unwrap();
    assert_eq!(value.as_str(), Some("Warning"));
}

#[test]
fn bare_type_name_constructs_instance() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();

    let value = resolve(
        &conversions,
        &types,
        "App.ConsoleSink",
        &TypeDescriptor::interface("App.ISink"),
    )
    .unwrap();
    assert_eq!(
        value.downcast_ref::<ConsoleSink>(),
        Some(&ConsoleSink {
            template: "[{level}] {message}",
        })
    );
}

#[test]
fn plain_text_on_abstract_target_is_conversion_error_not_resolution_error() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();

    let err = resolve(
        &conversions,
        &types,
        "neither accessor nor type name",
        &TypeDescriptor::interface("App.ISink"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::Conversion { .. }));
}

#[test]
fn nullable_enumeration_chain() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();
    let target = TypeDescriptor::enumeration(Level::enum_descriptor()).nullable();

    assert!(resolve(&conversions, &types, "", &target).unwrap().is_none());

    let value = resolve(&conversions, &types, "fatal", &target).unwrap();
    assert_eq!(value.enum_member(), Some("Fatal"));
}

#[test]
fn enumeration_failure_names_the_members() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();
    let target = TypeDescriptor::enumeration(EnumDescriptor::new("Theme", ["Light", "Dark"]));

    let err = resolve(&conversions, &types, "Dim", &target).unwrap_err();
    let rendered = format!("{:?}", miette::Report::from(err));
    assert!(rendered.contains("Light"));
    assert!(rendered.contains("Dark"));
}

#[test]
fn accessor_grammar_failure_on_strict_target_is_fatal() {
    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();

    // An accessor that parses but references an unregistered type must not
    // be retried as plain text.
    let err = resolve(
        &conversions,
        &types,
        "App.Gone::Default",
        &TypeDescriptor::interface("App.ISink"),
    )
    .unwrap_err();
    assert!(matches!(
        err,
        Error::Resolution {
            source: ResolutionError::TypeNotFound { .. }
        }
    ));
}

// ============================================================================
// Environment expansion
// ============================================================================

#[test]
#[serial]
fn env_expansion_happens_before_interpretation() {
    unsafe {
        std::env::set_var("CONFBIND_TEST_LEVEL", "Warning");
    }

    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();
    let target = TypeDescriptor::enumeration(Level::enum_descriptor());

    let value = resolve(&conversions, &types, "%CONFBIND_TEST_LEVEL%", &target).unwrap();
    assert_eq!(value.enum_member(), Some("Warning"));

    unsafe {
        std::env::remove_var("CONFBIND_TEST_LEVEL");
    }
}

#[test]
#[serial]
fn unresolved_env_reference_stays_literal() {
    unsafe {
        std::env::remove_var("CONFBIND_TEST_UNSET");
    }

    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();
    let target = TypeDescriptor::scalar(ScalarKind::Str);

    let value = resolve(&conversions, &types, "%CONFBIND_TEST_UNSET%", &target).unwrap();
    assert_eq!(value.as_str(), Some("%CONFBIND_TEST_UNSET%"));
}

#[test]
#[serial]
fn env_expansion_applies_to_scalar_targets() {
    unsafe {
        std::env::set_var("CONFBIND_TEST_PORT", "8080");
    }

    let conversions = ConversionRegistry::with_defaults();
    let types = host_types();
    let target = TypeDescriptor::scalar(ScalarKind::UnsignedInteger);

    let value = resolve(&conversions, &types, "%CONFBIND_TEST_PORT%", &target).unwrap();
    assert_eq!(value.to_u64(), Some(8080));

    unsafe {
        std::env::remove_var("CONFBIND_TEST_PORT");
    }
}

// ============================================================================
// Source contract
// ============================================================================

#[test]
fn produce_is_called_once_per_resolution() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
    }

    impl RawSource for CountingSource {
        fn produce(&self) -> String {
            self.calls.fetch_add(1, Ordering::SeqCst);
            "42".to_string()
        }
    }

    let calls = Arc::new(AtomicUsize::new(0));
    let source: Arc<dyn RawSource> = Arc::new(CountingSource {
        calls: calls.clone(),
    });

    let conversions = ConversionRegistry::new();
    let types = TypeRegistry::new();
    let resolver = Resolver::new(&conversions, &types);

    let value = resolver
        .resolve(&source, &TypeDescriptor::scalar(ScalarKind::UnsignedInteger))
        .unwrap();
    assert_eq!(value.to_u64(), Some(42));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn static_source_level_switch_is_unbound() {
    let conversions = ConversionRegistry::new();
    let types = TypeRegistry::new();
    let resolver = Resolver::new(&conversions, &types);

    let source: Arc<dyn RawSource> = Arc::new(StaticSource::new("Debug"));
    let value = resolver
        .resolve(&source, &TypeDescriptor::level_switch())
        .unwrap();

    let switch = value.as_switch().unwrap();
    assert_eq!(switch.minimum(), Level::Debug);
    assert!(!switch.is_bound());
}
