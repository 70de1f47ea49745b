//! Walk-through of the resolution strategy chain.
//!
//! Run with: `cargo run -p confbind --example basic`

use std::time::Duration;

use confbind::{
    ConversionRegistry, Level, Resolver, ScalarKind, TypeDescriptor, TypeEntry, TypeRegistry,
    Value,
};

#[derive(Debug)]
struct ConsoleSink {
    template: &'static str,
}

fn main() -> Result<(), confbind::Error> {
    // Registries are wired once at process start and shared by reference.
    let conversions = ConversionRegistry::with_defaults();
    let types = TypeRegistry::new()
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
            TypeEntry::new().with_field("Default", Value::Str("Warning".into())),
        );

    let resolver = Resolver::new(&conversions, &types);

    // Generic scalar conversion.
    let port = resolver.resolve_str("8080", &TypeDescriptor::scalar(ScalarKind::UnsignedInteger))?;
    println!("port        = {:?}", port.to_u64());

    // Nullable target: blank input is a typed absence, not an error.
    let retries = resolver
        .resolve_str("", &TypeDescriptor::scalar(ScalarKind::UnsignedInteger).nullable())?;
    println!("retries     = {:?} (none: {})", retries, retries.is_none());

    // Enumeration member matching, case-insensitive.
    let min_level =
        resolver.resolve_str("warning", &TypeDescriptor::enumeration(Level::enum_descriptor()))?;
    println!("min_level   = {:?}", min_level.enum_member());

    // A registered conversion.
    let timeout = resolver.resolve_str("2.5s", &TypeDescriptor::concrete("Duration"))?;
    println!("timeout     = {:?}", timeout.downcast_ref::<Duration>());

    // Indirect resolution: construct by type name...
    let sink = resolver.resolve_str("App.ConsoleSink", &TypeDescriptor::interface("App.ISink"))?;
    println!("sink        = {:?}", sink.downcast_ref::<ConsoleSink>());

    // ...or read a static member through an accessor directive.
    let default_level =
        resolver.resolve_str("App.Levels::Default", &TypeDescriptor::interface("App.ILevel"))?;
    println!("level ref   = {:?}", default_level.as_str());

    // Failures carry miette diagnostics.
    let err = resolver
        .resolve_str("App.Missing::Default", &TypeDescriptor::interface("App.ISink"))
        .unwrap_err();
    println!("\nfailure rendered by miette:\n{:?}", miette::Report::from(err));

    Ok(())
}
