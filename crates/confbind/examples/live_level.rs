//! Level switch live rebinding demo.
//!
//! Run with: `cargo run -p confbind --example live_level`

use std::sync::Arc;

use confbind::level;
use confbind::{Level, RawSource, SharedSource};

fn main() -> Result<(), confbind::Error> {
    // The configuration reader owns the source; the engine only borrows it.
    let source = SharedSource::new("Information");
    let erased: Arc<dyn RawSource> = Arc::new(source.clone());

    let switch = level::bind(&erased)?;
    println!("bound at {}", switch.minimum());
    println!("debug enabled? {}", switch.is_enabled(Level::Debug));

    // The reader observes a configuration change and fires its callbacks.
    source.set("Debug");
    println!("after reload: {}", switch.minimum());
    println!("debug enabled? {}", switch.is_enabled(Level::Debug));

    // A bad value never crashes the host: the previous threshold stays and
    // a tracing warning is emitted instead.
    source.set("Shouting");
    println!("after bad reload: {}", switch.minimum());

    // Teardown belongs to the scope owner.
    if let Some(subscription) = switch.release_subscription() {
        subscription.cancel();
    }
    source.set("Fatal");
    println!("after teardown: {}", switch.minimum());

    Ok(())
}
