//! Integration tests for level switch live rebinding.

use std::sync::Arc;
use std::thread;

use confbind::level;
use confbind::{Level, RawSource, SharedSource};

fn shared(initial: &str) -> (SharedSource, Arc<dyn RawSource>) {
    let source = SharedSource::new(initial);
    let erased: Arc<dyn RawSource> = Arc::new(source.clone());
    (source, erased)
}

#[test]
fn switch_follows_source_across_multiple_changes() {
    let (writer, source) = shared("Verbose");
    let switch = level::bind(&source).unwrap();

    for target in ["Debug", "Information", "Warning", "Error", "Fatal"] {
        writer.set(target);
        assert_eq!(switch.minimum().to_string(), target);
    }
}

#[test]
fn invalid_then_valid_sequence_recovers() {
    let (writer, source) = shared("Information");
    let switch = level::bind(&source).unwrap();

    writer.set("NotALevel");
    assert_eq!(switch.minimum(), Level::Information);

    writer.set("");
    assert_eq!(switch.minimum(), Level::Information);

    writer.set("Error");
    assert_eq!(switch.minimum(), Level::Error);
}

#[test]
fn gating_reflects_live_threshold() {
    let (writer, source) = shared("Warning");
    let switch = level::bind(&source).unwrap();

    assert!(!switch.is_enabled(Level::Debug));

    writer.set("Verbose");
    assert!(switch.is_enabled(Level::Debug));
}

#[test]
fn released_subscription_cancellation_stops_tracking() {
    let (writer, source) = shared("Information");
    let switch = level::bind(&source).unwrap();
    assert!(switch.is_bound());

    // The scope owner takes the capability and releases it at teardown.
    let subscription = switch.release_subscription().unwrap();
    assert!(!switch.is_bound());
    subscription.cancel();

    writer.set("Fatal");
    assert_eq!(switch.minimum(), Level::Information);
    assert_eq!(writer.subscriber_count(), 0);
}

#[test]
fn concurrent_notifications_and_readers() {
    let (writer, source) = shared("Information");
    let switch = level::bind(&source).unwrap();

    let writers: Vec<_> = (0..4)
        .map(|i| {
            let writer = writer.clone();
            thread::spawn(move || {
                let levels = ["Verbose", "Debug", "Information", "Warning"];
                for _ in 0..250 {
                    writer.set(levels[i]);
                }
            })
        })
        .collect();

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let switch = switch.clone();
            thread::spawn(move || {
                for _ in 0..1000 {
                    // Every observed value decodes to a real level; a torn
                    // write would panic the decode or the comparison.
                    let min = switch.minimum();
                    let _ = switch.is_enabled(Level::Error);
                    assert!(min >= Level::Verbose && min <= Level::Fatal);
                }
            })
        })
        .collect();

    for handle in writers {
        handle.join().unwrap();
    }
    for handle in readers {
        handle.join().unwrap();
    }

    // Last-writer-wins: the final value is one of the written levels.
    assert!(matches!(
        switch.minimum(),
        Level::Verbose | Level::Debug | Level::Information | Level::Warning
    ));
}
