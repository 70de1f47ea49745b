#![no_main]

use confbind::Level;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Parsing should never panic ===
    match data.parse::<Level>() {
        Ok(level) => {
            // === A successful parse round-trips through its declared name ===
            assert_eq!(level.as_str().parse::<Level>().ok(), Some(level));
            assert!(level.as_str().eq_ignore_ascii_case(data));
        }
        Err(err) => {
            // === Errors echo the rejected input ===
            assert!(err.to_string().contains(&err.value));
        }
    }
});
