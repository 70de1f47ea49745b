#![no_main]

use confbind::expand_env_vars;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Expansion should never panic ===
    let expanded = expand_env_vars(data);

    // === Inputs without references pass through byte-identical ===
    if !data.contains('%') {
        assert_eq!(expanded, data);
    }

    // === Expansion is stable for reference-free output ===
    if !expanded.contains('%') {
        assert_eq!(expand_env_vars(&expanded), expanded);
    }
});
