#![no_main]

use confbind::AccessorExpression;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // === Parsing should never panic ===
    let parsed = AccessorExpression::parse(data);

    if let Some(expr) = parsed {
        // === A match always carries a letter-led alphanumeric member ===
        let mut chars = expr.member_name.chars();
        assert!(chars.next().is_some_and(|c| c.is_ascii_alphabetic()));
        assert!(chars.all(|c| c.is_ascii_alphanumeric()));

        // === The type reference never retains trailing whitespace ===
        assert_eq!(expr.type_ref, expr.type_ref.trim_end());

        // === Debug/Clone/Eq should never panic ===
        let cloned = expr.clone();
        let _ = format!("{:?}", cloned);
        assert_eq!(expr, cloned);
    }
});
