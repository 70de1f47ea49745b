//! `%VAR%`-style environment variable expansion.
//!
//! Raw values are expanded before any other interpretation: a reference like
//! `%LEVEL%` is replaced by the process environment variable `LEVEL` when it
//! is set. Unresolved references are left as literal text, never an error, so
//! values that merely contain percent signs pass through untouched.

/// Expands `%VAR%` references against the process environment.
///
/// References whose variable is unset (or whose name is empty, as in `%%`)
/// are left literal. A stray closing `%` may begin the next candidate
/// reference, matching the expansion behavior of `100%LEVEL%`-style inputs.
#[must_use]
pub fn expand_env_vars(input: &str) -> String {
    expand_with(input, |name| std::env::var(name).ok())
}

/// Expansion against an arbitrary lookup, for deterministic tests.
pub(crate) fn expand_with<F>(input: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('%') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        match after.find('%') {
            Some(end) if end > 0 => {
                let name = &after[..end];
                if let Some(value) = lookup(name) {
                    out.push_str(&value);
                    rest = &after[end + 1..];
                } else {
                    // Unset variable: keep the opening '%' literal and let the
                    // closing '%' start the next candidate.
                    out.push('%');
                    rest = after;
                }
            }
            _ => {
                // Empty name or no closing '%': literal.
                out.push('%');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}
