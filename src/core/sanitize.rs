//! Name transform: fold an arbitrary Unicode name into a portable ASCII token.
//!
//! The folding policy is fixed:
//! 1. NFKD-decompose so accented characters split into base + combining mark
//! 2. Drop everything that is not ASCII (marks, non-Latin scripts, symbols)
//! 3. Lowercase
//! 4. Replace each run of characters outside `[a-z0-9.]` with one hyphen
//! 5. Trim leading and trailing hyphens
//!
//! The result only ever contains `[a-z0-9.-]`, never starts or ends with a
//! hyphen and never contains `--`.

use unicode_normalization::UnicodeNormalization;

/// Sanitize a single file or folder name (no path separators).
///
/// Lossy by design: input with no ASCII-representable characters yields an
/// empty string, which callers must treat as unusable (see [`is_valid_name`]).
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_was_dash = false;

    for ch in name.nfkd().filter(char::is_ascii) {
        let ch = ch.to_ascii_lowercase();
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '.' {
            out.push(ch);
            prev_was_dash = false;
        } else {
            // Everything else, including literal hyphens, folds into one separator
            if out.is_empty() || prev_was_dash {
                continue;
            }
            out.push('-');
            prev_was_dash = true;
        }
    }

    while out.ends_with('-') {
        out.pop();
    }

    out
}

/// Whether `name` is already in sanitized form.
pub fn is_sanitized(name: &str) -> bool {
    sanitize(name) == name
}

/// Whether a sanitized name can be used as a directory entry.
pub fn is_valid_name(sanitized: &str) -> bool {
    !sanitized.is_empty() && sanitized != "." && sanitized != ".."
}
