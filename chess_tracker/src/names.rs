//! Player name normalization.
//!
//! Names are normalized once, on the way into storage, so that the
//! (first name, last name) uniqueness constraint compares like with like:
//! "Jérôme", "jerome" and "JEROME " all store as "Jerome".

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a user-entered name for storage.
///
/// Decomposes the string (NFD), strips combining accent marks, drops every
/// character that is not an alphabetic letter, then capitalizes the first
/// remaining letter and lowercases the rest.
///
/// The result may be empty (e.g. for input like `"123"`); callers persisting
/// the value are responsible for rejecting empty names.
pub fn normalize_name(raw: &str) -> String {
    let mut letters = raw
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_alphabetic());

    let mut normalized = String::with_capacity(raw.len());
    match letters.next() {
        Some(first) => normalized.extend(first.to_uppercase()),
        None => return normalized,
    }
    for c in letters {
        normalized.extend(c.to_lowercase());
    }
    normalized
}
