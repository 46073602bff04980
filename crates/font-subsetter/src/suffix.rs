//! Subset family naming.

use crate::config::DEFAULT_SUFFIX;

/// Percent-encodes `suffix` so it can be embedded in a family name.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) pass through; every other
/// UTF-8 byte becomes `%XX` with uppercase hex digits.
pub fn encode_suffix(suffix: &str) -> String {
    let mut out = String::with_capacity(suffix.len());
    for byte in suffix.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            out.push(char::from(byte));
        } else {
            out.push_str(&format!("%{byte:02X}"));
        }
    }
    out
}

/// Family name under which a subset font is published:
/// `"<original>+<encoded suffix>"`, using the default suffix when none is
/// given.
pub fn subset_family_name(original: &str, suffix: Option<&str>) -> String {
    let suffix = suffix.unwrap_or(DEFAULT_SUFFIX);
    format!("{original}+{}", encode_suffix(suffix))
}
