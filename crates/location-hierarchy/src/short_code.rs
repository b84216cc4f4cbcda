//! Short codes derived from place names.

/// Maximum number of letters in a short code
pub const SHORT_CODE_LEN: usize = 4;

/// Derive a short uppercase code from a place name.
///
/// The name is uppercased, everything outside `A`-`Z` is dropped (digits,
/// whitespace, punctuation and accented letters alike) and the first four
/// remaining letters are kept. Shorter results are returned as-is, without
/// padding.
///
/// ```
/// use location_hierarchy::short_code;
///
/// assert_eq!(short_code("Belém"), "BELM");
/// assert_eq!(short_code("são paulo"), "SOPA");
/// assert_eq!(short_code("123"), "");
/// ```
#[must_use]
pub fn short_code(name: &str) -> String {
    name.to_uppercase()
        .chars()
        .filter(char::is_ascii_uppercase)
        .take(SHORT_CODE_LEN)
        .collect()
}
