/// Characters kept besides ASCII letters and digits.
const SYMBOL_PUNCTUATION: [char; 4] = ['^', '.', '_', '-'];

/// Canonicalize user-supplied ticker text.
///
/// Drops every character outside `A-Z a-z 0-9 ^ . _ -` and upper-cases the rest.
/// Total and idempotent.
pub fn normalize_symbol(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric() || SYMBOL_PUNCTUATION.contains(c))
        .map(|c| c.to_ascii_uppercase())
        .collect()
}
