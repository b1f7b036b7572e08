// camelCase -> snake_case identifier conversion
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // An uppercase-led word (acronym tail included) preceded by any character
    static ref WORD_BOUNDARY: Regex = Regex::new(r"(.)([A-Z][a-z]+)").unwrap();
    // A lowercase letter or digit directly followed by an uppercase letter
    static ref CASE_BOUNDARY: Regex = Regex::new(r"([a-z0-9])([A-Z])").unwrap();
}

/// Convert a camelCase identifier to snake_case.
///
/// Blindly transforms: callers are expected to gate with [`is_camel_case`]
/// first and to strip/re-prepend any leading underscore themselves.
/// Already-snake_case input passes through unchanged, so the conversion is
/// idempotent.
pub fn camel_to_snake(identifier: &str) -> String {
    let pass1 = WORD_BOUNDARY.replace_all(identifier, "${1}_${2}");
    CASE_BOUNDARY
        .replace_all(&pass1, "${1}_${2}")
        .to_lowercase()
}

/// True when the identifier qualifies for conversion: at least one ASCII
/// lowercase and one ASCII uppercase letter. Callers exclude any leading
/// underscore from the string before testing.
pub fn is_camel_case(identifier: &str) -> bool {
    identifier.chars().any(|c| c.is_ascii_lowercase())
        && identifier.chars().any(|c| c.is_ascii_uppercase())
}

/// Convert an identifier that may carry a leading underscore, preserving
/// exactly one underscore on the result.
pub fn convert_identifier(identifier: &str) -> String {
    match identifier.strip_prefix('_') {
        Some(rest) => format!("_{}", camel_to_snake(rest)),
        None => camel_to_snake(identifier),
    }
}
