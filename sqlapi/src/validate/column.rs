//! Syntax check for whitelisted column names.

/// Maximum length for SQL identifiers (`PostgreSQL` limit is 63).
pub const MAX_IDENTIFIER_LENGTH: usize = 63;

/// Whether `s` is a plain, unquoted SQL identifier.
///
/// Whitelisted column names are emitted verbatim into the clause, so the
/// whitelist itself must only hold names that cannot change the shape of
/// the query:
/// - first character is an ASCII letter or underscore
/// - remaining characters are ASCII letters, digits or underscores
/// - 1 to 63 bytes long
///
/// ```
/// use sqlapi::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("material"));
/// assert!(is_valid_sql_identifier("_weight_kg"));
///
/// assert!(!is_valid_sql_identifier("weight; DROP TABLE bikes"));
/// assert!(!is_valid_sql_identifier("2wheels"));
/// assert!(!is_valid_sql_identifier("bikes.material"));
/// ```
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.split_first() {
        Some((first, rest)) if bytes.len() <= MAX_IDENTIFIER_LENGTH => {
            (first.is_ascii_alphabetic() || *first == b'_')
                && rest.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
        },
        _ => false,
    }
}

/// Assert that `s` is a valid SQL identifier.
///
/// # Panics
///
/// Panics if the name is invalid. Meant for whitelists written in code,
/// where a bad name is a programmer error; validate configuration input with
/// [`is_valid_sql_identifier`] instead.
///
/// ```should_panic
/// use sqlapi::assert_valid_sql_identifier;
///
/// assert_valid_sql_identifier("weight--", "whitelisted column");
/// ```
pub fn assert_valid_sql_identifier(s: &str, context: &str) {
    assert!(
        is_valid_sql_identifier(s),
        "Invalid {context} name '{s}': must start with letter/underscore, \
         contain only ASCII alphanumeric/underscore, and be 1-63 chars"
    );
}
