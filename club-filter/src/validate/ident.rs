//! Identifier rules shared by FieldSpec construction and the SQL renderer.
//!
//! Attribute names end up verbatim in the persistence collaborator's query
//! (column names in SQL), so a FieldSpec only accepts names that are plain
//! identifiers: ASCII letter or underscore first, then ASCII alphanumerics
//! and underscores, at most 63 bytes (the `PostgreSQL` limit).

const MAX_IDENT_BYTES: usize = 63;

/// Whether `s` is a plain SQL identifier.
///
/// # Examples
///
/// ```
/// use club_filter::is_valid_sql_identifier;
///
/// assert!(is_valid_sql_identifier("created_at"));
/// assert!(is_valid_sql_identifier("_internal"));
///
/// assert!(!is_valid_sql_identifier(""));
/// assert!(!is_valid_sql_identifier("2fa_enabled"));
/// assert!(!is_valid_sql_identifier("author.name"));
/// assert!(!is_valid_sql_identifier("title; DROP TABLE posts"));
/// ```
#[inline]
#[must_use]
pub fn is_valid_sql_identifier(s: &str) -> bool {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {},
        _ => return false,
    }
    bytes.len() <= MAX_IDENT_BYTES
        && bytes.iter().all(|b| b.is_ascii_alphanumeric() || *b == b'_')
}

/// Panic unless `s` is a plain SQL identifier.
///
/// For names written in code (table and column lists), where a bad name is
/// a programming error rather than user input.
///
/// ```should_panic
/// use club_filter::assert_valid_sql_identifier;
///
/// assert_valid_sql_identifier("posts--", "table");
/// ```
#[inline]
pub fn assert_valid_sql_identifier(s: &str, context: &str) {
    assert!(
        is_valid_sql_identifier(s),
        "invalid SQL {context} name `{s}`: expected an ASCII identifier of at most \
         {MAX_IDENT_BYTES} bytes"
    );
}
