//! Rendering of raw cell values as SQL literals

use std::borrow::Cow;

use crate::inference::{SqlType, matches_temporal};

/// The SQL `NULL` literal
pub const NULL_LITERAL: &str = "NULL";

/// Escape a string for use inside a single-quoted MariaDB literal
///
/// Backslash, single quote and double quote each get a preceding backslash.
pub fn escape_string(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '\'', '"']) {
        return Cow::Borrowed(value);
    }

    let mut escaped = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        if matches!(c, '\\' | '\'' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Wrap an escaped value in single quotes
pub fn quote_literal(value: &str) -> String {
    format!("'{}'", escape_string(value))
}

/// Encode one raw cell as a SQL literal for a column of `sql_type`
///
/// - blank or whitespace-only cells are `NULL` for every type
/// - numeric types are emitted trimmed and unquoted without re-validation
/// - temporal types must still match their pattern, otherwise `NULL`
/// - everything else becomes an escaped string literal of the untrimmed cell
pub fn encode_value<'a>(raw: &'a str, sql_type: &SqlType) -> Cow<'a, str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Cow::Borrowed(NULL_LITERAL);
    }

    if sql_type.is_numeric() {
        Cow::Borrowed(trimmed)
    } else if sql_type.is_temporal() {
        if matches_temporal(trimmed, sql_type) {
            Cow::Owned(format!("'{}'", trimmed))
        } else {
            Cow::Borrowed(NULL_LITERAL)
        }
    } else {
        Cow::Owned(quote_literal(raw))
    }
}
