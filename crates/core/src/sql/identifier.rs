//! Table and column identifiers
//!
//! Identifiers are reduced to lowercase ASCII alphanumerics, so a sanitized
//! name never needs escaping. They are still backtick-quoted on output so that
//! reserved words such as `order` remain valid column names.

use std::collections::HashSet;
use std::path::Path;

/// Strip every character that is not an ASCII letter or digit and lowercase
/// the rest
pub fn sanitize_identifier(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Quote an identifier with backticks, doubling any backtick it contains
pub fn quote_identifier(identifier: &str) -> String {
    format!("`{}`", identifier.replace('`', "``"))
}

/// Derive a table name from a workbook path
///
/// Returns `None` when nothing of the file stem survives sanitization.
pub fn table_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_string_lossy();
    let name = sanitize_identifier(&stem);
    (!name.is_empty()).then_some(name)
}

/// Name of the synthetic auto-increment key of a table
pub fn identity_column(table: &str) -> String {
    format!("{}_id", table)
}

/// Assigns unique column names within one sheet
///
/// Sanitized names never contain `_`, so neither the `_2` style suffixes
/// handed out here nor the `<table>_id` key column can clash with a
/// sanitized header.
#[derive(Debug, Default)]
pub struct ColumnNamer {
    used: HashSet<String>,
}

impl ColumnNamer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Name the column at zero-based `index` whose header text is `raw`
    pub fn name_for(&mut self, raw: &str, index: usize) -> String {
        let mut base = sanitize_identifier(raw);
        if base.is_empty() {
            base = format!("column{}", index + 1);
        }

        let mut name = base.clone();
        let mut suffix = 2;
        while self.used.contains(&name) {
            name = format!("{}_{}", base, suffix);
            suffix += 1;
        }

        self.used.insert(name.clone());
        name
    }
}
