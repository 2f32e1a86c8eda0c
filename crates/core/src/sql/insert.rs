//! Batched INSERT script generation

use serde::{Deserialize, Serialize};

use super::encoder::{NULL_LITERAL, encode_value, quote_literal};
use super::identifier::quote_identifier;
use crate::inference::ColumnProfile;

/// Rows per INSERT statement unless configured otherwise
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// Rendered insert scripts for one sheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertScripts {
    /// Batched multi-row INSERT statements
    pub data: String,
    /// One standalone INSERT per row wider than the header
    pub quarantine: String,
    pub rows_written: usize,
    pub rows_quarantined: usize,
}

impl InsertScripts {
    /// Whether any row was diverted to the quarantine script
    pub fn has_quarantine(&self) -> bool {
        self.rows_quarantined > 0
    }
}

/// Groups data rows into multi-row INSERT statements
#[derive(Debug, Clone, Copy)]
pub struct BatchInsertWriter {
    batch_size: usize,
}

impl Default for BatchInsertWriter {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl BatchInsertWriter {
    /// Create a writer emitting at most `batch_size` rows per statement
    ///
    /// A batch size of zero is treated as one.
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Render the data rows of a sheet
    ///
    /// Missing trailing cells become `NULL`. Blank cells past the header are
    /// ignored; a row that is still wider than the header goes to the
    /// quarantine script instead of the data script.
    pub fn write(
        &self,
        table: &str,
        columns: &[ColumnProfile],
        rows: &[Vec<String>],
    ) -> InsertScripts {
        let prefix = insert_prefix(table, columns);
        let mut scripts = InsertScripts::default();
        let mut batch: Vec<String> = Vec::with_capacity(self.batch_size.min(rows.len()));

        for row in rows {
            let width = effective_width(row, columns.len());
            if width > columns.len() {
                let values = render_wide_row(&row[..width], columns);
                scripts
                    .quarantine
                    .push_str(&format!("{} ({});\n", prefix, values));
                scripts.rows_quarantined += 1;
                continue;
            }

            batch.push(render_row(row, columns));
            scripts.rows_written += 1;
            if batch.len() == self.batch_size {
                flush_batch(&mut scripts.data, &prefix, &mut batch);
            }
        }

        if !batch.is_empty() {
            flush_batch(&mut scripts.data, &prefix, &mut batch);
        }

        scripts
    }
}

fn insert_prefix(table: &str, columns: &[ColumnProfile]) -> String {
    let names: Vec<String> = columns.iter().map(|c| quote_identifier(&c.name)).collect();
    format!(
        "INSERT INTO {} ({}) VALUES",
        quote_identifier(table),
        names.join(", ")
    )
}

/// Row length once blank cells beyond the header are discarded
fn effective_width(row: &[String], header_width: usize) -> usize {
    let mut width = row.len();
    while width > header_width && row[width - 1].trim().is_empty() {
        width -= 1;
    }
    width
}

fn render_row(row: &[String], columns: &[ColumnProfile]) -> String {
    let values: Vec<String> = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            let raw = row.get(index).map(String::as_str).unwrap_or("");
            encode_value(raw, &column.inferred_type).into_owned()
        })
        .collect();
    format!("({})", values.join(", "))
}

fn render_wide_row(row: &[String], columns: &[ColumnProfile]) -> String {
    let values: Vec<String> = row
        .iter()
        .enumerate()
        .map(|(index, raw)| match columns.get(index) {
            Some(column) => encode_value(raw, &column.inferred_type).into_owned(),
            None if raw.trim().is_empty() => NULL_LITERAL.to_string(),
            None => quote_literal(raw),
        })
        .collect();
    values.join(", ")
}

fn flush_batch(out: &mut String, prefix: &str, batch: &mut Vec<String>) {
    out.push_str(prefix);
    out.push('\n');
    out.push_str(&batch.join(",\n"));
    out.push_str(";\n");
    batch.clear();
}
