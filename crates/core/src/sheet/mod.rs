//! Spreadsheet access
//!
//! The conversion pipeline only ever sees a [`Sheet`]: rows of cell text with
//! the header as the first row. Reading the workbook format itself is the job
//! of a [`WorkbookReader`] implementation such as [`XlsxReader`].

use std::path::{Path, PathBuf};

use thiserror::Error;

#[cfg(feature = "xlsx")]
mod xlsx;

#[cfg(feature = "xlsx")]
pub use xlsx::XlsxReader;

/// Errors raised while reading a workbook
#[derive(Error, Debug)]
pub enum SheetError {
    /// The workbook could not be opened or is not a supported format
    #[error("Cannot open workbook {path}: {reason}")]
    Open { path: PathBuf, reason: String },

    /// The workbook has no worksheets
    #[error("Workbook has no sheets: {0}")]
    NoSheets(PathBuf),

    /// A worksheet could not be decoded
    #[error("Cannot read sheet '{sheet}' of {path}: {reason}")]
    Read {
        path: PathBuf,
        sheet: String,
        reason: String,
    },
}

/// Rows of one worksheet rendered as text
///
/// Row 0 is the header. Rows may be ragged: a row holds cells up to its last
/// non-empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Worksheet name as shown in the workbook
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All rows including the header
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Raw header cells, if the sheet has any rows
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }

    /// Rows after the header
    pub fn data_rows(&self) -> &[Vec<String>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    /// A sheet needs a header and at least one data row to become a table
    pub fn has_data(&self) -> bool {
        self.rows.len() >= 2
    }
}

/// Source of sheets for the conversion pipeline
///
/// Implementations are shared across worker threads.
pub trait WorkbookReader: Send + Sync {
    /// Names of the worksheets in workbook order
    fn list_sheets(&self, path: &Path) -> Result<Vec<String>, SheetError>;

    /// Read the first worksheet of the workbook at `path`
    fn read_first_sheet(&self, path: &Path) -> Result<Sheet, SheetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet(rows: &[&[&str]]) -> Sheet {
        Sheet::new(
            "Sheet1",
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_header_and_data_rows() {
        let s = sheet(&[&["a", "b"], &["1", "2"], &["3"]]);
        assert_eq!(s.header().unwrap(), ["a".to_string(), "b".to_string()]);
        assert_eq!(s.data_rows().len(), 2);
        assert!(s.has_data());
        assert_eq!(s.name(), "Sheet1");
    }

    #[test]
    fn test_header_only() {
        let s = sheet(&[&["a", "b"]]);
        assert!(!s.has_data());
        assert!(s.data_rows().is_empty());
    }

    #[test]
    fn test_empty_sheet() {
        let s = Sheet::default();
        assert!(s.header().is_none());
        assert!(s.data_rows().is_empty());
        assert_eq!(s.row_count(), 0);
    }
}
