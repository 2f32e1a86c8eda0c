//! Excel workbook reader backed by calamine

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use super::{Sheet, SheetError, WorkbookReader};

/// Reads `.xlsx`, `.xlsm`, `.xls` and `.ods` workbooks
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxReader;

impl XlsxReader {
    pub fn new() -> Self {
        Self
    }
}

impl WorkbookReader for XlsxReader {
    fn list_sheets(&self, path: &Path) -> Result<Vec<String>, SheetError> {
        let workbook = open_workbook_auto(path).map_err(|e| SheetError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(workbook.sheet_names())
    }

    fn read_first_sheet(&self, path: &Path) -> Result<Sheet, SheetError> {
        let mut workbook = open_workbook_auto(path).map_err(|e| SheetError::Open {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| SheetError::NoSheets(path.to_path_buf()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| SheetError::NoSheets(path.to_path_buf()))?
            .map_err(|e| SheetError::Read {
                path: path.to_path_buf(),
                sheet: name.clone(),
                reason: e.to_string(),
            })?;

        let mut rows: Vec<Vec<String>> = range
            .rows()
            .map(|cells| {
                let mut row: Vec<String> = cells.iter().map(cell_to_string).collect();
                while row.last().is_some_and(|c| c.is_empty()) {
                    row.pop();
                }
                row
            })
            .collect();

        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }

        tracing::debug!(
            path = %path.display(),
            sheet = %name,
            rows = rows.len(),
            "Read worksheet"
        );

        Ok(Sheet::new(name, rows))
    }
}

/// Render a cell the way it reads in a spreadsheet
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            match dt.as_datetime() {
                Some(value) if serial < 1.0 => value.format("%H:%M:%S").to_string(),
                Some(value) if serial.fract() == 0.0 => value.format("%Y-%m-%d").to_string(),
                Some(value) => value.format("%Y-%m-%d %H:%M:%S").to_string(),
                None => serial.to_string(),
            }
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}
