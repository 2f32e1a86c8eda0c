//! Conversion of a single workbook

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, warn};

use super::config::ConversionConfig;
use super::error::FileError;
use super::result::ConversionResult;
use crate::inference::profile_columns;
use crate::sheet::WorkbookReader;
use crate::sql::{BatchInsertWriter, SchemaBuilder, table_name_from_path};

/// Output locations for one table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPaths {
    pub schema: PathBuf,
    pub data: PathBuf,
    pub quarantine: PathBuf,
}

impl ScriptPaths {
    pub fn for_table(config: &ConversionConfig, table: &str) -> Self {
        Self {
            schema: config.schema_dir.join(format!("{}.sql", table)),
            data: config.data_dir.join(format!("data_{}.sql", table)),
            quarantine: config.quarantine_dir.join(format!("quarantine_{}.sql", table)),
        }
    }
}

/// Convert one workbook into its scripts
///
/// Never fails: every problem is folded into an error result so that other
/// workbooks of the run are unaffected. A workbook that ends up empty or in
/// error leaves no scripts behind, including ones from an earlier run.
pub fn convert_file(
    path: &Path,
    reader: &dyn WorkbookReader,
    config: &ConversionConfig,
) -> ConversionResult {
    let start = Instant::now();

    let table = match table_name_from_path(path) {
        Some(table) => table,
        None => {
            let err = FileError::InvalidTableName(path.to_path_buf());
            return ConversionResult::error(path, start.elapsed(), err.to_string());
        }
    };

    match write_scripts(path, &table, reader, config) {
        Ok(Some((rows_written, rows_quarantined, outputs))) => {
            let mut result = ConversionResult::success(path, start.elapsed()).with_table(&table);
            result.rows_written = rows_written;
            result.rows_quarantined = rows_quarantined;
            result.outputs = outputs;
            result
        }
        Ok(None) => {
            debug!(path = %path.display(), "Sheet has no data rows");
            clear_scripts(&ScriptPaths::for_table(config, &table));
            ConversionResult::empty(path, start.elapsed()).with_table(&table)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Conversion failed");
            clear_scripts(&ScriptPaths::for_table(config, &table));
            ConversionResult::error(path, start.elapsed(), e.to_string()).with_table(&table)
        }
    }
}

/// Remove every script of a table so a later load cannot pick them up
fn clear_scripts(paths: &ScriptPaths) {
    for script in [&paths.schema, &paths.data, &paths.quarantine] {
        if let Err(e) = remove_if_present(script) {
            warn!(path = %script.display(), error = %e, "Cannot remove stale script");
        }
    }
}

fn remove_if_present(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "Removed stale script");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

/// Returns `None` when the sheet has no data rows
fn write_scripts(
    path: &Path,
    table: &str,
    reader: &dyn WorkbookReader,
    config: &ConversionConfig,
) -> Result<Option<(usize, usize, Vec<PathBuf>)>, FileError> {
    let sheet = reader.read_first_sheet(path)?;
    if !sheet.has_data() {
        return Ok(None);
    }

    let header = sheet.header().unwrap_or(&[]);
    if header.is_empty() {
        return Err(FileError::EmptySheet(path.to_path_buf()));
    }

    let columns = profile_columns(header, sheet.data_rows());
    let schema = SchemaBuilder::build(table, &columns);
    let inserts = BatchInsertWriter::new(config.batch_size).write(table, &columns, sheet.data_rows());

    let paths = ScriptPaths::for_table(config, table);
    let mut outputs = Vec::with_capacity(3);

    fs::write(&paths.schema, schema).map_err(|e| FileError::write(&paths.schema, e))?;
    outputs.push(paths.schema);

    fs::write(&paths.data, &inserts.data).map_err(|e| FileError::write(&paths.data, e))?;
    outputs.push(paths.data);

    if inserts.has_quarantine() {
        fs::write(&paths.quarantine, &inserts.quarantine)
            .map_err(|e| FileError::write(&paths.quarantine, e))?;
        warn!(
            path = %path.display(),
            rows = inserts.rows_quarantined,
            "Rows wider than the header were quarantined"
        );
        outputs.push(paths.quarantine);
    } else {
        remove_if_present(&paths.quarantine).map_err(|e| FileError::write(&paths.quarantine, e))?;
    }

    debug!(
        path = %path.display(),
        table,
        columns = columns.len(),
        rows = inserts.rows_written,
        "Wrote scripts"
    );

    Ok(Some((inserts.rows_written, inserts.rows_quarantined, outputs)))
}
