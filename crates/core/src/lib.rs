//! sheetsql core - spreadsheet to MariaDB conversion
//!
//! Provides:
//! - Column type inference over spreadsheet text
//! - CREATE TABLE and batched INSERT script generation
//! - A parallel conversion pipeline over a directory of workbooks
//! - Sequential execution of the generated scripts against MariaDB
//! - Batch renaming of workbook files

pub mod config;
pub mod conversion;
pub mod inference;
pub mod rename;
pub mod runner;
pub mod sheet;
pub mod sql;

// Re-export commonly used types
pub use config::{AppConfig, ConfigError};
pub use conversion::{
    ConversionConfig, ConversionError, ConversionPipeline, ConversionReport, ConversionResult,
    ConversionStatus,
};
#[cfg(feature = "xlsx")]
pub use conversion::run_conversion;
pub use inference::{ColumnProfile, SqlType, infer_column_type};
pub use rename::{RenameError, RenameReport, rename_files};
pub use runner::{DatabaseConfig, RunStats, ScriptRunner, StatementExecutor};
pub use sheet::{Sheet, SheetError, WorkbookReader};
#[cfg(feature = "xlsx")]
pub use sheet::XlsxReader;
pub use sql::{BatchInsertWriter, InsertScripts, SchemaBuilder};
