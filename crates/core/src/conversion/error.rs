//! Error types for conversion runs
//!
//! [`ConversionError`] stops a run before any file is processed.
//! [`FileError`] is confined to one workbook and ends up in that file's
//! result while the rest of the run carries on.

use std::path::PathBuf;
use thiserror::Error;

use crate::sheet::SheetError;

/// Fatal errors raised while setting up a conversion run
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Input directory does not exist
    #[error("Input directory not found: {0}")]
    InputNotFound(PathBuf),

    /// Input path exists but is not a directory
    #[error("Input path is not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Discovery pattern could not be built
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// IO error with path context
    #[error("IO error with {path}: {message}")]
    IoWithPath {
        path: PathBuf,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Worker pool could not be started
    #[error("Cannot start worker pool: {0}")]
    ThreadPool(String),
}

/// Result type for conversion runs
pub type ConversionOutcome<T> = Result<T, ConversionError>;

impl ConversionError {
    /// Create an IO error with path context
    pub fn io_with_path(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        Self::IoWithPath {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ConversionError::InputNotFound(path) => {
                format!(
                    "Input directory not found: {}\n\nHint: Create it and place the .xlsx files inside, or pass --input.",
                    path.display()
                )
            }
            ConversionError::NotADirectory(path) => {
                format!(
                    "Input path is not a directory: {}\n\nHint: Point --input at the folder holding the workbooks.",
                    path.display()
                )
            }
            ConversionError::InvalidConfig(msg) => {
                format!("Invalid configuration: {msg}\n\nHint: Check the [conversion] section of your config file.")
            }
            ConversionError::IoWithPath { path, message, .. } => {
                format!(
                    "{message}: {}\n\nHint: Check that the directory is writable.",
                    path.display()
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Errors confined to a single workbook
#[derive(Error, Debug)]
pub enum FileError {
    /// Workbook or sheet could not be read
    #[error(transparent)]
    Read(#[from] SheetError),

    /// First sheet has data rows but no header cells
    #[error("Sheet has no header columns: {0}")]
    EmptySheet(PathBuf),

    /// File name has no characters usable in a table name
    #[error("Cannot derive a table name from {0}")]
    InvalidTableName(PathBuf),

    /// Another workbook of the run already maps to the same table
    #[error("Table `{table}` is already produced by {first}")]
    DuplicateTable { table: String, first: PathBuf },

    /// Output script could not be written
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FileError {
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
