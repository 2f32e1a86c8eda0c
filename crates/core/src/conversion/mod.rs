//! Batch conversion of workbooks into MariaDB scripts
//!
//! A run scans one input directory, converts every workbook on a bounded
//! worker pool and writes, per workbook:
//!
//! - `<schema_dir>/<table>.sql` with the `CREATE TABLE` statement
//! - `<data_dir>/data_<table>.sql` with batched `INSERT` statements
//! - `<quarantine_dir>/quarantine_<table>.sql` when rows were wider than the
//!   header
//!
//! A failing workbook only fails its own result. Reruns overwrite every
//! output.
//!
//! # Example
//!
//! ```rust,no_run
//! use sheetsql_core::conversion::{ConversionConfig, run_conversion};
//!
//! let config = ConversionConfig::new()
//!     .with_input_dir("xlsx")
//!     .with_batch_size(500)
//!     .with_progress(true);
//!
//! let report = run_conversion(config)?;
//! println!(
//!     "{} succeeded, {} failed in {}",
//!     report.succeeded(),
//!     report.failed(),
//!     report.duration_formatted()
//! );
//! # Ok::<(), sheetsql_core::conversion::ConversionError>(())
//! ```

mod audit;
mod config;
mod discover;
mod error;
mod pipeline;
mod progress;
mod result;
mod task;

pub use audit::{AuditLog, ERROR_LOG, READ_LOG, RUN_LOG};
pub use config::ConversionConfig;
pub use discover::{check_input_dir, discover_workbooks};
pub use error::{ConversionError, ConversionOutcome, FileError};
pub use pipeline::ConversionPipeline;
#[cfg(feature = "xlsx")]
pub use pipeline::run_conversion;
pub use progress::{ConversionProgress, format_number};
pub use result::{ConversionReport, ConversionResult, ConversionStatus};
pub use task::{ScriptPaths, convert_file};
