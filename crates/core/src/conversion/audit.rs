//! Append-only audit logs
//!
//! Three plain-text files live in the log directory:
//!
//! - `read.log`: one line per converted workbook with status and progress
//! - `error.log`: error detail for failed files and statements
//! - `run.log`: run milestones such as phase start and end
//!
//! Every line starts with an RFC 3339 timestamp. Failing to write a log
//! line is reported through `tracing` and never interrupts the run.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{Local, SecondsFormat};

pub const READ_LOG: &str = "read.log";
pub const ERROR_LOG: &str = "error.log";
pub const RUN_LOG: &str = "run.log";

/// Writer for the audit log files
#[derive(Debug, Clone)]
pub struct AuditLog {
    dir: Option<PathBuf>,
}

impl AuditLog {
    /// Use `dir` for the log files, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir: Some(dir) })
    }

    /// A log that drops every line
    pub fn disabled() -> Self {
        Self { dir: None }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Record the outcome of one workbook
    pub fn file_processed(
        &self,
        path: &Path,
        duration: Duration,
        status: &str,
        completed: usize,
        total: usize,
    ) {
        let percentage = if total == 0 {
            100.0
        } else {
            completed as f64 / total as f64 * 100.0
        };
        self.append(
            READ_LOG,
            &format!(
                "{} - {:?} - {} - {:.2}% complete",
                path.display(),
                duration,
                status,
                percentage
            ),
        );
    }

    /// Record an error with its context
    pub fn error(&self, context: &str, error: &dyn std::fmt::Display) {
        self.append(ERROR_LOG, &format!("{}: {}", context, error));
    }

    /// Record a run milestone
    pub fn milestone(&self, message: &str) {
        self.append(RUN_LOG, message);
    }

    fn append(&self, file: &str, message: &str) {
        let Some(dir) = &self.dir else {
            return;
        };
        let path = dir.join(file);
        let line = format!(
            "{}: {}\n",
            Local::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            message
        );

        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .and_then(|mut f| f.write_all(line.as_bytes()));

        if let Err(e) = result {
            tracing::warn!(path = %path.display(), error = %e, "Cannot write audit log");
        }
    }
}
