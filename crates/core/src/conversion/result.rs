//! Per-file results and the run report

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Outcome of converting one workbook
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionStatus {
    /// Scripts were written
    Success,
    /// The file failed; see the result's error detail
    Error,
    /// The sheet had no data rows; nothing was written
    Empty,
}

impl std::fmt::Display for ConversionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionStatus::Success => write!(f, "success"),
            ConversionStatus::Error => write!(f, "error"),
            ConversionStatus::Empty => write!(f, "empty"),
        }
    }
}

/// Result of converting one workbook
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionResult {
    /// Workbook path
    pub path: PathBuf,
    /// Table name, once derived
    pub table: Option<String>,
    pub status: ConversionStatus,
    /// Error detail when `status` is `Error`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub rows_written: usize,
    pub rows_quarantined: usize,
    /// Scripts written for this file
    pub outputs: Vec<PathBuf>,
    /// Wall time spent on the file in milliseconds
    pub duration_ms: u64,
    #[serde(skip)]
    pub duration: Duration,
}

impl ConversionResult {
    fn new(path: impl Into<PathBuf>, status: ConversionStatus, duration: Duration) -> Self {
        Self {
            path: path.into(),
            table: None,
            status,
            error: None,
            rows_written: 0,
            rows_quarantined: 0,
            outputs: Vec::new(),
            duration_ms: duration.as_millis() as u64,
            duration,
        }
    }

    pub fn success(path: impl Into<PathBuf>, duration: Duration) -> Self {
        Self::new(path, ConversionStatus::Success, duration)
    }

    pub fn empty(path: impl Into<PathBuf>, duration: Duration) -> Self {
        Self::new(path, ConversionStatus::Empty, duration)
    }

    pub fn error(path: impl Into<PathBuf>, duration: Duration, error: impl Into<String>) -> Self {
        let mut result = Self::new(path, ConversionStatus::Error, duration);
        result.error = Some(error.into());
        result
    }

    /// Attach the table name
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == ConversionStatus::Success
    }
}

/// Summary of a conversion run
///
/// Results are listed in the order the files finished, not the order they
/// were dispatched.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionReport {
    /// Run ID
    pub run_id: String,
    /// Per-file results in completion order
    pub results: Vec<ConversionResult>,
    /// Total duration in milliseconds
    pub duration_ms: u64,
}

impl ConversionReport {
    fn count(&self, status: ConversionStatus) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    pub fn total(&self) -> usize {
        self.results.len()
    }

    pub fn succeeded(&self) -> usize {
        self.count(ConversionStatus::Success)
    }

    pub fn failed(&self) -> usize {
        self.count(ConversionStatus::Error)
    }

    pub fn empty(&self) -> usize {
        self.count(ConversionStatus::Empty)
    }

    /// Whether every file either succeeded or was empty
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Get formatted duration
    pub fn duration_formatted(&self) -> String {
        let secs = self.duration_ms / 1000;
        let mins = secs / 60;
        let remaining_secs = secs % 60;

        if mins > 0 {
            format!("{}m {}s", mins, remaining_secs)
        } else if secs > 0 {
            format!("{}s", secs)
        } else {
            format!("{}ms", self.duration_ms)
        }
    }

    /// Pretty-printed JSON for machine consumers
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
