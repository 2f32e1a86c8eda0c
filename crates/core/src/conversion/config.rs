//! Conversion run configuration

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sql::DEFAULT_BATCH_SIZE;

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionConfig {
    /// Directory scanned for workbooks (not recursive)
    pub input_dir: PathBuf,
    /// Destination of `<table>.sql` CREATE TABLE scripts
    pub schema_dir: PathBuf,
    /// Destination of `data_<table>.sql` INSERT scripts
    pub data_dir: PathBuf,
    /// Destination of `quarantine_<table>.sql` scripts
    pub quarantine_dir: PathBuf,
    /// Destination of `read.log`, `error.log` and `run.log`
    pub log_dir: PathBuf,
    /// Rows per INSERT statement
    pub batch_size: usize,
    /// Worker thread cap; 0 uses every available core
    pub concurrency: usize,
    /// Workbook file extensions, matched case-insensitively
    pub extensions: Vec<String>,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("xlsx"),
            schema_dir: PathBuf::from("SQLTable"),
            data_dir: PathBuf::from("SQLData"),
            quarantine_dir: PathBuf::from("SQLQuarantine"),
            log_dir: PathBuf::from("log"),
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: 0,
            extensions: vec!["xlsx".to_string()],
            show_progress: false,
        }
    }
}

impl ConversionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the input directory
    pub fn with_input_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_dir = path.into();
        self
    }

    /// Set the schema script directory
    pub fn with_schema_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.schema_dir = path.into();
        self
    }

    /// Set the data script directory
    pub fn with_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = path.into();
        self
    }

    /// Set the quarantine script directory
    pub fn with_quarantine_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.quarantine_dir = path.into();
        self
    }

    /// Set the log directory
    pub fn with_log_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_dir = path.into();
        self
    }

    /// Place every output directory under `root` using the default names
    pub fn with_output_root(self, root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        self.with_schema_dir(root.join("SQLTable"))
            .with_data_dir(root.join("SQLData"))
            .with_quarantine_dir(root.join("SQLQuarantine"))
            .with_log_dir(root.join("log"))
    }

    /// Set the number of rows per INSERT statement
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Cap the number of worker threads (0 = all cores)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Set the accepted workbook extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Enable or disable the progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Number of worker threads to start
    pub fn effective_workers(&self) -> usize {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        if self.concurrency == 0 {
            cores
        } else {
            self.concurrency.min(cores)
        }
    }

    /// Whether `path` has one of the configured extensions
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| {
                self.extensions
                    .iter()
                    .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
            })
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.input_dir.as_os_str().is_empty() {
            return Err("Input directory is required".to_string());
        }
        if self.batch_size == 0 {
            return Err("Batch size must be at least 1".to_string());
        }
        if self.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err("At least one workbook extension is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_legacy_layout() {
        let config = ConversionConfig::default();
        assert_eq!(config.input_dir, PathBuf::from("xlsx"));
        assert_eq!(config.schema_dir, PathBuf::from("SQLTable"));
        assert_eq!(config.data_dir, PathBuf::from("SQLData"));
        assert_eq!(config.log_dir, PathBuf::from("log"));
        assert_eq!(config.batch_size, 1000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = ConversionConfig::new()
            .with_input_dir("in")
            .with_output_root("out")
            .with_batch_size(50)
            .with_concurrency(2)
            .with_extensions(["xlsx", "xlsm"]);

        assert_eq!(config.input_dir, PathBuf::from("in"));
        assert_eq!(config.data_dir, PathBuf::from("out").join("SQLData"));
        assert_eq!(config.quarantine_dir, PathBuf::from("out").join("SQLQuarantine"));
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.extensions.len(), 2);
    }

    #[test]
    fn test_validate_rejects_zero_batch() {
        let err = ConversionConfig::new().with_batch_size(0).validate().unwrap_err();
        assert!(err.contains("Batch size"));
    }

    #[test]
    fn test_validate_rejects_no_extensions() {
        let config = ConversionConfig::new().with_extensions(Vec::<String>::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_effective_workers_is_capped() {
        let cores = std::thread::available_parallelism().unwrap().get();
        assert_eq!(ConversionConfig::new().effective_workers(), cores);
        assert_eq!(ConversionConfig::new().with_concurrency(1).effective_workers(), 1);
        assert_eq!(
            ConversionConfig::new()
                .with_concurrency(cores + 10)
                .effective_workers(),
            cores
        );
    }

    #[test]
    fn test_accepts_extension_case_insensitively() {
        let config = ConversionConfig::new().with_extensions([".xlsx"]);
        assert!(config.accepts(Path::new("a/Report.XLSX")));
        assert!(!config.accepts(Path::new("a/report.csv")));
        assert!(!config.accepts(Path::new("a/xlsx")));
    }
}
