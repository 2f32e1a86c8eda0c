//! CLI command for converting a folder of workbooks

use std::path::PathBuf;

use crate::error::CliError;
use crate::output;
use sheetsql_core::config::AppConfig;
use sheetsql_core::conversion::{ConversionConfig, ConversionReport, run_conversion};

/// Arguments for the `convert` command
///
/// Every `Some` overrides the matching config file value.
#[derive(Debug, Default)]
pub struct ConvertArgs {
    pub input: Option<PathBuf>,
    pub schema_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub quarantine_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    pub batch_size: Option<usize>,
    pub concurrency: Option<usize>,
    pub progress: bool,
    pub json: bool,
}

impl ConvertArgs {
    /// Merge the overrides into the configured conversion settings
    pub fn conversion_config(&self, app: &AppConfig) -> ConversionConfig {
        let mut config = app.conversion_config().with_progress(self.progress && !self.json);
        if let Some(dir) = &self.input {
            config = config.with_input_dir(dir);
        }
        if let Some(dir) = &self.schema_dir {
            config = config.with_schema_dir(dir);
        }
        if let Some(dir) = &self.data_dir {
            config = config.with_data_dir(dir);
        }
        if let Some(dir) = &self.quarantine_dir {
            config = config.with_quarantine_dir(dir);
        }
        if let Some(dir) = &self.log_dir {
            config = config.with_log_dir(dir);
        }
        if let Some(size) = self.batch_size {
            config = config.with_batch_size(size);
        }
        if let Some(workers) = self.concurrency {
            config = config.with_concurrency(workers);
        }
        config
    }
}

/// Handle the `convert` command
pub fn handle_convert(args: &ConvertArgs, app: &AppConfig) -> Result<ConversionReport, CliError> {
    let config = args.conversion_config(app);
    if !args.json {
        eprintln!(
            "Converting workbooks in {} ({} workers)",
            config.input_dir.display(),
            config.effective_workers()
        );
    }

    let report = run_conversion(config)?;
    output::print_conversion_report(&report, args.json)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let mut app = AppConfig::default();
        app.conversion.batch_size = 50;

        let args = ConvertArgs {
            input: Some(PathBuf::from("sheets")),
            concurrency: Some(3),
            progress: true,
            json: true,
            ..Default::default()
        };
        let config = args.conversion_config(&app);

        assert_eq!(config.input_dir, PathBuf::from("sheets"));
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.concurrency, 3);
        assert_eq!(config.schema_dir, PathBuf::from("SQLTable"));
        assert!(!config.show_progress);
    }
}
