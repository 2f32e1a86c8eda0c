//! Application configuration file
//!
//! One TOML file holds the directory layout, conversion options and database
//! credentials:
//!
//! ```toml
//! [paths]
//! input_dir = "xlsx"
//! schema_dir = "SQLTable"
//!
//! [conversion]
//! batch_size = 1000
//!
//! [database]
//! username = "loader"
//! database = "sales"
//! ```
//!
//! Every key is optional and falls back to its default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::conversion::ConversionConfig;
use crate::runner::DatabaseConfig;
use crate::sql::DEFAULT_BATCH_SIZE;

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "sheetsql.toml";

/// Line-based database config of earlier releases
pub const LEGACY_DB_CONFIG: &str = "db.cfg";

/// Errors raised while reading or writing configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Config file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("IO error with {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Cannot serialize config: {0}")]
    Serialize(String),
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ConfigError::NotFound(path) => format!(
                "Config file not found: {}\n\nHint: Run 'sheetsql init-config' to create a template.",
                path.display()
            ),
            ConfigError::AlreadyExists(path) => format!(
                "Config file already exists: {}\n\nHint: Pass --force to overwrite it.",
                path.display()
            ),
            ConfigError::Parse { path, message } => format!(
                "Invalid config {}: {message}\n\nHint: Compare it with the output of 'sheetsql init-config'.",
                path.display()
            ),
            _ => self.to_string(),
        }
    }
}

/// Directory layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub input_dir: PathBuf,
    pub schema_dir: PathBuf,
    pub data_dir: PathBuf,
    pub quarantine_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        let defaults = ConversionConfig::default();
        Self {
            input_dir: defaults.input_dir,
            schema_dir: defaults.schema_dir,
            data_dir: defaults.data_dir,
            quarantine_dir: defaults.quarantine_dir,
            log_dir: defaults.log_dir,
        }
    }
}

/// Conversion tuning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionSettings {
    pub batch_size: usize,
    /// 0 means one worker per core
    pub concurrency: usize,
    pub extensions: Vec<String>,
}

impl Default for ConversionSettings {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            concurrency: 0,
            extensions: vec!["xlsx".to_string()],
        }
    }
}

/// Contents of `sheetsql.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub conversion: ConversionSettings,
    pub database: DatabaseConfig,
}

impl AppConfig {
    /// Load a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|e| ConfigError::io(path, e))?;
        Self::from_toml_str(&content).map_err(|message| ConfigError::Parse {
            path: path.to_path_buf(),
            message,
        })
    }

    /// Load `path` if given, else `sheetsql.toml` when present, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::load(default)
                } else {
                    tracing::debug!("No config file found, using defaults");
                    Ok(Self::default())
                }
            }
        }
    }

    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Serialize to TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Conversion settings for the pipeline
    pub fn conversion_config(&self) -> ConversionConfig {
        ConversionConfig::new()
            .with_input_dir(&self.paths.input_dir)
            .with_schema_dir(&self.paths.schema_dir)
            .with_data_dir(&self.paths.data_dir)
            .with_quarantine_dir(&self.paths.quarantine_dir)
            .with_log_dir(&self.paths.log_dir)
            .with_batch_size(self.conversion.batch_size)
            .with_concurrency(self.conversion.concurrency)
            .with_extensions(self.conversion.extensions.iter().cloned())
    }

    /// Commented template with every key at its default
    pub fn template() -> String {
        TEMPLATE.to_string()
    }

    /// Write the template to `path`
    ///
    /// An existing file is only replaced when `force` is set.
    pub fn write_template(path: &Path, force: bool) -> Result<(), ConfigError> {
        write_new_file(path, TEMPLATE, force)
    }
}

/// Write `content` to `path`, refusing to replace an existing file unless
/// `force` is set
pub fn write_new_file(path: &Path, content: &str, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists(path.to_path_buf()));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| ConfigError::io(path, e))
}

const TEMPLATE: &str = r#"# sheetsql configuration

[paths]
# Workbooks to convert (not searched recursively)
input_dir = "xlsx"
# CREATE TABLE scripts
schema_dir = "SQLTable"
# INSERT scripts
data_dir = "SQLData"
# Rows wider than their header
quarantine_dir = "SQLQuarantine"
# read.log, error.log and run.log
log_dir = "log"

[conversion]
# Rows per INSERT statement
batch_size = 1000
# Worker threads, 0 = one per core
concurrency = 0
extensions = ["xlsx"]

[database]
username = ""
password = ""
database = ""
hostname = "localhost"
port = 3306
# socket = "/var/run/mysqld/mysqld.sock"
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config = AppConfig::from_toml_str(TEMPLATE).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [conversion]
            batch_size = 250

            [database]
            username = "loader"
            database = "sales"
            "#,
        )
        .unwrap();

        assert_eq!(config.conversion.batch_size, 250);
        assert_eq!(config.conversion.concurrency, 0);
        assert_eq!(config.paths.input_dir, PathBuf::from("xlsx"));
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.database.hostname, "localhost");
    }

    #[test]
    fn test_conversion_config() {
        let mut config = AppConfig::default();
        config.paths.input_dir = PathBuf::from("sheets");
        config.conversion.batch_size = 10;

        let conversion = config.conversion_config();
        assert_eq!(conversion.input_dir, PathBuf::from("sheets"));
        assert_eq!(conversion.batch_size, 10);
        assert_eq!(conversion.schema_dir, PathBuf::from("SQLTable"));
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sheetsql.toml");
        fs::write(&path, "[conversion]\nbatch_size = \"many\"\n").unwrap();

        let err = AppConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.user_message().contains("Hint:"));
    }

    #[test]
    fn test_write_template_respects_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("conf").join("sheetsql.toml");

        AppConfig::write_template(&path, false).unwrap();
        assert!(matches!(
            AppConfig::write_template(&path, false),
            Err(ConfigError::AlreadyExists(_))
        ));
        AppConfig::write_template(&path, true).unwrap();
        assert!(AppConfig::load(&path).is_ok());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut config = AppConfig::default();
        config.database.username = "root".to_string();
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }
}
