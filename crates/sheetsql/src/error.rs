//! CLI error type

use thiserror::Error;

use sheetsql_core::config::ConfigError;
use sheetsql_core::conversion::ConversionError;
use sheetsql_core::rename::RenameError;
use sheetsql_core::runner::ExecutorError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    #[error(transparent)]
    Database(#[from] ExecutorError),

    #[error(transparent)]
    Rename(#[from] RenameError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot render output: {0}")]
    Output(#[from] serde_json::Error),
}

impl CliError {
    /// Message shown to the user, with a hint where one helps
    pub fn user_message(&self) -> String {
        match self {
            CliError::Config(e) => e.user_message(),
            CliError::Conversion(e) => e.user_message(),
            CliError::Database(e) => e.user_message(),
            _ => self.to_string(),
        }
    }
}
