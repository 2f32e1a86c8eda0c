//! Statement execution seam

use async_trait::async_trait;

/// Errors raised by a statement executor
#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Cannot connect to database: {0}")]
    Connect(String),
    #[error("Statement failed: {0}")]
    Statement(String),
    #[error("Database credentials missing: {0}")]
    MissingCredentials(String),
}

impl ExecutorError {
    /// Get a user-friendly error message for CLI output
    pub fn user_message(&self) -> String {
        match self {
            ExecutorError::Connect(msg) => format!(
                "Cannot connect to database: {msg}\n\nHint: Check hostname, port and credentials in the [database] section."
            ),
            ExecutorError::MissingCredentials(msg) => format!(
                "Database credentials missing: {msg}\n\nHint: Run 'sheetsql init-config' to create a config template."
            ),
            _ => self.to_string(),
        }
    }
}

/// Runs one SQL statement at a time against a database
#[async_trait]
pub trait StatementExecutor: Send {
    /// Execute a statement and return the number of affected rows
    async fn execute(&mut self, statement: &str) -> Result<u64, ExecutorError>;
}

#[async_trait]
impl<E: StatementExecutor + ?Sized> StatementExecutor for Box<E> {
    async fn execute(&mut self, statement: &str) -> Result<u64, ExecutorError> {
        (**self).execute(statement).await
    }
}
