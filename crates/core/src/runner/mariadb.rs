//! MariaDB / MySQL executor backed by sqlx

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, info};

use super::config::DatabaseConfig;
use super::executor::{ExecutorError, StatementExecutor};

/// A single connection running statements through the text protocol
pub struct MariaDbExecutor {
    conn: MySqlConnection,
}

impl MariaDbExecutor {
    /// Open a connection using `config`
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, ExecutorError> {
        config
            .validate()
            .map_err(ExecutorError::MissingCredentials)?;

        let options = MySqlConnectOptions::new()
            .username(&config.username)
            .password(&config.password)
            .database(&config.database);
        let options = match config.effective_socket() {
            Some(socket) => {
                debug!(socket = %socket.display(), "Connecting through unix socket");
                options.socket(socket)
            }
            None => options.host(&config.hostname).port(config.port),
        };

        let conn = options
            .connect()
            .await
            .map_err(|e| ExecutorError::Connect(e.to_string()))?;

        info!(target_db = %config.describe(), "Connected to database");
        Ok(Self { conn })
    }

    /// Close the connection cleanly
    pub async fn close(self) -> Result<(), ExecutorError> {
        self.conn
            .close()
            .await
            .map_err(|e| ExecutorError::Connect(e.to_string()))
    }
}

#[async_trait]
impl StatementExecutor for MariaDbExecutor {
    async fn execute(&mut self, statement: &str) -> Result<u64, ExecutorError> {
        let result = sqlx::Executor::execute(&mut self.conn, sqlx::raw_sql(statement))
            .await
            .map_err(|e| ExecutorError::Statement(e.to_string()))?;
        Ok(result.rows_affected())
    }
}
