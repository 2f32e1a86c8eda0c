//! Loading generated scripts into MariaDB
//!
//! Scripts are split into statements and executed one statement at a time
//! through a [`StatementExecutor`]. The runner never aborts: failed statements
//! and unreadable scripts are logged and skipped.
//!
//! # Example
//!
//! ```rust,ignore
//! use sheetsql_core::conversion::AuditLog;
//! use sheetsql_core::runner::{DatabaseConfig, MariaDbExecutor, ScriptRunner, load_order};
//!
//! let executor = MariaDbExecutor::connect(&db_config).await?;
//! let scripts = load_order("SQLTable".as_ref(), "SQLData".as_ref(), None)?;
//! let mut runner = ScriptRunner::new(executor, AuditLog::open("log")?);
//! let stats = runner.execute(&scripts).await;
//! println!("{} statements, {} failed", stats.statements_executed, stats.statements_failed);
//! ```

mod config;
mod executor;
#[cfg(feature = "mariadb")]
mod mariadb;
mod script;
mod splitter;

pub use config::{DEFAULT_PORT, DEFAULT_SOCKET, DatabaseConfig, LEGACY_TEMPLATE};
pub use executor::{ExecutorError, StatementExecutor};
#[cfg(feature = "mariadb")]
pub use mariadb::MariaDbExecutor;
pub use script::{RunStats, ScriptRunner, collect_scripts, load_order};
pub use splitter::split_statements;
