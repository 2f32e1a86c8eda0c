//! CLI command for loading generated scripts into MariaDB

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::CliError;
use crate::output;
use sheetsql_core::config::{AppConfig, LEGACY_DB_CONFIG};
use sheetsql_core::conversion::AuditLog;
use sheetsql_core::runner::{
    DatabaseConfig, ExecutorError, MariaDbExecutor, RunStats, ScriptRunner, load_order,
};

/// Arguments for the `load` command
#[derive(Debug, Default)]
pub struct LoadArgs {
    /// Line-based credentials file to use instead of `[database]`
    pub db_config: Option<PathBuf>,
    /// Unix socket overriding the configured one
    pub socket: Option<PathBuf>,
    /// Also run the quarantine scripts, after the data scripts
    pub include_quarantine: bool,
    pub json: bool,
}

/// Pick the database credentials
///
/// An explicit `db.cfg` path wins, then a complete `[database]` section, then
/// a `db.cfg` in the working directory.
pub fn resolve_database(
    app: &AppConfig,
    legacy: Option<&Path>,
    socket: Option<&Path>,
) -> Result<DatabaseConfig, CliError> {
    let mut database = match legacy {
        Some(path) => DatabaseConfig::from_legacy_file(path)?,
        None => match app.database.validate() {
            Ok(()) => app.database.clone(),
            Err(reason) => {
                let fallback = Path::new(LEGACY_DB_CONFIG);
                if fallback.exists() {
                    DatabaseConfig::from_legacy_file(fallback)?
                } else {
                    return Err(ExecutorError::MissingCredentials(reason).into());
                }
            }
        },
    };

    if let Some(socket) = socket {
        database.socket = Some(socket.to_path_buf());
    }
    database
        .validate()
        .map_err(ExecutorError::MissingCredentials)?;
    Ok(database)
}

/// Handle the `load` command
pub async fn handle_load(
    args: &LoadArgs,
    app: &AppConfig,
    audit: AuditLog,
) -> Result<RunStats, CliError> {
    let database = resolve_database(app, args.db_config.as_deref(), args.socket.as_deref())?;

    let quarantine = args
        .include_quarantine
        .then_some(app.paths.quarantine_dir.as_path());
    let scripts = load_order(&app.paths.schema_dir, &app.paths.data_dir, quarantine)?;
    if !args.json {
        eprintln!(
            "Loading {} scripts into {}",
            scripts.len(),
            database.describe()
        );
    }

    let executor = MariaDbExecutor::connect(&database).await?;
    let mut runner = ScriptRunner::new(executor, audit);
    let stats = runner.execute(&scripts).await;
    runner.into_executor().close().await?;

    info!(
        scripts = stats.scripts_run,
        statements = stats.statements_executed,
        "Load finished"
    );
    output::print_run_stats(&stats, args.json)?;
    Ok(stats)
}
