//! Sequential execution of generated SQL scripts

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use super::executor::StatementExecutor;
use super::splitter::split_statements;
use crate::conversion::AuditLog;

/// Maximum number of error messages kept in [`RunStats`]
const MAX_RECORDED_ERRORS: usize = 100;

/// Statistics from a script run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    /// Scripts that were read and executed
    pub scripts_run: usize,
    /// Scripts that could not be read
    pub scripts_failed: usize,
    /// Statements that succeeded
    pub statements_executed: usize,
    /// Statements that were rejected and skipped
    pub statements_failed: usize,
    /// Rows reported as affected by successful statements
    pub rows_affected: u64,
    /// Number of errors encountered
    pub errors_count: usize,
    /// List of errors (limited to first 100)
    pub errors: Vec<String>,
    #[serde(skip)]
    pub duration: Duration,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error (limited to 100)
    pub fn add_error(&mut self, error: String) {
        self.errors_count += 1;
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push(error);
        }
    }

    /// Whether nothing failed
    pub fn is_clean(&self) -> bool {
        self.errors_count == 0
    }
}

/// Runs scripts statement by statement
///
/// A failing statement is logged and skipped; a script that cannot be read
/// is logged and skipped. Nothing is rolled back.
pub struct ScriptRunner<E: StatementExecutor> {
    executor: E,
    audit: AuditLog,
}

impl<E: StatementExecutor> ScriptRunner<E> {
    pub fn new(executor: E, audit: AuditLog) -> Self {
        Self { executor, audit }
    }

    /// Execute every script in order
    pub async fn execute(&mut self, scripts: &[PathBuf]) -> RunStats {
        let start = Instant::now();
        let mut stats = RunStats::new();

        for script in scripts {
            self.execute_script(script, &mut stats).await;
        }

        stats.duration = start.elapsed();
        info!(
            scripts = stats.scripts_run,
            statements = stats.statements_executed,
            failed = stats.statements_failed,
            duration_ms = stats.duration.as_millis() as u64,
            "Script run completed"
        );
        stats
    }

    /// Execute one script, adding its outcome to `stats`
    pub async fn execute_script(&mut self, path: &Path, stats: &mut RunStats) {
        let started = Instant::now();
        self.audit.milestone(&format!("Started {}", path.display()));

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let message = format!("Cannot read {}: {}", path.display(), e);
                warn!(path = %path.display(), error = %e, "Skipping unreadable script");
                self.audit.error(&path.display().to_string(), &e);
                stats.scripts_failed += 1;
                stats.add_error(message);
                return;
            }
        };

        let statements = split_statements(&content);
        debug!(path = %path.display(), statements = statements.len(), "Executing script");

        let mut failed = 0;
        for (index, statement) in statements.iter().enumerate() {
            match self.executor.execute(statement).await {
                Ok(rows) => {
                    stats.statements_executed += 1;
                    stats.rows_affected += rows;
                }
                Err(e) => {
                    failed += 1;
                    stats.statements_failed += 1;
                    let context = format!("{} statement {}", path.display(), index + 1);
                    error!(
                        path = %path.display(),
                        statement = index + 1,
                        error = %e,
                        "Statement failed"
                    );
                    self.audit.error(&context, &e);
                    stats.add_error(format!("{}: {}", context, e));
                }
            }
        }

        stats.scripts_run += 1;
        let elapsed = started.elapsed();
        self.audit.milestone(&format!(
            "Finished {} in {:?} ({} statements, {} failed)",
            path.display(),
            elapsed,
            statements.len(),
            failed
        ));
        info!(
            path = %path.display(),
            statements = statements.len(),
            failed,
            duration_ms = elapsed.as_millis() as u64,
            "Executed script"
        );
    }

    /// Hand back the executor
    pub fn into_executor(self) -> E {
        self.executor
    }
}

/// Sorted `.sql` files directly inside `dir`
///
/// A missing directory yields no scripts.
pub fn collect_scripts(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        warn!(dir = %dir.display(), "Script directory not found");
        return Ok(Vec::new());
    }

    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_sql = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("sql"));
        if path.is_file() && is_sql {
            scripts.push(path);
        }
    }
    scripts.sort();
    Ok(scripts)
}

/// Scripts to load, in order: schemas, then data, then quarantine if asked
pub fn load_order(
    schema_dir: &Path,
    data_dir: &Path,
    quarantine_dir: Option<&Path>,
) -> std::io::Result<Vec<PathBuf>> {
    let mut scripts = collect_scripts(schema_dir)?;
    scripts.extend(collect_scripts(data_dir)?);
    if let Some(dir) = quarantine_dir {
        scripts.extend(collect_scripts(dir)?);
    }
    Ok(scripts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_error_is_capped() {
        let mut stats = RunStats::new();
        for i in 0..150 {
            stats.add_error(format!("error {}", i));
        }
        assert_eq!(stats.errors_count, 150);
        assert_eq!(stats.errors.len(), 100);
        assert!(!stats.is_clean());
    }

    #[test]
    fn test_load_order() {
        let dir = TempDir::new().unwrap();
        let schema = dir.path().join("SQLTable");
        let data = dir.path().join("SQLData");
        let quarantine = dir.path().join("SQLQuarantine");
        for d in [&schema, &data, &quarantine] {
            fs::create_dir_all(d).unwrap();
        }
        fs::write(schema.join("b.sql"), "").unwrap();
        fs::write(schema.join("a.sql"), "").unwrap();
        fs::write(schema.join("notes.txt"), "").unwrap();
        fs::write(data.join("data_a.sql"), "").unwrap();
        fs::write(quarantine.join("quarantine_a.sql"), "").unwrap();

        let scripts = load_order(&schema, &data, None).unwrap();
        assert_eq!(
            scripts,
            vec![schema.join("a.sql"), schema.join("b.sql"), data.join("data_a.sql")]
        );

        let scripts = load_order(&schema, &data, Some(quarantine.as_path())).unwrap();
        assert_eq!(scripts.last().unwrap(), &quarantine.join("quarantine_a.sql"));
    }

    #[test]
    fn test_missing_dir_has_no_scripts() {
        let dir = TempDir::new().unwrap();
        assert!(collect_scripts(&dir.path().join("absent")).unwrap().is_empty());
    }
}
