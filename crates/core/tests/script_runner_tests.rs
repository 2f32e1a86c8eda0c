//! Integration tests for the script runner using a recording executor

use std::fs;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use sheetsql_core::conversion::{AuditLog, ERROR_LOG, RUN_LOG};
use sheetsql_core::runner::{ExecutorError, ScriptRunner, StatementExecutor, load_order};

/// Records every statement and rejects those containing `FAIL`
#[derive(Clone, Default)]
struct RecordingExecutor {
    executed: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl StatementExecutor for RecordingExecutor {
    async fn execute(&mut self, statement: &str) -> Result<u64, ExecutorError> {
        if statement.contains("FAIL") {
            return Err(ExecutorError::Statement("syntax error".to_string()));
        }
        self.executed.lock().unwrap().push(statement.to_string());
        Ok(1)
    }
}

#[tokio::test]
async fn test_failed_statement_is_skipped() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("t.sql");
    fs::write(
        &script,
        "INSERT INTO t VALUES (1);\nFAIL;\nINSERT INTO t VALUES ('a;b');\n",
    )
    .unwrap();

    let executor = RecordingExecutor::default();
    let audit = AuditLog::open(dir.path().join("log")).unwrap();
    let mut runner = ScriptRunner::new(executor.clone(), audit);
    let stats = runner.execute(std::slice::from_ref(&script)).await;

    assert_eq!(stats.scripts_run, 1);
    assert_eq!(stats.statements_executed, 2);
    assert_eq!(stats.statements_failed, 1);
    assert_eq!(stats.rows_affected, 2);
    assert!(!stats.is_clean());
    assert_eq!(
        *executor.executed.lock().unwrap(),
        vec![
            "INSERT INTO t VALUES (1)".to_string(),
            "INSERT INTO t VALUES ('a;b')".to_string()
        ]
    );

    let error_log = fs::read_to_string(dir.path().join("log").join(ERROR_LOG)).unwrap();
    assert!(error_log.contains("statement 2"));
    assert!(error_log.contains("syntax error"));
}

#[tokio::test]
async fn test_unreadable_script_is_skipped() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("good.sql");
    fs::write(&good, "SELECT 1;").unwrap();
    let missing = dir.path().join("missing.sql");

    let executor = RecordingExecutor::default();
    let mut runner = ScriptRunner::new(executor.clone(), AuditLog::disabled());
    let stats = runner.execute(&[missing, good]).await;

    assert_eq!(stats.scripts_failed, 1);
    assert_eq!(stats.scripts_run, 1);
    assert_eq!(stats.statements_executed, 1);
    assert_eq!(stats.errors_count, 1);
    assert!(stats.errors[0].contains("missing.sql"));
}

#[tokio::test]
async fn test_schemas_run_before_data() {
    let dir = TempDir::new().unwrap();
    let schema_dir = dir.path().join("SQLTable");
    let data_dir = dir.path().join("SQLData");
    fs::create_dir_all(&schema_dir).unwrap();
    fs::create_dir_all(&data_dir).unwrap();
    fs::write(data_dir.join("data_a.sql"), "INSERT INTO a VALUES (1);").unwrap();
    fs::write(schema_dir.join("a.sql"), "CREATE TABLE a (x INT);").unwrap();

    let scripts = load_order(&schema_dir, &data_dir, None).unwrap();
    let executor = RecordingExecutor::default();
    let log_dir = dir.path().join("log");
    let mut runner = ScriptRunner::new(executor.clone(), AuditLog::open(&log_dir).unwrap());
    let stats = runner.execute(&scripts).await;

    assert!(stats.is_clean());
    let executed = executor.executed.lock().unwrap();
    assert!(executed[0].starts_with("CREATE TABLE"));
    assert!(executed[1].starts_with("INSERT INTO"));

    let run_log = fs::read_to_string(log_dir.join(RUN_LOG)).unwrap();
    assert!(run_log.contains("Started"));
    assert!(run_log.contains("Finished"));
}
