//! Concurrent conversion of a directory of workbooks

use std::collections::HashMap;
use std::fs;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Instant;

use tracing::{debug, error, info, info_span};
use uuid::Uuid;

use super::audit::AuditLog;
use super::config::ConversionConfig;
use super::discover::{check_input_dir, discover_workbooks};
use super::error::{ConversionError, ConversionOutcome, FileError};
use super::progress::ConversionProgress;
use super::result::{ConversionReport, ConversionResult};
use super::task::convert_file;
use crate::sheet::WorkbookReader;
use crate::sql::table_name_from_path;

/// Converts every workbook of the input directory on a bounded worker pool
///
/// Each file is an independent task. Workers send their results over a
/// channel to a single aggregator thread, which owns the completion counter,
/// the audit logs and the progress bar.
pub struct ConversionPipeline<R: WorkbookReader> {
    config: ConversionConfig,
    reader: R,
}

/// A discovered file, plus the earlier file already claiming its table name
struct Job {
    path: PathBuf,
    claimed_by: Option<(String, PathBuf)>,
}

impl<R: WorkbookReader> ConversionPipeline<R> {
    pub fn new(config: ConversionConfig, reader: R) -> Self {
        Self { config, reader }
    }

    pub fn config(&self) -> &ConversionConfig {
        &self.config
    }

    /// Run the conversion
    ///
    /// Only setup problems are returned as errors. Per-file failures are
    /// part of the report.
    pub fn run(&self) -> ConversionOutcome<ConversionReport> {
        let run_id = Uuid::new_v4().to_string();
        let _span = info_span!("conversion_run", run_id = %run_id).entered();
        let start = Instant::now();

        self.config
            .validate()
            .map_err(ConversionError::InvalidConfig)?;
        check_input_dir(&self.config.input_dir)?;
        self.prepare_output_dirs()?;

        let audit = AuditLog::open(&self.config.log_dir).map_err(|e| {
            ConversionError::io_with_path(&self.config.log_dir, "creating log directory", e)
        })?;
        audit.milestone("Conversion started");

        let files = discover_workbooks(&self.config)?;
        let jobs = assign_tables(files);
        let workers = self.config.effective_workers();

        info!(
            run_id = %run_id,
            input = %self.config.input_dir.display(),
            files = jobs.len(),
            workers,
            "Starting conversion"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("sheetsql-worker-{}", i))
            .build()
            .map_err(|e| ConversionError::ThreadPool(e.to_string()))?;

        let total = jobs.len();
        let progress = ConversionProgress::new(total as u64, self.config.show_progress);
        let (tx, rx) = mpsc::channel::<ConversionResult>();

        let results = std::thread::scope(|s| {
            let aggregator = s.spawn(|| aggregate(rx, total, &audit, progress));

            pool.scope(|scope| {
                for job in &jobs {
                    let tx = tx.clone();
                    scope.spawn(move |_| {
                        let result = self.run_job(job);
                        // Only fails if the aggregator is gone, which ends the run anyway
                        let _ = tx.send(result);
                    });
                }
            });
            drop(tx);

            aggregator.join()
        })
        .map_err(|_| ConversionError::ThreadPool("result aggregator panicked".to_string()))?;

        let report = ConversionReport {
            run_id,
            results,
            duration_ms: start.elapsed().as_millis() as u64,
        };

        audit.milestone(&format!(
            "Conversion finished: {} succeeded, {} failed, {} empty in {}",
            report.succeeded(),
            report.failed(),
            report.empty(),
            report.duration_formatted()
        ));
        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            empty = report.empty(),
            duration_ms = report.duration_ms,
            "Conversion completed"
        );

        Ok(report)
    }

    fn prepare_output_dirs(&self) -> ConversionOutcome<()> {
        for dir in [
            &self.config.schema_dir,
            &self.config.data_dir,
            &self.config.quarantine_dir,
        ] {
            fs::create_dir_all(dir).map_err(|e| {
                ConversionError::io_with_path(dir, "creating output directory", e)
            })?;
        }
        Ok(())
    }

    fn run_job(&self, job: &Job) -> ConversionResult {
        if let Some((table, first)) = &job.claimed_by {
            let err = FileError::DuplicateTable {
                table: table.clone(),
                first: first.clone(),
            };
            return ConversionResult::error(&job.path, Default::default(), err.to_string())
                .with_table(table);
        }

        let started = Instant::now();
        debug!(path = %job.path.display(), "Converting workbook");
        catch_unwind(AssertUnwindSafe(|| {
            convert_file(&job.path, &self.reader, &self.config)
        }))
        .unwrap_or_else(|_| {
            ConversionResult::error(&job.path, started.elapsed(), "conversion panicked")
        })
    }
}

/// Convert the configured input directory with the xlsx reader
#[cfg(feature = "xlsx")]
pub fn run_conversion(config: ConversionConfig) -> ConversionOutcome<ConversionReport> {
    ConversionPipeline::new(config, crate::sheet::XlsxReader::new()).run()
}

/// Pair each file with the first earlier file mapping to the same table
fn assign_tables(files: Vec<PathBuf>) -> Vec<Job> {
    let mut owners: HashMap<String, PathBuf> = HashMap::new();
    files
        .into_iter()
        .map(|path| {
            let claimed_by = table_name_from_path(&path).and_then(|table| {
                match owners.get(&table) {
                    Some(first) => Some((table, first.clone())),
                    None => {
                        owners.insert(table, path.clone());
                        None
                    }
                }
            });
            Job { path, claimed_by }
        })
        .collect()
}

fn aggregate(
    rx: Receiver<ConversionResult>,
    total: usize,
    audit: &AuditLog,
    progress: ConversionProgress,
) -> Vec<ConversionResult> {
    let mut results = Vec::with_capacity(total);

    for result in rx {
        let completed = results.len() + 1;
        audit.file_processed(
            &result.path,
            result.duration,
            &result.status.to_string(),
            completed,
            total,
        );

        if let Some(err) = &result.error {
            error!(path = %result.path.display(), error = %err, "File failed");
            audit.error(&result.path.display().to_string(), err);
            progress.error(&format!("{}: {}", result.path.display(), err));
        } else {
            info!(
                path = %result.path.display(),
                status = %result.status,
                completed,
                total,
                "File processed"
            );
        }

        progress.file_done(&file_name(&result.path));
        results.push(result);
    }

    progress.finish(&format!("{} files processed", results.len()));
    results
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assign_tables_flags_collisions() {
        let jobs = assign_tables(vec![
            PathBuf::from("in/Sales.xlsx"),
            PathBuf::from("in/sales.xlsx"),
            PathBuf::from("in/other.xlsx"),
            PathBuf::from("in/---.xlsx"),
        ]);

        assert!(jobs[0].claimed_by.is_none());
        let (table, first) = jobs[1].claimed_by.as_ref().unwrap();
        assert_eq!(table, "sales");
        assert_eq!(first, &PathBuf::from("in/Sales.xlsx"));
        assert!(jobs[2].claimed_by.is_none());
        assert!(jobs[3].claimed_by.is_none());
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(Path::new("in/a.xlsx")), "a.xlsx");
        assert_eq!(file_name(Path::new("/")), "");
    }
}
