//! Output formatting for CLI

use serde::Serialize;

use sheetsql_core::conversion::{ConversionReport, ConversionStatus, format_number};
use sheetsql_core::rename::RenameReport;
use sheetsql_core::runner::RunStats;

/// Number of failures listed before the output is cut short
const MAX_LISTED_ERRORS: usize = 20;

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the summary of a conversion run
pub fn print_conversion_report(
    report: &ConversionReport,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let rows: usize = report.results.iter().map(|r| r.rows_written).sum();
    let quarantined: usize = report.results.iter().map(|r| r.rows_quarantined).sum();

    println!();
    println!("Conversion Summary");
    println!("==================");
    println!("  Run ID:      {}", report.run_id);
    println!("  Files:       {}", format_number(report.total() as u64));
    println!("  Succeeded:   {}", format_number(report.succeeded() as u64));
    println!("  Empty:       {}", format_number(report.empty() as u64));
    println!("  Failed:      {}", format_number(report.failed() as u64));
    println!("  Rows:        {}", format_number(rows as u64));
    if quarantined > 0 {
        println!("  Quarantined: {}", format_number(quarantined as u64));
    }
    println!("  Duration:    {}", report.duration_formatted());

    let failures: Vec<_> = report
        .results
        .iter()
        .filter(|r| r.status == ConversionStatus::Error)
        .collect();
    if !failures.is_empty() {
        println!();
        println!("Failed files:");
        for result in failures.iter().take(MAX_LISTED_ERRORS) {
            println!(
                "  ✗ {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
        if failures.len() > MAX_LISTED_ERRORS {
            println!("  ... and {} more", failures.len() - MAX_LISTED_ERRORS);
        }
    }
    Ok(())
}

/// Print the summary of a script run
pub fn print_run_stats(stats: &RunStats, json: bool) -> Result<(), serde_json::Error> {
    if json {
        return print_json(stats);
    }

    println!();
    println!("Load Summary");
    println!("============");
    println!("  Scripts run:         {}", format_number(stats.scripts_run as u64));
    println!("  Scripts unreadable:  {}", format_number(stats.scripts_failed as u64));
    println!(
        "  Statements executed: {}",
        format_number(stats.statements_executed as u64)
    );
    println!(
        "  Statements failed:   {}",
        format_number(stats.statements_failed as u64)
    );
    println!("  Rows affected:       {}", format_number(stats.rows_affected));
    println!("  Duration:            {:.2?}", stats.duration);

    if !stats.errors.is_empty() {
        println!();
        println!("Errors:");
        for error in stats.errors.iter().take(MAX_LISTED_ERRORS) {
            println!("  ✗ {}", error);
        }
        if stats.errors_count > MAX_LISTED_ERRORS {
            println!("  ... and {} more", stats.errors_count - MAX_LISTED_ERRORS);
        }
    }
    Ok(())
}

/// Print the outcome of a rename
pub fn print_rename_report(
    report: &RenameReport,
    dry_run: bool,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        return print_json(report);
    }

    let verb = if dry_run { "Would rename" } else { "Renamed" };
    for renamed in &report.renamed {
        println!("{}: {} -> {}", verb, renamed.from.display(), renamed.to.display());
    }
    for skipped in &report.skipped {
        println!("Skipped: {} ({})", skipped.path.display(), skipped.reason);
    }
    if report.renamed.is_empty() && report.skipped.is_empty() {
        println!("No matching files");
    }
    Ok(())
}
