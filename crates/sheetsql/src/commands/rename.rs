//! CLI command for renaming workbook files

use std::path::PathBuf;

use crate::error::CliError;
use crate::output;
use sheetsql_core::rename::{RenameReport, rename_files};

/// Arguments for the `rename` command
#[derive(Debug)]
pub struct RenameArgs {
    pub dir: PathBuf,
    pub from: String,
    pub to: String,
    pub dry_run: bool,
    pub json: bool,
}

/// Handle the `rename` command
pub fn handle_rename(args: &RenameArgs) -> Result<RenameReport, CliError> {
    let report = rename_files(&args.dir, &args.from, &args.to, args.dry_run)?;
    output::print_rename_report(&report, args.dry_run, args.json)?;
    Ok(report)
}
