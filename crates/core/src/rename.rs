//! Batch renaming of files by substring
//!
//! Used to normalise workbook names before conversion, since the table name
//! is derived from the file name.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenameError {
    #[error("Search text must not be empty")]
    EmptyPattern,

    #[error("Directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One file that was (or would be) renamed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Renamed {
    pub from: PathBuf,
    pub to: PathBuf,
}

/// One file that matched but was left alone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameSkipped {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameReport {
    pub renamed: Vec<Renamed>,
    pub skipped: Vec<RenameSkipped>,
}

/// Replace every occurrence of `from` with `to` in the names of the files
/// below `dir`
///
/// Directories are searched recursively but never renamed themselves. A file
/// whose new name is already taken is skipped. With `dry_run` nothing is
/// touched and the report lists what would happen.
pub fn rename_files(
    dir: &Path,
    from: &str,
    to: &str,
    dry_run: bool,
) -> Result<RenameReport, RenameError> {
    if from.is_empty() {
        return Err(RenameError::EmptyPattern);
    }
    if !dir.is_dir() {
        return Err(RenameError::DirectoryNotFound(dir.to_path_buf()));
    }

    let pattern = format!("{}/**/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let entries =
        glob::glob(&pattern).map_err(|e| RenameError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    // Collected up front so renamed files are not visited again
    let mut candidates = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) if path.is_file() => {
                let matches = path
                    .file_name()
                    .is_some_and(|n| n.to_string_lossy().contains(from));
                if matches {
                    candidates.push(path);
                }
            }
            Ok(_) => {}
            Err(e) => tracing::warn!("Error accessing path: {}", e),
        }
    }
    candidates.sort();

    let mut report = RenameReport::default();
    for path in candidates {
        let old_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let target = path.with_file_name(old_name.replace(from, to));

        if target.exists() {
            report.skipped.push(RenameSkipped {
                path,
                reason: format!("{} already exists", target.display()),
            });
            continue;
        }
        if !dry_run {
            fs::rename(&path, &target)?;
            tracing::debug!(from = %path.display(), to = %target.display(), "Renamed file");
        }
        report.renamed.push(Renamed {
            from: path,
            to: target,
        });
    }

    Ok(report)
}
