//! Workbook discovery

use std::path::{Path, PathBuf};

use super::config::ConversionConfig;
use super::error::ConversionError;

/// List the workbooks directly inside the configured input directory
///
/// Sub-directories are not searched. Paths come back sorted so dispatch order
/// is deterministic.
pub fn discover_workbooks(config: &ConversionConfig) -> Result<Vec<PathBuf>, ConversionError> {
    let dir = &config.input_dir;
    check_input_dir(dir)?;

    let pattern = format!("{}/*", glob::Pattern::escape(&dir.to_string_lossy()));
    let entries = glob::glob(&pattern)
        .map_err(|e| ConversionError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() && config.accepts(&path) {
                    files.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("Error accessing path: {}", e);
            }
        }
    }

    files.sort();
    tracing::debug!(dir = %dir.display(), count = files.len(), "Discovered workbooks");
    Ok(files)
}

/// Fail unless `dir` exists and is a directory
pub fn check_input_dir(dir: &Path) -> Result<(), ConversionError> {
    if !dir.exists() {
        return Err(ConversionError::InputNotFound(dir.to_path_buf()));
    }
    if !dir.is_dir() {
        return Err(ConversionError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}
