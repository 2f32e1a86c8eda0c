//! CLI command for writing configuration templates

use std::path::Path;

use crate::error::CliError;
use sheetsql_core::config::{AppConfig, write_new_file};
use sheetsql_core::runner::LEGACY_TEMPLATE;

/// Handle the `init-config` command
///
/// With `legacy` the line-based `db.cfg` layout is written instead of TOML.
pub fn handle_init_config(path: &Path, force: bool, legacy: bool) -> Result<(), CliError> {
    if legacy {
        write_new_file(path, LEGACY_TEMPLATE, force)?;
    } else {
        AppConfig::write_template(path, force)?;
    }
    println!("Wrote config template to {}", path.display());
    println!("Fill in the database credentials before running 'sheetsql load'.");
    Ok(())
}
