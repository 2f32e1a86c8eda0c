//! sheetsql - turn a folder of spreadsheets into MariaDB tables

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::convert::{ConvertArgs, handle_convert};
use commands::init::handle_init_config;
use commands::load::{LoadArgs, handle_load};
use commands::rename::{RenameArgs, handle_rename};
use error::CliError;
use sheetsql_core::config::{AppConfig, DEFAULT_CONFIG_FILE};
use sheetsql_core::conversion::AuditLog;

#[derive(Parser)]
#[command(name = "sheetsql")]
#[command(version, about = "Convert spreadsheets into MariaDB schema and insert scripts")]
struct Cli {
    /// Config file (defaults to ./sheetsql.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate CREATE TABLE and INSERT scripts for every workbook
    Convert(ConvertOpts),
    /// Execute the generated scripts against MariaDB
    Load(LoadOpts),
    /// Convert, then load
    Run {
        #[command(flatten)]
        convert: ConvertOpts,
        #[command(flatten)]
        load: LoadOpts,
    },
    /// Write a commented config template
    InitConfig {
        /// Destination file
        #[arg(default_value = DEFAULT_CONFIG_FILE)]
        path: PathBuf,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
        /// Write the line-based db.cfg layout instead
        #[arg(long)]
        legacy: bool,
    },
    /// Rename files below a directory by replacing part of their names
    Rename {
        dir: PathBuf,
        /// Text to replace
        #[arg(allow_hyphen_values = true)]
        from: String,
        /// Replacement text
        #[arg(allow_hyphen_values = true)]
        to: String,
        /// Only show what would be renamed
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Args)]
struct ConvertOpts {
    /// Directory holding the workbooks
    #[arg(short, long)]
    input: Option<PathBuf>,
    #[arg(long)]
    schema_dir: Option<PathBuf>,
    #[arg(long)]
    data_dir: Option<PathBuf>,
    #[arg(long)]
    quarantine_dir: Option<PathBuf>,
    #[arg(long)]
    log_dir: Option<PathBuf>,
    /// Rows per INSERT statement
    #[arg(long)]
    batch_size: Option<usize>,
    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long)]
    concurrency: Option<usize>,
    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Args)]
struct LoadOpts {
    /// Line-based credentials file (username, password, database, hostname, port)
    #[arg(long)]
    db_config: Option<PathBuf>,
    /// Unix socket of the MariaDB server
    #[arg(long)]
    socket: Option<PathBuf>,
    /// Also run the quarantine scripts
    #[arg(long)]
    include_quarantine: bool,
}

impl ConvertOpts {
    fn into_args(self, json: bool) -> ConvertArgs {
        ConvertArgs {
            input: self.input,
            schema_dir: self.schema_dir,
            data_dir: self.data_dir,
            quarantine_dir: self.quarantine_dir,
            log_dir: self.log_dir,
            batch_size: self.batch_size,
            concurrency: self.concurrency,
            progress: !self.no_progress,
            json,
        }
    }
}

impl LoadOpts {
    fn into_args(self, json: bool) -> LoadArgs {
        LoadArgs {
            db_config: self.db_config,
            socket: self.socket,
            include_quarantine: self.include_quarantine,
            json,
        }
    }
}

fn init_tracing(verbose: u8) -> anyhow::Result<()> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Cannot install log subscriber: {}", e))
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    match dispatch(cli) {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let json = cli.json;
    match cli.command {
        Commands::InitConfig {
            path,
            force,
            legacy,
        } => handle_init_config(&path, force, legacy),
        Commands::Rename {
            dir,
            from,
            to,
            dry_run,
        } => handle_rename(&RenameArgs {
            dir,
            from,
            to,
            dry_run,
            json,
        })
        .map(|_| ()),
        Commands::Convert(opts) => {
            let app = AppConfig::load_or_default(cli.config.as_deref())?;
            let args = opts.into_args(json);
            with_run_log(&args.conversion_config(&app).log_dir, |_| {
                handle_convert(&args, &app)?;
                Ok(())
            })
        }
        Commands::Load(opts) => {
            let app = AppConfig::load_or_default(cli.config.as_deref())?;
            let args = opts.into_args(json);
            with_run_log(&app.paths.log_dir, |audit| {
                block_on(handle_load(&args, &app, audit.clone()))??;
                Ok(())
            })
        }
        Commands::Run { convert, load } => {
            let mut app = AppConfig::load_or_default(cli.config.as_deref())?;
            let convert = convert.into_args(json);
            let load = load.into_args(json);

            // The load phase reads the directories the conversion wrote to
            let conversion = convert.conversion_config(&app);
            app.paths.schema_dir = conversion.schema_dir.clone();
            app.paths.data_dir = conversion.data_dir.clone();
            app.paths.quarantine_dir = conversion.quarantine_dir.clone();
            app.paths.log_dir = conversion.log_dir.clone();

            with_run_log(&conversion.log_dir, |audit| {
                handle_convert(&convert, &app)?;
                block_on(handle_load(&load, &app, audit.clone()))??;
                Ok(())
            })
        }
    }
}

/// Bracket a command with start and end lines in `run.log`
fn with_run_log(
    log_dir: &std::path::Path,
    f: impl FnOnce(&AuditLog) -> Result<(), CliError>,
) -> Result<(), CliError> {
    let audit = AuditLog::open(log_dir)?;
    audit.milestone("Program started");
    let result = f(&audit);
    match &result {
        Ok(()) => audit.milestone("Program finished"),
        Err(e) => {
            audit.error("program", e);
            audit.milestone("Program aborted");
        }
    }
    result
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output, CliError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_run_with_flags() {
        let cli = Cli::try_parse_from([
            "sheetsql",
            "run",
            "--input",
            "sheets",
            "-j",
            "4",
            "--include-quarantine",
            "--json",
        ])
        .unwrap();
        assert!(cli.json);
        match cli.command {
            Commands::Run { convert, load } => {
                assert_eq!(convert.input, Some(PathBuf::from("sheets")));
                assert_eq!(convert.concurrency, Some(4));
                assert!(load.include_quarantine);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_parse_rename() {
        let cli = Cli::try_parse_from(["sheetsql", "rename", "xlsx", "_draft", "", "--dry-run"])
            .unwrap();
        match cli.command {
            Commands::Rename { from, to, dry_run, .. } => {
                assert_eq!(from, "_draft");
                assert_eq!(to, "");
                assert!(dry_run);
            }
            _ => panic!("expected rename"),
        }
    }
}
