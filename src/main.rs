use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use migration_matrix::analysis::VersionRange;
use migration_matrix::config::{AuditConfig, RunOptions};
use migration_matrix::error::AnalysisError;
use migration_matrix::{app, logging};
use tracing::error;

#[derive(Parser)]
#[command(name = "migration-matrix")]
#[command(version, about = "Audit module repositories for presence and migrations across versions")]
struct Cli {
    /// First version of the range (e.g. 14 or 14.0)
    #[arg(short, long)]
    start: String,

    /// Last version of the range, inclusive
    #[arg(short, long)]
    end: String,

    /// Catalogue CSV of `module,repository URL` rows
    #[arg(short, long)]
    file: PathBuf,

    /// Copy every migrations directory found into the output directory
    #[arg(long)]
    save_migrations: bool,

    /// Classify existing snapshots without running git or capturing migrations
    #[arg(long)]
    dry_run: bool,

    /// Also write logs to this file inside the output directory
    #[arg(long, value_name = "NAME")]
    log: Option<String>,

    /// Render version lists inline
    #[arg(long)]
    compact: bool,

    /// Configuration file (defaults to the user config file when present)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let range = VersionRange::parse(&cli.start, &cli.end)?;
    let config = AuditConfig::load(cli.config.as_deref())?;
    let options = RunOptions {
        range,
        capture: cli.save_migrations,
        dry_run: cli.dry_run,
        compact: cli.compact,
    };

    let log_file = cli
        .log
        .as_deref()
        .map(|name| logging::log_file_path(&config.output_dir, name));
    let _guard = logging::init(log_file.as_deref())?;

    let outcome = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(app::run(config, options, &cli.file));

    match outcome {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) if e.downcast_ref::<AnalysisError>() == Some(&AnalysisError::Interrupted) => {
            error!("Analysis interrupted by user, no reports were written");
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}
