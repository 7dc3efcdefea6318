//! Run orchestration: catalogue -> analyzer -> reports

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::analysis::{Analyzer, AuditResults, CancellationToken};
use crate::catalogue::read_catalogue;
use crate::config::{AuditConfig, RunOptions};
use crate::error::AnalysisError;
use crate::report::ReportWriter;
use crate::snapshot::{FsMigrationCapture, GitSnapshotProvider, MigrationCapture, SnapshotProvider};

/// Outcome of a completed run
#[derive(Debug)]
pub struct RunReport {
    pub results: AuditResults,
    pub written: Vec<PathBuf>,
}

/// Run the audit with the git provider and filesystem capture.
///
/// Ctrl-C cancels the walk at the next version boundary; an interrupted run
/// returns `AnalysisError::Interrupted` and writes no reports.
pub async fn run(
    config: AuditConfig,
    options: RunOptions,
    catalogue_path: &Path,
) -> anyhow::Result<RunReport> {
    let provider = Arc::new(GitSnapshotProvider::new(config.clone())?);
    let capture = Arc::new(FsMigrationCapture::new(config.clone()));
    let cancel = CancellationToken::new();

    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, stopping after the current step");
            signal_token.cancel();
        }
    });

    run_with(provider, capture, config, options, catalogue_path, cancel).await
}

/// Run the audit against the given collaborators
pub async fn run_with(
    provider: Arc<dyn SnapshotProvider>,
    capture: Arc<dyn MigrationCapture>,
    config: AuditConfig,
    options: RunOptions,
    catalogue_path: &Path,
    cancel: CancellationToken,
) -> anyhow::Result<RunReport> {
    let catalogue = read_catalogue(catalogue_path)?;
    info!(
        "Loaded {} modules in {} repositories from {:?} ({} invalid rows)",
        catalogue.module_count(),
        catalogue.repositories.len(),
        catalogue_path,
        catalogue.errors.len()
    );

    if !options.dry_run {
        std::fs::create_dir_all(config.output_dir.join("repos"))?;
        if options.capture {
            std::fs::create_dir_all(config.output_dir.join("migrations"))?;
        }
    }

    info!(
        "Analyzing versions {} to {}{}",
        options.range.versions().first().map(String::as_str).unwrap_or("-"),
        options.range.versions().last().map(String::as_str).unwrap_or("-"),
        if options.dry_run { " (dry run)" } else { "" }
    );

    let compact = options.compact;
    let analyzer = Analyzer::new(provider, capture, options, cancel.clone());
    let repositories = analyzer.analyze_catalogue(&catalogue).await?;
    if cancel.is_cancelled() {
        return Err(AnalysisError::Interrupted.into());
    }

    let results = AuditResults {
        repositories,
        catalogue_errors: catalogue.errors,
    };

    let written = ReportWriter::new(config.clone(), compact).write_all(&results)?;

    log_errors(&results);
    info!("Analysis complete, reports are in {:?}", config.output_dir);

    Ok(RunReport { results, written })
}

fn log_errors(results: &AuditResults) {
    for row_error in &results.catalogue_errors {
        error!("{}", row_error);
    }
    for record in results.unavailable_records() {
        error!("line {}: {}", record.line_number, record);
    }
}
