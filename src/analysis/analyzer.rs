//! Version matrix walk: classifies every catalogue module at every version

use std::sync::Arc;

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::analysis::cancel::CancellationToken;
use crate::analysis::types::RepositoryAnalysis;
use crate::catalogue::types::{Catalogue, Repository};
use crate::config::RunOptions;
use crate::error::AnalysisError;
use crate::snapshot::capture::MigrationCapture;
use crate::snapshot::provider::SnapshotProvider;

/// Walks repositories one at a time and versions in range order
pub struct Analyzer {
    provider: Arc<dyn SnapshotProvider>,
    capture: Arc<dyn MigrationCapture>,
    options: RunOptions,
    cancel: CancellationToken,
}

impl Analyzer {
    pub fn new(
        provider: Arc<dyn SnapshotProvider>,
        capture: Arc<dyn MigrationCapture>,
        options: RunOptions,
        cancel: CancellationToken,
    ) -> Self {
        Self {
            provider,
            capture,
            options,
            cancel,
        }
    }

    /// Analyze every repository of the catalogue, in catalogue order
    pub async fn analyze_catalogue(
        &self,
        catalogue: &Catalogue,
    ) -> Result<IndexMap<String, RepositoryAnalysis>, AnalysisError> {
        let mut results = IndexMap::with_capacity(catalogue.repositories.len());

        for (id, repository) in &catalogue.repositories {
            let analysis = self.analyze_repository(repository).await?;
            results.insert(id.clone(), analysis);
        }

        Ok(results)
    }

    /// Classify each catalogue module of `repository` at every version of the range.
    ///
    /// The first failed existence probe records an error for every module entry at
    /// that version and every later one, and ends the walk for this repository.
    /// Returns `Err(Interrupted)` when cancellation is observed between versions
    /// or once the last version is done.
    pub async fn analyze_repository(
        &self,
        repository: &Repository,
    ) -> Result<RepositoryAnalysis, AnalysisError> {
        let mut analysis = RepositoryAnalysis::default();
        let modules = repository.module_names();
        let versions = self.options.range.versions();

        for (index, version) in versions.iter().enumerate() {
            self.check_cancelled()?;

            if !self.provider.exists(repository).await {
                warn!("Repository not found: {}", repository.url);
                for remaining in &versions[index..] {
                    for entry in &repository.modules {
                        analysis.record_unavailable(entry, remaining);
                    }
                }
                break;
            }

            if !self.options.dry_run {
                self.provider
                    .materialize(repository, version, &self.cancel)
                    .await;
                self.check_cancelled()?;
            }

            let listing = self.provider.list_modules(repository, version).await;
            let (present, absent): (Vec<&str>, Vec<&str>) =
                modules.iter().copied().partition(|m| listing.contains(*m));
            log_breakdown(repository, version, &present, &absent, &listing);

            for module in absent {
                analysis.record_not_found(module, version);
            }

            for module in present {
                if !self
                    .provider
                    .has_migrations(repository, version, module)
                    .await
                {
                    analysis.record_without_migrations(module);
                    continue;
                }

                analysis.record_with_migrations(module, version);
                if self.options.capture && !self.options.dry_run {
                    let _ = self
                        .capture
                        .capture(repository, version, module)
                        .inspect_err(|e| {
                            warn!("Failed to capture migrations of {} @ {}: {}", module, version, e)
                        });
                }
            }
        }

        self.check_cancelled()?;
        Ok(analysis)
    }

    fn check_cancelled(&self) -> Result<(), AnalysisError> {
        if self.cancel.is_cancelled() {
            Err(AnalysisError::Interrupted)
        } else {
            Ok(())
        }
    }
}

fn log_breakdown(
    repository: &Repository,
    version: &str,
    present: &[&str],
    absent: &[&str],
    listing: &std::collections::HashSet<String>,
) {
    info!(
        "{} @ {}: {} catalogue modules present, {} not found",
        repository.id,
        version,
        present.len(),
        absent.len()
    );
    debug!("Present in {} @ {}: {:?}", repository.id, version, present);
    debug!("Not found in {} @ {}: {:?}", repository.id, version, absent);

    let catalogue = repository.module_names();
    let mut untracked: Vec<_> = listing
        .iter()
        .filter(|name| !catalogue.contains(name.as_str()))
        .collect();
    untracked.sort();
    debug!(
        "Present in {} @ {} but not in catalogue: {:?}",
        repository.id, version, untracked
    );
}
