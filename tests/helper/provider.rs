//! Snapshot provider test utilities

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use migration_matrix::analysis::CancellationToken;
use migration_matrix::catalogue::Repository;
use migration_matrix::config::AuditConfig;
use migration_matrix::snapshot::SnapshotProvider;
use migration_matrix::snapshot::tree::{list_module_dirs, resolve_module_dir};

/// Provider reading pre-built trees under the configured snapshot directories.
///
/// Repositories listed as missing fail the existence probe.
pub struct FixtureProvider {
    config: AuditConfig,
    missing: HashSet<String>,
    materialized: Mutex<Vec<(String, String)>>,
    /// Cancelled on the first migrations check, standing in for Ctrl-C mid-version
    cancel_on_check: Option<CancellationToken>,
}

impl FixtureProvider {
    pub fn new(config: &AuditConfig) -> Self {
        Self {
            config: config.clone(),
            missing: HashSet::new(),
            materialized: Mutex::new(Vec::new()),
            cancel_on_check: None,
        }
    }

    pub fn cancelling_on_check(mut self, cancel: &CancellationToken) -> Self {
        self.cancel_on_check = Some(cancel.clone());
        self
    }

    pub fn with_missing(mut self, repository: &str) -> Self {
        self.missing.insert(repository.to_string());
        self
    }

    /// (repository, version) pairs passed to `materialize`, in call order
    pub fn materialized(&self) -> Vec<(String, String)> {
        self.materialized.lock().unwrap().clone()
    }
}

#[async_trait]
impl SnapshotProvider for FixtureProvider {
    async fn exists(&self, repository: &Repository) -> bool {
        !self.missing.contains(&repository.id)
    }

    async fn materialize(&self, repository: &Repository, version: &str, _cancel: &CancellationToken) {
        self.materialized
            .lock()
            .unwrap()
            .push((repository.id.clone(), version.to_string()));
    }

    async fn list_modules(&self, repository: &Repository, version: &str) -> HashSet<String> {
        let dir = self.config.snapshot_dir(&repository.id, version);
        list_module_dirs(&dir, &self.config.search_roots)
    }

    async fn has_migrations(&self, repository: &Repository, version: &str, module: &str) -> bool {
        if let Some(cancel) = &self.cancel_on_check {
            cancel.cancel();
        }
        let dir = self.config.snapshot_dir(&repository.id, version);
        resolve_module_dir(&dir, &self.config.search_roots, module)
            .is_some_and(|module_dir| module_dir.join(&self.config.migrations_dir_name).is_dir())
    }
}

/// Create `module` (optionally with a migration script) in the snapshot of `repository` at `version`.
///
/// `module` may include a search root prefix such as `addons/sale`.
pub fn write_module(
    config: &AuditConfig,
    repository: &str,
    version: &str,
    module: &str,
    with_migrations: bool,
) -> PathBuf {
    let module_dir = config.snapshot_dir(repository, version).join(module);
    std::fs::create_dir_all(&module_dir).unwrap();
    std::fs::write(module_dir.join("__manifest__.py"), "{}").unwrap();
    if with_migrations {
        let scripts = module_dir
            .join(&config.migrations_dir_name)
            .join(format!("{}.1.0.0", version));
        std::fs::create_dir_all(&scripts).unwrap();
        std::fs::write(scripts.join("post-migration.py"), "def migrate(cr, version):\n    pass\n")
            .unwrap();
    }
    module_dir
}

/// Write catalogue lines to `<dir>/modules.csv`
pub fn write_catalogue(dir: &Path, lines: &[&str]) -> PathBuf {
    let path = dir.join("modules.csv");
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}
