//! Snapshot provider trait for inspecting repository trees at a version

use std::collections::HashSet;

#[cfg(test)]
use mockall::automock;

use crate::analysis::cancel::CancellationToken;
use crate::catalogue::types::Repository;

/// Trait for making a repository's tree available at a given version
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait SnapshotProvider: Send + Sync {
    /// Probes the repository's canonical location.
    ///
    /// Network failures and timeouts are reported as `false`.
    async fn exists(&self, repository: &Repository) -> bool;

    /// Creates or updates the local tree so it matches `version`.
    ///
    /// Best effort: failures are logged and leave whatever partial tree exists.
    /// Implementations should stop early once `cancel` fires.
    async fn materialize(&self, repository: &Repository, version: &str, cancel: &CancellationToken);

    /// Returns the module-like directory names present in the tree at `version`.
    ///
    /// Hidden entries are excluded.
    async fn list_modules(&self, repository: &Repository, version: &str) -> HashSet<String>;

    /// Returns true if the module carries a migrations directory at `version`
    async fn has_migrations(&self, repository: &Repository, version: &str, module: &str) -> bool;
}
