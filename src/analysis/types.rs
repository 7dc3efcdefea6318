//! Classification results produced by the analyzer

use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::catalogue::types::{CatalogueRowError, ModuleEntry};

/// A module entry whose repository could not be resolved at a version
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnavailableRecord {
    pub module: String,
    pub version: String,
    pub repository_url: String,
    pub line_number: usize,
}

impl fmt::Display for UnavailableRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {} (repository not found)", self.module, self.version)
    }
}

/// Per-repository accumulator filled during the version walk.
///
/// For a given module and version exactly one of the buckets applies:
/// `with_migrations`, `without_migrations`, `not_found` or `errors`.
/// `without_migrations` is a flat set; the other buckets track versions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryAnalysis {
    pub with_migrations: IndexMap<String, IndexSet<String>>,
    pub without_migrations: IndexSet<String>,
    pub not_found: IndexMap<String, IndexSet<String>>,
    pub errors: Vec<UnavailableRecord>,
}

impl RepositoryAnalysis {
    pub fn record_with_migrations(&mut self, module: &str, version: &str) {
        self.with_migrations
            .entry(module.to_string())
            .or_default()
            .insert(version.to_string());
    }

    pub fn record_without_migrations(&mut self, module: &str) {
        self.without_migrations.insert(module.to_string());
    }

    pub fn record_not_found(&mut self, module: &str, version: &str) {
        self.not_found
            .entry(module.to_string())
            .or_default()
            .insert(version.to_string());
    }

    pub fn record_unavailable(&mut self, entry: &ModuleEntry, version: &str) {
        self.errors.push(UnavailableRecord {
            module: entry.module_name.clone(),
            version: version.to_string(),
            repository_url: entry.repository_url.clone(),
            line_number: entry.line_number,
        });
    }

    /// Modules that never had a migrations directory in any version where they were present
    pub fn only_without_migrations(&self) -> impl Iterator<Item = &str> {
        self.without_migrations
            .iter()
            .filter(|m| !self.with_migrations.contains_key(m.as_str()))
            .map(String::as_str)
    }
}

/// Outcome of a whole run, handed to the renderers unmodified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditResults {
    /// Per-repository analyses in catalogue order
    pub repositories: IndexMap<String, RepositoryAnalysis>,
    pub catalogue_errors: Vec<CatalogueRowError>,
}

impl AuditResults {
    pub fn unavailable_records(&self) -> impl Iterator<Item = &UnavailableRecord> {
        self.repositories.values().flat_map(|a| a.errors.iter())
    }

    pub fn has_errors(&self) -> bool {
        !self.catalogue_errors.is_empty() || self.unavailable_records().next().is_some()
    }
}
