//! Common types for the catalogue

use std::fmt;

use indexmap::{IndexMap, IndexSet};

/// One (module, repository) row of the catalogue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleEntry {
    /// Module directory name (e.g., "sale_report_extension")
    pub module_name: String,
    /// Repository identifier derived from the URL path (e.g., "sale-reporting")
    pub repository_id: String,
    /// Repository URL as written in the catalogue
    pub repository_url: String,
    /// 1-indexed catalogue line, used only for error attribution
    pub line_number: usize,
}

/// Why a catalogue row was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowErrorKind {
    /// Fewer than two columns
    MissingColumns,
    /// No repository identifier could be extracted from the URL
    InvalidUrl,
}

/// A catalogue row that failed structural validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueRowError {
    pub line_number: usize,
    pub raw_row: Vec<String>,
    pub kind: RowErrorKind,
}

impl fmt::Display for CatalogueRowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            RowErrorKind::MissingColumns => write!(
                f,
                "line {}: invalid row format {:?}",
                self.line_number, self.raw_row
            ),
            RowErrorKind::InvalidUrl => write!(
                f,
                "line {}: invalid repository URL {:?}",
                self.line_number,
                self.raw_row.get(1).map(|s| s.trim()).unwrap_or_default()
            ),
        }
    }
}

/// A repository and the module entries the catalogue places in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    pub id: String,
    /// URL taken from the first catalogue row naming this repository
    pub url: String,
    /// Entries in catalogue order, duplicates included
    pub modules: Vec<ModuleEntry>,
}

impl Repository {
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            modules: Vec::new(),
        }
    }

    /// Distinct module names in catalogue order
    pub fn module_names(&self) -> IndexSet<&str> {
        self.modules.iter().map(|m| m.module_name.as_str()).collect()
    }
}

/// Parsed catalogue: repositories in first-seen order plus rejected rows
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalogue {
    pub repositories: IndexMap<String, Repository>,
    pub errors: Vec<CatalogueRowError>,
}

impl Catalogue {
    pub fn module_count(&self) -> usize {
        self.repositories.values().map(|r| r.modules.len()).sum()
    }
}
