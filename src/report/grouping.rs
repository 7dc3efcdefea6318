//! Regroups classification buckets by repository or by module

use std::collections::BTreeMap;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use crate::analysis::types::{AuditResults, RepositoryAnalysis};

/// Version-tracking classification bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    WithMigrations,
    NotFound,
}

impl Bucket {
    fn select(self, analysis: &RepositoryAnalysis) -> &IndexMap<String, IndexSet<String>> {
        match self {
            Bucket::WithMigrations => &analysis.with_migrations,
            Bucket::NotFound => &analysis.not_found,
        }
    }
}

/// Grouping key of a classification report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// One group per repository (catalogue order), modules inside
    ByRepository,
    /// One group per module (alphabetical), repositories inside
    ByModule,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupItem {
    pub name: String,
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Group {
    pub label: String,
    pub items: Vec<GroupItem>,
}

/// Collect `bucket` across all repositories under `grouping`.
///
/// Repositories or modules with nothing in the bucket are omitted.
pub fn group(results: &AuditResults, bucket: Bucket, grouping: Grouping) -> Vec<Group> {
    match grouping {
        Grouping::ByRepository => results
            .repositories
            .iter()
            .filter_map(|(repository, analysis)| {
                let modules = bucket.select(analysis);
                if modules.is_empty() {
                    return None;
                }
                let mut items: Vec<_> = modules
                    .iter()
                    .map(|(module, versions)| GroupItem {
                        name: module.clone(),
                        versions: versions.iter().cloned().collect(),
                    })
                    .collect();
                items.sort_by(|a, b| a.name.cmp(&b.name));
                Some(Group {
                    label: repository.clone(),
                    items,
                })
            })
            .collect(),
        Grouping::ByModule => {
            let mut by_module: BTreeMap<&str, Vec<GroupItem>> = BTreeMap::new();
            for (repository, analysis) in &results.repositories {
                for (module, versions) in bucket.select(analysis) {
                    by_module.entry(module.as_str()).or_default().push(GroupItem {
                        name: repository.clone(),
                        versions: versions.iter().cloned().collect(),
                    });
                }
            }
            by_module
                .into_iter()
                .map(|(module, items)| Group {
                    label: module.to_string(),
                    items,
                })
                .collect()
        }
    }
}

/// One line of the error table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorEntry {
    pub line: usize,
    pub content: String,
}

/// Catalogue row errors followed by repository-unavailable records
pub fn error_entries(results: &AuditResults) -> Vec<ErrorEntry> {
    let rows = results.catalogue_errors.iter().map(|e| ErrorEntry {
        line: e.line_number,
        content: e.raw_row.join(" | "),
    });
    let unavailable = results.unavailable_records().map(|r| ErrorEntry {
        line: r.line_number,
        content: format!("{} | {}", r.module, r.repository_url),
    });
    rows.chain(unavailable).collect()
}

/// Versions rendered inline: `@14.0 @15.0`
pub fn inline_versions(versions: &[String]) -> String {
    versions
        .iter()
        .map(|v| format!("@{}", v))
        .collect::<Vec<_>>()
        .join(" ")
}
