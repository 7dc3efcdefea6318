//! JSON renderer

use indexmap::IndexMap;
use serde::Serialize;

use crate::analysis::types::{AuditResults, RepositoryAnalysis};
use crate::error::ReportError;
use crate::report::grouping::{ErrorEntry, error_entries, group};
use crate::report::{Renderer, Report};

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

#[derive(Serialize)]
struct FullDocument<'a> {
    repositories: &'a IndexMap<String, RepositoryAnalysis>,
    errors: Vec<ErrorEntry>,
}

impl Renderer for JsonRenderer {
    fn name(&self) -> &'static str {
        "json"
    }

    fn render(&self, report: Report, results: &AuditResults) -> Result<String, ReportError> {
        let json = match report {
            Report::Full => serde_json::to_string_pretty(&FullDocument {
                repositories: &results.repositories,
                errors: error_entries(results),
            })?,
            Report::Classification { bucket, grouping } => {
                serde_json::to_string_pretty(&group(results, bucket, grouping))?
            }
            Report::Errors => serde_json::to_string_pretty(&error_entries(results))?,
            Report::RepositoryColumns => {
                return Err(ReportError::Unsupported {
                    report: report.to_string(),
                    format: self.name(),
                });
            }
        };
        Ok(json)
    }
}
