//! CSV renderer

use crate::analysis::types::AuditResults;
use crate::error::ReportError;
use crate::report::grouping::{Bucket, Grouping, error_entries, group, inline_versions};
use crate::report::{Renderer, Report};

/// Tabular (CSV) reports
#[derive(Debug, Clone, Copy, Default)]
pub struct TableRenderer {
    /// One cell per module instead of one per (module, version) in column reports
    pub compact: bool,
}

impl TableRenderer {
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    fn full(&self, results: &AuditResults) -> Vec<Vec<String>> {
        let mut rows = vec![header(&["Repository", "Module", "Status", "Detail"])];

        for (repository, analysis) in &results.repositories {
            for (module, versions) in &analysis.with_migrations {
                let versions: Vec<String> = versions.iter().cloned().collect();
                rows.push(vec![
                    repository.clone(),
                    module.clone(),
                    "with migrations".to_string(),
                    inline_versions(&versions),
                ]);
            }
            for module in analysis.only_without_migrations() {
                rows.push(vec![
                    repository.clone(),
                    module.to_string(),
                    "without migrations".to_string(),
                    String::new(),
                ]);
            }
            for (module, versions) in &analysis.not_found {
                let versions: Vec<String> = versions.iter().cloned().collect();
                rows.push(vec![
                    repository.clone(),
                    module.clone(),
                    "not found".to_string(),
                    inline_versions(&versions),
                ]);
            }
            for error in &analysis.errors {
                rows.push(vec![
                    repository.clone(),
                    error.module.clone(),
                    "error".to_string(),
                    format!("{}: repository not found", error.version),
                ]);
            }
        }

        rows
    }

    fn classification(&self, results: &AuditResults, bucket: Bucket, grouping: Grouping) -> Vec<Vec<String>> {
        let (group_column, item_column) = match grouping {
            Grouping::ByRepository => ("Repository", "Module"),
            Grouping::ByModule => ("Module", "Repository"),
        };
        let version_column = match bucket {
            Bucket::WithMigrations => "Version",
            Bucket::NotFound => "Versions Not Found",
        };
        let mut rows = vec![header(&[group_column, item_column, version_column])];

        for g in group(results, bucket, grouping) {
            for item in g.items {
                match bucket {
                    Bucket::WithMigrations => {
                        for version in &item.versions {
                            rows.push(vec![g.label.clone(), item.name.clone(), version.clone()]);
                        }
                    }
                    Bucket::NotFound => {
                        rows.push(vec![
                            g.label.clone(),
                            item.name.clone(),
                            inline_versions(&item.versions),
                        ]);
                    }
                }
            }
        }

        rows
    }

    /// One column per repository (sorted); cells are `module: @version` entries
    fn repository_columns(&self, results: &AuditResults) -> Vec<Vec<String>> {
        if results.repositories.is_empty() {
            return Vec::new();
        }

        let mut repositories: Vec<&String> = results.repositories.keys().collect();
        repositories.sort();

        let groups = group(results, Bucket::WithMigrations, Grouping::ByRepository);
        let columns: Vec<Vec<String>> = repositories
            .iter()
            .map(|repository| {
                let Some(g) = groups.iter().find(|g| &g.label == *repository) else {
                    return Vec::new();
                };
                g.items
                    .iter()
                    .flat_map(|item| {
                        if self.compact {
                            vec![format!("{}: {}", item.name, inline_versions(&item.versions))]
                        } else {
                            item.versions
                                .iter()
                                .map(|v| format!("{}: @{}", item.name, v))
                                .collect()
                        }
                    })
                    .collect()
            })
            .collect();

        let height = columns.iter().map(Vec::len).max().unwrap_or(0);
        let mut rows = vec![repositories.into_iter().cloned().collect()];
        for i in 0..height {
            rows.push(
                columns
                    .iter()
                    .map(|column| column.get(i).cloned().unwrap_or_default())
                    .collect(),
            );
        }

        rows
    }

    fn errors(&self, results: &AuditResults) -> Vec<Vec<String>> {
        let mut rows = vec![header(&["Line", "Content"])];
        rows.extend(
            error_entries(results)
                .into_iter()
                .map(|entry| vec![entry.line.to_string(), entry.content]),
        );
        rows
    }
}

impl Renderer for TableRenderer {
    fn name(&self) -> &'static str {
        "csv"
    }

    fn render(&self, report: Report, results: &AuditResults) -> Result<String, ReportError> {
        let rows = match report {
            Report::Full => self.full(results),
            Report::Classification { bucket, grouping } => {
                self.classification(results, bucket, grouping)
            }
            Report::RepositoryColumns => self.repository_columns(results),
            Report::Errors => self.errors(results),
        };
        to_csv(&rows)
    }
}

fn header(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| c.to_string()).collect()
}

fn to_csv(rows: &[Vec<String>]) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    String::from_utf8(bytes)
        .map_err(|e| ReportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::grouping::fixtures::sample_results;

    fn render(renderer: TableRenderer, report: Report) -> String {
        renderer.render(report, &sample_results()).unwrap()
    }

    #[test]
    fn migrations_table_has_one_row_per_version() {
        let csv = render(
            TableRenderer::default(),
            Report::Classification {
                bucket: Bucket::WithMigrations,
                grouping: Grouping::ByRepository,
            },
        );

        assert_eq!(
            csv,
            "Repository,Module,Version\n\
             web,common,15.0\n\
             web,web_timeline,14.0\n\
             web,web_timeline,15.0\n\
             sale,common,14.0\n"
        );
    }

    #[test]
    fn not_found_table_joins_versions() {
        let csv = render(
            TableRenderer::default(),
            Report::Classification {
                bucket: Bucket::NotFound,
                grouping: Grouping::ByRepository,
            },
        );

        assert_eq!(
            csv,
            "Repository,Module,Versions Not Found\nweb,web_legacy,@15.0\n"
        );
    }

    #[test]
    fn by_module_table_swaps_group_and_item_columns() {
        let csv = render(
            TableRenderer::default(),
            Report::Classification {
                bucket: Bucket::WithMigrations,
                grouping: Grouping::ByModule,
            },
        );

        assert!(csv.starts_with("Module,Repository,Version\ncommon,web,15.0\ncommon,sale,14.0\n"));
    }

    #[test]
    fn repository_columns_pad_shorter_columns() {
        let csv = render(TableRenderer::default(), Report::RepositoryColumns);

        assert_eq!(
            csv,
            "ghost,sale,web\n\
             ,common: @14.0,common: @15.0\n\
             ,,web_timeline: @14.0\n\
             ,,web_timeline: @15.0\n"
        );
    }

    #[test]
    fn repository_columns_compact_uses_one_cell_per_module() {
        let csv = render(TableRenderer::new(true), Report::RepositoryColumns);

        assert_eq!(
            csv,
            "ghost,sale,web\n\
             ,common: @14.0,common: @15.0\n\
             ,,web_timeline: @14.0 @15.0\n"
        );
    }

    #[test]
    fn errors_table_lists_line_and_content() {
        let csv = render(TableRenderer::default(), Report::Errors);

        assert_eq!(
            csv,
            "Line,Content\n2,lonely\n4,ghost | https://github.com/OCA/ghost\n"
        );
    }

    #[test]
    fn full_table_covers_every_bucket() {
        let csv = render(TableRenderer::default(), Report::Full);

        assert!(csv.contains("web,web_timeline,with migrations,@14.0 @15.0\n"));
        assert!(csv.contains("web,web_responsive,without migrations,\n"));
        assert!(csv.contains("web,web_legacy,not found,@15.0\n"));
        assert!(csv.contains("ghost,ghost,error,14.0: repository not found\n"));
        assert!(!csv.contains("sale,common,without"));
    }
}
