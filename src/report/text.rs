//! Narrative text renderer

use std::fmt::Write;

use crate::analysis::types::AuditResults;
use crate::error::ReportError;
use crate::report::grouping::{Bucket, Group, Grouping, error_entries, group, inline_versions};
use crate::report::{Renderer, Report};

const WIDTH: usize = 60;

/// Human-readable text reports
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    /// Render version lists inline instead of one line per version
    pub compact: bool,
}

impl TextRenderer {
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }

    fn full(&self, results: &AuditResults) -> String {
        let mut out = String::new();
        let rule = "*".repeat(WIDTH);

        for (repository, analysis) in &results.repositories {
            let _ = writeln!(out, "\n{rule}\nREPOSITORY: {repository}\n{rule}");

            out.push_str("\nWITH MIGRATIONS\n");
            for (module, versions) in &analysis.with_migrations {
                let versions: Vec<String> = versions.iter().cloned().collect();
                let _ = writeln!(out, "  * {}: {}", module, inline_versions(&versions));
            }

            out.push_str("\nWITHOUT MIGRATIONS\n");
            for module in analysis.only_without_migrations() {
                let _ = writeln!(out, "  * {}", module);
            }

            out.push_str("\nERRORS\n");
            for error in &analysis.errors {
                let _ = writeln!(out, "  * {}", error);
            }
        }

        for bucket in [Bucket::WithMigrations, Bucket::NotFound] {
            out.push('\n');
            out.push_str(&self.classification(results, bucket, Grouping::ByRepository));
        }

        out
    }

    fn classification(&self, results: &AuditResults, bucket: Bucket, grouping: Grouping) -> String {
        let mut out = section_header(title(bucket, grouping));

        for Group { label, items } in group(results, bucket, grouping) {
            let kind = match grouping {
                Grouping::ByRepository => "Repository",
                Grouping::ByModule => "Module",
            };
            let _ = writeln!(out, "\n{}: {}", kind, label);

            for item in items {
                match bucket {
                    Bucket::NotFound => {
                        let _ = writeln!(
                            out,
                            "    - {}: not found in {}",
                            item.name,
                            inline_versions(&item.versions)
                        );
                    }
                    Bucket::WithMigrations if self.compact => {
                        let _ = writeln!(out, "    - {}: {}", item.name, inline_versions(&item.versions));
                    }
                    Bucket::WithMigrations => {
                        let _ = writeln!(out, "    - {}:", item.name);
                        for version in &item.versions {
                            let _ = writeln!(out, "        - {}", version);
                        }
                    }
                }
            }
        }

        out
    }

    fn errors(&self, results: &AuditResults) -> String {
        let mut out = section_header("ERRORS");
        for entry in error_entries(results) {
            let _ = writeln!(out, "  * line {}: {}", entry.line, entry.content);
        }
        out
    }
}

impl Renderer for TextRenderer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn render(&self, report: Report, results: &AuditResults) -> Result<String, ReportError> {
        match report {
            Report::Full => Ok(self.full(results)),
            Report::Classification { bucket, grouping } => {
                Ok(self.classification(results, bucket, grouping))
            }
            Report::Errors => Ok(self.errors(results)),
            Report::RepositoryColumns => Err(ReportError::Unsupported {
                report: report.to_string(),
                format: self.name(),
            }),
        }
    }
}

fn title(bucket: Bucket, grouping: Grouping) -> &'static str {
    match (bucket, grouping) {
        (Bucket::WithMigrations, Grouping::ByRepository) => "MIGRATIONS SUMMARY",
        (Bucket::WithMigrations, Grouping::ByModule) => "MIGRATIONS BY MODULE",
        (Bucket::NotFound, Grouping::ByRepository) => "MODULES NOT FOUND IN SOME VERSIONS",
        (Bucket::NotFound, Grouping::ByModule) => "NOT FOUND BY MODULE",
    }
}

fn section_header(title: &str) -> String {
    let rule = "=".repeat(WIDTH);
    format!("\n{rule}\n{title:^width$}\n{rule}\n\n", width = WIDTH)
}
