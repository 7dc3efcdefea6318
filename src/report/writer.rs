//! Writes the standard report set under the output directory

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::analysis::types::AuditResults;
use crate::config::AuditConfig;
use crate::error::ReportError;
use crate::report::{
    Bucket, Grouping, JsonRenderer, Renderer, Report, TableRenderer, TextRenderer,
};

const MIGRATIONS: Report = Report::Classification {
    bucket: Bucket::WithMigrations,
    grouping: Grouping::ByRepository,
};

const NOT_FOUND: Report = Report::Classification {
    bucket: Bucket::NotFound,
    grouping: Grouping::ByRepository,
};

const BY_MODULE: Report = Report::Classification {
    bucket: Bucket::WithMigrations,
    grouping: Grouping::ByModule,
};

const TEXT_REPORTS: [(&str, Report); 4] = [
    ("analysis-full.txt", Report::Full),
    ("analysis-migration.txt", MIGRATIONS),
    ("analysis-not-found.txt", NOT_FOUND),
    ("analysis-by-module.txt", BY_MODULE),
];

const TABLE_REPORTS: [(&str, Report); 5] = [
    ("analysis-full.csv", Report::Full),
    ("analysis-migration.csv", MIGRATIONS),
    ("analysis-not-found.csv", NOT_FOUND),
    ("analysis-by-module.csv", BY_MODULE),
    ("analysis-by-repository.csv", Report::RepositoryColumns),
];

pub struct ReportWriter {
    config: AuditConfig,
    compact: bool,
}

impl ReportWriter {
    pub fn new(config: AuditConfig, compact: bool) -> Self {
        Self { config, compact }
    }

    /// Render every report and write it to disk.
    ///
    /// The error table is only written when the run recorded at least one error.
    /// Returns the written paths in write order.
    pub fn write_all(&self, results: &AuditResults) -> Result<Vec<PathBuf>, ReportError> {
        let text = TextRenderer::new(self.compact);
        let table = TableRenderer::new(self.compact);
        let mut written = Vec::new();

        let text_dir = self.config.text_reports_dir();
        std::fs::create_dir_all(&text_dir)?;
        for (file_name, report) in TEXT_REPORTS {
            written.push(write_report(&text, report, results, &text_dir.join(file_name))?);
        }

        let table_dir = self.config.table_reports_dir();
        std::fs::create_dir_all(&table_dir)?;
        for (file_name, report) in TABLE_REPORTS {
            written.push(write_report(&table, report, results, &table_dir.join(file_name))?);
        }

        written.push(write_report(
            &JsonRenderer,
            Report::Full,
            results,
            &self.config.output_dir.join("analysis.json"),
        )?);

        if results.has_errors() {
            written.push(write_report(
                &table,
                Report::Errors,
                results,
                &self.config.errors_table_path(),
            )?);
        }

        info!("Wrote {} reports to {:?}", written.len(), self.config.output_dir);
        Ok(written)
    }
}

fn write_report(
    renderer: &dyn Renderer,
    report: Report,
    results: &AuditResults,
    path: &Path,
) -> Result<PathBuf, ReportError> {
    let content = renderer.render(report, results)?;
    std::fs::write(path, content)?;
    debug!("Wrote {} {} report to {:?}", renderer.name(), report, path);
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::grouping::fixtures::sample_results;
    use tempfile::TempDir;

    fn writer(temp_dir: &TempDir, compact: bool) -> ReportWriter {
        let config = AuditConfig {
            output_dir: temp_dir.path().to_path_buf(),
            ..Default::default()
        };
        ReportWriter::new(config, compact)
    }

    #[test]
    fn write_all_produces_text_table_json_and_error_reports() {
        let temp_dir = TempDir::new().unwrap();

        let written = writer(&temp_dir, false).write_all(&sample_results()).unwrap();

        assert_eq!(written.len(), 11);
        for path in &written {
            assert!(path.is_file(), "{:?} missing", path);
        }
        let errors = std::fs::read_to_string(temp_dir.path().join("analysis-errors.csv")).unwrap();
        assert!(errors.starts_with("Line,Content\n2,lonely\n"));
        let migration =
            std::fs::read_to_string(temp_dir.path().join("analysis_txt/analysis-migration.txt"))
                .unwrap();
        assert!(migration.contains("Repository: web"));
    }

    #[test]
    fn write_all_skips_error_table_without_errors() {
        let temp_dir = TempDir::new().unwrap();
        let mut results = sample_results();
        results.catalogue_errors.clear();
        results.repositories.shift_remove("ghost");

        let written = writer(&temp_dir, false).write_all(&results).unwrap();

        assert_eq!(written.len(), 10);
        assert!(!temp_dir.path().join("analysis-errors.csv").exists());
    }

    #[test]
    fn write_all_with_empty_results_still_writes_every_report() {
        let temp_dir = TempDir::new().unwrap();

        let written = writer(&temp_dir, true)
            .write_all(&AuditResults::default())
            .unwrap();

        assert_eq!(written.len(), 10);
        let not_found =
            std::fs::read_to_string(temp_dir.path().join("analysis_csv/analysis-not-found.csv"))
                .unwrap();
        assert_eq!(not_found, "Repository,Module,Versions Not Found\n");
    }

    #[test]
    fn write_all_compact_renders_inline_versions() {
        let temp_dir = TempDir::new().unwrap();

        writer(&temp_dir, true).write_all(&sample_results()).unwrap();

        let columns = std::fs::read_to_string(
            temp_dir.path().join("analysis_csv/analysis-by-repository.csv"),
        )
        .unwrap();
        assert!(columns.contains("web_timeline: @14.0 @15.0"));
    }
}
