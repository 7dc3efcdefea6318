//! Catalogue parser
//!
//! Reads a headerless CSV table of `module, repository URL` rows and groups
//! the modules by repository. Extra columns are ignored.
//!
//! Format example:
//! ```text
//! sale_report_extension,https://github.com/OCA/sale-reporting
//! web_responsive,https://github.com/OCA/web
//! ```

use std::path::Path;

use tracing::{debug, warn};
use url::Url;

use crate::catalogue::types::{Catalogue, CatalogueRowError, ModuleEntry, Repository, RowErrorKind};
use crate::error::CatalogueError;

/// Read and parse a catalogue file.
///
/// Each physical line is one row, so line numbers match the file. A blank
/// line yields an empty row, which is recorded as a row error.
pub fn read_catalogue(path: &Path) -> Result<Catalogue, CatalogueError> {
    let content = std::fs::read_to_string(path).map_err(|source| CatalogueError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (index, line) in content.lines().enumerate() {
        rows.push((index + 1, split_row(line)?));
    }

    debug!("Read {} catalogue rows from {:?}", rows.len(), path);
    Ok(parse_rows(rows))
}

fn split_row(line: &str) -> Result<Vec<String>, CatalogueError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let fields: Vec<String> = reader
        .records()
        .next()
        .transpose()?
        .map(|record| record.iter().map(str::to_string).collect())
        .unwrap_or_default();
    Ok(fields)
}

/// Group `(line number, fields)` rows into repositories.
///
/// Malformed rows are recorded and skipped; duplicate rows are kept so each
/// source line stays attributable.
pub fn parse_rows<I>(rows: I) -> Catalogue
where
    I: IntoIterator<Item = (usize, Vec<String>)>,
{
    let mut catalogue = Catalogue::default();

    for (line_number, row) in rows {
        if row.len() < 2 {
            warn!("Invalid row at line {}: {:?}", line_number, row);
            catalogue.errors.push(CatalogueRowError {
                line_number,
                raw_row: row,
                kind: RowErrorKind::MissingColumns,
            });
            continue;
        }

        let module_name = row[0].trim();
        let url = row[1].trim();

        let Some(repository_id) = extract_repository_id(url) else {
            warn!("Invalid URL at line {}: {}", line_number, url);
            catalogue.errors.push(CatalogueRowError {
                line_number,
                raw_row: row,
                kind: RowErrorKind::InvalidUrl,
            });
            continue;
        };

        let entry = ModuleEntry {
            module_name: module_name.to_string(),
            repository_id: repository_id.clone(),
            repository_url: url.to_string(),
            line_number,
        };

        catalogue
            .repositories
            .entry(repository_id.clone())
            .or_insert_with(|| Repository::new(repository_id, url))
            .modules
            .push(entry);
    }

    catalogue
}

/// Extract the repository identifier: the second segment of the URL path.
///
/// `https://github.com/OCA/sale-reporting.git` yields `sale-reporting`.
pub fn extract_repository_id(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed.path().trim_matches('/').split('/').nth(1)?;
    let id = segment.strip_suffix(".git").unwrap_or(segment);

    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
