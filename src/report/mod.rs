//! Report rendering
//!
//! Every report is a [`Report`] (what to show) rendered by a [`Renderer`]
//! (how to show it). All renderers read the same [`grouping`] model built
//! from the immutable [`AuditResults`].
//!
//! # Modules
//!
//! - [`grouping`]: Regroups buckets by repository or by module
//! - [`text`]: Narrative text renderer
//! - [`table`]: CSV renderer
//! - [`json`]: JSON renderer
//! - [`writer`]: Writes the standard report set to the output directory

pub mod grouping;
pub mod json;
pub mod table;
pub mod text;
pub mod writer;

use std::fmt;

use crate::analysis::types::AuditResults;
use crate::error::ReportError;

pub use grouping::{Bucket, Grouping};
pub use json::JsonRenderer;
pub use table::TableRenderer;
pub use text::TextRenderer;
pub use writer::ReportWriter;

/// What a report shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// Every bucket of every repository
    Full,
    /// One version-tracking bucket under a grouping key
    Classification { bucket: Bucket, grouping: Grouping },
    /// One column per repository listing modules with migrations
    RepositoryColumns,
    /// Catalogue row errors and repository-unavailable records
    Errors,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Full => write!(f, "full"),
            Report::Classification { bucket, grouping } => {
                write!(f, "{:?} {:?}", bucket, grouping)
            }
            Report::RepositoryColumns => write!(f, "repository columns"),
            Report::Errors => write!(f, "errors"),
        }
    }
}

/// Output format strategy
pub trait Renderer {
    /// Short format name used in logs and errors
    fn name(&self) -> &'static str;

    fn render(&self, report: Report, results: &AuditResults) -> Result<String, ReportError>;
}
