//! Version matrix analysis
//!
//! # Modules
//!
//! - [`range`]: Contiguous `<major>.0` version ranges
//! - [`types`]: Per-repository classification buckets and run results
//! - [`analyzer`]: The per-repository, per-version walk
//! - [`cancel`]: Cooperative cancellation checked between versions

pub mod analyzer;
pub mod cancel;
pub mod range;
pub mod types;

pub use analyzer::Analyzer;
pub use cancel::CancellationToken;
pub use range::VersionRange;
pub use types::{AuditResults, RepositoryAnalysis, UnavailableRecord};
