//! Snapshot layer: access to repository trees at a given version
//!
//! # Modules
//!
//! - [`provider`]: `SnapshotProvider` trait consumed by the analyzer
//! - [`providers`]: Concrete providers (git checkout + HTTP existence probe)
//! - [`capture`]: Persistence of migrations directories that were found
//! - [`tree`]: Filesystem listing and copy helpers

pub mod capture;
pub mod provider;
pub mod providers;
pub mod tree;

pub use capture::{FsMigrationCapture, MigrationCapture};
pub use provider::SnapshotProvider;
pub use providers::GitSnapshotProvider;
