//! Snapshot provider implementations

pub mod git;

pub use git::GitSnapshotProvider;
