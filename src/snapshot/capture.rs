//! Persistence of discovered migrations directories

use tracing::{debug, info};

use crate::catalogue::types::Repository;
use crate::config::AuditConfig;
use crate::error::CaptureError;
use crate::snapshot::tree::{copy_dir, resolve_module_dir};

/// Trait for persisting a module's migrations directory
pub trait MigrationCapture: Send + Sync {
    /// Persist the migrations directory of `module` at `version`.
    ///
    /// Overwrites any earlier capture for the same (repository, version, module);
    /// does nothing when the source directory does not exist.
    fn capture(&self, repository: &Repository, version: &str, module: &str) -> Result<(), CaptureError>;
}

/// Copies migrations out of the local snapshot tree into the captures directory
pub struct FsMigrationCapture {
    config: AuditConfig,
}

impl FsMigrationCapture {
    pub fn new(config: AuditConfig) -> Self {
        Self { config }
    }
}

impl MigrationCapture for FsMigrationCapture {
    fn capture(&self, repository: &Repository, version: &str, module: &str) -> Result<(), CaptureError> {
        let tree = self.config.snapshot_dir(&repository.id, version);
        let Some(source) = resolve_module_dir(&tree, &self.config.search_roots, module)
            .map(|dir| dir.join(&self.config.migrations_dir_name))
            .filter(|dir| dir.is_dir())
        else {
            debug!("No migrations to capture for {} @ {}", module, version);
            return Ok(());
        };

        let dest = self.config.capture_dir(&repository.id, version, module);
        let copy_error = |source_err| CaptureError::Copy {
            from: source.clone(),
            to: dest.clone(),
            source: source_err,
        };

        if dest.exists() {
            std::fs::remove_dir_all(&dest).map_err(copy_error)?;
        }
        copy_dir(&source, &dest).map_err(copy_error)?;

        info!("Captured migrations of {} @ {} into {:?}", module, version, dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn capture_for(output_dir: &Path) -> FsMigrationCapture {
        FsMigrationCapture::new(AuditConfig {
            output_dir: output_dir.to_path_buf(),
            ..Default::default()
        })
    }

    fn repository() -> Repository {
        Repository::new("sale-reporting", "https://github.com/OCA/sale-reporting")
    }

    #[test]
    fn capture_copies_migrations_under_repository_version_module_key() {
        let temp_dir = TempDir::new().unwrap();
        let migrations = temp_dir
            .path()
            .join("repos/sale-reporting/14.0/sale_report_extension/migrations/14.0.1.0.0");
        std::fs::create_dir_all(&migrations).unwrap();
        std::fs::write(migrations.join("post-migration.py"), "pass").unwrap();

        capture_for(temp_dir.path())
            .capture(&repository(), "14.0", "sale_report_extension")
            .unwrap();

        let copied = temp_dir.path().join(
            "migrations/sale-reporting/14.0_sale_report_extension/14.0.1.0.0/post-migration.py",
        );
        assert_eq!(std::fs::read_to_string(copied).unwrap(), "pass");
    }

    #[test]
    fn capture_overwrites_previous_capture() {
        let temp_dir = TempDir::new().unwrap();
        let migrations = temp_dir
            .path()
            .join("repos/sale-reporting/14.0/sale_report_extension/migrations");
        std::fs::create_dir_all(&migrations).unwrap();
        std::fs::write(migrations.join("current.py"), "new").unwrap();

        let dest = temp_dir
            .path()
            .join("migrations/sale-reporting/14.0_sale_report_extension");
        std::fs::create_dir_all(&dest).unwrap();
        std::fs::write(dest.join("stale.py"), "old").unwrap();

        capture_for(temp_dir.path())
            .capture(&repository(), "14.0", "sale_report_extension")
            .unwrap();

        assert!(!dest.join("stale.py").exists());
        assert!(dest.join("current.py").exists());
    }

    #[test]
    fn capture_is_noop_without_source_directory() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("repos/sale-reporting/14.0/sale_report_extension"))
            .unwrap();

        capture_for(temp_dir.path())
            .capture(&repository(), "14.0", "sale_report_extension")
            .unwrap();

        assert!(!temp_dir.path().join("migrations").exists());
    }
}
