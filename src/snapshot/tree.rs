//! Filesystem helpers shared by the local providers and migration capture

use std::collections::HashSet;
use std::io;
use std::path::{Path, PathBuf};

/// Non-hidden directory names found in `root` and in each search root below it
pub fn list_module_dirs(root: &Path, search_roots: &[PathBuf]) -> HashSet<String> {
    std::iter::once(root.to_path_buf())
        .chain(search_roots.iter().map(|r| root.join(r)))
        .filter_map(|dir| std::fs::read_dir(dir).ok())
        .flat_map(|entries| entries.filter_map(Result::ok))
        .filter(|entry| entry.path().is_dir())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| !name.starts_with('.'))
        .collect()
}

/// Locate a module directory: the tree root first, then each search root in order
pub fn resolve_module_dir(root: &Path, search_roots: &[PathBuf], module: &str) -> Option<PathBuf> {
    std::iter::once(root.to_path_buf())
        .chain(search_roots.iter().map(|r| root.join(r)))
        .map(|dir| dir.join(module))
        .find(|path| path.is_dir())
}

/// Recursively copy `from` into `to`, creating `to`.
///
/// Symbolic links are followed: linked directories are copied as directories.
pub fn copy_dir(from: &Path, to: &Path) -> io::Result<()> {
    std::fs::create_dir_all(to)?;

    for entry in std::fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if std::fs::metadata(entry.path())?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn mkdirs(root: &Path, dirs: &[&str]) {
        for dir in dirs {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
    }

    #[test]
    fn list_module_dirs_collects_root_and_search_roots() {
        let temp_dir = TempDir::new().unwrap();
        mkdirs(
            temp_dir.path(),
            &["web_responsive", ".git", "addons/sale", "odoo/addons/base"],
        );
        std::fs::write(temp_dir.path().join("README.md"), "readme").unwrap();

        let modules = list_module_dirs(
            temp_dir.path(),
            &[PathBuf::from("addons"), PathBuf::from("odoo/addons")],
        );

        let expected: HashSet<String> = ["web_responsive", "addons", "sale", "odoo", "base"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(modules, expected);
    }

    #[test]
    fn list_module_dirs_is_empty_for_missing_tree() {
        let temp_dir = TempDir::new().unwrap();
        let modules = list_module_dirs(&temp_dir.path().join("absent"), &[]);
        assert!(modules.is_empty());
    }

    #[test]
    fn resolve_module_dir_prefers_tree_root() {
        let temp_dir = TempDir::new().unwrap();
        mkdirs(temp_dir.path(), &["sale", "addons/sale", "addons/stock"]);
        let roots = [PathBuf::from("addons")];

        assert_eq!(
            resolve_module_dir(temp_dir.path(), &roots, "sale"),
            Some(temp_dir.path().join("sale"))
        );
        assert_eq!(
            resolve_module_dir(temp_dir.path(), &roots, "stock"),
            Some(temp_dir.path().join("addons/stock"))
        );
        assert_eq!(resolve_module_dir(temp_dir.path(), &roots, "crm"), None);
    }

    #[test]
    fn copy_dir_copies_nested_files() {
        let temp_dir = TempDir::new().unwrap();
        let from = temp_dir.path().join("from");
        mkdirs(&from, &["14.0.1.0.0"]);
        std::fs::write(from.join("14.0.1.0.0/pre-migration.py"), "pass").unwrap();

        let to = temp_dir.path().join("to");
        copy_dir(&from, &to).unwrap();

        assert_eq!(
            std::fs::read_to_string(to.join("14.0.1.0.0/pre-migration.py")).unwrap(),
            "pass"
        );
    }

    #[cfg(unix)]
    #[test]
    fn copy_dir_follows_symlinked_directories() {
        let temp_dir = TempDir::new().unwrap();
        let shared = temp_dir.path().join("shared");
        std::fs::create_dir_all(&shared).unwrap();
        std::fs::write(shared.join("end-migration.py"), "pass").unwrap();

        let from = temp_dir.path().join("from");
        std::fs::create_dir_all(&from).unwrap();
        std::os::unix::fs::symlink(&shared, from.join("15.0.1.0.0")).unwrap();

        let to = temp_dir.path().join("to");
        copy_dir(&from, &to).unwrap();

        let copied = to.join("15.0.1.0.0");
        assert!(copied.is_dir());
        assert!(!std::fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
        assert_eq!(
            std::fs::read_to_string(copied.join("end-migration.py")).unwrap(),
            "pass"
        );
    }
}
