//! Logging setup
//!
//! Human-readable lines go to stderr, filtered by `RUST_LOG` (default `info`).
//! When a log file is requested, a second layer without colours writes the
//! same events through a non-blocking appender. The returned guard must be
//! held until the process exits so buffered lines are flushed.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info";

/// Path of the run log inside the output directory
pub fn log_file_path(output_dir: &Path, name: &str) -> PathBuf {
    output_dir.join(name)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Create (or truncate) the log file, creating parent directories first
fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Install the global subscriber.
///
/// `log_file` is created (truncated) before the subscriber is installed.
pub fn init(log_file: Option<&Path>) -> std::io::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    let Some(path) = log_file else {
        // A second init (e.g. in tests) keeps the first subscriber.
        let _ = tracing_subscriber::registry()
            .with(env_filter())
            .with(stderr_layer)
            .try_init();
        return Ok(None);
    };

    let file = open_log_file(path)?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let file_layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);

    let _ = tracing_subscriber::registry()
        .with(env_filter())
        .with(stderr_layer)
        .with(file_layer)
        .try_init();

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn log_file_path_is_inside_output_dir() {
        assert_eq!(
            log_file_path(Path::new("/out"), "run.log"),
            PathBuf::from("/out/run.log")
        );
    }

    #[test]
    fn open_log_file_truncates_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("run.log");
        std::fs::write(&path, "stale content").unwrap();

        open_log_file(&path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn open_log_file_creates_missing_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("run.log");

        open_log_file(&path).unwrap();

        assert!(path.is_file());
    }
}
