use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::range::VersionRange;
use crate::error::ConfigError;

// =============================================================================
// Defaults
// =============================================================================

/// Default root for clones, captured migrations and reports
pub const DEFAULT_OUTPUT_DIR: &str = "analysis-collector";

/// Conventional name of the upgrade-script directory inside a module
pub const DEFAULT_MIGRATIONS_DIR_NAME: &str = "migrations";

/// Timeout for the repository existence probe in milliseconds (5 seconds)
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 5_000;

/// User agent sent with the existence probe
pub const DEFAULT_USER_AGENT: &str = "migration-matrix";

const CONFIG_FILE_NAME: &str = "config.json";

/// Audit configuration, loaded from JSON
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct AuditConfig {
    /// Root directory for every artifact the run produces
    pub output_dir: PathBuf,
    /// Name of the migrations subdirectory looked up under each module
    pub migrations_dir_name: String,
    /// Secondary roots (relative to the tree root) holding nested modules
    pub search_roots: Vec<PathBuf>,
    /// Existence probe timeout in milliseconds
    pub probe_timeout_ms: u64,
    pub user_agent: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            migrations_dir_name: DEFAULT_MIGRATIONS_DIR_NAME.to_string(),
            search_roots: vec![PathBuf::from("addons"), PathBuf::from("odoo/addons")],
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl AuditConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the user config file is used
    /// when present, otherwise defaults apply.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = config_path();
                if path.is_file() {
                    Self::from_file(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Directory holding the snapshot of `repository` at `version`
    pub fn snapshot_dir(&self, repository: &str, version: &str) -> PathBuf {
        self.output_dir.join("repos").join(repository).join(version)
    }

    /// Destination for a captured migrations directory
    pub fn capture_dir(&self, repository: &str, version: &str, module: &str) -> PathBuf {
        self.output_dir
            .join("migrations")
            .join(repository)
            .join(format!("{}_{}", version, module))
    }

    pub fn text_reports_dir(&self) -> PathBuf {
        self.output_dir.join("analysis_txt")
    }

    pub fn table_reports_dir(&self) -> PathBuf {
        self.output_dir.join("analysis_csv")
    }

    pub fn errors_table_path(&self) -> PathBuf {
        self.output_dir.join("analysis-errors.csv")
    }
}

/// Per-run choices taken from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub range: VersionRange,
    /// Persist every migrations directory that is found
    pub capture: bool,
    /// Classify against whatever snapshots already exist, without git or captures
    pub dry_run: bool,
    /// Render version lists inline (`@14.0 @15.0`)
    pub compact: bool,
}

/// Returns the path to the user configuration file.
/// Uses $XDG_CONFIG_HOME/migration-matrix/config.json if XDG_CONFIG_HOME is set,
/// otherwise falls back to ~/.config/migration-matrix/config.json,
/// or ./migration-matrix/config.json if neither is available.
pub fn config_path() -> PathBuf {
    config_dir_with_env(std::env::var("XDG_CONFIG_HOME").ok(), dirs::home_dir())
        .join(CONFIG_FILE_NAME)
}

fn config_dir_with_env(xdg_config_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let config_dir = xdg_config_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."));

    config_dir.join("migration-matrix")
}
