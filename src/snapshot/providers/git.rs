//! Git-backed snapshot provider
//!
//! Probes the repository URL over HTTP and keeps one shallow checkout per
//! (repository, version) under `<outputDir>/repos/<repo>/<version>`.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::analysis::cancel::CancellationToken;
use crate::catalogue::types::Repository;
use crate::config::AuditConfig;
use crate::error::{ProbeError, SnapshotError};
use crate::snapshot::provider::SnapshotProvider;
use crate::snapshot::tree::{list_module_dirs, resolve_module_dir};

/// Snapshot provider using an HTTP existence probe and the `git` binary
pub struct GitSnapshotProvider {
    client: reqwest::Client,
    config: AuditConfig,
}

impl GitSnapshotProvider {
    pub fn new(config: AuditConfig) -> Result<Self, SnapshotError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_millis(config.probe_timeout_ms))
            .build()?;

        Ok(Self { client, config })
    }

    /// URL probed for existence: the catalogue URL without a `.git` suffix
    fn probe_url(url: &str) -> &str {
        url.strip_suffix(".git").unwrap_or(url)
    }

    async fn probe(&self, url: &str) -> Result<bool, ProbeError> {
        let url = Self::probe_url(url);
        if url.is_empty() {
            return Err(ProbeError::InvalidUrl(url.to_string()));
        }

        let response = self.client.head(url).send().await?;
        let status = response.status();
        debug!("Existence probe {} returned {}", url, status);

        Ok(status == reqwest::StatusCode::OK)
    }

    /// Runs git to completion, killing it if `cancel` fires.
    ///
    /// Returns true on a zero exit status; every failure is logged and swallowed.
    async fn run_git<I, S>(&self, args: I, cwd: Option<&Path>, cancel: &CancellationToken) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let label = args
            .iter()
            .map(|a| a.as_ref().to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ");

        let mut command = Command::new("git");
        command
            .args(&args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Failed to run git {}: {}", label, e);
                return false;
            }
        };

        tokio::select! {
            status = child.wait() => match status {
                Ok(status) if status.success() => true,
                Ok(status) => {
                    warn!("git {} exited with {}", label, status);
                    false
                }
                Err(e) => {
                    warn!("Failed to wait for git {}: {}", label, e);
                    false
                }
            },
            _ = cancel.cancelled() => {
                warn!("Interrupted during git {}", label);
                let _ = child.kill().await;
                false
            }
        }
    }
}

#[async_trait::async_trait]
impl SnapshotProvider for GitSnapshotProvider {
    async fn exists(&self, repository: &Repository) -> bool {
        self.probe(&repository.url)
            .await
            .inspect_err(|e| warn!("Failed to check repository {}: {}", repository.url, e))
            .unwrap_or(false)
    }

    async fn materialize(&self, repository: &Repository, version: &str, cancel: &CancellationToken) {
        if cancel.is_cancelled() {
            return;
        }

        let dir = self.config.snapshot_dir(&repository.id, version);

        if dir.exists() {
            info!("Updating {} to {} in {:?}", repository.id, version, dir);
            let reset_target = format!("origin/{}", version);
            let steps: [[&str; 3]; 3] = [
                ["fetch", "origin", version],
                ["checkout", version, "--"],
                ["reset", "--hard", reset_target.as_str()],
            ];
            for step in steps {
                if cancel.is_cancelled() {
                    return;
                }
                self.run_git(step, Some(&dir), cancel).await;
            }
            return;
        }

        if let Some(parent) = dir.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!("Failed to create {:?}: {}", parent, e);
                return;
            }
        }

        info!("Cloning {} @ {}", repository.url, version);
        let args: [&OsStr; 8] = [
            OsStr::new("clone"),
            OsStr::new("--depth"),
            OsStr::new("1"),
            OsStr::new("--branch"),
            OsStr::new(version),
            OsStr::new("--filter=blob:none"),
            OsStr::new(&repository.url),
            dir.as_os_str(),
        ];
        self.run_git(args, None, cancel).await;
    }

    async fn list_modules(&self, repository: &Repository, version: &str) -> HashSet<String> {
        let dir = self.config.snapshot_dir(&repository.id, version);
        list_module_dirs(&dir, &self.config.search_roots)
    }

    async fn has_migrations(&self, repository: &Repository, version: &str, module: &str) -> bool {
        let dir = self.config.snapshot_dir(&repository.id, version);
        resolve_module_dir(&dir, &self.config.search_roots, module)
            .map(|module_dir| module_dir.join(&self.config.migrations_dir_name).is_dir())
            .unwrap_or(false)
    }
}
