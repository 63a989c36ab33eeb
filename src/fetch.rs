use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use flate2::read::GzDecoder;

use crate::error::{InstallError, InstallResult};

/// Tarball of the upstream `frappe_docker` main branch.
pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/frappe/frappe_docker/archive/refs/heads/main.tar.gz";

/// What to do when the repository directory already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Keep the existing checkout untouched.
    #[default]
    SkipIfPresent,
    /// Download again and swap the directory once the new tree is
    /// fully unpacked.
    Replace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Skipped,
    Fetched,
}

/// Downloads the deployment repository archive and installs it
/// under a canonical directory name.
#[derive(Debug, Clone)]
pub struct Fetcher {
    url: String,
    timeout: Duration,
    policy: FetchPolicy,
}

impl Fetcher {
    #[must_use]
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: Duration::from_secs(120),
            policy: FetchPolicy::default(),
        }
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn policy(mut self, policy: FetchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Make sure `repo_dir` holds the deployment repository.
    pub fn ensure(&self, repo_dir: &Path) -> InstallResult<FetchOutcome> {
        if repo_dir.exists() && self.policy == FetchPolicy::SkipIfPresent {
            tracing::info!(path = %repo_dir.display(), "repository present, skipping download");
            return Ok(FetchOutcome::Skipped);
        }

        tracing::info!(
            url = %self.url,
            timeout_secs = self.timeout.as_secs(),
            "downloading repository archive"
        );
        let agent = ureq::AgentBuilder::new().timeout(self.timeout).build();
        let response = agent
            .get(&self.url)
            .call()
            .map_err(|e| InstallError::Fetch(format!("{}: {e}", self.url)))?;

        install_archive(response.into_reader(), repo_dir)?;
        tracing::info!(path = %repo_dir.display(), "repository fetched");
        Ok(FetchOutcome::Fetched)
    }
}

/// Unpack a gzip tarball with a single top-level directory and
/// move that directory to `repo_dir`, replacing any previous
/// content only after unpacking succeeded. Failures after the
/// download started are reported as [`InstallError::Fetch`].
pub fn install_archive(reader: impl Read, repo_dir: &Path) -> InstallResult<()> {
    let staging = staging_dir(repo_dir)?;
    if staging.exists() {
        fs::remove_dir_all(&staging)?;
    }
    fs::create_dir_all(&staging).map_err(|e| InstallError::write(&staging, e))?;

    let result = unpack(reader, &staging).and_then(|root| {
        let moved = if repo_dir.exists() {
            fs::remove_dir_all(repo_dir).and_then(|()| fs::rename(&root, repo_dir))
        } else {
            fs::rename(&root, repo_dir)
        };
        moved.map_err(|e| {
            InstallError::Fetch(format!("moving archive into {}: {e}", repo_dir.display()))
        })
    });

    let _ = fs::remove_dir_all(&staging);
    result
}

fn unpack(reader: impl Read, staging: &Path) -> InstallResult<PathBuf> {
    let mut archive = tar::Archive::new(GzDecoder::new(reader));
    archive
        .unpack(staging)
        .map_err(|e| InstallError::Fetch(format!("unpacking archive: {e}")))?;

    let dirs = top_level_dirs(staging)
        .map_err(|e| InstallError::Fetch(format!("reading unpacked archive: {e}")))?;

    match dirs.as_slice() {
        [root] => Ok(root.clone()),
        _ => Err(InstallError::Fetch(format!(
            "expected one top-level directory in archive, found {}",
            dirs.len()
        ))),
    }
}

fn top_level_dirs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            dirs.push(entry.path());
        }
    }
    Ok(dirs)
}

fn staging_dir(repo_dir: &Path) -> InstallResult<PathBuf> {
    let name = repo_dir.file_name().ok_or_else(|| {
        InstallError::Fetch(format!("invalid repository path: {}", repo_dir.display()))
    })?;
    let parent = repo_dir.parent().unwrap_or_else(|| Path::new("."));
    Ok(parent.join(format!(".{}.download", name.to_string_lossy())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_sits_next_to_repo() {
        let staging = staging_dir(Path::new("/srv/frappe_docker")).unwrap();

        assert_eq!(staging, PathBuf::from("/srv/.frappe_docker.download"));
    }

    #[test]
    fn staging_rejects_root() {
        assert!(staging_dir(Path::new("/")).is_err());
    }
}
