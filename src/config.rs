use std::path::PathBuf;
use std::time::Duration;

use crate::env_file::DEFAULT_FRAPPE_VERSION;
use crate::error::{InstallError, InstallResult};
use crate::fetch::{DEFAULT_ARCHIVE_URL, FetchPolicy};
use crate::pipeline::Cli;
use crate::provision::ProvisionPolicy;

/// Everything one installer run needs besides the profile.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    /// Deployment repository checkout.
    pub repo_dir: PathBuf,
    /// Receives the credential record and rendered compose file.
    pub home_dir: PathBuf,
    pub archive_url: String,
    pub docker: String,
    pub log_file: PathBuf,
    pub fetch_timeout: Duration,
    pub compose_timeout: Duration,
    pub fetch_policy: FetchPolicy,
    pub provision_policy: ProvisionPolicy,
    pub frappe_version: String,
}

impl InstallConfig {
    /// Defaults for everything except the two directories.
    #[must_use]
    pub fn new(repo_dir: impl Into<PathBuf>, home_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
            home_dir: home_dir.into(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            docker: "docker".to_string(),
            log_file: PathBuf::from("easy-install.log"),
            fetch_timeout: Duration::from_secs(120),
            compose_timeout: Duration::from_secs(900),
            fetch_policy: FetchPolicy::default(),
            provision_policy: ProvisionPolicy::default(),
            frappe_version: DEFAULT_FRAPPE_VERSION.to_string(),
        }
    }

    /// Resolve CLI options against the current and home
    /// directories.
    pub fn from_cli(cli: &Cli) -> InstallResult<Self> {
        let home = dirs::home_dir().ok_or(InstallError::HomeDirMissing)?;
        let cwd = std::env::current_dir()?;

        let fetch_policy = if cli.refetch {
            FetchPolicy::Replace
        } else {
            FetchPolicy::SkipIfPresent
        };

        Ok(Self {
            repo_dir: cwd.join(&cli.repo_dir),
            home_dir: home,
            archive_url: cli.archive_url.clone(),
            docker: cli.docker.clone(),
            log_file: cwd.join(&cli.log_file),
            fetch_timeout: Duration::from_secs(cli.fetch_timeout),
            compose_timeout: Duration::from_secs(cli.compose_timeout),
            fetch_policy,
            provision_policy: ProvisionPolicy::new()
                .secret_bytes(usize::from(cli.secret_bytes))
                .include_cache_password(cli.save_cache_password),
            frappe_version: cli.frappe_version.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = InstallConfig::new("/srv/frappe_docker", "/home/op");

        assert_eq!(config.repo_dir, PathBuf::from("/srv/frappe_docker"));
        assert_eq!(config.home_dir, PathBuf::from("/home/op"));
        assert_eq!(config.archive_url, DEFAULT_ARCHIVE_URL);
        assert_eq!(config.docker, "docker");
        assert_eq!(config.fetch_timeout, Duration::from_secs(120));
        assert_eq!(config.compose_timeout, Duration::from_secs(900));
        assert_eq!(config.fetch_policy, FetchPolicy::SkipIfPresent);
        assert_eq!(config.provision_policy, ProvisionPolicy::default());
        assert_eq!(config.frappe_version, "v15");
    }
}
