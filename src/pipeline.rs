use std::path::PathBuf;

use clap::{ArgGroup, Parser};

use crate::compose::{self, ComposePlan, ComposeRunner};
use crate::config::InstallConfig;
use crate::env_file::DEFAULT_FRAPPE_VERSION;
use crate::error::InstallResult;
use crate::fetch::{DEFAULT_ARCHIVE_URL, FetchOutcome, Fetcher};
use crate::profile::DeploymentProfile;
use crate::provision::Provisioner;

/// What a finished installation left behind.
#[derive(Debug, Clone)]
pub struct Deployment {
    pub site_url: String,
    pub fetch: FetchOutcome,
    pub credentials_path: PathBuf,
    pub rendered_path: PathBuf,
    /// Services found in the rendered configuration, empty when
    /// it could not be parsed.
    pub services: Vec<String>,
}

/// Runs fetch, provision, render and up for one profile.
pub struct Installer {
    config: InstallConfig,
    provisioner: Provisioner,
}

impl Installer {
    #[must_use]
    pub fn new(config: InstallConfig) -> Self {
        let provisioner = Provisioner::new(&config.home_dir)
            .policy(config.provision_policy)
            .frappe_version(&config.frappe_version);

        Self {
            config,
            provisioner,
        }
    }

    /// Swap the provisioner, e.g. to inject an entropy source.
    #[must_use]
    pub fn provisioner(mut self, provisioner: Provisioner) -> Self {
        self.provisioner = provisioner;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &InstallConfig {
        &self.config
    }

    /// Stops at the first failing step. Nothing written by earlier
    /// steps is rolled back.
    pub fn run(&self, profile: &DeploymentProfile) -> InstallResult<Deployment> {
        let config = &self.config;
        tracing::info!(
            profile = profile.label(),
            site = %profile.site_host,
            project = %profile.project_name,
            "setting up instance"
        );

        let fetch = Fetcher::new(&config.archive_url)
            .timeout(config.fetch_timeout)
            .policy(config.fetch_policy)
            .ensure(&config.repo_dir)?;

        let provisioned = self.provisioner.provision(profile, &config.repo_dir)?;

        let plan = ComposePlan::for_profile(profile);
        let rendered_path = plan.rendered_path(&config.home_dir);
        let runner = ComposeRunner::new(&config.docker, config.compose_timeout);

        runner.render(&plan, &config.repo_dir, &rendered_path)?;
        let services = compose::services(&rendered_path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not list services from rendered configuration");
            Vec::new()
        });
        tracing::info!(services = ?services, "compose services");

        runner.up(&plan, &rendered_path)?;
        tracing::info!(site = %profile.site_url(), "deployment successful");

        Ok(Deployment {
            site_url: profile.site_url(),
            fetch,
            credentials_path: provisioned.credentials_path,
            rendered_path,
            services,
        })
    }
}

/// Install Frappe with Docker.
#[derive(Debug, Parser)]
#[command(name = "easy-install")]
#[command(about = "Install Frappe with Docker")]
#[command(group(ArgGroup::new("profile").args(["prod", "dev"])))]
pub struct Cli {
    /// Setup Production System
    #[arg(short, long)]
    pub prod: bool,

    /// Setup Development System
    #[arg(short, long)]
    pub dev: bool,

    /// Directory of the frappe_docker checkout
    #[arg(long, env = "EASY_INSTALL_REPO_DIR", default_value = "frappe_docker")]
    pub repo_dir: PathBuf,

    /// Gzip tarball of the deployment repository
    #[arg(long, env = "EASY_INSTALL_ARCHIVE_URL", default_value = DEFAULT_ARCHIVE_URL)]
    pub archive_url: String,

    /// Docker binary used for compose commands
    #[arg(long, env = "EASY_INSTALL_DOCKER", default_value = "docker")]
    pub docker: String,

    /// Run log, replaced on every run
    #[arg(long, env = "EASY_INSTALL_LOG_FILE", default_value = "easy-install.log")]
    pub log_file: PathBuf,

    /// Download timeout in seconds
    #[arg(long, env = "EASY_INSTALL_FETCH_TIMEOUT", default_value_t = 120)]
    pub fetch_timeout: u64,

    /// Timeout in seconds for each docker compose command
    #[arg(long, env = "EASY_INSTALL_COMPOSE_TIMEOUT", default_value_t = 900)]
    pub compose_timeout: u64,

    /// Bytes of entropy per generated password
    #[arg(
        long,
        env = "EASY_INSTALL_SECRET_BYTES",
        default_value_t = 16,
        value_parser = clap::value_parser!(u16).range(16..=128)
    )]
    pub secret_bytes: u16,

    /// Frappe image version written to .env
    #[arg(long, env = "EASY_INSTALL_FRAPPE_VERSION", default_value = DEFAULT_FRAPPE_VERSION)]
    pub frappe_version: String,

    /// Also write the Redis password to the credentials file
    #[arg(long)]
    pub save_cache_password: bool,

    /// Download the repository again even if it exists
    #[arg(long)]
    pub refetch: bool,
}

impl Cli {
    /// The selected profile, `None` when neither flag was given.
    #[must_use]
    pub fn profile(&self) -> Option<DeploymentProfile> {
        if self.prod {
            Some(DeploymentProfile::production())
        } else if self.dev {
            Some(DeploymentProfile::development())
        } else {
            None
        }
    }
}
