//! One-command installer for a Frappe stack on docker compose.
//!
//! `easy-install` prepares a `frappe_docker` checkout for a
//! deployment profile and starts it:
//!
//! 1. **Fetch** - download and unpack the `frappe_docker`
//!    repository unless it is already present ([`Fetcher`])
//! 2. **Provision** - generate fresh passwords, write the compose
//!    `.env` and a credential record in the operator's home
//!    directory ([`Provisioner`])
//! 3. **Compose** - render the layered compose configuration and
//!    bring the services up detached ([`ComposePlan`])
//!
//! [`Installer`] wires the three steps together; the
//! `easy-install` binary adds argument parsing, the run log and
//! console reporting.
//!
//! # Provisioning a checkout
//!
//! ```rust,no_run
//! use easy_install::{DeploymentProfile, ProvisionPolicy, Provisioner};
//!
//! fn main() -> easy_install::InstallResult<()> {
//!     let provisioner = Provisioner::new("/home/frappe")
//!         .policy(ProvisionPolicy::new().include_cache_password(true));
//!
//!     let out = provisioner.provision(
//!         &DeploymentProfile::production(),
//!         "frappe_docker".as_ref(),
//!     )?;
//!
//!     assert_eq!(
//!         out.env_file.get("DB_PASSWORD"),
//!         Some(out.credentials.db_password.as_str()),
//!     );
//!     Ok(())
//! }
//! ```
//!
//! # Full installation
//!
//! ```rust,no_run
//! use easy_install::{DeploymentProfile, InstallConfig, Installer};
//!
//! fn main() -> easy_install::InstallResult<()> {
//!     let config = InstallConfig::new("/srv/frappe_docker", "/home/frappe");
//!     let deployment = Installer::new(config).run(&DeploymentProfile::development())?;
//!
//!     println!("site available at {}", deployment.site_url);
//!     Ok(())
//! }
//! ```

#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod cmd;
pub mod compose;
pub mod config;
pub mod credentials;
pub mod env_file;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod profile;
pub mod provision;
pub mod secret;

pub use compose::{ComposePlan, ComposeRunner};
pub use config::InstallConfig;
pub use credentials::CredentialRecord;
pub use env_file::EnvironmentFile;
pub use error::{InstallError, InstallResult};
pub use fetch::{FetchOutcome, FetchPolicy, Fetcher};
pub use logging::RunLog;
pub use pipeline::{Cli, Deployment, Installer};
pub use profile::DeploymentProfile;
pub use provision::{ProvisionPolicy, Provisioned, Provisioner};
pub use secret::{EntropySource, GeneratedSecret, OsEntropy, SecretSet};
