mod policy;

use std::path::{Path, PathBuf};

pub use policy::ProvisionPolicy;

use crate::credentials::{self, CredentialRecord};
use crate::env_file::{self, DEFAULT_FRAPPE_VERSION, EnvironmentFile};
use crate::error::InstallResult;
use crate::profile::DeploymentProfile;
use crate::secret::{EntropySource, OsEntropy, SecretSet};

/// Output of a successful [`Provisioner::provision`] call. Both
/// files exist on disk and share the same secret values.
#[derive(Debug, Clone)]
pub struct Provisioned {
    pub env_file: EnvironmentFile,
    pub env_path: PathBuf,
    pub credentials: CredentialRecord,
    pub credentials_path: PathBuf,
}

/// Writes the compose `.env` and the operator credential record
/// for a profile, with fresh secrets on every call.
///
/// # Example
///
/// ```no_run
/// use easy_install::{DeploymentProfile, ProvisionPolicy, Provisioner};
///
/// let provisioner = Provisioner::new("/home/frappe")
///     .policy(ProvisionPolicy::new().secret_bytes(24));
///
/// let out = provisioner
///     .provision(&DeploymentProfile::development(), "frappe_docker".as_ref())
///     .unwrap();
/// println!("credentials in {}", out.credentials_path.display());
/// ```
pub struct Provisioner {
    credentials_dir: PathBuf,
    policy: ProvisionPolicy,
    frappe_version: String,
    entropy: Box<dyn EntropySource>,
}

impl Provisioner {
    /// `credentials_dir` receives the credential record, normally
    /// the operator's home directory.
    #[must_use]
    pub fn new(credentials_dir: impl Into<PathBuf>) -> Self {
        Self {
            credentials_dir: credentials_dir.into(),
            policy: ProvisionPolicy::default(),
            frappe_version: DEFAULT_FRAPPE_VERSION.to_string(),
            entropy: Box::new(OsEntropy),
        }
    }

    #[must_use]
    pub fn policy(mut self, policy: ProvisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn frappe_version(mut self, version: &str) -> Self {
        self.frappe_version = version.to_string();
        self
    }

    #[must_use]
    pub fn entropy(mut self, source: impl EntropySource + 'static) -> Self {
        self.entropy = Box::new(source);
        self
    }

    #[must_use]
    pub fn credentials_path(&self) -> PathBuf {
        self.credentials_dir.join(credentials::FILE_NAME)
    }

    /// Generate secrets and write `target_dir/.env` and the
    /// credential record, replacing both files.
    ///
    /// Nothing is written when secret generation fails. If the
    /// credential record cannot be written the `.env` is left in
    /// place.
    pub fn provision(
        &self,
        profile: &DeploymentProfile,
        target_dir: &Path,
    ) -> InstallResult<Provisioned> {
        let secrets = SecretSet::generate(self.entropy.as_ref(), self.policy.secret_bytes)?;

        let env_file = EnvironmentFile::for_profile(profile, &secrets, &self.frappe_version);
        let env_path = target_dir.join(env_file::FILE_NAME);
        env_file.write_to(&env_path)?;
        tracing::info!(
            path = %env_path.display(),
            keys = env_file.len(),
            "environment file written"
        );

        let credentials = CredentialRecord {
            site: profile.site_host.clone(),
            admin_password: secrets.admin_password.expose().to_string(),
            db_password: secrets.db_password.expose().to_string(),
            cache_password: self
                .policy
                .include_cache_password
                .then(|| secrets.cache_password.expose().to_string()),
        };
        let credentials_path = self.credentials_path();
        credentials.write_to(&credentials_path)?;
        tracing::info!(path = %credentials_path.display(), "credentials saved");

        Ok(Provisioned {
            env_file,
            env_path,
            credentials,
            credentials_path,
        })
    }
}
