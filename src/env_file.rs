use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{InstallError, InstallResult};
use crate::profile::DeploymentProfile;
use crate::secret::SecretSet;

/// File name the compose templates read substitutions from.
pub const FILE_NAME: &str = ".env";

/// Version of the Frappe images pinned when none is given.
pub const DEFAULT_FRAPPE_VERSION: &str = "v15";

/// Ordered `KEY=value` configuration consumed by
/// `docker compose --env-file`. Values are zeroed on drop since
/// several of them are generated secrets.
///
/// # Example
///
/// ```
/// use easy_install::EnvironmentFile;
///
/// let env = EnvironmentFile::new()
///     .set("DB_HOST", "postgres")
///     .set("DB_PORT", "5432");
///
/// assert_eq!(env.get("DB_PORT"), Some("5432"));
/// assert_eq!(env.render(), "DB_HOST=postgres\nDB_PORT=5432\n");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentFile {
    entries: IndexMap<String, String>,
}

impl EnvironmentFile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the full Postgres + Redis configuration for a
    /// profile. Key order is fixed.
    #[must_use]
    pub fn for_profile(
        profile: &DeploymentProfile,
        secrets: &SecretSet,
        frappe_version: &str,
    ) -> Self {
        Self::new()
            .set("FRAPPE_VERSION", frappe_version)
            .set("DB_TYPE", "postgres")
            .set("DB_HOST", "postgres")
            .set("DB_PORT", "5432")
            .set("DB_NAME", "postgres")
            .set("DB_PASSWORD", secrets.db_password.expose())
            .set("DB_USER", "postgres")
            .set("REDIS_CACHE", "redis-cache:6379")
            .set("REDIS_QUEUE", "redis-queue:6379")
            .set("REDIS_SOCKETIO", "redis-socketio:6379")
            .set("REDIS_PASSWORD", secrets.cache_password.expose())
            .set("SITE_NAME", &profile.site_host)
            .set("SITES", &profile.site_host)
            .set("ADMIN_PASSWORD", secrets.admin_password.expose())
            .set("LETSENCRYPT_EMAIL", &profile.admin_email)
            .set("USE_SHARED_DB", "1")
    }

    /// Set a key. An existing key keeps its position.
    #[must_use]
    pub fn set(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}={v}\n"))
            .collect()
    }

    /// Parse `KEY=value` lines. Blank lines and `#` comments are
    /// skipped, a single pair of surrounding quotes is stripped.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        let mut entries = IndexMap::new();

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                entries.insert(key.trim().to_string(), unquote(value.trim()).to_string());
            }
        }

        Self { entries }
    }

    pub fn read(path: &Path) -> InstallResult<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    /// Replace `path` with the rendered content.
    pub fn write_to(&self, path: &Path) -> InstallResult<()> {
        write_private(path, &Zeroizing::new(self.render()))
    }
}

impl Zeroize for EnvironmentFile {
    /// Wipe every value, keeping the keys.
    fn zeroize(&mut self) {
        self.entries.values_mut().for_each(Zeroize::zeroize);
    }
}

impl Drop for EnvironmentFile {
    fn drop(&mut self) {
        self.zeroize();
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Truncate-and-write a file only the owner can read.
pub(crate) fn write_private(path: &Path, content: &str) -> InstallResult<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options
        .open(path)
        .map_err(|e| InstallError::write(path, e))?;
    file.write_all(content.as_bytes())
        .map_err(|e| InstallError::write(path, e))?;

    // mode() only applies on create
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| InstallError::write(path, e))?;
    }

    Ok(())
}
