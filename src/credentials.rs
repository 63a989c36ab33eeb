use std::path::Path;

use zeroize::{Zeroize, Zeroizing};

use crate::env_file::write_private;
use crate::error::InstallResult;

/// File written to the operator's home directory.
pub const FILE_NAME: &str = "frappe_passwords.txt";

/// The credentials an operator needs after installation, kept
/// outside the deployment repository. Passwords are zeroed on
/// drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub site: String,
    pub admin_password: String,
    pub db_password: String,
    pub cache_password: Option<String>,
}

impl CredentialRecord {
    /// `Label: value` lines, one per credential.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "Site: {}\nAdmin Password: {}\nDB Password: {}\n",
            self.site, self.admin_password, self.db_password
        );
        if let Some(cache) = &self.cache_password {
            out.push_str(&format!("Redis Password: {cache}\n"));
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> InstallResult<()> {
        write_private(path, &Zeroizing::new(self.render()))
    }
}

impl Zeroize for CredentialRecord {
    fn zeroize(&mut self) {
        self.admin_password.zeroize();
        self.db_password.zeroize();
        self.cache_password.zeroize();
    }
}

impl Drop for CredentialRecord {
    fn drop(&mut self) {
        self.zeroize();
    }
}
