/// Target site for one installation: hostname, compose project
/// and the contact address used for TLS certificates.
///
/// Only two profiles ship with the installer, see
/// [`DeploymentProfile::production`] and
/// [`DeploymentProfile::development`].
///
/// # Example
///
/// ```
/// use easy_install::DeploymentProfile;
///
/// let profile = DeploymentProfile::development();
///
/// assert_eq!(profile.site_host, "dev.taywan.cloud");
/// assert_eq!(profile.project_name, "taywan-dev");
/// assert!(!profile.is_production);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentProfile {
    pub site_host: String,
    pub project_name: String,
    pub admin_email: String,
    pub is_production: bool,
}

const ADMIN_EMAIL: &str = "Amein@taywan.cloud";

impl DeploymentProfile {
    #[must_use]
    pub fn new(
        site_host: &str,
        project_name: &str,
        admin_email: &str,
        is_production: bool,
    ) -> Self {
        Self {
            site_host: site_host.to_string(),
            project_name: project_name.to_string(),
            admin_email: admin_email.to_string(),
            is_production,
        }
    }

    #[must_use]
    pub fn production() -> Self {
        Self::new("taywan.cloud", "taywan", ADMIN_EMAIL, true)
    }

    #[must_use]
    pub fn development() -> Self {
        Self::new("dev.taywan.cloud", "taywan-dev", ADMIN_EMAIL, false)
    }

    /// Human-readable name used in console banners.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        if self.is_production {
            "Production"
        } else {
            "Development"
        }
    }

    /// Public URL of the deployed site.
    #[must_use]
    pub fn site_url(&self) -> String {
        format!("https://{}", self.site_host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_defaults() {
        let profile = DeploymentProfile::production();

        assert_eq!(profile.site_host, "taywan.cloud");
        assert_eq!(profile.project_name, "taywan");
        assert_eq!(profile.admin_email, "Amein@taywan.cloud");
        assert!(profile.is_production);
        assert_eq!(profile.label(), "Production");
    }

    #[test]
    fn development_defaults() {
        let profile = DeploymentProfile::development();

        assert_eq!(profile.site_host, "dev.taywan.cloud");
        assert_eq!(profile.project_name, "taywan-dev");
        assert!(!profile.is_production);
        assert_eq!(profile.label(), "Development");
    }

    #[test]
    fn site_url_uses_https() {
        let profile =
            DeploymentProfile::new("dev.example.test", "example-dev", "a@example.test", false);

        assert_eq!(profile.site_url(), "https://dev.example.test");
    }
}
