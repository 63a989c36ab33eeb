use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Duration;

use docker_compose_types::Compose;

use crate::cmd;
use crate::env_file;
use crate::error::{InstallError, InstallResult};
use crate::profile::DeploymentProfile;

/// Compose files every profile stacks, relative to the
/// deployment repository.
pub const BASE_LAYERS: [&str; 3] = [
    "compose.yaml",
    "overrides/compose.postgres.yaml",
    "overrides/compose.redis.yaml",
];

/// TLS termination via Traefik + Let's Encrypt, production only.
pub const HTTPS_LAYER: &str = "overrides/compose.https.yaml";

/// The `docker compose` invocations for one profile.
///
/// # Example
///
/// ```
/// use easy_install::{ComposePlan, DeploymentProfile};
///
/// let plan = ComposePlan::for_profile(&DeploymentProfile::development());
///
/// assert_eq!(plan.project, "taywan-dev");
/// assert!(!plan.layers.contains(&"overrides/compose.https.yaml".to_string()));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposePlan {
    pub project: String,
    pub layers: Vec<String>,
}

impl ComposePlan {
    #[must_use]
    pub fn for_profile(profile: &DeploymentProfile) -> Self {
        let mut layers: Vec<String> = BASE_LAYERS.iter().map(ToString::to_string).collect();
        if profile.is_production {
            layers.push(HTTPS_LAYER.to_string());
        }

        Self {
            project: profile.project_name.clone(),
            layers,
        }
    }

    /// Where the rendered configuration is kept: next to the
    /// credential record, named after the project.
    #[must_use]
    pub fn rendered_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}-compose.yml", self.project))
    }

    /// Arguments that merge all layers with the `.env` into one
    /// document on stdout.
    #[must_use]
    pub fn config_args(&self) -> Vec<String> {
        let mut args = vec![
            "compose".to_string(),
            "--project-name".to_string(),
            self.project.clone(),
        ];
        for layer in &self.layers {
            args.push("-f".to_string());
            args.push(layer.clone());
        }
        args.push("--env-file".to_string());
        args.push(env_file::FILE_NAME.to_string());
        args.push("config".to_string());
        args
    }

    /// Arguments that start the rendered stack detached.
    #[must_use]
    pub fn up_args(&self, rendered: &Path) -> Vec<String> {
        vec![
            "compose".to_string(),
            "-p".to_string(),
            self.project.clone(),
            "-f".to_string(),
            rendered.display().to_string(),
            "up".to_string(),
            "-d".to_string(),
        ]
    }
}

/// Runs [`ComposePlan`] invocations through a docker binary.
#[derive(Debug, Clone)]
pub struct ComposeRunner {
    docker: String,
    timeout: Duration,
}

impl ComposeRunner {
    #[must_use]
    pub fn new(docker: &str, timeout: Duration) -> Self {
        Self {
            docker: docker.to_string(),
            timeout,
        }
    }

    /// Render the merged configuration of `repo_dir` into
    /// `rendered`, replacing it.
    pub fn render(
        &self,
        plan: &ComposePlan,
        repo_dir: &Path,
        rendered: &Path,
    ) -> InstallResult<()> {
        let out = File::create(rendered).map_err(|e| InstallError::write(rendered, e))?;
        let args = plan.config_args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        cmd::run_to_file(&self.docker, &args, repo_dir, out, self.timeout)?;
        tracing::info!(path = %rendered.display(), "compose configuration rendered");
        Ok(())
    }

    pub fn up(&self, plan: &ComposePlan, rendered: &Path) -> InstallResult<()> {
        let args = plan.up_args(rendered);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();

        cmd::run_interactive(&self.docker, &args, self.timeout)?;
        tracing::info!(project = %plan.project, "services started");
        Ok(())
    }
}

/// Service names declared in a rendered compose file, in file
/// order.
pub fn services(rendered: &Path) -> InstallResult<Vec<String>> {
    let content = fs::read_to_string(rendered)?;
    let compose: Compose = serde_yaml::from_str(&content)?;
    Ok(compose.services.0.keys().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rendered_path_is_named_after_project() {
        let plan = ComposePlan::for_profile(&DeploymentProfile::production());

        assert_eq!(
            plan.rendered_path(Path::new("/home/op")),
            PathBuf::from("/home/op/taywan-compose.yml")
        );
    }

    #[test]
    fn up_args_reference_rendered_file() {
        let plan = ComposePlan::for_profile(&DeploymentProfile::development());
        let args = plan.up_args(Path::new("/home/op/taywan-dev-compose.yml"));

        assert_eq!(
            args,
            vec![
                "compose",
                "-p",
                "taywan-dev",
                "-f",
                "/home/op/taywan-dev-compose.yml",
                "up",
                "-d"
            ]
        );
    }
}
