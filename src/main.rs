use std::process::ExitCode;

use clap::{CommandFactory, Parser};

use easy_install::output;
use easy_install::{Cli, InstallConfig, Installer, RunLog};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let Some(profile) = cli.profile() else {
        let _ = Cli::command().print_help();
        return ExitCode::SUCCESS;
    };

    let config = match InstallConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Setup failed: {e}"));
            return ExitCode::FAILURE;
        }
    };

    let log = match RunLog::create(&config.log_file) {
        Ok(log) => log,
        Err(e) => {
            output::error(&format!("Setup failed: {e}"));
            return ExitCode::FAILURE;
        }
    };

    output::header(&format!("Setting up {} Instance", profile.label()));

    match Installer::new(config).run(&profile) {
        Ok(deployment) => {
            output::success(&format!(
                "Deployment successful! Access your site at {}",
                deployment.site_url
            ));
            for service in &deployment.services {
                output::list_item(service);
            }
            output::warn(&format!(
                "Credentials saved in {}",
                deployment.credentials_path.display()
            ));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = ?e, "setup failed");
            output::error(&format!("Setup failed: {e}"));
            output::hint(&format!("details in {}", log.path().display()));
            ExitCode::FAILURE
        }
    }
}
