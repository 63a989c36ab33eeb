use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::subscriber::DefaultGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

use crate::error::{InstallError, InstallResult};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "EASY_INSTALL_LOG";

/// The log file of one installer run.
///
/// Creating a `RunLog` truncates the file and routes `tracing`
/// events from the current thread into it until the value is
/// dropped.
pub struct RunLog {
    path: PathBuf,
    _guard: DefaultGuard,
}

impl RunLog {
    pub fn create(path: &Path) -> InstallResult<Self> {
        let file = File::create(path).map_err(|e| InstallError::write(path, e))?;

        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
        let subscriber = tracing_subscriber::registry().with(filter).with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        );

        Ok(Self {
            path: path.to_path_buf(),
            _guard: tracing::subscriber::set_default(subscriber),
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}
