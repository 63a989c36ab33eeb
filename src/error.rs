use std::path::PathBuf;
use std::process::ExitStatus;

pub type InstallResult<T> = Result<T, InstallError>;

#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("secure random source unavailable: {0}")]
    RandomSource(String),

    #[error("command failed ({status}): {command}")]
    Orchestration { command: String, status: ExitStatus },

    #[error("command not found: {0}")]
    CommandNotFound(String),

    #[error("command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },

    #[error("home directory could not be determined")]
    HomeDirMissing,

    #[error("invalid compose configuration: {0}")]
    ComposeParse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl InstallError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
