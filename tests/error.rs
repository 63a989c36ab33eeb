use std::path::PathBuf;

use easy_install::InstallError;

#[test]
fn display_fetch() {
    let err = InstallError::Fetch("connection refused".into());
    assert_eq!(err.to_string(), "fetch failed: connection refused");
}

#[test]
fn display_write() {
    let err = InstallError::Write {
        path: PathBuf::from("/srv/frappe_docker/.env"),
        source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
    };
    assert_eq!(err.to_string(), "failed to write /srv/frappe_docker/.env: denied");
}

#[test]
fn display_random_source() {
    let err = InstallError::RandomSource("no entropy".into());
    assert_eq!(err.to_string(), "secure random source unavailable: no entropy");
}

#[test]
fn display_command_not_found() {
    let err = InstallError::CommandNotFound("docker".into());
    assert_eq!(err.to_string(), "command not found: docker");
}

#[test]
fn display_timeout() {
    let err = InstallError::Timeout {
        command: "docker compose up -d".into(),
        seconds: 900,
    };
    assert_eq!(err.to_string(), "command timed out after 900s: docker compose up -d");
}

#[test]
fn display_home_dir_missing() {
    let err = InstallError::HomeDirMissing;
    assert_eq!(err.to_string(), "home directory could not be determined");
}

#[test]
fn from_io_error() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
    let err: InstallError = io_err.into();
    assert!(matches!(err, InstallError::Io(_)));
}

#[test]
fn from_yaml_error() {
    let yaml_err = serde_yaml::from_str::<Vec<u64>>("invalid").unwrap_err();
    let err: InstallError = yaml_err.into();
    assert!(matches!(err, InstallError::ComposeParse(_)));
}
