//! Shared fixtures: a scratch workspace with a pre-fetched
//! repository and a stand-in `docker` script.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

pub const RENDERED: &str = "services:\n  \
    backend:\n    \
      image: frappe/erpnext:v15\n  \
    frontend:\n    \
      image: frappe/erpnext:v15\n";

pub struct Workspace {
    pub root: TempDir,
    pub home: TempDir,
}

impl Workspace {
    /// Workspace whose `frappe_docker` checkout already exists so
    /// no download happens.
    pub fn new() -> Self {
        let ws = Self {
            root: TempDir::new().unwrap(),
            home: TempDir::new().unwrap(),
        };
        fs::create_dir(ws.repo()).unwrap();
        fs::write(ws.repo().join("compose.yaml"), "local checkout").unwrap();
        ws
    }

    pub fn repo(&self) -> PathBuf {
        self.root.path().join("frappe_docker")
    }

    pub fn docker_log(&self) -> PathBuf {
        self.root.path().join("docker-calls.log")
    }

    /// Lines logged by the fake docker, one per invocation.
    pub fn docker_calls(&self) -> Vec<String> {
        fs::read_to_string(self.docker_log())
            .map(|s| s.lines().map(ToString::to_string).collect())
            .unwrap_or_default()
    }

    /// Write a `docker` stand-in that records its arguments,
    /// prints [`RENDERED`] for `config` and exits with
    /// `exit_code`.
    #[cfg(unix)]
    pub fn fake_docker(&self, exit_code: i32) -> PathBuf {
        let path = self.root.path().join("fake-docker");
        let script = format!(
            "#!/bin/sh\n\
             echo \"$*\" >> '{log}'\n\
             case \"$*\" in\n  \
               *\" config\") printf '%s' '{rendered}' ;;\n\
             esac\n\
             exit {exit_code}\n",
            log = self.docker_log().display(),
            rendered = RENDERED,
        );
        write_executable(&path, &script);
        path
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, content: &str) {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, content).unwrap();
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
}
