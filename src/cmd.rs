use std::fs::File;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{InstallError, InstallResult};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run a command with stdout redirected into `stdout`. Stderr is
/// inherited so the operator sees tool diagnostics.
pub fn run_to_file(
    program: &str,
    args: &[&str],
    cwd: &Path,
    stdout: File,
    timeout: Duration,
) -> InstallResult<()> {
    let mut command = Command::new(program);
    command
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::inherit());

    run(&mut command, program, args, timeout)
}

/// Run a command with stdout/stderr inherited (interactive).
pub fn run_interactive(program: &str, args: &[&str], timeout: Duration) -> InstallResult<()> {
    let mut command = Command::new(program);
    command
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    run(&mut command, program, args, timeout)
}

fn run(
    command: &mut Command,
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> InstallResult<()> {
    let rendered = format_command(program, args);
    tracing::debug!(command = %rendered, "running");

    let child = command.spawn().map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            InstallError::CommandNotFound(program.to_string())
        } else {
            InstallError::Io(e)
        }
    })?;

    let status = wait_with_timeout(child, &rendered, timeout)?;

    if status.success() {
        Ok(())
    } else {
        Err(InstallError::Orchestration {
            command: rendered,
            status,
        })
    }
}

/// Poll the child until it exits. Kills it once `timeout`
/// elapses; a timeout too large for the clock never expires.
fn wait_with_timeout(
    mut child: Child,
    command: &str,
    timeout: Duration,
) -> InstallResult<ExitStatus> {
    let deadline = Instant::now().checked_add(timeout);

    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }

        if deadline.is_some_and(|d| Instant::now() >= d) {
            // already exited between try_wait and kill is fine
            let _ = child.kill();
            let _ = child.wait();
            return Err(InstallError::Timeout {
                command: command.to_string(),
                seconds: timeout.as_secs(),
            });
        }

        thread::sleep(POLL_INTERVAL);
    }
}

fn format_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| (*a).to_string()));
    parts.join(" ")
}
