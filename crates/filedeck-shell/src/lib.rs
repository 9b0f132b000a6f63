use std::io;
use std::process::{Command, ExitStatus};
use std::thread::{self, JoinHandle};

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("empty path")]
    EmptyPath,
    #[error("failed to open {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Hands a path to whatever the OS considers its default handler.
pub trait FileLauncher: Send + Sync {
    fn open_path(&self, full_path: &str) -> Result<(), ShellError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

impl FileLauncher for SystemLauncher {
    fn open_path(&self, full_path: &str) -> Result<(), ShellError> {
        let path = full_path.trim();
        if path.is_empty() {
            return Err(ShellError::EmptyPath);
        }

        tracing::debug!(path, "opening with system handler");
        spawn_detached(open_command(path)).map_err(|source| ShellError::Spawn {
            path: path.to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Starts `command` without blocking; a background thread waits on the child so it gets reaped.
fn spawn_detached(mut command: Command) -> io::Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = command.spawn()?;
    let pid = child.id();
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            tracing::debug!(pid, %status, "file handler exited");
            Some(status)
        }
        Err(err) => {
            tracing::warn!(pid, error = %err, "failed to wait on file handler");
            None
        }
    }))
}

#[cfg(target_os = "windows")]
fn open_command(path: &str) -> Command {
    let mut command = Command::new("cmd");
    command.args(["/C", "start", "", path]);
    command
}

#[cfg(target_os = "macos")]
fn open_command(path: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(path);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn open_command(path: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(path);
    command
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_path_is_rejected_before_spawning() {
        let err = SystemLauncher.open_path("   ").unwrap_err();
        assert!(matches!(err, ShellError::EmptyPath));
    }

    #[test]
    fn open_command_targets_the_given_path() {
        let command = open_command("/tmp/report.pdf");
        let args: Vec<_> = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(args.last().map(String::as_str), Some("/tmp/report.pdf"));
    }

    #[cfg(unix)]
    #[test]
    fn detached_child_is_reaped() {
        let reaper = spawn_detached(Command::new("true")).unwrap();
        let status = reaper.join().unwrap();
        assert!(status.is_some_and(|status| status.success()));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = spawn_detached(Command::new("filedeck-no-such-program")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
