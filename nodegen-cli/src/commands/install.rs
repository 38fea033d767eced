use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

/// Runs the package manager that installs a generated project's dependencies.
#[derive(Debug, Clone)]
pub struct Installer {
    program: String,
}

impl Installer {
    pub fn new(program: impl Into<String>) -> Self {
        Installer {
            program: program.into(),
        }
    }

    /// Installer backed by `npm`.
    pub fn npm() -> Self {
        Installer::new("npm")
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the package manager for `dependencies`.
    pub fn args(dependencies: &[&str]) -> Vec<String> {
        ["install", "--save"]
            .iter()
            .chain(dependencies)
            .map(|s| s.to_string())
            .collect()
    }

    /// Locate the program on `PATH` the way a shell would, so `npm.cmd`
    /// shims are found on Windows. Falls back to the bare name, leaving the
    /// spawn to report it missing.
    pub fn resolve_program(&self) -> PathBuf {
        match which::which(&self.program) {
            Ok(path) => path,
            Err(e) => {
                debug!(program = %self.program, error = %e, "program not found on PATH");
                PathBuf::from(&self.program)
            }
        }
    }

    /// The full command as it would be typed: program and space-joined arguments.
    pub fn command_line(&self, dependencies: &[&str]) -> String {
        format!("{} {}", self.program, Self::args(dependencies).join(" "))
    }

    /// Install `dependencies` into the project at `root`.
    ///
    /// The child inherits stdin, stdout and stderr so the package manager's
    /// own progress output reaches the user. Resolves once the child exits;
    /// there is no timeout.
    pub async fn install(&self, root: &Path, dependencies: &[&str]) -> Result<(), InstallError> {
        let command = self.command_line(dependencies);
        info!(cwd = %root.display(), %command, "installing dependencies");

        let program = self.resolve_program();
        debug!(program = %program.display(), "resolved package manager");

        let status = Command::new(&program)
            .args(Self::args(dependencies))
            .current_dir(root)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| InstallError {
                command: command.clone(),
                reason: InstallFailure::Spawn(e),
            })?;

        debug!(?status, "package manager exited");

        if !status.success() {
            return Err(InstallError {
                command,
                reason: InstallFailure::Exited(status.code()),
            });
        }

        Ok(())
    }
}

/// Why an install did not succeed.
#[derive(Debug)]
pub enum InstallFailure {
    /// The package manager could not be started.
    Spawn(std::io::Error),
    /// The package manager exited unsuccessfully. `None` when it was killed
    /// by a signal.
    Exited(Option<i32>),
}

/// A failed dependency install, carrying the command that was attempted.
#[derive(Debug)]
pub struct InstallError {
    pub command: String,
    pub reason: InstallFailure,
}

impl std::fmt::Display for InstallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            InstallFailure::Spawn(err) => write!(f, "`{}` could not be started: {err}", self.command),
            InstallFailure::Exited(Some(code)) => {
                write!(f, "`{}` exited with code {code}", self.command)
            }
            InstallFailure::Exited(None) => {
                write!(f, "`{}` was terminated by a signal", self.command)
            }
        }
    }
}

impl std::error::Error for InstallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.reason {
            InstallFailure::Spawn(err) => Some(err),
            InstallFailure::Exited(_) => None,
        }
    }
}
