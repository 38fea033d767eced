use std::path::PathBuf;

use crate::commands::install::InstallError;

/// Error type for a `nodegen` run.
#[derive(Debug)]
pub enum ScaffoldError {
    /// The command line did not select anything to do.
    Usage(String),
    /// The project name cannot be turned into a project root.
    InvalidProjectName(String),
    /// Creating a directory or writing a file failed.
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The package manifest could not be serialized.
    Manifest(serde_json::Error),
    /// The package manager did not complete successfully.
    Install(InstallError),
}

impl ScaffoldError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScaffoldError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for ScaffoldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaffoldError::Usage(msg) => write!(f, "{msg}"),
            ScaffoldError::InvalidProjectName(name) => {
                write!(f, "Invalid project name '{name}'")
            }
            ScaffoldError::Filesystem { path, source } => {
                write!(f, "Could not write '{}': {source}", path.display())
            }
            ScaffoldError::Manifest(err) => write!(f, "Could not serialize package.json: {err}"),
            ScaffoldError::Install(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for ScaffoldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScaffoldError::Filesystem { source, .. } => Some(source),
            ScaffoldError::Manifest(err) => Some(err),
            ScaffoldError::Install(err) => Some(err),
            ScaffoldError::Usage(_) | ScaffoldError::InvalidProjectName(_) => None,
        }
    }
}

impl From<InstallError> for ScaffoldError {
    fn from(err: InstallError) -> Self {
        ScaffoldError::Install(err)
    }
}

impl From<serde_json::Error> for ScaffoldError {
    fn from(err: serde_json::Error) -> Self {
        ScaffoldError::Manifest(err)
    }
}
