//! Project and vendor error types and diagnostics.

use std::io;
use std::path::PathBuf;

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::project::MANIFEST_NAME;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Failure of root discovery, project construction or a vendor backup.
///
/// Every variant is returned to the caller as-is; nothing in the library
/// retries or downgrades these.
#[derive(Debug, Error, MietteDiagnostic)]
pub enum ProjectError {
    #[error("could not find project {} above `{}`", MANIFEST_NAME, .start.display())]
    #[diagnostic(
        code(depkit::project::not_found),
        help("run `depkit init` to create a Gopkg.toml")
    )]
    ProjectNotFound { start: PathBuf },

    #[error("failed to inspect `{}`", .path.display())]
    #[diagnostic(code(depkit::fs::stat_failed))]
    FilesystemProbeFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` is not a directory", .path.display())]
    #[diagnostic(code(depkit::fs::not_a_directory))]
    NotADirectory { path: PathBuf },

    #[error("project root `{}` is not an existing directory", .path.display())]
    #[diagnostic(code(depkit::project::invalid_root))]
    InvalidRoot { path: PathBuf },

    #[error("failed to create vendor backup: `{}` already exists", .backup.display())]
    #[diagnostic(
        code(depkit::vendor::backup_collision),
        help("move or delete the existing backup, or pick another suffix")
    )]
    VendorBackupCollision { backup: PathBuf },

    #[error("failed to move `{}` to `{}`", .from.display(), .to.display())]
    #[diagnostic(code(depkit::vendor::relocation_failed))]
    RelocationFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ProjectError {
    pub(crate) fn stat_failed(path: impl Into<PathBuf>, source: io::Error) -> Self {
        ProjectError::FilesystemProbeFailed {
            path: path.into(),
            source,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ProjectError::ProjectNotFound { start } => Diagnostic::error(format!(
                "could not find project {}",
                MANIFEST_NAME
            ))
            .with_context(format!("searched upward from {}", start.display()))
            .with_suggestion(suggestions::NO_MANIFEST),

            ProjectError::FilesystemProbeFailed { path, source } => {
                Diagnostic::error(format!("failed to inspect {}", path.display()))
                    .with_context(source.to_string())
                    .with_suggestion(suggestions::CHECK_PERMISSIONS)
            }

            ProjectError::NotADirectory { path } => {
                Diagnostic::error(format!("{} is not a directory", path.display()))
                    .with_location(path.clone())
            }

            ProjectError::InvalidRoot { path } => Diagnostic::error(format!(
                "project root {} is not an existing directory",
                path.display()
            ))
            .with_location(path.clone()),

            ProjectError::VendorBackupCollision { backup } => {
                Diagnostic::error("failed to create vendor backup")
                    .with_context(format!("{} already exists", backup.display()))
                    .with_suggestion(suggestions::BACKUP_EXISTS)
                    .with_suggestion("Pass a different `--suffix`")
            }

            ProjectError::RelocationFailed { from, to, source } => Diagnostic::error(format!(
                "failed to move {} to {}",
                from.display(),
                to.display()
            ))
            .with_context(source.to_string())
            .with_suggestion(suggestions::INSPECT_PARTIAL_BACKUP),
        }
    }
}
