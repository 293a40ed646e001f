//! Project - one resolvable workspace.
//!
//! A Project is the discovered root directory, its import identity, and
//! whatever manifest and lock state has been loaded for it. It is built once
//! per command and dropped afterwards.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::errors::ProjectError;
use crate::core::manifest::{Lock, Manifest};
use crate::solver::{Analyzer, SolveParameters};

/// Manifest file name; its presence marks a project root.
pub const MANIFEST_NAME: &str = "Gopkg.toml";

/// Lock file name.
pub const LOCK_NAME: &str = "Gopkg.lock";

/// Default vendor directory name, relative to the project root.
pub const VENDOR_DIR: &str = "vendor";

/// The import path of a project's root directory.
///
/// Opaque to this crate; callers decide how it is derived.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProjectRoot(String);

impl ProjectRoot {
    pub fn new(root: impl Into<String>) -> Self {
        ProjectRoot(root.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProjectRoot {
    fn from(s: &str) -> Self {
        ProjectRoot(s.to_string())
    }
}

/// Search from `from` upwards for a directory containing [`MANIFEST_NAME`].
///
/// Stops at the first filesystem error that is not "not found" and returns it
/// unchanged. Reaching the filesystem root yields
/// [`ProjectError::ProjectNotFound`].
pub fn find_project_root(from: &Path) -> Result<PathBuf, ProjectError> {
    let start = std::path::absolute(from).map_err(|e| ProjectError::stat_failed(from, e))?;
    let mut current = start.as_path();

    loop {
        let marker = current.join(MANIFEST_NAME);
        tracing::debug!("looking for {}", marker.display());

        match std::fs::metadata(&marker) {
            Ok(_) => return Ok(current.to_path_buf()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(ProjectError::stat_failed(marker, e)),
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return Err(ProjectError::ProjectNotFound { start }),
        }
    }
}

/// A project rooted at a directory containing a manifest.
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute path to the root directory of the project.
    abs_root: PathBuf,

    /// Import path of the project's root directory.
    import_root: ProjectRoot,

    manifest: Option<Arc<Manifest>>,
    lock: Option<Arc<Lock>>,
}

impl Project {
    /// Create a project with no manifest or lock loaded.
    ///
    /// Fails with [`ProjectError::InvalidRoot`] unless `abs_root` is an
    /// existing directory.
    pub fn new(abs_root: impl AsRef<Path>, import_root: ProjectRoot) -> Result<Self, ProjectError> {
        let abs_root = abs_root.as_ref();
        let abs_root =
            std::path::absolute(abs_root).map_err(|e| ProjectError::stat_failed(abs_root, e))?;

        match std::fs::metadata(&abs_root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => return Err(ProjectError::InvalidRoot { path: abs_root }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ProjectError::InvalidRoot { path: abs_root })
            }
            Err(e) => return Err(ProjectError::stat_failed(abs_root, e)),
        }

        Ok(Project {
            abs_root,
            import_root,
            manifest: None,
            lock: None,
        })
    }

    /// Create a project and load its manifest, plus its lock if one exists.
    pub fn load(abs_root: impl AsRef<Path>, import_root: ProjectRoot) -> Result<Self> {
        let project = Project::new(abs_root, import_root)?;

        let manifest = Manifest::load(&project.manifest_path())?;
        let lock = load_lock_if_present(&project.lock_path())?;

        let project = project.with_manifest(manifest);
        Ok(match lock {
            Some(lock) => project.with_lock(lock),
            None => project,
        })
    }

    /// Discover the project containing `cwd` and load it.
    pub fn discover(cwd: &Path, import_root: Option<ProjectRoot>) -> Result<Self> {
        let root = find_project_root(cwd)?;
        let import_root = import_root.unwrap_or_else(|| default_import_root(&root));

        Project::load(&root, import_root)
            .with_context(|| format!("failed to load project at {}", root.display()))
    }

    /// Attach a manifest.
    pub fn with_manifest(mut self, manifest: impl Into<Arc<Manifest>>) -> Self {
        self.manifest = Some(manifest.into());
        self
    }

    /// Attach a lock.
    pub fn with_lock(mut self, lock: impl Into<Arc<Lock>>) -> Self {
        self.lock = Some(lock.into());
        self
    }

    pub fn abs_root(&self) -> &Path {
        &self.abs_root
    }

    pub fn import_root(&self) -> &ProjectRoot {
        &self.import_root
    }

    pub fn manifest(&self) -> Option<&Manifest> {
        self.manifest.as_deref()
    }

    pub fn lock(&self) -> Option<&Lock> {
        self.lock.as_deref()
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.abs_root.join(MANIFEST_NAME)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.abs_root.join(LOCK_NAME)
    }

    /// Build solver parameters without ever setting an absent manifest or
    /// lock to an empty value.
    pub fn make_params(&self) -> SolveParameters {
        let mut params = SolveParameters::new(self.abs_root.clone(), Analyzer);

        if let Some(manifest) = &self.manifest {
            params.manifest = Some(Arc::clone(manifest));
        }

        if let Some(lock) = &self.lock {
            params.lock = Some(Arc::clone(lock));
        }

        params
    }
}

/// Load the lock at `path`, or `None` if there is none.
///
/// Only "not found" means absent; any other stat error is returned.
fn load_lock_if_present(path: &Path) -> Result<Option<Lock>> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(Some(Lock::load(path)?)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no {} at {}", LOCK_NAME, path.display());
            Ok(None)
        }
        Err(e) => Err(ProjectError::stat_failed(path, e).into()),
    }
}

/// Fall back to the root directory's name as its import identity.
fn default_import_root(root: &Path) -> ProjectRoot {
    root.file_name()
        .map(|name| ProjectRoot::new(name.to_string_lossy()))
        .unwrap_or_else(|| ProjectRoot::new(root.to_string_lossy()))
}
