//! Global context for depkit operations.
//!
//! Provides centralized access to the working directory, output settings and
//! configuration locations.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::core::errors::ProjectError;
use crate::core::project::find_project_root;
use crate::util::config::Config;

/// Project directories for depkit
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "depkit", "depkit"));

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Directory holding the user-wide config.toml, if one can be determined
    config_dir: Option<PathBuf>,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            config_dir: PROJECT_DIRS.as_ref().map(|dirs| dirs.config_dir().to_path_buf()),
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = std::path::absolute(&cwd)
            .with_context(|| format!("invalid working directory: {}", cwd.display()))?;
        Ok(ctx)
    }

    /// Use a different directory for the user-wide config.
    pub fn with_config_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.config_dir = dir;
        self
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> Option<PathBuf> {
        self.config_dir.as_ref().map(|dir| dir.join("config.toml"))
    }

    /// Find the project root by searching upward from cwd.
    pub fn find_project_root(&self) -> Result<PathBuf, ProjectError> {
        find_project_root(&self.cwd)
    }

    /// Load configuration for the project rooted at `project_root`.
    pub fn load_config(&self, project_root: &Path) -> Result<Config> {
        let global = self.global_config_path();
        Config::load_layered(&Config::project_config_path(project_root), global.as_deref())
    }
}
