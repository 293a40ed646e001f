//! Configuration file support for depkit.
//!
//! Two configuration file locations are read:
//! - Global: `<config dir>/depkit/config.toml` - User-wide defaults
//! - Project: `.depkit/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, key by key.

use std::path::{Component, Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::project::VENDOR_DIR;

/// depkit configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Vendor directory settings
    pub vendor: VendorConfig,
}

/// Vendor directory settings. Unset keys fall back to lower layers, then
/// to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VendorConfig {
    /// Vendor directory, relative to the project root (default: `vendor`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,

    /// Back up a non-empty vendor directory before it is replaced (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<bool>,
}

impl VendorConfig {
    /// The configured vendor directory name.
    pub fn dir(&self) -> &Path {
        self.dir.as_deref().unwrap_or(Path::new(VENDOR_DIR))
    }

    /// Whether vendor backups are enabled.
    pub fn backup_enabled(&self) -> bool {
        self.backup.unwrap_or(true)
    }

    /// The vendor directory for a project rooted at `root`.
    pub fn path_in(&self, root: &Path) -> PathBuf {
        root.join(self.dir())
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("invalid config: {}", path.display()))?;

        Ok(config)
    }

    /// Reject settings that would point outside the project.
    pub fn validate(&self) -> Result<()> {
        if let Some(dir) = &self.vendor.dir {
            let nested = dir
                .components()
                .all(|c| matches!(c, Component::Normal(_)));

            if dir.as_os_str().is_empty() || !nested {
                bail!(
                    "`vendor.dir = {:?}` must be a relative path below the project root",
                    dir
                );
            }
        }
        Ok(())
    }

    /// Merge another config into this one. Keys set in `other` win.
    pub fn merge(&mut self, other: Config) {
        if other.vendor.dir.is_some() {
            self.vendor.dir = other.vendor.dir;
        }
        if other.vendor.backup.is_some() {
            self.vendor.backup = other.vendor.backup;
        }
    }

    /// Load the global config, then overlay the project config.
    ///
    /// Missing files are skipped; a file that exists but does not parse or
    /// validate is an error.
    pub fn load_layered(project: &Path, global: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        for path in global.into_iter().chain(std::iter::once(project)) {
            if path.exists() {
                tracing::debug!("using config {}", path.display());
                config.merge(Self::load(path)?);
            }
        }

        Ok(config)
    }

    /// Path to the project config file.
    pub fn project_config_path(project_root: &Path) -> PathBuf {
        project_root.join(".depkit").join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.vendor.dir(), Path::new("vendor"));
        assert!(config.vendor.backup_enabled());
        assert_eq!(
            config.vendor.path_in(Path::new("/w/proj")),
            PathBuf::from("/w/proj/vendor")
        );
    }

    #[test]
    fn test_partial_config() {
        let config: Config = toml::from_str("[vendor]\nbackup = false\n").unwrap();
        assert!(!config.vendor.backup_enabled());
        assert_eq!(config.vendor.dir(), Path::new("vendor"));
    }

    #[test]
    fn test_project_config_overlays_global() {
        let tmp = TempDir::new().unwrap();
        let project = Config::project_config_path(tmp.path());
        let global = tmp.path().join("global.toml");
        std::fs::create_dir_all(project.parent().unwrap()).unwrap();
        std::fs::write(&project, "[vendor]\ndir = \"third_party\"\n").unwrap();
        std::fs::write(&global, "[vendor]\nbackup = false\ndir = \"deps\"\n").unwrap();

        let config = Config::load_layered(&project, Some(&global)).unwrap();
        assert_eq!(config.vendor.dir(), Path::new("third_party"));
        assert!(!config.vendor.backup_enabled());
    }

    #[test]
    fn test_global_config_fallback() {
        let tmp = TempDir::new().unwrap();
        let global = tmp.path().join("global.toml");
        std::fs::write(&global, "[vendor]\nbackup = false\n").unwrap();

        let config =
            Config::load_layered(&tmp.path().join("missing.toml"), Some(&global)).unwrap();
        assert!(!config.vendor.backup_enabled());

        let config = Config::load_layered(&tmp.path().join("missing.toml"), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[vendor\n").unwrap();

        assert!(Config::load_layered(&path, None).is_err());
    }

    #[test]
    fn test_vendor_dir_must_stay_inside_project() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        for dir in ["", ".", "..", "./vendor", "vendor/../..", "/tmp/elsewhere"] {
            std::fs::write(&path, format!("[vendor]\ndir = {:?}\n", dir)).unwrap();
            let err = Config::load(&path).unwrap_err();
            assert!(
                format!("{:#}", err).contains("relative path below the project root"),
                "accepted vendor.dir = {:?}",
                dir
            );
        }
    }

    #[test]
    fn test_nested_vendor_dir_is_accepted() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "[vendor]\ndir = \"third_party/go\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(
            config.vendor.path_in(Path::new("/w/proj")),
            PathBuf::from("/w/proj/third_party/go")
        );
    }
}
