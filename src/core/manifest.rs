//! Manifest (Gopkg.toml) and lock (Gopkg.lock) state.
//!
//! Only the shape of these files is modelled here. Constraint semantics
//! belong to the solver.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Direct dependency declarations of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Packages that must be included even if nothing imports them.
    pub required: Vec<String>,

    /// Packages that are never considered.
    pub ignored: Vec<String>,

    /// Constraints on direct dependencies.
    #[serde(rename = "constraint")]
    pub constraints: Vec<ProjectConstraint>,

    /// Constraints that apply to the whole graph.
    #[serde(rename = "override")]
    pub overrides: Vec<ProjectConstraint>,
}

/// A `[[constraint]]` or `[[override]]` entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConstraint {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,

    /// Alternate location to fetch the project from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Manifest {
    /// Load a manifest from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        Self::from_str(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }

    /// Parse a manifest from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}

/// Resolved versions recorded by a previous solve.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lock {
    pub projects: Vec<LockedProject>,
}

/// A `[[projects]]` entry in the lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedProject {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    pub revision: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default)]
    pub packages: Vec<String>,
}

impl Lock {
    /// Load a lock from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read lock: {}", path.display()))?;

        Self::from_str(&contents)
            .with_context(|| format!("failed to parse lock: {}", path.display()))
    }

    /// Parse a lock from TOML text.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }
}
