//! Solver input.
//!
//! The constraint solver itself lives outside this crate. This module only
//! defines what is handed to it: the root directory, the analyzer used to
//! read dependency metadata, and the root project's manifest and lock.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use serde::{Serialize, Serializer};

use crate::core::manifest::{Lock, Manifest};
use crate::core::project::{ProjectRoot, MANIFEST_NAME};

/// Name and version of a project analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzerInfo {
    pub name: String,
    pub version: u32,
}

/// Reads dependency metadata out of a checked-out dependency tree.
pub trait ProjectAnalyzer: fmt::Debug + Send + Sync {
    /// Identify this analyzer; the solver uses it to key cached analysis.
    fn info(&self) -> AnalyzerInfo;

    /// Derive a manifest and lock from the project at `path`.
    ///
    /// Either may be absent when the project carries no metadata.
    fn derive_manifest_and_lock(
        &self,
        path: &Path,
        root: &ProjectRoot,
    ) -> Result<(Option<Manifest>, Option<Lock>)>;
}

/// The analyzer for projects that use depkit's own manifest format.
#[derive(Debug, Clone, Copy, Default)]
pub struct Analyzer;

impl Analyzer {
    /// Whether `path` carries a manifest this analyzer understands.
    pub fn has_metadata(&self, path: &Path) -> bool {
        path.join(MANIFEST_NAME).is_file()
    }
}

impl ProjectAnalyzer for Analyzer {
    fn info(&self) -> AnalyzerInfo {
        AnalyzerInfo {
            name: "depkit".to_string(),
            version: 1,
        }
    }

    fn derive_manifest_and_lock(
        &self,
        path: &Path,
        root: &ProjectRoot,
    ) -> Result<(Option<Manifest>, Option<Lock>)> {
        if !self.has_metadata(path) {
            tracing::debug!("{} has no {}", root, MANIFEST_NAME);
            return Ok((None, None));
        }

        // Locks of dependencies never constrain the root's solve.
        let manifest = Manifest::load(&path.join(MANIFEST_NAME))?;
        Ok((Some(manifest), None))
    }
}

/// Everything the solver needs to start a solve.
#[derive(Debug, Clone, Serialize)]
pub struct SolveParameters {
    /// Absolute path to the root project.
    pub root_dir: PathBuf,

    #[serde(serialize_with = "serialize_analyzer")]
    pub project_analyzer: Arc<dyn ProjectAnalyzer>,

    /// Root manifest; `None` when no manifest has been loaded.
    pub manifest: Option<Arc<Manifest>>,

    /// Root lock; `None` when there is no prior solve.
    pub lock: Option<Arc<Lock>>,
}

impl SolveParameters {
    /// Parameters with no manifest or lock.
    pub fn new(root_dir: PathBuf, analyzer: impl ProjectAnalyzer + 'static) -> Self {
        SolveParameters {
            root_dir,
            project_analyzer: Arc::new(analyzer),
            manifest: None,
            lock: None,
        }
    }
}

fn serialize_analyzer<S>(
    analyzer: &Arc<dyn ProjectAnalyzer>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    analyzer.info().serialize(serializer)
}
