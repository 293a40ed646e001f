//! Vendor directory backups.
//!
//! A solve may rewrite the vendor directory wholesale. Before it does, any
//! existing non-empty vendor tree is moved aside to `<vendor>-<suffix>`.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::errors::ProjectError;
use crate::util::fs::{is_non_empty_dir, Relocator, RenameWithFallback};

/// Move a non-empty vendor directory to `<vendor_path>-<suffix>`.
///
/// Returns `Ok(None)` without touching the filesystem when there is nothing
/// to protect. Refuses with [`ProjectError::VendorBackupCollision`] if the
/// backup path is already taken.
pub fn backup_vendor(vendor_path: &Path, suffix: &str) -> Result<Option<PathBuf>, ProjectError> {
    backup_vendor_with(&RenameWithFallback, vendor_path, suffix)
}

/// [`backup_vendor`] with a caller-supplied relocation primitive.
pub fn backup_vendor_with(
    relocator: &dyn Relocator,
    vendor_path: &Path,
    suffix: &str,
) -> Result<Option<PathBuf>, ProjectError> {
    if !is_non_empty_dir(vendor_path)? {
        tracing::debug!("no vendor tree at {}, skipping backup", vendor_path.display());
        return Ok(None);
    }

    let backup = backup_path(vendor_path, suffix);

    // Symlinks count as taken, dangling or not.
    match std::fs::symlink_metadata(&backup) {
        Ok(_) => return Err(ProjectError::VendorBackupCollision { backup }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(ProjectError::stat_failed(backup, e)),
    }

    tracing::info!(
        "backing up {} to {}",
        vendor_path.display(),
        backup.display()
    );

    relocator
        .relocate(vendor_path, &backup)
        .map_err(|source| ProjectError::RelocationFailed {
            from: vendor_path.to_path_buf(),
            to: backup.clone(),
            source,
        })?;

    Ok(Some(backup))
}

/// `<vendor_path>-<suffix>`, ignoring any trailing separator on the vendor path.
pub fn backup_path(vendor_path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(vendor_path.components().as_path());
    name.push("-");
    name.push(suffix);
    PathBuf::from(name)
}
