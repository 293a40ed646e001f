//! Filesystem utilities.

use std::fs;
use std::io;
use std::path::Path;

use walkdir::WalkDir;

use crate::core::errors::ProjectError;

/// Check whether `path` is a directory with at least one entry.
///
/// A missing path is simply "not non-empty". A path that exists but is not a
/// directory is an error.
pub fn is_non_empty_dir(path: &Path) -> Result<bool, ProjectError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ProjectError::NotADirectory {
                path: path.to_path_buf(),
            })
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(ProjectError::stat_failed(path, e)),
    }

    let mut entries = fs::read_dir(path).map_err(|e| ProjectError::stat_failed(path, e))?;
    match entries.next() {
        Some(Ok(_)) => Ok(true),
        Some(Err(e)) => Err(ProjectError::stat_failed(path, e)),
        None => Ok(false),
    }
}

/// Moves a file or directory tree from one path to another.
///
/// After `Ok`, `from` no longer exists and `to` holds what `from` held.
pub trait Relocator {
    fn relocate(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Rename, falling back to copy-then-delete across filesystems.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenameWithFallback;

impl Relocator for RenameWithFallback {
    fn relocate(&self, from: &Path, to: &Path) -> io::Result<()> {
        rename_with_fallback(from, to)
    }
}

/// Rename `from` to `to`, copying and deleting when they are on different
/// devices.
pub fn rename_with_fallback(from: &Path, to: &Path) -> io::Result<()> {
    rename_with_fallback_using(from, to, |from, to| fs::rename(from, to))
}

/// [`rename_with_fallback`] with the rename primitive supplied by the caller.
///
/// Only a cross-device failure triggers the copy. Any other rename error is
/// returned untouched. A copy that fails partway is not cleaned up.
pub fn rename_with_fallback_using<F>(from: &Path, to: &Path, rename: F) -> io::Result<()>
where
    F: FnOnce(&Path, &Path) -> io::Result<()>,
{
    fs::symlink_metadata(from)?;

    match rename(from, to) {
        Ok(()) => Ok(()),
        Err(e) if is_cross_device(&e) => {
            tracing::debug!(
                "cannot rename {} across devices, copying instead",
                from.display()
            );
            rename_by_copy(from, to)
        }
        Err(e) => Err(e),
    }
}

fn rename_by_copy(from: &Path, to: &Path) -> io::Result<()> {
    let ty = fs::symlink_metadata(from)?.file_type();

    if ty.is_symlink() {
        symlink(&fs::read_link(from)?, to)?;
        // Directory links on Windows can only be removed as directories.
        fs::remove_file(from).or_else(|_| fs::remove_dir(from))
    } else if ty.is_dir() {
        copy_dir_all(from, to)?;
        fs::remove_dir_all(from)
    } else {
        fs::copy(from, to)?;
        fs::remove_file(from)
    }
}

fn is_cross_device(err: &io::Error) -> bool {
    // ERROR_NOT_SAME_DEVICE
    err.kind() == io::ErrorKind::CrossesDevices || (cfg!(windows) && err.raw_os_error() == Some(17))
}

/// Recursively copy a directory. `dst` must not exist yet.
///
/// Symlinks are recreated, not followed. Directory permissions are applied
/// once their contents are in place, deepest first.
pub fn copy_dir_all(src: &Path, dst: &Path) -> io::Result<()> {
    fs::create_dir(dst)?;
    let mut dirs = vec![(dst.to_path_buf(), fs::metadata(src)?.permissions())];

    for entry in WalkDir::new(src).min_depth(1).follow_links(false) {
        let entry = entry?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(io::Error::other)?;
        let target = dst.join(rel);
        let ty = entry.file_type();

        if ty.is_dir() {
            fs::create_dir(&target)?;
            dirs.push((target, entry.metadata()?.permissions()));
        } else if ty.is_symlink() {
            symlink(&fs::read_link(entry.path())?, &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }

    for (dir, perms) in dirs.into_iter().rev() {
        fs::set_permissions(&dir, perms)?;
    }
    Ok(())
}

/// Create a symlink (platform-aware).
#[cfg(unix)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(src, dst)
}

#[cfg(windows)]
pub fn symlink(src: &Path, dst: &Path) -> io::Result<()> {
    if src.is_dir() {
        std::os::windows::fs::symlink_dir(src, dst)
    } else {
        std::os::windows::fs::symlink_file(src, dst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cross_device(_: &Path, _: &Path) -> io::Result<()> {
        Err(io::Error::from(io::ErrorKind::CrossesDevices))
    }

    fn populate(dir: &Path) {
        fs::create_dir_all(dir.join("github.com/pkg/errors")).unwrap();
        fs::write(dir.join("github.com/pkg/errors/errors.go"), "package errors").unwrap();
        fs::write(dir.join("modules.txt"), "# github.com/pkg/errors").unwrap();
    }

    #[test]
    fn test_is_non_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("vendor");

        assert!(!is_non_empty_dir(&dir).unwrap());

        fs::create_dir(&dir).unwrap();
        assert!(!is_non_empty_dir(&dir).unwrap());

        fs::write(dir.join("file"), "").unwrap();
        assert!(is_non_empty_dir(&dir).unwrap());
    }

    #[test]
    fn test_is_non_empty_dir_on_file() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("vendor");
        fs::write(&file, "not a dir").unwrap();

        assert!(matches!(
            is_non_empty_dir(&file),
            Err(ProjectError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_copy_dir_all() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        populate(&src);

        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(
            fs::read_to_string(dst.join("github.com/pkg/errors/errors.go")).unwrap(),
            "package errors"
        );
        assert!(dst.join("modules.txt").exists());
        assert!(src.exists());
    }

    #[test]
    fn test_copy_dir_all_refuses_existing_destination() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        populate(&src);
        fs::create_dir(&dst).unwrap();

        let err = copy_dir_all(&src, &dst).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_dir_all_keeps_symlinks() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        populate(&src);
        symlink(Path::new("modules.txt"), &src.join("link")).unwrap();

        copy_dir_all(&src, &dst).unwrap();

        assert_eq!(fs::read_link(dst.join("link")).unwrap(), Path::new("modules.txt"));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_dir_all_keeps_nested_dir_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        populate(&src);
        let nested = src.join("github.com/pkg");
        let readonly = src.join("github.com/pkg/errors");
        fs::set_permissions(&nested, fs::Permissions::from_mode(0o750)).unwrap();
        fs::set_permissions(&readonly, fs::Permissions::from_mode(0o555)).unwrap();

        copy_dir_all(&src, &dst).unwrap();

        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode(&dst.join("github.com/pkg")), 0o750);
        assert_eq!(mode(&dst.join("github.com/pkg/errors")), 0o555);
        assert_eq!(
            fs::read_to_string(dst.join("github.com/pkg/errors/errors.go")).unwrap(),
            "package errors"
        );

        // Let TempDir clean up.
        for dir in [&readonly, &dst.join("github.com/pkg/errors")] {
            fs::set_permissions(dir, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_fallback_moves_symlink_as_link() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("real-vendor");
        let src = tmp.path().join("vendor");
        let dst = tmp.path().join("vendor-bak");
        populate(&target);
        symlink(&target, &src).unwrap();

        rename_with_fallback_using(&src, &dst, cross_device).unwrap();

        assert!(fs::symlink_metadata(&src).is_err());
        assert!(fs::symlink_metadata(&dst).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&dst).unwrap(), target);
        assert!(target.join("modules.txt").exists());
    }

    #[test]
    fn test_rename_with_fallback() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("vendor");
        let dst = tmp.path().join("vendor-bak");
        populate(&src);

        rename_with_fallback(&src, &dst).unwrap();

        assert!(!src.exists());
        assert!(dst.join("modules.txt").exists());
    }

    #[test]
    fn test_rename_falls_back_to_copy_across_devices() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("vendor");
        let dst = tmp.path().join("vendor-bak");
        populate(&src);

        rename_with_fallback_using(&src, &dst, cross_device).unwrap();

        assert!(!src.exists());
        assert_eq!(
            fs::read_to_string(dst.join("github.com/pkg/errors/errors.go")).unwrap(),
            "package errors"
        );
    }

    #[test]
    fn test_rename_fallback_for_single_file() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("a.txt");
        let dst = tmp.path().join("b.txt");
        fs::write(&src, "contents").unwrap();

        rename_with_fallback_using(&src, &dst, cross_device).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "contents");
    }

    #[test]
    fn test_rename_other_errors_are_not_retried() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("vendor");
        let dst = tmp.path().join("vendor-bak");
        populate(&src);

        let err = rename_with_fallback_using(&src, &dst, |_, _| {
            Err(io::Error::from(io::ErrorKind::PermissionDenied))
        })
        .unwrap_err();

        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
        assert!(src.join("modules.txt").exists());
        assert!(!dst.exists());
    }

    #[test]
    fn test_rename_missing_source() {
        let tmp = TempDir::new().unwrap();
        let err = rename_with_fallback(&tmp.path().join("nope"), &tmp.path().join("dst"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
