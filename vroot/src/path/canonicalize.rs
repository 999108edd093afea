//! Symlink resolution for the root directory.
//!
//! A root such as `/var/www` may itself be a symlink; callers sometimes hand
//! back paths in the resolved form (`/data/www/...`). The resolver strips
//! either prefix, so the real form is computed once when it is constructed.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Canonicalize a path by following symlinks.
///
/// # Errors
///
/// Returns `PathNotFound` if the path does not exist, `PermissionDenied` if it
/// cannot be accessed, and `Io` for any other failure.
///
/// # Examples
///
/// ```no_run
/// use vroot::path::canonicalize::canonicalize;
/// use std::path::Path;
///
/// let canonical = canonicalize(Path::new("/tmp")).unwrap();
/// assert!(canonical.is_absolute());
/// ```
pub fn canonicalize(path: &Path) -> Result<PathBuf> {
    fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::PathNotFound {
            path: path.to_path_buf(),
        },
        ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => Error::Io(e),
    })
}

/// Check that `root` exists and is a directory, returning its real path.
///
/// # Errors
///
/// Returns `RootNotFound` when the root does not exist and
/// `RootNotDirectory` when it is something other than a directory.
pub fn verify_root(root: &Path) -> Result<PathBuf> {
    let real = canonicalize(root).map_err(|e| {
        if e.is_not_found() {
            Error::RootNotFound {
                path: root.to_path_buf(),
            }
        } else {
            e
        }
    })?;

    if !real.is_dir() {
        return Err(Error::RootNotDirectory {
            path: root.to_path_buf(),
        });
    }

    Ok(real)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_canonicalize_missing_path() {
        let err = canonicalize(Path::new("/nonexistent/vroot/xyz")).unwrap_err();
        assert!(matches!(err, Error::PathNotFound { .. }));
    }

    #[test]
    fn test_verify_root_accepts_directory() {
        let dir = tempdir().unwrap();
        let real = verify_root(dir.path()).unwrap();
        assert!(real.is_absolute());
        assert!(real.is_dir());
    }

    #[test]
    fn test_verify_root_missing() {
        let dir = tempdir().unwrap();
        let err = verify_root(&dir.path().join("gone")).unwrap_err();
        assert!(matches!(err, Error::RootNotFound { .. }));
    }

    #[test]
    fn test_verify_root_rejects_file() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        fs::write(&file, "x").unwrap();
        let err = verify_root(&file).unwrap_err();
        assert!(matches!(err, Error::RootNotDirectory { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_verify_root_follows_symlink() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        let target = dir.path().join("target");
        let link = dir.path().join("link");
        fs::create_dir(&target).unwrap();
        symlink(&target, &link).unwrap();

        let real = verify_root(&link).unwrap();
        assert!(real.ends_with("target"));
    }
}
