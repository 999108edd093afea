//! `std::fs`-backed filesystem collaborator.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use crate::error::{Error, Result};
use crate::fs::{FileSystem, Listing};
use crate::path::{clean_path, make_path, PathResolver};

/// Filesystem collaborator backed by the host filesystem.
///
/// When rooted in a [`PathResolver`], event paths are reported in
/// filesystem-canonical form (root stripped, aliases expanded); otherwise
/// they are the cleaned native paths.
///
/// # Examples
///
/// ```no_run
/// use vroot::fs::{FileSystem, LocalFileSystem};
/// use vroot::PathResolver;
///
/// let resolver = PathResolver::new("/srv/site").unwrap();
/// let fs = LocalFileSystem::rooted(resolver);
/// assert_eq!(fs.canonical_path("/srv/site/a/b.txt"), "a/b.txt");
/// ```
#[derive(Debug, Clone, Default)]
pub struct LocalFileSystem {
    resolver: Option<PathResolver>,
}

impl LocalFileSystem {
    /// A collaborator that reports cleaned native paths.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A collaborator that reports paths relative to the resolver's root.
    #[must_use]
    pub fn rooted(resolver: PathResolver) -> Self {
        Self {
            resolver: Some(resolver),
        }
    }

    /// The resolver used for canonical paths, if any.
    #[must_use]
    pub fn resolver(&self) -> Option<&PathResolver> {
        self.resolver.as_ref()
    }
}

fn map_io_error(path: &str, e: io::Error) -> Error {
    match e.kind() {
        ErrorKind::NotFound => Error::PathNotFound {
            path: PathBuf::from(path),
        },
        ErrorKind::PermissionDenied => Error::PermissionDenied {
            path: PathBuf::from(path),
        },
        _ => Error::Io(e),
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &str) -> bool {
        Path::new(path).exists()
    }

    fn is_directory(&self, path: &str) -> bool {
        Path::new(path).is_dir()
    }

    fn is_symlink(&self, path: &str) -> bool {
        fs::symlink_metadata(path).is_ok_and(|m| m.file_type().is_symlink())
    }

    fn list_directory(&self, path: &str) -> Result<Listing> {
        let mut listing = Listing::new();

        for entry in fs::read_dir(path).map_err(|e| map_io_error(path, e))? {
            let entry = entry.map_err(|e| map_io_error(path, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            let resolved = clean_path(&make_path(&[path, name.as_str()]));
            listing.insert(name, resolved);
        }

        Ok(listing)
    }

    fn last_modified(&self, path: &str) -> Result<i64> {
        let modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .map_err(|e| map_io_error(path, e))?;

        // Timestamps before the epoch are clamped to it.
        let secs = modified
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| d.as_secs());
        Ok(i64::try_from(secs).unwrap_or(i64::MAX))
    }

    fn canonical_path(&self, path: &str) -> String {
        match self.resolver {
            Some(ref resolver) => resolver.to_filesystem_path(path),
            None => clean_path(path),
        }
    }
}
