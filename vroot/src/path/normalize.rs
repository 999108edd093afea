//! Normalization of host paths supplied as configuration.
//!
//! Roots, temporary directories and watch targets arrive from config files,
//! environment variables and CLI flags. Before they can anchor the virtual
//! path space they are:
//! - tilde-expanded (`~` and `~/path`)
//! - made absolute against the process working directory
//! - stripped of `.` and `..` components

use std::env;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Expand a leading tilde to the home directory.
///
/// Supports `~` and `~/path`; `~user` syntax is rejected.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8, the home directory cannot
/// be determined, or `~user` syntax is used.
///
/// # Examples
///
/// ```
/// use vroot::path::normalize::expand_tilde;
/// use std::path::Path;
///
/// let expanded = expand_tilde(Path::new("~/site")).unwrap();
/// assert!(expanded.is_absolute());
/// assert!(expanded.ends_with("site"));
///
/// assert_eq!(expand_tilde(Path::new("/srv")).unwrap(), Path::new("/srv"));
/// ```
pub fn expand_tilde(path: &Path) -> Result<PathBuf> {
    let path_str = path.to_str().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Path contains invalid UTF-8".to_string(),
    })?;

    let Some(rest) = path_str.strip_prefix('~') else {
        return Ok(path.to_path_buf());
    };

    if !(rest.is_empty() || rest.starts_with('/') || rest.starts_with('\\')) {
        return Err(Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "~user syntax is not supported; use ~ or ~/path".to_string(),
        });
    }

    let home = home::home_dir().ok_or_else(|| Error::InvalidPath {
        path: path.to_path_buf(),
        reason: "Cannot determine home directory".to_string(),
    })?;

    Ok(if rest.len() > 1 {
        home.join(&rest[1..])
    } else {
        home
    })
}

/// Drop `.` components and fold `..` components of a path.
///
/// A `..` at the filesystem root stays at the root.
///
/// # Examples
///
/// ```
/// use vroot::path::normalize::resolve_components;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(resolve_components(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(resolve_components(Path::new("/a/../..")), PathBuf::from("/"));
/// ```
#[must_use]
pub fn resolve_components(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                result.push(component);
            }
            Component::CurDir => {}
            Component::ParentDir => {
                let at_root = result.parent().is_none();
                if !at_root {
                    result.pop();
                }
            }
        }
    }

    result
}

/// Normalize a host path to absolute form.
///
/// # Errors
///
/// Returns an error if tilde expansion fails or the current directory cannot
/// be determined for a relative path.
///
/// # Examples
///
/// ```no_run
/// use vroot::path::normalize::normalize;
/// use std::path::Path;
///
/// let root = normalize(Path::new("~/site/../site")).unwrap();
/// assert!(root.is_absolute());
/// ```
pub fn normalize(path: &Path) -> Result<PathBuf> {
    let expanded = expand_tilde(path)?;

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        let cwd = env::current_dir().map_err(|e| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: format!("Cannot get current directory: {e}"),
        })?;
        cwd.join(expanded)
    };

    Ok(resolve_components(&absolute))
}

/// Convert a host path into the string form used by the virtual path space.
///
/// # Errors
///
/// Returns an error if the path is not valid UTF-8.
pub fn path_to_string(path: &Path) -> Result<String> {
    path.to_str()
        .map(|s| s.replace('\\', "/"))
        .ok_or_else(|| Error::InvalidPath {
            path: path.to_path_buf(),
            reason: "Path contains invalid UTF-8".to_string(),
        })
}
