//! Filesystem collaborator used by the watcher.
//!
//! The watcher never calls the operating system directly. It talks to a
//! [`FileSystem`], which exposes only the probes a polling diff needs:
//! existence, directory checks, one-level listings and modification times.
//!
//! Two implementations ship with the crate:
//! - [`LocalFileSystem`] forwards to `std::fs`, optionally mapping paths to
//!   their filesystem-canonical form through a [`PathResolver`](crate::PathResolver)
//! - [`MemoryFileSystem`] is an in-memory tree with explicit timestamps, for
//!   hosts and tests that need deterministic modification times

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::error::Result;
use crate::path::clean_path;

mod local;
mod memory;

pub use local::LocalFileSystem;
pub use memory::MemoryFileSystem;

/// A directory listing: display name to resolved path, ordered by name.
pub type Listing = BTreeMap<String, String>;

/// The probes the watcher needs from a filesystem.
///
/// Paths are the internal (native) form. Implementations must be usable from
/// the thread running the watcher loop.
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem: Send + Sync {
    /// Whether anything exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Whether `path` is an existing directory.
    fn is_directory(&self, path: &str) -> bool;

    /// Whether `path` itself is a symbolic link.
    ///
    /// Recursive listings do not descend through links.
    fn is_symlink(&self, _path: &str) -> bool {
        false
    }

    /// List the direct children of the directory at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    fn list_directory(&self, path: &str) -> Result<Listing>;

    /// Modification time of `path` in whole seconds since the Unix epoch.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be inspected.
    fn last_modified(&self, path: &str) -> Result<i64>;

    /// Map an internal path to the identifier reported in events.
    fn canonical_path(&self, path: &str) -> String {
        clean_path(path)
    }

    /// Drop any cached metadata so the next probes observe fresh state.
    fn clear_stat_cache(&self) {}
}

impl<T: FileSystem + ?Sized> FileSystem for Arc<T> {
    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn is_directory(&self, path: &str) -> bool {
        (**self).is_directory(path)
    }

    fn is_symlink(&self, path: &str) -> bool {
        (**self).is_symlink(path)
    }

    fn list_directory(&self, path: &str) -> Result<Listing> {
        (**self).list_directory(path)
    }

    fn last_modified(&self, path: &str) -> Result<i64> {
        (**self).last_modified(path)
    }

    fn canonical_path(&self, path: &str) -> String {
        (**self).canonical_path(path)
    }

    fn clear_stat_cache(&self) {
        (**self).clear_stat_cache();
    }
}
