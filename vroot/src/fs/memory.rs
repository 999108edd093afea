//! In-memory filesystem with explicit modification times.
//!
//! Real filesystems report modification times in whole seconds at best, so
//! tests of "modified" detection on disk have to sleep or forge timestamps.
//! `MemoryFileSystem` lets the caller set every timestamp directly.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{Error, Result};
use crate::fs::{FileSystem, Listing};
use crate::path::{clean_path, make_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Node {
    File { mtime: i64 },
    Directory { mtime: i64 },
}

/// A thread-safe in-memory directory tree.
///
/// The root `/` always exists. Writing a file creates its missing parent
/// directories.
///
/// # Examples
///
/// ```
/// use vroot::fs::{FileSystem, MemoryFileSystem};
///
/// let fs = MemoryFileSystem::new();
/// fs.write_file("/site/index.html", 100);
///
/// assert!(fs.is_directory("/site"));
/// assert_eq!(fs.last_modified("/site/index.html").unwrap(), 100);
/// ```
#[derive(Debug)]
pub struct MemoryFileSystem {
    nodes: Mutex<BTreeMap<String, Node>>,
    cache_clears: AtomicUsize,
}

impl Default for MemoryFileSystem {
    fn default() -> Self {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Directory { mtime: 0 });
        Self {
            nodes: Mutex::new(nodes),
            cache_clears: AtomicUsize::new(0),
        }
    }
}

impl MemoryFileSystem {
    /// Create a filesystem containing only `/`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn nodes(&self) -> MutexGuard<'_, BTreeMap<String, Node>> {
        self.nodes.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Create a directory and any missing parents.
    pub fn create_dir(&self, path: &str) {
        let path = absolute(path);
        let mut nodes = self.nodes();
        create_parents(&mut nodes, &path);
        nodes
            .entry(path)
            .or_insert(Node::Directory { mtime: 0 });
    }

    /// Create or overwrite a file with the given modification time.
    pub fn write_file(&self, path: &str, mtime: i64) {
        let path = absolute(path);
        let mut nodes = self.nodes();
        create_parents(&mut nodes, &path);
        nodes.insert(path, Node::File { mtime });
    }

    /// Set the modification time of an existing entry.
    ///
    /// Returns `false` when nothing exists at `path`.
    pub fn set_modified(&self, path: &str, mtime: i64) -> bool {
        match self.nodes().get_mut(&absolute(path)) {
            Some(Node::File { mtime: m } | Node::Directory { mtime: m }) => {
                *m = mtime;
                true
            }
            None => false,
        }
    }

    /// Remove an entry and, for directories, everything below it.
    ///
    /// Returns `false` when nothing exists at `path`.
    pub fn remove(&self, path: &str) -> bool {
        let path = absolute(path);
        if path == "/" {
            return false;
        }
        let prefix = format!("{path}/");
        let mut nodes = self.nodes();
        let existed = nodes.remove(&path).is_some();
        nodes.retain(|p, _| !p.starts_with(&prefix));
        existed
    }

    /// How many times [`FileSystem::clear_stat_cache`] has been called.
    #[must_use]
    pub fn cache_clears(&self) -> usize {
        self.cache_clears.load(Ordering::Relaxed)
    }
}

fn absolute(path: &str) -> String {
    clean_path(&make_path(&["/", path]))
}

fn parent_of(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) if path.len() > 1 => Some("/"),
        Some(0) | None => None,
        Some(idx) => Some(&path[..idx]),
    }
}

fn create_parents(nodes: &mut BTreeMap<String, Node>, path: &str) {
    let mut current = parent_of(path);
    while let Some(dir) = current {
        nodes
            .entry(dir.to_string())
            .or_insert(Node::Directory { mtime: 0 });
        current = parent_of(dir);
    }
}

fn not_found(path: &str) -> Error {
    Error::PathNotFound {
        path: PathBuf::from(path),
    }
}

impl FileSystem for MemoryFileSystem {
    fn exists(&self, path: &str) -> bool {
        self.nodes().contains_key(&absolute(path))
    }

    fn is_directory(&self, path: &str) -> bool {
        matches!(
            self.nodes().get(&absolute(path)),
            Some(Node::Directory { .. })
        )
    }

    fn list_directory(&self, path: &str) -> Result<Listing> {
        let dir = absolute(path);
        let nodes = self.nodes();
        match nodes.get(&dir) {
            Some(Node::Directory { .. }) => {}
            Some(Node::File { .. }) => {
                return Err(Error::InvalidPath {
                    path: PathBuf::from(&dir),
                    reason: "not a directory".to_string(),
                })
            }
            None => return Err(not_found(&dir)),
        }

        Ok(nodes
            .keys()
            .filter(|p| p.as_str() != "/" && parent_of(p) == Some(dir.as_str()))
            .map(|p| {
                let name = p.rsplit('/').next().unwrap_or_default().to_string();
                (name, p.clone())
            })
            .collect())
    }

    fn last_modified(&self, path: &str) -> Result<i64> {
        match self.nodes().get(&absolute(path)) {
            Some(Node::File { mtime } | Node::Directory { mtime }) => Ok(*mtime),
            None => Err(not_found(path)),
        }
    }

    fn clear_stat_cache(&self) {
        self.cache_clears.fetch_add(1, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_exists() {
        let fs = MemoryFileSystem::new();
        assert!(fs.exists("/"));
        assert!(fs.is_directory("/"));
        assert!(fs.list_directory("/").unwrap().is_empty());
    }

    #[test]
    fn test_write_creates_parents() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/a/b/c.txt", 5);
        assert!(fs.is_directory("/a"));
        assert!(fs.is_directory("/a/b"));
        assert!(!fs.is_directory("/a/b/c.txt"));
        assert_eq!(fs.last_modified("/a/b/c.txt").unwrap(), 5);
    }

    #[test]
    fn test_list_directory_direct_children_only() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/w/one.txt", 1);
        fs.write_file("/w/sub/two.txt", 1);
        fs.write_file("/other.txt", 1);

        let listing = fs.list_directory("/w").unwrap();
        assert_eq!(listing.len(), 2);
        assert_eq!(listing["one.txt"], "/w/one.txt");
        assert_eq!(listing["sub"], "/w/sub");

        let top = fs.list_directory("/").unwrap();
        assert_eq!(top.keys().cloned().collect::<Vec<_>>(), vec!["other.txt", "w"]);
    }

    #[test]
    fn test_list_directory_errors() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/f", 1);
        assert!(fs.list_directory("/missing").unwrap_err().is_not_found());
        assert!(matches!(
            fs.list_directory("/f").unwrap_err(),
            Error::InvalidPath { .. }
        ));
    }

    #[test]
    fn test_remove_subtree() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/d/x", 1);
        fs.write_file("/d/y/z", 1);
        fs.write_file("/dd", 1);

        assert!(fs.remove("/d"));
        assert!(!fs.exists("/d/x"));
        assert!(!fs.exists("/d/y/z"));
        assert!(fs.exists("/dd"));
        assert!(!fs.remove("/d"));
        assert!(!fs.remove("/"));
    }

    #[test]
    fn test_set_modified() {
        let fs = MemoryFileSystem::new();
        fs.write_file("/f", 1);
        assert!(fs.set_modified("/f", 9));
        assert_eq!(fs.last_modified("/f").unwrap(), 9);
        assert!(!fs.set_modified("/nope", 9));
    }

    #[test]
    fn test_cache_clears_counted() {
        let fs = MemoryFileSystem::new();
        fs.clear_stat_cache();
        fs.clear_stat_cache();
        assert_eq!(fs.cache_clears(), 2);
    }

    #[test]
    fn test_relative_paths_are_rooted() {
        let fs = MemoryFileSystem::new();
        fs.write_file("rel/f", 3);
        assert!(fs.exists("/rel/f"));
        assert_eq!(fs.canonical_path("/rel/./f"), "/rel/f");
    }
}
