//! Common test utilities for integration tests.
//!
//! Fixtures here build real directory trees in temporary locations and give
//! tests a resolver rooted in them.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;
use vroot::{PathResolver, WatchEvent, WatchEventKind, WatchListener};

/// A temporary root directory with a resolver anchored in it.
#[allow(dead_code)]
pub struct TestTree {
    /// Keeps the directory alive for the lifetime of the fixture.
    pub dir: TempDir,
    /// Resolver rooted at `dir`.
    pub resolver: PathResolver,
}

#[allow(dead_code)]
impl TestTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let resolver = PathResolver::new(dir.path()).unwrap();
        Self { dir, resolver }
    }

    /// The resolver's root, in internal form.
    pub fn root(&self) -> &str {
        self.resolver.root()
    }

    /// Native path of a root-relative location.
    pub fn native(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> PathBuf {
        let path = self.native(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    /// Create a directory and its parents.
    pub fn mkdir(&self, relative: &str) -> PathBuf {
        let path = self.native(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }
}

/// Set a file's modification time to `secs` seconds after the epoch.
#[allow(dead_code)]
pub fn set_mtime(path: &Path, secs: u64) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs))
        .unwrap();
}

/// Listener that records every accepted event.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct RecordingListener {
    events: Arc<Mutex<Vec<WatchEvent>>>,
}

#[allow(dead_code)]
impl RecordingListener {
    /// Drain recorded events as `(kind, path)` pairs.
    pub fn take(&self) -> Vec<(WatchEventKind, String)> {
        self.events
            .lock()
            .unwrap()
            .drain(..)
            .map(|e| (e.kind, e.path))
            .collect()
    }
}

impl WatchListener for RecordingListener {
    fn on_created(&mut self, event: &WatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_modified(&mut self, event: &WatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn on_deleted(&mut self, event: &WatchEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
