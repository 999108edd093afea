//! The polling watcher.
//!
//! A [`Watcher`] keeps two caches: the files cache (display name to resolved
//! path) describes which paths are watched, and the modification-time cache
//! (canonical path to seconds) is the baseline each tick compares against.
//! One tick clears the collaborator's stat cache, diffs every watched path
//! against the baseline, fires events, then re-baselines.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use crate::error::{Error, Result};
use crate::fs::{FileSystem, Listing};
use crate::path::clean_path;
use crate::watch::config::WatchConfig;
use crate::watch::event::{dispatch, WatchEvent, WatchEventKind, WatchListener};

/// Upper bound on directory nesting followed by recursive listings.
const MAX_LISTING_DEPTH: usize = 40;

/// Lifecycle of a [`Watcher`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// Constructed; caches are empty.
    Unbuilt,
    /// Caches populated; not polling.
    Built,
    /// Inside the polling loop.
    Started,
    /// The polling loop has exited.
    Stopped,
}

/// What the watched path turned out to be at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchMode {
    /// The path is a directory; each tick re-lists it.
    Directory,
    /// The path is a single file, possibly not yet existing.
    SingleFile,
}

impl fmt::Display for WatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Directory => write!(f, "directory"),
            Self::SingleFile => write!(f, "file"),
        }
    }
}

/// Stops a running [`Watcher`] from another thread or a listener.
///
/// The loop observes the request after its current sleep.
#[derive(Debug, Clone)]
pub struct StopHandle {
    running: Arc<AtomicBool>,
}

impl StopHandle {
    /// Ask the watcher loop to exit.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// Whether the loop is still meant to run.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Polling change detector over a [`FileSystem`].
///
/// # Examples
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use vroot::fs::MemoryFileSystem;
/// use vroot::watch::{WatchConfig, WatchEvent, WatchListener, Watcher};
///
/// #[derive(Clone, Default)]
/// struct Collect(Arc<Mutex<Vec<WatchEvent>>>);
///
/// impl WatchListener for Collect {
///     fn on_created(&mut self, event: &WatchEvent) {
///         self.0.lock().unwrap().push(event.clone());
///     }
/// }
///
/// let fs = Arc::new(MemoryFileSystem::new());
/// fs.create_dir("/w");
///
/// let seen = Collect::default();
/// let config = WatchConfig::builder("/w").build().unwrap();
/// let mut watcher = Watcher::new(config, Arc::clone(&fs), seen.clone());
/// watcher.build().unwrap();
///
/// fs.write_file("/w/f.txt", 10);
/// watcher.process().unwrap();
///
/// let events = seen.0.lock().unwrap();
/// assert_eq!(events.len(), 1);
/// assert_eq!(events[0].path, "/w/f.txt");
/// ```
pub struct Watcher {
    config: WatchConfig,
    fs: Box<dyn FileSystem>,
    listener: Box<dyn WatchListener>,
    state: WatcherState,
    mode: Option<WatchMode>,
    files: Listing,
    mtimes: BTreeMap<String, i64>,
    running: Arc<AtomicBool>,
}

impl fmt::Debug for Watcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Watcher")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("mode", &self.mode)
            .field("files", &self.files.len())
            .field("mtimes", &self.mtimes.len())
            .finish_non_exhaustive()
    }
}

impl Watcher {
    /// Create an unbuilt watcher.
    pub fn new(
        config: WatchConfig,
        fs: impl FileSystem + 'static,
        listener: impl WatchListener + 'static,
    ) -> Self {
        Self {
            config,
            fs: Box::new(fs),
            listener: Box::new(listener),
            state: WatcherState::Unbuilt,
            mode: None,
            files: Listing::new(),
            mtimes: BTreeMap::new(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// The configuration this watcher was created with.
    #[must_use]
    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> WatcherState {
        self.state
    }

    /// Directory or single-file mode; `None` until built.
    #[must_use]
    pub fn mode(&self) -> Option<WatchMode> {
        self.mode
    }

    /// Whether the polling loop is (or is about to be) running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// The files cache: display name to resolved path.
    #[must_use]
    pub fn files(&self) -> &Listing {
        &self.files
    }

    /// The modification-time baseline, keyed by canonical path.
    #[must_use]
    pub fn mtimes(&self) -> &BTreeMap<String, i64> {
        &self.mtimes
    }

    /// A handle that can stop the loop started by [`start`](Self::start).
    ///
    /// # Errors
    ///
    /// Returns `WatcherNotBuilt` before [`build`](Self::build).
    pub fn stop_handle(&self) -> Result<StopHandle> {
        self.ensure_built()?;
        Ok(StopHandle {
            running: Arc::clone(&self.running),
        })
    }

    /// Populate the files cache and capture the baseline.
    ///
    /// Does nothing when already built.
    ///
    /// # Errors
    ///
    /// Propagates listing and modification-time failures.
    pub fn build(&mut self) -> Result<()> {
        if self.state != WatcherState::Unbuilt {
            return Ok(());
        }

        let path = self.config.path().to_string();
        if self.fs.is_directory(&path) {
            self.mode = Some(WatchMode::Directory);
            self.files = self.list_watched(&path)?;
        } else {
            self.mode = Some(WatchMode::SingleFile);
            let name = path.rsplit('/').next().unwrap_or_default().to_string();
            self.files = Listing::from([(name, path.clone())]);
        }

        self.rebaseline()?;
        self.state = WatcherState::Built;
        log::debug!(
            "Built {} watcher on {} ({} paths)",
            self.mode.map_or("unknown".to_string(), |m| m.to_string()),
            path,
            self.files.len()
        );
        Ok(())
    }

    /// Run ticks until stopped, sleeping the configured interval between them.
    ///
    /// Blocks the calling thread. A tick failure stops the loop and is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `WatcherNotBuilt` before [`build`](Self::build), or the first
    /// tick failure.
    pub fn start(&mut self) -> Result<()> {
        self.ensure_built()?;
        self.running.store(true, Ordering::SeqCst);
        self.state = WatcherState::Started;
        log::info!(
            "Watching {} every {:?}",
            self.config.path(),
            self.config.interval()
        );

        while self.running.load(Ordering::SeqCst) {
            if let Err(e) = self.process() {
                log::warn!("Watch tick failed: {e}");
                self.running.store(false, Ordering::SeqCst);
                self.state = WatcherState::Stopped;
                return Err(e);
            }
            thread::sleep(self.config.interval());
        }

        self.state = WatcherState::Stopped;
        log::debug!("Stopped watching {}", self.config.path());
        Ok(())
    }

    /// Request the loop to exit.
    ///
    /// # Errors
    ///
    /// Returns `WatcherNotBuilt` before [`build`](Self::build).
    pub fn stop(&mut self) -> Result<()> {
        self.ensure_built()?;
        self.running.store(false, Ordering::SeqCst);
        self.state = WatcherState::Stopped;
        Ok(())
    }

    /// Stop, clear both caches, rebuild and start again.
    ///
    /// # Errors
    ///
    /// Returns `WatcherNotBuilt` before [`build`](Self::build), or whatever
    /// the rebuild or the new loop returns.
    pub fn restart(&mut self) -> Result<()> {
        self.stop()?;
        self.reset();
        self.build()?;
        self.start()
    }

    /// Run a single tick.
    ///
    /// Returns the number of detected changes, including ones the listener's
    /// gate vetoed.
    ///
    /// # Errors
    ///
    /// Returns `WatcherNotBuilt` before [`build`](Self::build), or any
    /// collaborator failure.
    pub fn process(&mut self) -> Result<usize> {
        self.ensure_built()?;
        self.fs.clear_stat_cache();

        let changes = match self.mode {
            Some(WatchMode::Directory) => self.process_directory()?,
            _ => {
                let watched: Vec<_> = self.files.clone().into_iter().collect();
                let mut changes = 0;
                for (name, path) in watched {
                    changes += usize::from(self.detect(&name, &path)?);
                }
                changes
            }
        };

        self.rebaseline()?;
        Ok(changes)
    }

    fn process_directory(&mut self) -> Result<usize> {
        let fresh = self.list_watched(self.config.path())?;

        // Union of what was watched and what is there now, so deletions are
        // still visited once.
        let mut union = self.files.clone();
        for (name, path) in &fresh {
            union.entry(name.clone()).or_insert_with(|| path.clone());
        }

        let mut changes = 0;
        for (name, path) in union {
            if self.fs.is_directory(&path) {
                continue;
            }
            changes += usize::from(self.detect(&name, &path)?);
        }

        self.files = fresh;
        Ok(changes)
    }

    /// Compare one path against the baseline and fire at most one event.
    fn detect(&mut self, name: &str, path: &str) -> Result<bool> {
        if !self.config.accepts(path) {
            return Ok(false);
        }

        let canonical = self.fs.canonical_path(path);
        let current = if self.fs.exists(path) {
            match self.fs.last_modified(path) {
                Ok(mtime) => Some(mtime),
                // Removed between the existence probe and the stat.
                Err(e) if e.is_not_found() => None,
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let kind = if let Some(current) = current {
            match self.mtimes.get(&canonical) {
                Some(&cached) if current > cached => WatchEventKind::Modified,
                Some(_) => return Ok(false),
                None => {
                    self.files.insert(name.to_string(), path.to_string());
                    self.mtimes.insert(canonical.clone(), current);
                    WatchEventKind::Created
                }
            }
        } else if self.mtimes.remove(&canonical).is_some() {
            if self.mode == Some(WatchMode::Directory) {
                self.files.remove(name);
            }
            WatchEventKind::Deleted
        } else {
            return Ok(false);
        };

        let event = WatchEvent::new(kind, canonical);
        log::debug!("{event}");
        dispatch(self.listener.as_mut(), &event);
        Ok(true)
    }

    /// Refresh modification times for every cached path that exists and is
    /// not a directory.
    fn rebaseline(&mut self) -> Result<()> {
        for path in self.files.values() {
            if !self.config.accepts(path) || !self.fs.exists(path) || self.fs.is_directory(path) {
                continue;
            }
            match self.fs.last_modified(path) {
                Ok(mtime) => {
                    self.mtimes.insert(self.fs.canonical_path(path), mtime);
                }
                // Removed between the existence probe and the stat.
                Err(e) if e.is_not_found() => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    /// List the watched directory, descending into subdirectories when
    /// recursive. Names of nested entries are relative to the watched path.
    /// Linked directories are listed but never entered.
    fn list_watched(&self, dir: &str) -> Result<Listing> {
        let mut listing = Listing::new();
        let mut pending = vec![(String::new(), dir.to_string(), 0usize)];

        while let Some((prefix, current, depth)) = pending.pop() {
            for (name, path) in self.fs.list_directory(&current)? {
                let name = if prefix.is_empty() {
                    name
                } else {
                    format!("{prefix}/{name}")
                };
                let path = clean_path(&path);
                if self.config.recursive()
                    && depth < MAX_LISTING_DEPTH
                    && self.fs.is_directory(&path)
                    && !self.fs.is_symlink(&path)
                {
                    pending.push((name.clone(), path.clone(), depth + 1));
                }
                listing.insert(name, path);
            }
        }

        Ok(listing)
    }

    fn reset(&mut self) {
        self.files.clear();
        self.mtimes.clear();
        self.mode = None;
        self.state = WatcherState::Unbuilt;
    }

    fn ensure_built(&self) -> Result<()> {
        if self.state == WatcherState::Unbuilt {
            return Err(Error::WatcherNotBuilt {
                path: self.config.path().to_string(),
            });
        }
        Ok(())
    }
}
