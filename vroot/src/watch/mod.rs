//! Polling change detection.
//!
//! A [`Watcher`] watches either a directory (optionally recursively) or a
//! single file through a [`FileSystem`](crate::fs::FileSystem) collaborator,
//! comparing modification times on each tick and reporting
//! [`WatchEvent`]s to a [`WatchListener`].
//!
//! Polling is deliberate: it works the same on local disks, network mounts
//! and the in-memory filesystem, at the cost of latency bounded by the
//! configured interval.

mod config;
mod event;
mod watcher;

pub use config::{
    compile_patterns, WatchConfig, WatchConfigBuilder, DEFAULT_EXCLUDE_PATTERNS,
    DEFAULT_POLL_INTERVAL,
};
pub use event::{WatchEvent, WatchEventKind, WatchListener};
pub use watcher::{StopHandle, WatchMode, Watcher, WatcherState};
