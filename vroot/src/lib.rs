#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # vroot
//!
//! Rooted virtual path spaces and polling file watching.
//!
//! A [`PathResolver`] confines user-supplied paths to a root directory,
//! applying a working directory for relative paths and an ordered table of
//! aliases that map public prefixes to storage prefixes. A [`Watcher`]
//! polls a file or directory through a [`FileSystem`](fs::FileSystem)
//! collaborator and reports creations, modifications and deletions to a
//! [`WatchListener`].
//!
//! ## Core Types
//!
//! - [`PathResolver`]: user, internal, external and filesystem path forms
//! - [`Watcher`], [`WatchConfig`] and [`WatchListener`]: change detection
//! - [`Config`] and [`ConfigBuilder`]: layered YAML/environment configuration
//! - [`Error`] and [`Result`]: Error handling types
//! - [`Logger`] and [`LogLevel`]: Logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use vroot::{clean_path, PathResolver};
//!
//! assert_eq!(clean_path("/a/./b/../c/"), "/a/c");
//!
//! let dir = tempfile::tempdir().unwrap();
//! let resolver = PathResolver::new(dir.path())
//!     .unwrap()
//!     .with_alias("pub", "storage/public");
//!
//! let internal = resolver.to_internal_path("pub/x.png");
//! assert_eq!(internal, format!("{}/storage/public/x.png", resolver.root()));
//! assert_eq!(resolver.to_external_path(&internal), "pub/x.png");
//! ```

pub mod config;
pub mod error;
pub mod fs;
pub mod logging;
pub mod output;
pub mod path;
pub mod watch;

pub use config::{Config, ConfigBuilder, OutputFormat};
pub use error::{Error, Result};
pub use logging::{init_logger, LogLevel, Logger};
pub use path::{clean_path, is_remote, make_path, Alias, AliasTable, PathResolver};
pub use watch::{
    StopHandle, WatchConfig, WatchEvent, WatchEventKind, WatchListener, WatchMode, Watcher,
    WatcherState,
};
