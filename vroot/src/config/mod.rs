//! Configuration system for vroot.
//!
//! This module provides hierarchical configuration with support for:
//! - YAML configuration files (user config and project files)
//! - Environment variable overrides
//! - Programmatic configuration via builder pattern
//! - Validation of paths, aliases and watch settings
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`VROOT_*`)
//! 3. Private project config (`vroot.local.yaml`)
//! 4. Project config (`vroot.yaml`)
//! 5. User config (`~/.vroot/config.yaml`)
//!
//! # Examples
//!
//! Loading from a specific directory:
//!
//! ```no_run
//! use vroot::config::ConfigBuilder;
//! use vroot::PathResolver;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_working_dir(Path::new("/path/to/project"))
//!     .build()
//!     .unwrap();
//! let resolver = PathResolver::from_config(&config).unwrap();
//! ```
//!
//! Programmatic configuration:
//!
//! ```
//! use vroot::config::{Config, ConfigBuilder, WatchSettings};
//!
//! let custom = Config {
//!     watch: Some(WatchSettings {
//!         recursive: Some(true),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let config = ConfigBuilder::new()
//!     .skip_files()
//!     .skip_env()
//!     .with_config(custom)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.watch.unwrap().recursive, Some(true));
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{default_data_dir, ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, WatchSettings};
pub use validator::ConfigValidator;
