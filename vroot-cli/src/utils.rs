//! Utility functions for CLI operations.
//!
//! This module provides common utility functions used across CLI commands,
//! including configuration loading, resolver construction and path display.

use crate::error::CliError;
use std::env;
use std::path::{Path, PathBuf};
use vroot::{Config, ConfigBuilder, PathResolver};

/// Global CLI options shared across all commands.
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Suppress non-essential output.
    pub quiet: bool,

    /// Override the configured root directory.
    pub root: Option<PathBuf>,

    /// Explicit configuration file.
    pub config: Option<PathBuf>,
}

/// Load hierarchical configuration.
///
/// Configuration is merged from multiple sources with precedence:
/// 1. Global options (highest priority)
/// 2. Environment variables
/// 3. Configuration files (`--config`, or discovered `vroot.yaml` files)
/// 4. Built-in defaults (lowest priority)
pub fn load_configuration(global: &GlobalOptions) -> Result<Config, CliError> {
    let mut builder = ConfigBuilder::new();

    if let Some(ref file) = global.config {
        if !file.exists() {
            return Err(CliError::InvalidArguments(format!(
                "Configuration file not found: {}",
                file.display()
            )));
        }
        builder = builder.with_config_file(file);
    }

    if let Some(ref root) = global.root {
        builder = builder.with_config(Config {
            root: Some(root.clone()),
            ..Default::default()
        });
    }

    builder.build().map_err(|e| CliError::Config(e.to_string()))
}

/// Load the configuration and build the path resolver for this invocation.
pub fn build_resolver(global: &GlobalOptions) -> Result<PathResolver, CliError> {
    resolver_for(&load_configuration(global)?)
}

/// Build a path resolver from an already loaded configuration.
///
/// Without a configured root the current directory is used.
pub fn resolver_for(config: &Config) -> Result<PathResolver, CliError> {
    let resolver = match config.root {
        Some(_) => PathResolver::from_config(config)?,
        None => PathResolver::from_config(&Config {
            root: Some(env::current_dir()?),
            ..config.clone()
        })?,
    };
    log::debug!(
        "Resolving against {} (working directory {})",
        shorten_path(Path::new(resolver.root())),
        resolver.working_dir()
    );
    Ok(resolver)
}

/// Shorten a path for display.
///
/// If the path is within the home directory, show it as ~/...
/// Otherwise, show the full path.
pub fn shorten_path(path: &Path) -> String {
    if let Some(home) = home::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return format!("~/{}", relative.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_shorten_path_outside_home() {
        let path = PathBuf::from("/usr/local/bin");
        assert_eq!(shorten_path(&path), "/usr/local/bin");
    }

    #[test]
    fn test_missing_config_file_is_invalid_argument() {
        let global = GlobalOptions {
            config: Some(PathBuf::from("/definitely/not/here/vroot.yaml")),
            ..Default::default()
        };
        let err = load_configuration(&global).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_root_option_overrides_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("site.yaml");
        std::fs::write(&file, "root: /srv/from-file\nworking_dir: /docs\n").unwrap();

        let global = GlobalOptions {
            root: Some(dir.path().to_path_buf()),
            config: Some(file),
            ..Default::default()
        };
        let resolver = build_resolver(&global).unwrap();

        assert_eq!(resolver.working_dir(), "/docs");
        assert_eq!(
            resolver.to_internal_path("./a.txt"),
            format!("{}/docs/a.txt", resolver.root())
        );
    }
}
