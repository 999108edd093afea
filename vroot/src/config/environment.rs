//! Environment variable handling for configuration overrides.
//!
//! This module provides support for VROOT_* environment variables that
//! override configuration file values.

use crate::config::schema::Config;
use crate::error::{Error, Result};
use crate::path::Alias;
use std::env;
use std::path::PathBuf;

/// Root directory override.
pub const ENV_ROOT: &str = "VROOT_ROOT";
/// Working directory override.
pub const ENV_WORKING_DIR: &str = "VROOT_WORKING_DIR";
/// Temporary directory override.
pub const ENV_TEMP_DIR: &str = "VROOT_TEMP_DIR";
/// Extra aliases as `key=target,key=target`.
pub const ENV_ALIASES: &str = "VROOT_ALIASES";
/// Watch path override.
pub const ENV_WATCH_PATH: &str = "VROOT_WATCH_PATH";
/// Recursive watching flag.
pub const ENV_WATCH_RECURSIVE: &str = "VROOT_WATCH_RECURSIVE";
/// Poll interval in microseconds.
pub const ENV_POLL_INTERVAL_US: &str = "VROOT_POLL_INTERVAL_US";

/// Handles environment variable overrides for configuration.
///
/// # Examples
///
/// ```no_run
/// use vroot::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply environment variable overrides to config.
    ///
    /// Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if a value cannot be parsed (invalid boolean,
    /// non-numeric interval, malformed alias list).
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Some(root) = Self::var(ENV_ROOT) {
            config.root = Some(PathBuf::from(root));
        }

        if let Some(working_dir) = Self::var(ENV_WORKING_DIR) {
            config.working_dir = Some(working_dir);
        }

        if let Some(temp_dir) = Self::var(ENV_TEMP_DIR) {
            config.temp_dir = Some(PathBuf::from(temp_dir));
        }

        if let Some(aliases) = Self::var(ENV_ALIASES) {
            let parsed = Self::parse_aliases(&aliases)?;
            config.aliases.get_or_insert_with(Vec::new).extend(parsed);
        }

        Self::apply_watch_overrides(config)
    }

    fn apply_watch_overrides(config: &mut Config) -> Result<()> {
        let mut watch = config.watch.clone().unwrap_or_default();
        let mut modified = false;

        if let Some(path) = Self::var(ENV_WATCH_PATH) {
            watch.path = Some(path);
            modified = true;
        }

        if let Some(val) = Self::var(ENV_WATCH_RECURSIVE) {
            watch.recursive = Some(Self::parse_bool(ENV_WATCH_RECURSIVE, &val)?);
            modified = true;
        }

        if let Some(val) = Self::var(ENV_POLL_INTERVAL_US) {
            watch.poll_interval_us = Some(val.trim().parse().map_err(|_| Error::Validation {
                field: ENV_POLL_INTERVAL_US.into(),
                message: "Must be a positive integer".into(),
            })?);
            modified = true;
        }

        if modified {
            config.watch = Some(watch);
        }

        Ok(())
    }

    fn var(name: &str) -> Option<String> {
        env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    /// Parse a boolean value from a string.
    ///
    /// Accepts: true/1/yes/on for true, false/0/no/off for false (case-insensitive).
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!(
                    "Invalid boolean value: '{s}' (expected true/false/1/0/yes/no/on/off)"
                ),
            }),
        }
    }

    /// Parse aliases from a comma-separated `key=target` list.
    fn parse_aliases(s: &str) -> Result<Vec<Alias>> {
        let mut aliases = Vec::new();

        for part in s.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, target) = part.split_once('=').ok_or_else(|| Error::Validation {
                field: ENV_ALIASES.into(),
                message: format!("Expected key=target, got: {part}"),
            })?;
            aliases.push(Alias::new(key.trim(), target.trim()));
        }

        Ok(aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const ALL_VARS: &[&str] = &[
        ENV_ROOT,
        ENV_WORKING_DIR,
        ENV_TEMP_DIR,
        ENV_ALIASES,
        ENV_WATCH_PATH,
        ENV_WATCH_RECURSIVE,
        ENV_POLL_INTERVAL_US,
    ];

    fn clear_env() {
        for var in ALL_VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_parse_bool_variants() {
        for s in ["true", "TRUE", "1", "yes", "On"] {
            assert!(EnvironmentConfig::parse_bool("test", s).unwrap());
        }
        for s in ["false", "FALSE", "0", "no", "OFF"] {
            assert!(!EnvironmentConfig::parse_bool("test", s).unwrap());
        }
        assert!(EnvironmentConfig::parse_bool("test", "maybe").is_err());
    }

    #[test]
    fn test_parse_aliases() {
        let aliases = EnvironmentConfig::parse_aliases(" pub=storage/public , img=/pub/images/ ,")
            .unwrap();
        assert_eq!(
            aliases,
            vec![
                Alias::new("pub", "storage/public"),
                Alias::new("img", "pub/images"),
            ]
        );
        assert!(EnvironmentConfig::parse_aliases("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_aliases_rejects_missing_separator() {
        let err = EnvironmentConfig::parse_aliases("pub").unwrap_err();
        assert!(matches!(err, Error::Validation { ref field, .. } if field == ENV_ALIASES));
    }

    #[test]
    #[serial]
    fn test_apply_overrides_no_env_vars() {
        clear_env();
        let mut config = Config::default();
        EnvironmentConfig::apply_overrides(&mut config).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_sets_fields() {
        clear_env();
        env::set_var(ENV_ROOT, "/srv/site");
        env::set_var(ENV_WORKING_DIR, "/docs");
        env::set_var(ENV_ALIASES, "img=pub/images");
        env::set_var(ENV_WATCH_RECURSIVE, "yes");
        env::set_var(ENV_POLL_INTERVAL_US, "250000");

        let mut config = Config {
            aliases: Some(vec![Alias::new("pub", "storage/public")]),
            ..Default::default()
        };
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_env();
        result.unwrap();

        assert_eq!(config.root, Some(PathBuf::from("/srv/site")));
        assert_eq!(config.working_dir.as_deref(), Some("/docs"));
        assert_eq!(config.aliases.as_ref().map(Vec::len), Some(2));
        let watch = config.watch.unwrap();
        assert_eq!(watch.recursive, Some(true));
        assert_eq!(watch.poll_interval_us, Some(250_000));
        assert!(watch.path.is_none());
    }

    #[test]
    #[serial]
    fn test_apply_overrides_invalid_interval() {
        clear_env();
        env::set_var(ENV_POLL_INTERVAL_US, "soon");
        let result = EnvironmentConfig::apply_overrides(&mut Config::default());
        clear_env();
        assert!(matches!(result, Err(Error::Validation { .. })));
    }

    #[test]
    #[serial]
    fn test_empty_values_ignored() {
        clear_env();
        env::set_var(ENV_ROOT, "  ");
        let mut config = Config::default();
        let result = EnvironmentConfig::apply_overrides(&mut config);
        clear_env();
        result.unwrap();
        assert!(config.root.is_none());
    }
}
