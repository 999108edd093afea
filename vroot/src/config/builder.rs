//! Layered configuration assembly.

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::Config;
use crate::config::validator::ConfigValidator;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Builds a [`Config`] from files, environment and programmatic overrides.
///
/// # Examples
///
/// ```
/// use vroot::config::{Config, ConfigBuilder};
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_config(Config {
///         working_dir: Some("/docs".to_string()),
///         ..Default::default()
///     })
///     .build()
///     .unwrap();
///
/// assert_eq!(config.working_dir.as_deref(), Some("/docs"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    working_dir: Option<PathBuf>,
    data_dir: Option<PathBuf>,
    config_file: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Vec<Config>,
}

impl ConfigBuilder {
    /// Create a builder that reads files from the current directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start project file discovery from `dir` instead of the current
    /// directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &Path) -> Self {
        self.working_dir = Some(dir.to_path_buf());
        self
    }

    /// Load the user config from `dir/config.yaml` instead of `~/.vroot`.
    #[must_use]
    pub fn with_data_dir(mut self, dir: &Path) -> Self {
        self.data_dir = Some(dir.to_path_buf());
        self
    }

    /// Read exactly this file instead of discovering user and project files.
    ///
    /// Environment and programmatic overrides still apply on top.
    #[must_use]
    pub fn with_config_file(mut self, path: &Path) -> Self {
        self.config_file = Some(path.to_path_buf());
        self
    }

    /// Do not read any configuration files.
    #[must_use]
    pub fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Do not apply `VROOT_*` environment overrides.
    #[must_use]
    pub fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merge `config` on top of everything else.
    ///
    /// May be called several times; later calls win.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.overrides.push(config);
        self
    }

    /// Assemble and validate the configuration.
    ///
    /// Precedence, lowest first: user config, `vroot.yaml`,
    /// `vroot.local.yaml`, environment, programmatic overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, an environment
    /// value is malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = if self.skip_files {
            Config::default()
        } else if let Some(ref file) = self.config_file {
            ConfigLoader::load_file(file)?
        } else {
            let working_dir = match self.working_dir {
                Some(dir) => dir,
                None => std::env::current_dir()?,
            };
            ConfigMerger::merge(ConfigLoader::load_all(
                &working_dir,
                self.data_dir.as_deref(),
            )?)
        };

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        for overrides in &self.overrides {
            ConfigMerger::merge_into(&mut config, overrides);
        }

        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::{LOCAL_CONFIG_FILE, PROJECT_CONFIG_FILE};
    use crate::config::schema::WatchSettings;
    use crate::error::Error;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_skip_everything_gives_default() {
        let config = ConfigBuilder::new().skip_files().skip_env().build().unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    #[serial]
    fn test_files_layered_by_precedence() {
        let data_dir = TempDir::new().unwrap();
        let project = TempDir::new().unwrap();
        fs::write(
            data_dir.path().join("config.yaml"),
            "root: /srv/user\nworking_dir: /user\n",
        )
        .unwrap();
        fs::write(
            project.path().join(PROJECT_CONFIG_FILE),
            "working_dir: /project\naliases:\n  - key: pub\n    target: storage/public\n",
        )
        .unwrap();
        fs::write(
            project.path().join(LOCAL_CONFIG_FILE),
            "aliases:\n  - key: img\n    target: pub/images\n",
        )
        .unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .skip_env()
            .build()
            .unwrap();

        assert_eq!(config.root, Some(PathBuf::from("/srv/user")));
        assert_eq!(config.working_dir.as_deref(), Some("/project"));
        assert_eq!(config.aliases.map(|a| a.len()), Some(2));
    }

    #[test]
    fn test_overrides_win() {
        let config = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                working_dir: Some("/a".to_string()),
                ..Default::default()
            })
            .with_config(Config {
                working_dir: Some("/b".to_string()),
                ..Default::default()
            })
            .build()
            .unwrap();
        assert_eq!(config.working_dir.as_deref(), Some("/b"));
    }

    #[test]
    fn test_invalid_result_rejected() {
        let err = ConfigBuilder::new()
            .skip_files()
            .skip_env()
            .with_config(Config {
                watch: Some(WatchSettings {
                    poll_interval_us: Some(0),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    #[serial]
    fn test_explicit_config_file_replaces_discovery() {
        let project = TempDir::new().unwrap();
        let elsewhere = TempDir::new().unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "working_dir: /discovered\n").unwrap();
        let explicit = elsewhere.path().join("custom.yaml");
        fs::write(&explicit, "temp_dir: /tmp/explicit\n").unwrap();

        let config = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_config_file(&explicit)
            .skip_env()
            .build()
            .unwrap();

        assert!(config.working_dir.is_none());
        assert_eq!(config.temp_dir, Some(PathBuf::from("/tmp/explicit")));
    }

    #[test]
    #[serial]
    fn test_env_overrides_files() {
        let project = TempDir::new().unwrap();
        let data_dir = TempDir::new().unwrap();
        fs::write(project.path().join(PROJECT_CONFIG_FILE), "working_dir: /file\n").unwrap();

        std::env::set_var("VROOT_WORKING_DIR", "/env");
        let result = ConfigBuilder::new()
            .with_working_dir(project.path())
            .with_data_dir(data_dir.path())
            .build();
        std::env::remove_var("VROOT_WORKING_DIR");

        assert_eq!(result.unwrap().working_dir.as_deref(), Some("/env"));
    }
}
