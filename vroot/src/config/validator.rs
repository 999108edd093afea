//! Configuration validation.

use crate::config::schema::{Config, WatchSettings};
use crate::error::{Error, Result};
use crate::path::{is_remote, Alias};
use crate::watch::compile_patterns;

/// Validates configuration values and their consistency.
///
/// # Examples
///
/// ```
/// use vroot::config::{Config, ConfigValidator};
///
/// let config = Config::default();
/// ConfigValidator::validate(&config).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a complete configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error for the first invalid field, or
    /// `InvalidPattern` for a watch pattern that does not compile.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref root) = config.root {
            if root.as_os_str().is_empty() {
                return Err(Error::Validation {
                    field: "root".into(),
                    message: "Cannot be empty".into(),
                });
            }
        }

        if let Some(ref working_dir) = config.working_dir {
            Self::validate_non_empty("working_dir", working_dir)?;
        }

        if let Some(ref aliases) = config.aliases {
            for (index, alias) in aliases.iter().enumerate() {
                Self::validate_alias(index, alias)?;
            }
        }

        if let Some(ref watch) = config.watch {
            Self::validate_watch(watch)?;
        }

        Ok(())
    }

    fn validate_non_empty(field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot be empty or only whitespace".into(),
            });
        }
        if value.contains('\0') {
            return Err(Error::Validation {
                field: field.into(),
                message: "Cannot contain null bytes".into(),
            });
        }
        Ok(())
    }

    /// Alias keys must be non-empty after trimming separators and must not
    /// be remote locations.
    fn validate_alias(index: usize, alias: &Alias) -> Result<()> {
        let field = format!("aliases[{index}]");
        let trimmed = Alias::new(&alias.key, &alias.target);

        if trimmed.key.trim().is_empty() {
            return Err(Error::Validation {
                field,
                message: "Alias key cannot be empty".into(),
            });
        }

        if is_remote(&alias.key) {
            return Err(Error::Validation {
                field,
                message: format!("Alias key cannot be a remote location: {}", alias.key),
            });
        }

        Ok(())
    }

    fn validate_watch(watch: &WatchSettings) -> Result<()> {
        if let Some(ref path) = watch.path {
            Self::validate_non_empty("watch.path", path)?;
        }

        if watch.poll_interval_us == Some(0) {
            return Err(Error::Validation {
                field: "watch.poll_interval_us".into(),
                message: "Poll interval must be greater than 0".into(),
            });
        }

        compile_patterns(watch.include.as_deref().unwrap_or_default())?;
        compile_patterns(watch.exclude.as_deref().unwrap_or_default())?;

        Ok(())
    }
}
