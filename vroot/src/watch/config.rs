//! Watch configuration: target path, recursion, patterns and interval.

use std::time::Duration;

use regex::Regex;

use crate::config::WatchSettings;
use crate::error::{Error, Result};
use crate::path::{clean_path, PathResolver};

/// Version-control and dependency trees excluded unless replaced.
pub const DEFAULT_EXCLUDE_PATTERNS: &[&str] = &[
    r"(^|/)\.git(/|$)",
    r"(^|/)\.svn(/|$)",
    r"(^|/)\.hg(/|$)",
    r"(^|/)node_modules(/|$)",
    r"(^|/)vendor(/|$)",
];

/// Default time between ticks.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Compile regular expressions, reporting the first invalid one.
///
/// # Errors
///
/// Returns `InvalidPattern` for the first pattern that fails to compile.
pub fn compile_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| {
            Regex::new(p.as_ref()).map_err(|source| Error::InvalidPattern {
                pattern: p.as_ref().to_string(),
                source,
            })
        })
        .collect()
}

/// Validated watch configuration.
///
/// Construct through [`WatchConfig::builder`].
#[derive(Debug, Clone)]
pub struct WatchConfig {
    path: String,
    recursive: bool,
    include: Vec<Regex>,
    exclude: Vec<Regex>,
    interval: Duration,
}

impl WatchConfig {
    /// Start building a configuration for `path` (an internal path).
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use vroot::watch::WatchConfig;
    ///
    /// let config = WatchConfig::builder("/srv/site/content")
    ///     .recursive(true)
    ///     .include(r"\.md$")
    ///     .interval(Duration::from_millis(250))
    ///     .build()
    ///     .unwrap();
    ///
    /// assert!(config.accepts("/srv/site/content/a.md"));
    /// assert!(!config.accepts("/srv/site/content/a.png"));
    /// assert!(!config.accepts("/srv/site/content/.git/a.md"));
    /// ```
    #[must_use]
    pub fn builder(path: impl Into<String>) -> WatchConfigBuilder {
        WatchConfigBuilder::new(path)
    }

    /// Build a configuration from file settings.
    ///
    /// The settings' watch path is a user path and is converted to an internal
    /// path through `resolver`; without a path the whole root is watched.
    ///
    /// # Errors
    ///
    /// Returns an error if a pattern does not compile or the interval is zero.
    pub fn from_settings(settings: &WatchSettings, resolver: &PathResolver) -> Result<Self> {
        let user_path = settings.path.as_deref().unwrap_or("/");
        let mut builder = Self::builder(resolver.to_internal_path(user_path))
            .recursive(settings.recursive.unwrap_or(false));

        if settings.replace_default_excludes.unwrap_or(false) {
            builder = builder.clear_excludes();
        }
        for pattern in settings.include.iter().flatten() {
            builder = builder.include(pattern);
        }
        for pattern in settings.exclude.iter().flatten() {
            builder = builder.exclude(pattern);
        }
        if let Some(us) = settings.poll_interval_us {
            builder = builder.interval(Duration::from_micros(us));
        }

        builder.build()
    }

    /// The watched path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Whether directories are listed recursively.
    #[must_use]
    pub fn recursive(&self) -> bool {
        self.recursive
    }

    /// Include patterns; empty means everything is included.
    #[must_use]
    pub fn include_patterns(&self) -> &[Regex] {
        &self.include
    }

    /// Exclude patterns.
    #[must_use]
    pub fn exclude_patterns(&self) -> &[Regex] {
        &self.exclude
    }

    /// Time between ticks.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whether `path` passes the pattern filters.
    ///
    /// Exclusion wins over inclusion. With no include patterns every
    /// non-excluded path passes.
    #[must_use]
    pub fn accepts(&self, path: &str) -> bool {
        if self.exclude.iter().any(|re| re.is_match(path)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|re| re.is_match(path))
    }
}

/// Builder for [`WatchConfig`].
///
/// Patterns are collected as strings and compiled by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct WatchConfigBuilder {
    path: String,
    recursive: bool,
    include: Vec<String>,
    exclude: Vec<String>,
    interval: Duration,
}

impl WatchConfigBuilder {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            recursive: false,
            include: Vec::new(),
            exclude: DEFAULT_EXCLUDE_PATTERNS
                .iter()
                .map(ToString::to_string)
                .collect(),
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// List directories recursively.
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Add an include pattern.
    #[must_use]
    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.include.push(pattern.into());
        self
    }

    /// Add an exclude pattern to the current list.
    #[must_use]
    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.exclude.push(pattern.into());
        self
    }

    /// Drop every exclude pattern collected so far, including the defaults.
    #[must_use]
    pub fn clear_excludes(mut self) -> Self {
        self.exclude.clear();
        self
    }

    /// Replace the exclude list wholesale.
    #[must_use]
    pub fn excludes<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Set the time between ticks.
    #[must_use]
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Validate and compile the configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPattern` if a pattern does not compile and a validation
    /// error if the interval is zero.
    pub fn build(self) -> Result<WatchConfig> {
        if self.interval.is_zero() {
            return Err(Error::Validation {
                field: "watch.poll_interval_us".into(),
                message: "Poll interval must be greater than 0".into(),
            });
        }

        Ok(WatchConfig {
            path: clean_path(&self.path),
            recursive: self.recursive,
            include: compile_patterns(&self.include)?,
            exclude: compile_patterns(&self.exclude)?,
            interval: self.interval,
        })
    }
}
