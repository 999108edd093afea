//! Configuration schema definitions.
//!
//! Every field is optional so that partial files from several sources can be
//! merged; defaults are applied by the consumers.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::path::Alias;

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use vroot::config::Config;
///
/// let config: Config = serde_yaml::from_str(
///     "root: /srv/site\naliases:\n  - key: pub\n    target: storage/public\n",
/// )
/// .unwrap();
/// assert_eq!(config.aliases.unwrap()[0].target, "storage/public");
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Root directory of the virtual path space.
    pub root: Option<PathBuf>,

    /// Working directory used for relative user paths, relative to the root.
    pub working_dir: Option<String>,

    /// Scratch directory for temporary files.
    pub temp_dir: Option<PathBuf>,

    /// Ordered alias list.
    pub aliases: Option<Vec<Alias>>,

    /// Watcher settings.
    pub watch: Option<WatchSettings>,

    /// Output format for event streams.
    pub output_format: Option<OutputFormat>,
}

/// Watcher settings as written in configuration files.
///
/// # Examples
///
/// ```
/// use vroot::config::WatchSettings;
///
/// let settings: WatchSettings = serde_yaml::from_str(
///     "path: content\nrecursive: true\ninclude: ['\\.md$']\npoll_interval_us: 500000\n",
/// )
/// .unwrap();
/// assert_eq!(settings.recursive, Some(true));
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WatchSettings {
    /// User path to watch; the root when absent.
    pub path: Option<String>,

    /// List directories recursively.
    pub recursive: Option<bool>,

    /// Include regular expressions.
    pub include: Option<Vec<String>>,

    /// Exclude regular expressions, added to the defaults.
    pub exclude: Option<Vec<String>>,

    /// Drop the built-in exclude patterns.
    pub replace_default_excludes: Option<bool>,

    /// Time between ticks in microseconds.
    pub poll_interval_us: Option<u64>,
}

/// Output format for event streams.
///
/// # Examples
///
/// ```
/// use vroot::config::OutputFormat;
///
/// assert_eq!(OutputFormat::Json.to_string(), "json");
/// ```
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `kind path` line per event.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("Invalid output format: {s} (expected text or json)")),
        }
    }
}
