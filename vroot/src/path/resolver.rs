//! Conversion between user, internal, external and filesystem paths.
//!
//! This module provides the `PathResolver` type, which owns the root, the
//! working directory, the temporary directory and the alias table of one
//! virtual path space.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::path::alias::AliasTable;
use crate::path::canonicalize::verify_root;
use crate::path::clean::{clean_path, is_remote, make_path, strip_segment_prefix};
use crate::path::normalize::{normalize, path_to_string};

/// Resolves paths within a rooted virtual path space.
///
/// Every instance owns its own alias table; nothing is shared between
/// resolvers.
///
/// # Examples
///
/// ```no_run
/// use vroot::PathResolver;
///
/// let mut resolver = PathResolver::new("/srv/site").unwrap();
/// resolver.add_alias("pub", "storage/public");
///
/// assert_eq!(resolver.to_internal_path("pub/x.png"), "/srv/site/storage/public/x.png");
/// assert_eq!(resolver.to_external_path("/srv/site/storage/public/x.png"), "pub/x.png");
/// assert_eq!(resolver.to_filesystem_path("/srv/site/storage/public/x.png"), "storage/public/x.png");
/// ```
#[derive(Debug, Clone)]
pub struct PathResolver {
    /// Root as configured, cleaned and absolute.
    root: String,
    /// Root with symlinks resolved.
    resolved_root: String,
    /// Root-relative working directory, always absolute within the root.
    working_dir: String,
    /// Scratch directory handed to collaborators.
    temp_dir: String,
    aliases: AliasTable,
}

impl PathResolver {
    /// Create a resolver rooted at `root`.
    ///
    /// The root is tilde-expanded and made absolute. The working directory
    /// starts at `/` and the temporary directory at the OS default.
    ///
    /// # Errors
    ///
    /// Returns `RootNotFound` if the root does not exist, `RootNotDirectory`
    /// if it is not a directory, and `InvalidPath` if it is not valid UTF-8.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let normalized = normalize(root.as_ref())?;
        let real = verify_root(&normalized)?;

        let root = clean_path(&path_to_string(&normalized)?);
        let resolved_root = clean_path(&path_to_string(&real)?);
        let temp_dir = clean_path(&path_to_string(&std::env::temp_dir())?);

        log::debug!("path resolver rooted at {root} (resolved {resolved_root})");

        Ok(Self {
            root,
            resolved_root,
            working_dir: "/".to_string(),
            temp_dir,
            aliases: AliasTable::new(),
        })
    }

    /// Create a resolver from a loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no root is configured, plus any error
    /// from [`PathResolver::new`] or temp directory normalization.
    pub fn from_config(config: &Config) -> Result<Self> {
        let root = config.root.as_ref().ok_or_else(|| Error::Validation {
            field: "root".into(),
            message: "a root directory must be configured".into(),
        })?;

        let mut resolver = Self::new(root)?;

        if let Some(ref working_dir) = config.working_dir {
            resolver.set_working_dir(working_dir);
        }
        if let Some(ref temp_dir) = config.temp_dir {
            resolver = resolver.with_temp_dir(temp_dir)?;
        }
        for alias in config.aliases.iter().flatten() {
            resolver.add_alias(&alias.key, &alias.target);
        }

        Ok(resolver)
    }

    /// Set the working directory, builder style.
    #[must_use]
    pub fn with_working_dir(mut self, dir: &str) -> Self {
        self.set_working_dir(dir);
        self
    }

    /// Set the temporary directory, builder style.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be normalized.
    pub fn with_temp_dir(mut self, dir: impl AsRef<Path>) -> Result<Self> {
        self.temp_dir = clean_path(&path_to_string(&normalize(dir.as_ref())?)?);
        Ok(self)
    }

    /// Register an alias, builder style.
    #[must_use]
    pub fn with_alias(mut self, key: &str, target: &str) -> Self {
        self.add_alias(key, target);
        self
    }

    /// Register an alias. Registering an existing key replaces its target.
    pub fn add_alias(&mut self, key: &str, target: &str) {
        self.aliases.insert(key, target);
    }

    /// Change the working directory.
    ///
    /// Absolute paths are taken relative to the root; anything else is
    /// resolved against the current working directory. The result never
    /// climbs above the root.
    pub fn set_working_dir(&mut self, dir: &str) {
        let joined = if dir.starts_with('/') {
            dir.to_string()
        } else {
            make_path(&[self.working_dir.as_str(), dir])
        };
        self.working_dir = clean_path(&make_path(&["/", joined.as_str()]));
    }

    /// The configured root.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// The root with symlinks resolved.
    #[must_use]
    pub fn resolved_root(&self) -> &str {
        &self.resolved_root
    }

    /// The root-relative working directory.
    #[must_use]
    pub fn working_dir(&self) -> &str {
        &self.working_dir
    }

    /// The temporary directory.
    #[must_use]
    pub fn temp_dir(&self) -> &str {
        &self.temp_dir
    }

    /// Build a path inside the temporary directory.
    #[must_use]
    pub fn temp_path(&self, name: &str) -> String {
        clean_path(&make_path(&[self.temp_dir.as_str(), name]))
    }

    /// The alias table, in registration order.
    #[must_use]
    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Whether an internal path lies inside the root.
    #[must_use]
    pub fn is_within_root(&self, path: &str) -> bool {
        !is_remote(path) && self.strip_root(&clean_path(path)).is_some()
    }

    /// Convert a user path into an internal path.
    ///
    /// 1. Remote paths are returned unchanged.
    /// 2. A leading root (configured or resolved) is stripped.
    /// 3. Leading `./` or `../` segments resolve against the working directory.
    /// 4. Aliases are expanded.
    /// 5. The root is prepended; `..` cannot climb above it.
    /// 6. The result is cleaned.
    #[must_use]
    pub fn to_internal_path(&self, user_path: &str) -> String {
        if is_remote(user_path) {
            return user_path.to_string();
        }

        let stripped = self.strip_root(user_path).unwrap_or(user_path);
        let located = if is_dot_relative(stripped) {
            make_path(&[self.working_dir.as_str(), stripped])
        } else {
            stripped.to_string()
        };

        let expanded = self.aliases.expand(&located);
        let relative = clean_path(&make_path(&["/", expanded.as_str()]));
        clean_path(&make_path(&[self.root.as_str(), relative.as_str()]))
    }

    /// Convert an internal path into an external path.
    ///
    /// The root is stripped and alias targets are reduced back to their keys.
    /// A path that went through an alias is expressed relative to the alias
    /// key (`pub/x.png`); any other path keeps its leading separator
    /// (`/a/b`). Paths outside the root are returned unchanged.
    #[must_use]
    pub fn to_external_path(&self, internal_path: &str) -> String {
        if is_remote(internal_path) {
            return internal_path.to_string();
        }

        let cleaned = clean_path(internal_path);
        let Some(stripped) = self.strip_root(&cleaned) else {
            return internal_path.to_string();
        };

        self.aliases
            .reduce(stripped)
            .unwrap_or_else(|| stripped.to_string())
    }

    /// Convert an internal path into its filesystem-canonical form.
    ///
    /// The root is stripped, aliases are expanded and the leading separator is
    /// removed, giving an identifier that does not depend on where the root is
    /// mounted. The root itself maps to `.`.
    #[must_use]
    pub fn to_filesystem_path(&self, internal_path: &str) -> String {
        if is_remote(internal_path) {
            return internal_path.to_string();
        }

        let cleaned = clean_path(internal_path);
        let stripped = self.strip_root(&cleaned).unwrap_or(&cleaned);
        let expanded = self.aliases.expand(stripped);
        let canonical = clean_path(&make_path(&["/", expanded.as_str()]));

        match canonical.trim_start_matches('/') {
            "" => ".".to_string(),
            rest => rest.to_string(),
        }
    }

    /// Convert a user path into a host `PathBuf` for native calls.
    #[must_use]
    pub fn to_native_path(&self, user_path: &str) -> PathBuf {
        PathBuf::from(self.to_internal_path(user_path))
    }

    fn strip_root<'a>(&self, path: &'a str) -> Option<&'a str> {
        strip_segment_prefix(path, &self.root)
            .or_else(|| strip_segment_prefix(path, &self.resolved_root))
    }
}

/// Whether a path starts with `.` or `..` segments relative to the working
/// directory.
fn is_dot_relative(path: &str) -> bool {
    let first = path.split(['/', '\\']).next().unwrap_or_default();
    matches!(first, "." | "..")
}
