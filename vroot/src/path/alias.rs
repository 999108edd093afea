//! Ordered alias table with bounded prefix substitution.
//!
//! An alias maps a short public prefix (the key) to a real storage prefix
//! (the target). Keys and targets are stored without leading or trailing
//! separators and matched segment-wise against root-relative paths, so alias
//! `pub` rewrites `pub/x.png` but leaves `public/x.png` alone.
//!
//! Substitution runs in passes. Each pass scans the table in registration
//! order and applies the first matching alias. At most `len()` passes run,
//! which resolves chains (`a -> b`, `b -> c`) while guaranteeing termination
//! on tables that contain cycles.

use serde::{Deserialize, Serialize};

/// A single alias rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    /// Public-facing prefix.
    pub key: String,
    /// Storage prefix the key stands for.
    pub target: String,
}

impl Alias {
    /// Create an alias, trimming separators from both sides.
    ///
    /// # Examples
    ///
    /// ```
    /// use vroot::path::Alias;
    ///
    /// let alias = Alias::new("/pub/", "storage/public/");
    /// assert_eq!(alias.key, "pub");
    /// assert_eq!(alias.target, "storage/public");
    /// ```
    #[must_use]
    pub fn new(key: &str, target: &str) -> Self {
        Self {
            key: trim_separators(key).to_string(),
            target: trim_separators(target).to_string(),
        }
    }
}

/// Which side of each alias to match when rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    /// Replace keys with targets.
    Expand,
    /// Replace targets with keys.
    Reduce,
}

/// Registration-ordered collection of aliases.
///
/// # Examples
///
/// ```
/// use vroot::path::AliasTable;
///
/// let mut table = AliasTable::new();
/// table.insert("pub", "storage/public");
///
/// assert_eq!(table.expand("pub/x.png"), "storage/public/x.png");
/// assert_eq!(table.reduce("storage/public/x.png"), Some("pub/x.png".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<Alias>,
}

impl AliasTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an alias.
    ///
    /// Registering an existing key replaces its target in place, so the last
    /// registration wins while the original scan position is kept.
    pub fn insert(&mut self, key: &str, target: &str) {
        let alias = Alias::new(key, target);
        match self.entries.iter_mut().find(|a| a.key == alias.key) {
            Some(existing) => existing.target = alias.target,
            None => self.entries.push(alias),
        }
    }

    /// Number of registered aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no alias is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate aliases in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Alias> {
        self.entries.iter()
    }

    /// Rewrite alias keys to targets.
    ///
    /// Leading separators on `path` are ignored for matching and are not
    /// reproduced in the result when a substitution happens.
    #[must_use]
    pub fn expand(&self, path: &str) -> String {
        self.rewrite(path, Direction::Expand)
            .unwrap_or_else(|| path.to_string())
    }

    /// Rewrite alias targets back to keys.
    ///
    /// Returns `None` when no alias target prefixes the path.
    #[must_use]
    pub fn reduce(&self, path: &str) -> Option<String> {
        self.rewrite(path, Direction::Reduce)
    }

    fn rewrite(&self, path: &str, direction: Direction) -> Option<String> {
        let mut current = trim_leading(path).to_string();
        let mut changed = false;

        for _ in 0..self.entries.len() {
            match self.substitute_once(&current, direction) {
                Some(next) => {
                    log::trace!("alias pass rewrote {current} -> {next}");
                    current = next;
                    changed = true;
                }
                None => break,
            }
        }

        changed.then_some(current)
    }

    fn substitute_once(&self, path: &str, direction: Direction) -> Option<String> {
        self.entries.iter().find_map(|alias| {
            let (from, to) = match direction {
                Direction::Expand => (&alias.key, &alias.target),
                Direction::Reduce => (&alias.target, &alias.key),
            };
            let rest = strip_alias_prefix(path, from)?;
            Some(match (to.is_empty(), rest.is_empty()) {
                (_, true) => to.clone(),
                (true, false) => rest.to_string(),
                (false, false) => format!("{to}/{rest}"),
            })
        })
    }
}

impl<'a> IntoIterator for &'a AliasTable {
    type Item = &'a Alias;
    type IntoIter = std::slice::Iter<'a, Alias>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<Alias> for AliasTable {
    fn from_iter<I: IntoIterator<Item = Alias>>(iter: I) -> Self {
        let mut table = Self::new();
        for alias in iter {
            table.insert(&alias.key, &alias.target);
        }
        table
    }
}

fn trim_separators(s: &str) -> &str {
    s.trim_matches(|c| c == '/' || c == '\\')
}

fn trim_leading(s: &str) -> &str {
    s.trim_start_matches(|c| c == '/' || c == '\\')
}

/// Returns the part of `path` after `prefix` (without the joining separator)
/// when `prefix` covers whole leading segments of `path`.
fn strip_alias_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    if prefix.is_empty() {
        return None;
    }
    let rest = path.strip_prefix(prefix)?;
    if rest.is_empty() {
        Some(rest)
    } else {
        rest.strip_prefix('/')
    }
}
