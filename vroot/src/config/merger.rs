//! Configuration merging and precedence handling.
//!
//! Scalars are overwritten by higher-precedence sources. Aliases and the
//! watch pattern lists accumulate across sources.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, WatchSettings};
use crate::path::Alias;

/// Merges configuration sources according to precedence rules.
///
/// # Examples
///
/// ```
/// use vroot::config::{Config, ConfigMerger};
///
/// let low = Config { working_dir: Some("/low".to_string()), ..Default::default() };
/// let high = Config { working_dir: Some("/high".to_string()), ..Default::default() };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.working_dir, Some("/high".to_string()));
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge multiple configuration sources into a final config.
    ///
    /// Sources should be provided in order from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();

        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }

        result
    }

    /// Merge `source` into `target`; `source` wins.
    ///
    /// # Merging Rules
    ///
    /// - Simple fields: source overwrites if Some
    /// - Aliases: accumulated in order; a repeated key takes the later target
    ///   and keeps its original position
    /// - Watch settings: field-by-field, with include/exclude lists accumulated
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.root.is_some() {
            target.root.clone_from(&source.root);
        }

        if source.working_dir.is_some() {
            target.working_dir.clone_from(&source.working_dir);
        }

        if source.temp_dir.is_some() {
            target.temp_dir.clone_from(&source.temp_dir);
        }

        if source.output_format.is_some() {
            target.output_format = source.output_format;
        }

        if let Some(ref source_aliases) = source.aliases {
            let aliases = target.aliases.get_or_insert_with(Vec::new);
            Self::merge_aliases(aliases, source_aliases);
        }

        if let Some(ref source_watch) = source.watch {
            target.watch = Some(match &target.watch {
                Some(target_watch) => Self::merge_watch(target_watch, source_watch),
                None => source_watch.clone(),
            });
        }
    }

    fn merge_aliases(target: &mut Vec<Alias>, source: &[Alias]) {
        for alias in source {
            let key = Alias::new(&alias.key, "").key;
            match target
                .iter_mut()
                .find(|existing| Alias::new(&existing.key, "").key == key)
            {
                Some(existing) => existing.target.clone_from(&alias.target),
                None => target.push(alias.clone()),
            }
        }
    }

    fn merge_watch(target: &WatchSettings, source: &WatchSettings) -> WatchSettings {
        WatchSettings {
            path: source.path.clone().or_else(|| target.path.clone()),
            recursive: source.recursive.or(target.recursive),
            include: accumulate(target.include.as_ref(), source.include.as_ref()),
            exclude: accumulate(target.exclude.as_ref(), source.exclude.as_ref()),
            replace_default_excludes: source
                .replace_default_excludes
                .or(target.replace_default_excludes),
            poll_interval_us: source.poll_interval_us.or(target.poll_interval_us),
        }
    }
}

fn accumulate(target: Option<&Vec<String>>, source: Option<&Vec<String>>) -> Option<Vec<String>> {
    match (target, source) {
        (None, None) => None,
        (Some(list), None) | (None, Some(list)) => Some(list.clone()),
        (Some(low), Some(high)) => {
            let mut merged = low.clone();
            merged.extend(high.iter().filter(|p| !low.contains(p)).cloned());
            Some(merged)
        }
    }
}
