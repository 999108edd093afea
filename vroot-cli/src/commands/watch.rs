//! Command to poll a file or directory and print changes.

use crate::error::CliError;
use crate::utils::{load_configuration, resolver_for, shorten_path, GlobalOptions};
use clap::Args;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use vroot::config::{OutputFormat, WatchSettings};
use vroot::fs::LocalFileSystem;
use vroot::output::OutputFormatter;
use vroot::{StopHandle, WatchConfig, WatchEvent, WatchListener, Watcher};

/// Poll a file or directory and print one line per change.
#[derive(Args)]
pub struct WatchCommand {
    /// User path to watch (defaults to the configured watch path, then the root)
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Watch subdirectories too
    #[arg(short, long)]
    pub recursive: bool,

    /// Only report paths matching this regular expression (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub include: Vec<String>,

    /// Ignore paths matching this regular expression (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Drop the built-in excludes (.git, .svn, .hg, node_modules, vendor)
    #[arg(long)]
    pub no_default_excludes: bool,

    /// Time between polls in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Output format (text or json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Prefix each event with the time it was detected
    #[arg(long)]
    pub timestamps: bool,

    /// Exit after printing this many events
    #[arg(long, value_name = "N")]
    pub max_events: Option<usize>,
}

impl WatchCommand {
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        if self.interval_ms == Some(0) {
            return Err(CliError::InvalidArguments(
                "--interval-ms must be greater than zero".to_string(),
            ));
        }
        if self.max_events == Some(0) {
            return Err(CliError::InvalidArguments(
                "--max-events must be greater than zero".to_string(),
            ));
        }

        let config = load_configuration(global)?;
        let resolver = resolver_for(&config)?;

        let settings = self.merge_settings(config.watch.unwrap_or_default());
        let watch_config = WatchConfig::from_settings(&settings, &resolver)?;
        let format = self.format.or(config.output_format).unwrap_or_default();

        if !global.quiet {
            eprintln!(
                "Watching {} ({})",
                shorten_path(Path::new(watch_config.path())),
                if watch_config.recursive() {
                    "recursive"
                } else {
                    "top level"
                }
            );
        }

        let stop = Arc::new(OnceLock::new());
        let printer = EventPrinter {
            formatter: format.create_formatter(self.timestamps),
            remaining: self.max_events,
            stop: Arc::clone(&stop),
        };

        let mut watcher = Watcher::new(watch_config, LocalFileSystem::rooted(resolver), printer);
        watcher.build()?;
        // The slot is fresh, so the first set always succeeds.
        let _ = stop.set(watcher.stop_handle()?);
        watcher.start()?;
        Ok(())
    }

    /// Layer command-line flags over the configured watch settings.
    fn merge_settings(&self, mut settings: WatchSettings) -> WatchSettings {
        if let Some(ref path) = self.path {
            settings.path = Some(path.clone());
        }
        if self.recursive {
            settings.recursive = Some(true);
        }
        if !self.include.is_empty() {
            settings
                .include
                .get_or_insert_with(Vec::new)
                .extend(self.include.iter().cloned());
        }
        if !self.exclude.is_empty() {
            settings
                .exclude
                .get_or_insert_with(Vec::new)
                .extend(self.exclude.iter().cloned());
        }
        if self.no_default_excludes {
            settings.replace_default_excludes = Some(true);
        }
        if let Some(ms) = self.interval_ms {
            settings.poll_interval_us = Some(ms.saturating_mul(1000));
        }
        settings
    }
}

/// Listener that writes formatted events to stdout.
struct EventPrinter {
    formatter: Box<dyn OutputFormatter>,
    remaining: Option<usize>,
    stop: Arc<OnceLock<StopHandle>>,
}

impl EventPrinter {
    fn emit(&mut self, event: &WatchEvent) {
        if self.remaining == Some(0) {
            return;
        }

        let line = match self.formatter.format(event) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Could not format event for {}: {e}", event.path);
                return;
            }
        };

        let mut stdout = io::stdout().lock();
        if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
            // Usually a closed pipe; nobody is listening any more.
            log::debug!("Output closed: {e}");
            self.halt();
            return;
        }

        if let Some(ref mut remaining) = self.remaining {
            *remaining -= 1;
            if *remaining == 0 {
                self.halt();
            }
        }
    }

    fn halt(&self) {
        if let Some(handle) = self.stop.get() {
            handle.stop();
        }
    }
}

impl WatchListener for EventPrinter {
    fn on_created(&mut self, event: &WatchEvent) {
        self.emit(event);
    }

    fn on_modified(&mut self, event: &WatchEvent) {
        self.emit(event);
    }

    fn on_deleted(&mut self, event: &WatchEvent) {
        self.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command() -> WatchCommand {
        WatchCommand {
            path: None,
            recursive: false,
            include: Vec::new(),
            exclude: Vec::new(),
            no_default_excludes: false,
            interval_ms: None,
            format: None,
            timestamps: false,
            max_events: None,
        }
    }

    #[test]
    fn test_flags_layer_over_settings() {
        let cmd = WatchCommand {
            path: Some("content".to_string()),
            recursive: true,
            include: vec![r"\.md$".to_string()],
            interval_ms: Some(250),
            ..command()
        };
        let settings = cmd.merge_settings(WatchSettings {
            path: Some("/".to_string()),
            include: Some(vec![r"\.txt$".to_string()]),
            poll_interval_us: Some(1_000_000),
            ..Default::default()
        });

        assert_eq!(settings.path.as_deref(), Some("content"));
        assert_eq!(settings.recursive, Some(true));
        assert_eq!(
            settings.include,
            Some(vec![r"\.txt$".to_string(), r"\.md$".to_string()])
        );
        assert_eq!(settings.poll_interval_us, Some(250_000));
    }

    #[test]
    fn test_unset_flags_keep_settings() {
        let configured = WatchSettings {
            recursive: Some(true),
            replace_default_excludes: Some(false),
            ..Default::default()
        };
        assert_eq!(command().merge_settings(configured.clone()), configured);
    }

    #[test]
    fn test_printer_counts_down_to_max_events() {
        let stop = Arc::new(OnceLock::new());
        let mut printer = EventPrinter {
            formatter: OutputFormat::Text.create_formatter(false),
            remaining: Some(1),
            stop: Arc::clone(&stop),
        };

        // Without a handle installed the printer still counts down.
        printer.emit(&WatchEvent::new(vroot::WatchEventKind::Created, "a"));
        assert_eq!(printer.remaining, Some(0));
        printer.emit(&WatchEvent::new(vroot::WatchEventKind::Created, "b"));
        assert_eq!(printer.remaining, Some(0));
    }
}
