//! Output formatting for watch events.
//!
//! Hosts that stream events (the `vroot watch` command among them) pick a
//! formatter from the configured [`OutputFormat`] and write one line per
//! event.

mod formatters;

use crate::config::OutputFormat;
use crate::watch::WatchEvent;
use crate::Result;

pub use formatters::{JsonFormatter, TextFormatter};

/// Trait for rendering a watch event as a single line.
pub trait OutputFormatter: Send + Sync {
    /// Format one event, without a trailing newline.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, event: &WatchEvent) -> Result<String>;
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// `timestamps` prefixes text lines with the detection time; JSON output
    /// carries it as a field.
    ///
    /// # Examples
    ///
    /// ```
    /// use vroot::config::OutputFormat;
    /// use vroot::watch::{WatchEvent, WatchEventKind};
    ///
    /// let formatter = OutputFormat::Text.create_formatter(false);
    /// let event = WatchEvent::new(WatchEventKind::Deleted, "a/b.txt");
    /// assert_eq!(formatter.format(&event).unwrap(), "deleted a/b.txt");
    /// ```
    #[must_use]
    pub fn create_formatter(&self, timestamps: bool) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(timestamps)),
            Self::Json => Box::new(JsonFormatter::new(timestamps)),
        }
    }
}
