//! Output formatter implementations.

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::watch::{WatchEvent, WatchEventKind};
use crate::{Error, Result};

use super::OutputFormatter;

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Formatter for `kind path` lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter {
    timestamps: bool,
}

impl TextFormatter {
    /// Create a text formatter.
    #[must_use]
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, event: &WatchEvent) -> Result<String> {
        if self.timestamps {
            Ok(format!("{} {event}", now()))
        } else {
            Ok(event.to_string())
        }
    }
}

#[derive(Serialize)]
struct JsonLine<'a> {
    kind: WatchEventKind,
    path: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,
}

/// Formatter for one-line JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter {
    timestamps: bool,
}

impl JsonFormatter {
    /// Create a JSON formatter.
    #[must_use]
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, event: &WatchEvent) -> Result<String> {
        let line = JsonLine {
            kind: event.kind,
            path: &event.path,
            time: self.timestamps.then(now),
        };

        serde_json::to_string(&line).map_err(|e| Error::Validation {
            field: "json_output".to_string(),
            message: format!("failed to serialize to JSON: {e}"),
        })
    }
}
