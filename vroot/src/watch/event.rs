//! Change events and the listener that receives them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What happened to a watched path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WatchEventKind {
    /// The path appeared since the previous tick.
    Created,
    /// The path's modification time strictly increased.
    Modified,
    /// The path disappeared since the previous tick.
    Deleted,
}

impl fmt::Display for WatchEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Modified => write!(f, "modified"),
            Self::Deleted => write!(f, "deleted"),
        }
    }
}

/// A detected change.
///
/// # Examples
///
/// ```
/// use vroot::watch::{WatchEvent, WatchEventKind};
///
/// let event = WatchEvent::new(WatchEventKind::Created, "docs/a.md");
/// assert_eq!(event.to_string(), "created docs/a.md");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchEvent {
    /// The kind of change.
    pub kind: WatchEventKind,
    /// Canonical path of the affected entry.
    pub path: String,
}

impl WatchEvent {
    /// Create an event.
    #[must_use]
    pub fn new(kind: WatchEventKind, path: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

impl fmt::Display for WatchEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.path)
    }
}

/// Receives events from a [`Watcher`](crate::watch::Watcher).
///
/// Every event is first offered to [`on_any`](WatchListener::on_any). The
/// kind-specific handler runs only when `on_any` returns `true`, so `on_any`
/// acts as a veto gate: a detected change produces zero or one specific
/// handler call. The watch set is updated either way.
///
/// All methods have defaults; implement only what you need.
pub trait WatchListener: Send {
    /// Gate for every event. Defaults to accepting everything.
    fn on_any(&mut self, event: &WatchEvent) -> bool {
        let _ = event;
        true
    }

    /// A path was created.
    fn on_created(&mut self, event: &WatchEvent) {
        let _ = event;
    }

    /// A path was modified.
    fn on_modified(&mut self, event: &WatchEvent) {
        let _ = event;
    }

    /// A path was deleted.
    fn on_deleted(&mut self, event: &WatchEvent) {
        let _ = event;
    }
}

/// Route an event through the gate and on to its specific handler.
///
/// Returns whether the specific handler ran.
pub(crate) fn dispatch(listener: &mut dyn WatchListener, event: &WatchEvent) -> bool {
    if !listener.on_any(event) {
        return false;
    }
    match event.kind {
        WatchEventKind::Created => listener.on_created(event),
        WatchEventKind::Modified => listener.on_modified(event),
        WatchEventKind::Deleted => listener.on_deleted(event),
    }
    true
}
