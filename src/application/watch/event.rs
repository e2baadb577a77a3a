//! Watch event types and options

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::domain::entities::Diagnostic;

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 250;

/// Watch options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchOptions {
    /// Per-file timestamp poll interval
    pub interval: Duration,
    /// Wake polling early on native file-change events (local disk only)
    pub native_events: bool,
    /// Extension of tracked source files, without the dot
    pub extension: String,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(POLL_INTERVAL_MS),
            native_events: false,
            extension: "ts".to_string(),
        }
    }
}

impl WatchOptions {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_native_events(mut self, native_events: bool) -> Self {
        self.native_events = native_events;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Session initialized
    WatchStarted { root: String, files: usize },
    /// A tracked file got a newer timestamp
    FileChanged { path: String, version: u64 },
    /// Output for one source file was produced
    Emitted {
        path: String,
        artifacts: Vec<String>,
        emit_skipped: bool,
    },
    /// One diagnostic, in console form
    Diagnostic { message: String },
    /// Error occurred; the session keeps running
    Error { message: String },
    /// Watch stopped
    Shutdown,
}

impl WatchEvent {
    pub fn diagnostic(diagnostic: &Diagnostic) -> Self {
        WatchEvent::Diagnostic {
            message: diagnostic.to_string(),
        }
    }

    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Paths reported by native change events, waiting for the next tick
#[derive(Debug, Default)]
pub struct WatcherState {
    pending_changes: BTreeSet<PathBuf>,
}

impl WatcherState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file change to pending changes
    pub fn add_change(&mut self, path: PathBuf) {
        self.pending_changes.insert(path);
    }

    /// Take all pending changes, resetting state
    pub fn take_changes(&mut self) -> Vec<PathBuf> {
        std::mem::take(&mut self.pending_changes).into_iter().collect()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending_changes.is_empty()
    }
}
