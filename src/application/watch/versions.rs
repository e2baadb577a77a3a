//! Per-file version table of a watch session

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use crate::domain::value_objects::FileVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VersionEntry {
    version: FileVersion,
    /// Newest modification time observed so far
    modified: Option<SystemTime>,
}

/// Versions of every tracked file, keyed by absolute path.
///
/// A version starts at 0 and increases by exactly one each time `observe`
/// sees a strictly newer modification time. It never decreases, and a file
/// that disappears keeps its last version.
#[derive(Debug, Clone, Default)]
pub struct VersionTable {
    entries: BTreeMap<PathBuf, VersionEntry>,
}

impl VersionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a file at version 0. Re-tracking a file is a no-op.
    pub fn track(&mut self, path: impl Into<PathBuf>, modified: Option<SystemTime>) {
        self.entries.entry(path.into()).or_insert(VersionEntry {
            version: FileVersion::INITIAL,
            modified,
        });
    }

    /// Record a timestamp reading.
    ///
    /// Returns the new version when the reading is strictly newer than every
    /// earlier one, `None` when nothing changed or the file is untracked.
    pub fn observe(&mut self, path: &Path, modified: SystemTime) -> Option<FileVersion> {
        let entry = self.entries.get_mut(path)?;
        if matches!(entry.modified, Some(seen) if modified <= seen) {
            return None;
        }
        entry.modified = Some(modified);
        entry.version = entry.version.next();
        Some(entry.version)
    }

    pub fn version(&self, path: &Path) -> Option<FileVersion> {
        self.entries.get(path).map(|e| e.version)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Tracked files, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.entries.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
