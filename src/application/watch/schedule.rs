//! Per-file poll timers

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// One recurring timer per tracked file.
///
/// `take_due` removes the timers it returns, so a file being checked has no
/// pending timer until `arm` is called again after its emission finished.
#[derive(Debug, Clone)]
pub struct PollSchedule {
    interval: Duration,
    due: BTreeMap<PathBuf, Instant>,
}

impl PollSchedule {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            due: BTreeMap::new(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// (Re)start the timer of `path`, due one interval after `now`
    pub fn arm(&mut self, path: impl Into<PathBuf>, now: Instant) {
        self.due.insert(path.into(), now + self.interval);
    }

    /// Make an armed timer due immediately. Files without a timer are left
    /// alone; their check is already in flight.
    pub fn wake(&mut self, path: &Path, now: Instant) {
        if let Some(due) = self.due.get_mut(path) {
            *due = now;
        }
    }

    /// Remove and return every timer due at `now`, in path order
    pub fn take_due(&mut self, now: Instant) -> Vec<PathBuf> {
        let due: Vec<PathBuf> = self
            .due
            .iter()
            .filter(|(_, at)| **at <= now)
            .map(|(path, _)| path.clone())
            .collect();
        for path in &due {
            self.due.remove(path);
        }
        due
    }

    /// Earliest pending deadline
    pub fn next_due(&self) -> Option<Instant> {
        self.due.values().min().copied()
    }

    pub fn is_armed(&self, path: &Path) -> bool {
        self.due.contains_key(path)
    }

    /// Deregister every pending timer
    pub fn clear(&mut self) {
        self.due.clear();
    }

    pub fn len(&self) -> usize {
        self.due.len()
    }

    pub fn is_empty(&self) -> bool {
        self.due.is_empty()
    }
}
