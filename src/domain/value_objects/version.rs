//! FileVersion value object - per-file change counter

use serde::Serialize;

/// Change counter of one tracked file.
///
/// Starts at 0 when the session begins and only ever moves forward by one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct FileVersion(u64);

impl FileVersion {
    pub const INITIAL: FileVersion = FileVersion(0);

    pub fn get(&self) -> u64 {
        self.0
    }

    #[must_use]
    pub fn next(self) -> Self {
        FileVersion(self.0 + 1)
    }
}

impl std::fmt::Display for FileVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
